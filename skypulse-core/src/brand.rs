//! Brand profiles.
//!
//! A `BrandProfile` bundles everything that differs between airline skins:
//! the canned feed catalog, feed cadence, seed size, prompt wording, category
//! names, and the default colour theme. The rest of the dashboard is brand-agnostic.

use std::time::Duration;

use crate::types::{CannedReview, Source};

/// Configuration bundle for one airline skin.
#[derive(Debug, Clone)]
pub struct BrandProfile {
    /// Config key, e.g. `"etihad"`.
    pub key: &'static str,
    /// Upper-case brand name shown in the header.
    pub name: &'static str,
    /// Product name shown next to the brand.
    pub product: &'static str,
    /// Header subtitle shown while live mode is on.
    pub live_banner: &'static str,
    pub catalog: &'static [CannedReview],
    /// Delay between mock feed entries while live mode is on.
    pub feed_interval: Duration,
    /// Number of catalog entries seeded by the initial analysis.
    pub seed_count: usize,
    /// Service areas the model should look for actionable issues in.
    pub focus_areas: &'static str,
    /// Category names the model should group feedback into.
    pub categories: &'static [&'static str],
    pub chat_system_instruction: &'static str,
    /// Theme used when the config does not name one.
    pub default_theme: &'static str,
}

const ETIHAD_CATALOG: &[CannedReview] = &[
    CannedReview { text: "The First Class Lounge in Abu Dhabi is absolute perfection. World class dining.", source: Source::Google },
    CannedReview { text: "Etihad Guest miles devaluation is really frustrating. Considering switching to another carrier.", source: Source::Reddit },
    CannedReview { text: "Cabin crew on EY12 were exceptional. True Arabic hospitality.", source: Source::Facebook },
    CannedReview { text: "Our First Studio flight to London was delayed by 4 hours. No communication from ground staff.", source: Source::Twitter },
    CannedReview { text: "Etihad's focus on sustainable aviation fuel is a great strategic move for the brand.", source: Source::Linkedin },
    CannedReview { text: "Business class seats are starting to feel a bit dated on the older 777s.", source: Source::Yelp },
    CannedReview { text: "Smooth booking process via the mobile app. Highly recommended.", source: Source::Google },
    CannedReview { text: "Poor response from customer support regarding my lost baggage.", source: Source::Facebook },
    CannedReview { text: "Reddit thread: Best ways to spend Etihad Guest miles after the recent changes.", source: Source::Reddit },
    CannedReview { text: "Honored to share our partnership with Etihad Airways on new sustainability tech.", source: Source::Linkedin },
];

const MERIDIAN_CATALOG: &[CannedReview] = &[
    CannedReview { text: "Meridian's new lie-flat seats on the transatlantic route are a game changer.", source: Source::Twitter },
    CannedReview { text: "Check-in queue at the hub took over an hour. Only two desks open.", source: Source::Google },
    CannedReview { text: "Flight attendant went out of her way to help my elderly mother. Thank you!", source: Source::Facebook },
    CannedReview { text: "SkyMiles+ upgrade availability is basically zero these days.", source: Source::Reddit },
    CannedReview { text: "Proud to announce Meridian as our preferred corporate travel partner.", source: Source::Linkedin },
    CannedReview { text: "Food in economy was cold and the portion was tiny.", source: Source::Yelp },
    CannedReview { text: "Wi-Fi worked the entire flight and was actually fast. Impressed.", source: Source::Twitter },
    CannedReview { text: "Bag arrived damaged and the claims form keeps timing out.", source: Source::Google },
    CannedReview { text: "Lounge renovation looks great but it was packed by 7am.", source: Source::Reddit },
    CannedReview { text: "On-time arrival, friendly crew, no complaints at all.", source: Source::Yelp },
];

impl BrandProfile {
    /// The Etihad Airways skin: 7 s feed cadence, five seeded reviews.
    pub fn etihad() -> Self {
        Self {
            key: "etihad",
            name: "ETIHAD",
            product: "Horizon",
            live_banner: "Guest Sentiment Live Monitor",
            catalog: ETIHAD_CATALOG,
            feed_interval: Duration::from_secs(7),
            seed_count: 5,
            focus_areas: "Lounge at AUH, Cabin Crew, The Residence/First class, Business class, Guest services",
            categories: &[
                "First/Business Class",
                "Economy Experience",
                "Etihad Guest (Loyalty)",
                "Airport/Lounge Services",
                "Crew Performance",
            ],
            chat_system_instruction: "You are an expert aviation guest-experience analyst for Etihad Airways. Assist with deep-dive analysis of premium service feedback.",
            default_theme: "horizon",
        }
    }

    /// The Meridian Airways skin: 6 s feed cadence, six seeded reviews.
    pub fn meridian() -> Self {
        Self {
            key: "meridian",
            name: "MERIDIAN",
            product: "Pulse",
            live_banner: "Passenger Sentiment Live Monitor",
            catalog: MERIDIAN_CATALOG,
            feed_interval: Duration::from_secs(6),
            seed_count: 6,
            focus_areas: "Check-in and boarding, Cabin Crew, Seats and comfort, Catering, Baggage handling, Loyalty program",
            categories: &[
                "Premium Cabins",
                "Economy Experience",
                "SkyMiles+ (Loyalty)",
                "Airport Operations",
                "Crew Performance",
            ],
            chat_system_instruction: "You are an expert airline customer-experience analyst for Meridian Airways. Help the operations team dig into passenger feedback.",
            default_theme: "dark",
        }
    }

    /// Resolves a brand key from config. Unknown keys return `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "etihad" => Some(Self::etihad()),
            "meridian" => Some(Self::meridian()),
            _ => None,
        }
    }

    /// Overrides the feed cadence, e.g. from `feed_interval_ms` in config.
    pub fn with_feed_interval(mut self, interval: Duration) -> Self {
        self.feed_interval = interval;
        self
    }

    /// The first `seed_count` catalog entries, in catalog order.
    pub fn seed(&self) -> &'static [CannedReview] {
        &self.catalog[..self.seed_count.min(self.catalog.len())]
    }

    /// Builds the natural-language instruction for one analysis request.
    ///
    /// `batch` is the newline-joined `[SOURCE] text` payload; `focus` narrows
    /// the analysis to one category name when set.
    pub fn analysis_prompt(&self, batch: &str, focus: Option<&str>) -> String {
        let filter = match focus {
            Some(name) => format!("FOCUS ONLY ON THE CATEGORY: \"{name}\".\n"),
            None => String::new(),
        };
        let categories = self
            .categories
            .iter()
            .map(|c| format!("'{c}'"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "You are monitoring live feedback for {name} AIRWAYS.\n\
             Analyze the following batch of reviews across multi-channel social sources and provide a structured JSON report.\n\
             {filter}\
             1. Executive Summary: Summarize the current vibe of the guest experience.\n\
             2. Actionable Areas: Identify the top 3 issues across {areas}.\n\
             3. Sentiment Trend: Plot a chronological series of scores between -1 and 1.\n\
             4. Keyword Cloud: Extract prominent service terms, tagged as praise or complaint.\n\
             5. Categories: Group feedback into: {categories}.\n\n\
             Reviews Batch:\n{batch}",
            name = self.name,
            areas = self.focus_areas,
        )
    }
}

impl Default for BrandProfile {
    fn default() -> Self {
        Self::etihad()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brands_differ_in_cadence_and_seed() {
        let e = BrandProfile::etihad();
        let m = BrandProfile::meridian();
        assert_eq!(e.feed_interval, Duration::from_secs(7));
        assert_eq!(m.feed_interval, Duration::from_secs(6));
        assert_eq!(e.seed().len(), 5);
        assert_eq!(m.seed().len(), 6);
    }

    #[test]
    fn from_key_is_case_insensitive() {
        assert_eq!(BrandProfile::from_key("Meridian").unwrap().key, "meridian");
        assert!(BrandProfile::from_key("unknown").is_none());
    }

    #[test]
    fn prompt_includes_focus_only_when_set() {
        let brand = BrandProfile::etihad();
        let scoped = brand.analysis_prompt("[GOOGLE] ok", Some("Crew Performance"));
        assert!(scoped.contains("FOCUS ONLY ON THE CATEGORY: \"Crew Performance\""));
        assert!(scoped.ends_with("[GOOGLE] ok"));
        let open = brand.analysis_prompt("[GOOGLE] ok", None);
        assert!(!open.contains("FOCUS ONLY"));
    }
}
