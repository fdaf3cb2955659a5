//! The dashboard controller: review log, current report, and the rules that
//! keep them consistent.
//!
//! `Monitor` never performs I/O. Operations that need the remote model return
//! an [`AnalysisRequest`]; the caller runs it and feeds the outcome back via
//! [`Monitor::apply_analysis`]. Every request carries a sequence number and
//! only the most recently issued one may change the report, so a slow older
//! response can never overwrite a newer report.

use chrono::{DateTime, Local};

use crate::analyst::AnalystError;
use crate::brand::BrandProfile;
use crate::feed::stamp_all;
use crate::log::ReviewLog;
use crate::report::{CategoryData, DashboardReport};
use crate::types::ReviewEntry;

/// Why an analysis request was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// The blocking seed-and-analyze call that opens the dashboard.
    Initial,
    /// Count trigger or manual refresh; never blocks the UI.
    Background,
}

/// One analysis call to be run by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub seq: u64,
    pub kind: RequestKind,
    /// `[SOURCE] text` lines, newest-first.
    pub batch: String,
    /// Category scope, if one was selected when the request was issued.
    pub focus: Option<String>,
}

/// What [`Monitor::apply_analysis`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The report was replaced.
    Replaced,
    /// The call failed; the previous report is unchanged.
    Failed,
    /// A newer request was issued since; the response was discarded.
    Stale,
}

/// Owns all dashboard state except the chat buffer.
pub struct Monitor {
    brand: BrandProfile,
    log: ReviewLog,
    report: Option<DashboardReport>,
    report_updated_at: Option<DateTime<Local>>,
    active_category: Option<String>,
    live: bool,
    loading: bool,
    background_in_flight: usize,
    latest_seq: u64,
    last_error: Option<String>,
}

impl Monitor {
    pub fn new(brand: BrandProfile) -> Self {
        Self {
            brand,
            log: ReviewLog::default(),
            report: None,
            report_updated_at: None,
            active_category: None,
            live: false,
            loading: false,
            background_in_flight: 0,
            latest_seq: 0,
            last_error: None,
        }
    }

    pub fn brand(&self) -> &BrandProfile {
        &self.brand
    }

    pub fn log(&self) -> &ReviewLog {
        &self.log
    }

    pub fn report(&self) -> Option<&DashboardReport> {
        self.report.as_ref()
    }

    /// When the current report was applied.
    pub fn report_updated_at(&self) -> Option<DateTime<Local>> {
        self.report_updated_at
    }

    pub fn active_category(&self) -> Option<&str> {
        self.active_category.as_deref()
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    /// True while the initial analysis is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True while any background analysis is outstanding. Display only.
    pub fn is_background_updating(&self) -> bool {
        self.background_in_flight > 0
    }

    /// Message from the most recent failed analysis, cleared on the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ---------------------------------------------------------------------
    // Initial analysis
    // ---------------------------------------------------------------------

    /// Seeds the log with the brand's catalog prefix and issues the initial request.
    ///
    /// Enters the loading state. Live mode is enabled only once the response
    /// arrives successfully; see [`Monitor::apply_analysis`].
    pub fn start_initial(&mut self) -> AnalysisRequest {
        self.log.replace(stamp_all(self.brand.seed()));
        self.loading = true;
        self.last_error = None;
        tracing::info!(seeded = self.log.len(), brand = self.brand.key, "starting initial analysis");
        self.issue(RequestKind::Initial, None)
    }

    // ---------------------------------------------------------------------
    // Review log + trigger
    // ---------------------------------------------------------------------

    /// Prepends `entry` and applies the count trigger.
    ///
    /// Returns a background request when the log length changed and the new
    /// length is a positive multiple of 3. At capacity the length no longer
    /// changes, so the trigger stays quiet.
    pub fn append_review(&mut self, entry: ReviewEntry) -> Option<AnalysisRequest> {
        let before = self.log.len();
        self.log.push(entry);
        let after = self.log.len();
        if after != before && after % 3 == 0 {
            Some(self.issue(RequestKind::Background, self.active_category.clone()))
        } else {
            None
        }
    }

    /// Accepts an entry from the live feed. Dropped when live mode is off.
    pub fn ingest_live(&mut self, entry: ReviewEntry) -> Option<AnalysisRequest> {
        if !self.live {
            tracing::debug!(id = %entry.id, "discarding feed entry received after live mode stopped");
            return None;
        }
        self.append_review(entry)
    }

    /// Issues a background request on demand. `None` when the log is empty.
    pub fn request_refresh(&mut self) -> Option<AnalysisRequest> {
        if self.log.is_empty() {
            return None;
        }
        Some(self.issue(RequestKind::Background, self.active_category.clone()))
    }

    fn issue(&mut self, kind: RequestKind, focus: Option<String>) -> AnalysisRequest {
        self.latest_seq += 1;
        if kind == RequestKind::Background {
            self.background_in_flight += 1;
        }
        AnalysisRequest { seq: self.latest_seq, kind, batch: self.log.to_payload(), focus }
    }

    // ---------------------------------------------------------------------
    // Report
    // ---------------------------------------------------------------------

    /// Applies the outcome of the request numbered `seq`.
    ///
    /// Busy flags are released whatever the outcome. Only a response to the
    /// latest issued request can replace the report; a failed one leaves it
    /// exactly as it was.
    pub fn apply_analysis(
        &mut self,
        seq: u64,
        kind: RequestKind,
        outcome: Result<DashboardReport, AnalystError>,
    ) -> ApplyOutcome {
        match kind {
            RequestKind::Initial => self.loading = false,
            RequestKind::Background => {
                self.background_in_flight = self.background_in_flight.saturating_sub(1);
            }
        }

        if seq != self.latest_seq {
            tracing::debug!(seq, latest = self.latest_seq, "discarding stale analysis response");
            return ApplyOutcome::Stale;
        }

        match outcome {
            Ok(report) => {
                self.replace_report(report);
                self.last_error = None;
                if kind == RequestKind::Initial {
                    self.live = true;
                }
                ApplyOutcome::Replaced
            }
            Err(e) => {
                tracing::warn!(seq, ?kind, error = %e, "analysis failed; keeping previous report");
                self.last_error = Some(e.to_string());
                ApplyOutcome::Failed
            }
        }
    }

    /// Replaces the current report wholesale.
    pub fn replace_report(&mut self, report: DashboardReport) {
        self.report = Some(report);
        self.report_updated_at = Some(Local::now());
    }

    // ---------------------------------------------------------------------
    // Live mode + category scope
    // ---------------------------------------------------------------------

    pub fn set_live(&mut self, live: bool) {
        if self.live != live {
            tracing::info!(live, "live mode changed");
        }
        self.live = live;
    }

    /// Flips live mode and returns the new state.
    pub fn toggle_live(&mut self) -> bool {
        self.set_live(!self.live);
        self.live
    }

    /// Scopes the next analysis request. Any name is accepted.
    pub fn set_active_category(&mut self, category: Option<String>) {
        self.active_category = category;
    }

    /// The selected category, if it still exists in the current report.
    ///
    /// A stale selection reads as `None`, i.e. the unfiltered view.
    pub fn selected_category(&self) -> Option<&CategoryData> {
        let name = self.active_category.as_deref()?;
        self.report.as_ref()?.category(name)
    }

    /// Steps the selection through "entire network" and each report category.
    ///
    /// A stale selection is treated as "entire network" before stepping.
    pub fn cycle_category(&mut self, forward: bool) {
        let names: Vec<String> = self
            .report
            .as_ref()
            .map(|r| r.categories.iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default();
        // Position 0 is "entire network"; 1..=n are categories.
        let slots = names.len() + 1;
        let current = self
            .active_category
            .as_ref()
            .and_then(|a| names.iter().position(|n| n == a))
            .map_or(0, |i| i + 1);
        let next = if forward { (current + 1) % slots } else { (current + slots - 1) % slots };
        self.active_category = if next == 0 { None } else { Some(names[next - 1].clone()) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Source;

    fn report(summary: &str, categories: &[&str]) -> DashboardReport {
        DashboardReport {
            executive_summary: summary.to_owned(),
            actionable_areas: Vec::new(),
            sentiment_trend: Vec::new(),
            word_cloud: Vec::new(),
            categories: categories
                .iter()
                .map(|n| CategoryData {
                    name: (*n).to_owned(),
                    sentiment_score: 0.0,
                    summary: String::new(),
                    keywords: Vec::new(),
                })
                .collect(),
        }
    }

    fn entry(n: usize) -> ReviewEntry {
        ReviewEntry::new(format!("review {n}"), Source::Google, Local::now())
    }

    #[test]
    fn trigger_fires_on_multiples_of_three() {
        let mut monitor = Monitor::new(BrandProfile::etihad());
        let fired: Vec<usize> = (1..=9)
            .filter(|&n| monitor.append_review(entry(n)).is_some())
            .collect();
        assert_eq!(fired, vec![3, 6, 9]);
    }

    #[test]
    fn trigger_payload_is_current_log_newest_first() {
        let mut monitor = Monitor::new(BrandProfile::etihad());
        monitor.append_review(entry(1));
        monitor.append_review(entry(2));
        let request = monitor.append_review(entry(3)).unwrap();
        assert_eq!(request.batch, "[GOOGLE] review 3\n[GOOGLE] review 2\n[GOOGLE] review 1");
        assert_eq!(request.kind, RequestKind::Background);
        assert!(monitor.is_background_updating());
    }

    #[test]
    fn trigger_is_quiet_at_capacity() {
        let mut monitor = Monitor::new(BrandProfile::etihad());
        for n in 0..50 {
            monitor.append_review(entry(n));
        }
        assert_eq!(monitor.log().len(), 50);
        for n in 50..60 {
            assert!(monitor.append_review(entry(n)).is_none());
        }
    }

    #[test]
    fn live_ingest_requires_live_mode() {
        let mut monitor = Monitor::new(BrandProfile::etihad());
        assert!(monitor.ingest_live(entry(1)).is_none());
        assert!(monitor.log().is_empty());
        monitor.set_live(true);
        monitor.ingest_live(entry(2));
        assert_eq!(monitor.log().len(), 1);
    }

    #[test]
    fn failed_analysis_keeps_report_bit_for_bit() {
        let mut monitor = Monitor::new(BrandProfile::etihad());
        let request = monitor.request_refresh();
        assert!(request.is_none());
        monitor.append_review(entry(1));
        let first = monitor.request_refresh().unwrap();
        monitor.apply_analysis(first.seq, first.kind, Ok(report("before", &["A"])));
        let snapshot = monitor.report().cloned();

        let second = monitor.request_refresh().unwrap();
        let outcome =
            monitor.apply_analysis(second.seq, second.kind, Err(AnalystError::EmptyResponse));
        assert_eq!(outcome, ApplyOutcome::Failed);
        assert_eq!(monitor.report().cloned(), snapshot);
        assert!(monitor.last_error().is_some());
        assert!(!monitor.is_background_updating());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut monitor = Monitor::new(BrandProfile::etihad());
        monitor.append_review(entry(1));
        let older = monitor.request_refresh().unwrap();
        let newer = monitor.request_refresh().unwrap();
        assert!(newer.seq > older.seq);

        assert_eq!(
            monitor.apply_analysis(newer.seq, newer.kind, Ok(report("newer", &[]))),
            ApplyOutcome::Replaced
        );
        assert_eq!(
            monitor.apply_analysis(older.seq, older.kind, Ok(report("older", &[]))),
            ApplyOutcome::Stale
        );
        assert_eq!(monitor.report().unwrap().executive_summary, "newer");
        assert!(!monitor.is_background_updating());
    }

    #[test]
    fn initial_failure_is_recovered() {
        let mut monitor = Monitor::new(BrandProfile::meridian());
        let request = monitor.start_initial();
        assert_eq!(monitor.log().len(), 6);
        assert!(monitor.is_loading());
        assert_eq!(request.focus, None);

        let outcome = monitor.apply_analysis(request.seq, request.kind, Err(AnalystError::MissingApiKey));
        assert_eq!(outcome, ApplyOutcome::Failed);
        assert!(!monitor.is_loading());
        assert!(!monitor.is_live());
        assert!(monitor.report().is_none());
    }

    #[test]
    fn stale_initial_response_still_clears_loading() {
        let mut monitor = Monitor::new(BrandProfile::meridian());
        let initial = monitor.start_initial();
        monitor.set_live(true);
        let background = (0..3)
            .find_map(|n| monitor.append_review(entry(n)))
            .expect("count trigger should issue a background request");
        assert!(background.seq > initial.seq);

        let outcome = monitor.apply_analysis(initial.seq, initial.kind, Ok(report("initial", &[])));
        assert_eq!(outcome, ApplyOutcome::Stale);
        assert!(!monitor.is_loading());
        assert!(monitor.report().is_none());
        assert!(monitor.last_error().is_none());
        assert!(monitor.is_background_updating());
    }

    #[test]
    fn category_scope_flows_into_next_request() {
        let mut monitor = Monitor::new(BrandProfile::etihad());
        monitor.append_review(entry(1));
        monitor.set_active_category(Some("Not A Category".to_owned()));
        let request = monitor.request_refresh().unwrap();
        assert_eq!(request.focus.as_deref(), Some("Not A Category"));
        assert!(monitor.selected_category().is_none());
    }

    #[test]
    fn cycle_category_wraps_through_entire_network() {
        let mut monitor = Monitor::new(BrandProfile::etihad());
        monitor.replace_report(report("s", &["A", "B"]));
        monitor.cycle_category(true);
        assert_eq!(monitor.active_category(), Some("A"));
        monitor.cycle_category(true);
        assert_eq!(monitor.active_category(), Some("B"));
        monitor.cycle_category(true);
        assert_eq!(monitor.active_category(), None);
        monitor.cycle_category(false);
        assert_eq!(monitor.active_category(), Some("B"));

        monitor.set_active_category(Some("gone".to_owned()));
        monitor.cycle_category(true);
        assert_eq!(monitor.active_category(), Some("A"));
    }
}
