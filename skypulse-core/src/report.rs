//! The structured report returned by one analysis call.
//!
//! Field names and enum spellings match the JSON document the model is asked
//! to produce, so a response body deserializes straight into [`DashboardReport`].
//! A report is always replaced wholesale, never merged.

use serde::{Deserialize, Serialize};

use crate::analyst::AnalystError;

/// Priority attached to an actionable area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn as_str(self) -> &'static str {
        match self {
            Impact::High => "High",
            Impact::Medium => "Medium",
            Impact::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionableArea {
    pub title: String,
    pub description: String,
    pub impact: Impact,
}

/// One point on the sentiment trend line. `score` lies in `[-1, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentDataPoint {
    pub date: String,
    pub score: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordSentiment {
    Praise,
    Complaint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCloudItem {
    pub text: String,
    pub value: f64,
    pub sentiment: WordSentiment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryData {
    pub name: String,
    pub sentiment_score: f64,
    pub summary: String,
    pub keywords: Vec<String>,
}

/// Everything the dashboard shows below the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub executive_summary: String,
    pub actionable_areas: Vec<ActionableArea>,
    pub sentiment_trend: Vec<SentimentDataPoint>,
    pub word_cloud: Vec<WordCloudItem>,
    pub categories: Vec<CategoryData>,
}

impl DashboardReport {
    /// Parses a model response body into a report.
    ///
    /// Every top-level field is required. After parsing, sentiment scores are
    /// clamped into `[-1, 1]` and word-cloud values floored at zero.
    ///
    /// # Errors
    ///
    /// Returns `AnalystError::EmptyResponse` for a blank body,
    /// `AnalystError::Parse` for malformed JSON or a missing field, and
    /// `AnalystError::InvalidReport` when any number is NaN or infinite.
    pub fn from_json(body: &str) -> Result<Self, AnalystError> {
        if body.trim().is_empty() {
            return Err(AnalystError::EmptyResponse);
        }
        let report: DashboardReport = serde_json::from_str(body)?;
        report.normalized()
    }

    fn normalized(mut self) -> Result<Self, AnalystError> {
        for point in &mut self.sentiment_trend {
            point.score = clamp_score(point.score, "sentimentTrend.score")?;
        }
        for category in &mut self.categories {
            category.sentiment_score =
                clamp_score(category.sentiment_score, "categories.sentimentScore")?;
        }
        for item in &mut self.word_cloud {
            if !item.value.is_finite() {
                return Err(AnalystError::InvalidReport(format!(
                    "wordCloud.value for '{}' is not finite",
                    item.text
                )));
            }
            item.value = item.value.max(0.0);
        }
        Ok(self)
    }

    /// Looks up a category by exact name.
    pub fn category(&self, name: &str) -> Option<&CategoryData> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Returns each word-cloud item paired with its weight in `[0, 1]`.
    ///
    /// Weights are min-max normalized over the current cloud. When every item
    /// has the same value (or there is only one) all weights are 1.
    pub fn word_weights(&self) -> Vec<(&WordCloudItem, f64)> {
        let max = self.word_cloud.iter().map(|i| i.value).fold(f64::MIN, f64::max);
        let min = self.word_cloud.iter().map(|i| i.value).fold(f64::MAX, f64::min);
        let range = max - min;
        self.word_cloud
            .iter()
            .map(|item| {
                let weight = if range > 0.0 { (item.value - min) / range } else { 1.0 };
                (item, weight)
            })
            .collect()
    }
}

fn clamp_score(score: f64, field: &str) -> Result<f64, AnalystError> {
    if !score.is_finite() {
        return Err(AnalystError::InvalidReport(format!("{field} is not finite")));
    }
    Ok(score.clamp(-1.0, 1.0))
}

/// Formats a `[-1, 1]` score as a whole percentage, e.g. `0.426` → `43%`.
pub fn score_percent(score: f64) -> String {
    format!("{:.0}%", score * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{"executiveSummary":"ok","actionableAreas":[],"sentimentTrend":[],"wordCloud":[],"categories":[]}"#;

    #[test]
    fn parses_minimal_report() {
        let report = DashboardReport::from_json(MINIMAL).unwrap();
        assert_eq!(report.executive_summary, "ok");
        assert!(report.categories.is_empty());
    }

    #[test]
    fn missing_field_is_a_parse_error() {
        let err = DashboardReport::from_json(r#"{"executiveSummary":"ok"}"#).unwrap_err();
        assert!(matches!(err, AnalystError::Parse(_)));
    }

    #[test]
    fn blank_body_is_empty_response() {
        let err = DashboardReport::from_json("  \n").unwrap_err();
        assert!(matches!(err, AnalystError::EmptyResponse));
    }

    #[test]
    fn unknown_impact_is_rejected() {
        let body = r#"{"executiveSummary":"s","actionableAreas":[{"title":"t","description":"d","impact":"Critical"}],"sentimentTrend":[],"wordCloud":[],"categories":[]}"#;
        assert!(DashboardReport::from_json(body).is_err());
    }

    #[test]
    fn scores_are_clamped_and_values_floored() {
        let body = r#"{
            "executiveSummary": "s",
            "actionableAreas": [],
            "sentimentTrend": [{"date": "Mon", "score": 1.7, "label": "great"}],
            "wordCloud": [{"text": "delay", "value": -3, "sentiment": "complaint"}],
            "categories": [{"name": "Crew Performance", "sentimentScore": -2.0, "summary": "x", "keywords": []}]
        }"#;
        let report = DashboardReport::from_json(body).unwrap();
        assert_eq!(report.sentiment_trend[0].score, 1.0);
        assert_eq!(report.categories[0].sentiment_score, -1.0);
        assert_eq!(report.word_cloud[0].value, 0.0);
    }

    #[test]
    fn word_weights_span_unit_interval() {
        let body = r#"{
            "executiveSummary": "s",
            "actionableAreas": [],
            "sentimentTrend": [],
            "wordCloud": [
                {"text": "lounge", "value": 10, "sentiment": "praise"},
                {"text": "delay", "value": 2, "sentiment": "complaint"},
                {"text": "crew", "value": 6, "sentiment": "praise"}
            ],
            "categories": []
        }"#;
        let report = DashboardReport::from_json(body).unwrap();
        let weights: Vec<f64> = report.word_weights().into_iter().map(|(_, w)| w).collect();
        assert_eq!(weights, vec![1.0, 0.0, 0.5]);
    }

    #[test]
    fn flat_word_cloud_gets_full_weight() {
        let body = r#"{
            "executiveSummary": "s",
            "actionableAreas": [],
            "sentimentTrend": [],
            "wordCloud": [
                {"text": "lounge", "value": 4, "sentiment": "praise"},
                {"text": "delay", "value": 4, "sentiment": "complaint"}
            ],
            "categories": []
        }"#;
        let report = DashboardReport::from_json(body).unwrap();
        let weights: Vec<f64> = report.word_weights().into_iter().map(|(_, w)| w).collect();
        assert_eq!(weights, vec![1.0, 1.0]);
    }

    #[test]
    fn score_percent_rounds() {
        assert_eq!(score_percent(0.426), "43%");
        assert_eq!(score_percent(-0.5), "-50%");
    }
}
