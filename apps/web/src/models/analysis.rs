use serde::{Deserialize, Serialize};

pub const MAX_SCORE: u8 = 100;

/// Scoring report returned by the analysis service for one submission.
///
/// Field order here is the key order of exported files. The service may send
/// either snake_case or camelCase keys; exports are always snake_case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ticker: String,
    #[serde(alias = "trustScore")]
    pub trust_score: u8,
    #[serde(alias = "trustJustification")]
    pub trust_justification: String,
    #[serde(alias = "trustRecommendations", default)]
    pub trust_recommendations: Vec<String>,
    #[serde(alias = "growthScore")]
    pub growth_score: u8,
    #[serde(alias = "growthJustification")]
    pub growth_justification: String,
    #[serde(alias = "growthRecommendations", default)]
    pub growth_recommendations: Vec<String>,
    pub summary: String,
    #[serde(alias = "runId")]
    pub run_id: String,
}

/// One scored axis of a report, borrowed for rendering.
#[derive(Debug, Clone, Copy)]
pub struct Dimension<'a> {
    pub title: &'static str,
    pub score: u8,
    pub justification: &'a str,
    pub recommendations: &'a [String],
}

impl AnalysisResult {
    pub fn dimensions(&self) -> [Dimension<'_>; 2] {
        [
            Dimension {
                title: "Trust",
                score: self.trust_score,
                justification: &self.trust_justification,
                recommendations: &self.trust_recommendations,
            },
            Dimension {
                title: "Growth",
                score: self.growth_score,
                justification: &self.growth_justification,
                recommendations: &self.growth_recommendations,
            },
        ]
    }

    /// Returns a description of the first score outside 0–100, if any.
    pub fn out_of_range_score(&self) -> Option<String> {
        self.dimensions()
            .into_iter()
            .find(|d| d.score > MAX_SCORE)
            .map(|d| format!("{} score {} is outside 0-{MAX_SCORE}", d.title, d.score))
    }
}

#[cfg(test)]
pub(crate) fn sample_result() -> AnalysisResult {
    AnalysisResult {
        ticker: "A".to_string(),
        trust_score: 72,
        trust_justification: "Consistent disclosures across filings.".to_string(),
        trust_recommendations: vec!["Publish audit committee minutes".to_string()],
        growth_score: 58,
        growth_justification: "Revenue growth is flat year over year.".to_string(),
        growth_recommendations: vec![],
        summary: "Solid governance, modest growth.".to_string(),
        run_id: "run-7f3a".to_string(),
    }
}
