use serde::{Deserialize, Serialize};

/// Result of comparing two notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonData {
    #[serde(default)]
    pub similarity_score: f32,
    #[serde(default)]
    pub comparison_summary: Option<String>,
    #[serde(default)]
    pub note1: Option<String>,
    #[serde(default)]
    pub note2: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimilarityBand {
    VerySimilar,
    Similar,
    SomewhatSimilar,
    VeryDifferent,
}

impl SimilarityBand {
    /// Bands at 80 / 60 / 40 percent.
    pub fn from_score(score: f32) -> Self {
        if score >= 80.0 {
            SimilarityBand::VerySimilar
        } else if score >= 60.0 {
            SimilarityBand::Similar
        } else if score >= 40.0 {
            SimilarityBand::SomewhatSimilar
        } else {
            SimilarityBand::VeryDifferent
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SimilarityBand::VerySimilar => "Very Similar",
            SimilarityBand::Similar => "Similar",
            SimilarityBand::SomewhatSimilar => "Somewhat Similar",
            SimilarityBand::VeryDifferent => "Very Different",
        }
    }
}

impl ComparisonData {
    pub fn band(&self) -> SimilarityBand {
        SimilarityBand::from_score(self.similarity_score)
    }
}
