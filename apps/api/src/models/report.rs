use serde::{Deserialize, Deserializer, Serialize};

/// Difficulty rating assigned by the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Unknown or non-string difficulty values are treated as absent.
fn lenient_difficulty<'de, D>(deserializer: D) -> Result<Option<Difficulty>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(Difficulty::parse))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicNode {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
}

impl TopicNode {
    /// `label` when present and non-empty, otherwise `id`.
    pub fn display_name(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => &self.id,
        }
    }
}

/// A completed note analysis, as handed over by the UI for export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    #[serde(default, deserialize_with = "lenient_difficulty")]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub bloom_level: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub quiz_questions: Vec<QuizQuestion>,
    #[serde(default)]
    pub topic_graph: Vec<TopicNode>,
}

/// Options are labeled A–Z.
pub const MAX_QUIZ_OPTIONS: usize = 26;

impl ReportData {
    /// Boundary check for data the composer would otherwise label past `Z`.
    pub fn validate(&self) -> Result<(), String> {
        for (i, q) in self.quiz_questions.iter().enumerate() {
            if q.options.len() > MAX_QUIZ_OPTIONS {
                return Err(format!(
                    "quiz question {} has {} options; at most {MAX_QUIZ_OPTIONS} are supported",
                    i + 1,
                    q.options.len()
                ));
            }
        }
        Ok(())
    }
}
