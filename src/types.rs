use serde::{Serialize, Deserialize};

/// Shape of one line of a transaction-log export. Every line falls into
/// exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCategory {
    Empty,
    TimestampedEntry,
    Header,
    MixedContent,
}

impl LineCategory {
    pub fn label(&self) -> &'static str {
        match self {
            LineCategory::Empty => "empty",
            LineCategory::TimestampedEntry => "timestamped_entry",
            LineCategory::Header => "header",
            LineCategory::MixedContent => "mixed_content",
        }
    }
}

/// Classification result for a single input line. Immutable once built.
///
/// `timestamp`, `remainder` and the extracted field lists carry data only
/// for `TimestampedEntry` lines; every other category leaves them empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    /// 1-based position in the input sequence.
    pub index: usize,
    /// Original line, unmodified.
    pub raw_text: String,
    pub category: LineCategory,
    /// The `MM:SS` token, without parentheses.
    pub timestamp: Option<String>,
    /// Line content after the closing parenthesis of the timestamp.
    pub remainder: String,
    /// Maximal runs of Arabic-block characters, in order of appearance.
    pub arabic_runs: Vec<String>,
    /// Matches of the uppercase-letters-colon-digits code shape.
    pub english_codes: Vec<String>,
    /// Matches of the literal `CA:` account code shape.
    pub account_codes: Vec<String>,
    /// Matches of the 8-digits-then-alphanumerics bank code shape.
    pub bank_codes: Vec<String>,
    /// Count of `/` characters in the remainder.
    pub separator_count: usize,
}

impl LineRecord {
    /// A record with no timestamp payload, used for every non-entry category.
    pub fn bare(raw_text: &str, index: usize, category: LineCategory) -> Self {
        Self {
            index,
            raw_text: raw_text.to_string(),
            category,
            timestamp: None,
            remainder: String::new(),
            arabic_runs: Vec::new(),
            english_codes: Vec::new(),
            account_codes: Vec::new(),
            bank_codes: Vec::new(),
            separator_count: 0,
        }
    }
}
