use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use utoipa::ToSchema;

/// Sentiment category derived from the sign of the polarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    /// Polarity in [-1.0, 1.0]
    pub score: f64,
}

/// A text file received from the user, kept in memory until it is forgotten
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    /// Hex SHA-256 of the content
    pub id: String,
    pub filename: String,
    pub bytes: Bytes,
    pub uploaded_at: DateTime<Utc>,
}

impl UploadedDocument {
    pub fn new(filename: String, bytes: Bytes) -> Self {
        let id = hex::encode(Sha256::digest(&bytes));
        Self {
            id,
            filename,
            bytes,
            uploaded_at: Utc::now(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Rendered word cloud
#[derive(Debug, Clone, PartialEq)]
pub struct WordCloudImage {
    pub width: u32,
    pub height: u32,
    /// SVG document
    pub svg: String,
    /// Words that made it onto the canvas
    pub words: usize,
}

/// Everything the results view shows for one analysis
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub document_id: String,
    pub filename: String,
    pub sentiment: SentimentResult,
    /// Progress bar value in [0.0, 1.0]
    pub progress: f64,
    pub word_count: usize,
    pub word_cloud: Option<WordCloudImage>,
    /// Shown instead of the word cloud when none could be rendered
    pub notice: Option<String>,
}

impl AnalysisReport {
    /// Score as displayed to the user, two decimals
    pub fn score_display(&self) -> String {
        format!("{:.2}", self.sentiment.score)
    }
}
