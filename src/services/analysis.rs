use crate::api::error::AppError;
use crate::config::AppConfig;
use crate::models::{AnalysisReport, UploadedDocument, WordCloudImage};
use crate::services::intake::TempDocument;
use crate::services::sentiment::{PolarityScorer, analyze_sentiment, normalized_progress};
use crate::services::word_cloud::WordCloudRenderer;
use crate::utils::text::{is_word, tokenize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

pub const WORD_CLOUD_DISABLED_NOTICE: &str =
    "Enable word cloud rendering to see the word cloud visualization.";
pub const WORD_CLOUD_FAILED_NOTICE: &str =
    "The word cloud could not be rendered for this document.";

pub struct AnalysisService {
    upload_dir: PathBuf,
    scorer: Arc<dyn PolarityScorer>,
    word_cloud: Option<Arc<dyn WordCloudRenderer>>,
}

impl AnalysisService {
    pub fn new(
        config: &AppConfig,
        scorer: Arc<dyn PolarityScorer>,
        word_cloud: Option<Arc<dyn WordCloudRenderer>>,
    ) -> Self {
        Self {
            upload_dir: config.upload_dir(),
            scorer,
            word_cloud,
        }
    }

    pub fn word_cloud_enabled(&self) -> bool {
        self.word_cloud.is_some()
    }

    /// Stages the document in a temporary file, reads it back and scores it.
    /// The temporary file never outlives this call.
    pub fn analyze(&self, document: &UploadedDocument) -> Result<AnalysisReport, AppError> {
        let mut staged = TempDocument::create(&self.upload_dir, &document.bytes)?;
        let text = staged.read_text()?;

        let sentiment = analyze_sentiment(self.scorer.as_ref(), &text);
        let (word_cloud, notice) = self.render_word_cloud(&text);

        info!(
            "📊 {} ({}): {} {:.2}",
            document.filename, document.id, sentiment.label, sentiment.score
        );

        if let Err(e) = staged.close() {
            error!("Temporary file cleanup failed: {}", e);
        }

        Ok(AnalysisReport {
            document_id: document.id.clone(),
            filename: document.filename.clone(),
            progress: normalized_progress(sentiment.score),
            sentiment,
            word_count: tokenize(&text).iter().filter(|t| is_word(t)).count(),
            word_cloud,
            notice,
        })
    }

    fn render_word_cloud(&self, text: &str) -> (Option<WordCloudImage>, Option<String>) {
        let Some(renderer) = &self.word_cloud else {
            return (None, Some(WORD_CLOUD_DISABLED_NOTICE.to_string()));
        };

        match renderer.render(text) {
            Ok(image) => (Some(image), None),
            Err(e) => {
                warn!("Word cloud ({}) skipped: {}", renderer.name(), e);
                (None, Some(WORD_CLOUD_FAILED_NOTICE.to_string()))
            }
        }
    }
}
