use std::env;
use std::path::PathBuf;

/// Runtime configuration for uploads and analysis
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Maximum upload size in bytes (default: 10 MB)
    pub max_file_size: usize,

    /// Render a word cloud next to the sentiment result (default: true)
    pub word_cloud_enabled: bool,

    /// Word cloud canvas width in pixels (default: 800)
    pub word_cloud_width: u32,

    /// Word cloud canvas height in pixels (default: 400)
    pub word_cloud_height: u32,

    /// Maximum number of words drawn in the cloud (default: 200)
    pub word_cloud_max_words: usize,

    /// Word cloud background color (default: "white")
    pub word_cloud_background: String,

    /// Directory for temporary upload files (default: system temp dir)
    pub temp_dir: Option<PathBuf>,

    /// Uploaded documents kept for re-analysis (default: 64)
    pub max_documents: usize,

    /// Bind address for the HTTP server (default: "0.0.0.0")
    pub host: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024, // 10 MB
            word_cloud_enabled: true,
            word_cloud_width: 800,
            word_cloud_height: 400,
            word_cloud_max_words: 200,
            word_cloud_background: "white".to_string(),
            temp_dir: None,
            max_documents: 64,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            max_file_size: env::var("MAX_FILE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_file_size),

            word_cloud_enabled: env::var("WORD_CLOUD_ENABLED")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(default.word_cloud_enabled),

            word_cloud_width: env::var("WORD_CLOUD_WIDTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|w| *w > 0)
                .unwrap_or(default.word_cloud_width),

            word_cloud_height: env::var("WORD_CLOUD_HEIGHT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|h| *h > 0)
                .unwrap_or(default.word_cloud_height),

            word_cloud_max_words: env::var("WORD_CLOUD_MAX_WORDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.word_cloud_max_words),

            word_cloud_background: env::var("WORD_CLOUD_BACKGROUND")
                .unwrap_or(default.word_cloud_background),

            temp_dir: env::var("UPLOAD_TEMP_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),

            max_documents: env::var("MAX_DOCUMENTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(default.max_documents),

            host: env::var("HOST").unwrap_or(default.host),
        }
    }

    /// Config for local runs and tests: small limits, loopback only
    pub fn development() -> Self {
        Self {
            max_file_size: 1024 * 1024,
            max_documents: 8,
            host: "127.0.0.1".to_string(),
            ..Self::default()
        }
    }

    /// Directory the intake writes temporary files into
    pub fn upload_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(env::temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.max_file_size, 10 * 1024 * 1024);
        assert!(config.word_cloud_enabled);
        assert_eq!(config.word_cloud_width, 800);
        assert_eq!(config.word_cloud_height, 400);
        assert_eq!(config.word_cloud_max_words, 200);
        assert_eq!(config.word_cloud_background, "white");
    }

    #[test]
    fn test_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.max_file_size, 1024 * 1024);
        assert_eq!(config.host, "127.0.0.1");
        assert!(config.word_cloud_enabled);
    }

    #[test]
    fn test_upload_dir_falls_back_to_system_temp() {
        let config = AppConfig::default();
        assert_eq!(config.upload_dir(), env::temp_dir());

        let config = AppConfig {
            temp_dir: Some(PathBuf::from("/var/tmp/uploads")),
            ..AppConfig::default()
        };
        assert_eq!(config.upload_dir(), PathBuf::from("/var/tmp/uploads"));
    }
}
