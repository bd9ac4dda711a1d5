use anyhow::{Result, anyhow};
use std::path::Path;

/// Upload extensions the analyzer accepts
pub const ALLOWED_EXTENSIONS: &[&str] = &["txt"];

/// How many leading bytes are inspected for binary content
const SNIFF_LEN: usize = 512;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates file size against maximum limit
pub fn validate_file_size(size: usize, max_size: usize) -> Result<()> {
    if size > max_size {
        return Err(anyhow!(ValidationError {
            code: "FILE_TOO_LARGE",
            message: format!(
                "File size {} bytes exceeds maximum allowed {} bytes",
                size, max_size
            ),
        }));
    }
    Ok(())
}

/// Sanitizes filename to prevent path traversal and injection attacks
/// Returns the sanitized filename or an error if the name is invalid
pub fn sanitize_filename(filename: &str) -> Result<String> {
    // Browsers on Windows may send the full client path
    let name = filename.rsplit(['/', '\\']).next().unwrap_or("");
    let name = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    if name.is_empty() {
        return Err(anyhow!(ValidationError {
            code: "INVALID_FILENAME",
            message: "Filename cannot be empty".to_string(),
        }));
    }

    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        tracing::warn!("Path components stripped from upload name: {}", filename);
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            c if c.is_control() => '_',
            ':' | '*' | '?' | '"' | '<' | '>' | '|' | ';' => '_',
            c => c,
        })
        .collect();

    // Limit length safely for UTF-8
    let sanitized = if sanitized.len() > 255 {
        let mut end = 255;
        while !sanitized.is_char_boundary(end) {
            end -= 1;
        }
        sanitized[..end].to_string()
    } else {
        sanitized
    };

    if sanitized.starts_with('.') {
        return Err(anyhow!(ValidationError {
            code: "HIDDEN_FILE",
            message: "Hidden files (starting with '.') are not allowed".to_string(),
        }));
    }

    Ok(sanitized)
}

/// Only plain text uploads are analyzed
pub fn validate_extension(filename: &str) -> Result<()> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(anyhow!(ValidationError {
            code: "INVALID_EXTENSION",
            message: format!(
                "'{}' is not a supported file. Upload a .txt file.",
                filename
            ),
        })),
    }
}

/// Rejects binary payloads that were renamed to .txt and text that is not UTF-8
pub fn verify_text_content(data: &[u8]) -> Result<()> {
    if let Some(kind) = infer::get(data) {
        if kind.matcher_type() != infer::MatcherType::Text {
            return Err(anyhow!(ValidationError {
                code: "BINARY_AS_TEXT",
                message: format!("File looks like {} rather than text", kind.mime_type()),
            }));
        }
    }

    if data.iter().take(SNIFF_LEN).any(|&b| b == 0) {
        return Err(anyhow!(ValidationError {
            code: "BINARY_AS_TEXT",
            message: "File claimed as text but contains binary content".to_string(),
        }));
    }

    if let Err(e) = std::str::from_utf8(data) {
        return Err(anyhow!(ValidationError {
            code: "INVALID_ENCODING",
            message: format!(
                "File is not UTF-8 encoded text (invalid byte at offset {})",
                e.valid_up_to()
            ),
        }));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_size_limit() {
        assert!(validate_file_size(10, 10).is_ok());
        let err = validate_file_size(11, 10).unwrap_err();
        assert!(err.to_string().contains("FILE_TOO_LARGE"));
    }

    #[test]
    fn test_sanitize_strips_paths() {
        assert_eq!(sanitize_filename("calls.txt").unwrap(), "calls.txt");
        assert_eq!(sanitize_filename("../../etc/calls.txt").unwrap(), "calls.txt");
        assert_eq!(
            sanitize_filename("C:\\Users\\agent\\calls.txt").unwrap(),
            "calls.txt"
        );
        assert_eq!(sanitize_filename("a<b>|c.txt").unwrap(), "a_b__c.txt");
    }

    #[test]
    fn test_sanitize_rejects_empty_and_hidden() {
        assert!(sanitize_filename("").is_err());
        assert!(sanitize_filename("dir/").is_err());
        assert!(sanitize_filename(".env").is_err());
    }

    #[test]
    fn test_extension_filter() {
        assert!(validate_extension("calls.txt").is_ok());
        assert!(validate_extension("CALLS.TXT").is_ok());
        assert!(validate_extension("calls.csv").is_err());
        assert!(validate_extension("calls").is_err());
        assert!(validate_extension("calls.txt.exe").is_err());
    }

    #[test]
    fn test_text_content() {
        assert!(verify_text_content(b"Customer: hello, my order is late").is_ok());
        assert!(verify_text_content(b"").is_ok());
        assert!(verify_text_content(b"abc\0def").is_err());
        // PNG signature
        assert!(verify_text_content(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]).is_err());
    }

    #[test]
    fn test_text_content_must_be_utf8() {
        assert!(verify_text_content("\u{feff}Agent: olá, obrigado".as_bytes()).is_ok());

        let err = verify_text_content(b"hi\xc3\x28!").unwrap_err();
        assert!(err.to_string().contains("INVALID_ENCODING"));
        assert!(err.to_string().contains("offset 2"));

        // Latin-1 encoded "café"
        let err = verify_text_content(b"caf\xe9").unwrap_err();
        assert!(err.to_string().contains("INVALID_ENCODING"));
    }
}
