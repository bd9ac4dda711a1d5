//! Server-rendered HTML for the upload and results pages, and the plain text
//! report printed by the `analyze` command.

use crate::models::{AnalysisReport, UploadedDocument};
use crate::utils::text::escape_markup;
use std::fmt::Write;
use std::path::Path;

/// Width of the text progress bar, in characters
pub const PROGRESS_WIDTH: usize = 30;

const TITLE: &str = "Call Sentiment Analysis App";

const ABOUT: &str = "This app analyzes the sentiment of call history text documents. \
Upload a text file containing call chat history to get sentiment analysis.";

const STYLE: &str = "body{font-family:sans-serif;max-width:860px;margin:2rem auto;padding:0 1rem;color:#262730}\
.error{background:#ffebee;color:#b71c1c;padding:.75rem 1rem;border-radius:.5rem}\
.notice{color:#555}\
progress{width:100%;height:1rem}\
button{padding:.4rem 1rem}";

/// What a page shows. Everything is optional; the index is the empty view.
#[derive(Default)]
pub struct PageView<'a> {
    pub document: Option<&'a UploadedDocument>,
    pub report: Option<&'a AnalysisReport>,
    pub error: Option<String>,
}

pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>{TITLE}</title><style>{STYLE}</style></head><body>"
    );
    let _ = write!(html, "<h1>{TITLE}</h1>");
    let _ = write!(
        html,
        "<details><summary>About this app</summary><p>{ABOUT}</p></details>"
    );

    html.push_str(
        "<form method=\"post\" action=\"/upload\" enctype=\"multipart/form-data\">\
         <label for=\"file\">Upload Call History Text File</label><br>\
         <input type=\"file\" id=\"file\" name=\"file\" accept=\".txt,text/plain\" required> \
         <button type=\"submit\">Upload</button></form>",
    );

    if let Some(error) = &view.error {
        let _ = write!(
            html,
            "<p class=\"error\" role=\"alert\">{}</p>",
            escape_markup(error)
        );
    }

    if let Some(document) = view.document {
        let _ = write!(
            html,
            "<p>{} ({} bytes)</p><form method=\"post\" action=\"/documents/{}/analyze\">\
             <button type=\"submit\">Analyze Sentiment</button></form>",
            escape_markup(&document.filename),
            document.size(),
            document.id
        );
    }

    if let Some(report) = view.report {
        render_report(&mut html, report);
    }

    html.push_str("</body></html>");
    html
}

fn render_report(html: &mut String, report: &AnalysisReport) {
    let _ = write!(
        html,
        "<section id=\"results\"><h2>Sentiment Analysis Results</h2>\
         <p>Overall Sentiment: {}</p><p>Sentiment Score: {}</p>\
         <progress value=\"{:.4}\" max=\"1\">{:.0}%</progress>",
        report.sentiment.label,
        report.score_display(),
        report.progress,
        report.progress * 100.0
    );

    match (&report.word_cloud, &report.notice) {
        (Some(image), _) => {
            let _ = write!(html, "<figure>{}</figure>", image.svg);
        }
        (None, Some(notice)) => {
            let _ = write!(html, "<p class=\"notice\">{}</p>", escape_markup(notice));
        }
        (None, None) => {}
    }

    html.push_str("</section>");
}

/// `[#####-----] 50%` for a progress value in [0.0, 1.0]
pub fn progress_bar(progress: f64, width: usize) -> String {
    let progress = progress.clamp(0.0, 1.0);
    let filled = ((progress * width as f64).round() as usize).min(width);
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        progress * 100.0
    )
}

/// Terminal rendition of a report. `word_cloud_out` is where the SVG was saved.
pub fn render_text_report(report: &AnalysisReport, word_cloud_out: Option<&Path>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Sentiment Analysis Results ({})", report.filename);
    let _ = writeln!(out, "Overall Sentiment: {}", report.sentiment.label);
    let _ = writeln!(out, "Sentiment Score: {}", report.score_display());
    let _ = writeln!(out, "{}", progress_bar(report.progress, PROGRESS_WIDTH));

    match (&report.word_cloud, &report.notice, word_cloud_out) {
        (Some(_), _, Some(path)) => {
            let _ = writeln!(out, "Word cloud: {}", path.display());
        }
        (Some(image), _, None) => {
            let _ = writeln!(
                out,
                "Word cloud: {} words drawn (pass --word-cloud FILE.svg to save it)",
                image.words
            );
        }
        (None, Some(notice), _) => {
            let _ = writeln!(out, "{}", notice);
        }
        (None, None, _) => {}
    }

    out
}
