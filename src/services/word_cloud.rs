use crate::config::AppConfig;
use crate::models::WordCloudImage;
use crate::utils::text::{escape_markup, is_stopword, is_word, tokenize};
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;

/// Weight of relative frequency vs. rank when sizing words
const RELATIVE_SCALING: f64 = 0.5;
const MIN_FONT_SIZE: f64 = 10.0;
/// Each retry for a word that does not fit shrinks it by this factor
const FONT_STEP: f64 = 0.85;
/// Average glyph advance as a fraction of font size
const GLYPH_WIDTH: f64 = 0.6;
const PADDING: f64 = 2.0;
const SPIRAL_STEP: f64 = 0.35;
const SPIRAL_GROWTH: f64 = 1.5;
const FONT_FAMILY: &str = "DejaVu Sans, Helvetica, Arial, sans-serif";

/// Viridis, dark to light
const PALETTE: &[&str] = &[
    "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
    "#b5de2b",
];

/// Optional capability that draws a word cloud for a text
pub trait WordCloudRenderer: Send + Sync {
    fn render(&self, text: &str) -> Result<WordCloudImage>;

    fn name(&self) -> &'static str;
}

/// Picks the renderer once at startup. `None` means the capability is off.
pub fn create_renderer(config: &AppConfig) -> Option<Arc<dyn WordCloudRenderer>> {
    if !config.word_cloud_enabled {
        return None;
    }
    Some(Arc::new(SvgWordCloud::from_config(config)))
}

/// Word counts scaled so the most frequent word is 1.0, most frequent first
pub fn word_frequencies(text: &str, max_words: usize) -> Vec<(String, f64)> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for token in tokenize(text) {
        if !is_word(&token) || is_stopword(&token) {
            continue;
        }
        let word = token.strip_suffix("'s").unwrap_or(&token);
        if word.chars().count() < 2 || word.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        *counts.entry(word.to_string()).or_insert(0) += 1;
    }

    let mut sorted: Vec<(String, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted.truncate(max_words);

    let Some(top) = sorted.first().map(|(_, count)| *count as f64) else {
        return Vec::new();
    };

    sorted
        .into_iter()
        .map(|(word, count)| (word, count as f64 / top))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl Rect {
    fn centered(cx: f64, cy: f64, w: f64, h: f64) -> Self {
        Self {
            x: cx - w / 2.0,
            y: cy - h / 2.0,
            w,
            h,
        }
    }

    fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    fn inside(&self, width: f64, height: f64) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.x + self.w <= width && self.y + self.h <= height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub font_size: f64,
    /// Centre of the word's box
    pub x: f64,
    pub y: f64,
    pub color: &'static str,
    bounds: Rect,
}

/// Deterministic SVG word cloud
pub struct SvgWordCloud {
    width: u32,
    height: u32,
    max_words: usize,
    background: String,
}

impl SvgWordCloud {
    pub fn new(width: u32, height: u32, max_words: usize, background: impl Into<String>) -> Self {
        Self {
            width,
            height,
            max_words,
            background: background.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.word_cloud_width,
            config.word_cloud_height,
            config.word_cloud_max_words,
            config.word_cloud_background.clone(),
        )
    }

    fn max_font_size(&self) -> f64 {
        (self.height as f64 / 4.0).max(MIN_FONT_SIZE)
    }

    fn box_for(word: &str, font_size: f64) -> (f64, f64) {
        let w = word.chars().count() as f64 * font_size * GLYPH_WIDTH + PADDING * 2.0;
        let h = font_size + PADDING * 2.0;
        (w, h)
    }

    /// Walks an Archimedean spiral out from the centre until the box fits
    fn find_spot(&self, w: f64, h: f64, placed: &[PlacedWord]) -> Option<Rect> {
        let (width, height) = (self.width as f64, self.height as f64);
        let (cx, cy) = (width / 2.0, height / 2.0);
        let aspect = width / height;
        let max_radius = width.max(height);

        let mut theta: f64 = 0.0;
        loop {
            let r = SPIRAL_GROWTH * theta;
            if r > max_radius {
                return None;
            }
            let rect = Rect::centered(cx + r * theta.cos() * aspect, cy + r * theta.sin(), w, h);
            if rect.inside(width, height) && !placed.iter().any(|p| p.bounds.intersects(&rect)) {
                return Some(rect);
            }
            theta += SPIRAL_STEP;
        }
    }

    /// Places words largest first; stops at the first word that cannot fit
    /// even at the minimum font size.
    pub fn layout(&self, frequencies: &[(String, f64)]) -> Vec<PlacedWord> {
        let max_font = self.max_font_size();
        let count = frequencies.len().max(1) as f64;
        let mut placed: Vec<PlacedWord> = Vec::with_capacity(frequencies.len());

        for (rank, (word, freq)) in frequencies.iter().enumerate() {
            let rank_weight = 1.0 - rank as f64 / count;
            let scale = RELATIVE_SCALING * freq + (1.0 - RELATIVE_SCALING) * rank_weight;
            let mut font_size = (max_font * scale).max(MIN_FONT_SIZE).round();

            let spot = loop {
                let (w, h) = Self::box_for(word, font_size);
                if let Some(rect) = self.find_spot(w, h, &placed) {
                    break Some(rect);
                }
                if font_size <= MIN_FONT_SIZE {
                    break None;
                }
                font_size = (font_size * FONT_STEP).floor().max(MIN_FONT_SIZE);
            };

            let Some(bounds) = spot else {
                tracing::debug!("Word cloud full after {} words", placed.len());
                break;
            };

            placed.push(PlacedWord {
                word: word.clone(),
                font_size,
                x: bounds.x + bounds.w / 2.0,
                y: bounds.y + bounds.h / 2.0,
                color: PALETTE[rank % PALETTE.len()],
                bounds,
            });
        }

        placed
    }

    fn to_svg(&self, words: &[PlacedWord]) -> String {
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-label="Word cloud">"#,
            w = self.width,
            h = self.height
        );
        let _ = write!(
            svg,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            escape_markup(&self.background)
        );
        for word in words {
            let _ = write!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" font-size="{}" fill="{}" font-family="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                word.x,
                word.y,
                word.font_size,
                word.color,
                FONT_FAMILY,
                escape_markup(&word.word)
            );
        }
        svg.push_str("</svg>");
        svg
    }
}

impl WordCloudRenderer for SvgWordCloud {
    fn render(&self, text: &str) -> Result<WordCloudImage> {
        let frequencies = word_frequencies(text, self.max_words);
        if frequencies.is_empty() {
            return Err(anyhow!("nothing to draw: the text has no countable words"));
        }

        let words = self.layout(&frequencies);
        Ok(WordCloudImage {
            width: self.width,
            height: self.height,
            svg: self.to_svg(&words),
            words: words.len(),
        })
    }

    fn name(&self) -> &'static str {
        "svg"
    }
}
