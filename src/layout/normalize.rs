//! Token normalization: text cleanup and confidence filtering.

use unicode_normalization::UnicodeNormalization;

use super::LayoutOptions;
use crate::model::{BoundingBox, NormalizeStats, Token};
use crate::ocr::OcrOutput;

/// Collapse whitespace runs to a single space and trim both ends.
///
/// Idempotent: `clean_text(&clean_text(s)) == clean_text(s)`.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turn raw OCR arrays into cleaned, confident tokens.
///
/// A token is kept when its confidence is strictly above
/// `options.confidence_threshold` and its cleaned text is not empty.
/// Arrays of unequal length are read up to the shortest.
pub fn normalize_tokens(output: &OcrOutput, options: &LayoutOptions) -> (Vec<Token>, NormalizeStats) {
    if !output.is_consistent() {
        log::warn!(
            "OCR arrays differ in length (texts: {}, boxes: {}, scores: {}); reading the first {}",
            output.texts.len(),
            output.boxes.len(),
            output
                .scores
                .as_ref()
                .map_or_else(|| "-".to_string(), |s| s.len().to_string()),
            output.len()
        );
    }

    let mut stats = NormalizeStats::default();
    let mut tokens = Vec::with_capacity(output.len());

    for entry in output.entries() {
        stats.seen += 1;

        if entry.score <= options.confidence_threshold {
            stats.low_confidence += 1;
            continue;
        }

        let text = if options.normalize_unicode {
            clean_text(&entry.text.nfc().collect::<String>())
        } else {
            clean_text(entry.text)
        };
        if text.is_empty() {
            stats.empty_text += 1;
            continue;
        }

        let [x_min, y_min, x_max, y_max] = entry.rect;
        tokens.push(Token::new(
            text,
            BoundingBox::from_rect(x_min, y_min, x_max, y_max),
            entry.score,
        ));
    }

    stats.kept = tokens.len();
    log::debug!(
        "normalize: kept {} of {} tokens ({} low confidence, {} empty)",
        stats.kept,
        stats.seen,
        stats.low_confidence,
        stats.empty_text
    );

    (tokens, stats)
}
