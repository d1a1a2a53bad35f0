//! Rendering module for turning reconstructed layouts into output formats.

mod json;
mod markdown;
mod options;
mod report;
mod result;
mod table;
mod text;

pub use json::{extraction_to_json, to_json, JsonFormat};
pub use markdown::{to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use options::RenderOptions;
pub use report::{document_report, to_report, NO_TEXT_DETECTED};
pub use result::{ExtractionStats, RenderResult};
pub use table::format_table;
pub use text::to_text;
