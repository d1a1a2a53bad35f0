//! Rendering options and configuration.

use super::JsonFormat;

/// Options for rendering a reconstructed layout.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Report title line
    pub title: String,

    /// Width of the `=` banner under the title and at the end
    pub banner_width: usize,

    /// Width of the `-` divider under each region label
    pub divider_width: usize,

    /// Minimum table column width in chars
    pub min_column_width: usize,

    /// Prefix region labels with an icon
    pub icons: bool,

    /// Escape special Markdown characters in cell and paragraph text
    pub escape_special_chars: bool,

    /// JSON output format
    pub json_format: JsonFormat,

    /// Collect extraction statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the report title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the banner width.
    pub fn with_banner_width(mut self, width: usize) -> Self {
        self.banner_width = width;
        self
    }

    /// Set the divider width.
    pub fn with_divider_width(mut self, width: usize) -> Self {
        self.divider_width = width;
        self
    }

    /// Set the minimum table column width.
    pub fn with_min_column_width(mut self, width: usize) -> Self {
        self.min_column_width = width;
        self
    }

    /// Enable or disable region icons.
    pub fn with_icons(mut self, icons: bool) -> Self {
        self.icons = icons;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Set the JSON format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "ORGANIZED TEXT OUTPUT".to_string(),
            banner_width: 60,
            divider_width: 40,
            min_column_width: 8,
            icons: true,
            escape_special_chars: true,
            json_format: JsonFormat::Pretty,
            collect_stats: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_title("SCAN")
            .with_banner_width(20)
            .with_icons(false)
            .with_json_format(JsonFormat::Compact);

        assert_eq!(options.title, "SCAN");
        assert_eq!(options.banner_width, 20);
        assert_eq!(options.divider_width, 40);
        assert_eq!(options.min_column_width, 8);
        assert!(!options.icons);
        assert_eq!(options.json_format, JsonFormat::Compact);
    }
}
