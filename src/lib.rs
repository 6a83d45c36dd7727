// Library exports for multiplot

pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod figure;
pub mod lexer;
pub mod literal;
pub mod render;
pub mod series;
pub mod style;
pub mod trace;

pub use data::{ColumnSource, Dataset};
pub use error::{BuildError, DataError};
pub use figure::{Figure, Labels, Scatter};
pub use series::SeriesSpec;
pub use style::{Slot, StyleArg, StyleArgs};
pub use trace::build;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum OutputFormat {
    #[serde(rename = "png")]
    #[default]
    Png,
    #[serde(rename = "svg")]
    Svg,
    #[serde(rename = "json")]
    Json,
}

impl OutputFormat {
    /// Guess the format from an output file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "svg" => Some(OutputFormat::Svg),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RenderOptions {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default, rename = "type")]
    pub format: OutputFormat,
}

fn default_width() -> u32 { 800 }
fn default_height() -> u32 { 600 }

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            format: OutputFormat::Png,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_defaults() {
        let opts: RenderOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, RenderOptions::default());
    }

    #[test]
    fn test_render_options_type() {
        let opts: RenderOptions = serde_json::from_str(r#"{"type": "svg", "width": 400}"#).unwrap();
        assert_eq!(opts.format, OutputFormat::Svg);
        assert_eq!(opts.width, 400);
        assert_eq!(opts.height, 600);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_extension("SVG"), Some(OutputFormat::Svg));
        assert_eq!(OutputFormat::from_extension("gif"), None);
    }
}
