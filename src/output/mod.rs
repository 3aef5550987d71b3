//! Output encoders (SVG, PNG).

mod png_encoder;
mod svg;

pub use png_encoder::PngEncoder;
pub use svg::{SvgElement, SvgEncoder, TextAnchor};

use crate::error::{Error, Result};
use std::path::Path;

/// File format of a rendered figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Vector SVG.
    Svg,
    /// Raster PNG.
    Png,
}

impl OutputFormat {
    /// Pick the format from a file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for unknown or missing extensions.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_ascii_lowercase();
        match ext.as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// File extension without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("thrs_CLS.svg")).unwrap(), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_path(Path::new("out/thrs_WP.PNG")).unwrap(), OutputFormat::Png);
        assert!(OutputFormat::from_path(Path::new("thrs_WP.pdf")).is_err());
        assert!(OutputFormat::from_path(Path::new("thrs_WP")).is_err());
    }

    #[test]
    fn test_extension_round_trips_through_from_path() {
        for format in [OutputFormat::Svg, OutputFormat::Png] {
            let path = format!("thrs_CLS.{}", format.extension());
            assert_eq!(OutputFormat::from_path(Path::new(&path)).unwrap(), format);
        }
    }
}
