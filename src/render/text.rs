use fontdue::{Font, FontSettings};
use std::path::{Path, PathBuf};

use crate::error::{CloudError, Result};
use crate::layout::Extent;

/// Measures the pixel box of a label at a given font size.
pub trait TextMeasure {
    fn measure(&mut self, text: &str, font_px: f32) -> Extent;
}

/// Exact metrics from a loaded font.
pub struct FontMeasure {
    font: Font,
}

impl FontMeasure {
    pub fn new(font: Font) -> Self {
        Self { font }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .map_err(|e| CloudError::Font(format!("{}: {}", path.display(), e)))?;
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| CloudError::Font(format!("{}: {}", path.display(), e)))?;
        tracing::info!("Loaded text font from {}", path.display());
        Ok(Self { font })
    }

    /// Try the usual system font locations.
    pub fn load_system_font() -> Result<Self> {
        let mut candidates: Vec<PathBuf> = Vec::new();

        if let Ok(windir) = std::env::var("WINDIR") {
            candidates.push(PathBuf::from(format!("{windir}\\Fonts\\segoeui.ttf")));
            candidates.push(PathBuf::from(format!("{windir}\\Fonts\\arial.ttf")));
        }

        candidates.push(PathBuf::from("C:\\Windows\\Fonts\\segoeui.ttf"));
        candidates.push(PathBuf::from("C:\\Windows\\Fonts\\arial.ttf"));
        candidates.push(PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"));
        candidates.push(PathBuf::from("/usr/share/fonts/TTF/DejaVuSans.ttf"));
        candidates.push(PathBuf::from("/usr/share/fonts/dejavu/DejaVuSans.ttf"));
        candidates.push(PathBuf::from("/System/Library/Fonts/Supplemental/Arial.ttf"));
        candidates.push(PathBuf::from("/Library/Fonts/Arial.ttf"));

        for path in candidates {
            let Ok(font_data) = std::fs::read(&path) else {
                continue;
            };
            if let Ok(font) = Font::from_bytes(font_data, FontSettings::default()) {
                tracing::info!("Loaded text font from {}", path.display());
                return Ok(Self { font });
            }
        }

        Err(CloudError::Font(
            "unable to load a system font from known locations".into(),
        ))
    }
}

impl TextMeasure for FontMeasure {
    fn measure(&mut self, text: &str, font_px: f32) -> Extent {
        let width: f32 = text
            .chars()
            .map(|c| self.font.metrics(c, font_px).advance_width)
            .sum();
        let height = self
            .font
            .horizontal_line_metrics(font_px)
            .map(|m| m.new_line_size)
            .unwrap_or(font_px * 1.2);
        Extent::new(width.ceil(), height.ceil())
    }
}

/// Font-free approximation: every character advances `advance` em,
/// lines are `line_height` em tall.
#[derive(Debug, Clone, Copy)]
pub struct EstimateMeasure {
    pub advance: f32,
    pub line_height: f32,
}

impl Default for EstimateMeasure {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.2,
        }
    }
}

impl TextMeasure for EstimateMeasure {
    fn measure(&mut self, text: &str, font_px: f32) -> Extent {
        let chars = text.chars().count() as f32;
        Extent::new(chars * font_px * self.advance, font_px * self.line_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_scales_with_length_and_size() {
        let mut m = EstimateMeasure::default();
        let small = m.measure("abcde", 10.0);
        let large = m.measure("abcde", 20.0);
        assert!((small.w - 30.0).abs() < 1e-3);
        assert!((small.h - 12.0).abs() < 1e-3);
        assert!((large.w - 2.0 * small.w).abs() < 1e-3);
        assert_eq!(m.measure("", 20.0).w, 0.0);
    }

    #[test]
    fn missing_font_file_is_an_error() {
        let err = FontMeasure::from_path(Path::new("/nonexistent/font.ttf"))
            .err()
            .expect("should fail");
        assert!(matches!(err, CloudError::Font(_)));
    }
}
