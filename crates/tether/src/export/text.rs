//! Label measurement backed by cosmic-text.
//!
//! The renderer needs label widths to keep labels inside the panel. A single
//! [`FontSystem`] is shared across all measurements since loading the system
//! font database is expensive.

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;

/// Average glyph advance relative to the font size, used when shaping yields nothing.
const FALLBACK_ADVANCE: f32 = 0.55;

static TEXT_MEASURER: OnceLock<TextMeasurer> = OnceLock::new();

/// Returns the rendered width in pixels of `text` set in `font_family` at `font_size` px.
pub(super) fn measure_width(text: &str, font_family: &str, font_size: f64) -> f64 {
    TEXT_MEASURER
        .get_or_init(TextMeasurer::new)
        .width(text, font_family, font_size as f32)
        .into()
}

struct TextMeasurer {
    font_system: Mutex<FontSystem>,
}

impl TextMeasurer {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    fn width(&self, text: &str, font_family: &str, font_size: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }

        let fallback = text.chars().count() as f32 * font_size * FALLBACK_ADVANCE;
        let Ok(mut font_system) = self.font_system.lock() else {
            return fallback;
        };

        let metrics = Metrics::new(font_size, font_size * 1.15);
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(font_family));
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let width = buffer
            .layout_runs()
            .filter_map(|run| run.glyphs.last().map(|glyph| glyph.x + glyph.w))
            .fold(None, |acc: Option<f32>, w| Some(acc.map_or(w, |acc| acc.max(w))));

        width.unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_label_has_no_width() {
        assert_eq!(measure_width("", "Arial", 8.0), 0.0);
    }

    #[test]
    fn test_width_is_finite_and_non_negative() {
        let width = measure_width("Nkhata Bay", "Arial", 8.0);
        assert!(width.is_finite());
        assert!(width >= 0.0);
    }
}
