pub mod colors;
pub mod fixed;
pub mod svg;
pub mod text;

use crate::layout::{Extent, Point, Rect};
use crate::topic::arena::Topic;
use crate::ui::tooltip::TooltipInfo;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub w: f32,
    pub h: f32,
}

impl Size {
    pub const fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }
}

/// Usable area reported by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// The cloud's own container box (may be zero when unsized)
    pub container: Size,
    /// The whole window
    pub window: Size,
}

impl Viewport {
    /// Growth origin of the cloud: middle of the container when it has a
    /// non-zero box, otherwise middle of the window.
    pub fn center(&self) -> Point {
        let area = if self.container.w > 0.0 && self.container.h > 0.0 {
            self.container
        } else {
            self.window
        };
        Point::new(area.w / 2.0, area.h / 2.0)
    }
}

/// Whatever draws the cloud.
///
/// The controller hands it annotated topics to materialize, gets their
/// measured size back, and later tells it where each one goes.
pub trait Surface {
    /// Whether the surface holds nothing yet. A cloud refuses to take over
    /// a surface that already has content.
    fn is_blank(&self) -> bool;

    fn viewport(&self) -> Viewport;

    /// Base font unit in pixels; a word of size class `n` is drawn at `n` times this.
    fn set_text_size(&mut self, px: f32);

    /// Create (or refresh) the visual for `topic` and report its size.
    fn materialize(&mut self, topic: &Topic, tooltip: &TooltipInfo) -> Extent;

    /// Move a materialized word to `rect`.
    fn position(&mut self, topic: &Topic, rect: Rect);

    /// Drop every materialized word. Called when the cloud's data is replaced.
    fn clear(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_prefers_sized_container() {
        let vp = Viewport {
            container: Size::new(200.0, 100.0),
            window: Size::new(1920.0, 1080.0),
        };
        assert_eq!(vp.center(), Point::new(100.0, 50.0));
    }

    #[test]
    fn center_falls_back_to_window() {
        let vp = Viewport {
            container: Size::new(200.0, 0.0),
            window: Size::new(1920.0, 1080.0),
        };
        assert_eq!(vp.center(), Point::new(960.0, 540.0));
    }
}
