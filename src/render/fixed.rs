use std::collections::HashMap;

use compact_str::CompactString;

use super::{Surface, Viewport};
use crate::layout::{Extent, Rect};
use crate::topic::arena::Topic;
use crate::ui::tooltip::TooltipInfo;

/// Surface that reports a preset size for every word and records positions.
///
/// With `scale_by_class` the preset size is multiplied by the word's size
/// class, mimicking a font-size multiplier without measuring text.
#[derive(Debug, Default)]
pub struct FixedSurface {
    pub extent: Extent,
    pub scale_by_class: bool,
    pub viewport: Viewport,
    pub text_size: f32,
    /// How many times `materialize` was called
    pub materialized: usize,
    pub positions: HashMap<CompactString, Rect>,
}

impl FixedSurface {
    pub fn new(extent: Extent, viewport: Viewport) -> Self {
        Self {
            extent,
            viewport,
            ..Self::default()
        }
    }

    pub fn scaled(mut self) -> Self {
        self.scale_by_class = true;
        self
    }
}

impl Surface for FixedSurface {
    fn is_blank(&self) -> bool {
        self.materialized == 0
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_text_size(&mut self, px: f32) {
        self.text_size = px;
    }

    fn materialize(&mut self, topic: &Topic, _tooltip: &TooltipInfo) -> Extent {
        self.materialized += 1;
        if self.scale_by_class {
            let k = topic.size_class.unwrap_or(1) as f32;
            Extent::new(self.extent.w * k, self.extent.h * k)
        } else {
            self.extent
        }
    }

    fn position(&mut self, topic: &Topic, rect: Rect) {
        self.positions.insert(topic.id.clone(), rect);
    }

    fn clear(&mut self) {
        self.positions.clear();
    }
}
