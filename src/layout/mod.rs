pub mod buckets;
pub mod placement;

use crate::topic::arena::{TopicId, TopicSet};

pub use self::placement::PlacementEngine;

/// A point in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Measured pixel size of a word.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub w: f32,
    pub h: f32,
}

impl Extent {
    pub const fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }
}

/// Axis-aligned rectangle, (x, y) is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Rectangle of the given size whose center sits on `center`.
    pub fn centered_at(center: Point, extent: Extent) -> Self {
        Self {
            x: center.x - extent.w / 2.0,
            y: center.y - extent.h / 2.0,
            w: extent.w,
            h: extent.h,
        }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Closed-interval intersection test: rectangles that only share an edge
    /// still count as overlapping.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(other.x > self.x + self.w
            || other.x + other.w < self.x
            || other.y > self.y + self.h
            || other.y + other.h < self.y)
    }

    /// Area of the intersection (0 when disjoint or only touching).
    pub fn overlap_area(&self, other: &Rect) -> f32 {
        let w = (self.x + self.w).min(other.x + other.w) - self.x.max(other.x);
        let h = (self.y + self.h).min(other.y + other.h) - self.y.max(other.y);
        w.max(0.0) * h.max(0.0)
    }
}

/// Order in which candidate positions are probed on each ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeStrategy {
    /// Sweep from 0° up to 360° in `rotation_step` increments.
    #[default]
    AngularSweep,
    /// The 8 compass directions at 45° steps, starting east and turning
    /// clockwise in screen coordinates (y grows downward).
    Compass,
}

/// Configuration for the placement search.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Pixels added to the probe radius per ring (larger = faster, gappier)
    pub generation_speed: f32,
    /// Degrees between probes on a ring (AngularSweep only)
    pub rotation_step: f32,
    pub probe: ProbeStrategy,
    /// Rings searched before falling back to the least-overlapping probe
    pub max_rings: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            generation_speed: 10.0,
            rotation_step: 20.0,
            probe: ProbeStrategy::AngularSweep,
            max_rings: 100_000,
        }
    }
}

/// One positioned word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub topic: TopicId,
    pub rect: Rect,
}

/// Result of a full placement pass.
#[derive(Debug, Default)]
pub struct Layout {
    /// Placements in commit order (descending volume)
    pub placements: Vec<Placement>,
}

impl Layout {
    /// Bounding box of every placed word.
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.placements.first()?.rect;
        let (mut x1, mut y1) = (first.x, first.y);
        let (mut x2, mut y2) = (first.x + first.w, first.y + first.h);
        for p in &self.placements[1..] {
            x1 = x1.min(p.rect.x);
            y1 = y1.min(p.rect.y);
            x2 = x2.max(p.rect.x + p.rect.w);
            y2 = y2.max(p.rect.y + p.rect.h);
        }
        Some(Rect {
            x: x1,
            y: y1,
            w: x2 - x1,
            h: y2 - y1,
        })
    }
}

/// Place every topic of the set around `center`, most popular first.
///
/// Every topic is expected to carry an extent already; one that does not is
/// placed as a zero-size rectangle.
pub fn compute_layout(topics: &TopicSet, center: Point, config: &LayoutConfig) -> Layout {
    let order: Vec<(TopicId, Extent)> = topics
        .ids_by_volume()
        .into_iter()
        .map(|id| {
            let extent = topics.get(id).extent.unwrap_or_else(|| {
                tracing::debug!("Topic '{}' has no extent, placing as a point", topics.get(id).id);
                Extent::default()
            });
            (id, extent)
        })
        .collect();

    let mut engine = PlacementEngine::new(config);
    Layout {
        placements: engine.place_all(&order, center),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_count_as_overlap() {
        let a = Rect { x: 0.0, y: 0.0, w: 10.0, h: 10.0 };
        let b = Rect { x: 10.0, y: 0.0, w: 10.0, h: 10.0 };
        let c = Rect { x: 10.5, y: 0.0, w: 10.0, h: 10.0 };
        assert!(a.overlaps(&b));
        assert_eq!(a.overlap_area(&b), 0.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn centered_rect_puts_origin_half_size_away() {
        let r = Rect::centered_at(Point::new(100.0, 100.0), Extent::new(40.0, 20.0));
        assert_eq!(r.origin(), Point::new(80.0, 90.0));
    }

    #[test]
    fn bounds_cover_all_placements() {
        let layout = Layout {
            placements: vec![
                Placement { topic: TopicId(0), rect: Rect { x: 0.0, y: 0.0, w: 10.0, h: 10.0 } },
                Placement { topic: TopicId(1), rect: Rect { x: -5.0, y: 20.0, w: 2.0, h: 3.0 } },
            ],
        };
        let b = layout.bounds().unwrap();
        assert_eq!((b.x, b.y, b.w, b.h), (-5.0, 0.0, 15.0, 23.0));
        assert!(Layout::default().bounds().is_none());
    }
}
