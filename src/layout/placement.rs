use std::f32::consts::FRAC_1_SQRT_2;

use super::{Extent, LayoutConfig, Placement, Point, ProbeStrategy, Rect};
use crate::topic::arena::TopicId;

/// East, then clockwise on screen (y down).
const COMPASS: [(f32, f32); 8] = [
    (1.0, 0.0),
    (FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    (0.0, 1.0),
    (-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    (-1.0, 0.0),
    (-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    (0.0, -1.0),
    (FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
];

/// Finds a collision-free spot for each word, growing outward from a center.
///
/// The engine owns the set of rectangles placed so far. `place_all` starts
/// from an empty set, and a placed rectangle is never moved again.
///
/// Termination: once the probe radius exceeds the extent of everything placed
/// plus the word's own size, the first probe direction (east) is clear, so
/// the search ends for finite input. `max_rings` only guards against
/// non-finite sizes; when it trips, the probe with the least overlap wins.
pub struct PlacementEngine<'a> {
    config: &'a LayoutConfig,
    probes: Probes,
    placed: Vec<Rect>,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self {
            config,
            probes: Probes::new(config),
            placed: Vec::new(),
        }
    }

    /// Forget every committed rectangle.
    pub fn clear(&mut self) {
        self.placed.clear();
    }

    pub fn is_overlapping(&self, rect: &Rect) -> bool {
        self.placed.iter().any(|p| p.overlaps(rect))
    }

    fn overlap_area(&self, rect: &Rect) -> f32 {
        self.placed.iter().map(|p| p.overlap_area(rect)).sum()
    }

    /// Find a position for one word and commit it.
    pub fn place(&mut self, center: Point, extent: Extent) -> Rect {
        let start = Rect::centered_at(center, extent);
        let rect = if self.is_overlapping(&start) {
            self.search(start)
        } else {
            start
        };
        self.placed.push(rect);
        rect
    }

    fn search(&self, start: Rect) -> Rect {
        let mut move_amount = 0.0f32;
        let mut best: Option<(f32, Rect)> = None;

        for ring in 1..=self.config.max_rings {
            move_amount += self.config.generation_speed;

            let mut k = 0;
            while let Some((ux, uy)) = self.probes.direction(k) {
                k += 1;
                let candidate = start.offset(ux * move_amount, uy * move_amount);
                if !self.is_overlapping(&candidate) {
                    if ring > 1000 {
                        tracing::debug!("Placement needed {} rings (radius {:.0}px)", ring, move_amount);
                    }
                    return candidate;
                }

                let area = self.overlap_area(&candidate);
                if best.map_or(true, |(a, _)| area < a) {
                    best = Some((area, candidate));
                }
            }
        }

        let (area, rect) = best.unwrap_or((0.0, start));
        tracing::warn!(
            "No free position within {} rings, using least overlap ({:.1}px²) at ({:.1}, {:.1})",
            self.config.max_rings,
            area,
            rect.x,
            rect.y
        );
        rect
    }

    /// Place `items` (already in descending volume order) from scratch.
    pub fn place_all(&mut self, items: &[(TopicId, Extent)], center: Point) -> Vec<Placement> {
        self.place_all_observed(items, center, |_, _| {})
    }

    /// Like [`place_all`](Self::place_all), calling `observer` with the
    /// committed rectangles right before each item's search begins.
    pub fn place_all_observed(
        &mut self,
        items: &[(TopicId, Extent)],
        center: Point,
        mut observer: impl FnMut(TopicId, &[Rect]),
    ) -> Vec<Placement> {
        self.clear();
        let mut out = Vec::with_capacity(items.len());

        for &(topic, extent) in items {
            observer(topic, &self.placed);
            let rect = self.place(center, extent);
            out.push(Placement { topic, rect });
        }

        tracing::debug!(
            "Placed {} words around ({:.1}, {:.1})",
            out.len(),
            center.x,
            center.y
        );
        out
    }
}

/// Probe order on every ring. Directions are computed as they are needed,
/// so a tiny rotation step costs time but no memory.
#[derive(Debug, Clone, Copy)]
enum Probes {
    Compass,
    /// Degrees between probes, starting east
    Sweep(f64),
}

impl Probes {
    fn new(config: &LayoutConfig) -> Self {
        match config.probe {
            ProbeStrategy::Compass => Probes::Compass,
            ProbeStrategy::AngularSweep => Probes::Sweep(config.rotation_step as f64),
        }
    }

    /// Unit vector of the `k`-th probe, `None` once the ring is exhausted.
    fn direction(self, k: u64) -> Option<(f32, f32)> {
        match self {
            Probes::Compass => COMPASS.get(k as usize).copied(),
            Probes::Sweep(step) => {
                if !(step > 0.0) || !step.is_finite() {
                    return (k == 0).then_some((1.0, 0.0));
                }
                let degrees = k as f64 * step;
                if degrees >= 360.0 {
                    return None;
                }
                let rads = degrees.to_radians();
                Some((rads.cos() as f32, rads.sin() as f32))
            }
        }
    }

    #[cfg(test)]
    fn count(self) -> u64 {
        let mut k = 0;
        while self.direction(k).is_some() {
            k += 1;
        }
        k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_disjoint(rects: &[Rect]) {
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert_eq!(a.overlap_area(b), 0.0, "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn first_word_sits_on_center() {
        let config = LayoutConfig::default();
        let mut engine = PlacementEngine::new(&config);
        let r = engine.place(Point::new(100.0, 100.0), Extent::new(40.0, 20.0));
        assert_eq!((r.x, r.y), (80.0, 90.0));
    }

    #[test]
    fn second_word_moves_out_by_at_least_one_ring() {
        let config = LayoutConfig {
            generation_speed: 10.0,
            ..LayoutConfig::default()
        };
        let mut engine = PlacementEngine::new(&config);
        let items = [(TopicId(0), Extent::new(40.0, 20.0)), (TopicId(1), Extent::new(40.0, 20.0))];
        let out = engine.place_all(&items, Point::new(100.0, 100.0));

        assert_eq!((out[0].rect.x, out[0].rect.y), (80.0, 90.0));
        let b = out[1].rect;
        let dist = ((b.x - 80.0).powi(2) + (b.y - 90.0).powi(2)).sqrt();
        assert!(dist >= 10.0 - 1e-3);
        assert!(!out[0].rect.overlaps(&b));
    }

    #[test]
    fn compass_probes_east_first() {
        let config = LayoutConfig {
            generation_speed: 50.0,
            probe: ProbeStrategy::Compass,
            ..LayoutConfig::default()
        };
        let mut engine = PlacementEngine::new(&config);
        engine.place(Point::new(0.0, 0.0), Extent::new(40.0, 20.0));
        let r = engine.place(Point::new(0.0, 0.0), Extent::new(40.0, 20.0));
        assert_eq!((r.x, r.y), (30.0, -10.0));
    }

    #[test]
    fn sweep_has_one_direction_per_step() {
        let config = LayoutConfig {
            rotation_step: 20.0,
            ..LayoutConfig::default()
        };
        assert_eq!(Probes::new(&config).count(), 18);
        let config = LayoutConfig {
            rotation_step: 7.0,
            ..LayoutConfig::default()
        };
        // 0, 7, ..., 357
        assert_eq!(Probes::new(&config).count(), 52);
        let config = LayoutConfig {
            probe: ProbeStrategy::Compass,
            ..LayoutConfig::default()
        };
        assert_eq!(Probes::new(&config).count(), 8);
    }

    #[test]
    fn tiny_rotation_step_is_computed_lazily() {
        let config = LayoutConfig {
            rotation_step: 1e-6,
            ..LayoutConfig::default()
        };
        let probes = Probes::new(&config);
        assert_eq!(probes.direction(0), Some((1.0, 0.0)));
        assert!(probes.direction(1).is_some());
        assert!(probes.direction(400_000_000).is_none());

        let mut engine = PlacementEngine::new(&config);
        let r = engine.place(Point::new(10.0, 10.0), Extent::new(4.0, 2.0));
        assert_eq!((r.x, r.y), (8.0, 9.0));
    }

    #[test]
    fn dense_cloud_has_no_overlaps() {
        let config = LayoutConfig::default();
        let mut engine = PlacementEngine::new(&config);
        let items: Vec<(TopicId, Extent)> = (0..60)
            .map(|i| (TopicId(i), Extent::new(20.0 + (i % 7) as f32 * 9.0, 10.0 + (i % 3) as f32 * 6.0)))
            .collect();
        let out = engine.place_all(&items, Point::new(400.0, 300.0));
        let rects: Vec<Rect> = out.iter().map(|p| p.rect).collect();
        assert_disjoint(&rects);
    }

    #[test]
    fn earlier_words_are_committed_before_later_searches() {
        let config = LayoutConfig::default();
        let mut engine = PlacementEngine::new(&config);
        let items = [(TopicId(7), Extent::new(30.0, 10.0)), (TopicId(3), Extent::new(30.0, 10.0))];
        let mut seen = Vec::new();
        engine.place_all_observed(&items, Point::default(), |topic, placed| {
            seen.push((topic, placed.len()));
        });
        assert_eq!(seen, vec![(TopicId(7), 0), (TopicId(3), 1)]);
    }

    #[test]
    fn ring_cap_falls_back_to_least_overlap() {
        let config = LayoutConfig {
            max_rings: 1,
            generation_speed: 1.0,
            ..LayoutConfig::default()
        };
        let mut engine = PlacementEngine::new(&config);
        engine.place(Point::default(), Extent::new(100.0, 100.0));
        let r = engine.place(Point::default(), Extent::new(10.0, 10.0));
        // Every probe overlaps; the result is still one of the ring-1 probes.
        let dist = ((r.x + 5.0).powi(2) + (r.y + 5.0).powi(2)).sqrt();
        assert!((dist - 1.0).abs() < 1e-3);
    }

    #[test]
    fn identical_runs_are_identical() {
        let config = LayoutConfig::default();
        let items: Vec<(TopicId, Extent)> = (0..25)
            .map(|i| (TopicId(i), Extent::new(15.0 + i as f32, 12.0)))
            .collect();
        let a = PlacementEngine::new(&config).place_all(&items, Point::new(50.0, 50.0));
        let b = PlacementEngine::new(&config).place_all(&items, Point::new(50.0, 50.0));
        assert_eq!(a, b);
    }
}
