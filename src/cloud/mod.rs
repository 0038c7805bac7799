pub mod config;
pub mod debounce;

use std::time::Instant;

use serde_json::Value;

pub use self::config::{CloudConfig, Setting};
use self::debounce::Debouncer;
use crate::error::{CloudError, Result};
use crate::layout::{self, buckets, Extent, Layout, Point, ProbeStrategy};
use crate::render::Surface;
use crate::schema::{self, Schema};
use crate::source::{self, DataSource, Loaded};
use crate::topic::{self, arena::TopicSet};
use crate::ui::i18n::Catalog;
use crate::ui::tooltip;

/// Cloud lifecycle phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudPhase {
    /// No data yet (a remote fetch did not deliver)
    AwaitingData,
    /// Topics are laid out
    Ready,
}

/// Deferred work keyed for coalescing. Applied in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Task {
    Set(Setting),
    Resize,
}

/// Owns the topics of one cloud and keeps their layout current.
///
/// Every layout pass recomputes all positions from scratch; only measured
/// extents are carried over between passes.
pub struct Cloud<S: Surface> {
    phase: CloudPhase,
    config: CloudConfig,
    surface: S,
    catalog: Catalog,
    schema: Schema,
    topics: TopicSet,
    buckets: Vec<f64>,
    center: Point,
    layout: Option<Layout>,
    rejected: Vec<usize>,
    pending: Debouncer<Task, f64>,
}

impl<S: Surface> Cloud<S> {
    /// Create a cloud on `surface` with the built-in strings.
    pub fn new(config: CloudConfig, data: DataSource, surface: S) -> Result<Self> {
        Self::with_catalog(config, data, surface, Catalog::builtin())
    }

    pub fn with_catalog(
        config: CloudConfig,
        data: DataSource,
        surface: S,
        catalog: Catalog,
    ) -> Result<Self> {
        config.validate()?;
        if !surface.is_blank() {
            return Err(CloudError::Configuration("target should be empty".into()));
        }

        let schema = Schema::topic().with_nested_check(config.nested_check);
        let pending = Debouncer::new(config.debounce);
        let mut cloud = Self {
            phase: CloudPhase::AwaitingData,
            config,
            surface,
            catalog,
            schema,
            topics: TopicSet::new(),
            buckets: Vec::new(),
            center: Point::default(),
            layout: None,
            rejected: Vec::new(),
            pending,
        };

        match source::load(data)? {
            Loaded::Ready(root) => cloud.load_value(root)?,
            Loaded::Unavailable => {
                tracing::warn!("No data received, cloud stays empty until data arrives");
            }
        }
        Ok(cloud)
    }

    /// Replace the cloud's data with a new root and lay it out.
    pub fn load_value(&mut self, root: Value) -> Result<()> {
        let center = self.surface.viewport().center();

        let items = topic::topics_array(&root)?;
        let ignore_bad = self.config.ignore_bad_items;
        let validation = schema::validate(items, &self.schema, ignore_bad)?;
        for index in &validation.rejected {
            tracing::warn!("Item {} does not conform to schema, ignoring", index);
        }
        let rejected = validation.rejected.clone();
        let topics = topic::build_topics(validation, ignore_bad)?;

        // Decoded; the old collection and its words go now.
        self.surface.clear();
        self.center = center;
        self.rejected = rejected;
        self.topics = topics;
        self.layout = None;
        self.surface.set_text_size(self.config.text_size);
        self.buckets = buckets::compute_buckets(&self.topics.volumes(), self.config.size_count);
        topic::annotate(&mut self.topics, &self.buckets);

        tracing::info!(
            "Cloud initialised: {} topics, {} rejected, {} size buckets, center ({:.0}, {:.0})",
            self.topics.len(),
            self.rejected.len(),
            self.buckets.len(),
            self.center.x,
            self.center.y
        );

        self.relayout()?;
        self.phase = CloudPhase::Ready;
        Ok(())
    }

    /// Late data arrival (e.g. a fetch completed elsewhere). Failures are
    /// logged, not returned; the result says whether the cloud is ready.
    pub fn data_received(&mut self, raw: &str) -> bool {
        let root: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!("Received data is not valid JSON: {}", e);
                return false;
            }
        };
        match self.load_value(root) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("{}", e);
                false
            }
        }
    }

    /// Measure whatever lacks an extent, then place every topic from scratch.
    pub fn relayout(&mut self) -> Result<()> {
        let order = self.topics.ids_by_volume();

        let mut measured = 0;
        for &id in &order {
            let topic = self.topics.get(id);
            if topic.extent.is_some() {
                continue;
            }
            let info = tooltip::build_tooltip(topic, &self.catalog, &self.config.language)?;
            let extent = sanitize(self.surface.materialize(topic, &info), &topic.id);
            self.topics.get_mut(id).extent = Some(extent);
            measured += 1;
        }

        let computed = layout::compute_layout(&self.topics, self.center, &self.config.layout);
        for p in &computed.placements {
            let topic = self.topics.get_mut(p.topic);
            topic.position = Some(p.rect.origin());
            self.surface.position(self.topics.get(p.topic), p.rect);
        }

        tracing::info!(
            "Layout computed: {} words placed ({} measured)",
            computed.placements.len(),
            measured
        );
        self.layout = Some(computed);
        Ok(())
    }

    /// Apply a setting now. Rejects bad values before touching any state.
    pub fn set(&mut self, setting: Setting, value: f64) -> Result<()> {
        let value = setting.check(value)?;
        setting.apply(&mut self.config, value);
        tracing::debug!("{} set to {}", setting.name(), value);

        if self.phase != CloudPhase::Ready {
            return Ok(());
        }

        match setting {
            Setting::SizeCount => {
                self.buckets =
                    buckets::compute_buckets(&self.topics.volumes(), self.config.size_count);
                let changed = topic::annotate(&mut self.topics, &self.buckets);
                tracing::debug!("{} topics changed size class", changed);
            }
            Setting::TextSize => {
                self.surface.set_text_size(self.config.text_size);
                for t in self.topics.iter_mut() {
                    t.extent = None;
                }
            }
            Setting::GenerationSpeed | Setting::RotationStep => {}
        }
        self.relayout()
    }

    pub fn set_size_count(&mut self, count: usize) -> Result<()> {
        self.set(Setting::SizeCount, count as f64)
    }

    pub fn set_generation_speed(&mut self, speed: f32) -> Result<()> {
        self.set(Setting::GenerationSpeed, speed as f64)
    }

    pub fn set_rotation_step(&mut self, step: f32) -> Result<()> {
        self.set(Setting::RotationStep, step as f64)
    }

    pub fn set_text_size(&mut self, px: f32) -> Result<()> {
        self.set(Setting::TextSize, px as f64)
    }

    pub fn set_probe_strategy(&mut self, probe: ProbeStrategy) -> Result<()> {
        self.config.layout.probe = probe;
        if self.phase == CloudPhase::Ready {
            self.relayout()?;
        }
        Ok(())
    }

    /// Re-center on the surface's current viewport and lay out again.
    pub fn resize(&mut self) -> Result<()> {
        self.center = self.surface.viewport().center();
        tracing::debug!("Resized, new center ({:.0}, {:.0})", self.center.x, self.center.y);
        if self.phase == CloudPhase::Ready {
            self.relayout()?;
        }
        Ok(())
    }

    /// Debounced [`set`](Self::set). The value is checked immediately; a newer
    /// request for the same setting within the window replaces this one.
    pub fn request(&mut self, setting: Setting, value: f64, now: Instant) -> Result<()> {
        let value = setting.check(value)?;
        self.pending.schedule(Task::Set(setting), value, now);
        Ok(())
    }

    /// Debounced [`resize`](Self::resize).
    pub fn request_resize(&mut self, now: Instant) {
        self.pending.schedule(Task::Resize, 0.0, now);
    }

    /// Apply every request whose window has elapsed. Returns how many ran.
    pub fn poll(&mut self, now: Instant) -> Result<usize> {
        let due = self.pending.due(now);
        self.run(due)
    }

    /// Apply every pending request regardless of its window.
    pub fn flush(&mut self) -> Result<usize> {
        let all = self.pending.drain();
        self.run(all)
    }

    /// Earliest time at which `poll` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.next_deadline()
    }

    fn run(&mut self, tasks: Vec<(Task, f64)>) -> Result<usize> {
        let n = tasks.len();
        for (task, value) in tasks {
            match task {
                Task::Set(setting) => self.set(setting, value)?,
                Task::Resize => self.resize()?,
            }
        }
        Ok(n)
    }

    pub fn phase(&self) -> CloudPhase {
        self.phase
    }

    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    pub fn topics(&self) -> &TopicSet {
        &self.topics
    }

    /// Current size buckets, ascending.
    pub fn buckets(&self) -> &[f64] {
        &self.buckets
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Input indices skipped by validation in the last load.
    pub fn rejected(&self) -> &[usize] {
        &self.rejected
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

/// Surfaces may report garbage for unrenderable text; clamp to a usable box.
fn sanitize(extent: Extent, id: &str) -> Extent {
    let fix = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    let clean = Extent::new(fix(extent.w), fix(extent.h));
    if clean != extent {
        tracing::warn!("Surface reported unusable size {:?} for '{}'", extent, id);
    }
    clean
}
