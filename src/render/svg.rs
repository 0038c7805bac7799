use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use compact_str::CompactString;

use super::colors::category_color;
use super::text::TextMeasure;
use super::{Surface, Viewport};
use crate::layout::{Extent, Rect};
use crate::topic::arena::Topic;
use crate::topic::sentiment::SentimentCategory;
use crate::ui::tooltip::TooltipInfo;

/// One materialized word.
#[derive(Debug, Clone)]
pub struct SvgWord {
    pub label: CompactString,
    pub category: SentimentCategory,
    pub size_class: usize,
    pub font_px: f32,
    pub tooltip: Vec<String>,
    pub extent: Extent,
    pub rect: Option<Rect>,
}

/// Surface that keeps words in memory and writes them out as an SVG document.
pub struct SvgSurface<M: TextMeasure> {
    measure: M,
    viewport: Viewport,
    text_size: f32,
    words: Vec<SvgWord>,
    by_id: HashMap<CompactString, usize>,
}

impl<M: TextMeasure> SvgSurface<M> {
    pub fn new(measure: M, viewport: Viewport) -> Self {
        Self {
            measure,
            viewport,
            text_size: 12.0,
            words: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    pub fn words(&self) -> &[SvgWord] {
        &self.words
    }

    pub fn word(&self, id: &str) -> Option<&SvgWord> {
        self.by_id.get(id).map(|&i| &self.words[i])
    }

    /// Render every positioned word. The canvas is the container box when it
    /// has one, else the window.
    pub fn to_svg(&self) -> String {
        let area = if self.viewport.container.w > 0.0 && self.viewport.container.h > 0.0 {
            self.viewport.container
        } else {
            self.viewport.window
        };

        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}" font-size="{}">"#,
            area.w, area.h, area.w, area.h, self.text_size
        );
        out.push_str("<style>\n");
        for category in [
            SentimentCategory::Positive,
            SentimentCategory::Neutral,
            SentimentCategory::Negative,
        ] {
            let color = category_color(category);
            let _ = writeln!(
                out,
                ".cloudWord.{} {{ fill: {}; }} .cloudWord.{}:hover {{ fill: {}; }}",
                category.class_name(),
                color.to_hex(),
                category.class_name(),
                color.darken(0.15).to_hex()
            );
        }
        out.push_str("</style>\n");

        for word in &self.words {
            let Some(rect) = word.rect else {
                continue;
            };
            let _ = writeln!(
                out,
                r#"<text class="cloudWord {}" x="{:.2}" y="{:.2}" font-size="{:.2}" dominant-baseline="text-before-edge"><title>{}</title>{}</text>"#,
                word.category.class_name(),
                rect.x,
                rect.y,
                word.font_px,
                escape(&word.tooltip.join("\n")),
                escape(&word.label)
            );
        }

        out.push_str("</svg>\n");
        out
    }

    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_svg())
    }
}

impl<M: TextMeasure> Surface for SvgSurface<M> {
    fn is_blank(&self) -> bool {
        self.words.is_empty()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_text_size(&mut self, px: f32) {
        self.text_size = px;
    }

    fn materialize(&mut self, topic: &Topic, tooltip: &TooltipInfo) -> Extent {
        let size_class = topic.size_class.unwrap_or(1);
        let font_px = self.text_size * size_class as f32;
        let extent = self.measure.measure(&topic.label, font_px);

        let word = SvgWord {
            label: topic.label.clone(),
            category: topic.category.unwrap_or(SentimentCategory::Neutral),
            size_class,
            font_px,
            tooltip: tooltip.lines().iter().map(|s| s.to_string()).collect(),
            extent,
            rect: None,
        };

        match self.by_id.get(&topic.id) {
            Some(&i) => self.words[i] = word,
            None => {
                self.by_id.insert(topic.id.clone(), self.words.len());
                self.words.push(word);
            }
        }
        extent
    }

    fn position(&mut self, topic: &Topic, rect: Rect) {
        match self.by_id.get(&topic.id) {
            Some(&i) => self.words[i].rect = Some(rect),
            None => tracing::warn!("Positioning unknown word '{}'", topic.id),
        }
    }

    fn clear(&mut self) {
        self.words.clear();
        self.by_id.clear();
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
