use std::time::Duration;

use crate::error::{CloudError, Result};
use crate::layout::LayoutConfig;
use crate::schema::NestedCheck;

/// Everything a cloud is configured with.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudConfig {
    pub layout: LayoutConfig,
    /// Maximum number of distinct word sizes
    pub size_count: usize,
    /// Base font size in px; size class `n` is drawn at `n` times this
    pub text_size: f32,
    /// Skip nonconforming items instead of failing
    pub ignore_bad_items: bool,
    pub language: String,
    /// Coalescing window for requested changes
    pub debounce: Duration,
    pub nested_check: NestedCheck,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            size_count: 6,
            text_size: 12.0,
            ignore_bad_items: false,
            language: "en".to_string(),
            debounce: Duration::from_millis(250),
            nested_check: NestedCheck::Full,
        }
    }
}

impl CloudConfig {
    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            (Setting::SizeCount, self.size_count as f64),
            (Setting::GenerationSpeed, self.layout.generation_speed as f64),
            (Setting::RotationStep, self.layout.rotation_step as f64),
            (Setting::TextSize, self.text_size as f64),
        ];
        for (setting, value) in checks {
            setting
                .check(value)
                .map_err(|e| CloudError::Configuration(e.to_string()))?;
        }
        if self.layout.max_rings == 0 {
            return Err(CloudError::Configuration("max_rings must be at least 1".into()));
        }
        Ok(())
    }
}

/// A runtime-adjustable numeric setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Setting {
    SizeCount,
    GenerationSpeed,
    RotationStep,
    TextSize,
}

impl Setting {
    pub const ALL: [Setting; 4] = [
        Setting::SizeCount,
        Setting::GenerationSpeed,
        Setting::RotationStep,
        Setting::TextSize,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Setting::SizeCount => "sizeCount",
            Setting::GenerationSpeed => "generationSpeed",
            Setting::RotationStep => "rotationStep",
            Setting::TextSize => "textSize",
        }
    }

    /// Accepts camelCase, snake_case and kebab-case names.
    pub fn from_name(name: &str) -> Option<Setting> {
        let folded: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Setting::ALL
            .into_iter()
            .find(|s| s.name().to_ascii_lowercase() == folded)
    }

    /// Parse a textual value; non-numeric text is rejected.
    pub fn parse(self, text: &str) -> Result<f64> {
        let value: f64 = text.trim().parse().map_err(|_| self.invalid(text))?;
        self.check(value)
    }

    /// Validate a value and normalize it. Size count and generation speed
    /// are whole numbers; fractions are truncated before the range check.
    pub fn check(self, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(self.invalid(value));
        }
        let normalized = match self {
            Setting::SizeCount | Setting::GenerationSpeed => value.trunc(),
            Setting::RotationStep | Setting::TextSize => value,
        };
        let ok = match self {
            Setting::SizeCount => normalized >= 1.0,
            // Stored as f32; the value must survive the cast.
            Setting::GenerationSpeed | Setting::RotationStep | Setting::TextSize => {
                let stored = normalized as f32;
                stored > 0.0 && stored.is_finite()
            }
        };
        if ok {
            Ok(normalized)
        } else {
            Err(self.invalid(value))
        }
    }

    /// Store an already-checked value.
    pub fn apply(self, config: &mut CloudConfig, value: f64) {
        match self {
            Setting::SizeCount => config.size_count = value as usize,
            Setting::GenerationSpeed => config.layout.generation_speed = value as f32,
            Setting::RotationStep => config.layout.rotation_step = value as f32,
            Setting::TextSize => config.text_size = value as f32,
        }
    }

    fn invalid(self, value: impl ToString) -> CloudError {
        CloudError::InvalidArgument {
            setting: self.name(),
            value: value.to_string(),
        }
    }
}
