use crate::topic::sentiment::SentimentCategory;

/// Our custom color representation for easy manipulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl AppColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` for SVG/CSS output.
    pub fn to_hex(self) -> String {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b))
    }

    /// Create a darker version (for hover/outline strokes).
    pub fn darken(self, amount: f32) -> Self {
        Self {
            r: (self.r - amount).max(0.0),
            g: (self.g - amount).max(0.0),
            b: (self.b - amount).max(0.0),
        }
    }
}

/// Palette per sentiment tier, tuned for a light background.
pub fn category_color(category: SentimentCategory) -> AppColor {
    match category {
        SentimentCategory::Positive => hsv_to_rgb(130.0 / 360.0, 0.70, 0.62),
        SentimentCategory::Neutral => hsv_to_rgb(220.0 / 360.0, 0.10, 0.45),
        SentimentCategory::Negative => hsv_to_rgb(0.0, 0.78, 0.80),
    }
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> AppColor {
    let h6 = (h * 6.0).rem_euclid(6.0);
    let i = h6.floor() as i32;
    let f = h6 - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match i {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    AppColor { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_formatting() {
        assert_eq!(AppColor::new(1.0, 0.0, 0.5).to_hex(), "#ff0080");
        assert_eq!(AppColor::new(2.0, -1.0, 0.0).to_hex(), "#ff0000");
    }

    #[test]
    fn negative_is_red_dominant() {
        let c = category_color(SentimentCategory::Negative);
        assert!(c.r > c.g && c.r > c.b);
        let c = category_color(SentimentCategory::Positive);
        assert!(c.g > c.r && c.g > c.b);
    }
}
