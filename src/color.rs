use eframe::egui::Color32;
use palette::{IntoColor, Lab, Mix, Srgb};

// ---------------------------------------------------------------------------
// Diverging colour map for the correlation heatmap
// ---------------------------------------------------------------------------

/// Blue → light grey → red, interpolated in Lab over `[-1, 1]`.
#[derive(Debug, Clone)]
pub struct CoolWarm {
    cold: Lab,
    neutral: Lab,
    warm: Lab,
    missing: Color32,
}

impl Default for CoolWarm {
    fn default() -> Self {
        Self {
            cold: srgb8(59, 76, 192).into_color(),
            neutral: srgb8(221, 221, 221).into_color(),
            warm: srgb8(180, 4, 38).into_color(),
            missing: Color32::from_gray(60),
        }
    }
}

fn srgb8(r: u8, g: u8, b: u8) -> Srgb {
    Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

impl CoolWarm {
    /// Colour for a correlation value. NaN maps to a dark grey.
    pub fn color_for(&self, value: f64) -> Color32 {
        if value.is_nan() {
            return self.missing;
        }
        let v = value.clamp(-1.0, 1.0) as f32;
        let lab = if v < 0.0 {
            self.neutral.mix(self.cold, -v)
        } else {
            self.neutral.mix(self.warm, v)
        };
        let rgb: Srgb = lab.into_color();
        Color32::from_rgb(
            (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
            (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
            (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
        )
    }

    /// Black or white, whichever reads better on `background`.
    pub fn text_color_on(background: Color32) -> Color32 {
        let [r, g, b, _] = background.to_array();
        let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
        if luma > 140.0 {
            Color32::BLACK
        } else {
            Color32::WHITE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ends_and_middle() {
        let cm = CoolWarm::default();
        let cold = cm.color_for(-1.0);
        let warm = cm.color_for(1.0);
        let mid = cm.color_for(0.0);

        assert!(cold.b() > cold.r());
        assert!(warm.r() > warm.b());
        assert!(mid.r().abs_diff(221) <= 1 && mid.b().abs_diff(221) <= 1);
    }

    #[test]
    fn out_of_range_is_clamped_and_nan_is_grey() {
        let cm = CoolWarm::default();
        assert_eq!(cm.color_for(3.0), cm.color_for(1.0));
        assert_eq!(cm.color_for(f64::NAN), Color32::from_gray(60));
    }

    #[test]
    fn text_contrast() {
        assert_eq!(CoolWarm::text_color_on(Color32::from_gray(230)), Color32::BLACK);
        assert_eq!(CoolWarm::text_color_on(Color32::from_rgb(59, 76, 192)), Color32::WHITE);
    }
}
