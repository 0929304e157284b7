use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use eligibility_processor::data::score::Eligibility;

// ---------------------------------------------------------------------------
// Color generation
// ---------------------------------------------------------------------------

/// Convert an HSL hue (degrees) at fixed saturation/lightness to `Color32`.
pub fn hue_color(hue: f32) -> Color32 {
    let hsl = Hsl::new(hue, 0.65, 0.5);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color mapping: eligibility → Color32
// ---------------------------------------------------------------------------

/// Colours used for eligible / not eligible rows and bars.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityColors {
    eligible: Color32,
    not_eligible: Color32,
}

impl Default for EligibilityColors {
    fn default() -> Self {
        Self {
            eligible: hue_color(130.0),
            not_eligible: hue_color(0.0),
        }
    }
}

impl EligibilityColors {
    pub fn color_for(&self, eligibility: Eligibility) -> Color32 {
        match eligibility {
            Eligibility::Eligible => self.eligible,
            Eligibility::NotEligible => self.not_eligible,
        }
    }
}
