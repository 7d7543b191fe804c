use crate::{
    temperature::convert,
    types::{ScalePreference, Visibility},
};

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    scale: ScalePreference,
    kelvin: f64,
    visibility: Visibility,
    led_on: Option<bool>,
}

impl SessionState {
    pub fn new(scale: ScalePreference) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }

    pub fn scale(&self) -> ScalePreference {
        self.scale
    }

    pub fn kelvin(&self) -> f64 {
        self.kelvin
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn led_on(&self) -> Option<bool> {
        self.led_on
    }

    // Returns the previous scale when the preference actually changed.
    pub fn set_scale(&mut self, scale: ScalePreference) -> Option<ScalePreference> {
        if self.scale == scale {
            return None;
        }
        let previous = self.scale;
        self.scale = scale;
        Some(previous)
    }

    pub fn record_temperature(&mut self, kelvin: f64) {
        self.kelvin = kelvin;
    }

    pub fn record_led(&mut self, on: bool) {
        self.led_on = Some(on);
    }

    pub fn display_temperature(&self) -> i64 {
        convert(self.kelvin, self.scale)
    }

    pub fn set_visibility(&mut self, visibility: Visibility) -> bool {
        let became_visible =
            self.visibility == Visibility::Hidden && visibility == Visibility::Visible;
        self.visibility = visibility;
        became_visible
    }
}
