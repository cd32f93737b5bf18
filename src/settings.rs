use std::ops::RangeInclusive;

/// Allowed speed multiplier range.
pub const SPEED_RANGE: RangeInclusive<f32> = 0.5..=3.0;
/// Allowed pet scale range.
pub const SCALE_RANGE: RangeInclusive<f32> = 0.5..=2.0;
/// Allowed opacity range.
pub const OPACITY_RANGE: RangeInclusive<f32> = 0.2..=1.0;

/// Quick speed presets. Cycled from the host's menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedPreset {
    Calm,
    Normal,
    Hyper,
}

impl SpeedPreset {
    pub fn label(self) -> &'static str {
        match self {
            SpeedPreset::Calm => "Calm",
            SpeedPreset::Normal => "Normal",
            SpeedPreset::Hyper => "Hyper",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SpeedPreset::Calm => SpeedPreset::Normal,
            SpeedPreset::Normal => SpeedPreset::Hyper,
            SpeedPreset::Hyper => SpeedPreset::Calm,
        }
    }

    fn speed(self) -> f32 {
        match self {
            SpeedPreset::Calm => 0.5,
            SpeedPreset::Normal => 1.0,
            SpeedPreset::Hyper => 2.5,
        }
    }
}

/// User-facing multipliers. The engine only reads these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetSettings {
    speed: f32,
    scale: f32,
    opacity: f32,
}

impl Default for PetSettings {
    fn default() -> Self {
        Self {
            speed: 1.0,
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_nan() {
        return *range.start();
    }
    value.clamp(*range.start(), *range.end())
}

impl PetSettings {
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Returns true if the stored value changed.
    pub fn set_speed(&mut self, speed: f32) -> bool {
        let speed = clamp_to(speed, &SPEED_RANGE);
        let changed = speed != self.speed;
        self.speed = speed;
        changed
    }

    /// Returns true if the stored value changed. Callers resize pet boxes on change.
    pub fn set_scale(&mut self, scale: f32) -> bool {
        let scale = clamp_to(scale, &SCALE_RANGE);
        let changed = scale != self.scale;
        self.scale = scale;
        changed
    }

    pub fn set_opacity(&mut self, opacity: f32) -> bool {
        let opacity = clamp_to(opacity, &OPACITY_RANGE);
        let changed = opacity != self.opacity;
        self.opacity = opacity;
        changed
    }

    pub fn apply_preset(&mut self, preset: SpeedPreset) {
        self.set_speed(preset.speed());
    }
}
