use serde::{Deserialize, Serialize};

use crate::params::preset::Preset;

/// Documented range and default of one numeric control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamRange {
    /// Inclusive lower bound.
    pub min: f32,
    /// Inclusive upper bound.
    pub max: f32,
    /// Value used on reset and when input is not finite.
    pub default: f32,
}

impl ParamRange {
    const fn new(min: f32, max: f32, default: f32) -> Self {
        Self { min, max, default }
    }

    /// Clamp `v` into the range; non-finite input yields the default.
    pub fn clamp(&self, v: f32) -> f32 {
        if v.is_finite() {
            v.clamp(self.min, self.max)
        } else {
            self.default
        }
    }
}

/// One adjustable control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Param {
    /// Percent of neutral (100). Values above 200 become linear gain in the tonal pass.
    Brightness,
    /// Percent, linear remap around mid-gray.
    Contrast,
    /// Percent, blend toward/away from luminance.
    Saturation,
    /// Degrees of hue rotation.
    Hue,
    /// Photographic stops.
    Exposure,
    /// Percent of highlight burn.
    Burn,
    /// Fraction of full-scale luminance grain.
    Noise,
    /// Posterization levels per channel; 0 and 1 disable it.
    Posterize,
}

impl Param {
    /// Every control, in display order.
    pub const ALL: [Param; 8] = [
        Param::Brightness,
        Param::Contrast,
        Param::Saturation,
        Param::Hue,
        Param::Exposure,
        Param::Burn,
        Param::Noise,
        Param::Posterize,
    ];

    /// Range and default of this control.
    pub fn range(self) -> ParamRange {
        match self {
            Param::Brightness => ParamRange::new(50.0, 400.0, 120.0),
            Param::Contrast => ParamRange::new(50.0, 250.0, 120.0),
            Param::Saturation => ParamRange::new(0.0, 300.0, 140.0),
            Param::Hue => ParamRange::new(-180.0, 180.0, 0.0),
            Param::Exposure => ParamRange::new(-2.0, 2.0, 0.0),
            Param::Burn => ParamRange::new(0.0, 100.0, 35.0),
            Param::Noise => ParamRange::new(0.0, 1.0, 0.08),
            Param::Posterize => ParamRange::new(0.0, 8.0, 0.0),
        }
    }

    /// Lowercase identifier, as used in JSON and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Param::Brightness => "brightness",
            Param::Contrast => "contrast",
            Param::Saturation => "saturation",
            Param::Hue => "hue",
            Param::Exposure => "exposure",
            Param::Burn => "burn",
            Param::Noise => "noise",
            Param::Posterize => "posterize",
        }
    }
}

/// Current value of every control plus the active preset.
///
/// Fields are private so the range invariant holds: every setter clamps, and deserialization goes
/// through the same clamping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "ParameterSetRepr")]
pub struct ParameterSet {
    brightness: f32,
    contrast: f32,
    saturation: f32,
    hue: f32,
    exposure: f32,
    burn: f32,
    noise: f32,
    posterize: u8,
    preset: Preset,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            brightness: Param::Brightness.range().default,
            contrast: Param::Contrast.range().default,
            saturation: Param::Saturation.range().default,
            hue: Param::Hue.range().default,
            exposure: Param::Exposure.range().default,
            burn: Param::Burn.range().default,
            noise: Param::Noise.range().default,
            posterize: 0,
            preset: Preset::None,
        }
    }
}

impl ParameterSet {
    /// All numeric controls at their neutral/identity value, no preset.
    ///
    /// Brightness/contrast/saturation at 100 %, everything else off.
    pub fn neutral() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
            hue: 0.0,
            exposure: 0.0,
            burn: 0.0,
            noise: 0.0,
            posterize: 0,
            preset: Preset::None,
        }
    }

    /// Brightness, percent.
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Contrast, percent.
    pub fn contrast(&self) -> f32 {
        self.contrast
    }

    /// Saturation, percent.
    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    /// Hue rotation, degrees.
    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Exposure, EV.
    pub fn exposure(&self) -> f32 {
        self.exposure
    }

    /// Burn, percent.
    pub fn burn(&self) -> f32 {
        self.burn
    }

    /// Noise amount, 0..=1.
    pub fn noise(&self) -> f32 {
        self.noise
    }

    /// Posterization levels.
    pub fn posterize(&self) -> u8 {
        self.posterize
    }

    /// Active preset.
    pub fn preset(&self) -> Preset {
        self.preset
    }

    /// Burn as a 0..=1 amount.
    pub fn burn_amount(&self) -> f32 {
        (self.burn / 100.0).clamp(0.0, 1.0)
    }

    /// Read one control as a float.
    pub fn get(&self, param: Param) -> f32 {
        match param {
            Param::Brightness => self.brightness,
            Param::Contrast => self.contrast,
            Param::Saturation => self.saturation,
            Param::Hue => self.hue,
            Param::Exposure => self.exposure,
            Param::Burn => self.burn,
            Param::Noise => self.noise,
            Param::Posterize => f32::from(self.posterize),
        }
    }

    /// Set one control, clamped into its range. The active preset is kept.
    pub fn set(&mut self, param: Param, value: f32) {
        let v = param.range().clamp(value);
        match param {
            Param::Brightness => self.brightness = v,
            Param::Contrast => self.contrast = v,
            Param::Saturation => self.saturation = v,
            Param::Hue => self.hue = v,
            Param::Exposure => self.exposure = v,
            Param::Burn => self.burn = v,
            Param::Noise => self.noise = v,
            Param::Posterize => self.posterize = v.round() as u8,
        }
    }

    /// Builder-style [`ParameterSet::set`].
    pub fn with(mut self, param: Param, value: f32) -> Self {
        self.set(param, value);
        self
    }

    /// Overwrite every numeric control with `preset`'s bundle and make it active.
    pub fn apply_preset(&mut self, preset: Preset) {
        let b = preset.bundle();
        *self = Self {
            brightness: b.brightness,
            contrast: b.contrast,
            saturation: b.saturation,
            hue: b.hue,
            exposure: b.exposure,
            burn: b.burn,
            noise: b.noise,
            posterize: b.posterize,
            preset,
        };
    }

    /// A fresh set holding `preset`'s bundle.
    pub fn from_preset(preset: Preset) -> Self {
        let mut p = Self::default();
        p.apply_preset(preset);
        p
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct ParameterSetRepr {
    brightness: f32,
    contrast: f32,
    saturation: f32,
    hue: f32,
    exposure: f32,
    burn: f32,
    noise: f32,
    posterize: f32,
    preset: Preset,
}

impl Default for ParameterSetRepr {
    fn default() -> Self {
        let d = ParameterSet::default();
        Self {
            brightness: d.brightness,
            contrast: d.contrast,
            saturation: d.saturation,
            hue: d.hue,
            exposure: d.exposure,
            burn: d.burn,
            noise: d.noise,
            posterize: f32::from(d.posterize),
            preset: d.preset,
        }
    }
}

impl From<ParameterSetRepr> for ParameterSet {
    fn from(r: ParameterSetRepr) -> Self {
        let mut p = ParameterSet {
            preset: r.preset,
            ..ParameterSet::default()
        };
        p.set(Param::Brightness, r.brightness);
        p.set(Param::Contrast, r.contrast);
        p.set(Param::Saturation, r.saturation);
        p.set(Param::Hue, r.hue);
        p.set(Param::Exposure, r.exposure);
        p.set(Param::Burn, r.burn);
        p.set(Param::Noise, r.noise);
        p.set(Param::Posterize, r.posterize);
        p
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/model.rs"]
mod tests;
