use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::effects::overlay::Overlay;
use crate::foundation::error::FryError;

/// Named look. Selecting one overwrites every numeric control and picks a fixed overlay stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Defaults, no preset overlays.
    #[default]
    None,
    /// Muted film stock with a corner light leak.
    Film,
    /// Crunchy, saturated, posterized.
    Lofi,
    /// Tape look: scanlines and fringing.
    Vhs,
    /// Everything turned up.
    Ultra,
}

/// Numeric values a preset writes into a [`crate::ParameterSet`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PresetBundle {
    /// Brightness, percent.
    pub brightness: f32,
    /// Contrast, percent.
    pub contrast: f32,
    /// Saturation, percent.
    pub saturation: f32,
    /// Hue rotation, degrees.
    pub hue: f32,
    /// Exposure, EV.
    pub exposure: f32,
    /// Burn, percent.
    pub burn: f32,
    /// Noise amount.
    pub noise: f32,
    /// Posterization levels.
    pub posterize: u8,
}

const FILM_OVERLAYS: &[Overlay] = &[
    Overlay::Vignette { strength: 0.45 },
    Overlay::FilmBurn { energy: 0.6 },
    Overlay::Scanlines { opacity: 0.06 },
];

const LOFI_OVERLAYS: &[Overlay] = &[
    Overlay::Vignette { strength: 0.6 },
    Overlay::ChromaticAberration,
];

const VHS_OVERLAYS: &[Overlay] = &[
    Overlay::Scanlines { opacity: 0.18 },
    Overlay::ChromaticAberration,
    Overlay::Vignette { strength: 0.3 },
];

const ULTRA_OVERLAYS: &[Overlay] = &[
    Overlay::FilmBurn { energy: 1.0 },
    Overlay::ChromaticAberration,
    Overlay::WarmEdgeBurn { strength: 0.5 },
    Overlay::Vignette { strength: 0.5 },
];

impl Preset {
    /// Every preset.
    pub const ALL: [Preset; 5] = [
        Preset::None,
        Preset::Film,
        Preset::Lofi,
        Preset::Vhs,
        Preset::Ultra,
    ];

    /// Lowercase identifier.
    pub fn name(self) -> &'static str {
        match self {
            Preset::None => "none",
            Preset::Film => "film",
            Preset::Lofi => "lofi",
            Preset::Vhs => "vhs",
            Preset::Ultra => "ultra",
        }
    }

    /// The numeric bundle this preset applies.
    pub fn bundle(self) -> PresetBundle {
        match self {
            Preset::None => PresetBundle {
                brightness: 120.0,
                contrast: 120.0,
                saturation: 140.0,
                hue: 0.0,
                exposure: 0.0,
                burn: 35.0,
                noise: 0.08,
                posterize: 0,
            },
            Preset::Film => PresetBundle {
                brightness: 110.0,
                contrast: 115.0,
                saturation: 90.0,
                hue: 0.0,
                exposure: 0.1,
                burn: 25.0,
                noise: 0.12,
                posterize: 0,
            },
            Preset::Lofi => PresetBundle {
                brightness: 130.0,
                contrast: 140.0,
                saturation: 160.0,
                hue: -8.0,
                exposure: 0.3,
                burn: 45.0,
                noise: 0.18,
                posterize: 6,
            },
            Preset::Vhs => PresetBundle {
                brightness: 115.0,
                contrast: 125.0,
                saturation: 170.0,
                hue: 12.0,
                exposure: 0.0,
                burn: 30.0,
                noise: 0.22,
                posterize: 0,
            },
            Preset::Ultra => PresetBundle {
                brightness: 260.0,
                contrast: 220.0,
                saturation: 280.0,
                hue: 20.0,
                exposure: 1.2,
                burn: 90.0,
                noise: 0.35,
                posterize: 4,
            },
        }
    }

    /// Overlays this preset composites, in order, before any burn-driven overlays.
    pub fn overlays(self) -> &'static [Overlay] {
        match self {
            Preset::None => &[],
            Preset::Film => FILM_OVERLAYS,
            Preset::Lofi => LOFI_OVERLAYS,
            Preset::Vhs => VHS_OVERLAYS,
            Preset::Ultra => ULTRA_OVERLAYS,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = FryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| FryError::validation(format!("unknown preset '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/preset.rs"]
mod tests;
