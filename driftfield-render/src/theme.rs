// Driftfield color themes
//
// A theme names the three palette roles a surface needs: the background it
// clears to, the base color for the common particle population, and the
// accent color shared by the rarer particles and every link.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Move this color toward another by the given opacity.
    pub fn blend_toward(self, toward: Rgb, alpha: f32) -> Rgb {
        let alpha = alpha.clamp(0.0, 1.0);
        let lerp = |from: u8, to: u8| -> u8 {
            (f32::from(from) + (f32::from(to) - f32::from(from)) * alpha).round() as u8
        };
        Rgb {
            r: lerp(self.r, toward.r),
            g: lerp(self.g, toward.g),
            b: lerp(self.b, toward.b),
        }
    }
}

/// Palette roles for one surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub background: Rgb,
    pub base: Rgb,
    pub accent: Rgb,
}

/// Named theme presets selectable from the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
    /// Dark navy with teal accents
    Midnight,
    /// Warm charcoal with amber accents
    Ember,
    /// Deep blue with mint accents
    Aurora,
}

impl ThemeName {
    /// Parse from CLI string argument
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "midnight" => Some(ThemeName::Midnight),
            "ember" => Some(ThemeName::Ember),
            "aurora" => Some(ThemeName::Aurora),
            _ => None,
        }
    }

    /// The palette this name stands for.
    pub fn theme(&self) -> Theme {
        match self {
            ThemeName::Midnight => Theme {
                background: Rgb::new(13, 17, 23),
                base: Rgb::new(148, 163, 184),
                accent: Rgb::new(100, 255, 218),
            },
            ThemeName::Ember => Theme {
                background: Rgb::new(24, 16, 12),
                base: Rgb::new(191, 163, 138),
                accent: Rgb::new(255, 140, 66),
            },
            ThemeName::Aurora => Theme {
                background: Rgb::new(8, 14, 26),
                base: Rgb::new(125, 160, 220),
                accent: Rgb::new(120, 255, 160),
            },
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeName::Midnight => write!(f, "midnight"),
            ThemeName::Ember => write!(f, "ember"),
            ThemeName::Aurora => write!(f, "aurora"),
        }
    }
}
