use std::f64::consts::PI;
use std::str::FromStr;

use crate::foundation::error::ComposerError;

/// Easing curves mapping linear progress in `[0, 1]` to eased progress.
///
/// Most curves stay inside `[0, 1]`; `OutElastic` overshoots and `Gravity` returns to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    OutBounce,
    OutElastic,
    /// Inverted parabola `4t(1 - t)`: 0 at both ends, 1 at the midpoint.
    Gravity,
}

impl Ease {
    pub const ALL: [Ease; 10] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::OutBounce,
        Ease::OutElastic,
        Ease::Gravity,
    ];

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::OutBounce => out_bounce(t),
            Self::OutElastic => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                2f64.powf(-10.0 * t) * ((t - 0.075) * (2.0 * PI) / 0.3).sin() + 1.0
            }
            Self::Gravity => 4.0 * t * (1.0 - t),
        }
    }

    /// Canonical lookup name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InQuad => "ease_in_quad",
            Self::OutQuad => "ease_out_quad",
            Self::InOutQuad => "ease_in_out_quad",
            Self::InCubic => "ease_in_cubic",
            Self::OutCubic => "ease_out_cubic",
            Self::InOutCubic => "ease_in_out_cubic",
            Self::OutBounce => "bounce",
            Self::OutElastic => "elastic",
            Self::Gravity => "gravity",
        }
    }

    /// Look up an easing by name; `ease_in`, `ease_out` and `ease_in_out` alias the quadratics.
    pub fn from_name(name: &str) -> Result<Self, ComposerError> {
        let ease = match name {
            "linear" => Self::Linear,
            "ease_in" | "ease_in_quad" => Self::InQuad,
            "ease_out" | "ease_out_quad" => Self::OutQuad,
            "ease_in_out" | "ease_in_out_quad" => Self::InOutQuad,
            "ease_in_cubic" => Self::InCubic,
            "ease_out_cubic" => Self::OutCubic,
            "ease_in_out_cubic" => Self::InOutCubic,
            "bounce" => Self::OutBounce,
            "elastic" => Self::OutElastic,
            "gravity" => Self::Gravity,
            other => {
                let known: Vec<&str> = Self::ALL.iter().map(|e| e.name()).collect();
                return Err(ComposerError::animation(format!(
                    "unknown easing function `{other}` (available: {})",
                    known.join(", ")
                )));
            }
        };
        Ok(ease)
    }
}

fn out_bounce(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

impl FromStr for Ease {
    type Err = ComposerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
