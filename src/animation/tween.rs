use std::collections::BTreeMap;
use std::str::FromStr;

use crate::animation::anim::Timing;
use crate::animation::ease::Ease;
use crate::foundation::error::{ComposerError, ComposerResult};
use crate::foundation::value::{PropertyBag, Value};

/// Default fade duration in seconds.
pub const DEFAULT_FADE_DURATION: f64 = 0.5;
/// Default slide duration in seconds.
pub const DEFAULT_SLIDE_DURATION: f64 = 1.0;
/// Default slide distance in pixels.
pub const DEFAULT_SLIDE_DISTANCE: i32 = 64;

/// Edge a slide enters from or exits towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Top,
    Bottom,
}

impl Direction {
    fn axis_and_sign(self) -> (&'static str, i32) {
        match self {
            Self::Left => ("x", -1),
            Self::Right => ("x", 1),
            Self::Top => ("y", -1),
            Self::Bottom => ("y", 1),
        }
    }
}

impl FromStr for Direction {
    type Err = ComposerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            other => Err(ComposerError::animation(format!(
                "unknown direction `{other}` (use left, right, top or bottom)"
            ))),
        }
    }
}

/// The eight ways a parameter's endpoints can be declared.
#[derive(Clone, Debug, Default)]
struct Endpoints {
    from_int: Option<f64>,
    from_rel_int: Option<f64>,
    from_abs: Option<f64>,
    from_rel: Option<f64>,
    to_int: Option<f64>,
    to_rel_int: Option<f64>,
    to_abs: Option<f64>,
    to_rel: Option<f64>,
}

impl Endpoints {
    fn is_int(&self) -> bool {
        self.from_int.is_some()
            || self.from_rel_int.is_some()
            || self.to_int.is_some()
            || self.to_rel_int.is_some()
    }

    /// `(from, to)` for a parameter whose current value is `current`.
    ///
    /// `to` prefers int-absolute, int-relative (to current), absolute, relative, then current.
    /// `from` uses the same order but relative variants offset from the resolved `to`.
    fn resolve(&self, current: f64) -> (f64, f64) {
        let to = self
            .to_int
            .or(self.to_rel_int.map(|d| current + d))
            .or(self.to_abs)
            .or(self.to_rel.map(|d| current + d))
            .unwrap_or(current);
        let from = self
            .from_int
            .or(self.from_rel_int.map(|d| to + d))
            .or(self.from_abs)
            .or(self.from_rel.map(|d| to + d))
            .unwrap_or(current);
        (from, to)
    }
}

#[derive(Clone, Debug)]
struct Resolved {
    from: f64,
    to: f64,
    int: bool,
}

/// Parametric animation interpolating named numeric properties.
///
/// Start/end values are resolved from the bag on the first update of a run and cached until
/// [`Tween::reset`]. Missing properties read as `0`. Parameters declared through an integer
/// variant are truncated after interpolation.
#[derive(Clone, Debug)]
pub struct Tween {
    pub(crate) timing: Timing,
    params: BTreeMap<String, Endpoints>,
    resolved: Option<BTreeMap<String, Resolved>>,
}

impl Tween {
    /// Linear tween over `duration` seconds with no parameters yet.
    pub fn new(target: impl Into<String>, duration: f64) -> ComposerResult<Self> {
        Ok(Self {
            timing: Timing::new(target, duration, Ease::Linear)?,
            params: BTreeMap::new(),
            resolved: None,
        })
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.timing.ease = ease;
        self
    }

    fn endpoint(mut self, key: impl Into<String>, f: impl FnOnce(&mut Endpoints)) -> Self {
        f(self.params.entry(key.into()).or_default());
        self
    }

    /// Absolute start value.
    pub fn from_abs(self, key: impl Into<String>, v: f64) -> Self {
        self.endpoint(key, |e| e.from_abs = Some(v))
    }

    /// Start value as an offset from the resolved end value.
    pub fn from_rel(self, key: impl Into<String>, v: f64) -> Self {
        self.endpoint(key, |e| e.from_rel = Some(v))
    }

    pub fn from_int(self, key: impl Into<String>, v: i64) -> Self {
        self.endpoint(key, |e| e.from_int = Some(v as f64))
    }

    pub fn from_rel_int(self, key: impl Into<String>, v: i64) -> Self {
        self.endpoint(key, |e| e.from_rel_int = Some(v as f64))
    }

    /// Absolute end value.
    pub fn to_abs(self, key: impl Into<String>, v: f64) -> Self {
        self.endpoint(key, |e| e.to_abs = Some(v))
    }

    /// End value as an offset from the current value.
    pub fn to_rel(self, key: impl Into<String>, v: f64) -> Self {
        self.endpoint(key, |e| e.to_rel = Some(v))
    }

    pub fn to_int(self, key: impl Into<String>, v: i64) -> Self {
        self.endpoint(key, |e| e.to_int = Some(v as f64))
    }

    pub fn to_rel_int(self, key: impl Into<String>, v: i64) -> Self {
        self.endpoint(key, |e| e.to_rel_int = Some(v as f64))
    }

    /// Opacity tween between two levels.
    pub fn fade(target: impl Into<String>, from: f64, to: f64, duration: f64) -> ComposerResult<Self> {
        Ok(Self::new(target, duration)?
            .from_abs("opacity", from)
            .to_abs("opacity", to))
    }

    /// Opacity 0 -> 1, linear.
    pub fn fade_in(target: impl Into<String>, duration: f64) -> ComposerResult<Self> {
        Self::fade(target, 0.0, 1.0, duration)
    }

    /// Opacity 1 -> 0, linear.
    pub fn fade_out(target: impl Into<String>, duration: f64) -> ComposerResult<Self> {
        Self::fade(target, 1.0, 0.0, duration)
    }

    /// Slide from `distance` pixels beyond `from` into the current position (ease-out).
    pub fn slide_in(
        target: impl Into<String>,
        from: Direction,
        distance: i32,
        duration: f64,
    ) -> ComposerResult<Self> {
        let (axis, sign) = from.axis_and_sign();
        Ok(Self::new(target, duration)?
            .ease(Ease::OutQuad)
            .from_rel_int(axis, i64::from(sign * distance))
            .to_rel_int(axis, 0))
    }

    /// Slide from the current position `distance` pixels towards `to` (ease-in).
    ///
    /// The start is left undeclared so it falls back to the current value; a relative start
    /// would be anchored to the end position instead.
    pub fn slide_out(
        target: impl Into<String>,
        to: Direction,
        distance: i32,
        duration: f64,
    ) -> ComposerResult<Self> {
        let (axis, sign) = to.axis_and_sign();
        Ok(Self::new(target, duration)?
            .ease(Ease::InQuad)
            .to_rel_int(axis, i64::from(sign * distance)))
    }

    /// Names of the animated parameters.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    pub(crate) fn update(&mut self, bag: &mut PropertyBag, elapsed: f64) -> bool {
        let Some((progress, done)) = self.timing.advance(elapsed) else {
            return true;
        };
        self.apply(bag, progress);
        done
    }

    fn apply(&mut self, bag: &mut PropertyBag, progress: f64) {
        let params = &self.params;
        let resolved = self.resolved.get_or_insert_with(|| {
            params
                .iter()
                .map(|(k, e)| {
                    let (from, to) = e.resolve(bag.get_f64(k));
                    (
                        k.clone(),
                        Resolved {
                            from,
                            to,
                            int: e.is_int(),
                        },
                    )
                })
                .collect()
        });

        for (k, r) in resolved.iter() {
            let v = r.from + (r.to - r.from) * progress;
            if r.int {
                bag.set(k.as_str(), Value::Int(v.trunc() as i64));
            } else {
                bag.set(k.as_str(), Value::Float(v));
            }
        }
    }

    pub(crate) fn reset(&mut self) {
        self.timing.reset();
        self.resolved = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
