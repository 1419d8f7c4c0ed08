use crate::animation::anim::Timing;
use crate::animation::ease::Ease;
use crate::foundation::error::{ComposerError, ComposerResult};
use crate::foundation::value::{PropertyBag, Value};

/// Bounces whose launch speed drops below this (units/second) are not played.
pub const MIN_BOUNCE_VELOCITY: f64 = 1.0;

fn require_positive(target: &str, what: &str, v: f64) -> ComposerResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(ComposerError::animation(format!(
            "{what} for `{target}` must be finite and positive (got {v})"
        )));
    }
    Ok(())
}

#[derive(Clone, Copy, Debug)]
struct JumpPhysics {
    y0: f64,
    v0: f64,
    g: f64,
}

/// Closed-form projectile arc that leaves and lands on the property's current value.
///
/// With peak height `h` over `T` seconds: `v0 = 4h/T`, `g = 8h/T²`, and
/// `y(t) = y0 - (v0 t - g t² / 2)` truncated to an integer (screen "up" is negative).
#[derive(Clone, Debug)]
pub struct GravityJump {
    pub(crate) timing: Timing,
    param: String,
    height: f64,
    resolved: Option<JumpPhysics>,
}

impl GravityJump {
    pub fn new(target: impl Into<String>, height: f64, duration: f64) -> ComposerResult<Self> {
        let target = target.into();
        require_positive(&target, "jump duration", duration)?;
        if !height.is_finite() {
            return Err(ComposerError::animation(format!(
                "jump height for `{target}` must be finite (got {height})"
            )));
        }
        Ok(Self {
            timing: Timing::new(target, duration, Ease::Linear)?,
            param: "y".to_owned(),
            height,
            resolved: None,
        })
    }

    /// Animate `param` instead of `y`.
    pub fn param(mut self, param: impl Into<String>) -> Self {
        self.param = param.into();
        self
    }

    pub(crate) fn update(&mut self, bag: &mut PropertyBag, elapsed: f64) -> bool {
        let Some((progress, done)) = self.timing.advance(elapsed) else {
            return true;
        };
        let duration = self.timing.duration;
        let height = self.height;
        let p = *self.resolved.get_or_insert_with(|| JumpPhysics {
            y0: bag.get_f64(&self.param),
            v0: 4.0 * height / duration,
            g: 8.0 * height / (duration * duration),
        });

        let y = if progress >= 1.0 {
            p.y0
        } else {
            let t = progress * duration;
            p.y0 - (p.v0 * t - 0.5 * p.g * t * t)
        };
        bag.set(self.param.as_str(), Value::Int(y.trunc() as i64));
        done
    }

    pub(crate) fn reset(&mut self) {
        self.timing.reset();
        self.resolved = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Bounce {
    start: f64,
    end: f64,
    v0: f64,
}

#[derive(Clone, Debug)]
struct FallPhysics {
    target_y: f64,
    start_y: f64,
    t_fall: f64,
    bounces: Vec<Bounce>,
    time_scale: f64,
}

/// Drop from `fall_distance` above the current value, then settle with damped bounces.
///
/// Each bounce keeps `bounce_coef` of the impact speed until `max_bounces` or until the speed
/// falls below [`MIN_BOUNCE_VELOCITY`]. Bounce heights follow real physics; the whole sequence
/// is time-scaled to fit `duration`.
#[derive(Clone, Debug)]
pub struct GravityFallIn {
    pub(crate) timing: Timing,
    param: String,
    fall_distance: f64,
    bounce_coef: f64,
    max_bounces: u32,
    gravity: f64,
    resolved: Option<FallPhysics>,
}

impl GravityFallIn {
    pub const DEFAULT_FALL_DISTANCE: f64 = 32.0;
    pub const DEFAULT_DURATION: f64 = 2.0;
    pub const DEFAULT_BOUNCE_COEF: f64 = 0.5;
    pub const DEFAULT_MAX_BOUNCES: u32 = 3;
    pub const DEFAULT_GRAVITY: f64 = 800.0;

    /// Fall-in with default physics (32 px drop, 2 s, coefficient 0.5, 3 bounces, g = 800).
    pub fn new(target: impl Into<String>) -> ComposerResult<Self> {
        Self::with_physics(
            target,
            Self::DEFAULT_FALL_DISTANCE,
            Self::DEFAULT_DURATION,
            Self::DEFAULT_BOUNCE_COEF,
            Self::DEFAULT_MAX_BOUNCES,
            Self::DEFAULT_GRAVITY,
        )
    }

    pub fn with_physics(
        target: impl Into<String>,
        fall_distance: f64,
        duration: f64,
        bounce_coef: f64,
        max_bounces: u32,
        gravity: f64,
    ) -> ComposerResult<Self> {
        let target = target.into();
        require_positive(&target, "fall duration", duration)?;
        require_positive(&target, "gravity", gravity)?;
        if !fall_distance.is_finite() || fall_distance < 0.0 {
            return Err(ComposerError::animation(format!(
                "fall distance for `{target}` must be finite and non-negative (got {fall_distance})"
            )));
        }
        if !(0.0..=1.0).contains(&bounce_coef) {
            return Err(ComposerError::animation(format!(
                "bounce coefficient for `{target}` must be within [0, 1] (got {bounce_coef})"
            )));
        }
        Ok(Self {
            timing: Timing::new(target, duration, Ease::Linear)?,
            param: "y".to_owned(),
            fall_distance,
            bounce_coef,
            max_bounces,
            gravity,
            resolved: None,
        })
    }

    /// Animate `param` instead of `y`.
    pub fn param(mut self, param: impl Into<String>) -> Self {
        self.param = param.into();
        self
    }

    /// Number of bounces the resolved run will play (`None` before the first update).
    pub fn bounce_count(&self) -> Option<usize> {
        self.resolved.as_ref().map(|r| r.bounces.len())
    }

    fn solve(&self, target_y: f64) -> FallPhysics {
        let g = self.gravity;
        let h = self.fall_distance;
        let t_fall = (2.0 * h / g).sqrt();

        let mut bounces = Vec::new();
        let mut now = t_fall;
        let mut velocity = (2.0 * g * h).sqrt();
        for _ in 0..self.max_bounces {
            let launch = velocity * self.bounce_coef;
            if launch < MIN_BOUNCE_VELOCITY {
                break;
            }
            let airtime = 2.0 * launch / g;
            bounces.push(Bounce {
                start: now,
                end: now + airtime,
                v0: launch,
            });
            now += airtime;
            velocity = launch;
        }

        let time_scale = if now > 0.0 {
            self.timing.duration / now
        } else {
            1.0
        };
        FallPhysics {
            target_y,
            start_y: target_y - h,
            t_fall,
            bounces,
            time_scale,
        }
    }

    pub(crate) fn update(&mut self, bag: &mut PropertyBag, elapsed: f64) -> bool {
        let Some((progress, done)) = self.timing.advance(elapsed) else {
            return true;
        };
        if self.resolved.is_none() {
            self.resolved = Some(self.solve(bag.get_f64(&self.param)));
        }
        let Some(phys) = self.resolved.as_ref() else {
            return done;
        };

        let g = self.gravity;
        let y = if progress >= 1.0 {
            phys.target_y
        } else {
            let t = progress * self.timing.duration / phys.time_scale;
            if t <= phys.t_fall {
                phys.start_y + 0.5 * g * t * t
            } else {
                phys.bounces
                    .iter()
                    .find(|b| b.start <= t && t <= b.end)
                    .map(|b| {
                        let tb = t - b.start;
                        phys.target_y - (b.v0 * tb - 0.5 * g * tb * tb)
                    })
                    .unwrap_or(phys.target_y)
            }
        };
        bag.set(self.param.as_str(), Value::Int(y.trunc() as i64));
        done
    }

    pub(crate) fn reset(&mut self) {
        self.timing.reset();
        self.resolved = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/physics.rs"]
mod tests;
