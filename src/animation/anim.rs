use crate::animation::combinators::{Loop, Parallel, Sequence};
use crate::animation::ease::Ease;
use crate::animation::physics::{GravityFallIn, GravityJump};
use crate::animation::tween::Tween;
use crate::foundation::error::{ComposerError, ComposerResult};
use crate::foundation::value::PropertyBag;

/// Target, duration, easing and completion state shared by leaf animations.
#[derive(Clone, Debug)]
pub(crate) struct Timing {
    pub(crate) target: String,
    pub(crate) duration: f64,
    pub(crate) ease: Ease,
    pub(crate) completed: bool,
}

impl Timing {
    pub(crate) fn new(target: impl Into<String>, duration: f64, ease: Ease) -> ComposerResult<Self> {
        let target = target.into();
        validate_duration(&target, duration)?;
        Ok(Self {
            target,
            duration,
            ease,
            completed: false,
        })
    }

    /// Progress to apply for `elapsed`, and whether this step finishes the run.
    ///
    /// Returns `None` once completed. The finishing step always yields exactly `1.0` (uneased).
    pub(crate) fn advance(&mut self, elapsed: f64) -> Option<(f64, bool)> {
        if self.completed {
            return None;
        }
        let elapsed = if elapsed.is_nan() { 0.0 } else { elapsed.max(0.0) };
        if elapsed >= self.duration {
            self.completed = true;
            return Some((1.0, true));
        }
        Some((self.ease.apply(elapsed / self.duration), false))
    }

    pub(crate) fn reset(&mut self) {
        self.completed = false;
    }
}

pub(crate) fn validate_duration(target: &str, duration: f64) -> ComposerResult<()> {
    if !duration.is_finite() || duration < 0.0 {
        return Err(ComposerError::animation(format!(
            "animation on `{target}` needs a finite, non-negative duration (got {duration})"
        )));
    }
    Ok(())
}

/// A time-driven mutator of one scene child's property bag.
///
/// Animations address their child by id; the scene resolves the id every tick.
#[derive(Clone, Debug)]
pub enum Animation {
    Tween(Tween),
    Sequence(Sequence),
    Parallel(Parallel),
    Loop(Loop),
    GravityJump(GravityJump),
    GravityFallIn(GravityFallIn),
}

impl Animation {
    /// Id of the child this animation writes to.
    pub fn target(&self) -> &str {
        match self {
            Self::Tween(a) => &a.timing.target,
            Self::Sequence(a) => a.target(),
            Self::Parallel(a) => a.target(),
            Self::Loop(a) => a.target(),
            Self::GravityJump(a) => &a.timing.target,
            Self::GravityFallIn(a) => &a.timing.target,
        }
    }

    /// Total duration in seconds (infinite for endless loops).
    pub fn duration(&self) -> f64 {
        match self {
            Self::Tween(a) => a.timing.duration,
            Self::Sequence(a) => a.duration(),
            Self::Parallel(a) => a.duration(),
            Self::Loop(a) => a.duration(),
            Self::GravityJump(a) => a.timing.duration,
            Self::GravityFallIn(a) => a.timing.duration,
        }
    }

    pub fn is_completed(&self) -> bool {
        match self {
            Self::Tween(a) => a.timing.completed,
            Self::Sequence(a) => a.is_completed(),
            Self::Parallel(a) => a.is_completed(),
            Self::Loop(a) => a.is_completed(),
            Self::GravityJump(a) => a.timing.completed,
            Self::GravityFallIn(a) => a.timing.completed,
        }
    }

    /// Apply the value for `elapsed` seconds since start; returns whether the animation is done.
    ///
    /// At or past the duration the final value is applied once; later calls are no-ops that
    /// return `true`.
    pub fn update(&mut self, bag: &mut PropertyBag, elapsed: f64) -> bool {
        match self {
            Self::Tween(a) => a.update(bag, elapsed),
            Self::Sequence(a) => a.update(bag, elapsed),
            Self::Parallel(a) => a.update(bag, elapsed),
            Self::Loop(a) => a.update(bag, elapsed),
            Self::GravityJump(a) => a.update(bag, elapsed),
            Self::GravityFallIn(a) => a.update(bag, elapsed),
        }
    }

    /// Clear completion and any resolved start/end values.
    pub fn reset(&mut self) {
        match self {
            Self::Tween(a) => a.reset(),
            Self::Sequence(a) => a.reset(),
            Self::Parallel(a) => a.reset(),
            Self::Loop(a) => a.reset(),
            Self::GravityJump(a) => a.reset(),
            Self::GravityFallIn(a) => a.reset(),
        }
    }

    /// Linear progress in `[0, 1]` at `elapsed` (always `0` for endless loops).
    pub fn progress(&self, elapsed: f64) -> f64 {
        if self.is_completed() {
            return 1.0;
        }
        let d = self.duration();
        if !d.is_finite() {
            return 0.0;
        }
        if d <= 0.0 {
            return 1.0;
        }
        (elapsed / d).clamp(0.0, 1.0)
    }

    /// Short kind label used in reports and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Tween(_) => "tween",
            Self::Sequence(_) => "sequence",
            Self::Parallel(_) => "parallel",
            Self::Loop(_) => "loop",
            Self::GravityJump(_) => "gravity_jump",
            Self::GravityFallIn(_) => "gravity_fall_in",
        }
    }
}

impl From<Tween> for Animation {
    fn from(v: Tween) -> Self {
        Self::Tween(v)
    }
}

impl From<Sequence> for Animation {
    fn from(v: Sequence) -> Self {
        Self::Sequence(v)
    }
}

impl From<Parallel> for Animation {
    fn from(v: Parallel) -> Self {
        Self::Parallel(v)
    }
}

impl From<Loop> for Animation {
    fn from(v: Loop) -> Self {
        Self::Loop(v)
    }
}

impl From<GravityJump> for Animation {
    fn from(v: GravityJump) -> Self {
        Self::GravityJump(v)
    }
}

impl From<GravityFallIn> for Animation {
    fn from(v: GravityFallIn) -> Self {
        Self::GravityFallIn(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
