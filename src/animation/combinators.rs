use crate::animation::anim::Animation;
use crate::foundation::error::{ComposerError, ComposerResult};
use crate::foundation::value::PropertyBag;

fn shared_target(kind: &str, children: &[Animation]) -> ComposerResult<String> {
    let Some(first) = children.first() else {
        return Err(ComposerError::animation(format!(
            "{kind} requires at least one animation"
        )));
    };
    let target = first.target();
    if let Some(other) = children.iter().find(|a| a.target() != target) {
        return Err(ComposerError::animation(format!(
            "{kind} children must share one target (`{target}` vs `{}`)",
            other.target()
        )));
    }
    Ok(target.to_owned())
}

/// Runs children one after another; duration is the sum of theirs.
#[derive(Clone, Debug)]
pub struct Sequence {
    target: String,
    children: Vec<Animation>,
    index: usize,
    completed: bool,
}

impl Sequence {
    pub fn new(children: Vec<Animation>) -> ComposerResult<Self> {
        let target = shared_target("sequence", &children)?;
        Ok(Self {
            target,
            children,
            index: 0,
            completed: false,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn duration(&self) -> f64 {
        self.children.iter().map(Animation::duration).sum()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Index of the child currently playing.
    pub fn current_index(&self) -> usize {
        self.index
    }

    pub(crate) fn update(&mut self, bag: &mut PropertyBag, elapsed: f64) -> bool {
        if self.completed {
            return true;
        }
        loop {
            let offset: f64 = self.children[..self.index]
                .iter()
                .map(Animation::duration)
                .sum();
            if !self.children[self.index].update(bag, elapsed - offset) {
                return false;
            }
            // The current child finished; the next one starts from the remainder.
            self.index += 1;
            if self.index >= self.children.len() {
                self.completed = true;
                return true;
            }
        }
    }

    pub(crate) fn reset(&mut self) {
        self.index = 0;
        self.completed = false;
        for child in &mut self.children {
            child.reset();
        }
    }
}

/// Runs children against the same clock; done once every child is done.
#[derive(Clone, Debug)]
pub struct Parallel {
    target: String,
    children: Vec<Animation>,
    completed: bool,
}

impl Parallel {
    pub fn new(children: Vec<Animation>) -> ComposerResult<Self> {
        let target = shared_target("parallel", &children)?;
        Ok(Self {
            target,
            children,
            completed: false,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn duration(&self) -> f64 {
        self.children
            .iter()
            .map(Animation::duration)
            .fold(0.0, f64::max)
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn update(&mut self, bag: &mut PropertyBag, elapsed: f64) -> bool {
        if self.completed {
            return true;
        }
        let mut all_done = true;
        for child in self.children.iter_mut().filter(|c| !c.is_completed()) {
            if !child.update(bag, elapsed) {
                all_done = false;
            }
        }
        self.completed = all_done;
        all_done
    }

    pub(crate) fn reset(&mut self) {
        self.completed = false;
        for child in &mut self.children {
            child.reset();
        }
    }
}

/// Repeats a child a fixed number of times, or forever.
///
/// The child is reset whenever a new iteration begins, so relative parameters re-resolve
/// against the bag's latest values.
#[derive(Clone, Debug)]
pub struct Loop {
    child: Box<Animation>,
    count: Option<u32>,
    iteration: u64,
    completed: bool,
}

impl Loop {
    /// Repeat `child` `count` times (`None` loops forever).
    pub fn new(child: impl Into<Animation>, count: Option<u32>) -> ComposerResult<Self> {
        let child = child.into();
        let d = child.duration();
        if !d.is_finite() || d <= 0.0 {
            return Err(ComposerError::animation(format!(
                "loop on `{}` needs a child with a finite, positive duration (got {d})",
                child.target()
            )));
        }
        if count == Some(0) {
            return Err(ComposerError::animation(format!(
                "loop on `{}` needs a count of at least one",
                child.target()
            )));
        }
        Ok(Self {
            child: Box::new(child),
            count,
            iteration: 0,
            completed: false,
        })
    }

    /// Endless loop.
    pub fn forever(child: impl Into<Animation>) -> ComposerResult<Self> {
        Self::new(child, None)
    }

    pub fn target(&self) -> &str {
        self.child.target()
    }

    pub fn duration(&self) -> f64 {
        match self.count {
            Some(n) => self.child.duration() * f64::from(n),
            None => f64::INFINITY,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Length of a single iteration.
    pub fn cycle_duration(&self) -> f64 {
        self.child.duration()
    }

    /// Zero-based iteration last played.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub(crate) fn update(&mut self, bag: &mut PropertyBag, elapsed: f64) -> bool {
        if self.completed {
            return true;
        }
        let d = self.child.duration();
        let elapsed = if elapsed.is_nan() { 0.0 } else { elapsed.max(0.0) };
        let iteration = (elapsed / d).floor() as u64;

        if let Some(count) = self.count {
            let last = u64::from(count) - 1;
            if iteration > last {
                if self.iteration < last {
                    self.child.reset();
                    self.iteration = last;
                }
                // Land the last iteration exactly on its end value.
                self.child.update(bag, d);
                self.completed = true;
                return true;
            }
        }

        if iteration > self.iteration {
            self.child.reset();
            self.iteration = iteration;
        }
        let within = elapsed - (iteration as f64) * d;
        self.child.update(bag, within);
        false
    }

    pub(crate) fn reset(&mut self) {
        self.iteration = 0;
        self.completed = false;
        self.child.reset();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/combinators.rs"]
mod tests;
