use std::collections::BTreeMap;
use std::fmt;

use crate::animation::anim::Animation;
use crate::animation::ops::Scheduled;

/// A named batch of animations representing one stage of a scene's lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    Entrance,
    Idle,
    Exit,
    Custom(String),
}

impl Phase {
    pub fn name(&self) -> &str {
        match self {
            Self::Entrance => "entrance",
            Self::Idle => "idle",
            Self::Exit => "exit",
            Self::Custom(name) => name,
        }
    }

    /// Built-in names map to their variants; anything else is a custom phase.
    pub fn from_name(name: &str) -> Self {
        match name {
            "entrance" => Self::Entrance,
            "idle" => Self::Idle,
            "exit" => Self::Exit,
            other => Self::Custom(other.to_owned()),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Phase {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl serde::Serialize for Phase {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.name())
    }
}

/// An animation scheduled on the scene clock.
#[derive(Clone, Debug)]
pub struct ActiveAnimation {
    /// Scene time at which the animation starts.
    pub start: f64,
    pub anim: Animation,
}

/// Registered phase definitions. Loading a phase clones its definitions into the active list.
#[derive(Clone, Debug, Default)]
pub struct PhaseTable {
    entrance: Vec<Scheduled>,
    idle: Vec<Scheduled>,
    exit: Vec<Scheduled>,
    custom: BTreeMap<String, Vec<Scheduled>>,
}

impl PhaseTable {
    pub fn get(&self, phase: &Phase) -> Option<&[Scheduled]> {
        match phase {
            Phase::Entrance => Some(&self.entrance),
            Phase::Idle => Some(&self.idle),
            Phase::Exit => Some(&self.exit),
            Phase::Custom(name) => self.custom.get(name).map(Vec::as_slice),
        }
    }

    pub fn set(&mut self, phase: Phase, anims: Vec<Scheduled>) {
        match phase {
            Phase::Entrance => self.entrance = anims,
            Phase::Idle => self.idle = anims,
            Phase::Exit => self.exit = anims,
            Phase::Custom(name) => {
                self.custom.insert(name, anims);
            }
        }
    }

    pub fn has_animations(&self, phase: &Phase) -> bool {
        self.get(phase).is_some_and(|a| !a.is_empty())
    }

    /// Reset every registered animation in every phase.
    pub fn reset_all(&mut self) {
        let builtins = [&mut self.entrance, &mut self.idle, &mut self.exit];
        for list in builtins.into_iter().chain(self.custom.values_mut()) {
            for (_, anim) in list.iter_mut() {
                anim.reset();
            }
        }
    }

    pub fn custom_names(&self) -> impl Iterator<Item = &str> {
        self.custom.keys().map(String::as_str)
    }
}

/// Whether the active phase has finished at `scene_time`.
///
/// True when nothing is active, or when every animation that has started reports completion
/// and the latest scheduled start has been reached.
pub fn phase_complete(active: &[ActiveAnimation], scene_time: f64) -> bool {
    if active.is_empty() {
        return true;
    }
    let started_done = active
        .iter()
        .filter(|a| scene_time >= a.start)
        .all(|a| a.anim.is_completed());
    let latest_start = active.iter().map(|a| a.start).fold(f64::MIN, f64::max);
    started_done && scene_time >= latest_start
}

#[cfg(test)]
#[path = "../../tests/unit/scene/phase.rs"]
mod tests;
