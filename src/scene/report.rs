use std::fmt;

use serde::Serialize;

use crate::node::component::Component;
use crate::scene::scene::{ChildInstance, Scene};

/// How much of a child's rectangle lands on the scene canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    FullyVisible,
    PartiallyVisible,
    OffCanvas,
}

impl Visibility {
    /// Classify the rectangle `(x, y, w, h)` against a `cw`x`ch` canvas.
    pub fn classify(x: i32, y: i32, w: u32, h: u32, cw: u32, ch: u32) -> Self {
        let (x0, y0) = (i64::from(x), i64::from(y));
        let (x1, y1) = (x0 + i64::from(w), y0 + i64::from(h));
        let (cw, ch) = (i64::from(cw), i64::from(ch));
        if x1 <= 0 || y1 <= 0 || x0 >= cw || y0 >= ch || w == 0 || h == 0 {
            Self::OffCanvas
        } else if x0 >= 0 && y0 >= 0 && x1 <= cw && y1 <= ch {
            Self::FullyVisible
        } else {
            Self::PartiallyVisible
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnimationReport {
    pub kind: &'static str,
    pub start: f64,
    pub elapsed: f64,
    pub duration: f64,
    pub progress: f64,
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChildReport {
    pub id: String,
    pub type_name: &'static str,
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
    pub opacity: f64,
    pub z_index: i64,
    pub visibility: Visibility,
    pub focusable: bool,
    pub focused: bool,
    pub animations: Vec<AnimationReport>,
}

/// Point-in-time description of a scene, for debugging and the `inspect` command.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SceneReport {
    pub width: u32,
    pub height: u32,
    pub time: f64,
    pub phase: Option<String>,
    pub phase_complete: bool,
    pub focused: Option<String>,
    pub active_animations: usize,
    pub children: Vec<ChildReport>,
}

impl Scene {
    /// Describe the scene at its current clock without rendering anything.
    pub fn report(&self) -> SceneReport {
        let time = self.time();
        let children = self
            .children()
            .iter()
            .map(|child| self.child_report(child, time))
            .collect();
        SceneReport {
            width: self.width(),
            height: self.height(),
            time,
            phase: self.current_phase().map(|p| p.name().to_owned()),
            phase_complete: self.phase_complete(),
            focused: self.focused().map(str::to_owned),
            active_animations: self.active_animations().len(),
            children,
        }
    }

    /// Emit [`Scene::report`] through `tracing` at debug level.
    pub fn log_report(&self) {
        let report = self.report();
        tracing::debug!(
            time = report.time,
            phase = ?report.phase,
            focused = ?report.focused,
            active = report.active_animations,
            "scene report"
        );
        for child in &report.children {
            tracing::debug!(
                id = %child.id,
                kind = child.type_name,
                x = child.x,
                y = child.y,
                opacity = child.opacity,
                visibility = ?child.visibility,
                animations = child.animations.len(),
                "child"
            );
        }
    }

    fn child_report(&self, child: &ChildInstance, time: f64) -> ChildReport {
        let node = child.node();
        let props = child.props();
        let (cw, ch) = (self.width(), self.height());
        let animations = self
            .active_animations()
            .iter()
            .filter(|a| a.anim.target() == child.id())
            .map(|a| {
                let elapsed = (time - a.start).max(0.0);
                AnimationReport {
                    kind: a.anim.kind(),
                    start: a.start,
                    elapsed,
                    duration: a.anim.duration(),
                    progress: a.anim.progress(elapsed),
                    completed: a.anim.is_completed(),
                }
            })
            .collect();
        ChildReport {
            id: child.id().to_owned(),
            type_name: node.type_name(),
            width: node.width(),
            height: node.height(),
            x: props.x(),
            y: props.y(),
            opacity: props.opacity(),
            z_index: props.z_index(),
            visibility: Visibility::classify(props.x(), props.y(), node.width(), node.height(), cw, ch),
            focusable: node.is_focusable(),
            focused: node.node().is_focused(),
            animations,
        }
    }
}

impl fmt::Display for SceneReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "scene {}x{} t={:.3}s phase={} complete={} focus={}",
            self.width,
            self.height,
            self.time,
            self.phase.as_deref().unwrap_or("-"),
            self.phase_complete,
            self.focused.as_deref().unwrap_or("-"),
        )?;
        for c in &self.children {
            writeln!(
                f,
                "  {:<12} {:<12} {:>3}x{:<3} at ({:>4},{:>4}) z={} opacity={:.2} {:?}{}",
                c.id,
                c.type_name,
                c.width,
                c.height,
                c.x,
                c.y,
                c.z_index,
                c.opacity,
                c.visibility,
                if c.focused { " [focused]" } else { "" },
            )?;
            for a in &c.animations {
                writeln!(
                    f,
                    "      {:<14} {:>5.1}% ({:.2}/{:.2}s){}",
                    a.kind,
                    a.progress * 100.0,
                    a.elapsed,
                    a.duration,
                    if a.completed { " done" } else { "" },
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/report.rs"]
mod tests;
