use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::animation::anim::Animation;
use crate::animation::ops::{BulkKind, BulkOpts, Scheduled, build_all};
use crate::foundation::error::{ComposerError, ComposerResult};
use crate::foundation::value::{PropertyBag, Snapshot, Value};
use crate::node::component::{Component, NodeCore, RenderCtx};
use crate::node::focus::{FocusChange, FocusRing};
use crate::render::buffer::PixelBuffer;
use crate::render::cache::RenderCache;
use crate::scene::phase::{ActiveAnimation, Phase, PhaseTable, phase_complete};

/// A node placed in a scene together with its animatable property bag.
pub struct ChildInstance {
    id: String,
    node: Box<dyn Component>,
    props: PropertyBag,
}

impl ChildInstance {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn node(&self) -> &dyn Component {
        self.node.as_ref()
    }

    pub fn props(&self) -> &PropertyBag {
        &self.props
    }
}

/// Composite node owning named children, animation phases and a focus cursor.
///
/// Animations run on the scene clock, which follows the `time` argument of the scene's own
/// render calls (or [`Scene::set_time`]); children render at that same time argument.
pub struct Scene {
    width: u32,
    height: u32,
    children: Vec<ChildInstance>,
    focus: FocusRing<String>,
    phases: PhaseTable,
    phase: Option<Phase>,
    active: Vec<ActiveAnimation>,
    clock: f64,
    cache: RenderCache,
    core: NodeCore,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> ComposerResult<Self> {
        if width == 0 || height == 0 {
            return Err(ComposerError::validation(format!(
                "scene dimensions must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            children: Vec::new(),
            focus: FocusRing::new(),
            phases: PhaseTable::default(),
            phase: None,
            active: Vec::new(),
            clock: 0.0,
            cache: RenderCache::composite(),
            core: NodeCore::new(),
        })
    }

    pub fn with_entrance(mut self, anims: Vec<Scheduled>) -> Self {
        self.phases.set(Phase::Entrance, anims);
        self
    }

    pub fn with_idle(mut self, anims: Vec<Scheduled>) -> Self {
        self.phases.set(Phase::Idle, anims);
        self
    }

    pub fn with_exit(mut self, anims: Vec<Scheduled>) -> Self {
        self.phases.set(Phase::Exit, anims);
        self
    }

    /// Register (or replace) the animations of a phase.
    pub fn register_phase(&mut self, phase: impl Into<Phase>, anims: Vec<Scheduled>) {
        let phase = phase.into();
        tracing::info!(phase = %phase, count = anims.len(), "registered animation phase");
        self.phases.set(phase, anims);
    }

    pub fn phases(&self) -> &PhaseTable {
        &self.phases
    }

    // ---- children ----

    /// Add `node` under `id` with initial properties. Mounts it and focuses it when it is
    /// focusable and nothing else holds focus. An existing child with the same id is replaced
    /// in place.
    pub fn add_child(&mut self, id: impl Into<String>, node: impl Component, props: PropertyBag) {
        self.add_boxed(id, Box::new(node), props);
    }

    pub fn add_boxed(&mut self, id: impl Into<String>, mut node: Box<dyn Component>, props: PropertyBag) {
        let id = id.into();
        let slot = self.index_of(&id);
        if slot.is_some() {
            self.remove_child(&id);
        }

        node.node_mut().mount();
        let focusable = node.is_focusable();
        let child = ChildInstance {
            id: id.clone(),
            node,
            props,
        };
        match slot {
            Some(i) if i <= self.children.len() => self.children.insert(i, child),
            _ => self.children.push(child),
        }

        if focusable {
            if let Some(change) = self.focus.insert(id) {
                self.apply_focus(change);
            }
        }
    }

    /// Remove and return the child `id`, unmounting it and moving focus off it.
    pub fn remove_child(&mut self, id: &str) -> Option<Box<dyn Component>> {
        let idx = self.index_of(id)?;
        let mut child = self.children.remove(idx);
        child.node.node_mut().unmount();
        if let Some(change) = self.focus.remove(&child.id) {
            child.node.node_mut().blur();
            self.apply_focus(FocusChange {
                lost: None,
                gained: change.gained,
            });
        }
        Some(child.node)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.children.iter().position(|c| c.id == id)
    }

    fn entry_mut(&mut self, id: &str) -> Option<&mut ChildInstance> {
        self.children.iter_mut().find(|c| c.id == id)
    }

    pub fn children(&self) -> &[ChildInstance] {
        &self.children
    }

    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|c| c.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, id: &str) -> Option<&dyn Component> {
        self.children
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.node.as_ref())
    }

    /// Typed access to a child node, e.g. to update a progress bar between frames.
    pub fn child_mut<T: Component>(&mut self, id: &str) -> Option<&mut T> {
        self.entry_mut(id)?
            .node
            .as_mut()
            .as_any_mut()
            .downcast_mut::<T>()
    }

    pub fn props(&self, id: &str) -> Option<&PropertyBag> {
        self.children.iter().find(|c| c.id == id).map(|c| &c.props)
    }

    pub fn props_mut(&mut self, id: &str) -> Option<&mut PropertyBag> {
        self.entry_mut(id).map(|c| &mut c.props)
    }

    // ---- focus ----

    fn apply_focus(&mut self, change: FocusChange<String>) {
        if let Some(lost) = change.lost {
            if let Some(c) = self.entry_mut(&lost) {
                c.node.node_mut().blur();
            }
        }
        if let Some(gained) = change.gained {
            if let Some(c) = self.entry_mut(&gained) {
                c.node.node_mut().focus();
            }
        }
    }

    pub fn focused(&self) -> Option<&str> {
        self.focus.current().map(String::as_str)
    }

    pub fn focused_component_mut(&mut self) -> Option<&mut dyn Component> {
        let id = self.focus.current()?.clone();
        let child = self.entry_mut(&id)?;
        Some(child.node.as_mut())
    }

    /// Focus `id`; ignored (returns `false`) when it is missing or not focusable.
    pub fn set_focus(&mut self, id: &str) -> bool {
        if !self.child(id).is_some_and(|c| c.is_focusable()) {
            return false;
        }
        let key = id.to_owned();
        let mut changed = false;
        if !self.focus.contains(&key) {
            if let Some(change) = self.focus.insert(key.clone()) {
                self.apply_focus(change);
                changed = true;
            }
        }
        if let Some(change) = self.focus.set_focus(&key) {
            self.apply_focus(change);
            changed = true;
        }
        changed
    }

    pub fn focus_next(&mut self) -> bool {
        match self.focus.focus_next() {
            Some(change) => {
                self.apply_focus(change);
                true
            }
            None => false,
        }
    }

    pub fn focus_previous(&mut self) -> bool {
        match self.focus.focus_previous() {
            Some(change) => {
                self.apply_focus(change);
                true
            }
            None => false,
        }
    }

    /// Forward a scroll to the focused child; `false` when nothing focused can scroll.
    pub fn scroll_focused(&mut self, dx: i32, dy: i32) -> bool {
        let Some(node) = self.focused_component_mut() else {
            return false;
        };
        match node.as_scrollable_mut() {
            Some(s) => {
                s.scroll_by(dx, dy);
                true
            }
            None => false,
        }
    }

    // ---- animations and phases ----

    /// Schedule `anim` at scene time `start`.
    pub fn add_animation(&mut self, start: f64, anim: impl Into<Animation>) {
        self.active.push(ActiveAnimation {
            start,
            anim: anim.into(),
        });
    }

    pub fn clear_animations(&mut self) {
        self.active.clear();
    }

    pub fn active_animations(&self) -> &[ActiveAnimation] {
        &self.active
    }

    /// Scene clock used to schedule and drive animations.
    pub fn time(&self) -> f64 {
        self.clock
    }

    pub fn set_time(&mut self, time: f64) {
        self.clock = time;
    }

    pub fn current_phase(&self) -> Option<&Phase> {
        self.phase.as_ref()
    }

    /// Load `phase` (or clear everything with `None`).
    ///
    /// Each animation is reset, scheduled at `time() + offset` and applied once at elapsed zero.
    /// An unknown phase is logged and leaves the current phase untouched; returns `false` then.
    pub fn set_animation_phase(&mut self, phase: Option<Phase>) -> bool {
        let Some(phase) = phase else {
            tracing::debug!(time = self.clock, "clearing animation phase");
            self.phase = None;
            self.active.clear();
            return true;
        };
        let Some(defs) = self.phases.get(&phase) else {
            tracing::warn!(phase = %phase, "unknown animation phase");
            return false;
        };
        let defs = defs.to_vec();

        self.active.clear();
        for (offset, mut anim) in defs {
            anim.reset();
            match self.entry_mut(anim.target()) {
                Some(child) => {
                    anim.update(&mut child.props, 0.0);
                }
                None => tracing::debug!(target = anim.target(), "phase animation has no child yet"),
            }
            self.active.push(ActiveAnimation {
                start: self.clock + offset,
                anim,
            });
        }
        tracing::debug!(phase = %phase, time = self.clock, count = self.active.len(), "loaded animation phase");
        self.phase = Some(phase);
        true
    }

    pub fn on_enter(&mut self) {
        self.set_animation_phase(Some(Phase::Entrance));
    }

    pub fn on_exit(&mut self) {
        self.set_animation_phase(Some(Phase::Exit));
    }

    /// Zero the clock, drop the phase and active list, and reset every registered animation.
    pub fn reset(&mut self) {
        self.clock = 0.0;
        self.phase = None;
        self.active.clear();
        self.phases.reset_all();
    }

    /// Cycle length of the first active [`Loop`](crate::animation::combinators::Loop), if any.
    pub fn loop_cycle(&self) -> Option<f64> {
        self.active.iter().find_map(|a| match &a.anim {
            Animation::Loop(l) => Some(l.cycle_duration()),
            _ => None,
        })
    }

    pub fn phase_complete(&self) -> bool {
        phase_complete(&self.active, self.clock)
    }

    /// Entrance -> idle (or none) and idle -> idle once the current phase completes.
    ///
    /// Returns whether a transition happened.
    pub fn drive_phases(&mut self) -> bool {
        let next = match &self.phase {
            Some(Phase::Entrance) if self.phase_complete() => {
                if self.phases.has_animations(&Phase::Idle) {
                    Some(Phase::Idle)
                } else {
                    None
                }
            }
            Some(Phase::Idle) if self.phase_complete() => Some(Phase::Idle),
            _ => return false,
        };
        tracing::debug!(from = ?self.phase, to = ?next, "phase complete");
        self.set_animation_phase(next);
        true
    }

    /// Build bulk animations over every child id, in insertion order.
    pub fn apply_all(&self, kind: BulkKind, opts: BulkOpts) -> ComposerResult<Vec<Scheduled>> {
        let ids: Vec<&str> = self.child_ids().collect();
        build_all(kind, &ids, opts)
    }

    fn apply_animations(&mut self) {
        let now = self.clock;
        for a in &mut self.active {
            let Some(child) = self.children.iter_mut().find(|c| c.id == a.anim.target()) else {
                continue;
            };
            a.anim.update(&mut child.props, (now - a.start).max(0.0));
        }
    }
}

impl Component for Scene {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn compute_state(&mut self, time: f64) -> Snapshot {
        self.clock = time;
        self.apply_animations();

        let order: Vec<Value> = self.children.iter().map(|c| Value::from(c.id.as_str())).collect();
        let mut entries = BTreeMap::new();
        for child in &mut self.children {
            let mut entry = BTreeMap::new();
            entry.insert("props".to_owned(), child.props.to_value());
            entry.insert("state".to_owned(), Value::from(child.node.compute_state(time)));
            entry.insert("focused".to_owned(), Value::Bool(child.node.node().is_focused()));
            entries.insert(child.id.clone(), Value::Map(entry));
        }
        Snapshot::new()
            .with("order", Value::Tuple(order))
            .with("children", Value::Map(entries))
    }

    fn render_pixels(&mut self, state: &Snapshot, time: f64, ctx: &RenderCtx) -> Arc<PixelBuffer> {
        let key = if ctx.debug_focus {
            Cow::Owned(state.clone().with("debug_focus", true))
        } else {
            Cow::Borrowed(state)
        };
        let (w, h) = (self.width, self.height);
        let children = &mut self.children;
        self.cache.get_or_compute(&key, || {
            let mut canvas = PixelBuffer::blank(w, h);
            let mut order: Vec<usize> = (0..children.len()).collect();
            order.sort_by_key(|&i| children[i].props.z_index());
            for i in order {
                let child = &mut children[i];
                let pixels = child.node.render(time, ctx);
                canvas.blit(
                    &pixels,
                    child.props.x(),
                    child.props.y(),
                    child.props.opacity(),
                );
            }
            canvas
        })
    }

    fn node(&self) -> &NodeCore {
        &self.core
    }

    fn node_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("children", &self.children.len())
            .field("phase", &self.phase)
            .field("active", &self.active.len())
            .field("clock", &self.clock)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/scene.rs"]
mod tests;
