use std::any::Any;
use std::sync::Arc;

use crate::foundation::value::Snapshot;
use crate::render::buffer::{Color, PixelBuffer};

/// Accent used for the debug focus outline.
pub const DEBUG_FOCUS_COLOR: Color = Color::Rgba([128, 0, 255, 255]);

/// Per-call render context threaded down from the driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderCtx {
    /// Overlay a one-pixel outline on the focused node.
    pub debug_focus: bool,
}

/// Lifecycle callback.
pub type Hook = Box<dyn FnMut()>;

/// Bookkeeping shared by every node: focus and mount flags, change detection and hooks.
#[derive(Default)]
pub struct NodeCore {
    focused: bool,
    mounted: bool,
    last_state: Option<Snapshot>,
    rendered_at: Option<f64>,
    on_mount: Vec<Hook>,
    on_unmount: Vec<Hook>,
    on_focus: Vec<Hook>,
    on_blur: Vec<Hook>,
}

fn fire(hooks: &mut [Hook]) {
    for hook in hooks {
        hook();
    }
}

impl NodeCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Time argument of the render call at which the state last changed.
    pub fn rendered_at(&self) -> Option<f64> {
        self.rendered_at
    }

    /// Snapshot seen by the most recent render call.
    pub fn last_state(&self) -> Option<&Snapshot> {
        self.last_state.as_ref()
    }

    /// Record `state` as seen at `time`; returns whether it differs from the previous one.
    ///
    /// `rendered_at` only moves when the state changes.
    pub fn observe_state(&mut self, state: &Snapshot, time: f64) -> bool {
        if self.last_state.as_ref() == Some(state) {
            return false;
        }
        self.last_state = Some(state.clone());
        self.rendered_at = Some(time);
        true
    }

    /// Mark mounted; hooks fire only on the unmounted -> mounted transition.
    pub fn mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        fire(&mut self.on_mount);
        true
    }

    pub fn unmount(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        self.mounted = false;
        fire(&mut self.on_unmount);
        true
    }

    pub fn focus(&mut self) -> bool {
        if self.focused {
            return false;
        }
        self.focused = true;
        fire(&mut self.on_focus);
        true
    }

    pub fn blur(&mut self) -> bool {
        if !self.focused {
            return false;
        }
        self.focused = false;
        fire(&mut self.on_blur);
        true
    }

    pub fn on_mount(&mut self, hook: impl FnMut() + 'static) {
        self.on_mount.push(Box::new(hook));
    }

    pub fn on_unmount(&mut self, hook: impl FnMut() + 'static) {
        self.on_unmount.push(Box::new(hook));
    }

    pub fn on_focus(&mut self, hook: impl FnMut() + 'static) {
        self.on_focus.push(Box::new(hook));
    }

    pub fn on_blur(&mut self, hook: impl FnMut() + 'static) {
        self.on_blur.push(Box::new(hook));
    }
}

impl std::fmt::Debug for NodeCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeCore")
            .field("focused", &self.focused)
            .field("mounted", &self.mounted)
            .field("rendered_at", &self.rendered_at)
            .finish_non_exhaustive()
    }
}

/// Upcasting helper so scenes can hand out typed access to their children.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Scroll capability consumed by input handling.
pub trait Scrollable {
    /// Move the viewport by a relative offset, clamped to the content.
    fn scroll_by(&mut self, dx: i32, dy: i32);
    /// Move the viewport to an absolute offset, clamped to the content.
    fn scroll_to(&mut self, x: i32, y: i32);
}

/// A renderable node with the two-phase render protocol.
///
/// `compute_state` produces a time-free [`Snapshot`]; `render_pixels` turns a snapshot into
/// pixels, normally through the node's own [`crate::render::cache::RenderCache`]. Anything
/// time-dependent that affects pixels must show up in the snapshot.
pub trait Component: AsAny {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Snapshot of everything that affects this node's pixels at `time`.
    fn compute_state(&mut self, time: f64) -> Snapshot;

    /// Pixels for `state`. The returned buffer may be shared with the cache; copy before drawing.
    fn render_pixels(&mut self, state: &Snapshot, time: f64, ctx: &RenderCtx) -> Arc<PixelBuffer>;

    fn node(&self) -> &NodeCore;

    fn node_mut(&mut self) -> &mut NodeCore;

    fn is_focusable(&self) -> bool {
        false
    }

    fn as_scrollable_mut(&mut self) -> Option<&mut dyn Scrollable> {
        None
    }

    /// Short type label for reports.
    fn type_name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    /// Compute state, track changes, produce pixels and apply the debug focus overlay.
    fn render(&mut self, time: f64, ctx: &RenderCtx) -> Arc<PixelBuffer> {
        let state = self.compute_state(time);
        self.node_mut().observe_state(&state, time);
        let pixels = self.render_pixels(&state, time, ctx);
        if ctx.debug_focus && self.node().is_focused() {
            let mut outlined = pixels.copy();
            outlined.draw_outline(DEBUG_FOCUS_COLOR);
            return Arc::new(outlined);
        }
        pixels
    }
}

#[cfg(test)]
#[path = "../../tests/unit/node/component.rs"]
mod tests;
