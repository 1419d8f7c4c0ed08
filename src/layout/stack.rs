use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{ComposerError, ComposerResult};
use crate::foundation::value::{Snapshot, Value};
use crate::node::component::{Component, NodeCore, RenderCtx, Scrollable};
use crate::node::focus::{FocusChange, FocusRing};
use crate::render::buffer::PixelBuffer;
use crate::render::cache::RenderCache;

/// Cross-axis alignment of a vertical stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Cross-axis alignment of a horizontal stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Where overlaid children are pinned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    #[default]
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// How a [`Layout`] places its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Arrangement {
    /// Top to bottom.
    Vertical { spacing: i32, align: HAlign },
    /// Left to right.
    Horizontal { spacing: i32, align: VAlign },
    /// Row-major cells of equal size, each child centred in its cell.
    Grid { columns: u32, spacing: i32 },
    /// Every child at the same anchor, later children on top.
    Overlay { anchor: Anchor },
}

impl Arrangement {
    pub fn vertical(spacing: i32, align: HAlign) -> Self {
        Self::Vertical { spacing, align }
    }

    pub fn horizontal(spacing: i32, align: VAlign) -> Self {
        Self::Horizontal { spacing, align }
    }

    pub fn grid(columns: u32, spacing: i32) -> Self {
        Self::Grid { columns, spacing }
    }

    pub fn overlay(anchor: Anchor) -> Self {
        Self::Overlay { anchor }
    }
}

struct LayoutChild {
    id: String,
    node: Box<dyn Component>,
    position: (i32, i32),
}

/// Composite node that positions its children automatically.
///
/// Positions are recomputed whenever a child is added. The layout is focusable while it holds
/// at least one focusable child and forwards scrolling to whichever child has its focus.
pub struct Layout {
    width: u32,
    height: u32,
    arrangement: Arrangement,
    padding: i32,
    children: Vec<LayoutChild>,
    focus: FocusRing<String>,
    cache: RenderCache,
    core: NodeCore,
}

fn find_child<'a>(children: &'a mut [LayoutChild], id: Option<&str>) -> Option<&'a mut LayoutChild> {
    let id = id?;
    children.iter_mut().find(|c| c.id == id)
}

fn centred(outer: i64, inner: i64) -> i64 {
    (outer - inner).div_euclid(2)
}

impl Layout {
    pub fn new(width: u32, height: u32, arrangement: Arrangement) -> ComposerResult<Self> {
        if width == 0 || height == 0 {
            return Err(ComposerError::validation(format!(
                "layout dimensions must be non-zero, got {width}x{height}"
            )));
        }
        if let Arrangement::Grid { columns: 0, .. } = arrangement {
            return Err(ComposerError::validation("grid layout needs at least one column"));
        }
        Ok(Self {
            width,
            height,
            arrangement,
            padding: 0,
            children: Vec::new(),
            focus: FocusRing::new(),
            cache: RenderCache::composite(),
            core: NodeCore::new(),
        })
    }

    pub fn padding(mut self, padding: i32) -> Self {
        self.padding = padding;
        self.relayout();
        self
    }

    pub fn arrangement(&self) -> Arrangement {
        self.arrangement
    }

    /// Append a child. It is mounted, and focused when focusable and nothing holds focus yet.
    pub fn add(&mut self, id: impl Into<String>, node: impl Component) {
        self.add_boxed(id, Box::new(node));
    }

    pub fn add_boxed(&mut self, id: impl Into<String>, mut node: Box<dyn Component>) {
        let id = id.into();
        node.node_mut().mount();
        let focusable = node.is_focusable();
        self.children.push(LayoutChild {
            id: id.clone(),
            node,
            position: (0, 0),
        });
        if focusable {
            if let Some(change) = self.focus.insert(id) {
                self.apply_focus(change);
            }
        }
        self.relayout();
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<(i32, i32)> {
        self.children.iter().find(|c| c.id == id).map(|c| c.position)
    }

    pub fn child(&self, id: &str) -> Option<&dyn Component> {
        self.children
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.node.as_ref())
    }

    pub fn child_mut<T: Component>(&mut self, id: &str) -> Option<&mut T> {
        self.children
            .iter_mut()
            .find(|c| c.id == id)?
            .node
            .as_mut()
            .as_any_mut()
            .downcast_mut::<T>()
    }

    pub fn focused(&self) -> Option<&str> {
        self.focus.current().map(String::as_str)
    }

    pub fn set_focus(&mut self, id: &str) -> bool {
        match self.focus.set_focus(&id.to_owned()) {
            Some(change) => {
                self.apply_focus(change);
                true
            }
            None => false,
        }
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

    fn apply_focus(&mut self, change: FocusChange<String>) {
        if let Some(child) = find_child(&mut self.children, change.lost.as_deref()) {
            child.node.node_mut().blur();
        }
        if let Some(child) = find_child(&mut self.children, change.gained.as_deref()) {
            child.node.node_mut().focus();
        }
    }

    fn relayout(&mut self) {
        let (w, h) = (i64::from(self.width), i64::from(self.height));
        let pad = i64::from(self.padding);
        match self.arrangement {
            Arrangement::Vertical { spacing, align } => {
                let mut y = pad;
                for child in &mut self.children {
                    let cw = i64::from(child.node.width());
                    let x = match align {
                        HAlign::Left => pad,
                        HAlign::Center => centred(w, cw),
                        HAlign::Right => w - cw - pad,
                    };
                    child.position = (x as i32, y as i32);
                    y += i64::from(child.node.height()) + i64::from(spacing);
                }
            }
            Arrangement::Horizontal { spacing, align } => {
                let mut x = pad;
                for child in &mut self.children {
                    let ch = i64::from(child.node.height());
                    let y = match align {
                        VAlign::Top => pad,
                        VAlign::Center => centred(h, ch),
                        VAlign::Bottom => h - ch - pad,
                    };
                    child.position = (x as i32, y as i32);
                    x += i64::from(child.node.width()) + i64::from(spacing);
                }
            }
            Arrangement::Grid { columns, spacing } => {
                if self.children.is_empty() {
                    return;
                }
                let cols = i64::from(columns.max(1));
                let s = i64::from(spacing);
                let n = self.children.len() as i64;
                let rows = (n + cols - 1) / cols;
                let cell_w = (w - 2 * pad - (cols - 1) * s).div_euclid(cols);
                let cell_h = (h - 2 * pad - (rows - 1) * s).div_euclid(rows);
                for (idx, child) in self.children.iter_mut().enumerate() {
                    let (row, col) = (idx as i64 / cols, idx as i64 % cols);
                    let x = pad + col * (cell_w + s) + centred(cell_w, i64::from(child.node.width()));
                    let y = pad + row * (cell_h + s) + centred(cell_h, i64::from(child.node.height()));
                    child.position = (x as i32, y as i32);
                }
            }
            Arrangement::Overlay { anchor } => {
                for child in &mut self.children {
                    let (cw, ch) = (i64::from(child.node.width()), i64::from(child.node.height()));
                    let (x, y) = match anchor {
                        Anchor::Center => (centred(w, cw), centred(h, ch)),
                        Anchor::TopLeft => (pad, pad),
                        Anchor::TopRight => (w - cw - pad, pad),
                        Anchor::BottomLeft => (pad, h - ch - pad),
                        Anchor::BottomRight => (w - cw - pad, h - ch - pad),
                    };
                    child.position = (x as i32, y as i32);
                }
            }
        }
    }
}

impl Component for Layout {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn compute_state(&mut self, time: f64) -> Snapshot {
        let order: Vec<Value> = self.children.iter().map(|c| Value::from(c.id.as_str())).collect();
        let mut entries = BTreeMap::new();
        for child in &mut self.children {
            let mut entry = BTreeMap::new();
            entry.insert("state".to_owned(), Value::from(child.node.compute_state(time)));
            entry.insert("position".to_owned(), Value::from(child.position));
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
            for child in children.iter_mut() {
                let pixels = child.node.render(time, ctx);
                canvas.blit(&pixels, child.position.0, child.position.1, 1.0);
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

    fn is_focusable(&self) -> bool {
        !self.focus.is_empty()
    }

    fn as_scrollable_mut(&mut self) -> Option<&mut dyn Scrollable> {
        let id = self.focus.current()?.clone();
        let child = self.children.iter_mut().find(|c| c.id == id)?;
        child.node.as_scrollable_mut()
    }
}

impl std::fmt::Debug for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layout")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("arrangement", &self.arrangement)
            .field("padding", &self.padding)
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/stack.rs"]
mod tests;
