//! Matrix Composer renders animated, component-based scenes onto small RGBA pixel grids
//! such as LED matrices and terminals.
//!
//! - Build a [`Scene`] out of leaf nodes ([`Fill`], [`ProgressBar`], [`ScrollView`], ...) and
//!   [`Layout`] containers
//! - Attach animations to its entrance, idle and exit phases
//! - Register scenes with an [`Orchestrator`] and drive it into a [`DisplaySink`]
//!
//! Every node follows a two-phase render: a time-free state snapshot, then pixels looked up
//! in (or added to) the node's own cache under that snapshot.
#![forbid(unsafe_code)]

pub mod animation;
pub mod demo;
pub mod driver;
pub mod encode;
pub mod foundation;
pub mod layout;
pub mod node;
pub mod render;
pub mod scene;
pub mod widgets;

pub use crate::animation::anim::Animation;
pub use crate::animation::combinators::{Loop, Parallel, Sequence};
pub use crate::animation::ease::Ease;
pub use crate::animation::ops::{BulkKind, BulkOpts, Scheduled};
pub use crate::animation::physics::{GravityFallIn, GravityJump};
pub use crate::animation::tween::{Direction, Tween};
pub use crate::driver::config::{LoopConfig, Pacing};
pub use crate::driver::input::{Command, InputQueue};
pub use crate::driver::orchestrator::{Orchestrator, RunStats, StopHandle};
pub use crate::encode::png::{PngSequenceSink, save_png};
pub use crate::encode::sink::{DisplaySink, InMemorySink, SinkConfig};
pub use crate::encode::terminal::{TerminalSink, TerminalSinkOpts};
pub use crate::foundation::error::{ComposerError, ComposerResult};
pub use crate::foundation::value::{PropertyBag, Snapshot, Value};
pub use crate::layout::stack::{Anchor, Arrangement, HAlign, Layout, VAlign};
pub use crate::node::component::{Component, NodeCore, RenderCtx, Scrollable};
pub use crate::render::buffer::{Color, PixelBuffer};
pub use crate::render::cache::RenderCache;
pub use crate::scene::phase::Phase;
pub use crate::scene::report::{SceneReport, Visibility};
pub use crate::scene::scene::Scene;
pub use crate::widgets::Orientation;
pub use crate::widgets::fill::Fill;
pub use crate::widgets::image::ImageView;
pub use crate::widgets::progress::ProgressBar;
pub use crate::widgets::scroll_view::{AutoScroll, ScrollView};
pub use crate::widgets::scrollbar::Scrollbar;
