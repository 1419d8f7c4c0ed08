use std::str::FromStr;

use crate::animation::anim::Animation;
use crate::animation::ease::Ease;
use crate::animation::tween::{DEFAULT_SLIDE_DISTANCE, Direction, Tween};
use crate::foundation::error::{ComposerError, ComposerResult};

/// An animation paired with its start offset (seconds from phase start).
pub type Scheduled = (f64, Animation);

const SLIDE_IN_CYCLE: [Direction; 4] = [
    Direction::Left,
    Direction::Top,
    Direction::Right,
    Direction::Bottom,
];

const SLIDE_OUT_CYCLE: [Direction; 4] = [
    Direction::Left,
    Direction::Bottom,
    Direction::Right,
    Direction::Top,
];

/// Shared options for the bulk builders.
///
/// `ease: None` picks each builder's default (ease-out for entries, ease-in for exits).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulkOpts {
    pub start: f64,
    pub duration: f64,
    pub ease: Option<Ease>,
}

impl Default for BulkOpts {
    fn default() -> Self {
        Self {
            start: 0.0,
            duration: 1.0,
            ease: None,
        }
    }
}

/// Which bulk builder [`build_all`] runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkKind {
    SlideIn,
    SlideOut,
    FadeIn,
    FadeOut,
}

impl FromStr for BulkKind {
    type Err = ComposerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slide_in" => Ok(Self::SlideIn),
            "slide_out" => Ok(Self::SlideOut),
            "fade_in" => Ok(Self::FadeIn),
            "fade_out" => Ok(Self::FadeOut),
            other => Err(ComposerError::animation(format!(
                "unknown bulk animation `{other}` (use slide_in, slide_out, fade_in or fade_out)"
            ))),
        }
    }
}

/// Run the builder for `kind` over `ids`, auto-assigning slide directions.
pub fn build_all<S: AsRef<str>>(kind: BulkKind, ids: &[S], opts: BulkOpts) -> ComposerResult<Vec<Scheduled>> {
    match kind {
        BulkKind::SlideIn => slide_in_all(ids, opts),
        BulkKind::SlideOut => slide_out_all(ids, opts),
        BulkKind::FadeIn => fade_in_all(ids, opts),
        BulkKind::FadeOut => fade_out_all(ids, opts),
    }
}

fn with_cycle<'a, S: AsRef<str>>(
    ids: &'a [S],
    cycle: &'a [Direction; 4],
) -> impl Iterator<Item = (&'a str, Direction)> + 'a {
    ids.iter()
        .enumerate()
        .map(move |(i, id)| (id.as_ref(), cycle[i % cycle.len()]))
}

/// Slide every id in, cycling directions left, top, right, bottom.
pub fn slide_in_all<S: AsRef<str>>(ids: &[S], opts: BulkOpts) -> ComposerResult<Vec<Scheduled>> {
    slide_in_each(with_cycle(ids, &SLIDE_IN_CYCLE), opts)
}

/// Slide each `(id, direction)` pair in.
pub fn slide_in_each<'a>(
    targets: impl IntoIterator<Item = (&'a str, Direction)>,
    opts: BulkOpts,
) -> ComposerResult<Vec<Scheduled>> {
    targets
        .into_iter()
        .map(|(id, dir)| {
            let t = Tween::slide_in(id, dir, DEFAULT_SLIDE_DISTANCE, opts.duration)?
                .ease(opts.ease.unwrap_or(Ease::OutQuad));
            Ok((opts.start, t.into()))
        })
        .collect()
}

/// Slide every id out, cycling directions left, bottom, right, top.
pub fn slide_out_all<S: AsRef<str>>(ids: &[S], opts: BulkOpts) -> ComposerResult<Vec<Scheduled>> {
    slide_out_each(with_cycle(ids, &SLIDE_OUT_CYCLE), opts)
}

/// Slide each `(id, direction)` pair out.
pub fn slide_out_each<'a>(
    targets: impl IntoIterator<Item = (&'a str, Direction)>,
    opts: BulkOpts,
) -> ComposerResult<Vec<Scheduled>> {
    targets
        .into_iter()
        .map(|(id, dir)| {
            let t = Tween::slide_out(id, dir, DEFAULT_SLIDE_DISTANCE, opts.duration)?
                .ease(opts.ease.unwrap_or(Ease::InQuad));
            Ok((opts.start, t.into()))
        })
        .collect()
}

pub fn fade_in_all<S: AsRef<str>>(ids: &[S], opts: BulkOpts) -> ComposerResult<Vec<Scheduled>> {
    ids.iter()
        .map(|id| {
            let t = Tween::fade_in(id.as_ref(), opts.duration)?.ease(opts.ease.unwrap_or(Ease::OutQuad));
            Ok((opts.start, t.into()))
        })
        .collect()
}

pub fn fade_out_all<S: AsRef<str>>(ids: &[S], opts: BulkOpts) -> ComposerResult<Vec<Scheduled>> {
    ids.iter()
        .map(|id| {
            let t = Tween::fade_out(id.as_ref(), opts.duration)?.ease(opts.ease.unwrap_or(Ease::InQuad));
            Ok((opts.start, t.into()))
        })
        .collect()
}

/// Offset the i-th scheduled animation by `i * step` seconds, in list order.
pub fn stagger(mut anims: Vec<Scheduled>, step: f64) -> Vec<Scheduled> {
    for (i, (offset, _)) in anims.iter_mut().enumerate() {
        *offset += step * i as f64;
    }
    anims
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;
