use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::driver::config::{LoopConfig, Pacing};
use crate::driver::input::{Command, InputQueue};
use crate::encode::sink::DisplaySink;
use crate::foundation::error::{ComposerError, ComposerResult};
use crate::node::component::{Component, RenderCtx};
use crate::render::buffer::PixelBuffer;
use crate::scene::phase::Phase;
use crate::scene::scene::Scene;

/// Cooperative cancellation flag shared with other threads.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear the flag so the loop can run again.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Counters for one call to [`Orchestrator::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunStats {
    /// Frames presented to the sink.
    pub frames: u64,
    /// Frames whose render and present took longer than the frame interval.
    pub overruns: u64,
    /// Global clock advance over the run, in seconds.
    pub elapsed: f64,
}

struct SceneEntry {
    id: String,
    scene: Scene,
}

/// Top-level driver: a registry of scenes, an active scene with its local clock, and the
/// paced render loop that feeds a [`DisplaySink`].
pub struct Orchestrator {
    config: LoopConfig,
    scenes: Vec<SceneEntry>,
    active: Option<usize>,
    pending: Option<usize>,
    entered_at: f64,
    time: f64,
    completed: Option<Phase>,
    ctx: RenderCtx,
    input: InputQueue,
    stop: StopHandle,
}

impl Orchestrator {
    pub fn new(config: LoopConfig) -> ComposerResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            scenes: Vec::new(),
            active: None,
            pending: None,
            entered_at: 0.0,
            time: 0.0,
            completed: None,
            ctx: RenderCtx {
                debug_focus: config.debug_focus,
            },
            input: InputQueue::new(),
            stop: StopHandle::new(),
        })
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Register a scene. Its size must match the canvas and its id must be new.
    pub fn add_scene(&mut self, id: impl Into<String>, scene: Scene) -> ComposerResult<()> {
        let id = id.into();
        if scene.width() != self.config.width || scene.height() != self.config.height {
            return Err(ComposerError::validation(format!(
                "scene '{id}' is {}x{}, canvas is {}x{}",
                scene.width(),
                scene.height(),
                self.config.width,
                self.config.height
            )));
        }
        if self.index_of(&id).is_some() {
            return Err(ComposerError::scene(format!("scene '{id}' already registered")));
        }
        tracing::debug!(scene = %id, "scene registered");
        self.scenes.push(SceneEntry { id, scene });
        Ok(())
    }

    pub fn scene_ids(&self) -> impl Iterator<Item = &str> {
        self.scenes.iter().map(|e| e.id.as_str())
    }

    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.index_of(id).map(|i| &self.scenes[i].scene)
    }

    pub fn scene_mut(&mut self, id: &str) -> Option<&mut Scene> {
        let i = self.index_of(id)?;
        Some(&mut self.scenes[i].scene)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.map(|i| self.scenes[i].id.as_str())
    }

    pub fn active_scene(&self) -> Option<&Scene> {
        self.active.map(|i| &self.scenes[i].scene)
    }

    pub fn active_scene_mut(&mut self) -> Option<&mut Scene> {
        let i = self.active?;
        Some(&mut self.scenes[i].scene)
    }

    /// Scene waiting for the active scene's exit phase to finish.
    pub fn pending_id(&self) -> Option<&str> {
        self.pending.map(|i| self.scenes[i].id.as_str())
    }

    /// Global clock, in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Local clock of the active scene.
    pub fn scene_time(&self) -> f64 {
        (self.time - self.entered_at).max(0.0)
    }

    pub fn debug_focus(&self) -> bool {
        self.ctx.debug_focus
    }

    pub fn set_debug_focus(&mut self, on: bool) {
        self.ctx.debug_focus = on;
    }

    pub fn input(&self) -> &InputQueue {
        &self.input
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Switch to `id`.
    ///
    /// The outgoing scene enters its exit phase. When that phase has animations the switch
    /// happens once they complete; otherwise it is immediate.
    pub fn transition_to(&mut self, id: &str) -> ComposerResult<()> {
        let Some(next) = self.index_of(id) else {
            return Err(ComposerError::scene(format!("scene '{id}' not found")));
        };
        let Some(current) = self.active else {
            self.enter(next);
            return Ok(());
        };
        if self.pending.is_some() {
            self.pending = Some(next);
            return Ok(());
        }

        let local = self.scene_time();
        let scene = &mut self.scenes[current].scene;
        scene.set_time(local);
        scene.on_exit();
        if scene.phases().has_animations(&Phase::Exit) {
            tracing::info!(from = %self.scenes[current].id, to = %id, "waiting for exit phase");
            self.pending = Some(next);
        } else {
            self.enter(next);
        }
        Ok(())
    }

    fn enter(&mut self, idx: usize) {
        let from = self.active.map(|i| self.scenes[i].id.clone());
        self.active = Some(idx);
        self.pending = None;
        self.entered_at = self.time;
        let entry = &mut self.scenes[idx];
        entry.scene.reset();
        entry.scene.on_enter();
        tracing::info!(from = ?from, to = %entry.id, at = self.time, "scene entered");
        entry.scene.log_report();
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.scenes.iter().position(|e| e.id == id)
    }

    /// Apply one input command. Returns whether it changed anything.
    pub fn handle_command(&mut self, cmd: Command) -> bool {
        if let Some((dx, dy)) = cmd.scroll_delta() {
            return self
                .active_scene_mut()
                .is_some_and(|s| s.scroll_focused(dx, dy));
        }
        match cmd {
            Command::FocusNext => self.active_scene_mut().is_some_and(Scene::focus_next),
            Command::FocusPrevious => self.active_scene_mut().is_some_and(Scene::focus_previous),
            Command::ToggleDebug => {
                self.ctx.debug_focus = !self.ctx.debug_focus;
                tracing::debug!(debug_focus = self.ctx.debug_focus, "toggled focus outline");
                true
            }
            Command::NextScene => {
                let Some(base) = self.pending.or(self.active) else {
                    return false;
                };
                let next = (base + 1) % self.scenes.len();
                let id = self.scenes[next].id.clone();
                match self.transition_to(&id) {
                    Ok(()) => true,
                    Err(err) => {
                        tracing::warn!(error = %err, "scene switch failed");
                        false
                    }
                }
            }
            Command::Quit => {
                self.stop.stop();
                true
            }
            Command::Up | Command::Down | Command::Left | Command::Right => false,
        }
    }

    /// Advance the global clock to `now`, apply queued input and render the active scene.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn tick(&mut self, now: f64) -> Arc<PixelBuffer> {
        self.time = now;
        for cmd in self.input.drain() {
            self.handle_command(cmd);
        }
        self.frame()
    }

    /// Render one frame at global time `t` out of band: no input, no sink, no sleep.
    pub fn render_frame(&mut self, t: f64) -> Arc<PixelBuffer> {
        self.time = t;
        self.frame()
    }

    /// Phase that reported completion on the latest frame, before any automatic transition.
    pub fn completed_phase(&self) -> Option<&Phase> {
        self.completed.as_ref()
    }

    fn frame(&mut self) -> Arc<PixelBuffer> {
        let Some(mut idx) = self.active else {
            self.completed = None;
            return Arc::new(PixelBuffer::blank(self.config.width, self.config.height));
        };

        let local = self.scene_time();
        let scene = &mut self.scenes[idx].scene;
        scene.set_time(local);
        self.completed = if scene.phase_complete() {
            scene.current_phase().cloned()
        } else {
            None
        };

        match self.pending {
            Some(next) if self.completed.is_some() => {
                self.enter(next);
                idx = next;
            }
            Some(_) => {}
            None => {
                self.scenes[idx].scene.drive_phases();
            }
        }

        let local = self.scene_time();
        self.scenes[idx].scene.render(local, &self.ctx)
    }

    /// Drive `sink` until stopped, or for `duration` seconds of global time when given.
    ///
    /// The sink is opened and closed around the loop, including when a frame fails.
    pub fn run(&mut self, sink: &mut dyn DisplaySink, duration: Option<f64>) -> ComposerResult<RunStats> {
        sink.begin(self.config.sink_config())?;
        match self.run_loop(sink, duration, |_| false) {
            Ok((stats, _)) => {
                sink.end()?;
                tracing::info!(frames = stats.frames, overruns = stats.overruns, "render loop finished");
                Ok(stats)
            }
            Err(err) => {
                if let Err(end_err) = sink.end() {
                    tracing::warn!(error = %end_err, "sink shutdown failed");
                }
                Err(err)
            }
        }
    }

    /// Keep presenting frames to an already opened sink until the active scene completes
    /// `phase`. Returns `false` when `timeout` of global time passes first or the loop is
    /// stopped.
    pub fn run_until_phase_complete(
        &mut self,
        sink: &mut dyn DisplaySink,
        phase: impl Into<Phase>,
        timeout: Duration,
    ) -> ComposerResult<bool> {
        let phase = phase.into();
        let (_, reached) = self.run_loop(sink, Some(timeout.as_secs_f64()), |o| {
            o.completed_phase() == Some(&phase)
        })?;
        if !reached {
            tracing::warn!(phase = %phase, ?timeout, "timed out waiting for phase");
        }
        Ok(reached)
    }

    /// Like [`run_until_phase_complete`](Self::run_until_phase_complete), but once `phase` is
    /// current and contains a loop, return after one cycle of that loop instead of waiting for a
    /// completion that endless loops never reach.
    pub fn run_until_one_cycle(
        &mut self,
        sink: &mut dyn DisplaySink,
        phase: impl Into<Phase>,
        timeout: Duration,
    ) -> ComposerResult<bool> {
        let phase = phase.into();
        let mut watch: Option<(f64, Option<f64>)> = None;
        let (_, reached) = self.run_loop(sink, Some(timeout.as_secs_f64()), |o| {
            if o.completed_phase() == Some(&phase) {
                return true;
            }
            let Some(scene) = o.active_scene().filter(|s| s.current_phase() == Some(&phase)) else {
                return false;
            };
            let (seen_at, cycle) = *watch.get_or_insert_with(|| {
                let cycle = scene.loop_cycle();
                tracing::debug!(phase = %phase, ?cycle, "waiting for one cycle");
                (o.time(), cycle)
            });
            cycle.is_some_and(|c| o.time() - seen_at >= c)
        })?;
        if !reached {
            tracing::warn!(phase = %phase, ?timeout, "timed out waiting for one cycle");
        }
        Ok(reached)
    }

    fn run_loop(
        &mut self,
        sink: &mut dyn DisplaySink,
        limit: Option<f64>,
        mut done: impl FnMut(&Self) -> bool,
    ) -> ComposerResult<(RunStats, bool)> {
        let interval = self.config.frame_duration();
        let step = interval.as_secs_f64();
        let base = self.time;
        let started = Instant::now();
        let mut stats = RunStats::default();
        let mut reached = false;

        while !self.stop.is_stopped() {
            let frame_start = Instant::now();
            let now = match self.config.pacing {
                Pacing::Realtime => base + started.elapsed().as_secs_f64(),
                Pacing::FixedStep => base + stats.frames as f64 * step,
            };
            if limit.is_some_and(|l| now - base >= l) {
                break;
            }

            let pixels = self.tick(now);
            sink.present(&pixels)?;
            stats.frames += 1;
            if done(self) {
                reached = true;
                break;
            }

            let spent = frame_start.elapsed();
            if spent > interval {
                stats.overruns += 1;
                tracing::trace!(?spent, "frame overran its budget");
            } else if self.config.pacing == Pacing::Realtime {
                std::thread::sleep(interval - spent);
            }
        }

        stats.elapsed = self.time - base;
        Ok((stats, reached))
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config", &self.config)
            .field("scenes", &self.scenes.iter().map(|e| &e.id).collect::<Vec<_>>())
            .field("active", &self.active_id())
            .field("pending", &self.pending_id())
            .field("time", &self.time)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/orchestrator.rs"]
mod tests;
