//! # Clock Face Controller
//!
//! Owns the mode state machine and the one repeating redraw task.
//!
//! ```text
//!            show_analog            show_digital
//!   Idle ───────────────▶ Analog ◀──────────────▶ Digital
//!     ▲                     │                        │
//!     └──────── stop ───────┴────────────────────────┘
//! ```
//!
//! ## Tick ownership
//! A face runs as a tokio task that redraws on a fixed interval. The task
//! handle lives in the controller state; replacing or dropping it aborts the
//! task. Each task also carries a generation number and re-checks it under
//! the surface lock before drawing, so a task that was already mid-poll when
//! it got cancelled still cannot paint over the new face.
//!
//! ## Seconds blinker
//! The digital task lights the seconds dots with each frame, then sleeps for
//! the blink delay and paints them dark. Both steps run inside the same task,
//! so cancelling the face also cancels a pending blink.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::clock::TimeSource;
use crate::config::ClockConfig;
use crate::surface::{Surface, FACE_AREA};
use crate::{analog, digital, ClockError, ClockReading, DisplayMode};

/// Redraw timing for the running face.
///
/// Always holds a non-zero tick and a blink delay shorter than the tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    tick: Duration,
    blink: Duration,
}

impl Timing {
    pub fn new(tick: Duration, blink: Duration) -> Result<Self, ClockError> {
        if tick.is_zero() || blink >= tick {
            return Err(ClockError::InvalidTiming { tick, blink });
        }
        Ok(Self { tick, blink })
    }

    /// Redraw period.
    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Delay after a digital frame before the seconds dots go dark.
    pub fn blink(&self) -> Duration {
        self.blink
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            blink: Duration::from_millis(500),
        }
    }
}

impl TryFrom<&ClockConfig> for Timing {
    type Error = ClockError;

    fn try_from(config: &ClockConfig) -> Result<Self, Self::Error> {
        Self::new(config.tick(), config.blink())
    }
}

/// Which mode triggers the host should offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeButtons {
    pub analog_enabled: bool,
    pub digital_enabled: bool,
}

/// Progress report published after every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInfo {
    /// Frames drawn since the controller was created
    pub count: u64,
    pub mode: DisplayMode,
    /// Time shown by the latest frame
    pub reading: Option<ClockReading>,
}

/// Draw one complete frame for `mode`.
///
/// `Idle` only clears the face area.
pub fn render_frame<S: Surface>(
    surface: &mut S,
    mode: DisplayMode,
    reading: ClockReading,
) -> Result<(), ClockError> {
    match mode {
        DisplayMode::Idle => {
            surface.clear(FACE_AREA);
            Ok(())
        }
        DisplayMode::Analog => {
            analog::render_face(surface, reading);
            Ok(())
        }
        DisplayMode::Digital => digital::render_face(surface, reading),
    }
}

/// Handle to a running redraw task. Dropping it cancels the task.
#[derive(Debug)]
struct TickTask {
    handle: JoinHandle<()>,
    mode: DisplayMode,
    generation: u64,
}

impl TickTask {
    fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for TickTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Mode and timer owned by one controller.
#[derive(Debug, Default)]
struct ClockFaceState {
    mode: DisplayMode,
    task: Option<TickTask>,
}

/// Everything a redraw task needs, cloned out of the controller.
struct FaceJob<S, T: ?Sized> {
    mode: DisplayMode,
    generation: u64,
    active: Arc<AtomicU64>,
    surface: Arc<Mutex<S>>,
    time: Arc<T>,
    timing: Timing,
    frames: Arc<watch::Sender<FrameInfo>>,
}

impl<S, T> FaceJob<S, T>
where
    S: Surface,
    T: TimeSource + ?Sized,
{
    /// Run `draw` under the surface lock if this job is still the active one.
    /// Returns `Ok(false)` once the job has been superseded.
    fn paint<F>(&self, draw: F) -> Result<bool, ClockError>
    where
        F: FnOnce(&mut S) -> Result<(), ClockError>,
    {
        let mut surface = self
            .surface
            .lock()
            .map_err(|_| ClockError::SurfaceUnavailable)?;
        if self.active.load(Ordering::Acquire) != self.generation {
            return Ok(false);
        }
        draw(&mut surface)?;
        Ok(true)
    }

    async fn run(self) {
        let mut ticker = interval(self.timing.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let reading = self.time.reading();

            match self.paint(|s| render_frame(s, self.mode, reading)) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    error!(mode = %self.mode, error = %e, "frame failed, stopping face");
                    break;
                }
            }
            self.frames.send_modify(|info| {
                info.count += 1;
                info.mode = self.mode;
                info.reading = Some(reading);
            });
            debug!(
                mode = %self.mode,
                hour = reading.hour,
                minute = reading.minute,
                second = reading.second,
                "frame drawn"
            );

            if self.mode == DisplayMode::Digital {
                sleep(self.timing.blink).await;
                let dimmed = self.paint(|s| {
                    digital::draw_blinker(s, false);
                    Ok(())
                });
                match dimmed {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => {
                        error!(error = %e, "blinker failed, stopping face");
                        break;
                    }
                }
            }
        }
        debug!(mode = %self.mode, generation = self.generation, "face task finished");
    }
}

/// Runs one clock face at a time on a shared surface.
///
/// Mode switches spawn tokio tasks, so they must be called from inside a
/// tokio runtime.
pub struct ClockFaceController<S, T: ?Sized> {
    state: ClockFaceState,
    surface: Arc<Mutex<S>>,
    time: Arc<T>,
    timing: Timing,
    generation: Arc<AtomicU64>,
    frames: Arc<watch::Sender<FrameInfo>>,
}

impl<S, T> ClockFaceController<S, T>
where
    S: Surface + Send + 'static,
    T: TimeSource + ?Sized + 'static,
{
    pub fn new(surface: S, time: Arc<T>, timing: Timing) -> Self {
        let (frames, _) = watch::channel(FrameInfo::default());
        Self {
            state: ClockFaceState::default(),
            surface: Arc::new(Mutex::new(surface)),
            time,
            timing,
            generation: Arc::new(AtomicU64::new(0)),
            frames: Arc::new(frames),
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.state.mode
    }

    /// The trigger for the face on screen is disabled, the other enabled.
    pub fn mode_buttons(&self) -> ModeButtons {
        ModeButtons {
            analog_enabled: self.state.mode != DisplayMode::Analog,
            digital_enabled: self.state.mode != DisplayMode::Digital,
        }
    }

    /// Number of redraw tasks still running: 0 or 1.
    pub fn active_timers(&self) -> usize {
        self.state
            .task
            .as_ref()
            .map_or(0, |task| usize::from(task.is_running()))
    }

    /// Shared handle to the drawing surface.
    pub fn surface(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.surface)
    }

    /// Subscribe to per-frame progress.
    pub fn frames(&self) -> watch::Receiver<FrameInfo> {
        self.frames.subscribe()
    }

    /// Reading shown by the latest frame, if any frame has been drawn.
    pub fn last_reading(&self) -> Option<ClockReading> {
        self.frames.borrow().reading
    }

    pub fn show_analog(&mut self) {
        self.switch_to(DisplayMode::Analog);
    }

    pub fn show_digital(&mut self) {
        self.switch_to(DisplayMode::Digital);
    }

    /// Cancel the running face and go idle. The surface keeps its last frame.
    pub fn stop(&mut self) {
        self.switch_to(DisplayMode::Idle);
    }

    fn switch_to(&mut self, mode: DisplayMode) {
        let running = self.active_timers() == 1;
        if mode == self.state.mode && (running || mode == DisplayMode::Idle) {
            return;
        }

        // Retire the old generation before its handle goes away, so no
        // in-flight frame from it can reach the surface afterwards.
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        if let Some(old) = self.state.task.take() {
            debug!(mode = %old.mode, generation = old.generation, "cancelling face task");
            drop(old);
        }
        info!(from = %self.state.mode, to = %mode, "switching clock face");
        self.state.mode = mode;

        if mode == DisplayMode::Idle {
            return;
        }

        let job = FaceJob {
            mode,
            generation,
            active: Arc::clone(&self.generation),
            surface: Arc::clone(&self.surface),
            time: Arc::clone(&self.time),
            timing: self.timing,
            frames: Arc::clone(&self.frames),
        };
        let handle = tokio::spawn(job.run());
        self.state.task = Some(TickTask {
            handle,
            mode,
            generation,
        });
    }
}
