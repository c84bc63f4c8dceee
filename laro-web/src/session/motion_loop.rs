//! Motion loop - one pose estimate per frame, scored against the previous pose
//!
//! All state lives behind `RefCell`s and is only touched from the browser's
//! main thread. Borrows are never held across an `.await`: every suspension
//! point is followed by an epoch check, so work started by a session that was
//! reset in the meantime is dropped instead of applied.

use std::cell::{Cell, Ref, RefCell};

use log::{debug, info, warn};
use serde::Serialize;

use super::capabilities::{CameraSource, FrameClock, PoseEstimator, ReferenceVideo};
use super::phase::{SessionEvent, SessionPhase};
use crate::config::MotionConfig;
use crate::error::{ConfigError, SessionError};
use crate::pose::{KeypointSet, PoseHistory};
use crate::renderer::{DrawingSurface, OverlayRenderer};
use crate::scoring::{MovementAward, MovementScorer, ScoreState, SimilarityScorer};

// ============================================================================
// FEEDBACK MESSAGES
// ============================================================================

pub const CAMERA_READY: &str = "📸 Camera ready! Click Start to begin!";
pub const CAMERA_DENIED: &str = "❌ Camera access denied. Please allow camera permissions.";
pub const LOADING_DETECTOR: &str = "Loading AI Model...";
pub const DETECTOR_LOADED: &str = "✅ Pose detector loaded!";
pub const DETECTOR_FAILED: &str = "⚠️ Could not load pose detector";
pub const SESSION_STARTED: &str = "💃 Dance along with the video!";

// ============================================================================
// READ MODELS
// ============================================================================

/// Per-session tick counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LoopStats {
    /// Ticks that produced a pose
    pub observed: u64,
    /// Ticks without a camera frame or without a detected pose
    pub skipped: u64,
    /// Estimator errors recovered by retrying on the next frame
    pub failures: u64,
}

/// What a single tick did
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// Session not running or paused
    Inactive,
    /// Camera had no frame yet
    NoFrame,
    /// Estimator found nobody
    NoPose,
    /// Estimator failed; retried next frame
    Failed,
    /// Session was reset while the estimate was in flight
    Discarded,
    /// Pose recorded; award present when movement cleared the noise floor
    Observed(Option<MovementAward>),
}

/// Everything the page needs to render the score panel
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub score: u64,
    pub feedback: String,
    /// Estimator model is loading
    pub loading: bool,
    pub history_len: usize,
    pub stats: LoopStats,
}

// ============================================================================
// MOTION LOOP
// ============================================================================

struct LoopState {
    phase: SessionPhase,
    /// Bumped on every start and reset; stale async work compares against it
    epoch: u64,
    loading: bool,
    history: PoseHistory,
    score: ScoreState,
    stats: LoopStats,
}

pub struct MotionLoop<C: CameraSource, E, V, S> {
    camera: C,
    estimator: E,
    video: V,
    overlay: RefCell<OverlayRenderer<S>>,
    similarity: SimilarityScorer,
    movement: MovementScorer,
    state: RefCell<LoopState>,
    /// A `run` loop is between its first tick and its exit
    looping: Cell<bool>,
}

/// Clears `looping` however the run future ends, including being dropped
struct LoopGuard<'a>(&'a Cell<bool>);

impl Drop for LoopGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<C, E, V, S> MotionLoop<C, E, V, S>
where
    C: CameraSource,
    E: PoseEstimator<Frame = C::Frame>,
    V: ReferenceVideo,
    S: DrawingSurface,
{
    pub fn new(camera: C, estimator: E, video: V, surface: S) -> Self {
        Self::build(camera, estimator, video, surface, &MotionConfig::default())
    }

    pub fn with_config(
        camera: C,
        estimator: E,
        video: V,
        surface: S,
        config: &MotionConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(camera, estimator, video, surface, config))
    }

    fn build(camera: C, estimator: E, video: V, surface: S, config: &MotionConfig) -> Self {
        Self {
            camera,
            estimator,
            video,
            overlay: RefCell::new(OverlayRenderer::from_config(surface, config)),
            similarity: SimilarityScorer::from_config(config),
            movement: MovementScorer::from_config(config),
            state: RefCell::new(LoopState {
                phase: SessionPhase::Idle,
                epoch: 0,
                loading: false,
                history: PoseHistory::with_capacity(config.history_capacity),
                score: ScoreState::new(),
                stats: LoopStats::default(),
            }),
            looping: Cell::new(false),
        }
    }

    // ------------------------------------------------------------------------
    // Session control
    // ------------------------------------------------------------------------

    /// Acquire the camera, make sure the estimator is loaded, then start the
    /// reference video. On success the session is Running and `run` may be
    /// spawned.
    pub async fn start(&self) -> Result<(), SessionError> {
        let epoch = {
            let mut state = self.state.borrow_mut();
            state.phase = state.phase.on(SessionEvent::Start)?;
            state.epoch += 1;
            state.history.reset();
            state.score.reset();
            state.stats = LoopStats::default();
            state.epoch
        };
        info!("session {}: starting", epoch);

        if !self.camera.is_live() {
            let acquired = self.camera.acquire().await;
            self.abandon_if_stale(epoch)?;

            if let Err(err) = acquired {
                return Err(self.fail_start(epoch, CAMERA_DENIED, err.into()));
            }
            self.state.borrow_mut().score.set_feedback(CAMERA_READY);
        }

        if !self.estimator.is_loaded() {
            {
                let mut state = self.state.borrow_mut();
                state.loading = true;
                state.score.set_feedback(LOADING_DETECTOR);
            }

            let loaded = self.estimator.load().await;
            self.abandon_if_stale(epoch)?;
            self.state.borrow_mut().loading = false;

            match loaded {
                Ok(()) => self.state.borrow_mut().score.set_feedback(DETECTOR_LOADED),
                Err(err) => return Err(self.fail_start(epoch, DETECTOR_FAILED, err.into())),
            }
        }

        {
            let mut state = self.state.borrow_mut();
            state.phase = state.phase.on(SessionEvent::Ready)?;
            state.score.set_feedback(SESSION_STARTED);
        }

        self.video.rewind();
        self.video.play();
        info!("session {}: running", epoch);
        Ok(())
    }

    /// Pause or resume the reference video. Pose scoring continues either way.
    pub fn toggle_pause(&self) -> Result<SessionPhase, SessionError> {
        let phase = {
            let mut state = self.state.borrow_mut();
            state.phase = state.phase.on(SessionEvent::TogglePause)?;
            state.phase
        };

        if phase == SessionPhase::Paused {
            self.video.pause();
        } else {
            self.video.play();
        }
        debug!("reference video {}", phase.name());
        Ok(phase)
    }

    /// Stop the session: no further tick can touch the score once this returns
    pub fn reset(&self) {
        let epoch = {
            let mut state = self.state.borrow_mut();
            state.phase = state.phase.on(SessionEvent::Reset).unwrap_or(SessionPhase::Idle);
            state.epoch += 1;
            state.loading = false;
            state.history.reset();
            state.score.reset();
            state.stats = LoopStats::default();
            state.epoch
        };

        self.video.pause();
        self.video.rewind();
        self.camera.release();
        self.overlay.borrow_mut().clear();
        info!("session reset (epoch {})", epoch);
    }

    // ------------------------------------------------------------------------
    // Tick loop
    // ------------------------------------------------------------------------

    /// Tick until the session is reset. Each tick finishes (including its
    /// estimate) before the next frame is awaited, and a loop left over from
    /// an earlier session is waited out before the first tick, so at most one
    /// estimate is ever in flight.
    pub async fn run<K: FrameClock + ?Sized>(&self, clock: &K) {
        let Some(epoch) = self.active_epoch() else {
            debug!("motion loop not started: session is not active");
            return;
        };

        while self.looping.get() {
            debug!("session {}: waiting for previous motion loop to exit", epoch);
            clock.next_frame().await;
            if !self.is_current(epoch) {
                return;
            }
        }
        self.looping.set(true);
        let _guard = LoopGuard(&self.looping);
        info!("session {}: motion loop started", epoch);

        loop {
            self.tick_in(epoch).await;
            if !self.is_current(epoch) {
                break;
            }

            clock.next_frame().await;
            if !self.is_current(epoch) {
                break;
            }
        }

        info!("session {}: motion loop stopped", epoch);
    }

    /// Run a single tick for the current session
    pub async fn tick(&self) -> TickOutcome {
        match self.active_epoch() {
            Some(epoch) => self.tick_in(epoch).await,
            None => TickOutcome::Inactive,
        }
    }

    async fn tick_in(&self, epoch: u64) -> TickOutcome {
        if !self.is_current(epoch) {
            return TickOutcome::Inactive;
        }

        let Some(frame) = self.camera.frame() else {
            self.state.borrow_mut().stats.skipped += 1;
            return TickOutcome::NoFrame;
        };

        let estimate = self.estimator.estimate(&frame).await;

        if !self.is_current(epoch) {
            debug!("session {}: discarding estimate that resolved after reset", epoch);
            return TickOutcome::Discarded;
        }

        let poses = match estimate {
            Ok(poses) => poses,
            Err(err) => {
                warn!("pose estimation failed, retrying next frame: {}", err);
                self.state.borrow_mut().stats.failures += 1;
                return TickOutcome::Failed;
            }
        };

        let Some(current) = poses.into_iter().next().map(|pose| pose.keypoints) else {
            self.state.borrow_mut().stats.skipped += 1;
            return TickOutcome::NoPose;
        };

        let award = self.observe(current);
        self.render_latest();
        TickOutcome::Observed(award)
    }

    /// Score `current` against the newest pose in history, then record it
    fn observe(&self, current: KeypointSet) -> Option<MovementAward> {
        let mut state = self.state.borrow_mut();

        let award = state.history.latest().and_then(|previous| {
            let similarity = self.similarity.similarity(&current, previous);
            self.movement.score(similarity)
        });

        if let Some(award) = &award {
            state.score.apply(award);
            debug!(
                "movement {:.1} -> +{} ({}), total {}",
                award.movement,
                award.points,
                award.tier.name(),
                state.score.total()
            );
        }

        state.history.push(current);
        state.stats.observed += 1;
        award
    }

    fn render_latest(&self) {
        let (width, height) = self.camera.resolution();
        let state = self.state.borrow();
        if let Some(latest) = state.history.latest() {
            self.overlay.borrow_mut().draw(latest, width, height);
        }
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn active_epoch(&self) -> Option<u64> {
        let state = self.state.borrow();
        state.phase.is_active().then_some(state.epoch)
    }

    fn is_current(&self, epoch: u64) -> bool {
        let state = self.state.borrow();
        state.epoch == epoch && state.phase.is_active()
    }

    /// Bail out of `start` if a reset happened while it was suspended
    fn abandon_if_stale(&self, epoch: u64) -> Result<(), SessionError> {
        let (stale, idle) = {
            let state = self.state.borrow();
            (state.epoch != epoch, state.phase == SessionPhase::Idle)
        };
        if !stale {
            return Ok(());
        }

        // A camera opened for the abandoned start must not outlive it
        if idle {
            self.camera.release();
        }
        info!("session {}: start abandoned after reset", epoch);
        Err(SessionError::Cancelled)
    }

    fn fail_start(&self, epoch: u64, message: &str, err: SessionError) -> SessionError {
        {
            let mut state = self.state.borrow_mut();
            state.phase = state
                .phase
                .on(SessionEvent::AcquisitionFailed)
                .unwrap_or(SessionPhase::Idle);
            state.loading = false;
            state.score.set_feedback(message);
        }

        self.camera.release();
        warn!("session {}: start failed: {}", epoch, err);
        err
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.borrow();
        SessionSnapshot {
            phase: state.phase,
            score: state.score.total(),
            feedback: state.score.feedback().to_string(),
            loading: state.loading,
            history_len: state.history.len(),
            stats: state.stats,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.borrow().phase
    }

    pub fn score(&self) -> u64 {
        self.state.borrow().score.total()
    }

    pub fn feedback(&self) -> String {
        self.state.borrow().score.feedback().to_string()
    }

    /// Newest pose in the history
    pub fn latest_pose(&self) -> Option<KeypointSet> {
        self.state.borrow().history.latest().cloned()
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    pub fn video(&self) -> &V {
        &self.video
    }

    pub fn surface(&self) -> Ref<'_, S> {
        Ref::map(self.overlay.borrow(), |overlay| overlay.surface())
    }
}

impl<C: CameraSource, E, V, S> Drop for MotionLoop<C, E, V, S> {
    fn drop(&mut self) {
        self.camera.release();
    }
}
