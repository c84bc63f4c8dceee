//! Motion loop driven end to end with scripted collaborators

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::{mpsc, oneshot};
use futures::executor::{block_on, LocalPool};
use futures::lock::Mutex;
use futures::task::LocalSpawnExt;
use futures::StreamExt;

use laro_web::error::{CameraError, EstimatorError, SessionError};
use laro_web::pose::{Keypoint, KeypointSet, PoseResult, KEYPOINT_COUNT};
use laro_web::renderer::DrawingSurface;
use laro_web::session::{
    CameraSource, FrameClock, MotionLoop, PoseEstimator, ReferenceVideo, SessionEvent,
    SessionPhase, TickOutcome, CAMERA_DENIED, DETECTOR_FAILED, LOADING_DETECTOR, SESSION_STARTED,
};
use laro_web::scoring::FeedbackTier;

// ============================================================================
// FAKES
// ============================================================================

struct FakeCamera {
    deny: bool,
    live: Cell<bool>,
    has_frames: Cell<bool>,
    frames: Cell<u64>,
    acquisitions: Cell<u32>,
    /// Shared so it can be read after the loop owning the camera is dropped
    releases: Rc<Cell<u32>>,
    /// Streams opened and not yet stopped
    open_streams: Cell<u32>,
    acquire_gates: RefCell<VecDeque<oneshot::Receiver<()>>>,
    resolution: (u32, u32),
}

impl FakeCamera {
    fn new() -> Self {
        Self {
            deny: false,
            live: Cell::new(false),
            has_frames: Cell::new(true),
            frames: Cell::new(0),
            acquisitions: Cell::new(0),
            releases: Rc::new(Cell::new(0)),
            open_streams: Cell::new(0),
            acquire_gates: RefCell::new(VecDeque::new()),
            resolution: (640, 480),
        }
    }

    /// The next acquisition suspends until the returned sender fires
    fn hold_acquire(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.acquire_gates.borrow_mut().push_back(rx);
        tx
    }

    fn denied() -> Self {
        Self {
            deny: true,
            ..Self::new()
        }
    }
}

#[async_trait(?Send)]
impl CameraSource for FakeCamera {
    type Frame = u64;

    async fn acquire(&self) -> Result<(), CameraError> {
        self.acquisitions.set(self.acquisitions.get() + 1);
        let gate = self.acquire_gates.borrow_mut().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if self.deny {
            return Err(CameraError::PermissionDenied("NotAllowedError".into()));
        }

        // A newer stream replaces and stops the one already held
        if self.live.get() {
            self.open_streams.set(self.open_streams.get() - 1);
        }
        self.open_streams.set(self.open_streams.get() + 1);
        self.live.set(true);
        Ok(())
    }

    fn is_live(&self) -> bool {
        self.live.get()
    }

    fn frame(&self) -> Option<u64> {
        if !self.live.get() || !self.has_frames.get() {
            return None;
        }
        self.frames.set(self.frames.get() + 1);
        Some(self.frames.get())
    }

    fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    fn release(&self) {
        if self.live.replace(false) {
            self.open_streams.set(self.open_streams.get() - 1);
            self.releases.set(self.releases.get() + 1);
        }
    }
}

#[derive(Default)]
struct ScriptedEstimator {
    results: RefCell<VecDeque<Result<Vec<PoseResult>, EstimatorError>>>,
    estimate_gate: RefCell<Option<oneshot::Receiver<()>>>,
    load_gate: RefCell<Option<oneshot::Receiver<()>>>,
    load_error: Option<EstimatorError>,
    loaded: Cell<bool>,
    calls: Cell<u32>,
    in_flight: Cell<u32>,
    max_in_flight: Cell<u32>,
}

impl ScriptedEstimator {
    fn with_poses(poses: impl IntoIterator<Item = PoseResult>) -> Self {
        let estimator = Self::default();
        for pose in poses {
            estimator.push(Ok(vec![pose]));
        }
        estimator
    }

    fn failing_load() -> Self {
        Self {
            load_error: Some(EstimatorError::Load("model fetch failed".into())),
            ..Self::default()
        }
    }

    fn push(&self, result: Result<Vec<PoseResult>, EstimatorError>) {
        self.results.borrow_mut().push_back(result);
    }

    /// The next estimate suspends until the returned sender fires
    fn hold_next_estimate(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.estimate_gate.borrow_mut() = Some(rx);
        tx
    }

    fn hold_load(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.load_gate.borrow_mut() = Some(rx);
        tx
    }
}

#[async_trait(?Send)]
impl PoseEstimator for ScriptedEstimator {
    type Frame = u64;

    fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    async fn load(&self) -> Result<(), EstimatorError> {
        let gate = self.load_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        match &self.load_error {
            Some(err) => Err(err.clone()),
            None => {
                self.loaded.set(true);
                Ok(())
            }
        }
    }

    async fn estimate(&self, _frame: &u64) -> Result<Vec<PoseResult>, EstimatorError> {
        self.calls.set(self.calls.get() + 1);
        self.in_flight.set(self.in_flight.get() + 1);
        self.max_in_flight
            .set(self.max_in_flight.get().max(self.in_flight.get()));

        let gate = self.estimate_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        self.in_flight.set(self.in_flight.get() - 1);
        self.results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[derive(Default)]
struct FakeVideo {
    calls: RefCell<Vec<&'static str>>,
}

impl FakeVideo {
    fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }
}

impl ReferenceVideo for FakeVideo {
    fn play(&self) {
        self.calls.borrow_mut().push("play");
    }

    fn pause(&self) {
        self.calls.borrow_mut().push("pause");
    }

    fn rewind(&self) {
        self.calls.borrow_mut().push("rewind");
    }
}

/// Keeps only what is currently visible
#[derive(Default)]
struct RecordingSurface {
    size: Option<(u32, u32)>,
    markers: Vec<(f32, f32)>,
    clears: usize,
}

impl DrawingSurface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = Some((width, height));
    }

    fn clear(&mut self) {
        self.markers.clear();
        self.clears += 1;
    }

    fn fill_circle(&mut self, x: f32, y: f32, _radius: f32, _color: [f32; 4]) {
        self.markers.push((x, y));
    }
}

/// Frame clock advanced by hand
struct ManualClock {
    ticks: Mutex<mpsc::UnboundedReceiver<()>>,
}

impl ManualClock {
    fn new() -> (Self, mpsc::UnboundedSender<()>) {
        let (tx, rx) = mpsc::unbounded();
        (
            Self {
                ticks: Mutex::new(rx),
            },
            tx,
        )
    }
}

#[async_trait(?Send)]
impl FrameClock for ManualClock {
    async fn next_frame(&self) {
        let mut ticks = self.ticks.lock().await;
        let _ = ticks.next().await;
    }
}

type TestLoop = MotionLoop<FakeCamera, ScriptedEstimator, FakeVideo, RecordingSurface>;

// ============================================================================
// HELPERS
// ============================================================================

/// Full-confidence pose with every keypoint shifted right by `dx` pixels
fn pose(dx: f32) -> PoseResult {
    let keypoints: KeypointSet = (0..KEYPOINT_COUNT)
        .map(|i| Keypoint::new(100.0 + i as f32 * 10.0 + dx, 200.0, 0.9))
        .collect();
    PoseResult::new(keypoints)
}

fn motion_loop(camera: FakeCamera, estimator: ScriptedEstimator) -> TestLoop {
    MotionLoop::new(camera, estimator, FakeVideo::default(), RecordingSurface::default())
}

fn started(estimator: ScriptedEstimator) -> TestLoop {
    let session = motion_loop(FakeCamera::new(), estimator);
    block_on(session.start()).unwrap();
    session
}

// ============================================================================
// SCORING
// ============================================================================

#[test]
fn scores_movement_between_consecutive_poses() {
    let session = started(ScriptedEstimator::with_poses([pose(0.0), pose(100.0)]));
    assert_eq!(session.phase(), SessionPhase::Running);
    assert_eq!(session.feedback(), SESSION_STARTED);
    assert_eq!(session.video().calls(), vec!["rewind", "play"]);

    // First pose has nothing to compare against
    assert_eq!(block_on(session.tick()), TickOutcome::Observed(None));
    assert_eq!(session.score(), 0);

    // 100px average displacement: similarity 50, movement 50
    let TickOutcome::Observed(Some(award)) = block_on(session.tick()) else {
        panic!("expected an award");
    };
    assert_eq!(award.points, 25);
    assert_eq!(award.tier, FeedbackTier::High);
    assert_eq!(session.score(), 25);
    assert_eq!(session.feedback(), "🔥 Amazing moves! +25 points!");
    assert_eq!(session.snapshot().history_len, 2);
}

#[test]
fn holding_still_earns_nothing() {
    let session = started(ScriptedEstimator::with_poses([pose(0.0), pose(2.0)]));
    block_on(session.tick());
    assert_eq!(block_on(session.tick()), TickOutcome::Observed(None));
    assert_eq!(session.score(), 0);
    assert_eq!(session.feedback(), SESSION_STARTED);
}

#[test]
fn small_movement_lands_in_lowest_tier() {
    // 12px average: similarity 94, movement 6
    let session = started(ScriptedEstimator::with_poses([pose(0.0), pose(12.0)]));
    block_on(session.tick());
    block_on(session.tick());
    assert_eq!(session.score(), 3);
    assert_eq!(session.feedback(), "💃 Keep moving! +3 points");
}

#[test]
fn paused_session_keeps_scoring() {
    let session = started(ScriptedEstimator::with_poses([pose(0.0), pose(100.0)]));
    block_on(session.tick());

    assert_eq!(session.toggle_pause(), Ok(SessionPhase::Paused));
    assert_eq!(session.video().calls().last(), Some(&"pause"));

    block_on(session.tick());
    assert_eq!(session.score(), 25);

    assert_eq!(session.toggle_pause(), Ok(SessionPhase::Running));
    assert_eq!(session.video().calls().last(), Some(&"play"));
}

#[test]
fn no_pose_is_skipped() {
    let estimator = ScriptedEstimator::default();
    estimator.push(Ok(Vec::new()));
    let session = started(estimator);

    assert_eq!(block_on(session.tick()), TickOutcome::NoPose);
    assert_eq!(session.snapshot().stats.skipped, 1);
    assert_eq!(session.snapshot().history_len, 0);
}

#[test]
fn missing_frame_skips_estimation() {
    let session = started(ScriptedEstimator::default());
    session.camera().has_frames.set(false);

    assert_eq!(block_on(session.tick()), TickOutcome::NoFrame);
    assert_eq!(session.estimator().calls.get(), 0);
}

#[test]
fn only_first_detected_pose_counts() {
    let estimator = ScriptedEstimator::default();
    estimator.push(Ok(vec![pose(0.0)]));
    estimator.push(Ok(vec![pose(0.0), pose(300.0)]));
    let session = started(estimator);

    block_on(session.tick());
    block_on(session.tick());
    assert_eq!(session.score(), 0);
}

#[test]
fn estimator_failure_is_retried_next_frame() {
    let estimator = ScriptedEstimator::default();
    estimator.push(Err(EstimatorError::Estimate("WebGL context lost".into())));
    estimator.push(Ok(vec![pose(0.0)]));
    let session = started(estimator);

    assert_eq!(block_on(session.tick()), TickOutcome::Failed);
    assert_eq!(session.phase(), SessionPhase::Running);
    assert_eq!(block_on(session.tick()), TickOutcome::Observed(None));

    let stats = session.snapshot().stats;
    assert_eq!(stats.failures, 1);
    assert_eq!(stats.observed, 1);
}

#[test]
fn idle_session_does_not_tick() {
    let session = motion_loop(FakeCamera::new(), ScriptedEstimator::with_poses([pose(0.0)]));
    assert_eq!(block_on(session.tick()), TickOutcome::Inactive);
    assert_eq!(session.estimator().calls.get(), 0);
}

// ============================================================================
// OVERLAY
// ============================================================================

#[test]
fn overlay_draws_confident_keypoints_at_camera_resolution() {
    let camera = FakeCamera {
        resolution: (1280, 720),
        ..FakeCamera::new()
    };
    let keypoints: KeypointSet = vec![
        Keypoint::new(10.0, 10.0, 0.9),
        Keypoint::new(20.0, 20.0, 0.2),
        Keypoint::new(30.0, 30.0, 0.3),
        Keypoint::new(40.0, 40.0, 0.5),
    ]
    .into();
    let estimator = ScriptedEstimator::with_poses([PoseResult::from(keypoints)]);
    let session = motion_loop(camera, estimator);
    block_on(session.start()).unwrap();
    block_on(session.tick());

    let surface = session.surface();
    assert_eq!(surface.size, Some((1280, 720)));
    assert_eq!(surface.markers, vec![(10.0, 10.0), (40.0, 40.0)]);
}

// ============================================================================
// LIFECYCLE
// ============================================================================

#[test]
fn denied_camera_returns_to_idle() {
    let session = motion_loop(FakeCamera::denied(), ScriptedEstimator::default());

    let result = block_on(session.start());
    assert!(matches!(
        result,
        Err(SessionError::Camera(CameraError::PermissionDenied(_)))
    ));
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert_eq!(session.feedback(), CAMERA_DENIED);
    assert!(session.video().calls().is_empty());
    assert!(!session.estimator().is_loaded());
}

#[test]
fn failed_model_load_releases_camera() {
    let session = motion_loop(FakeCamera::new(), ScriptedEstimator::failing_load());

    let result = block_on(session.start());
    assert!(matches!(result, Err(SessionError::Estimator(EstimatorError::Load(_)))));
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert_eq!(session.feedback(), DETECTOR_FAILED);
    assert!(!session.snapshot().loading);
    assert!(!session.camera().is_live());
    assert_eq!(session.camera().releases.get(), 1);
}

#[test]
fn loading_is_visible_while_model_loads() {
    let mut pool = LocalPool::new();
    let session = Rc::new(motion_loop(FakeCamera::new(), ScriptedEstimator::default()));
    let release = session.estimator().hold_load();

    let starting = Rc::clone(&session);
    pool.spawner()
        .spawn_local(async move {
            starting.start().await.unwrap();
        })
        .unwrap();
    pool.run_until_stalled();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase, SessionPhase::Starting);
    assert!(snapshot.loading);
    assert_eq!(snapshot.feedback, LOADING_DETECTOR);

    release.send(()).unwrap();
    pool.run_until_stalled();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase, SessionPhase::Running);
    assert!(!snapshot.loading);
}

#[test]
fn reset_during_start_cancels_it() {
    let mut pool = LocalPool::new();
    let session = Rc::new(motion_loop(FakeCamera::new(), ScriptedEstimator::default()));
    let release = session.estimator().hold_load();
    let outcome = Rc::new(RefCell::new(None));

    let starting = Rc::clone(&session);
    let result = Rc::clone(&outcome);
    pool.spawner()
        .spawn_local(async move {
            *result.borrow_mut() = Some(starting.start().await);
        })
        .unwrap();
    pool.run_until_stalled();

    session.reset();
    release.send(()).unwrap();
    pool.run_until_stalled();

    assert_eq!(*outcome.borrow(), Some(Err(SessionError::Cancelled)));
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(!session.camera().is_live());
    assert!(!session.video().calls().contains(&"play"));
}

#[test]
fn restart_during_pending_acquire_keeps_one_stream_open() {
    let mut pool = LocalPool::new();
    let session = Rc::new(motion_loop(FakeCamera::new(), ScriptedEstimator::default()));
    let first_acquire = session.camera().hold_acquire();
    let second_acquire = session.camera().hold_acquire();
    let first = Rc::new(RefCell::new(None));
    let second = Rc::new(RefCell::new(None));

    let starting = Rc::clone(&session);
    let result = Rc::clone(&first);
    pool.spawner()
        .spawn_local(async move {
            *result.borrow_mut() = Some(starting.start().await);
        })
        .unwrap();
    pool.run_until_stalled();

    session.reset();

    let starting = Rc::clone(&session);
    let result = Rc::clone(&second);
    pool.spawner()
        .spawn_local(async move {
            *result.borrow_mut() = Some(starting.start().await);
        })
        .unwrap();
    pool.run_until_stalled();

    // The abandoned request resolves first, while the new start is pending
    first_acquire.send(()).unwrap();
    pool.run_until_stalled();
    assert_eq!(*first.borrow(), Some(Err(SessionError::Cancelled)));
    assert_eq!(session.phase(), SessionPhase::Starting);

    second_acquire.send(()).unwrap();
    pool.run_until_stalled();
    assert_eq!(*second.borrow(), Some(Ok(())));
    assert_eq!(session.phase(), SessionPhase::Running);
    assert_eq!(session.camera().open_streams.get(), 1);

    session.reset();
    assert_eq!(session.camera().open_streams.get(), 0);
}

#[test]
fn dropping_the_loop_mid_tick_releases_camera() {
    let mut pool = LocalPool::new();
    let session = Rc::new(started(ScriptedEstimator::with_poses([pose(0.0)])));
    let releases = Rc::clone(&session.camera().releases);
    let _release = session.estimator().hold_next_estimate();

    let ticking = Rc::clone(&session);
    pool.spawner()
        .spawn_local(async move {
            ticking.tick().await;
        })
        .unwrap();
    pool.run_until_stalled();
    assert_eq!(session.estimator().in_flight.get(), 1);

    drop(session);
    assert_eq!(releases.get(), 0);

    // Dropping the executor drops the suspended tick and the last handle
    drop(pool);
    assert_eq!(releases.get(), 1);
}

#[test]
fn reset_discards_in_flight_estimate() {
    let mut pool = LocalPool::new();
    let session = Rc::new(started(ScriptedEstimator::with_poses([pose(0.0), pose(100.0)])));
    block_on(session.tick());

    let release = session.estimator().hold_next_estimate();
    let outcome = Rc::new(Cell::new(None));

    let ticking = Rc::clone(&session);
    let result = Rc::clone(&outcome);
    pool.spawner()
        .spawn_local(async move {
            result.set(Some(ticking.tick().await));
        })
        .unwrap();
    pool.run_until_stalled();
    assert_eq!(session.estimator().in_flight.get(), 1);

    session.reset();
    release.send(()).unwrap();
    pool.run_until_stalled();

    assert_eq!(outcome.get(), Some(TickOutcome::Discarded));
    assert_eq!(session.score(), 0);
    assert_eq!(session.snapshot().history_len, 0);
    assert!(session.latest_pose().is_none());
}

#[test]
fn reset_stops_video_releases_camera_and_clears_overlay() {
    let session = started(ScriptedEstimator::with_poses([pose(0.0), pose(100.0)]));
    block_on(session.tick());
    block_on(session.tick());
    assert_eq!(session.score(), 25);

    session.reset();

    assert_eq!(session.phase(), SessionPhase::Idle);
    assert_eq!(session.score(), 0);
    assert_eq!(session.feedback(), "");
    assert_eq!(session.video().calls(), vec!["rewind", "play", "pause", "rewind"]);
    assert!(!session.camera().is_live());
    assert!(session.surface().markers.is_empty());
}

#[test]
fn restart_after_reset_begins_from_zero() {
    let session = started(ScriptedEstimator::with_poses([
        pose(0.0),
        pose(100.0),
        pose(0.0),
        pose(100.0),
    ]));
    block_on(session.tick());
    block_on(session.tick());
    session.reset();

    block_on(session.start()).unwrap();
    assert_eq!(session.camera().acquisitions.get(), 2);

    // No carry-over: the first pose of the new session is not compared
    assert_eq!(block_on(session.tick()), TickOutcome::Observed(None));
    block_on(session.tick());
    assert_eq!(session.score(), 25);
}

#[test]
fn start_while_running_is_rejected() {
    let session = started(ScriptedEstimator::default());

    assert_eq!(
        block_on(session.start()),
        Err(SessionError::InvalidTransition {
            phase: SessionPhase::Running,
            event: SessionEvent::Start,
        })
    );
    assert_eq!(session.phase(), SessionPhase::Running);
    assert_eq!(session.camera().acquisitions.get(), 1);
}

#[test]
fn pause_requires_an_active_session() {
    let session = motion_loop(FakeCamera::new(), ScriptedEstimator::default());
    assert!(session.toggle_pause().is_err());
    assert!(session.video().calls().is_empty());
}

// ============================================================================
// RUN LOOP
// ============================================================================

#[test]
fn run_loop_ticks_once_per_frame_and_stops_on_reset() {
    let mut pool = LocalPool::new();
    let poses = (0..10).map(|i| pose(i as f32 * 100.0));
    let session = Rc::new(started(ScriptedEstimator::with_poses(poses)));
    let (clock, frames) = ManualClock::new();
    let finished = Rc::new(Cell::new(false));

    let running = Rc::clone(&session);
    let done = Rc::clone(&finished);
    pool.spawner()
        .spawn_local(async move {
            running.run(&clock).await;
            done.set(true);
        })
        .unwrap();

    pool.run_until_stalled();
    assert_eq!(session.estimator().calls.get(), 1);

    for _ in 0..3 {
        frames.unbounded_send(()).unwrap();
        pool.run_until_stalled();
    }
    assert_eq!(session.estimator().calls.get(), 4);
    assert_eq!(session.snapshot().stats.observed, 4);

    session.reset();
    frames.unbounded_send(()).unwrap();
    pool.run_until_stalled();

    assert!(finished.get());
    assert_eq!(session.estimator().calls.get(), 4);
    assert_eq!(session.estimator().max_in_flight.get(), 1);
}

#[test]
fn slow_estimate_holds_back_the_next_tick() {
    let mut pool = LocalPool::new();
    let session = Rc::new(started(ScriptedEstimator::with_poses([pose(0.0), pose(50.0)])));
    let (clock, frames) = ManualClock::new();
    let release = session.estimator().hold_next_estimate();

    let running = Rc::clone(&session);
    pool.spawner()
        .spawn_local(async move {
            running.run(&clock).await;
        })
        .unwrap();
    pool.run_until_stalled();

    // Frames keep arriving while the estimate is pending
    for _ in 0..3 {
        frames.unbounded_send(()).unwrap();
    }
    pool.run_until_stalled();
    assert_eq!(session.estimator().calls.get(), 1);
    assert_eq!(session.estimator().in_flight.get(), 1);

    release.send(()).unwrap();
    pool.run_until_stalled();
    assert_eq!(session.estimator().max_in_flight.get(), 1);
    assert!(session.estimator().calls.get() > 1);

    session.reset();
    frames.unbounded_send(()).unwrap();
    pool.run_until_stalled();
}

#[test]
fn restarted_loop_waits_for_previous_loop_to_exit() {
    let mut pool = LocalPool::new();
    let session = Rc::new(started(ScriptedEstimator::with_poses([pose(0.0), pose(0.0)])));
    let (old_clock, _old_frames) = ManualClock::new();
    let (new_clock, new_frames) = ManualClock::new();
    let release = session.estimator().hold_next_estimate();

    let running = Rc::clone(&session);
    pool.spawner()
        .spawn_local(async move {
            running.run(&old_clock).await;
        })
        .unwrap();
    pool.run_until_stalled();
    assert_eq!(session.estimator().in_flight.get(), 1);

    session.reset();
    block_on(session.start()).unwrap();

    let running = Rc::clone(&session);
    pool.spawner()
        .spawn_local(async move {
            running.run(&new_clock).await;
        })
        .unwrap();
    pool.run_until_stalled();

    // Frames arrive but the old estimate is still pending
    new_frames.unbounded_send(()).unwrap();
    pool.run_until_stalled();
    assert_eq!(session.estimator().calls.get(), 1);

    release.send(()).unwrap();
    pool.run_until_stalled();
    new_frames.unbounded_send(()).unwrap();
    pool.run_until_stalled();

    assert_eq!(session.estimator().calls.get(), 2);
    assert_eq!(session.estimator().max_in_flight.get(), 1);
    assert_eq!(session.snapshot().stats.observed, 1);

    session.reset();
    new_frames.unbounded_send(()).unwrap();
    pool.run_until_stalled();
}

#[test]
fn run_does_nothing_before_start() {
    let session = motion_loop(FakeCamera::new(), ScriptedEstimator::with_poses([pose(0.0)]));
    let (clock, _frames) = ManualClock::new();

    block_on(session.run(&clock));
    assert_eq!(session.estimator().calls.get(), 0);
}
