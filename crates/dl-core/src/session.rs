//! The draw session: the state machine hosts drive with intents.
//!
//! A session owns its option set, charge controller, rotation state, RNG,
//! scheduler and event log. Hosts call intent methods, move time forward with
//! [`DrawSession::advance`], and read [`DrawSession::snapshot`] or drain
//! events to re-render. Intents that are not allowed in the current state are
//! no-ops: they return `false` and leave the session untouched.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::charge::{ChargeController, ChargePhase, Release, TickOutcome};
use crate::config::DrawConfig;
use crate::error::DrawResult;
use crate::event::{DrawEvent, DrawEventKind, EventLog};
use crate::options::OptionSet;
use crate::random::{RandomSource, between, pick_index};
use crate::rotation::RotationPlanner;
use crate::timer::{Fired, Scheduler, Task, TaskId};

/// The visual metaphor a draw is presented with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Pull a stick from a jar.
    #[default]
    Jar,
    /// Charge and spin a wheel.
    Wheel,
}

impl Mode {
    /// Parse a mode name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "jar" | "sticks" => Some(Self::Jar),
            "wheel" | "spin" => Some(Self::Wheel),
            _ => None,
        }
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Jar => Self::Wheel,
            Self::Wheel => Self::Jar,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Jar => write!(f, "jar"),
            Self::Wheel => write!(f, "wheel"),
        }
    }
}

/// Coarse session state, derived from the fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Fewer options than a draw needs.
    Setup,
    /// Enough options, no result yet.
    Ready,
    /// A selection is made and its presentation is running.
    Drawing,
    /// A result is showing.
    Resolved,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Setup => write!(f, "setup"),
            Self::Ready => write!(f, "ready"),
            Self::Drawing => write!(f, "drawing"),
            Self::Resolved => write!(f, "resolved"),
        }
    }
}

/// A draw in flight. The selection is fixed when the draw starts.
#[derive(Debug, Clone)]
struct PendingDraw {
    index: usize,
    label: String,
    generation: u64,
    task: TaskId,
    started_at: u64,
    duration: u64,
}

/// Wheel angles, in a frame that only grows between resets.
#[derive(Debug, Clone, Copy, Default)]
struct RotationState {
    /// Resting angle left by the previous spin, in `[0, 360)`.
    last_rotation: f64,
    /// Where the current or most recent spin started.
    start: f64,
    /// Where the current or most recent spin ends.
    target: f64,
}

/// Read-only view of a session for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Bumped on every state change.
    pub revision: u64,
    /// Session virtual time.
    pub now: u64,
    /// Presentation mode.
    pub mode: Mode,
    /// Coarse state.
    pub phase: Phase,
    /// Labels in their current order.
    pub options: Vec<String>,
    /// Whether a draw is in flight.
    pub is_drawing: bool,
    /// Charge power, `0..=100`.
    pub power: u32,
    /// Whether power is accumulating.
    pub is_charging: bool,
    /// The landed option.
    pub result: Option<String>,
    /// Angle the wheel starts the current spin from.
    pub rotation_start: f64,
    /// Angle the wheel must reach.
    pub rotation_target: f64,
    /// Resting angle carried into the next spin.
    pub last_rotation: f64,
    /// Length of the presentation in flight.
    pub draw_duration: Option<u64>,
    /// Time spent in the presentation in flight.
    pub draw_elapsed: Option<u64>,
}

/// The draw engine's top-level state machine.
#[derive(Debug)]
pub struct DrawSession<R = StdRng> {
    config: DrawConfig,
    mode: Mode,
    options: OptionSet,
    charge: ChargeController,
    charge_task: Option<TaskId>,
    planner: RotationPlanner,
    rotation: RotationState,
    pending: Option<PendingDraw>,
    result: Option<String>,
    scheduler: Scheduler,
    generation: u64,
    revision: u64,
    events: EventLog,
    rng: R,
}

impl DrawSession<StdRng> {
    /// Create a session seeded from `config.seed`, or from OS entropy when unset.
    pub fn new(config: DrawConfig) -> DrawResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: RandomSource> DrawSession<R> {
    /// Create a session drawing from the given random source.
    pub fn with_rng(config: DrawConfig, rng: R) -> DrawResult<Self> {
        config.validate()?;
        Ok(Self {
            mode: Mode::default(),
            options: OptionSet::new(),
            charge: ChargeController::new(config.power_step, config.max_power),
            charge_task: None,
            planner: RotationPlanner::from_config(&config),
            rotation: RotationState::default(),
            pending: None,
            result: None,
            scheduler: Scheduler::new(),
            generation: 0,
            revision: 0,
            events: EventLog::new(config.max_events),
            config,
            rng,
        })
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Session configuration.
    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    /// Presentation mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current option set.
    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    /// Coarse state.
    pub fn phase(&self) -> Phase {
        if self.pending.is_some() {
            Phase::Drawing
        } else if self.result.is_some() {
            Phase::Resolved
        } else if self.options.len() < self.config.min_options {
            Phase::Setup
        } else {
            Phase::Ready
        }
    }

    /// Whether a draw is in flight.
    pub fn is_drawing(&self) -> bool {
        self.pending.is_some()
    }

    /// Charge power.
    pub fn power(&self) -> u32 {
        self.charge.power()
    }

    /// Whether power is accumulating.
    pub fn is_charging(&self) -> bool {
        self.charge.is_charging()
    }

    /// Charge controller phase.
    pub fn charge_phase(&self) -> ChargePhase {
        self.charge.phase()
    }

    /// The landed option, once a draw resolves.
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Absolute angle the wheel must reach.
    pub fn rotation_target(&self) -> f64 {
        self.rotation.target
    }

    /// Resting angle carried into the next spin.
    pub fn last_rotation(&self) -> f64 {
        self.rotation.last_rotation
    }

    /// Session virtual time.
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// Next time anything is scheduled to happen.
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    /// Counter bumped by try-again and reset; stale resolutions carry an older one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Counter bumped on every state change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Retained events.
    pub fn events(&self) -> &[DrawEvent] {
        self.events.events()
    }

    /// Events recorded since the previous call.
    pub fn drain_events(&mut self) -> Vec<DrawEvent> {
        self.events.take_unread()
    }

    /// Everything a renderer needs, in one value.
    pub fn snapshot(&self) -> Snapshot {
        let now = self.now();
        Snapshot {
            revision: self.revision,
            now,
            mode: self.mode,
            phase: self.phase(),
            options: self.options.as_slice().to_vec(),
            is_drawing: self.is_drawing(),
            power: self.power(),
            is_charging: self.is_charging(),
            result: self.result.clone(),
            rotation_start: self.rotation.start,
            rotation_target: self.rotation.target,
            last_rotation: self.rotation.last_rotation,
            draw_duration: self.pending.as_ref().map(|p| p.duration),
            draw_elapsed: self
                .pending
                .as_ref()
                .map(|p| now.saturating_sub(p.started_at)),
        }
    }

    // -----------------------------------------------------------------------
    // Option intents
    // -----------------------------------------------------------------------

    fn options_locked(&self) -> bool {
        self.is_drawing() || self.charge.phase() != ChargePhase::Idle
    }

    /// Append an option. Clears any showing result.
    ///
    /// Returns `false` for blank or duplicate labels and while a draw or
    /// charge is in progress.
    pub fn add_option(&mut self, label: &str) -> bool {
        if self.options_locked() {
            debug!(label, "add_option ignored: session busy");
            return false;
        }
        if !self.options.add(label) {
            debug!(label, "add_option ignored: blank or duplicate");
            return false;
        }
        self.result = None;
        self.emit(DrawEventKind::OptionAdded {
            label: label.trim().to_string(),
        });
        true
    }

    /// Remove the option at `index`. Clears any showing result.
    ///
    /// Returns `Ok(None)` while a draw or charge is in progress and
    /// [`DrawError::OutOfRange`](crate::DrawError::OutOfRange) for a bad index.
    pub fn remove_option(&mut self, index: usize) -> DrawResult<Option<String>> {
        if self.options_locked() {
            debug!(index, "remove_option ignored: session busy");
            return Ok(None);
        }
        let label = self.options.remove(index)?;
        self.result = None;
        self.emit(DrawEventKind::OptionRemoved {
            index,
            label: label.clone(),
        });
        Ok(Some(label))
    }

    /// Redefine the whole option set as a shuffled permutation of `labels`.
    pub fn set_options<S: AsRef<str>>(&mut self, labels: &[S]) -> bool {
        if self.options_locked() {
            debug!("set_options ignored: session busy");
            return false;
        }
        self.options.replace_all(&mut self.rng, labels);
        self.result = None;
        self.emit(DrawEventKind::OptionsReplaced {
            count: self.options.len(),
        });
        true
    }

    /// Drop every option. Clears any showing result.
    pub fn clear_options(&mut self) -> bool {
        if self.options_locked() || self.options.is_empty() {
            return false;
        }
        self.options.clear();
        self.result = None;
        self.emit(DrawEventKind::OptionsCleared);
        true
    }

    /// Switch presentation mode. Refused mid-draw and mid-charge.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if self.options_locked() {
            debug!(%mode, "set_mode ignored: session busy");
            return false;
        }
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.emit(DrawEventKind::ModeChanged { mode });
        true
    }

    // -----------------------------------------------------------------------
    // Draw intents
    // -----------------------------------------------------------------------

    /// Start a jar draw. Only allowed in jar mode from [`Phase::Ready`].
    ///
    /// The option is chosen now; it is published once the randomized
    /// presentation time has elapsed.
    pub fn start_jar_draw(&mut self) -> DrawResult<bool> {
        if self.mode != Mode::Jar || self.phase() != Phase::Ready {
            debug!(phase = %self.phase(), mode = %self.mode, "start_jar_draw ignored");
            return Ok(false);
        }
        let index = pick_index(&mut self.rng, self.options.len())?;
        let duration = between(
            &mut self.rng,
            self.config.jar_duration_min,
            self.config.jar_duration_max,
        );
        self.begin_draw(index, duration);
        Ok(true)
    }

    /// Start a wheel spin with the current power.
    ///
    /// Only allowed in wheel mode from [`Phase::Ready`], with no charge
    /// gesture open and at least the configured minimum power.
    pub fn start_wheel_spin(&mut self) -> DrawResult<bool> {
        if self.mode != Mode::Wheel
            || self.phase() != Phase::Ready
            || self.charge.phase() != ChargePhase::Idle
            || self.power() < self.config.min_spin_power
        {
            debug!(
                phase = %self.phase(),
                mode = %self.mode,
                power = self.power(),
                "start_wheel_spin ignored"
            );
            return Ok(false);
        }
        let n = self.options.len();
        let index = pick_index(&mut self.rng, n)?;
        let plan = self
            .planner
            .plan(n, index, self.power(), self.rotation.last_rotation)?;

        let start = self.rotation.target;
        self.rotation.start = start;
        self.rotation.target = start + (plan.target - self.rotation.last_rotation);
        self.rotation.last_rotation = plan.baseline;
        self.emit(DrawEventKind::SpinPlanned {
            target: self.rotation.target,
            extra_rounds: plan.extra_rounds,
        });
        self.begin_draw(index, self.config.spin_duration);
        Ok(true)
    }

    fn begin_draw(&mut self, index: usize, duration: u64) {
        let label = self.options.get(index).unwrap_or_default().to_string();
        let generation = self.generation;
        let task = self.scheduler.once(duration, Task::Resolve { generation });
        info!(mode = %self.mode, index, duration, "draw started");
        self.pending = Some(PendingDraw {
            index,
            label,
            generation,
            task,
            started_at: self.now(),
            duration,
        });
        self.emit(DrawEventKind::DrawStarted {
            mode: self.mode,
            duration,
        });
    }

    // -----------------------------------------------------------------------
    // Charge intents
    // -----------------------------------------------------------------------

    /// Begin the press-and-hold gesture. Wheel mode, [`Phase::Ready`] only.
    pub fn start_charge(&mut self) -> bool {
        if self.mode != Mode::Wheel || self.phase() != Phase::Ready {
            debug!(phase = %self.phase(), mode = %self.mode, "start_charge ignored");
            return false;
        }
        if !self.charge.start() {
            debug!("start_charge ignored: already charging");
            return false;
        }
        self.charge_task = Some(
            self.scheduler
                .every(self.config.tick_interval, Task::ChargeTick),
        );
        self.emit(DrawEventKind::ChargeStarted);
        true
    }

    /// Release the gesture. Returns `true` when the release started a spin.
    pub fn end_charge(&mut self) -> DrawResult<bool> {
        let release = self.charge.end(self.config.min_spin_power);
        if release == Release::Ignored {
            return Ok(false);
        }
        self.stop_charge_task();
        match release {
            Release::Commit(power) => {
                self.emit(DrawEventKind::ChargeReleased {
                    power,
                    committed: true,
                });
                self.start_wheel_spin()
            }
            Release::Discard(power) => {
                debug!(power, "charge discarded");
                self.emit(DrawEventKind::ChargeReleased {
                    power,
                    committed: false,
                });
                Ok(false)
            }
            Release::Ignored => Ok(false),
        }
    }

    fn stop_charge_task(&mut self) {
        if let Some(id) = self.charge_task.take() {
            self.scheduler.cancel(id);
        }
    }

    // -----------------------------------------------------------------------
    // Lifecycle intents
    // -----------------------------------------------------------------------

    /// Clear the result for another round. Only allowed in [`Phase::Resolved`].
    ///
    /// Power and the wheel baseline go back to zero and the options are
    /// reshuffled.
    pub fn try_again(&mut self) -> bool {
        if self.phase() != Phase::Resolved {
            debug!(phase = %self.phase(), "try_again ignored");
            return false;
        }
        self.generation += 1;
        self.result = None;
        self.charge.reset();
        self.rotation = RotationState::default();
        self.options.reshuffle(&mut self.rng);
        self.emit(DrawEventKind::TriedAgain);
        self.emit(DrawEventKind::OptionsReshuffled);
        true
    }

    /// Drop everything and return to [`Phase::Setup`]. Allowed in any state.
    ///
    /// Pending resolutions are cancelled and belong to an older generation
    /// from here on, so they can never publish.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.scheduler.cancel_all();
        self.charge_task = None;
        self.pending = None;
        self.result = None;
        self.charge.reset();
        self.rotation = RotationState::default();
        self.options.clear();
        info!(generation = self.generation, "session reset");
        self.emit(DrawEventKind::Reset);
    }

    // -----------------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------------

    /// Move time forward by `elapsed`, running everything that falls due.
    pub fn advance(&mut self, elapsed: u64) {
        let until = self.now().saturating_add(elapsed);
        self.advance_to(until);
    }

    /// Move time forward to `t`, running everything that falls due.
    pub fn advance_to(&mut self, t: u64) {
        while let Some(fired) = self.scheduler.pop_due(t) {
            self.fire(fired);
        }
        self.scheduler.advance_to(t);
    }

    /// Advance until no draw is in flight and no charge is accumulating.
    /// Returns the time that passed.
    pub fn run_until_idle(&mut self) -> u64 {
        let start = self.now();
        while self.is_drawing() || self.is_charging() {
            match self.scheduler.next_due() {
                Some(t) => self.advance_to(t),
                None => break,
            }
        }
        self.now() - start
    }

    fn fire(&mut self, fired: Fired) {
        match fired.task {
            Task::ChargeTick => self.on_charge_tick(fired.id),
            Task::Resolve { generation } => self.on_resolve(fired.id, generation),
        }
    }

    fn on_charge_tick(&mut self, id: TaskId) {
        match self.charge.tick() {
            TickOutcome::Advanced(power) => {
                trace!(power, "charge tick");
                self.emit(DrawEventKind::PowerChanged { power });
            }
            TickOutcome::Saturated(power) => {
                self.stop_charge_task();
                self.emit(DrawEventKind::PowerChanged { power });
                self.emit(DrawEventKind::ChargeSaturated { power });
            }
            TickOutcome::Ignored => {
                self.scheduler.cancel(id);
            }
        }
    }

    fn on_resolve(&mut self, id: TaskId, generation: u64) {
        let current = self
            .pending
            .as_ref()
            .is_some_and(|p| p.generation == generation && p.task == id);
        if generation != self.generation || !current {
            debug!(generation, current = self.generation, "stale resolution ignored");
            self.emit(DrawEventKind::StaleResolutionIgnored { generation });
            return;
        }
        let Some(draw) = self.pending.take() else {
            return;
        };
        self.charge.clear_power();
        info!(index = draw.index, label = %draw.label, "draw resolved");
        self.result = Some(draw.label.clone());
        self.emit(DrawEventKind::DrawResolved {
            index: draw.index,
            label: draw.label,
        });
    }

    fn emit(&mut self, kind: DrawEventKind) {
        self.revision += 1;
        self.events.push(DrawEvent::new(self.now(), kind));
    }
}
