//! Draw engine for a jar-or-wheel lottery.
//!
//! A [`DrawSession`] holds the option list, runs the press-and-hold charge
//! for the wheel, picks the winner uniformly at random, and publishes it once
//! the presentation time has passed on its virtual clock. Hosts feed it
//! intents and elapsed time and render from [`Snapshot`]s. Nothing in this
//! crate sleeps or touches a terminal.

/// Press-and-hold power accumulation.
pub mod charge;
/// Design constants and their validation.
pub mod config;
/// Error types for the draw engine.
pub mod error;
/// Session events and the event log.
pub mod event;
/// UI text lookup.
pub mod locale;
/// The option label set and label helpers.
pub mod options;
/// Random sources, uniform selection and shuffling.
pub mod random;
/// Wheel rotation planning and presentation helpers.
pub mod rotation;
/// The draw session state machine.
pub mod session;
/// Virtual-time scheduler for deferred work.
pub mod timer;

/// Re-exports of [`charge::ChargeController`] and [`charge::ChargePhase`].
pub use charge::{ChargeController, ChargePhase};
/// Re-export of [`config::DrawConfig`].
pub use config::DrawConfig;
/// Re-exports of [`error::DrawError`] and [`error::DrawResult`].
pub use error::{DrawError, DrawResult};
/// Re-exports of [`event::DrawEvent`], [`event::DrawEventKind`], and [`event::EventLog`].
pub use event::{DrawEvent, DrawEventKind, EventLog};
/// Re-exports of [`locale::Catalog`], [`locale::Lang`], and [`locale::Translator`].
pub use locale::{Catalog, Lang, Translator};
/// Re-exports of [`options::OptionSet`] and the label helpers.
pub use options::{OptionSet, abbreviate, truncate_label};
/// Re-exports of the random source types and helpers.
pub use random::{RandomSource, ScriptedSource, pick_index, shuffle};
/// Re-exports of the rotation planner and presentation helpers.
pub use rotation::{
    RotationPlan, RotationPlanner, SegmentColor, displayed_angle, segment_at, segment_color,
    spin_progress,
};
/// Re-exports of [`session::DrawSession`], [`session::Mode`], [`session::Phase`], and [`session::Snapshot`].
pub use session::{DrawSession, Mode, Phase, Snapshot};
/// Re-exports of the scheduler types.
pub use timer::{Fired, Scheduler, Task, TaskId};
