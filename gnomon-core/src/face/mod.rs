//! Face state and behavior
//!
//! The controller owns all mutable face state and reacts to events by
//! mutating itself and returning a list of effects for the event wiring
//! to execute. Rendering consumes a [`RedrawPlan`] snapshot instead of
//! touching controller state directly.

mod controller;
mod effects;
mod redraw;

pub use controller::{BatteryReading, FaceController};
pub use effects::{Effect, Effects, TickGranularity, VibePattern};
pub use redraw::{HandFill, Palette, RedrawPlan};
