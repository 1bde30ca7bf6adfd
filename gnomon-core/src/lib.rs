//! Board-agnostic face logic for the Gnomon watchface
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Options store (load defaults, apply synced updates, persistence slots)
//! - Face controller (charging/connectivity state, tick handling, effects)
//! - Hand geometry (rotation math, battery gauge polygons)
//! - Redraw planning (what to draw on the next frame)
//! - Wall-clock and tick-unit types

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod face;
pub mod hands;
pub mod options;
