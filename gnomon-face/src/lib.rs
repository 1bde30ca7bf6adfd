//! Rendering for the Gnomon watchface
//!
//! Consumes a `RedrawPlan` from `gnomon-core` and rasterizes it onto any
//! `embedded-graphics` draw target. Also owns screen layout (text boxes,
//! center point) and calendar text formatting.

#![no_std]
#![deny(unsafe_code)]

pub mod calendar;
pub mod layout;
pub mod render;

pub use render::{draw_face, Theme};
