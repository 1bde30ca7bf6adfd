//! Redraw planning
//!
//! A [`RedrawPlan`] is a value snapshot of everything the renderer needs
//! for one frame. Geometry (polygon placement, wide/narrow selection) is
//! left to the renderer; the plan carries semantic state only.

use crate::options::Options;

/// Foreground/background color pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Palette {
    /// Light hands and text on a dark background
    Normal,
    /// Dark hands and text on a light background
    Inverted,
}

impl Palette {
    pub fn from_options(options: &Options) -> Self {
        if options.inverted_colors == 1 {
            Palette::Inverted
        } else {
            Palette::Normal
        }
    }
}

/// Which polygon fills the hand for this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandFill {
    /// The plain hour hand
    Hour,
    /// The battery gauge polygon at this index
    Battery { index: usize },
}

/// Snapshot of one frame's drawing inputs
///
/// `skip_hands` blanks the hand for the charge-blink flash; the centered
/// number is still current for that frame. The hour-hand outline is drawn
/// over whichever fill was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RedrawPlan {
    /// Do not draw the hand this frame (charge blink off-phase)
    pub skip_hands: bool,
    pub palette: Palette,
    /// The centered number, already converted to display form
    pub number: u8,
    /// Hand rotation angle in 1/65536-turn units
    pub angle: i32,
    pub fill: HandFill,
}
