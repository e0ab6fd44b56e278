//! Viewer controls and their on-screen button layout.
//!
//! Each button maps to a [`Control`]; applying a control to a
//! [`SimParams`](crate::params::SimParams) produces the next parameter record.
//! The layout and hit-testing are plain geometry so they work without a window.

use std::str::FromStr;

use crate::params::ParamError;


/// A single user action in the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    IncreaseAngle,
    DecreaseAngle,
    NextObject,
    GrowLens,
    ShrinkLens,
    ToggleReflection,
    ToggleRefraction,
}

impl Control {
    pub const ALL: [Control; 7] = [
        Control::IncreaseAngle,
        Control::DecreaseAngle,
        Control::NextObject,
        Control::GrowLens,
        Control::ShrinkLens,
        Control::ToggleReflection,
        Control::ToggleRefraction,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Control::IncreaseAngle => "increase-angle",
            Control::DecreaseAngle => "decrease-angle",
            Control::NextObject => "next-object",
            Control::GrowLens => "grow-lens",
            Control::ShrinkLens => "shrink-lens",
            Control::ToggleReflection => "toggle-reflection",
            Control::ToggleRefraction => "toggle-refraction",
        }
    }

    /// Text shown on the button.
    pub fn label(self) -> &'static str {
        match self {
            Control::IncreaseAngle => "Angle +1°",
            Control::DecreaseAngle => "Angle -1°",
            Control::NextObject => "Next Object",
            Control::GrowLens => "Grow Lens",
            Control::ShrinkLens => "Shrink Lens",
            Control::ToggleReflection => "Show / Hide Reflection",
            Control::ToggleRefraction => "Show / Hide Refraction",
        }
    }

    fn is_toggle(self) -> bool {
        matches!(self, Control::ToggleReflection | Control::ToggleRefraction)
    }
}

impl FromStr for Control {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Control::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ParamError::UnknownControl(s.to_string()))
    }
}

const BUTTON_TOP: f32 = 40.0;
const BUTTON_PITCH: f32 = 50.0;
const BUTTON_HEIGHT: f32 = 40.0;
const STEPPER_WIDTH: f32 = 200.0;
const STEPPER_MARGIN: f32 = 50.0; // gap to the right window edge
const TOGGLE_WIDTH: f32 = 280.0;
const TOGGLE_MARGIN: f32 = 20.0;

/// An axis-aligned clickable rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub control: Control,
}

impl Button {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }
}

/// Lays out one button per control, stacked down the right edge of the window.
pub fn buttons(window_width: f32) -> Vec<Button> {
    Control::ALL
        .into_iter()
        .enumerate()
        .map(|(i, control)| {
            let (w, margin) = if control.is_toggle() {
                (TOGGLE_WIDTH, TOGGLE_MARGIN)
            } else {
                (STEPPER_WIDTH, STEPPER_MARGIN)
            };
            Button {
                x: window_width - margin - w,
                y: BUTTON_TOP + i as f32 * BUTTON_PITCH,
                w,
                h: BUTTON_HEIGHT,
                control,
            }
        })
        .collect()
}

/// The control under the point `(x, y)`, if any.
pub fn button_at(buttons: &[Button], x: f32, y: f32) -> Option<Control> {
    buttons.iter().find(|b| b.contains(x, y)).map(|b| b.control)
}
