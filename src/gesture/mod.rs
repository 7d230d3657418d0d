//! Gesture resolution: raw pointer input to unambiguous token transforms.

pub mod controller;
pub mod event;

pub use controller::{GestureController, SessionOutcome};
pub use event::{PinchFrame, Pointers};
