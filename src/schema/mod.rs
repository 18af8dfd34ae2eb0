//! Frame data model: plain-value snapshots of hand-tracking state.

mod frame;
mod gesture;
mod hand;
mod pointable;

pub use frame::{Frame, InteractionBox};
pub use gesture::{Gesture, GestureState, GestureType};
pub use hand::Hand;
pub use pointable::{Pointable, TouchZone};
