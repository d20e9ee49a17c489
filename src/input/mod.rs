//! Player input
//!
//! The host engine polls devices and hands over one `InputFrame` per render
//! frame. `GestureDetector` turns those snapshots into discrete gestures.

pub mod frame;
pub mod gesture;

pub use frame::InputFrame;
pub use gesture::{DoubleTapState, Gesture, GestureDetector, MultiTouchState};
