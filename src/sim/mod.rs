//! Gameplay simulation
//!
//! All gameplay state lives here. It must stay deterministic:
//! - Time only arrives as explicit clock readings
//! - Events are delivered synchronously, in subscription order
//! - No rendering or platform dependencies

pub mod ball;
pub mod barrier;
pub mod body;
pub mod dash;
pub mod dodge;
pub mod events;
pub mod panel;
pub mod score;
pub mod speed;
pub mod world;

pub use ball::Ball;
pub use barrier::Barrier;
pub use body::{Body, Motion, Opacity, Tint};
pub use dash::{Dash, DashState};
pub use dodge::{Dodge, DodgeState};
pub use events::{EventBus, EventKind, GameEvent, SubscriptionId};
pub use panel::{Hemisphere, Panel};
pub use score::{LevelProgress, SceneRequest, ScoreKeeper};
pub use speed::SpeedFloor;
pub use world::World;
