//! Game session: owns the generated world, the player and the rings, routes
//! control input, and advances flight and collision once per frame.

pub mod control;
pub mod camera;
pub mod ledger;
pub mod game;

pub use control::Control;
pub use camera::CameraMode;
pub use ledger::{Ledger, LedgerEvent};
pub use game::{Game, GameState, StepReport};
