//! Player flight model: held controls steer a unit direction and a speed,
//! integration moves the player, and the orientation is rebuilt from that
//! state every frame.

pub mod controller;
pub mod player;

pub use controller::{FlightCtrl, FlightState, HeldControls};
pub use player::Player;
