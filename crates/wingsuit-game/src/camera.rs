use glam::Mat4;
use serde::{Deserialize, Serialize};

use wingsuit_core::Vec3;
use wingsuit_flight::FlightState;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Behind and slightly above the flyer, looking along the heading.
    #[default]
    Follow,
    /// High above and behind, looking down at the flyer.
    Overview,
}

const FOLLOW_BACK: f32 = 25.0;
const FOLLOW_UP: f32 = 8.0;
const FOLLOW_AHEAD: f32 = 10.0;
const OVERVIEW_OFFSET: Vec3 = Vec3::new(0.0, 150.0, -100.0);

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Follow => CameraMode::Overview,
            CameraMode::Overview => CameraMode::Follow,
        }
    }

    /// Right-handed world-to-view matrix for the current flight state.
    pub fn view(self, s: &FlightState) -> Mat4 {
        let heading = Vec3::new(s.direction.x, 0.0, s.direction.z).try_normalize().unwrap_or(Vec3::Z);
        let (eye, target) = match self {
            CameraMode::Follow => (
                s.position - heading * FOLLOW_BACK + Vec3::Y * FOLLOW_UP,
                s.position + heading * FOLLOW_AHEAD,
            ),
            CameraMode::Overview => (s.position + OVERVIEW_OFFSET, s.position),
        };
        Mat4::look_at_rh(eye, target, Vec3::Y)
    }
}
