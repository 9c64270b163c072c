pub mod types;
pub mod hash;
pub mod config;
pub mod error;

pub use types::{Vec3, Mat4, vec3, arr3};
pub use hash::StateHasher;
pub use config::{
    WorldConfig, FlightParams, CollisionParams, ConeParams, GenerationBounds,
    GenerationCounts, RingLayout, FinishLayout, StepLimits, LATERAL_LIMIT, MAX_SUBSTEPS,
};
pub use error::ConfigError;
