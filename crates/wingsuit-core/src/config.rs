//! World, flight and collision parameters.
//!
//! Everything the generator, the flight controller and the collision engine
//! need is carried by one `WorldConfig` value that is validated once and then
//! handed to each subsystem at construction. Vectors are stored as `[f32; 3]`
//! so the serialized form stays plain JSON arrays.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{arr3, Mat4, Vec3};

/// Lateral offset is an integer step count in `[-LATERAL_LIMIT, LATERAL_LIMIT]`.
pub const LATERAL_LIMIT: i32 = 20;

/// Upper bound on collision passes per display frame.
pub const MAX_SUBSTEPS: u32 = 1024;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightParams {
    pub min_speed: f32,
    pub max_speed: f32,
    pub initial_speed: f32,
    /// Speed removed per frame while flattening.
    pub flatten_decel: f32,
    /// Speed added per frame while diving.
    pub dive_accel: f32,
    /// Vertical nudge applied to the direction vector per frame (before renormalising).
    pub tilt_step: f32,
    /// Flattening stops pitching up once `direction.y` reaches this.
    pub max_vertical: f32,
    /// Yaw per frame while banking (radians).
    pub bank_angle: f32,
    /// World units per second per lateral step.
    pub lateral_speed: f32,
    /// Roll at full lateral offset (radians).
    pub max_roll: f32,
    pub initial_direction: [f32; 3],
    pub start_position: [f32; 3],
}

impl Default for FlightParams {
    fn default() -> Self {
        Self {
            min_speed: 20.0,
            max_speed: 80.0,
            initial_speed: 40.0,
            flatten_decel: 0.25,
            dive_accel: 0.25,
            tilt_step: 0.01,
            max_vertical: -0.05,
            bank_angle: 0.02,
            lateral_speed: 0.5,
            max_roll: PI / 4.0,
            initial_direction: [0.0, -0.5, 1.0],
            start_position: [0.0, 40.0, 0.0],
        }
    }
}

/// Inverted cone: base disc at local y = 0, apex at local y = `height`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConeParams {
    pub base_radius: f32,
    pub height: f32,
    /// Forgiveness margin added to the analytic radius.
    pub skin: f32,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionParams {
    /// Fatal distance above the ground plane.
    pub ground_threshold: f32,
    pub ring_tolerance: f32,
    pub finish_ring_tolerance: f32,
    pub tree: ConeParams,
    pub mountain: ConeParams,
}

impl ConeParams {
    /// Horizontal reach of the cone at `scale`, skin included.
    #[inline] pub fn reach(&self, scale: f32) -> f32 { self.base_radius * scale + self.skin }
}

impl Default for CollisionParams {
    fn default() -> Self {
        Self {
            ground_threshold: 4.0,
            ring_tolerance: 5.0,
            finish_ring_tolerance: 10.0,
            tree: ConeParams { base_radius: 1.5, height: 20.0, skin: 3.0 },
            mountain: ConeParams { base_radius: 25.0, height: 60.0, skin: 4.0 },
        }
    }
}

/// Sampling ranges for obstacle placement, in the tilted ground frame.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationBounds {
    /// Trees and rocks: x in `[-x_half_width, x_half_width)`.
    pub x_half_width: f32,
    /// Down-slope placement: y in `[0, depth)`.
    pub depth: f32,
    pub tree_z: f32,
    pub rock_z: f32,
    pub mountain_z: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    /// Upper bound of the extra x offset drawn for rocks.
    pub rock_offset_max: f32,
    /// Center band spans `[-band_edge, band_edge)`.
    pub mountain_band_edge: f32,
    /// Side bands extend `band_width` beyond the center band edge.
    pub mountain_band_width: f32,
    /// Half width of the obstacle-free lane around the start x. Trees and
    /// mountains keep their whole cone reach outside it.
    pub corridor_half_width: f32,
}

impl Default for GenerationBounds {
    fn default() -> Self {
        Self {
            x_half_width: 200.0,
            depth: 400.0,
            tree_z: -5.0,
            rock_z: -1.5,
            mountain_z: 0.0,
            scale_min: 0.5,
            scale_max: 2.0,
            rock_offset_max: 205.0,
            mountain_band_edge: 250.0,
            mountain_band_width: 350.0,
            corridor_half_width: 20.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationCounts {
    pub trees: usize,
    pub rocks: usize,
    pub mountains: usize,
}

impl GenerationCounts {
    /// Tree-only field.
    pub fn classic() -> Self { Self { trees: 50, rocks: 0, mountains: 0 } }
    pub fn extended() -> Self { Self { trees: 60, rocks: 40, mountains: 80 } }
    pub fn none() -> Self { Self { trees: 0, rocks: 0, mountains: 0 } }
    pub fn total(&self) -> usize { self.trees + self.rocks + self.mountains }
}

impl Default for GenerationCounts {
    fn default() -> Self { Self::extended() }
}

/// Ring gates spaced along the nominal glide path.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingLayout {
    pub count: usize,
    pub first_z: f32,
    pub spacing: f32,
    pub x_jitter: f32,
    pub y_jitter: f32,
    pub scale_min: f32,
    pub scale_max: f32,
}

impl Default for RingLayout {
    fn default() -> Self {
        Self {
            count: 10,
            first_z: 60.0,
            spacing: 60.0,
            x_jitter: 15.0,
            y_jitter: 10.0,
            scale_min: 6.0,
            scale_max: 10.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinishLayout {
    pub ring_z: f32,
    pub ring_scale: f32,
    /// Crossing this depth ends the run as a win even without the finish ring.
    pub win_depth_z: f32,
    pub counts: GenerationCounts,
}

impl Default for FinishLayout {
    fn default() -> Self {
        Self {
            ring_z: 680.0,
            ring_scale: 20.0,
            win_depth_z: 760.0,
            counts: GenerationCounts { trees: 20, rocks: 20, mountains: 0 },
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepLimits {
    /// Longer frames (stalls) are truncated to this.
    pub max_frame_dt: f32,
    /// Integration and collision run at most this far apart.
    pub max_substep: f32,
}

impl Default for StepLimits {
    fn default() -> Self { Self { max_frame_dt: 0.25, max_substep: 1.0 / 60.0 } }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Rotation of the ground quad about +X (radians).
    pub ground_tilt: f32,
    pub ground_extent: f32,
    /// Obstacle fields laid end to end down the slope before the finish ground.
    pub ground_segments: usize,
    pub segment_length: f32,
    pub counts: GenerationCounts,
    pub bounds: GenerationBounds,
    pub rings: RingLayout,
    pub finish: FinishLayout,
    pub flight: FlightParams,
    pub collision: CollisionParams,
    pub limits: StepLimits,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            ground_tilt: 2.0 * PI / 3.0,
            ground_extent: 1000.0,
            ground_segments: 2,
            segment_length: 400.0,
            counts: GenerationCounts::extended(),
            bounds: GenerationBounds::default(),
            rings: RingLayout::default(),
            finish: FinishLayout::default(),
            flight: FlightParams::default(),
            collision: CollisionParams::default(),
            limits: StepLimits::default(),
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 { Ok(()) } else { Err(ConfigError::NonPositive { field, value }) }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 { Ok(()) } else {
        Err(ConfigError::OutOfRange { field, value, min: 0.0, max: f32::INFINITY })
    }
}

fn range(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min.is_finite() && max.is_finite() && min < max { Ok(()) } else {
        Err(ConfigError::InvalidRange { field, min, max })
    }
}

fn direction(field: &'static str, v: [f32; 3]) -> Result<(), ConfigError> {
    let v = arr3(v);
    if v.is_finite() && v.length_squared() > 1e-12 { Ok(()) } else {
        Err(ConfigError::DegenerateVector { field })
    }
}

impl WorldConfig {
    /// Parse a JSON document (missing fields fall back to defaults) and validate it.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: WorldConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Same config with a different obstacle population per ground segment.
    pub fn with_counts(mut self, counts: GenerationCounts) -> Self {
        self.counts = counts;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.ground_tilt.is_finite() {
            return Err(ConfigError::NonFinite { field: "ground_tilt", value: self.ground_tilt });
        }
        positive("ground_extent", self.ground_extent)?;
        positive("segment_length", self.segment_length)?;

        let b = &self.bounds;
        positive("bounds.x_half_width", b.x_half_width)?;
        positive("bounds.depth", b.depth)?;
        range("bounds.scale", b.scale_min, b.scale_max)?;
        positive("bounds.rock_offset_max", b.rock_offset_max)?;
        positive("bounds.mountain_band_edge", b.mountain_band_edge)?;
        positive("bounds.mountain_band_width", b.mountain_band_width)?;
        if b.scale_min < 0.0 {
            return Err(ConfigError::OutOfRange { field: "bounds.scale_min", value: b.scale_min, min: 0.0, max: b.scale_max });
        }

        let r = &self.rings;
        positive("rings.spacing", r.spacing)?;
        non_negative("rings.x_jitter", r.x_jitter)?;
        non_negative("rings.y_jitter", r.y_jitter)?;
        range("rings.scale", r.scale_min, r.scale_max)?;

        let f = &self.finish;
        positive("finish.ring_scale", f.ring_scale)?;
        range("finish.ring_z..win_depth_z", f.ring_z, f.win_depth_z)?;

        let fl = &self.flight;
        range("flight.speed", fl.min_speed, fl.max_speed)?;
        if fl.min_speed < 0.0 {
            return Err(ConfigError::OutOfRange { field: "flight.min_speed", value: fl.min_speed, min: 0.0, max: fl.max_speed });
        }
        if !(fl.min_speed..=fl.max_speed).contains(&fl.initial_speed) {
            return Err(ConfigError::OutOfRange {
                field: "flight.initial_speed", value: fl.initial_speed, min: fl.min_speed, max: fl.max_speed,
            });
        }
        non_negative("flight.flatten_decel", fl.flatten_decel)?;
        non_negative("flight.dive_accel", fl.dive_accel)?;
        non_negative("flight.tilt_step", fl.tilt_step)?;
        non_negative("flight.bank_angle", fl.bank_angle)?;
        non_negative("flight.lateral_speed", fl.lateral_speed)?;
        non_negative("flight.max_roll", fl.max_roll)?;
        direction("flight.initial_direction", fl.initial_direction)?;
        if !arr3(fl.start_position).is_finite() {
            return Err(ConfigError::DegenerateVector { field: "flight.start_position" });
        }

        let c = &self.collision;
        non_negative("collision.ground_threshold", c.ground_threshold)?;
        non_negative("collision.ring_tolerance", c.ring_tolerance)?;
        non_negative("collision.finish_ring_tolerance", c.finish_ring_tolerance)?;
        for (name, cone) in [("collision.tree", c.tree), ("collision.mountain", c.mountain)] {
            positive(name, cone.base_radius)?;
            positive(name, cone.height)?;
            non_negative(name, cone.skin)?;
        }

        non_negative("bounds.corridor_half_width", b.corridor_half_width)?;
        for (field, half, cone) in [
            ("bounds.x_half_width", b.x_half_width, c.tree),
            ("bounds.mountain_band_edge", b.mountain_band_edge, c.mountain),
        ] {
            let clear = b.corridor_half_width + cone.reach(b.scale_max);
            if half <= clear {
                return Err(ConfigError::OutOfRange { field, value: half, min: clear, max: f32::INFINITY });
            }
        }

        let l = &self.limits;
        positive("limits.max_frame_dt", l.max_frame_dt)?;
        positive("limits.max_substep", l.max_substep)?;
        let finest = l.max_frame_dt / MAX_SUBSTEPS as f32;
        if l.max_substep < finest {
            return Err(ConfigError::OutOfRange { field: "limits.max_substep", value: l.max_substep, min: finest, max: f32::INFINITY });
        }
        Ok(())
    }

    /// Tilt shared by every ground node and everything standing on it.
    pub fn ground_rotation(&self) -> Mat4 { Mat4::from_axis_angle(Vec3::X, self.ground_tilt) }

    pub fn inverse_ground_rotation(&self) -> Mat4 { self.ground_rotation().inverse() }

    /// Unit normal of the ground surface pointing toward open air.
    pub fn ground_up(&self) -> Vec3 { self.ground_rotation().transform_vector3(Vec3::NEG_Z) }

    /// Unit vector pointing down the slope (local +Y of the tilted ground frame).
    pub fn slope_direction(&self) -> Vec3 { self.ground_rotation().transform_vector3(Vec3::Y) }

    /// World-space origin of ground segment `index` (the finish ground is index `ground_segments`).
    pub fn segment_origin(&self, index: usize) -> Vec3 {
        self.slope_direction() * (self.segment_length * index as f32)
    }

    /// Height of the nominal glide path at depth `z`, following the initial direction.
    pub fn path_height(&self, z: f32) -> f32 {
        let d = arr3(self.flight.initial_direction);
        let start = arr3(self.flight.start_position);
        if d.z.abs() <= 1e-6 { return start.y; }
        start.y + (z - start.z) * d.y / d.z
    }
}
