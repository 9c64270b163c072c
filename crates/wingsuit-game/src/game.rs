use glam::Mat4;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use wingsuit_collision::{CollisionEngine, CollisionEvent};
use wingsuit_core::{ConfigError, StateHasher, WorldConfig, MAX_SUBSTEPS};
use wingsuit_flight::{FlightCtrl, HeldControls, Player};
use wingsuit_scene::{DrawRequest, Ring, SceneNode, Transform};
use wingsuit_worldgen::WorldGenerator;

use crate::camera::CameraMode;
use crate::control::Control;
use crate::ledger::{Ledger, LedgerEvent};

const LEDGER_CAP: usize = 4096;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    #[default]
    NotStarted,
    Playing,
    Paused,
    Dead,
    Won,
}

impl GameState {
    #[inline] pub fn is_terminal(self) -> bool { matches!(self, GameState::Dead | GameState::Won) }
}

/// Outcome of one `Game::step`.
#[derive(Clone, Debug)]
pub struct StepReport {
    /// Time actually simulated after sanitizing and clamping.
    pub dt: f32,
    pub substeps: u32,
    pub events: Vec<CollisionEvent>,
    pub state: GameState,
    pub rings_collected: u32,
    pub hash: [u8; 32],
}

pub struct Game {
    cfg: WorldConfig,
    generator: WorldGenerator,
    engine: CollisionEngine,
    rng: StdRng,
    world: SceneNode,
    player: Player,
    rings: Vec<Ring>,
    finish: Ring,
    held: HeldControls,
    state: GameState,
    camera: CameraMode,
    elapsed: f32,
    collected: u32,
    generation: u64,
    ledger: Ledger,
}

impl Game {
    /// Session with an entropy-seeded layout.
    pub fn new(cfg: WorldConfig) -> Result<Self, ConfigError> {
        Self::from_rng(cfg, StdRng::from_entropy())
    }

    /// Session whose layouts (including those after resets) replay exactly.
    pub fn with_seed(cfg: WorldConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::from_rng(cfg, StdRng::seed_from_u64(seed))
    }

    fn from_rng(cfg: WorldConfig, mut rng: StdRng) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let generator = WorldGenerator::new(&cfg);
        let engine = CollisionEngine::new(&cfg);
        let world = generator.generate_world(&mut rng);
        let rings = generator.generate_rings(&mut rng);
        let finish = generator.finish_ring();
        let player = Player::new(FlightCtrl::new(cfg.flight));
        Ok(Self {
            cfg,
            generator,
            engine,
            rng,
            world,
            player,
            rings,
            finish,
            held: HeldControls::default(),
            state: GameState::NotStarted,
            camera: CameraMode::default(),
            elapsed: 0.0,
            collected: 0,
            generation: 0,
            ledger: Ledger::new(LEDGER_CAP),
        })
    }

    /* ---------- accessors ---------- */

    #[inline] pub fn config(&self) -> &WorldConfig { &self.cfg }
    #[inline] pub fn state(&self) -> GameState { self.state }
    #[inline] pub fn elapsed(&self) -> f32 { self.elapsed }
    #[inline] pub fn rings_collected(&self) -> u32 { self.collected }
    #[inline] pub fn generation(&self) -> u64 { self.generation }
    #[inline] pub fn player(&self) -> &Player { &self.player }
    #[inline] pub fn rings(&self) -> &[Ring] { &self.rings }
    #[inline] pub fn finish_ring(&self) -> &Ring { &self.finish }
    #[inline] pub fn world(&self) -> &SceneNode { &self.world }
    #[inline] pub fn held(&self) -> &HeldControls { &self.held }
    #[inline] pub fn camera_mode(&self) -> CameraMode { self.camera }
    #[inline] pub fn ledger(&self) -> &Ledger { &self.ledger }

    /* ---------- lifecycle ---------- */

    /// Regenerate everything from the continuing random stream and return to
    /// `NotStarted` with counters zeroed. Allowed from any state.
    pub fn reset(&mut self) {
        self.world = self.generator.generate_world(&mut self.rng);
        self.rings = self.generator.generate_rings(&mut self.rng);
        self.finish = self.generator.finish_ring();
        self.player = Player::new(FlightCtrl::new(self.cfg.flight));
        self.held = HeldControls::default();
        self.elapsed = 0.0;
        self.collected = 0;
        self.generation += 1;
        self.ledger.push(LedgerEvent::Reset { generation: self.generation });
        info!(generation = self.generation, from = ?self.state, "reset");
        self.set_state(GameState::NotStarted);
    }

    fn set_state(&mut self, to: GameState) {
        let from = self.state;
        if from == to { return; }
        self.state = to;
        self.ledger.push(LedgerEvent::StateChanged { from, to });
        info!(?from, ?to, elapsed = self.elapsed, rings = self.collected, "state change");
    }

    /* ---------- input ---------- */

    pub fn on_control_press(&mut self, c: Control) {
        match c {
            Control::Reset => self.reset(),
            _ if self.state.is_terminal() && !c.is_held() => {
                debug!(control = c.name(), state = ?self.state, "ignored after run end");
            }
            Control::Pause => match self.state {
                GameState::NotStarted | GameState::Paused => self.set_state(GameState::Playing),
                GameState::Playing => self.set_state(GameState::Paused),
                GameState::Dead | GameState::Won => {}
            },
            Control::ToggleCamera => {
                self.camera = self.camera.toggled();
                debug!(camera = ?self.camera, "camera toggled");
            }
            held => self.set_held(held, true),
        }
    }

    pub fn on_control_release(&mut self, c: Control) {
        if c.is_held() { self.set_held(c, false); }
    }

    /// Press by name. Unknown names are ignored; returns whether the name was recognised.
    pub fn on_control_press_named(&mut self, name: &str) -> bool {
        match Control::from_name(name) {
            Some(c) => { self.on_control_press(c); true }
            None => { debug!(control = name, "unknown control"); false }
        }
    }

    pub fn on_control_release_named(&mut self, name: &str) -> bool {
        match Control::from_name(name) {
            Some(c) => { self.on_control_release(c); true }
            None => { debug!(control = name, "unknown control"); false }
        }
    }

    fn set_held(&mut self, c: Control, down: bool) {
        let h = &mut self.held;
        match c {
            Control::Flatten => h.flatten = down,
            Control::Dive => h.dive = down,
            Control::BankLeft => h.bank_left = down,
            Control::BankRight => h.bank_right = down,
            Control::LateralLeft => h.lateral_left = down,
            Control::LateralRight => h.lateral_right = down,
            Control::Pause | Control::Reset | Control::ToggleCamera => {}
        }
    }

    /* ---------- simulation ---------- */

    fn sanitize_dt(&self, dt: f32) -> f32 {
        if !dt.is_finite() || dt < 0.0 {
            warn!(dt, "invalid frame time, treating as zero");
            return 0.0;
        }
        dt.min(self.cfg.limits.max_frame_dt)
    }

    /// Advance one display frame. Controls apply once; motion and collision
    /// run in equal substeps no longer than `max_substep`, at most
    /// `MAX_SUBSTEPS` per frame.
    pub fn step(&mut self, dt: f32) -> StepReport {
        let dt = self.sanitize_dt(dt);
        let mut events = Vec::new();
        let mut substeps = 0u32;

        if self.state == GameState::Playing {
            self.player.apply_controls(&self.held);
            let n = if dt > 0.0 {
                ((dt / self.cfg.limits.max_substep).ceil() as u32).clamp(1, MAX_SUBSTEPS)
            } else {
                0
            };
            let h = if n > 0 { dt / n as f32 } else { 0.0 };

            for _ in 0..n {
                substeps += 1;
                self.player.advance(h);
                self.elapsed += h;
                let (prev, cur) = (self.player.prev_position(), self.player.position());
                let found = self.engine.evaluate(&self.world, &mut self.rings, &mut self.finish, prev, cur);
                for e in &found { self.apply_event(e); }
                events.extend(found);
                if self.state != GameState::Playing { break; }
            }

            self.world.update(dt);
            for r in &mut self.rings { r.update(dt); }
            self.finish.update(dt);
        }

        let hash = self.state_hash();
        trace!(dt, substeps, state = ?self.state, z = self.player.position().z, "step");
        StepReport { dt, substeps, events, state: self.state, rings_collected: self.collected, hash }
    }

    fn apply_event(&mut self, e: &CollisionEvent) {
        let elapsed = self.elapsed;
        match *e {
            CollisionEvent::Ring { index } => {
                self.collected += 1;
                self.ledger.push(LedgerEvent::RingPassed { index, elapsed });
            }
            CollisionEvent::FinishRing => {
                self.ledger.push(LedgerEvent::FinishRing { elapsed });
                self.set_state(GameState::Won);
            }
            CollisionEvent::DepthReached { z } => {
                self.ledger.push(LedgerEvent::DepthReached { z });
                self.set_state(GameState::Won);
            }
            CollisionEvent::Ground { clearance } => {
                self.ledger.push(LedgerEvent::GroundHit { clearance });
                self.set_state(GameState::Dead);
            }
            CollisionEvent::Obstacle { kind, at } => {
                self.ledger.push(LedgerEvent::ObstacleHit { kind, at });
                self.set_state(GameState::Dead);
            }
        }
    }

    /* ---------- output ---------- */

    /// World, rings, finish ring, then the player.
    pub fn for_each_drawable<F: FnMut(&DrawRequest)>(&self, mut f: F) {
        let root = Transform::IDENTITY;
        self.world.draw(&root, &mut f);
        for r in &self.rings { r.draw(&root, &mut f); }
        self.finish.draw(&root, &mut f);
        self.player.draw(&root, &mut f);
    }

    pub fn camera_view(&self) -> Mat4 { self.camera.view(self.player.state()) }

    /// Digest of the player, counters, state and ring layout.
    pub fn state_hash(&self) -> [u8; 32] {
        let mut h = StateHasher::new();
        let s = self.player.state();
        h.section("player", 1);
        h.update_vec3(s.position);
        h.update_vec3(s.direction);
        h.update_f32(s.speed);
        h.update_i32(s.lateral_offset);
        h.section("session", 1);
        h.update_f32(self.elapsed);
        h.update_u32(self.collected);
        h.update_u32(self.state as u32);
        h.section("rings", self.rings.len());
        for r in &self.rings {
            h.update_ring(r.center(), r.radius(), r.is_collided());
        }
        h.section("finish", 1);
        h.update_ring(self.finish.center(), self.finish.radius(), self.finish.is_collided());
        h.finalize()
    }
}
