//! The owned scene aggregate and its per-frame tick.
//!
//! Everything that changes over a session lives in [`SceneState`]. Hosts push
//! pointer events whenever they arrive, then call [`SceneState::frame`] once
//! per animation frame; the queue is drained at the top of the frame so input
//! and simulation never interleave.

use crate::audio::AudioCue;
use crate::clock::GrowthClock;
use crate::config::{SceneConfig, Viewport};
use crate::constants::{MAX_FRAME_DT, PARTICLE_SEED_XOR, TREE_SEED_XOR};
use crate::disturbance::DisturbanceField;
use crate::error::SceneError;
use crate::input::{InputQueue, PointerEvent, PointerTracker};
use crate::particles::ParticleField;
use crate::ripples::PondRippleScheduler;
use crate::snapshot::FrameSnapshot;
use crate::stones::StonePhysics;
use crate::tree::Tree;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Debug)]
pub struct SceneOptions {
    /// Root seed; `None` draws a random one.
    pub seed: Option<u32>,
    pub viewport: Viewport,
    pub speed: f64,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            seed: None,
            viewport: Viewport::new(1280.0, 720.0),
            speed: 1.0,
        }
    }
}

pub struct SceneState {
    viewport: Viewport,
    config: SceneConfig,
    tree: Tree,
    particles: ParticleField,
    clock: GrowthClock,
    disturbances: DisturbanceField,
    ripples: PondRippleScheduler,
    stones: StonePhysics,
    input: InputQueue,
    pointer: PointerTracker,
    rng: StdRng,
    last_frame: Option<f64>,
}

impl SceneState {
    pub fn new(options: SceneOptions, now: f64) -> Result<Self, SceneError> {
        Self::with_rng(options, now, StdRng::from_entropy())
    }

    /// Like [`SceneState::new`] but with a caller-supplied ambient RNG, so
    /// ripple timing and particle respawns are reproducible too.
    pub fn with_rng(options: SceneOptions, now: f64, mut rng: StdRng) -> Result<Self, SceneError> {
        let seed = options.seed.unwrap_or_else(|| rng.gen());
        let viewport = options.viewport;
        let config = SceneConfig::generate(seed);
        let tree = Tree::generate(seed ^ TREE_SEED_XOR, &config, viewport);
        let particles = ParticleField::generate(seed ^ PARTICLE_SEED_XOR, &viewport);
        let ripples = PondRippleScheduler::new(now, &mut rng);
        let mut clock = GrowthClock::new(now);
        clock.set_speed(now, options.speed)?;

        log_scene("init", &config, &tree);
        Ok(Self {
            viewport,
            config,
            tree,
            particles,
            clock,
            disturbances: DisturbanceField::new(),
            ripples,
            stones: StonePhysics::new(),
            input: InputQueue::default(),
            pointer: PointerTracker::default(),
            rng,
            last_frame: None,
        })
    }

    /// The single re-initialization point: regenerate layout, tree and
    /// particles from `seed` (or a fresh random one) and drop ephemeral state.
    pub fn randomize(&mut self, seed: Option<u32>, now: f64) {
        let seed = seed.unwrap_or_else(|| self.rng.gen());
        self.config = SceneConfig::generate(seed);
        self.tree = Tree::generate(seed ^ TREE_SEED_XOR, &self.config, self.viewport);
        self.particles = ParticleField::generate(seed ^ PARTICLE_SEED_XOR, &self.viewport);
        self.ripples.reset(now, &mut self.rng);
        self.stones.reset();
        self.disturbances.clear();
        self.input.clear();
        self.pointer.reset();
        log_scene("randomize", &self.config, &self.tree);
    }

    /// New scene and a fresh growth cycle.
    pub fn restart(&mut self, seed: Option<u32>, now: f64) {
        self.randomize(seed, now);
        self.clock.restart(now);
    }

    /// Seed-preserving resize: regenerate geometry for the new viewport and
    /// carry ephemeral positions over by the width/height ratios.
    pub fn resize(&mut self, width: f32, height: f32) {
        let next = Viewport::new(width, height);
        if next == self.viewport {
            return;
        }
        let ratio = |new: f32, old: f32| if old > 0.0 { new / old } else { 1.0 };
        let sx = ratio(next.width, self.viewport.width);
        let sy = ratio(next.height, self.viewport.height);
        self.viewport = next;

        let seed = self.config.seed;
        self.config = SceneConfig::generate(seed);
        self.tree = Tree::generate(seed ^ TREE_SEED_XOR, &self.config, self.viewport);

        self.particles.rescale(sx, sy);
        self.ripples.rescale(sx, sy);
        self.stones.rescale(sx, sy);
        self.disturbances.rescale(sx, sy);
        self.pointer.rescale(sx, sy);
        log::info!(
            "[scene] resize {:.0}x{:.0} (x{:.3}, x{:.3}) branches={}",
            width,
            height,
            sx,
            sy,
            self.tree.branches.len()
        );
    }

    pub fn set_speed(&mut self, now: f64, speed: f64) -> Result<(), SceneError> {
        self.clock.set_speed(now, speed).map_err(|e| {
            log::warn!("[scene] {}", e);
            e
        })
    }

    /// Pause or resume. Resuming shifts every ephemeral timestamp by the
    /// paused span so ripples and rustles pick up where they left off.
    pub fn toggle_pause(&mut self, now: f64) -> bool {
        if let Some(at) = self.clock.paused_at() {
            let paused_for = (now - at).max(0.0);
            self.settle_buttons();
            self.clock.resume(now);
            self.ripples.shift_time(paused_for);
            self.disturbances.shift_time(paused_for);
            self.last_frame = None;
            self.pointer.reset();
            false
        } else {
            self.clock.pause(now);
            true
        }
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Queue a pointer event for the next frame.
    pub fn push_pointer(&mut self, ev: PointerEvent) {
        self.input.push(ev);
    }

    /// Advance one animation frame at host time `now` (seconds). Audio cues
    /// raised during the frame are appended to `cues`.
    pub fn frame(&mut self, now: f64, cues: &mut Vec<AudioCue>) {
        if self.clock.is_paused() {
            self.settle_buttons();
            return;
        }
        let dt = match self.last_frame {
            Some(prev) => (now - prev).clamp(0.0, MAX_FRAME_DT),
            None => 0.0,
        };
        self.last_frame = Some(now);

        let progress = self.clock.progress(now);
        let maturity = self.clock.maturity_boost(now);
        while let Some(ev) = self.input.pop() {
            self.handle_pointer(ev, progress, maturity, cues);
        }

        self.disturbances.prune(now);
        let pond = self.config.pond_ellipse(&self.viewport);
        self.ripples.update(now, &pond, &mut self.rng);
        self.stones.step(dt as f32, cues);
        let speed = self.clock.speed() as f32;
        self.particles
            .step(now, dt as f32, speed, &self.viewport, &mut self.rng);
    }

    /// Drain input while frozen: button state and stone releases still apply,
    /// moves are dropped so nothing rustles or drags with stale timestamps.
    fn settle_buttons(&mut self) {
        while let Some(ev) = self.input.pop() {
            match ev {
                PointerEvent::Down { .. } => self.pointer.down = true,
                PointerEvent::Up { .. } => {
                    self.pointer.down = false;
                    self.stones.release();
                }
                PointerEvent::Move { .. } => {}
            }
        }
    }

    fn handle_pointer(
        &mut self,
        ev: PointerEvent,
        progress: f32,
        maturity: f32,
        cues: &mut Vec<AudioCue>,
    ) {
        let sample = self.pointer.observe(ev.pos(), ev.time());
        match ev {
            PointerEvent::Down { pos, time } => {
                self.pointer.down = true;
                if let Some(cue) = self.stones.pick(pos, time, &self.config, &self.viewport) {
                    cues.push(cue);
                }
            }
            PointerEvent::Up { .. } => {
                self.pointer.down = false;
                self.stones.release();
            }
            PointerEvent::Move { pos, time } => {
                if self.stones.active().is_some() {
                    self.stones.drag(pos, time, &self.config, &self.viewport);
                    return;
                }
                if let Some(cue) =
                    self.disturbances
                        .on_pointer_move(&sample, &self.tree, progress, maturity)
                {
                    cues.push(cue);
                }
                let pond = self.config.pond_ellipse(&self.viewport);
                if let Some(cue) = self.ripples.on_pointer_move(&sample, &pond) {
                    cues.push(cue);
                }
            }
        }
    }

    pub fn snapshot(&self, now: f64) -> FrameSnapshot {
        FrameSnapshot::capture(self, now)
    }

    pub fn seed(&self) -> u32 {
        self.config.seed
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn clock(&self) -> &GrowthClock {
        &self.clock
    }

    pub fn progress(&self, now: f64) -> f32 {
        self.clock.progress(now)
    }

    pub fn maturity(&self, now: f64) -> f32 {
        self.clock.maturity_boost(now)
    }

    pub fn disturbances(&self) -> &DisturbanceField {
        &self.disturbances
    }

    pub fn ripples(&self) -> &PondRippleScheduler {
        &self.ripples
    }

    pub fn stones(&self) -> &StonePhysics {
        &self.stones
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }
}

fn log_scene(what: &str, config: &SceneConfig, tree: &Tree) {
    log::info!(
        "[scene] {} seed={:#010x} depth={} branches={} leaves={} mature={}",
        what,
        config.seed,
        config.max_depth,
        tree.branches.len(),
        tree.leaves.len(),
        tree.mature_leaves.len()
    );
}
