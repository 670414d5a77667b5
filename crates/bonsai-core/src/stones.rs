//! Draggable garden stones: pick, clamped drag, tilt and a one-axis drop.

use crate::audio::AudioCue;
use crate::config::{SceneConfig, Viewport, STONE_COUNT};
use crate::constants::*;
use crate::geom::Ellipse;
use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StoneState {
    pub offset: Vec2,
    /// Vertical lift in px; negative is raised, zero is resting.
    pub lift: f32,
    /// Vertical velocity in px/s; positive is downward.
    pub vel_y: f32,
    pub tilt: f32,
    pub dragging: bool,
    grab: Vec2,
    last_pointer: Option<(Vec2, f64)>,
    drag_speed: f32,
}

impl StoneState {
    pub fn is_resting(&self) -> bool {
        !self.dragging && self.lift >= STONE_REST_LIFT && self.vel_y == 0.0
    }
}

/// Where and how to draw one stone this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StoneTransform {
    pub center: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub lift: f32,
    pub tilt: f32,
    pub dragging: bool,
}

/// Offset limits for one stone, relative to its base position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TravelBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl TravelBounds {
    pub fn for_viewport(vp: &Viewport) -> Self {
        Self {
            min: Vec2::new(-vp.width * STONE_TRAVEL_X, -vp.height * STONE_TRAVEL_UP),
            max: Vec2::new(vp.width * STONE_TRAVEL_X, vp.height * STONE_TRAVEL_DOWN),
        }
    }

    pub fn clamp(&self, offset: Vec2) -> Vec2 {
        offset.clamp(self.min, self.max)
    }

    pub fn contains(&self, offset: Vec2) -> bool {
        offset.cmpge(self.min - Vec2::splat(1e-3)).all()
            && offset.cmple(self.max + Vec2::splat(1e-3)).all()
    }
}

#[derive(Debug, Default)]
pub struct StonePhysics {
    states: [StoneState; STONE_COUNT],
    active: Option<usize>,
}

impl StonePhysics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn states(&self) -> &[StoneState; STONE_COUNT] {
        &self.states
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn transform(&self, i: usize, config: &SceneConfig, vp: &Viewport) -> StoneTransform {
        let stone = &config.stones[i];
        let st = &self.states[i];
        StoneTransform {
            center: stone.base_px(vp) + st.offset + Vec2::new(0.0, st.lift),
            size: stone.size_px(vp),
            rotation: stone.rot + st.tilt,
            lift: st.lift,
            tilt: st.tilt,
            dragging: st.dragging,
        }
    }

    /// Hit ellipse at the stone's current rendered position.
    pub fn hit_ellipse(&self, i: usize, config: &SceneConfig, vp: &Viewport) -> Ellipse {
        let tf = self.transform(i, config, vp);
        Ellipse {
            center: tf.center,
            radii: Vec2::new(tf.size * STONE_HIT_RX, tf.size * STONE_HIT_RY),
            rotation: tf.rotation,
        }
    }

    /// Pointer-down: the topmost stone under `p` starts dragging. A stone still
    /// held from an earlier press (its pointer-up never arrived) is dropped first.
    pub fn pick(&mut self, p: Vec2, time: f64, config: &SceneConfig, vp: &Viewport) -> Option<AudioCue> {
        self.release();
        let hit = (0..STONE_COUNT)
            .rev()
            .find(|&i| self.hit_ellipse(i, config, vp).contains(p))?;

        let base = config.stones[hit].base_px(vp);
        let st = &mut self.states[hit];
        st.grab = base + st.offset - p;
        st.dragging = true;
        st.lift = STONE_DRAG_LIFT;
        st.vel_y = 0.0;
        st.last_pointer = Some((p, time));
        st.drag_speed = 0.0;
        self.active = Some(hit);
        log::debug!("[stone] pick {}", hit);
        Some(AudioCue::StonePick)
    }

    /// Pointer-move while dragging: follow the pointer within travel bounds.
    pub fn drag(&mut self, p: Vec2, time: f64, config: &SceneConfig, vp: &Viewport) {
        let Some(i) = self.active else {
            return;
        };
        let ellipse = self.hit_ellipse(i, config, vp);
        let base = config.stones[i].base_px(vp);
        let bounds = TravelBounds::for_viewport(vp);

        let st = &mut self.states[i];
        let velocity = match st.last_pointer {
            Some((prev, t0)) if time > t0 => (p - prev) / (time - t0) as f32,
            _ => Vec2::ZERO,
        };
        st.last_pointer = Some((p, time));
        st.drag_speed = velocity.length();
        st.offset = bounds.clamp(p + st.grab - base);
        st.lift = STONE_DRAG_LIFT;

        let rx = ellipse.local_x_norm(p);
        st.tilt = (rx * STONE_TILT_RX_GAIN + velocity.y * STONE_TILT_VEL_GAIN)
            .clamp(-STONE_TILT_MAX, STONE_TILT_MAX);
    }

    /// Pointer-up: let go and seed a downward velocity from the drag speed.
    pub fn release(&mut self) {
        let Some(i) = self.active.take() else {
            return;
        };
        let st = &mut self.states[i];
        st.dragging = false;
        st.last_pointer = None;
        st.vel_y = STONE_DROP_SEED_BASE
            + (st.drag_speed * STONE_DROP_SEED_GAIN).min(STONE_DROP_SEED_EXTRA_MAX);
        log::debug!("[stone] release {} vel={:.1}", i, st.vel_y);
    }

    /// Integrate one timestep of drop kinematics and tilt decay.
    pub fn step(&mut self, dt: f32, cues: &mut Vec<AudioCue>) {
        let decay = (-dt * STONE_TILT_DECAY_PER_SEC).exp();
        for (i, st) in self.states.iter_mut().enumerate() {
            if st.dragging {
                continue;
            }
            st.tilt *= decay;
            if st.lift >= STONE_REST_LIFT && st.vel_y == 0.0 {
                continue;
            }
            st.vel_y += STONE_GRAVITY * dt;
            st.lift += st.vel_y * dt;
            if st.lift >= STONE_REST_LIFT {
                let impact = st.vel_y;
                st.lift = STONE_REST_LIFT;
                st.vel_y = 0.0;
                if impact >= STONE_IMPACT_THRESHOLD {
                    let intensity = (impact / STONE_IMPACT_NORM).clamp(0.1, 1.0);
                    log::debug!("[stone] land {} impact={:.0}", i, impact);
                    cues.push(AudioCue::StoneDrop { intensity });
                }
            }
        }
    }

    pub fn rescale(&mut self, sx: f32, sy: f32) {
        for st in &mut self.states {
            st.offset = Vec2::new(st.offset.x * sx, st.offset.y * sy);
            st.grab = Vec2::new(st.grab.x * sx, st.grab.y * sy);
            st.last_pointer = st
                .last_pointer
                .map(|(p, t)| (Vec2::new(p.x * sx, p.y * sy), t));
        }
    }
}
