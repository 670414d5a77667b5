//! Drifting petals and rising motes.
//!
//! Initial placement comes from the particle sub-seed; wrap-around respawns use
//! the scene's ambient RNG since they only need to look random.

use crate::config::Viewport;
use crate::constants::*;
use crate::rng::SeededRandom;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Petal {
    pub x: f32,
    pub y: f32,
    /// Depth in [0.3, 1]; nearer petals fall faster and draw more opaque.
    pub z: f32,
    pub drift: f32,
    pub sway: f32,
    pub spin: f32,
    pub size: f32,
    /// Warm pink when true, pale cream otherwise.
    pub warm: bool,
}

impl Petal {
    pub fn alpha(&self) -> f32 {
        0.33 + self.z * 0.22
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mote {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub speed: f32,
    pub phase: f32,
    pub cool: bool,
}

impl Mote {
    /// Twinkle-modulated alpha at scene time `t`.
    pub fn alpha(&self, t: f64) -> f32 {
        let twinkle = 0.4 + 0.6 * (t + self.phase as f64).sin() as f32;
        if self.cool {
            0.12 + twinkle * 0.25
        } else {
            0.16 + twinkle * 0.28
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    pub petals: Vec<Petal>,
    pub motes: Vec<Mote>,
}

impl ParticleField {
    pub fn generate(seed: u32, vp: &Viewport) -> Self {
        let mut rng = SeededRandom::new(seed);
        let (w, h) = (vp.width, vp.height);

        let petal_count = (PETAL_BASE_COUNT + w / PETAL_WIDTH_DIVISOR).floor() as usize;
        let petals = (0..petal_count)
            .map(|_| Petal {
                x: rng.range(0.0, w),
                y: rng.range(-h * 0.6, h),
                z: rng.range(0.3, 1.0),
                drift: rng.range(4.0, 14.0),
                sway: rng.range(0.3, 1.2),
                spin: rng.range(0.0, TAU),
                size: rng.range(2.5, 7.5),
                warm: rng.chance_above(0.5),
            })
            .collect();

        let mote_count = (MOTE_BASE_COUNT + w / MOTE_WIDTH_DIVISOR).floor() as usize;
        let motes = (0..mote_count)
            .map(|_| Mote {
                x: rng.range(0.0, w),
                y: rng.range(0.0, h),
                r: rng.range(0.8, 2.6),
                speed: rng.range(0.08, 0.28),
                phase: rng.range(0.0, TAU),
                cool: rng.chance_above(0.58),
            })
            .collect();

        Self { petals, motes }
    }

    /// Advance by `dt` seconds of real time at clock speed `speed`.
    pub fn step(&mut self, t: f64, dt: f32, speed: f32, vp: &Viewport, rng: &mut impl Rng) {
        let k = dt * PARTICLE_STEP_FPS * speed;
        let (w, h) = (vp.width, vp.height);

        for mote in &mut self.motes {
            mote.y -= mote.speed * 0.55 * k;
            if mote.y < -8.0 {
                mote.y = h + 8.0;
                mote.x = rng.gen::<f32>() * w;
            }
        }

        for petal in &mut self.petals {
            let flutter = (t * petal.sway as f64 + petal.spin as f64).sin() as f32;
            petal.x += (petal.drift * 0.045 + flutter * 0.16) * k;
            petal.y += (0.12 + petal.z * 0.42) * k;
            petal.spin = (petal.spin + 0.0024 * petal.z * k) % TAU;
            if petal.y > h + 12.0 || petal.x > w + 20.0 {
                petal.x = rng.gen::<f32>() * w;
                petal.y = -16.0 - rng.gen::<f32>() * h * 0.35;
            }
        }
    }

    pub fn rescale(&mut self, sx: f32, sy: f32) {
        for p in &mut self.petals {
            p.x *= sx;
            p.y *= sy;
        }
        for m in &mut self.motes {
            m.x *= sx;
            m.y *= sy;
        }
    }
}
