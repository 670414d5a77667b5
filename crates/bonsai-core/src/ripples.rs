//! Pond ripples: a self-rescheduling ambient source plus pointer wakes.

use crate::audio::AudioCue;
use crate::constants::*;
use crate::geom::{unit_or, Ellipse};
use crate::input::PointerSample;
use glam::Vec2;
use rand::Rng;

/// Direction-elongated shape of a wake ripple.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wake {
    /// Radius multiplier along the direction of travel.
    pub stretch: f32,
    /// Radius multiplier across it.
    pub cross: f32,
    pub angle: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ripple {
    pub origin: Vec2,
    pub start: f64,
    pub duration: f32,
    pub max_radius: f32,
    pub wake: Option<Wake>,
}

/// What the renderer needs to stroke one ripple ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleRender {
    pub center: Vec2,
    pub radius: f32,
    /// Ellipse radii after wake anisotropy (equal for ambient ripples).
    pub radii: Vec2,
    pub angle: f32,
    pub alpha: f32,
    pub line_width: f32,
}

impl Ripple {
    #[inline]
    pub fn age(&self, t: f64) -> f32 {
        ((t - self.start) / self.duration.max(f32::EPSILON) as f64) as f32
    }

    /// Render parameters at `t`, or `None` while pending (age < 0) or spent (age > 1).
    pub fn render(&self, t: f64) -> Option<RippleRender> {
        let age = self.age(t);
        if !(0.0..=1.0).contains(&age) {
            return None;
        }
        let radius = RIPPLE_RADIUS_FLOOR + self.max_radius * age;
        let (radii, angle) = match self.wake {
            Some(w) => (Vec2::new(radius * w.stretch, radius * w.cross), w.angle),
            None => (Vec2::splat(radius), 0.0),
        };
        Some(RippleRender {
            center: self.origin,
            radius,
            radii,
            angle,
            alpha: (1.0 - age) * (1.0 - age) * RIPPLE_ALPHA_MAX,
            line_width: 1.8 - age * 0.8,
        })
    }
}

#[derive(Debug, Default)]
pub struct PondRippleScheduler {
    ripples: Vec<Ripple>,
    next_ambient: f64,
    last_wake: Option<f64>,
}

impl PondRippleScheduler {
    pub fn new(now: f64, rng: &mut impl Rng) -> Self {
        let mut s = Self::default();
        s.reset(now, rng);
        s
    }

    /// Drop every ripple and schedule the first ambient one.
    pub fn reset(&mut self, now: f64, rng: &mut impl Rng) {
        self.ripples.clear();
        self.last_wake = None;
        self.next_ambient =
            now + AMBIENT_FIRST_DELAY_BASE + rng.gen::<f64>() * AMBIENT_FIRST_DELAY_SPAN;
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    pub fn next_ambient_at(&self) -> f64 {
        self.next_ambient
    }

    pub fn push(&mut self, ripple: Ripple) {
        self.ripples.push(ripple);
    }

    /// Fire the ambient timer if due, then drop spent ripples.
    pub fn update(&mut self, now: f64, pond: &Ellipse, rng: &mut impl Rng) {
        if now >= self.next_ambient {
            self.spawn_ambient(now, pond, rng);
            self.next_ambient =
                now + AMBIENT_INTERVAL_BASE + rng.gen::<f64>() * AMBIENT_INTERVAL_SPAN;
        }
        self.prune(now);
    }

    pub fn prune(&mut self, now: f64) {
        self.ripples.retain(|r| r.age(now) <= 1.0);
    }

    fn spawn_ambient(&mut self, now: f64, pond: &Ellipse, rng: &mut impl Rng) {
        let size = pond.radii * 2.0;
        let span = size.x.min(size.y);
        let mut jitter = |fx: f32, fy: f32| {
            Vec2::new(
                (rng.gen::<f32>() * 2.0 - 1.0) * size.x * fx,
                (rng.gen::<f32>() * 2.0 - 1.0) * size.y * fy,
            )
        };
        let origin = pond.center + jitter(0.24, 0.2);
        self.ripples.push(Ripple {
            origin,
            start: now,
            duration: 2.0 + rng.gen::<f32>() * 2.3,
            max_radius: span * (0.2 + rng.gen::<f32>() * 0.25),
            wake: None,
        });

        if rng.gen::<f64>() < AMBIENT_COMPANION_CHANCE {
            let origin = pond.center
                + Vec2::new(
                    (rng.gen::<f32>() * 2.0 - 1.0) * size.x * 0.18,
                    (rng.gen::<f32>() * 2.0 - 1.0) * size.y * 0.16,
                );
            self.ripples.push(Ripple {
                origin,
                start: now + AMBIENT_COMPANION_DELAY,
                duration: 1.7 + rng.gen::<f32>() * 1.8,
                max_radius: span * (0.16 + rng.gen::<f32>() * 0.18),
                wake: None,
            });
        }
    }

    /// Feed one pointer-move sample; a fast stroke over the water leaves a wake.
    pub fn on_pointer_move(&mut self, sample: &PointerSample, pond: &Ellipse) -> Option<AudioCue> {
        let speed = sample.speed();
        if speed < WAKE_SPEED_THRESHOLD || !pond.contains(sample.pos) {
            return None;
        }
        if let Some(last) = self.last_wake {
            if sample.time - last < WAKE_RETRIGGER_SECS {
                return None;
            }
        }
        self.last_wake = Some(sample.time);

        let n = (speed / WAKE_SPEED_NORM).clamp(0.0, 1.0);
        let dir = unit_or(sample.velocity, Vec2::X);
        let span = (pond.radii.x * 2.0).min(pond.radii.y * 2.0);
        let wake = Wake {
            stretch: 1.0 + 0.9 * n,
            cross: 1.0 / (1.0 + 0.45 * n),
            angle: dir.y.atan2(dir.x),
        };
        let lead = Ripple {
            origin: sample.pos,
            start: sample.time,
            duration: 1.3 + 0.9 * n,
            max_radius: span * (0.18 + 0.22 * n),
            wake: Some(wake),
        };
        self.ripples.push(lead);

        let behind = sample.pos - dir * (lead.max_radius * WAKE_TRAIL_FACTOR);
        if pond.contains(behind) {
            self.ripples.push(Ripple {
                origin: behind,
                start: sample.time + WAKE_TRAIL_DELAY,
                duration: lead.duration * 0.8,
                max_radius: lead.max_radius * 0.6,
                wake: Some(wake),
            });
        }

        log::debug!("[wake] speed={:.0} n={:.2}", speed, n);
        Some(AudioCue::WaterRipple {
            intensity: (0.2 + 0.8 * n).clamp(0.0, 1.0),
        })
    }

    /// Move every timestamp forward by `dt`, e.g. after a pause.
    pub fn shift_time(&mut self, dt: f64) {
        for r in &mut self.ripples {
            r.start += dt;
        }
        self.next_ambient += dt;
        if let Some(t) = self.last_wake.as_mut() {
            *t += dt;
        }
    }

    pub fn rescale(&mut self, sx: f32, sy: f32) {
        let sr = (sx * sy).sqrt();
        for r in &mut self.ripples {
            r.origin = Vec2::new(r.origin.x * sx, r.origin.y * sy);
            r.max_radius *= sr;
        }
    }
}
