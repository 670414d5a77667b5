//! Rustle field: pointer strokes through the crown leave short-lived,
//! directional pushes that displace branches and leaves at render time.

use crate::audio::{AudioCue, RustleKind};
use crate::constants::*;
use crate::geom::{dist_sq_to_segment, unit_or};
use crate::input::PointerSample;
use crate::reveal::{branch_pose, leaf_sway_pos};
use crate::tree::Tree;
use glam::Vec2;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rustle {
    pub origin: Vec2,
    /// Unit push direction.
    pub dir: Vec2,
    pub strength: f32,
    pub radius: f32,
    pub start: f64,
    pub duration: f32,
}

impl Rustle {
    /// Build a rustle from pointer speed and travel direction.
    pub fn from_pointer(origin: Vec2, velocity: Vec2, start: f64) -> Self {
        let speed = velocity.length();
        let strength =
            (speed / RUSTLE_SPEED_NORM).clamp(RUSTLE_STRENGTH_MIN, RUSTLE_STRENGTH_MAX);
        Self {
            origin,
            dir: unit_or(velocity, Vec2::X),
            strength,
            radius: RUSTLE_RADIUS_BASE + strength * RUSTLE_RADIUS_SPAN,
            start,
            duration: RUSTLE_DURATION_BASE + strength * RUSTLE_DURATION_SPAN,
        }
    }

    #[inline]
    pub fn age(&self, t: f64) -> f32 {
        ((t - self.start) / self.duration.max(f32::EPSILON) as f64) as f32
    }

    #[inline]
    pub fn expired(&self, t: f64) -> bool {
        t - self.start > self.duration as f64
    }

    /// Cubic temporal decay times radial falloff; zero outside the radius or lifetime.
    pub fn weight_at(&self, p: Vec2, t: f64) -> f32 {
        let age = self.age(t);
        if !(0.0..=1.0).contains(&age) {
            return 0.0;
        }
        let r2 = self.radius * self.radius;
        let d2 = p.distance_squared(self.origin);
        if r2 <= 0.0 || d2 > r2 {
            return 0.0;
        }
        (1.0 - age).powi(3) * (1.0 - d2 / r2)
    }
}

#[derive(Debug, Default)]
pub struct DisturbanceField {
    events: VecDeque<Rustle>,
    last_trigger: Option<f64>,
}

impl DisturbanceField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> impl Iterator<Item = &Rustle> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.last_trigger = None;
    }

    /// Append an event, dropping the oldest beyond the history cap.
    pub fn push(&mut self, rustle: Rustle) {
        self.events.push_back(rustle);
        while self.events.len() > RUSTLE_HISTORY {
            self.events.pop_front();
        }
    }

    pub fn prune(&mut self, now: f64) {
        self.events.retain(|e| !e.expired(now));
    }

    /// Summed push vector at `p`: each live event's direction scaled by its
    /// strength and weight.
    pub fn sample(&self, p: Vec2, t: f64) -> Vec2 {
        self.events
            .iter()
            .fold(Vec2::ZERO, |acc, e| acc + e.dir * (e.strength * e.weight_at(p, t)))
    }

    /// Non-negative scalar magnitude of the field at `p`.
    pub fn intensity(&self, p: Vec2, t: f64) -> f32 {
        self.events
            .iter()
            .map(|e| e.strength * e.weight_at(p, t))
            .sum()
    }

    /// Feed one pointer-move sample; spawns a rustle when a fast stroke
    /// crosses visible branches or leaves.
    pub fn on_pointer_move(
        &mut self,
        sample: &PointerSample,
        tree: &Tree,
        progress: f32,
        maturity: f32,
    ) -> Option<AudioCue> {
        if sample.speed() < RUSTLE_SPEED_THRESHOLD {
            return None;
        }
        if let Some(last) = self.last_trigger {
            if sample.time - last < RUSTLE_RETRIGGER_SECS {
                return None;
            }
        }
        let kind = hit_test(tree, sample.pos, progress, maturity, sample.time)?;

        let rustle = Rustle::from_pointer(sample.pos, sample.velocity, sample.time);
        log::debug!(
            "[rustle] {:?} at ({:.0},{:.0}) strength={:.2}",
            kind,
            sample.pos.x,
            sample.pos.y,
            rustle.strength
        );
        self.last_trigger = Some(sample.time);
        self.push(rustle);
        Some(AudioCue::Rustle {
            kind,
            intensity: rustle.strength,
        })
    }

    /// Move every timestamp forward by `dt`, e.g. after a pause.
    pub fn shift_time(&mut self, dt: f64) {
        for e in &mut self.events {
            e.start += dt;
        }
        if let Some(t) = self.last_trigger.as_mut() {
            *t += dt;
        }
    }

    pub fn rescale(&mut self, sx: f32, sy: f32) {
        for e in &mut self.events {
            e.origin = Vec2::new(e.origin.x * sx, e.origin.y * sy);
        }
    }
}

/// What, if anything, the pointer at `p` touches: branches win over leaves.
pub fn hit_test(tree: &Tree, p: Vec2, progress: f32, maturity: f32, t: f64) -> Option<RustleKind> {
    if !tree.bounds.contains_with_margin(p, RUSTLE_BOUNDS_MARGIN) {
        return None;
    }

    for branch in &tree.branches {
        let Some(pose) = branch_pose(branch, progress, t) else {
            continue;
        };
        let reach = RUSTLE_BRANCH_HIT_BASE + RUSTLE_BRANCH_HIT_PER_WIDTH * branch.width;
        let reach_sq = reach * reach;
        let points = pose.drawn_points();
        if points
            .windows(2)
            .any(|seg| dist_sq_to_segment(p, seg[0], seg[1]) <= reach_sq)
        {
            return Some(RustleKind::Branch);
        }
    }

    let leaf_r2 = RUSTLE_LEAF_HIT_RADIUS * RUSTLE_LEAF_HIT_RADIUS;
    let seasonal = tree
        .leaves
        .iter()
        .filter(|l| progress > l.reveal)
        .any(|l| leaf_sway_pos(l, t).distance_squared(p) <= leaf_r2);
    let mature = || {
        tree.mature_leaves
            .iter()
            .filter(|l| maturity > l.reveal)
            .any(|l| leaf_sway_pos(l, t).distance_squared(p) <= leaf_r2)
    };
    (seasonal || mature()).then_some(RustleKind::Leaf)
}
