//! Render-time poses: how far each branch has grown, where it sways to, and
//! how far each leaf has bloomed, for a given progress and time.
//!
//! These functions never touch the [`Tree`](crate::tree::Tree); they derive a
//! fresh pose every frame so interaction can displace them freely.

use crate::constants::*;
use crate::geom::{ease_out_cubic, quad_point};
use crate::tree::{Branch, Leaf};
use glam::Vec2;
use smallvec::SmallVec;
use std::f64::consts::PI;

pub type CurvePoints = SmallVec<[Vec2; BRANCH_SEGMENTS + 1]>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BranchPose {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    /// Eased growth used for curve length and width.
    pub grow: f32,
    pub alpha: f32,
    pub width: f32,
    pub depth: u32,
}

impl BranchPose {
    /// Number of the 24 curve segments currently drawn.
    pub fn drawn_segments(&self) -> usize {
        ((BRANCH_SEGMENTS as f32 * self.grow).floor() as usize).max(2)
    }

    /// Sample the partially grown curve at the resolution it is drawn with.
    pub fn drawn_points(&self) -> CurvePoints {
        let draw_to = self.drawn_segments();
        (0..=draw_to)
            .map(|i| quad_point(self.p0, self.p1, self.p2, i as f32 / BRANCH_SEGMENTS as f32))
            .collect()
    }

    /// Move the tip by `offset` and the control point by half of it.
    pub fn displaced(mut self, offset: Vec2) -> Self {
        self.p1 += offset * 0.5;
        self.p2 += offset;
        self
    }
}

/// Pose of `branch` at cycle progress `progress` and scene time `t` seconds,
/// or `None` while it has not started growing.
pub fn branch_pose(branch: &Branch, progress: f32, t: f64) -> Option<BranchPose> {
    let span = branch.interval_len();
    let span = if span > 0.0 { span } else { 1.0 };
    let local = ((progress - branch.start) / span).clamp(0.0, 1.0);
    if local <= 0.0 {
        return None;
    }
    let grow = ease_out_cubic(local);
    let depth = branch.depth as f64;
    let sway = ((t * 0.8 + depth * 0.65 + branch.p1.x as f64 * 0.01).sin()
        * (1.2 + depth * 0.1)) as f32;
    let fade = ((progress - branch.start) / BRANCH_FADE_SPAN).clamp(0.0, 1.0);

    Some(BranchPose {
        p0: branch.p1,
        p1: Vec2::new(branch.control.x + sway * 0.35, branch.control.y),
        p2: Vec2::new(branch.p2.x + sway, branch.p2.y),
        grow,
        alpha: 0.35 + 0.62 * fade,
        width: branch.width * (0.8 + 0.2 * grow),
        depth: branch.depth,
    })
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeafPose {
    pub pos: Vec2,
    /// Bloomed size (leaf size times eased bloom).
    pub size: f32,
    pub rotation: f32,
    pub alpha: f32,
    pub blossom: bool,
    pub hue: f32,
    pub sat: f32,
    pub light: f32,
}

impl LeafPose {
    pub fn displaced(mut self, offset: Vec2) -> Self {
        self.pos += offset;
        self
    }
}

/// Seasonal leaves bloom over a fixed span of cycle progress after `appear`.
pub fn seasonal_leaf_pose(leaf: &Leaf, progress: f32, t: f64) -> Option<LeafPose> {
    let local = ((progress - leaf.reveal) / SEASONAL_BLOOM_SPAN).clamp(0.0, 1.0);
    (local > 0.0).then(|| leaf_pose(leaf, ease_out_cubic(local), 1.0, t))
}

/// Mature leaves bloom over the maturity boost after their `delay`.
pub fn mature_leaf_pose(leaf: &Leaf, maturity: f32, t: f64) -> Option<LeafPose> {
    let local = ((maturity - leaf.reveal) / MATURE_BLOOM_SPAN).clamp(0.0, 1.0);
    (local > 0.0).then(|| leaf_pose(leaf, ease_out_cubic(local), MATURE_ALPHA_SCALE, t))
}

/// Swayed position of a leaf at time `t`, without bloom.
pub fn leaf_sway_pos(leaf: &Leaf, t: f64) -> Vec2 {
    let sway = leaf.sway as f64;
    let dx = (t * 1.25 * sway + leaf.pos.x as f64 * 0.04).sin() * 2.6;
    let dy = (t * 1.05 * sway + leaf.pos.y as f64 * 0.03).cos() * 1.2;
    leaf.pos + Vec2::new(dx as f32, dy as f32)
}

fn leaf_pose(leaf: &Leaf, bloom: f32, alpha: f32, t: f64) -> LeafPose {
    LeafPose {
        pos: leaf_sway_pos(leaf, t),
        size: leaf.size * bloom,
        rotation: ((leaf.tone as f64 * PI * 1.8 + t * 0.05) % (2.0 * PI)) as f32,
        alpha,
        blossom: leaf.blossom,
        hue: leaf.hue,
        sat: leaf.sat,
        light: leaf.light,
    }
}
