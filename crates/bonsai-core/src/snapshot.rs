//! Read-only per-frame view handed to the render consumer.

use crate::config::STONE_COUNT;
use crate::constants::{RUSTLE_BRANCH_PUSH, RUSTLE_LEAF_PUSH};
use crate::particles::{Mote, Petal};
use crate::reveal::{branch_pose, mature_leaf_pose, seasonal_leaf_pose, BranchPose, LeafPose};
use crate::ripples::RippleRender;
use crate::scene::SceneState;
use crate::stones::StoneTransform;
use bytemuck::{Pod, Zeroable};

#[derive(Clone, Debug)]
pub struct FrameSnapshot {
    pub time: f64,
    pub progress: f32,
    pub maturity: f32,
    /// Visible branches, trunk first (depth order), already displaced by rustles.
    pub branches: Vec<BranchPose>,
    pub leaves: Vec<LeafPose>,
    pub mature_leaves: Vec<LeafPose>,
    pub ripples: Vec<RippleRender>,
    pub stones: [StoneTransform; STONE_COUNT],
    pub petals: Vec<Petal>,
    pub motes: Vec<Mote>,
}

impl FrameSnapshot {
    pub fn capture(scene: &SceneState, now: f64) -> Self {
        let progress = scene.progress(now);
        let maturity = scene.maturity(now);
        let tree = scene.tree();
        let field = scene.disturbances();
        let max_depth = scene.config().max_depth.max(1) as f32;

        let branches = tree
            .draw_order
            .iter()
            .filter_map(|&i| {
                let pose = branch_pose(&tree.branches[i as usize], progress, now)?;
                let depth_n = (pose.depth as f32 / max_depth).min(1.0);
                let push = field.sample(pose.p2, now) * RUSTLE_BRANCH_PUSH * (0.35 + 0.65 * depth_n);
                Some(pose.displaced(push))
            })
            .collect();

        let leaves = tree
            .leaves
            .iter()
            .filter_map(|l| seasonal_leaf_pose(l, progress, now))
            .map(|p| p.displaced(field.sample(p.pos, now) * RUSTLE_LEAF_PUSH))
            .collect();
        let mature_leaves = tree
            .mature_leaves
            .iter()
            .filter_map(|l| mature_leaf_pose(l, maturity, now))
            .map(|p| p.displaced(field.sample(p.pos, now) * RUSTLE_LEAF_PUSH))
            .collect();

        let ripples = scene
            .ripples()
            .ripples()
            .iter()
            .filter_map(|r| r.render(now))
            .collect();

        let stones =
            std::array::from_fn(|i| scene.stones().transform(i, scene.config(), &scene.viewport()));

        Self {
            time: now,
            progress,
            maturity,
            branches,
            leaves,
            mature_leaves,
            ripples,
            stones,
            petals: scene.particles().petals.clone(),
            motes: scene.particles().motes.clone(),
        }
    }

    pub fn branch_instances(&self) -> Vec<BranchInstance> {
        self.branches.iter().map(BranchInstance::from).collect()
    }

    /// Seasonal leaves followed by mature leaves.
    pub fn leaf_instances(&self) -> Vec<LeafInstance> {
        self.leaves
            .iter()
            .chain(self.mature_leaves.iter())
            .map(LeafInstance::from)
            .collect()
    }

    pub fn ripple_instances(&self) -> Vec<RippleInstance> {
        self.ripples.iter().map(RippleInstance::from).collect()
    }

    pub fn stone_instances(&self) -> Vec<StoneInstance> {
        self.stones.iter().map(StoneInstance::from).collect()
    }
}

// Packed forms for hosts that read flat float buffers.

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct BranchInstance {
    pub p0: [f32; 2],
    pub p1: [f32; 2],
    pub p2: [f32; 2],
    pub grow: f32,
    pub alpha: f32,
    pub width: f32,
    pub depth: f32,
}

impl From<&BranchPose> for BranchInstance {
    fn from(p: &BranchPose) -> Self {
        Self {
            p0: p.p0.to_array(),
            p1: p.p1.to_array(),
            p2: p.p2.to_array(),
            grow: p.grow,
            alpha: p.alpha,
            width: p.width,
            depth: p.depth as f32,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct LeafInstance {
    pub pos: [f32; 2],
    pub size: f32,
    pub rotation: f32,
    pub alpha: f32,
    pub hue: f32,
    pub sat: f32,
    pub light: f32,
    pub blossom: f32,
    pub _pad: f32,
}

impl From<&LeafPose> for LeafInstance {
    fn from(p: &LeafPose) -> Self {
        Self {
            pos: p.pos.to_array(),
            size: p.size,
            rotation: p.rotation,
            alpha: p.alpha,
            hue: p.hue,
            sat: p.sat,
            light: p.light,
            blossom: if p.blossom { 1.0 } else { 0.0 },
            _pad: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct RippleInstance {
    pub center: [f32; 2],
    pub radii: [f32; 2],
    pub angle: f32,
    pub alpha: f32,
    pub line_width: f32,
    pub _pad: f32,
}

impl From<&RippleRender> for RippleInstance {
    fn from(r: &RippleRender) -> Self {
        Self {
            center: r.center.to_array(),
            radii: r.radii.to_array(),
            angle: r.angle,
            alpha: r.alpha,
            line_width: r.line_width,
            _pad: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct StoneInstance {
    pub center: [f32; 2],
    pub size: f32,
    pub rotation: f32,
    pub lift: f32,
    pub tilt: f32,
    pub dragging: f32,
    pub _pad: f32,
}

impl From<&StoneTransform> for StoneInstance {
    fn from(s: &StoneTransform) -> Self {
        Self {
            center: s.center.to_array(),
            size: s.size,
            rotation: s.rotation,
            lift: s.lift,
            tilt: s.tilt,
            dragging: if s.dragging { 1.0 } else { 0.0 },
            _pad: 0.0,
        }
    }
}
