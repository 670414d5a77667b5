use crate::constants::*;
use bonsai_core::{FrameSnapshot, Mote, Petal, SceneConfig, Viewport};

pub fn petals(out: &mut Vec<f32>, petals: &[Petal]) {
    out.clear();
    out.reserve(petals.len() * PETAL_STRIDE);
    for p in petals {
        out.extend_from_slice(&[
            p.x,
            p.y,
            p.z,
            p.spin,
            p.size,
            if p.warm { 1.0 } else { 0.0 },
            p.alpha(),
        ]);
    }
}

pub fn motes(out: &mut Vec<f32>, motes: &[Mote], t: f64) {
    out.clear();
    out.reserve(motes.len() * MOTE_STRIDE);
    for m in motes {
        out.extend_from_slice(&[m.x, m.y, m.r, if m.cool { 1.0 } else { 0.0 }, m.alpha(t)]);
    }
}

/// Static scene layout the host needs for the backdrop, pond and stones:
/// sky shift, torii x/scale, cloud phase, hue base/span, pond center/radii/rotation.
pub fn config(out: &mut Vec<f32>, config: &SceneConfig, vp: &Viewport) {
    let pond = config.pond_ellipse(vp);
    out.clear();
    out.extend_from_slice(&[
        config.sky_shift,
        config.torii_x,
        config.torii_scale,
        config.cloud_phase,
        config.leaf_hue_base,
        config.leaf_hue_span,
        pond.center.x,
        pond.center.y,
        pond.radii.x,
        pond.radii.y,
        pond.rotation,
        config.max_depth as f32,
    ]);
    debug_assert_eq!(out.len(), CONFIG_STRIDE);
}

/// Reusable float buffers, refilled from each frame's snapshot.
#[derive(Default)]
pub struct FrameBuffers {
    pub branches: Vec<f32>,
    pub leaves: Vec<f32>,
    pub ripples: Vec<f32>,
    pub stones: Vec<f32>,
    pub petals: Vec<f32>,
    pub motes: Vec<f32>,
}

impl FrameBuffers {
    pub fn fill(&mut self, snap: &FrameSnapshot) {
        refill(&mut self.branches, bytemuck::cast_slice(&snap.branch_instances()));
        refill(&mut self.leaves, bytemuck::cast_slice(&snap.leaf_instances()));
        refill(&mut self.ripples, bytemuck::cast_slice(&snap.ripple_instances()));
        refill(&mut self.stones, bytemuck::cast_slice(&snap.stone_instances()));
        petals(&mut self.petals, &snap.petals);
        motes(&mut self.motes, &snap.motes, snap.time);
        debug_assert_eq!(self.branches.len() % BRANCH_STRIDE, 0);
        debug_assert_eq!(self.leaves.len() % LEAF_STRIDE, 0);
        debug_assert_eq!(self.ripples.len() % RIPPLE_STRIDE, 0);
        debug_assert_eq!(self.stones.len() % STONE_STRIDE, 0);
    }
}

fn refill(out: &mut Vec<f32>, src: &[f32]) {
    out.clear();
    out.extend_from_slice(src);
}
