//! Seed-derived scene layout.
//!
//! Every field is drawn from a single [`SeededRandom`] in a fixed order, so the
//! draw sequence in [`SceneConfig::generate`] must not be reordered: doing so
//! changes every scene for every seed.

use crate::constants::{POND_ROTATION, STONE_SIZE_FRAC};
use crate::geom::Ellipse;
use crate::rng::SeededRandom;
use glam::Vec2;
use std::f32::consts::TAU;

pub const STONE_COUNT: usize = 2;
pub const SPECKLES_PER_STONE: usize = 10;

/// Drawable area in CSS pixels. Negative or non-finite sizes collapse to zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        let sane = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            width: sane(width),
            height: sane(height),
        }
    }

    #[inline]
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Map a normalized coordinate into pixels.
    #[inline]
    pub fn to_px(&self, nx: f32, ny: f32) -> Vec2 {
        Vec2::new(self.width * nx, self.height * ny)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Speckle {
    pub x: f32, // in stone sizes
    pub y: f32,
    pub r: f32,
    pub tone: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stone {
    pub x: f32, // normalized
    pub y: f32,
    pub scale: f32,
    pub rot: f32,
    pub speckles: [Speckle; SPECKLES_PER_STONE],
}

impl Stone {
    pub fn base_px(&self, vp: &Viewport) -> Vec2 {
        vp.to_px(self.x, self.y)
    }

    /// Edge length the stone is drawn at.
    pub fn size_px(&self, vp: &Viewport) -> f32 {
        vp.min_side() * STONE_SIZE_FRAC * self.scale
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub seed: u32,
    pub tree_base_x: f32,
    pub tree_base_y: f32,
    pub trunk_scale: f32,
    pub max_depth: u32,
    pub leaf_hue_base: f32,
    pub leaf_hue_span: f32,
    pub pond_x: f32,
    pub pond_y: f32,
    pub pond_w: f32,
    pub pond_h: f32,
    pub sky_shift: f32,
    pub torii_x: f32,
    pub torii_scale: f32,
    pub cloud_phase: f32,
    pub stones: [Stone; STONE_COUNT],
}

impl SceneConfig {
    pub fn generate(seed: u32) -> Self {
        let mut rng = SeededRandom::new(seed);

        // Stone placements first, then their speckles.
        let placements = [
            (
                rng.range(0.72, 0.79),
                rng.range(0.75, 0.79),
                rng.range(1.0, 1.16),
                rng.range(-0.36, -0.22),
            ),
            (
                rng.range(0.81, 0.88),
                rng.range(0.8, 0.84),
                rng.range(0.78, 0.92),
                rng.range(-0.16, -0.06),
            ),
        ];
        let stones = placements.map(|(x, y, scale, rot)| Stone {
            x,
            y,
            scale,
            rot,
            speckles: std::array::from_fn(|_| Speckle {
                x: rng.range(-0.62, 0.62),
                y: rng.range(-0.44, 0.44),
                r: rng.range(0.018, 0.05),
                tone: rng.next() as f32,
            }),
        });

        Self {
            seed,
            tree_base_x: rng.range(0.46, 0.56),
            tree_base_y: rng.range(0.75, 0.81),
            trunk_scale: rng.range(0.17, 0.22),
            max_depth: rng.range(8.2, 11.2).floor() as u32,
            leaf_hue_base: rng.range(108.0, 134.0),
            leaf_hue_span: rng.range(22.0, 36.0),
            pond_x: rng.range(0.22, 0.36),
            pond_y: rng.range(0.77, 0.85),
            pond_w: rng.range(0.3, 0.43),
            pond_h: rng.range(0.075, 0.12),
            sky_shift: rng.range(-8.0, 12.0),
            torii_x: rng.range(0.09, 0.17),
            torii_scale: rng.range(0.95, 1.25),
            cloud_phase: rng.range(0.0, TAU),
            stones,
        }
    }

    pub fn tree_anchor_px(&self, vp: &Viewport) -> Vec2 {
        vp.to_px(self.tree_base_x, self.tree_base_y)
    }

    /// Pond outline: the rectangle's inscribed ellipse, tilted slightly.
    pub fn pond_ellipse(&self, vp: &Viewport) -> Ellipse {
        Ellipse {
            center: vp.to_px(self.pond_x, self.pond_y),
            radii: Vec2::new(vp.width * self.pond_w * 0.5, vp.height * self.pond_h * 0.5),
            rotation: POND_ROTATION,
        }
    }

    /// Full pond width/height in pixels.
    pub fn pond_size_px(&self, vp: &Viewport) -> Vec2 {
        Vec2::new(vp.width * self.pond_w, vp.height * self.pond_h)
    }
}
