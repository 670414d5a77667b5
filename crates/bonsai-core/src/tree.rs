//! Seeded branch/leaf generation.
//!
//! Branches are grown depth-first from a vertical trunk. The builder keeps an
//! explicit stack of nodes with children still to spawn instead of recursing,
//! but visits nodes in exactly the order a recursive grower would, so every
//! random draw lands on the same decision for a given seed.

use crate::config::{SceneConfig, Viewport};
use crate::constants::*;
use crate::geom::{lerp, unit_or, Bounds};
use crate::rng::SeededRandom;
use glam::Vec2;
use smallvec::SmallVec;
use std::f32::consts::FRAC_PI_2;

/// One quadratic branch segment with its reveal interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Branch {
    pub p1: Vec2,
    pub p2: Vec2,
    pub control: Vec2,
    pub angle: f32,
    pub length: f32,
    pub width: f32,
    pub depth: u32,
    /// Index of the branch this one grew from; `None` for the trunk.
    pub parent: Option<u32>,
    /// Cycle progress at which the branch starts drawing.
    pub start: f32,
    /// Cycle progress at which the branch is fully drawn.
    pub end: f32,
}

impl Branch {
    #[inline]
    pub fn interval_len(&self) -> f32 {
        self.end - self.start
    }
}

/// A leaf or blossom.
///
/// `reveal` is the seasonal `appear` key (compared against cycle progress) for
/// leaves in [`Tree::leaves`], and the `delay` key (compared against the
/// maturity boost) for leaves in [`Tree::mature_leaves`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Leaf {
    pub pos: Vec2,
    pub size: f32,
    pub tone: f32,
    pub sway: f32,
    pub blossom: bool,
    pub hue: f32,
    pub sat: f32,
    pub light: f32,
    pub reveal: f32,
}

#[derive(Clone, Debug)]
pub struct Tree {
    pub anchor: Vec2,
    pub branches: Vec<Branch>,
    /// Child indices per branch, in spawn order.
    pub children: Vec<SmallVec<[u32; 2]>>,
    /// Branch indices sorted by depth (stable), trunk first.
    pub draw_order: Vec<u32>,
    pub leaves: Vec<Leaf>,
    pub mature_leaves: Vec<Leaf>,
    pub bounds: Bounds,
}

impl Tree {
    pub fn generate(seed: u32, config: &SceneConfig, viewport: Viewport) -> Self {
        TreeBuilder::new(seed, config, viewport).build()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len() + self.mature_leaves.len()
    }

    pub fn parent_of(&self, child: usize) -> Option<usize> {
        self.branches.get(child)?.parent.map(|p| p as usize)
    }

    pub fn children_of(&self, parent: usize) -> &[u32] {
        self.children.get(parent).map_or(&[], |c| c.as_slice())
    }
}

/// A branch whose children have not all been spawned yet.
struct Pending {
    branch: usize,
    next_child: u8,
    child_count: u8,
}

struct TreeBuilder<'a> {
    rng: SeededRandom,
    config: &'a SceneConfig,
    viewport: Viewport,
    max_depth: u32,
    branches: Vec<Branch>,
    leaves: Vec<Leaf>,
    mature_leaves: Vec<Leaf>,
}

impl<'a> TreeBuilder<'a> {
    fn new(seed: u32, config: &'a SceneConfig, viewport: Viewport) -> Self {
        Self {
            rng: SeededRandom::new(seed),
            config,
            viewport,
            max_depth: config.max_depth,
            branches: Vec::with_capacity(512),
            leaves: Vec::with_capacity(2048),
            mature_leaves: Vec::with_capacity(1024),
        }
    }

    fn build(mut self) -> Tree {
        let vp = self.viewport;
        let anchor = self.config.tree_anchor_px(&vp);
        let trunk_len = vp.min_side() * self.config.trunk_scale;
        let root = Branch {
            p1: anchor,
            p2: Vec2::new(anchor.x, anchor.y - trunk_len),
            control: Vec2::new(
                anchor.x - vp.width * self.rng.range(0.015, 0.045),
                anchor.y - trunk_len * 0.56,
            ),
            angle: -FRAC_PI_2,
            length: trunk_len,
            width: vp.min_side() * TRUNK_WIDTH_FRAC,
            depth: 0,
            parent: None,
            start: 0.0,
            end: TRUNK_INTERVAL_END,
        };

        let mut stack: Vec<Pending> = Vec::with_capacity(self.max_depth as usize + 2);
        if let Some(p) = self.visit(root) {
            stack.push(p);
        }

        while let Some(top) = stack.last_mut() {
            if top.next_child >= top.child_count {
                stack.pop();
                continue;
            }
            let parent_index = top.branch;
            let parent = self.branches[parent_index];
            let index = top.next_child;
            top.next_child += 1;

            let child = self.spawn_child(&parent, parent_index as u32, index);
            if let Some(p) = self.visit(child) {
                stack.push(p);
            }
        }

        self.finish(anchor)
    }

    /// Record `node`, emit its leaf clusters, and decide how many children it gets.
    fn visit(&mut self, node: Branch) -> Option<Pending> {
        let index = self.branches.len();
        self.branches.push(node);

        let depth_n = if self.max_depth > 0 {
            node.depth as f32 / self.max_depth as f32
        } else {
            1.0
        };
        // The length draw only happens below max depth.
        let terminal = node.depth >= self.max_depth || node.length < self.rng.range(10.0, 16.0);
        if terminal {
            self.leaf_cluster(node.p2, depth_n, node.end + 0.005, TERMINAL_CLUSTER_DENSITY);
            return None;
        }

        if node.depth >= 2 && node.depth + 2 <= self.max_depth && self.rng.chance_above(0.52) {
            self.leaf_cluster(node.p2, depth_n, node.end + 0.01, INTERIOR_CLUSTER_DENSITY);
        }

        let child_count = match node.depth {
            0 | 1 => 2,
            2..=4 => {
                if self.rng.chance_above(0.12) {
                    2
                } else {
                    1
                }
            }
            _ => {
                if self.rng.chance_above(0.42) {
                    2
                } else {
                    1
                }
            }
        };
        Some(Pending {
            branch: index,
            next_child: 0,
            child_count,
        })
    }

    fn spawn_child(&mut self, node: &Branch, node_index: u32, index: u8) -> Branch {
        let vp = self.viewport;
        let rng = &mut self.rng;

        let side = if index == 0 { -1.0 } else { 1.0 };
        let spread = rng.range(0.25, 0.74) * side;
        let turn = rng.range(-0.24, 0.24);
        let angle = node.angle + spread + turn;
        let len_factor = if node.depth <= 2 {
            rng.range(0.63, 0.79)
        } else {
            rng.range(0.56, 0.74)
        };
        let length = node.length * len_factor;
        let mut tip = node.p2 + Vec2::new(angle.cos(), angle.sin()) * length;

        let ceiling = vp.height * CROWN_CEILING_FRAC;
        if tip.y < ceiling {
            let compress = if ceiling > 0.0 {
                ((ceiling - tip.y) / ceiling).clamp(CROWN_COMPRESS_MIN, CROWN_COMPRESS_MAX)
            } else {
                CROWN_COMPRESS_MIN
            };
            tip.x = lerp(node.p2.x, tip.x, 1.0 - compress);
            tip.y = ceiling;
        }

        let mid_t = rng.range(0.32, 0.68);
        let mid = node.p2.lerp(tip, mid_t);
        let chord = tip - node.p2;
        let normal = unit_or(Vec2::new(-chord.y, chord.x), Vec2::new(-1.0, 0.0));
        let curve = rng.range(-12.0, 12.0) * (1.0 + node.depth as f32 * 0.16);

        let start = (node.start + node.interval_len() * rng.range(0.34, 0.6)).clamp(0.0, 1.0);
        let duration = (BRANCH_DURATION_BASE - node.depth as f32 * BRANCH_DURATION_PER_DEPTH
            + rng.range(-0.02, 0.02))
        .clamp(BRANCH_DURATION_MIN, BRANCH_DURATION_MAX);
        let end = (start + duration).clamp(0.0, 1.0);

        Branch {
            p1: node.p2,
            p2: tip,
            control: mid + normal * curve,
            angle,
            length,
            width: (node.width * rng.range(0.69, 0.83)).max(BRANCH_MIN_WIDTH),
            depth: node.depth + 1,
            parent: Some(node_index),
            start,
            end,
        }
    }

    fn leaf_cluster(&mut self, at: Vec2, depth_n: f32, appear_base: f32, density: f32) {
        let hue_base = self.config.leaf_hue_base;
        let hue_span = self.config.leaf_hue_span;
        let rng = &mut self.rng;

        let burst = (rng.range(5.0, 11.0) * density).floor() as usize;
        for _ in 0..burst {
            let offset = Vec2::new(rng.range(-12.0, 12.0), rng.range(-10.0, 10.0));
            let appear = (appear_base + rng.range(0.01, 0.13)).clamp(0.07, 0.9);
            let size = rng.range(9.0, 21.0) * (1.0 - depth_n * 0.17);
            self.leaves.push(Leaf {
                pos: at + offset,
                size,
                tone: rng.next() as f32,
                sway: rng.range(0.5, 1.7),
                blossom: rng.chance_above(0.9),
                hue: hue_base + rng.range(0.0, hue_span),
                sat: rng.range(45.0, 74.0),
                light: rng.range(30.0, 48.0),
                reveal: appear,
            });
        }

        let mature_burst = ((rng.range(4.0, 9.0) * density * 1.1).floor() as usize).max(3);
        for _ in 0..mature_burst {
            let offset = Vec2::new(rng.range(-16.0, 16.0), rng.range(-14.0, 14.0));
            let delay = rng.range(0.0, 0.45);
            let size = rng.range(8.0, 16.0) * (1.0 - depth_n * 0.12);
            self.mature_leaves.push(Leaf {
                pos: at + offset,
                size,
                tone: rng.next() as f32,
                sway: rng.range(0.5, 1.7),
                blossom: rng.chance_above(0.93),
                hue: hue_base + rng.range(0.0, hue_span),
                sat: rng.range(46.0, 74.0),
                light: rng.range(29.0, 47.0),
                reveal: delay,
            });
        }
    }

    fn finish(self, anchor: Vec2) -> Tree {
        let mut bounds = Bounds::EMPTY;
        for b in &self.branches {
            bounds.include(b.p1);
            bounds.include(b.p2);
            bounds.include(b.control);
        }
        for leaf in self.leaves.iter().chain(self.mature_leaves.iter()) {
            bounds.include(leaf.pos);
        }

        let mut children = vec![SmallVec::new(); self.branches.len()];
        for (i, b) in self.branches.iter().enumerate() {
            if let Some(p) = b.parent {
                children[p as usize].push(i as u32);
            }
        }

        let mut draw_order: Vec<u32> = (0..self.branches.len() as u32).collect();
        draw_order.sort_by_key(|&i| self.branches[i as usize].depth);

        Tree {
            anchor,
            branches: self.branches,
            children,
            draw_order,
            leaves: self.leaves,
            mature_leaves: self.mature_leaves,
            bounds,
        }
    }
}
