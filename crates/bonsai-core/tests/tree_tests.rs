// Tree generation: determinism, structure and reveal intervals.

use bonsai_core::constants::*;
use bonsai_core::*;

fn make_tree(seed: u32, w: f32, h: f32) -> (SceneConfig, Tree) {
    let config = SceneConfig::generate(seed);
    let tree = Tree::generate(seed ^ TREE_SEED_XOR, &config, Viewport::new(w, h));
    (config, tree)
}

#[test]
fn seed_42_full_hd_is_reproducible() {
    let (_, a) = make_tree(42, 1920.0, 1080.0);
    let (_, b) = make_tree(42, 1920.0, 1080.0);
    assert_eq!(a.branches.len(), b.branches.len());
    assert_eq!(a.branches[0].p1, b.branches[0].p1);
    assert_eq!(a.branches[0].p2, b.branches[0].p2);
    assert_eq!(a.leaves.len(), b.leaves.len());
    assert_eq!(a.mature_leaves.len(), b.mature_leaves.len());
    assert_eq!(a.branches, b.branches, "branch records differ");
    assert_eq!(a.leaves, b.leaves, "seasonal leaves differ");
    assert_eq!(a.mature_leaves, b.mature_leaves, "mature leaves differ");
    assert_eq!(a.draw_order, b.draw_order);
}

#[test]
fn trunk_is_vertical_root() {
    let (config, tree) = make_tree(42, 1920.0, 1080.0);
    let vp = Viewport::new(1920.0, 1080.0);
    let trunk = &tree.branches[0];
    assert_eq!(trunk.depth, 0);
    assert_eq!(trunk.p1, config.tree_anchor_px(&vp));
    assert_eq!(trunk.p1.x, trunk.p2.x);
    assert!(trunk.p2.y < trunk.p1.y, "trunk should grow upward");
    assert_eq!(trunk.start, 0.0);
    assert!((trunk.end - TRUNK_INTERVAL_END).abs() < 1e-6);
    assert_eq!(tree.anchor, trunk.p1);
}

#[test]
fn reveal_intervals_are_well_formed() {
    for seed in [1u32, 42, 777, 0xBEEF, 0xFFFF_FFFF] {
        let (_, tree) = make_tree(seed, 1280.0, 720.0);
        for (i, b) in tree.branches.iter().enumerate() {
            assert!(b.start >= 0.0, "seed {seed} branch {i} start {}", b.start);
            assert!(b.start < b.end, "seed {seed} branch {i}: {} >= {}", b.start, b.end);
            assert!(b.end <= 1.0, "seed {seed} branch {i} end {}", b.end);
        }
    }
}

#[test]
fn children_start_inside_parent_interval() {
    for seed in [3u32, 42, 2024, 0xC0FFEE] {
        let (_, tree) = make_tree(seed, 1920.0, 1080.0);
        for i in 1..tree.branches.len() {
            let child = &tree.branches[i];
            let parent = tree
                .parent_of(i)
                .map(|p| &tree.branches[p])
                .unwrap_or_else(|| panic!("seed {seed}: branch {i} has no parent"));
            assert_eq!(parent.depth + 1, child.depth);
            assert!(
                child.start >= parent.start - 1e-6 && child.start <= parent.end + 1e-6,
                "seed {seed} branch {i}: start {} outside parent [{}, {}]",
                child.start,
                parent.start,
                parent.end
            );
        }
    }
}

#[test]
fn depth_and_fanout_are_bounded() {
    let (config, tree) = make_tree(42, 1920.0, 1080.0);
    for (i, b) in tree.branches.iter().enumerate() {
        assert!(b.depth <= config.max_depth);
        assert!(tree.children_of(i).len() <= 2);
        if b.depth > 0 {
            assert!(b.width >= BRANCH_MIN_WIDTH);
        }
    }
    assert_eq!(tree.children_of(0).len(), 2, "trunk always forks");
    assert!(tree.children_of(tree.branches.len() + 5).is_empty());
}

#[test]
fn draw_order_is_trunk_first_by_depth() {
    let (_, tree) = make_tree(42, 1920.0, 1080.0);
    assert_eq!(tree.draw_order.len(), tree.branches.len());
    assert_eq!(tree.draw_order[0], 0);
    let depths: Vec<u32> = tree
        .draw_order
        .iter()
        .map(|&i| tree.branches[i as usize].depth)
        .collect();
    assert!(depths.windows(2).all(|w| w[0] <= w[1]), "draw order not depth-sorted");
}

#[test]
fn crown_never_rises_above_ceiling() {
    for seed in [1u32, 42, 99, 4096] {
        let (_, tree) = make_tree(seed, 1024.0, 768.0);
        let ceiling = 768.0 * CROWN_CEILING_FRAC;
        for b in &tree.branches {
            assert!(b.p2.y >= ceiling - 1e-3, "seed {seed}: tip at {} above {ceiling}", b.p2.y);
        }
    }
}

#[test]
fn leaves_and_bounds_cover_the_crown() {
    let (_, tree) = make_tree(42, 1920.0, 1080.0);
    assert!(!tree.leaves.is_empty());
    assert!(!tree.mature_leaves.is_empty());
    assert_eq!(tree.leaf_count(), tree.leaves.len() + tree.mature_leaves.len());
    assert!(!tree.bounds.is_empty());
    for b in &tree.branches {
        assert!(tree.bounds.contains_with_margin(b.p2, 0.0));
    }
    for l in tree.leaves.iter().chain(tree.mature_leaves.iter()) {
        assert!(tree.bounds.contains_with_margin(l.pos, 0.0));
        assert!(l.size > 0.0);
    }
    for l in &tree.leaves {
        assert!((0.07..=0.9).contains(&l.reveal), "appear {}", l.reveal);
    }
    for l in &tree.mature_leaves {
        assert!((0.0..=0.45).contains(&l.reveal), "delay {}", l.reveal);
    }
}

#[test]
fn tree_scales_with_viewport() {
    let (_, small) = make_tree(42, 960.0, 540.0);
    let (_, large) = make_tree(42, 1920.0, 1080.0);
    assert!(large.branches[0].length > small.branches[0].length);
    assert!((large.branches[0].length / small.branches[0].length - 2.0).abs() < 1e-4);
}

#[test]
fn zero_viewport_still_terminates() {
    let (_, tree) = make_tree(42, 0.0, 0.0);
    assert_eq!(tree.branches.len(), 1, "zero-length trunk is terminal");
    assert!(!tree.leaves.is_empty());
}

#[test]
fn branch_pose_grows_over_its_interval() {
    let (_, tree) = make_tree(42, 1920.0, 1080.0);
    let b = tree.branches[1];
    assert!(branch_pose(&b, b.start, 0.0).is_none());
    assert!(branch_pose(&b, 0.0, 0.0).is_none());

    let mid = branch_pose(&b, (b.start + b.end) * 0.5, 0.0).expect("visible mid-interval");
    let done = branch_pose(&b, 1.0, 0.0).expect("visible once grown");
    assert!(mid.grow > 0.0 && mid.grow < done.grow);
    assert!((done.grow - 1.0).abs() < 1e-5);
    assert_eq!(done.drawn_segments(), BRANCH_SEGMENTS);
    assert_eq!(done.drawn_points().len(), BRANCH_SEGMENTS + 1);
    assert!(mid.drawn_segments() >= 2);
    assert!(done.alpha <= 0.97 + 1e-6 && done.alpha >= 0.35);
    assert_eq!(mid.p0, b.p1);
}

#[test]
fn displaced_pose_moves_tip_and_half_control() {
    let (_, tree) = make_tree(42, 1920.0, 1080.0);
    let pose = branch_pose(&tree.branches[0], 1.0, 0.0).expect("trunk visible");
    let moved = pose.displaced(glam::Vec2::new(10.0, -4.0));
    assert_eq!(moved.p0, pose.p0);
    assert_eq!(moved.p1, pose.p1 + glam::Vec2::new(5.0, -2.0));
    assert_eq!(moved.p2, pose.p2 + glam::Vec2::new(10.0, -4.0));
}

#[test]
fn leaf_poses_bloom_after_reveal() {
    let (_, tree) = make_tree(42, 1920.0, 1080.0);
    let leaf = tree.leaves[0];
    assert!(seasonal_leaf_pose(&leaf, leaf.reveal, 1.0).is_none());
    let full = seasonal_leaf_pose(&leaf, leaf.reveal + SEASONAL_BLOOM_SPAN, 1.0)
        .expect("bloomed");
    assert!((full.size - leaf.size).abs() < 1e-4);
    assert_eq!(full.alpha, 1.0);

    let mature = tree.mature_leaves[0];
    assert!(mature_leaf_pose(&mature, 0.0, 1.0).is_none());
    let pose = mature_leaf_pose(&mature, 1.0, 1.0).expect("mature leaves bloom by full boost");
    assert!((pose.alpha - MATURE_ALPHA_SCALE).abs() < 1e-6);
    assert!((0.0..std::f32::consts::TAU + 1e-4).contains(&pose.rotation));
}

#[test]
fn parent_and_child_links_agree() {
    let (_, tree) = make_tree(2024, 1280.0, 720.0);
    assert_eq!(tree.parent_of(0), None);
    assert_eq!(tree.children.len(), tree.branches.len());
    let mut linked = 0;
    for (i, b) in tree.branches.iter().enumerate() {
        for &c in tree.children_of(i) {
            let child = &tree.branches[c as usize];
            assert_eq!(tree.parent_of(c as usize), Some(i));
            assert!(c as usize > i, "children are spawned after their parent");
            assert_eq!(child.p1, b.p2, "child {c} starts at the tip of {i}");
            linked += 1;
        }
    }
    assert_eq!(linked, tree.branches.len() - 1, "every non-trunk branch has one parent");
}
