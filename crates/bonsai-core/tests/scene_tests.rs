// Scene aggregate: init, frame loop, input queue, pause, resize, snapshots.

use bonsai_core::constants::*;
use bonsai_core::*;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_scene(seed: u32, speed: f64) -> SceneState {
    let options = SceneOptions {
        seed: Some(seed),
        viewport: Viewport::new(1280.0, 720.0),
        speed,
    };
    SceneState::with_rng(options, 0.0, StdRng::seed_from_u64(5)).expect("valid options")
}

fn run_frames(scene: &mut SceneState, from: f64, count: usize, cues: &mut Vec<AudioCue>) -> f64 {
    let mut t = from;
    for _ in 0..count {
        t += 1.0 / 60.0;
        scene.frame(t, cues);
    }
    t
}

#[test]
fn scene_uses_sub_seeded_generators() {
    let scene = make_scene(42, 1.0);
    let vp = Viewport::new(1280.0, 720.0);
    assert_eq!(scene.seed(), 42);
    assert_eq!(scene.config(), &SceneConfig::generate(42));
    let tree = Tree::generate(42 ^ TREE_SEED_XOR, scene.config(), vp);
    assert_eq!(scene.tree().branches, tree.branches);
    let particles = ParticleField::generate(42 ^ PARTICLE_SEED_XOR, &vp);
    assert_eq!(scene.particles().petals, particles.petals);
    assert_eq!(scene.particles().motes, particles.motes);
}

#[test]
fn invalid_speed_fails_construction() {
    let options = SceneOptions {
        speed: 0.0,
        ..SceneOptions::default()
    };
    let err = SceneState::new(options, 0.0).err();
    assert!(matches!(err, Some(SceneError::InvalidSpeed(_))));
}

#[test]
fn randomize_replaces_the_scene() {
    let mut scene = make_scene(42, 1.0);
    scene.randomize(Some(7), 1.0);
    assert_eq!(scene.seed(), 7);
    assert_eq!(scene.config(), &SceneConfig::generate(7));
    scene.randomize(Some(42), 2.0);
    assert_eq!(scene.tree().branches, make_scene(42, 1.0).tree().branches);

    scene.randomize(None, 3.0);
    assert_eq!(scene.config(), &SceneConfig::generate(scene.seed()));
}

#[test]
fn restart_resets_growth() {
    let mut scene = make_scene(42, 1.0);
    assert!(scene.progress(150.0) > 0.4);
    scene.restart(Some(9), 150.0);
    assert_eq!(scene.progress(150.0), 0.0);
    assert_eq!(scene.seed(), 9);
}

#[test]
fn speed_changes_go_through_the_clock() {
    let mut scene = make_scene(42, 1.0);
    let before = scene.progress(30.0);
    scene.set_speed(30.0, 10.0).expect("valid speed");
    assert!((scene.progress(30.0) - before).abs() < 1e-6);
    assert!(scene.set_speed(31.0, -2.0).is_err());
    assert_eq!(scene.clock().speed(), 10.0);
}

#[test]
fn pause_freezes_progress_and_shifts_timers() {
    let mut scene = make_scene(42, 1.0);
    let mut cues = Vec::new();
    run_frames(&mut scene, 59.0, 60, &mut cues);

    let before = scene.progress(60.0);
    let next_ambient = scene.ripples().next_ambient_at();
    assert!(scene.toggle_pause(60.0));
    assert!(scene.is_paused());

    scene.push_pointer(PointerEvent::Move {
        pos: Vec2::new(10.0, 10.0),
        time: 62.0,
    });
    scene.frame(62.0, &mut cues);
    assert_eq!(scene.pending_input(), 0, "paused frames drop input");

    assert!(!scene.toggle_pause(65.0));
    assert!((scene.progress(65.0) - before).abs() < 1e-6);
    assert!((scene.ripples().next_ambient_at() - (next_ambient + 5.0)).abs() < 1e-9);
}

#[test]
fn pointer_drag_moves_stone_and_drops_it() {
    let mut scene = make_scene(42, 1.0);
    let mut cues = Vec::new();
    let t = run_frames(&mut scene, 0.0, 2, &mut cues);
    cues.clear();

    let c = scene
        .stones()
        .transform(1, scene.config(), &scene.viewport())
        .center;
    scene.push_pointer(PointerEvent::Down { pos: c, time: t });
    scene.frame(t, &mut cues);
    assert_eq!(cues, vec![AudioCue::StonePick]);
    assert_eq!(scene.stones().active(), Some(1));

    let dragged = c + Vec2::new(120.0, 0.0);
    scene.push_pointer(PointerEvent::Move {
        pos: dragged,
        time: t + 0.1,
    });
    scene.push_pointer(PointerEvent::Up {
        pos: dragged,
        time: t + 0.1,
    });
    scene.frame(t + 0.1, &mut cues);
    assert_eq!(scene.stones().active(), None);
    assert!(scene.disturbances().is_empty(), "stone drags do not rustle");

    run_frames(&mut scene, t + 0.1, 60, &mut cues);
    let st = scene.stones().states()[1];
    assert!(st.is_resting());
    assert!((st.offset.x - 120.0).abs() < 1e-3);
    assert!(cues.iter().any(|c| matches!(c, AudioCue::StoneDrop { .. })));
}

#[test]
fn stroke_through_grown_tree_rustles() {
    let mut scene = make_scene(42, 100.0);
    let mut cues = Vec::new();
    let t = run_frames(&mut scene, 10.0, 1, &mut cues);
    assert_eq!(scene.progress(t), 1.0);

    let base = scene.tree().branches[0].p1;
    scene.push_pointer(PointerEvent::Move {
        pos: base - Vec2::new(10.0, 0.0),
        time: t,
    });
    scene.push_pointer(PointerEvent::Move { pos: base, time: t + 0.02 });
    scene.frame(t + 0.02, &mut cues);
    assert!(
        cues.iter()
            .any(|c| matches!(c, AudioCue::Rustle { kind: RustleKind::Branch, .. })),
        "expected a branch rustle, got {cues:?}"
    );
    assert_eq!(scene.disturbances().len(), 1);
}

#[test]
fn resize_keeps_seed_and_rescales() {
    let mut scene = make_scene(42, 1.0);
    let petal = scene.particles().petals[0];
    scene.resize(2560.0, 1440.0);
    assert_eq!(scene.seed(), 42);
    assert_eq!(scene.viewport(), Viewport::new(2560.0, 1440.0));
    let expected = Tree::generate(42 ^ TREE_SEED_XOR, scene.config(), scene.viewport());
    assert_eq!(scene.tree().branches, expected.branches);
    let moved = scene.particles().petals[0];
    assert!((moved.x - petal.x * 2.0).abs() < 1e-3);
    assert!((moved.y - petal.y * 2.0).abs() < 1e-3);
}

#[test]
fn particle_counts_follow_width() {
    let field = ParticleField::generate(1, &Viewport::new(1280.0, 720.0));
    assert_eq!(field.petals.len(), 109);
    assert_eq!(field.motes.len(), 98);
}

#[test]
fn particles_wrap_inside_the_viewport() {
    let vp = Viewport::new(800.0, 600.0);
    let mut field = ParticleField::generate(3, &vp);
    let mut rng = StdRng::seed_from_u64(1);
    let mut t = 0.0;
    for _ in 0..3_000 {
        t += 1.0 / 60.0;
        field.step(t, 1.0 / 60.0, 4.0, &vp, &mut rng);
        for p in &field.petals {
            assert!(p.y <= vp.height + 12.0 && p.x <= vp.width + 20.0);
            assert!((0.0..std::f32::consts::TAU).contains(&p.spin.abs()));
        }
        for m in &field.motes {
            assert!(m.y >= -8.0 && m.y <= vp.height + 8.0);
        }
    }
    for m in &field.motes {
        let a = m.alpha(t);
        assert!((0.0..=1.0).contains(&a));
    }
}

#[test]
fn snapshot_reflects_growth() {
    let mut scene = make_scene(42, 100.0);
    let mut cues = Vec::new();
    let t = run_frames(&mut scene, 10.0, 1, &mut cues);

    let snap = scene.snapshot(t);
    assert_eq!(snap.progress, 1.0);
    assert_eq!(snap.maturity, 1.0);
    assert_eq!(snap.branches.len(), scene.tree().branches.len());
    assert_eq!(snap.branches[0].depth, 0);
    assert_eq!(snap.leaves.len(), scene.tree().leaves.len());
    assert_eq!(snap.mature_leaves.len(), scene.tree().mature_leaves.len());
    assert_eq!(snap.petals.len(), scene.particles().petals.len());

    let branches = snap.branch_instances();
    let floats: &[f32] = bytemuck::cast_slice(&branches);
    assert_eq!(floats.len(), branches.len() * 10);
    assert_eq!(
        snap.leaf_instances().len(),
        snap.leaves.len() + snap.mature_leaves.len()
    );
    assert_eq!(snap.stone_instances().len(), STONE_COUNT);
    assert_eq!(snap.ripple_instances().len(), snap.ripples.len());
}

#[test]
fn fresh_scene_shows_nothing_grown() {
    let scene = make_scene(42, 1.0);
    let snap = scene.snapshot(0.0);
    assert!(snap.branches.is_empty());
    assert!(snap.leaves.is_empty());
    assert!(snap.mature_leaves.is_empty());
    assert!(snap.ripples.is_empty());
}

#[test]
fn input_queue_is_fifo() {
    let mut queue = InputQueue::default();
    assert!(queue.is_empty());
    queue.push(PointerEvent::Down {
        pos: Vec2::ZERO,
        time: 1.0,
    });
    queue.push(PointerEvent::Move {
        pos: Vec2::ONE,
        time: 2.0,
    });
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.pop().map(|e| e.time()), Some(1.0));
    assert_eq!(queue.pop().map(|e| e.pos()), Some(Vec2::ONE));
    assert_eq!(queue.pop(), None);
}

#[test]
fn pointer_tracker_derives_velocity() {
    let mut tracker = PointerTracker::default();
    let first = tracker.observe(Vec2::new(0.0, 0.0), 1.0);
    assert_eq!(first.velocity, Vec2::ZERO);
    let second = tracker.observe(Vec2::new(50.0, 0.0), 1.5);
    assert!((second.speed() - 100.0).abs() < 1e-4);
    let same_time = tracker.observe(Vec2::new(80.0, 0.0), 1.5);
    assert_eq!(same_time.velocity, Vec2::ZERO);
    tracker.rescale(2.0, 1.0);
    assert_eq!(tracker.last_pos(), Some(Vec2::new(160.0, 0.0)));
    tracker.reset();
    assert_eq!(tracker.last_pos(), None);
}

#[test]
fn audio_cue_names_and_intensity() {
    let cue = AudioCue::Rustle {
        kind: RustleKind::Leaf,
        intensity: 0.4,
    };
    assert_eq!(cue.name(), "rustle-leaf");
    assert_eq!(cue.intensity(), 0.4);
    assert_eq!(AudioCue::StonePick.intensity(), 1.0);
    assert_eq!(AudioCue::WaterRipple { intensity: 0.3 }.name(), "water-ripple");
}

fn pick_stone_one(scene: &mut SceneState, t: f64, cues: &mut Vec<AudioCue>) -> Vec2 {
    let c = scene
        .stones()
        .transform(1, scene.config(), &scene.viewport())
        .center;
    scene.push_pointer(PointerEvent::Down { pos: c, time: t });
    scene.frame(t, cues);
    assert_eq!(scene.stones().active(), Some(1));
    c
}

#[test]
fn release_during_pause_lets_the_stone_fall() {
    let mut scene = make_scene(42, 1.0);
    let mut cues = Vec::new();
    let t = run_frames(&mut scene, 0.0, 2, &mut cues);
    let c = pick_stone_one(&mut scene, t, &mut cues);

    assert!(scene.toggle_pause(t + 0.5));
    scene.push_pointer(PointerEvent::Up { pos: c, time: t + 1.0 });
    scene.frame(t + 1.0, &mut cues);
    assert_eq!(scene.stones().active(), None, "release honored while paused");

    assert!(!scene.toggle_pause(t + 2.0));
    let t = run_frames(&mut scene, t + 2.0, 120, &mut cues);
    let st = scene.stones().states()[1];
    assert!(!st.dragging);
    assert!(st.is_resting());

    // A hover afterwards must not carry the stone along.
    scene.push_pointer(PointerEvent::Move {
        pos: c + Vec2::new(100.0, 0.0),
        time: t + 0.1,
    });
    scene.frame(t + 0.1, &mut cues);
    assert_eq!(scene.stones().states()[1].offset, Vec2::ZERO);
}

#[test]
fn input_queued_while_paused_settles_on_resume() {
    let mut scene = make_scene(42, 1.0);
    let mut cues = Vec::new();
    let t = run_frames(&mut scene, 0.0, 2, &mut cues);
    let c = pick_stone_one(&mut scene, t, &mut cues);

    // Host stops ticking while paused but keeps forwarding events.
    assert!(scene.toggle_pause(t + 0.5));
    scene.push_pointer(PointerEvent::Move {
        pos: c + Vec2::new(80.0, 0.0),
        time: t + 1.0,
    });
    scene.push_pointer(PointerEvent::Up {
        pos: c + Vec2::new(80.0, 0.0),
        time: t + 1.0,
    });
    assert!(!scene.toggle_pause(t + 3.0));

    assert_eq!(scene.pending_input(), 0);
    assert_eq!(scene.stones().active(), None);
    let st = scene.stones().states()[1];
    assert!(!st.dragging);
    assert_eq!(st.offset, Vec2::ZERO, "stale moves are not replayed");
    assert!(scene.disturbances().is_empty());
}

#[test]
fn second_press_without_release_drops_the_stone() {
    let mut scene = make_scene(42, 1.0);
    let mut cues = Vec::new();
    let t = run_frames(&mut scene, 0.0, 2, &mut cues);
    pick_stone_one(&mut scene, t, &mut cues);
    cues.clear();

    scene.push_pointer(PointerEvent::Down {
        pos: Vec2::new(10.0, 10.0),
        time: t + 0.1,
    });
    scene.frame(t + 0.1, &mut cues);
    assert_eq!(scene.stones().active(), None);
    assert!(!cues.contains(&AudioCue::StonePick), "empty ground raises no pick");

    run_frames(&mut scene, t + 0.1, 60, &mut cues);
    assert!(scene.stones().states().iter().all(|s| s.is_resting()));
    assert!(cues.iter().any(|c| matches!(c, AudioCue::StoneDrop { .. })));
}
