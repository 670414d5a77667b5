// Scene, growth and interaction tuning constants shared by every frontend.

// Sub-seed derivation
pub const TREE_SEED_XOR: u32 = 0x9E37_79B9;
pub const PARTICLE_SEED_XOR: u32 = 0xA341_316C;

// Growth clock (seconds of unscaled time)
pub const CYCLE_SECS: f64 = 5.0 * 60.0; // trunk to full crown
pub const MATURITY_SECS: f64 = 2.0 * 60.0; // post-cycle bloom window

// Tree generation
pub const TRUNK_WIDTH_FRAC: f32 = 0.02; // of min(width, height)
pub const TRUNK_INTERVAL_END: f32 = 0.19;
pub const CROWN_CEILING_FRAC: f32 = 0.12; // of viewport height
pub const CROWN_COMPRESS_MIN: f32 = 0.15;
pub const CROWN_COMPRESS_MAX: f32 = 0.6;
pub const BRANCH_MIN_WIDTH: f32 = 0.68;
pub const BRANCH_DURATION_BASE: f32 = 0.16;
pub const BRANCH_DURATION_PER_DEPTH: f32 = 0.011;
pub const BRANCH_DURATION_MIN: f32 = 0.03;
pub const BRANCH_DURATION_MAX: f32 = 0.22;
pub const TERMINAL_CLUSTER_DENSITY: f32 = 1.7;
pub const INTERIOR_CLUSTER_DENSITY: f32 = 0.9;

// Reveal / render poses
pub const BRANCH_SEGMENTS: usize = 24;
pub const BRANCH_FADE_SPAN: f32 = 0.08; // progress over which a branch fades in
pub const SEASONAL_BLOOM_SPAN: f32 = 0.2;
pub const MATURE_BLOOM_SPAN: f32 = 0.45;
pub const MATURE_ALPHA_SCALE: f32 = 0.92;

// Rustle (tree disturbance)
pub const RUSTLE_SPEED_THRESHOLD: f32 = 85.0; // px/s
pub const RUSTLE_RETRIGGER_SECS: f64 = 0.058;
pub const RUSTLE_BOUNDS_MARGIN: f32 = 36.0;
pub const RUSTLE_BRANCH_HIT_BASE: f32 = 18.0;
pub const RUSTLE_BRANCH_HIT_PER_WIDTH: f32 = 2.0;
pub const RUSTLE_LEAF_HIT_RADIUS: f32 = 14.0;
pub const RUSTLE_HISTORY: usize = 24;
pub const RUSTLE_SPEED_NORM: f32 = 950.0;
pub const RUSTLE_STRENGTH_MIN: f32 = 0.2;
pub const RUSTLE_STRENGTH_MAX: f32 = 0.9;
pub const RUSTLE_RADIUS_BASE: f32 = 26.0;
pub const RUSTLE_RADIUS_SPAN: f32 = 62.0;
pub const RUSTLE_DURATION_BASE: f32 = 0.38;
pub const RUSTLE_DURATION_SPAN: f32 = 0.24;
pub const RUSTLE_BRANCH_PUSH: f32 = 10.0; // px per unit force at a branch tip
pub const RUSTLE_LEAF_PUSH: f32 = 16.0;

// Pond
pub const POND_ROTATION: f32 = -0.18;
pub const RIPPLE_RADIUS_FLOOR: f32 = 3.0;
pub const RIPPLE_ALPHA_MAX: f32 = 0.42;
pub const AMBIENT_FIRST_DELAY_BASE: f64 = 1.2;
pub const AMBIENT_FIRST_DELAY_SPAN: f64 = 2.2;
pub const AMBIENT_INTERVAL_BASE: f64 = 1.2;
pub const AMBIENT_INTERVAL_SPAN: f64 = 2.6;
pub const AMBIENT_COMPANION_CHANCE: f64 = 0.28;
pub const AMBIENT_COMPANION_DELAY: f64 = 0.16;
pub const WAKE_SPEED_THRESHOLD: f32 = 70.0; // px/s
pub const WAKE_RETRIGGER_SECS: f64 = 0.046;
pub const WAKE_SPEED_NORM: f32 = 900.0;
pub const WAKE_TRAIL_FACTOR: f32 = 0.35; // trailing companion offset, in max radii
pub const WAKE_TRAIL_DELAY: f64 = 0.08;

// Stones
pub const STONE_SIZE_FRAC: f32 = 0.075; // of min(width, height)
pub const STONE_HIT_RX: f32 = 0.9; // hit ellipse radii, in stone sizes
pub const STONE_HIT_RY: f32 = 0.55;
pub const STONE_TRAVEL_X: f32 = 0.28; // +/- fraction of width
pub const STONE_TRAVEL_UP: f32 = 0.14; // fraction of height
pub const STONE_TRAVEL_DOWN: f32 = 0.16;
pub const STONE_DRAG_LIFT: f32 = -6.0; // px, negative is raised
pub const STONE_REST_LIFT: f32 = 0.0;
pub const STONE_TILT_RX_GAIN: f32 = 0.14;
pub const STONE_TILT_VEL_GAIN: f32 = 0.00015;
pub const STONE_TILT_MAX: f32 = 0.2;
pub const STONE_TILT_DECAY_PER_SEC: f32 = 6.0;
pub const STONE_DROP_SEED_BASE: f32 = 40.0; // px/s, positive is downward
pub const STONE_DROP_SEED_GAIN: f32 = 0.02;
pub const STONE_DROP_SEED_EXTRA_MAX: f32 = 60.0;
pub const STONE_GRAVITY: f32 = 1800.0; // px/s^2
pub const STONE_IMPACT_THRESHOLD: f32 = 60.0; // px/s
pub const STONE_IMPACT_NORM: f32 = 320.0;

// Particles
pub const PETAL_BASE_COUNT: f32 = 72.0;
pub const PETAL_WIDTH_DIVISOR: f32 = 34.0;
pub const MOTE_BASE_COUNT: f32 = 70.0;
pub const MOTE_WIDTH_DIVISOR: f32 = 45.0;
pub const PARTICLE_STEP_FPS: f32 = 60.0; // per-frame motion is authored at this rate

// Frame integration
pub const MAX_FRAME_DT: f64 = 0.064; // clamp long gaps (tab switch, breakpoints)
