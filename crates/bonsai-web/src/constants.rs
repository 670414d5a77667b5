// Host bridge layout and defaults

pub const MS_PER_SEC: f64 = 1000.0;

// Floats per record in the packed buffers handed to the host
pub const BRANCH_STRIDE: usize = 10; // p0, p1, p2, grow, alpha, width, depth
pub const LEAF_STRIDE: usize = 10; // pos, size, rotation, alpha, hsl, blossom, pad
pub const RIPPLE_STRIDE: usize = 8; // center, radii, angle, alpha, line width, pad
pub const STONE_STRIDE: usize = 8; // center, size, rotation, lift, tilt, dragging, pad
pub const PETAL_STRIDE: usize = 7; // x, y, z, spin, size, warm, alpha
pub const MOTE_STRIDE: usize = 5; // x, y, r, cool, alpha
pub const CONFIG_STRIDE: usize = 12; // see `pack::config`

// Fallback canvas size when the host passes nothing usable
pub const DEFAULT_WIDTH: f32 = 1280.0;
pub const DEFAULT_HEIGHT: f32 = 720.0;
