use glam::Vec2;

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Point on the quadratic Bezier `p0 -> p1 -> p2` at parameter `t`.
#[inline]
pub fn quad_point(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

/// Unit vector, or `fallback` when `v` has no usable length.
#[inline]
pub fn unit_or(v: Vec2, fallback: Vec2) -> Vec2 {
    let len = v.length();
    if len > f32::EPSILON && len.is_finite() {
        v / len
    } else {
        fallback
    }
}

/// Squared distance from `p` to the segment `a..b`.
pub fn dist_sq_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance_squared(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance_squared(a + ab * t)
}

/// Ellipse with semi-axes `radii`, rotated by `rotation` radians about `center`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    pub center: Vec2,
    pub radii: Vec2,
    pub rotation: f32,
}

impl Ellipse {
    /// Inverse-rotate `p` into the ellipse frame and test the normalized radius.
    pub fn contains(&self, p: Vec2) -> bool {
        if self.radii.x <= 0.0 || self.radii.y <= 0.0 {
            return false;
        }
        let d = p - self.center;
        let (s, c) = (-self.rotation).sin_cos();
        let local = Vec2::new(d.x * c - d.y * s, d.x * s + d.y * c);
        let nx = local.x / self.radii.x;
        let ny = local.y / self.radii.y;
        nx * nx + ny * ny <= 1.0
    }

    /// Horizontal offset of `p` within the ellipse frame, normalized to [-1, 1].
    pub fn local_x_norm(&self, p: Vec2) -> f32 {
        if self.radii.x <= 0.0 {
            return 0.0;
        }
        let d = p - self.center;
        let (s, c) = (-self.rotation).sin_cos();
        ((d.x * c - d.y * s) / self.radii.x).clamp(-1.0, 1.0)
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub const EMPTY: Bounds = Bounds {
        min: Vec2::splat(f32::INFINITY),
        max: Vec2::splat(f32::NEG_INFINITY),
    };

    #[inline]
    pub fn include(&mut self, p: Vec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn contains_with_margin(&self, p: Vec2, margin: f32) -> bool {
        !self.is_empty()
            && p.x >= self.min.x - margin
            && p.x <= self.max.x + margin
            && p.y >= self.min.y - margin
            && p.y <= self.max.y + margin
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::EMPTY
    }
}
