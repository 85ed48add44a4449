/// Linear RGBA color, channels in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Color of the leftmost (UL) state
pub const LEFT_COLOR: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);
/// Color of the rightmost (UR) state
pub const RIGHT_COLOR: Rgba = Rgba::new(0.0, 0.0, 1.0, 1.0);

/// Interpolate between `LEFT_COLOR` and `RIGHT_COLOR` by rank ratio in [0, 1]
pub fn color_at(rank_ratio: f64) -> Rgba {
    debug_assert!((0.0..=1.0).contains(&rank_ratio), "rank ratio {rank_ratio} out of [0, 1]");
    let t = rank_ratio as f32;
    let lerp = |l: f32, r: f32| l + (r - l) * t;
    Rgba {
        r: lerp(LEFT_COLOR.r, RIGHT_COLOR.r),
        g: lerp(LEFT_COLOR.g, RIGHT_COLOR.g),
        b: lerp(LEFT_COLOR.b, RIGHT_COLOR.b),
        a: lerp(LEFT_COLOR.a, RIGHT_COLOR.a),
    }
}
