use std::fmt;

use crate::simulation::speeds::SpeedSet;

/// Name of a constant state in the Riemann fan
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionLabel {
    /// Far-field state left of every wave
    Left,
    /// Intermediate state `U*k`, k counted from 1
    Star(usize),
    /// Far-field state right of every wave
    Right,
}

impl fmt::Display for RegionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionLabel::Left => write!(f, "UL"),
            RegionLabel::Star(k) => write!(f, "U*{}", k),
            RegionLabel::Right => write!(f, "UR"),
        }
    }
}

/// One side of a region: a characteristic speed or the open far field
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bound {
    NegInfinity,
    Speed(f64),
    PosInfinity,
}

/// A constant state between two characteristics (or a characteristic and the far field)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveRegion {
    pub left: Bound,
    pub right: Bound,
    /// Normalized left-to-right rank, used for coloring
    pub rank_ratio: f64,
    pub label: RegionLabel,
}

/// The N+1 regions of a set of N speeds, left to right
pub fn regions(speeds: &SpeedSet) -> Vec<WaveRegion> {
    let s = speeds.as_slice();
    let n = s.len();
    let mut out = Vec::with_capacity(n + 1);

    out.push(WaveRegion {
        left: Bound::NegInfinity,
        right: Bound::Speed(s[0]),
        rank_ratio: 0.0,
        label: RegionLabel::Left,
    });

    out.extend(s.windows(2).enumerate().map(|(i, pair)| WaveRegion {
        left: Bound::Speed(pair[0]),
        right: Bound::Speed(pair[1]),
        rank_ratio: (i + 1) as f64 / n as f64,
        label: RegionLabel::Star(i + 1),
    }));

    out.push(WaveRegion {
        left: Bound::Speed(s[n - 1]),
        right: Bound::PosInfinity,
        rank_ratio: 1.0,
        label: RegionLabel::Right,
    });

    out
}
