use crate::simulation::color::Rgba;
use crate::simulation::region::RegionLabel;

/// Point in plot coordinates (y grows downward)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Filled, labeled region ready for drawing
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Point>,
    pub color: Rgba,
    pub label: RegionLabel,
}

impl Polygon {
    /// Lowest vertical extent (largest y) minus highest (smallest y)
    pub fn height(&self) -> f64 {
        let (min, max) = self
            .vertices
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
        max - min
    }

    pub fn width(&self) -> f64 {
        let (min, max) = self
            .vertices
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
        max - min
    }

    /// Even-odd point-in-polygon test
    pub fn contains(&self, point: Point) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (a, b) = (self.vertices[i], self.vertices[j]);
            if (a.y > point.y) != (b.y > point.y) {
                let x_cross = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if point.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Fan triangulation from the first vertex; regions are convex
    pub fn triangles(&self) -> impl Iterator<Item = [Point; 3]> + '_ {
        let first = self.vertices.first().copied();
        self.vertices
            .windows(2)
            .skip(1)
            .filter_map(move |pair| first.map(|f| [f, pair[0], pair[1]]))
    }
}
