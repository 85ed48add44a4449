use crate::config::Viewport;
use crate::simulation::color::color_at;
use crate::simulation::geometry::{Point, Polygon};
use crate::simulation::region::{regions, Bound};
use crate::simulation::speeds::SpeedSet;

/// Piecewise-constant profile of the x-U diagram at simulation time `t`.
///
/// Each region spans the positions its bounding characteristics have reached
/// by `t`. Heights are rank bands of `du = plot height / (N + 1)`: UL fills the
/// whole plot, `U*k` stands `N + 1 - k` bands tall and UR one band, so the
/// profile steps down from left to right.
pub fn build_distribution(speeds: &SpeedSet, t: f64, viewport: &Viewport) -> Vec<Polygon> {
    let frame = viewport.distribution_frame();
    let h = viewport.current_height(t);
    let n = speeds.len();
    let du = (frame.y_zero - frame.plot_top) / (n + 1) as f64;
    let reach = |speed: f64| frame.x_zero + h * speed;

    regions(speeds)
        .into_iter()
        .enumerate()
        .map(|(rank, region)| {
            let (x_left, x_right) = match (region.left, region.right) {
                (Bound::NegInfinity, Bound::Speed(s)) => (frame.left, reach(s)),
                (Bound::Speed(s), Bound::PosInfinity) => (reach(s), frame.right),
                (Bound::Speed(a), Bound::Speed(b)) => (reach(a), reach(b)),
                _ => (frame.x_zero, frame.x_zero),
            };
            let top = frame.y_zero - (n + 1 - rank) as f64 * du;
            Polygon {
                vertices: vec![
                    Point::new(x_left, frame.y_zero),
                    Point::new(x_left, top),
                    Point::new(x_right, top),
                    Point::new(x_right, frame.y_zero),
                ],
                color: color_at(region.rank_ratio),
                label: region.label,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::STOP_TIME;
    use crate::simulation::fan::build_fan;

    #[test]
    fn test_labels_match_fan() {
        let set = SpeedSet::default_set();
        let viewport = Viewport::default();
        let fan = build_fan(&set, 2.0, &viewport);
        let dist = build_distribution(&set, 2.0, &viewport);
        assert_eq!(dist.len(), set.len() + 1);
        for (a, b) in fan.iter().zip(&dist) {
            assert_eq!(a.label, b.label);
            assert_eq!(a.color, b.color);
        }
    }

    #[test]
    fn test_step_heights() {
        let set = SpeedSet::default_set();
        let dist = build_distribution(&set, STOP_TIME, &Viewport::default());
        // plot spans y 400..750, five bands of 70
        let heights: Vec<f64> = dist.iter().map(|p| p.height()).collect();
        assert_eq!(heights, [350.0, 280.0, 210.0, 140.0, 70.0]);
    }

    #[test]
    fn test_horizontal_extent_follows_characteristics() {
        let set = SpeedSet::default_set();
        let dist = build_distribution(&set, STOP_TIME, &Viewport::default());
        // x0 = 400, full height 230
        assert_eq!(dist[0].vertices[0].x, 50.0);
        assert_eq!(dist[0].vertices[2].x, 400.0 - 0.5 * 230.0);
        assert_eq!(dist[1].vertices[0].x, 400.0 - 0.5 * 230.0);
        assert_eq!(dist[1].vertices[2].x, 400.0 - 0.25 * 230.0);
        assert_eq!(dist[4].vertices[0].x, 400.0 + 1.5 * 230.0);
        assert_eq!(dist[4].vertices[2].x, 750.0);
    }

    #[test]
    fn test_regions_do_not_overlap() {
        let set = SpeedSet::default_set();
        let dist = build_distribution(&set, 3.0, &Viewport::default());
        for pair in dist.windows(2) {
            assert_eq!(pair[0].vertices[2].x, pair[1].vertices[0].x);
        }
    }

    #[test]
    fn test_zero_time_collapses_interior() {
        let set = SpeedSet::default_set();
        let dist = build_distribution(&set, 0.0, &Viewport::default());
        for poly in &dist[1..dist.len() - 1] {
            assert_eq!(poly.width(), 0.0);
            assert!(poly.height() > 0.0);
        }
        assert_eq!(dist[0].vertices[2].x, 400.0);
        assert_eq!(dist[4].vertices[0].x, 400.0);
    }
}
