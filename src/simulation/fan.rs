use crate::config::Viewport;
use crate::simulation::color::color_at;
use crate::simulation::geometry::{Point, Polygon};
use crate::simulation::region::{regions, Bound};
use crate::simulation::speeds::SpeedSet;

/// Regions of the x-t diagram at simulation time `t`, left to right.
///
/// The far-field states are quadrilaterals reaching the viewport edges; each
/// intermediate state is a triangle with its apex at the origin. At `t = 0`
/// every region has zero height.
pub fn build_fan(speeds: &SpeedSet, t: f64, viewport: &Viewport) -> Vec<Polygon> {
    let frame = viewport.fan_frame();
    let h = viewport.current_height(t);
    let origin = Point::new(frame.x_zero, frame.y_zero);
    let y_time = frame.y_zero - h;
    let ray = |speed: f64| Point::new(frame.x_zero + h * speed, y_time);

    regions(speeds)
        .into_iter()
        .map(|region| {
            let vertices = match (region.left, region.right) {
                (Bound::NegInfinity, Bound::Speed(s)) => vec![
                    Point::new(frame.left, frame.y_zero),
                    origin,
                    ray(s),
                    Point::new(frame.left, y_time),
                ],
                (Bound::Speed(s), Bound::PosInfinity) => vec![
                    Point::new(frame.right, frame.y_zero),
                    origin,
                    ray(s),
                    Point::new(frame.right, y_time),
                ],
                (Bound::Speed(a), Bound::Speed(b)) => vec![origin, ray(a), ray(b)],
                // regions() never produces an unbounded interior state
                _ => vec![origin],
            };
            Polygon {
                vertices,
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
    use crate::simulation::color::{LEFT_COLOR, RIGHT_COLOR};
    use crate::simulation::speeds::{SpeedSetParser, ValidationMode};

    fn scenario_set() -> SpeedSet {
        SpeedSetParser::new(ValidationMode::ClampDrop)
            .parse("[1.5, -0.5, -0.25, 1.0]")
            .unwrap()
    }

    #[test]
    fn test_region_count_and_labels() {
        let fan = build_fan(&scenario_set(), STOP_TIME, &Viewport::default());
        let labels: Vec<String> = fan.iter().map(|p| p.label.to_string()).collect();
        assert_eq!(labels, ["UL", "U*1", "U*2", "U*3", "UR"]);
    }

    #[test]
    fn test_colors() {
        let fan = build_fan(&scenario_set(), 1.0, &Viewport::default());
        assert_eq!(fan[0].color, LEFT_COLOR);
        assert_eq!(fan[4].color, RIGHT_COLOR);
        assert_eq!(fan[2].color, color_at(0.5));
    }

    #[test]
    fn test_zero_time_is_flat() {
        let fan = build_fan(&scenario_set(), 0.0, &Viewport::default());
        let y_zero = Viewport::default().fan_frame().y_zero;
        for poly in &fan {
            assert_eq!(poly.height(), 0.0);
            assert!(poly.vertices.iter().all(|p| p.y == y_zero));
        }
        for poly in &fan[1..4] {
            assert_eq!(poly.width(), 0.0);
        }
    }

    #[test]
    fn test_full_time_geometry() {
        let viewport = Viewport::default();
        let fan = build_fan(&scenario_set(), STOP_TIME, &viewport);
        // x0 = 400, y0 = 300, full height 230
        assert_eq!(
            fan[0].vertices,
            vec![
                Point::new(50.0, 300.0),
                Point::new(400.0, 300.0),
                Point::new(400.0 - 0.5 * 230.0, 70.0),
                Point::new(50.0, 70.0),
            ]
        );
        assert_eq!(
            fan[1].vertices,
            vec![
                Point::new(400.0, 300.0),
                Point::new(400.0 - 0.5 * 230.0, 70.0),
                Point::new(400.0 - 0.25 * 230.0, 70.0),
            ]
        );
        assert_eq!(fan[4].vertices[0], Point::new(750.0, 300.0));
        assert_eq!(fan[4].vertices[2], Point::new(400.0 + 1.5 * 230.0, 70.0));
    }

    #[test]
    fn test_equal_speeds_give_zero_width() {
        let set = SpeedSet::new(vec![0.5, 0.5], 1.5).unwrap();
        let fan = build_fan(&set, STOP_TIME, &Viewport::default());
        assert_eq!(fan.len(), 3);
        assert_eq!(fan[1].vertices[1], fan[1].vertices[2]);
    }

    #[test]
    fn test_grows_with_time() {
        let set = scenario_set();
        let viewport = Viewport::default();
        let early = build_fan(&set, 1.0, &viewport);
        let late = build_fan(&set, 4.0, &viewport);
        for (a, b) in early.iter().zip(&late) {
            assert!(b.height() > a.height());
        }
    }
}
