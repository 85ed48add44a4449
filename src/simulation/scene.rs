use crate::config::Viewport;
use crate::simulation::axes::{distribution_axes, fan_axes, Axes, TextLabel};
use crate::simulation::distribution::build_distribution;
use crate::simulation::fan::build_fan;
use crate::simulation::geometry::{Point, Polygon};
use crate::simulation::region::RegionLabel;
use crate::simulation::speeds::SpeedSet;

/// Regions and axes of one diagram
#[derive(Clone, Debug, PartialEq)]
pub struct Diagram {
    pub regions: Vec<Polygon>,
    pub axes: Axes,
}

/// Everything the renderer needs for one frame
#[derive(Clone, Debug, PartialEq)]
pub struct DrawModel {
    /// x-t diagram (upper half)
    pub fan: Diagram,
    /// x-U diagram (lower half)
    pub distribution: Diagram,
}

/// Build both diagrams for time `t`
pub fn draw(speeds: &SpeedSet, t: f64, viewport: &Viewport) -> DrawModel {
    DrawModel {
        fan: Diagram {
            regions: build_fan(speeds, t, viewport),
            axes: fan_axes(viewport),
        },
        distribution: Diagram {
            regions: build_distribution(speeds, t, viewport),
            axes: distribution_axes(viewport),
        },
    }
}

impl DrawModel {
    pub fn diagrams(&self) -> [&Diagram; 2] {
        [&self.fan, &self.distribution]
    }

    /// Axis captions of both diagrams
    pub fn labels(&self) -> impl Iterator<Item = &TextLabel> + '_ {
        self.diagrams()
            .into_iter()
            .flat_map(|d| [&d.axes.x_label, &d.axes.y_label])
    }

    /// Label of the region under `point`; later-drawn regions win
    pub fn hit_test(&self, point: Point) -> Option<RegionLabel> {
        self.diagrams()
            .into_iter()
            .flat_map(|d| d.regions.iter())
            .rev()
            .find(|poly| poly.contains(point))
            .map(|poly| poly.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_SPEED, STOP_TIME};
    use rand::Rng;

    #[test]
    fn test_draw_builds_both_diagrams() {
        let set = SpeedSet::default_set();
        let model = draw(&set, STOP_TIME, &Viewport::default());
        assert_eq!(model.fan.regions.len(), 5);
        assert_eq!(model.distribution.regions.len(), 5);
        assert_eq!(model.fan.axes.y_label.text, "t");
        assert_eq!(model.distribution.axes.y_label.text, "U");
    }

    #[test]
    fn test_hit_test() {
        let set = SpeedSet::default_set();
        let model = draw(&set, STOP_TIME, &Viewport::default());
        // Far left of both diagrams
        assert_eq!(model.hit_test(Point::new(60.0, 200.0)), Some(RegionLabel::Left));
        assert_eq!(model.hit_test(Point::new(60.0, 700.0)), Some(RegionLabel::Left));
        // Right of the fastest wave
        assert_eq!(model.hit_test(Point::new(760.0, 740.0)), None);
        assert_eq!(model.hit_test(Point::new(749.0, 740.0)), Some(RegionLabel::Right));
        // Just above the origin between the -0.25 and 1.0 rays
        assert_eq!(model.hit_test(Point::new(405.0, 200.0)), Some(RegionLabel::Star(2)));
        // Outside everything
        assert_eq!(model.hit_test(Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn test_labels_in_draw_order() {
        let model = draw(&SpeedSet::default_set(), STOP_TIME, &Viewport::default());
        let texts: Vec<_> = model.labels().map(|l| l.text).collect();
        assert_eq!(texts, ["x", "t", "x", "U"]);
        let positions: Vec<_> = model.labels().map(|l| l.position).collect();
        assert_eq!(positions[0], Point::new(720.0, 325.0));
        assert_eq!(positions[3], Point::new(415.0, 375.0));
    }

    #[test]
    fn test_region_count_for_random_sets() {
        let viewport = Viewport::default();
        let mut rng = rand::thread_rng();
        for round in 0..100 {
            // Cover the single-speed set explicitly
            let n = if round == 0 { 1 } else { rng.gen_range(1..12) };
            let values: Vec<f64> = (0..n).map(|_| rng.gen_range(-1.5..=1.5)).collect();
            let set = SpeedSet::new(values, MAX_SPEED).unwrap();
            let t = rng.gen_range(0.0..STOP_TIME);
            let model = draw(&set, t, &viewport);

            let mut expected = vec![RegionLabel::Left];
            expected.extend((1..n).map(RegionLabel::Star));
            expected.push(RegionLabel::Right);

            let fan: Vec<_> = model.fan.regions.iter().map(|p| p.label).collect();
            let distribution: Vec<_> =
                model.distribution.regions.iter().map(|p| p.label).collect();
            assert_eq!(fan.len(), n + 1, "speeds {}", set);
            assert_eq!(fan, expected, "speeds {}", set);
            assert_eq!(distribution, fan, "speeds {}", set);
        }
    }
}
