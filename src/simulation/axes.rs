use crate::config::{
    PlotFrame, Viewport, ARROW_HEAD_ANGLE_DEG, ARROW_HEAD_SIZE, LABEL_OFFSET, X_LABEL_INSET,
    Y_LABEL_OFFSET_X,
};
use crate::simulation::geometry::Point;

/// Straight arrow with a two-barb head at `head`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrow {
    pub tail: Point,
    pub head: Point,
    pub head_size: f64,
    pub head_angle_deg: f64,
}

impl Arrow {
    pub fn new(tail: Point, head: Point) -> Self {
        Self {
            tail,
            head,
            head_size: ARROW_HEAD_SIZE,
            head_angle_deg: ARROW_HEAD_ANGLE_DEG,
        }
    }

    /// Shaft followed by the two barbs, as line segments
    pub fn segments(&self) -> [(Point, Point); 3] {
        let angle = (self.head.y - self.tail.y).atan2(self.head.x - self.tail.x);
        let (sin, cos) = angle.sin_cos();
        let spread = self.head_angle_deg.to_radians().tan() * self.head_size;

        // Barb ends in the arrow's own frame: (-head_size, +-spread) from the head
        let barb = |side: f64| {
            let (bx, by) = (-self.head_size, side * spread);
            Point::new(
                self.head.x + bx * cos - by * sin,
                self.head.y + bx * sin + by * cos,
            )
        };

        [
            (self.tail, self.head),
            (barb(1.0), self.head),
            (self.head, barb(-1.0)),
        ]
    }
}

/// Axis caption anchored at its baseline-left corner, in plot coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    pub position: Point,
    pub text: &'static str,
}

/// Axis arrows and their labels for one diagram
#[derive(Clone, Debug, PartialEq)]
pub struct Axes {
    pub x_axis: Arrow,
    pub y_axis: Arrow,
    pub x_label: TextLabel,
    pub y_label: TextLabel,
}

fn axes_for(
    frame: PlotFrame,
    viewport: &Viewport,
    x_text: &'static str,
    y_text: &'static str,
) -> Axes {
    Axes {
        x_axis: Arrow::new(
            Point::new(frame.left, frame.y_zero),
            Point::new(frame.right, frame.y_zero),
        ),
        y_axis: Arrow::new(
            Point::new(frame.x_zero, frame.y_zero),
            Point::new(frame.x_zero, frame.axis_top),
        ),
        x_label: TextLabel {
            position: Point::new(viewport.width - X_LABEL_INSET, frame.y_zero + LABEL_OFFSET),
            text: x_text,
        },
        y_label: TextLabel {
            position: Point::new(frame.x_zero + Y_LABEL_OFFSET_X, frame.axis_top + LABEL_OFFSET),
            text: y_text,
        },
    }
}

/// Axes of the x-t diagram
pub fn fan_axes(viewport: &Viewport) -> Axes {
    axes_for(viewport.fan_frame(), viewport, "x", "t")
}

/// Axes of the x-U diagram
pub fn distribution_axes(viewport: &Viewport) -> Axes {
    axes_for(viewport.distribution_frame(), viewport, "x", "U")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-9
    }

    #[test]
    fn test_horizontal_arrow_barbs() {
        let arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let [shaft, upper, lower] = arrow.segments();
        let spread = 20f64.to_radians().tan() * 20.0;
        assert_eq!(shaft, (Point::new(0.0, 0.0), Point::new(100.0, 0.0)));
        assert!(close(upper.0, Point::new(80.0, spread)));
        assert!(close(lower.1, Point::new(80.0, -spread)));
        assert_eq!(upper.1, arrow.head);
    }

    #[test]
    fn test_vertical_arrow_barbs_point_back() {
        // Upward on screen: y decreases toward the head
        let arrow = Arrow::new(Point::new(400.0, 300.0), Point::new(400.0, 10.0));
        let [_, upper, lower] = arrow.segments();
        assert!((upper.0.y - 30.0).abs() < 1e-9);
        assert!((lower.1.y - 30.0).abs() < 1e-9);
        assert!((upper.0.x - 400.0).abs() > 1.0);
    }

    #[test]
    fn test_axes_layout() {
        let viewport = Viewport::default();
        let fan = fan_axes(&viewport);
        assert_eq!(fan.y_axis.head, Point::new(400.0, 10.0));
        assert_eq!(fan.x_label.position, Point::new(720.0, 325.0));
        assert_eq!(fan.y_label.text, "t");

        let dist = distribution_axes(&viewport);
        assert_eq!(dist.x_axis.tail, Point::new(50.0, 750.0));
        assert_eq!(dist.y_axis.head, Point::new(400.0, 350.0));
        assert_eq!(dist.y_label.position, Point::new(415.0, 375.0));
        assert_eq!(dist.y_label.text, "U");
    }
}
