use super::model::Wheel;
use super::paint::Color;
use super::ItemLabel;
use crate::geometry::{Circle, PixelPoint, Point};
use crate::scheduler::Clock;

/// One slice of the wheel, as a renderer needs it for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub label: ItemLabel,
    /// Start of the slice relative to the wheel, in degrees clockwise from 3 o'clock.
    pub start_angle: f64,
    pub sweep: f64,
    /// Screen position of the slice's leading edge on the rim.
    pub anchor: PixelPoint,
    pub color: Color,
    /// Rotation for the label baseline; labels read from the rim inwards.
    pub label_angle: f64,
}

/// The fixed marker at the top of the wheel that picks the winner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMarker {
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WheelLayout {
    pub circle: Circle,
    pub rotation: f64,
    pub stroke_radius: f64,
    pub segments: Vec<Segment>,
    pub pointer: Option<PointerMarker>,
}

impl<C: Clock> Wheel<C> {
    /// Projects the current state for drawing. `None` until the wheel has bounds.
    pub fn layout(&self) -> Option<WheelLayout> {
        let circle = self.circle()?;
        let style = self.style();

        let stroke_radius = match style.stroke.width / 2.0 {
            r if r == 0.0 => 1.0,
            r => r,
        };

        let segments = match (self.anchors(), self.angle_per_item()) {
            (Ok(anchors), Some(sweep)) => {
                let count = self.items().len();
                self.items()
                    .iter()
                    .zip(anchors)
                    .enumerate()
                    .map(|(i, (label, anchor))| Segment {
                        index: i,
                        label: label.clone(),
                        start_angle: i as f64 * sweep,
                        sweep,
                        anchor,
                        color: self.palette().segment_color(i, count),
                        label_angle: sweep / 2.0 + i as f64 * sweep + 180.0,
                    })
                    .collect()
            }
            _ => Vec::new(),
        };

        let pointer = style.arrow.enabled.then(|| {
            let center = circle.center();
            PointerMarker {
                center: Point::new(center.x, center.y - circle.radius()),
                width: style.arrow.width,
                height: style.arrow.height,
                color: style.arrow.color,
            }
        });

        Some(WheelLayout {
            circle,
            rotation: self.angle(),
            stroke_radius,
            segments,
            pointer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{StrokeStyle, WheelStyle};
    use crate::scheduler::ManualClock;

    #[test]
    fn test_layout_requires_bounds() {
        let wheel = Wheel::with_clock(ManualClock::new());
        assert!(wheel.layout().is_none());
    }

    #[test]
    fn test_layout_without_items_has_no_segments() {
        let mut wheel = Wheel::with_clock(ManualClock::new());
        wheel.set_bounds(300.0, 200.0);

        let layout = wheel.layout().unwrap();
        assert!(layout.segments.is_empty());
        assert_eq!(layout.stroke_radius, 1.0);
        assert_eq!(
            layout.pointer.map(|p| p.center),
            Some(Point::new(150.0, 0.0))
        );
    }

    #[test]
    fn test_layout_segments() {
        let mut wheel = Wheel::with_clock(ManualClock::new());
        wheel.set_bounds(400.0, 400.0);
        wheel.set_items(["a", "b", "c", "d"].map(ItemLabel::from).to_vec());
        wheel.set_style(WheelStyle {
            stroke: StrokeStyle {
                width: 6.0,
                color: None,
            },
            ..WheelStyle::default()
        });
        wheel.rotate_by(90.0);

        let layout = wheel.layout().unwrap();
        assert_eq!(layout.rotation, 90.0);
        assert_eq!(layout.stroke_radius, 3.0);
        assert_eq!(layout.segments.len(), 4);

        let third = &layout.segments[2];
        assert_eq!(third.label, ItemLabel::new("c"));
        assert_eq!(third.start_angle, 180.0);
        assert_eq!(third.sweep, 90.0);
        assert_eq!(third.anchor, PixelPoint::new(200, 0));
        assert_eq!(third.label_angle, 405.0);

        // last of four on a seven-color palette keeps its own color
        assert_eq!(layout.segments[3].color, wheel.palette().colors()[3]);
    }
}
