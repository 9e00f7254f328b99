use super::model::Wheel;
use crate::geometry::{Circle, Point};
use crate::scheduler::Clock;

/// Degrees of rotation per pixel of pointer travel.
pub const TOUCH_SCALE_FACTOR: f64 = (180.0 / 320.0) / 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    Cancel(Point),
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            Self::Down(p) | Self::Move(p) | Self::Up(p) | Self::Cancel(p) => p,
        }
    }
}

/// Rotation produced by dragging from `previous` to `current`, so the wheel follows the pointer
/// around its rim.
pub fn drag_angle(circle: &Circle, previous: Point, current: Point) -> f64 {
    let center = circle.center();
    let (mut dx, mut dy) = (current.x - previous.x, current.y - previous.y);

    // below the mid-line a rightward drag turns the wheel backwards
    if current.y > center.y {
        dx = -dx;
    }

    // left of the mid-line a downward drag does
    if current.x < center.x {
        dy = -dy;
    }

    (dx + dy) * TOUCH_SCALE_FACTOR
}

impl<C: Clock> Wheel<C> {
    /// Feeds one pointer event to the wheel. Returns whether the wheel consumed it.
    ///
    /// Presses and moves are refused while the wheel is disabled, spinning, has no bounds yet, or
    /// when they land outside the disc. Only a move with a press held turns the wheel. A release
    /// always ends the gesture, wherever it lands.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        if let PointerEvent::Up(_) | PointerEvent::Cancel(_) = event {
            let live = self.gesture.live;
            self.end_gesture();
            self.gesture.previous = None;
            return live;
        }

        let Some(circle) = self.circle() else {
            return false;
        };
        if !self.is_enabled() || self.is_animating() {
            return false;
        }

        let position = event.position();
        if !circle.contains(position.x, position.y) {
            return false;
        }

        match event {
            PointerEvent::Down(_) => self.begin_gesture(),
            PointerEvent::Move(_) if self.gesture.live => {
                if let Some(previous) = self.gesture.previous {
                    let delta = drag_angle(&circle, previous, position);
                    self.rotate_by(delta);
                    if delta != 0.0 {
                        self.gesture.rotated = true;
                    }
                }
            }
            PointerEvent::Move(_) => return false,
            PointerEvent::Up(_) | PointerEvent::Cancel(_) => {}
        }

        self.gesture.previous = Some(position);
        true
    }
}
