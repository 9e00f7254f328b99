use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

pub mod input;
pub mod layout;
pub mod model;
pub mod paint;

pub use input::{PointerEvent, TOUCH_SCALE_FACTOR};
pub use layout::{PointerMarker, Segment, WheelLayout};
pub use model::Wheel;
pub use paint::{Color, MIN_COLORS, Palette};

pub const ANGLE: f64 = 360.0;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemLabel(String);

crate::impl_label_newtype!(ItemLabel);

/// Wraps an angle into `[0, 360)`.
pub fn normalize_angle(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(ANGLE);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if wrapped >= ANGLE { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(360.0), 0.0);
        assert_eq!(normalize_angle(725.0), 5.0);
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert_eq!(normalize_angle(-1e-20), 0.0);
    }
}
