pub mod config;
pub mod error;
pub mod events;
pub mod geometry;
pub mod macros;
pub mod rotation;
pub mod scheduler;
pub mod sys;
pub mod wheel;

pub use error::WheelError;
pub use events::{WheelEvent, WheelListener};
pub use wheel::{ItemLabel, PointerEvent, Wheel};
