use thiserror::Error;

/// Conditions a wheel reports instead of acting. None of them leave the wheel in a bad state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WheelError {
    #[error("palette has {found} colors, at least {min} required")]
    InvalidConfiguration { found: usize, min: usize },
    #[error("spin request with a zero angle")]
    NoOpRequest,
    #[error("wheel bounds are not known yet")]
    UninitializedGeometry,
    #[error("wheel has no items")]
    NoItems,
    #[error("no segment is under the pointer")]
    NoSelection,
}
