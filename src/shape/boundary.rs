use super::*;

/// The region `[0, length] x [0, width]` every shape must fit in.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Boundary {
    /// Extent along x
    pub length: f64,
    /// Extent along y
    pub width: f64,
}

impl Boundary {
    pub fn new(length: f64, width: f64) -> Self {
        Self { length, width }
    }

    #[cfg(feature = "euclid")]
    pub fn from_euclid<U>(size: euclid::Size2D<f64, U>) -> Self {
        Self::new(size.width, size.height)
    }

    pub fn aabb(&self) -> AABB {
        AABB {
            ll: Point2 { x: 0.0, y: 0.0 },
            ur: Point2 {
                x: self.length,
                y: self.width,
            },
        }
    }
}
