//!
//! flat_loadcheck validates 2D load plans: axis-aligned rectangles and circles placed in a
//! rectangular boundary (think pallets and paper rolls on a truck floor).
//!
//! Every shape that sticks out of the boundary or overlaps another shape is flagged.
//! Touching is fine: a shape resting against a wall, two boxes sharing an edge or two
//! tangent circles are all valid.
//!
//! ```rust
//! use flat_loadcheck::{validate, Boundary, Circle, Rectangle};
//!
//! let boundary = Boundary::new(13.6, 2.45);
//! let pallets = vec![
//!     Rectangle::new("P1", [1.0, 0.6], 1.2, 0.8),
//!     Rectangle::new("P2", [1.5, 0.6], 1.2, 0.8),
//!     Rectangle::new("P4", [3.0, 1.8], 1.2, 0.8),
//! ];
//! let rolls = vec![Circle::new("R4", [14.0, 1.0], 0.5)];
//!
//! let flagged = validate(&boundary, &pallets, &rolls).unwrap();
//! assert_eq!(flagged.iter().collect::<Vec<_>>(), vec!["P1", "P2", "R4"]);
//! ```
//!
//! Overlaps are found either by testing every pair or, for large plans, through a sparse
//! grid broad phase ([`PlanGrid`]). Both give the same answer, see [`Engine`].
//!

pub mod error;
pub mod grid;
pub mod plan;
pub mod shape;
pub mod storage;
pub mod validator;
pub mod violation;

pub use error::{LayoutError, Result};
pub use grid::{PlanGrid, ShapeHandle, MAX_SPAN};
pub use plan::LoadPlan;
pub use shape::{
    circle_vs_circle, is_contained, rect_vs_circle, rect_vs_rect, Boundary, Circle, Intersect,
    Rectangle, Shape, ShapeKind, ShapeRef, AABB,
};
pub use validator::{validate, Engine, Validator, CELLS_PER_SHAPE, GRID_THRESHOLD};
pub use violation::{Report, Violation, ViolationSet};
