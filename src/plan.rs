use crate::error::{LayoutError, Result};
use crate::shape::{Boundary, Circle, Rectangle, ShapeRef};
use crate::validator::Validator;
use crate::violation::{Report, ViolationSet};
use fnv::FnvHashSet;

/// A boundary and the shapes placed in it, the input of one validation run.
///
/// Shapes are walked in a stable order: rectangles first, then circles, each in insertion order.
///
/// ```rust
/// use flat_loadcheck::{Boundary, Circle, LoadPlan, Rectangle};
///
/// let plan = LoadPlan::new(Boundary::new(13.6, 2.45))
///     .with_rectangle(Rectangle::new("P1", [1.0, 0.6], 1.2, 0.8))
///     .with_rectangle(Rectangle::new("P2", [1.5, 0.6], 1.2, 0.8))
///     .with_circle(Circle::new("R1", [8.0, 1.5], 0.5));
///
/// let flagged = plan.validate().unwrap();
/// assert_eq!(flagged.iter().collect::<Vec<_>>(), vec!["P1", "P2"]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadPlan {
    pub boundary: Boundary,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rectangles: Vec<Rectangle>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub circles: Vec<Circle>,
}

impl LoadPlan {
    pub fn new(boundary: Boundary) -> Self {
        Self {
            boundary,
            rectangles: vec![],
            circles: vec![],
        }
    }

    pub fn with_rectangle(mut self, rect: Rectangle) -> Self {
        self.rectangles.push(rect);
        self
    }

    pub fn with_circle(mut self, circle: Circle) -> Self {
        self.circles.push(circle);
        self
    }

    /// Total number of shapes
    pub fn len(&self) -> usize {
        self.rectangles.len() + self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rectangles.is_empty() && self.circles.is_empty()
    }

    pub fn shapes(&self) -> impl Iterator<Item = ShapeRef<'_>> + '_ {
        shapes(&self.rectangles, &self.circles)
    }

    /// Checks the plan is well-formed, see [`check`].
    pub fn check(&self) -> Result<()> {
        check(&self.boundary, &self.rectangles, &self.circles)
    }

    pub fn validate(&self) -> Result<ViolationSet> {
        Validator::default().validate(&self.boundary, &self.rectangles, &self.circles)
    }

    pub fn report(&self) -> Result<Report> {
        Validator::default().report(&self.boundary, &self.rectangles, &self.circles)
    }
}

pub(crate) fn shapes<'a>(
    rectangles: &'a [Rectangle],
    circles: &'a [Circle],
) -> impl Iterator<Item = ShapeRef<'a>> + 'a {
    rectangles
        .iter()
        .map(ShapeRef::Rectangle)
        .chain(circles.iter().map(ShapeRef::Circle))
}

fn positive(v: f64) -> bool {
    // also rejects NaN
    v > 0.0
}

/// Checks that every dimension is strictly positive, every center is finite,
/// and every id is non-empty and unique across both collections.
///
/// Stops at the first problem found, in plan order.
pub fn check(boundary: &Boundary, rectangles: &[Rectangle], circles: &[Circle]) -> Result<()> {
    if !positive(boundary.length) {
        return Err(LayoutError::InvalidBoundary {
            dimension: "length",
            value: boundary.length,
        });
    }
    if !positive(boundary.width) {
        return Err(LayoutError::InvalidBoundary {
            dimension: "width",
            value: boundary.width,
        });
    }

    let mut seen = FnvHashSet::default();
    let mut indices = [0usize; 2];

    for shape in shapes(rectangles, circles) {
        let kind = shape.kind();
        let index = &mut indices[kind as usize];
        let id = shape.id();

        if id.is_empty() {
            return Err(LayoutError::EmptyId {
                kind,
                index: *index,
            });
        }
        *index += 1;

        let (center, bad_dim) = match shape {
            ShapeRef::Rectangle(r) => (
                r.center,
                [("w", r.w), ("h", r.h)]
                    .into_iter()
                    .find(|&(_, v)| !positive(v)),
            ),
            ShapeRef::Circle(c) => (c.center, Some(("r", c.radius)).filter(|&(_, v)| !positive(v))),
        };

        if let Some((dimension, value)) = bad_dim {
            return Err(LayoutError::InvalidDimension {
                id: id.to_string(),
                dimension,
                value,
            });
        }

        if !center.x.is_finite() || !center.y.is_finite() {
            return Err(LayoutError::NonFiniteCenter {
                id: id.to_string(),
                x: center.x,
                y: center.y,
            });
        }

        if !seen.insert(id) {
            return Err(LayoutError::DuplicateId { id: id.to_string() });
        }
    }

    Ok(())
}
