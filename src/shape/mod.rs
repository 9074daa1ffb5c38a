use mint::Point2;

mod aabb;
mod boundary;
mod circle;
mod rectangle;

pub use aabb::*;
pub use boundary::*;
pub use circle::*;
pub use rectangle::*;

fn dot(a: Point2<f64>, b: Point2<f64>) -> f64 {
    a.x * b.x + a.y * b.y
}

fn sub(a: Point2<f64>, b: Point2<f64>) -> Point2<f64> {
    Point2 {
        x: a.x - b.x,
        y: a.y - b.y,
    }
}

/// Interior intersection test against another shape.
///
/// Shapes that only touch (shared edge, tangency) do not intersect.
/// Implementations are symmetric: `a.intersects(b) == b.intersects(a)`.
pub trait Intersect<T> {
    fn intersects(&self, shape: &T) -> bool;
}

pub trait Shape: Intersect<Rectangle> + Intersect<Circle> {
    /// Identifier of the shape, unique within a load plan
    fn id(&self) -> &str;

    fn kind(&self) -> ShapeKind;

    fn bbox(&self) -> AABB;

    /// Whether the shape lies fully within the boundary, walls included.
    fn contained_in(&self, boundary: &Boundary) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeKind {
    Rectangle,
    Circle,
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeKind::Rectangle => f.pad("rectangle"),
            ShapeKind::Circle => f.pad("circle"),
        }
    }
}

/// Borrowed view over either kind of shape, so mixed collections can be walked
/// while the geometry stays kind-specific.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeRef<'a> {
    Rectangle(&'a Rectangle),
    Circle(&'a Circle),
}

impl<'a> ShapeRef<'a> {
    pub fn id(&self) -> &'a str {
        match *self {
            ShapeRef::Rectangle(r) => &r.id,
            ShapeRef::Circle(c) => &c.id,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeRef::Rectangle(_) => ShapeKind::Rectangle,
            ShapeRef::Circle(_) => ShapeKind::Circle,
        }
    }

    pub fn bbox(&self) -> AABB {
        match self {
            ShapeRef::Rectangle(r) => r.bbox(),
            ShapeRef::Circle(c) => c.bbox(),
        }
    }

    pub fn contained_in(&self, boundary: &Boundary) -> bool {
        match self {
            ShapeRef::Rectangle(r) => r.contained_in(boundary),
            ShapeRef::Circle(c) => c.contained_in(boundary),
        }
    }

    pub fn overlaps(&self, other: ShapeRef<'_>) -> bool {
        match (*self, other) {
            (ShapeRef::Rectangle(a), ShapeRef::Rectangle(b)) => rect_vs_rect(a, b),
            (ShapeRef::Circle(a), ShapeRef::Circle(b)) => circle_vs_circle(a, b),
            (ShapeRef::Rectangle(r), ShapeRef::Circle(c))
            | (ShapeRef::Circle(c), ShapeRef::Rectangle(r)) => rect_vs_circle(r, c),
        }
    }
}

impl<'a> From<&'a Rectangle> for ShapeRef<'a> {
    fn from(r: &'a Rectangle) -> Self {
        ShapeRef::Rectangle(r)
    }
}

impl<'a> From<&'a Circle> for ShapeRef<'a> {
    fn from(c: &'a Circle) -> Self {
        ShapeRef::Circle(c)
    }
}

/// Whether the shape lies fully within the boundary. Touching a wall is allowed.
pub fn is_contained<'a>(shape: impl Into<ShapeRef<'a>>, boundary: &Boundary) -> bool {
    shape.into().contained_in(boundary)
}

pub fn rect_vs_rect(a: &Rectangle, b: &Rectangle) -> bool {
    a.intersects(b)
}

pub fn circle_vs_circle(a: &Circle, b: &Circle) -> bool {
    a.intersects(b)
}

pub fn rect_vs_circle(rect: &Rectangle, circ: &Circle) -> bool {
    rect.intersects(circ)
}
