use super::*;

/// Axis-aligned rectangle described by its center and full extents.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rectangle {
    pub id: String,
    pub center: Point2<f64>,
    /// Extent along x
    pub w: f64,
    /// Extent along y
    pub h: f64,
}

impl Rectangle {
    pub fn new(id: impl Into<String>, center: impl Into<Point2<f64>>, w: f64, h: f64) -> Self {
        Self {
            id: id.into(),
            center: center.into(),
            w,
            h,
        }
    }

    /// Builds a rectangle covering `rect`, whose origin is its lower left corner.
    #[cfg(feature = "euclid")]
    pub fn from_euclid<U>(id: impl Into<String>, rect: euclid::Rect<f64, U>) -> Self {
        let c = rect.center();
        Self::new(id, [c.x, c.y], rect.size.width, rect.size.height)
    }

    pub fn half_w(&self) -> f64 {
        self.w / 2.0
    }

    pub fn half_h(&self) -> f64 {
        self.h / 2.0
    }

    pub fn left(&self) -> f64 {
        self.center.x - self.half_w()
    }

    pub fn right(&self) -> f64 {
        self.center.x + self.half_w()
    }

    pub fn bottom(&self) -> f64 {
        self.center.y - self.half_h()
    }

    pub fn top(&self) -> f64 {
        self.center.y + self.half_h()
    }

    pub fn aabb(&self) -> AABB {
        AABB {
            ll: Point2 {
                x: self.left(),
                y: self.bottom(),
            },
            ur: Point2 {
                x: self.right(),
                y: self.top(),
            },
        }
    }
}

impl Shape for Rectangle {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn bbox(&self) -> AABB {
        self.aabb()
    }

    fn contained_in(&self, boundary: &Boundary) -> bool {
        boundary.aabb().contains_aabb(&self.aabb())
    }
}

impl Intersect<Rectangle> for Rectangle {
    fn intersects(&self, b: &Rectangle) -> bool {
        let a = self;
        let dx = f64::abs(a.center.x - b.center.x);
        let dy = f64::abs(a.center.y - b.center.y);

        dx < (a.w + b.w) / 2.0 && dy < (a.h + b.h) / 2.0
    }
}

impl Intersect<Circle> for Rectangle {
    fn intersects(&self, c: &Circle) -> bool {
        let closest = self.aabb().clamp(c.center);
        let diff = sub(closest, c.center);

        dot(diff, diff) < c.radius * c.radius
    }
}
