use super::*;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    pub id: String,
    pub center: Point2<f64>,
    #[cfg_attr(feature = "serde", serde(alias = "r"))]
    pub radius: f64,
}

impl Circle {
    pub fn new(id: impl Into<String>, center: impl Into<Point2<f64>>, radius: f64) -> Self {
        Self {
            id: id.into(),
            center: center.into(),
            radius,
        }
    }
}

impl Shape for Circle {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn bbox(&self) -> AABB {
        AABB {
            ll: Point2 {
                x: self.center.x - self.radius,
                y: self.center.y - self.radius,
            },
            ur: Point2 {
                x: self.center.x + self.radius,
                y: self.center.y + self.radius,
            },
        }
    }

    fn contained_in(&self, boundary: &Boundary) -> bool {
        let (cx, cy, r) = (self.center.x, self.center.y, self.radius);

        r <= cx && cx <= boundary.length - r && r <= cy && cy <= boundary.width - r
    }
}

impl Intersect<Circle> for Circle {
    fn intersects(&self, c: &Circle) -> bool {
        let v = sub(self.center, c.center);

        dot(v, v) < (self.radius + c.radius).powi(2)
    }
}

impl Intersect<Rectangle> for Circle {
    fn intersects(&self, r: &Rectangle) -> bool {
        r.intersects(self)
    }
}
