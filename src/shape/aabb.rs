use mint::Point2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AABB {
    /// Lower left of the AABB
    pub ll: Point2<f64>,
    /// Upper right of the AABB
    pub ur: Point2<f64>,
}

impl AABB {
    pub fn new(p1: Point2<f64>, p2: Point2<f64>) -> Self {
        AABB {
            ll: Point2 {
                x: p1.x.min(p2.x),
                y: p1.y.min(p2.y),
            },
            ur: Point2 {
                x: p1.x.max(p2.x),
                y: p1.y.max(p2.y),
            },
        }
    }

    pub fn contains(&self, p: Point2<f64>) -> bool {
        p.x >= self.ll.x && p.y >= self.ll.y && p.x <= self.ur.x && p.y <= self.ur.y
    }

    /// Closed containment, `other` may touch the edges of `self`.
    pub fn contains_aabb(&self, other: &AABB) -> bool {
        self.contains(other.ll) && self.contains(other.ur)
    }

    /// Closed intersection, boxes sharing an edge or a corner intersect.
    pub fn intersects(&self, b: &AABB) -> bool {
        let a = self;
        let x =
            f64::abs((a.ll.x + a.ur.x) - (b.ll.x + b.ur.x)) <= (a.ur.x - a.ll.x + b.ur.x - b.ll.x);
        let y =
            f64::abs((a.ll.y + a.ur.y) - (b.ll.y + b.ur.y)) <= (a.ur.y - a.ll.y + b.ur.y - b.ll.y);

        x && y
    }

    /// Closest point of the box to `p`, `p` itself when inside.
    pub fn clamp(&self, p: Point2<f64>) -> Point2<f64> {
        Point2 {
            x: p.x.max(self.ll.x).min(self.ur.x),
            y: p.y.max(self.ll.y).min(self.ur.y),
        }
    }

    pub fn width(&self) -> f64 {
        self.ur.x - self.ll.x
    }

    pub fn height(&self) -> f64 {
        self.ur.y - self.ll.y
    }
}
