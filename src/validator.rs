use crate::error::{LayoutError, Result};
use crate::grid::{largest_extent, PlanGrid};
use crate::plan::{check, shapes};
use crate::shape::{
    circle_vs_circle, rect_vs_circle, rect_vs_rect, Boundary, Circle, Rectangle, ShapeRef,
};
use crate::violation::{Report, Violation, ViolationSet};

/// Above this many shapes, [`Engine::Auto`] switches from all-pairs to the grid.
pub const GRID_THRESHOLD: usize = 64;

/// A user cell size is raised so that the largest shape spans at most this many cells per axis.
pub const CELLS_PER_SHAPE: f64 = 16.0;

/// How overlapping pairs are found. Every engine yields the same report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Engine {
    /// Tests every unordered pair, O(n²)
    AllPairs,
    /// Buckets shapes in a uniform grid and only tests shapes sharing a cell
    Grid,
    /// AllPairs up to [`GRID_THRESHOLD`] shapes, Grid above
    #[default]
    Auto,
}

/// Validates load plans: containment of every shape, then pairwise overlaps.
///
/// ```rust
/// use flat_loadcheck::{Boundary, Circle, Engine, Rectangle, Validator};
///
/// let rects = vec![Rectangle::new("P3", [13.2, 0.6], 1.2, 0.8)];
/// let circles = vec![Circle::new("R4", [14.0, 1.0], 0.5)];
///
/// let v = Validator::new().with_engine(Engine::Grid);
/// let flagged = v.validate(&Boundary::new(13.6, 2.45), &rects, &circles).unwrap();
/// assert_eq!(flagged.iter().collect::<Vec<_>>(), vec!["P3", "R4"]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Validator {
    engine: Engine,
    cell_size: Option<f64>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    /// Cell size used by the grid engine.
    /// By default the largest extent of any shape in the plan.
    ///
    /// Only checked when the grid engine runs. It is raised to `largest extent / CELLS_PER_SHAPE`
    /// if smaller, the report does not depend on it.
    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = Some(cell_size);
        self
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    pub fn validate(
        &self,
        boundary: &Boundary,
        rectangles: &[Rectangle],
        circles: &[Circle],
    ) -> Result<ViolationSet> {
        self.report(boundary, rectangles, circles)
            .map(|r| r.violation_set())
    }

    pub fn report(
        &self,
        boundary: &Boundary,
        rectangles: &[Rectangle],
        circles: &[Circle],
    ) -> Result<Report> {
        let engine = self.resolve(rectangles.len() + circles.len());
        let settings = match engine {
            Engine::Grid => self.check_settings(),
            _ => Ok(()),
        };
        if let Err(e) = settings.and(check(boundary, rectangles, circles)) {
            log::debug!("refusing malformed load plan: {}", e);
            return Err(e);
        }

        let mut violations: Vec<Violation> = shapes(rectangles, circles)
            .filter(|s| !s.contained_in(boundary))
            .map(|s| Violation::OutOfBounds {
                id: s.id().to_string(),
                kind: s.kind(),
            })
            .collect();

        match engine {
            Engine::Grid => {
                let grid = match self.grid_cell_size(largest_extent(rectangles, circles)) {
                    Some(cell_size) => {
                        let mut g = PlanGrid::new(cell_size);
                        shapes(rectangles, circles).for_each(|s| {
                            g.insert(s);
                        });
                        g
                    }
                    None => PlanGrid::from_shapes(rectangles, circles),
                };
                violations.extend(
                    grid.overlapping_pairs()
                        .into_iter()
                        .map(|(a, b)| overlap(a, b)),
                );
            }
            Engine::AllPairs | Engine::Auto => violations.extend(all_pairs(rectangles, circles)),
        }

        for v in &violations {
            log::trace!("{}", v);
        }
        let report = Report::from_violations(violations);
        log::debug!(
            "validated {} rectangles and {} circles with {:?}: {} violations",
            rectangles.len(),
            circles.len(),
            engine,
            report.violations().len()
        );

        Ok(report)
    }

    fn check_settings(&self) -> Result<()> {
        match self.cell_size {
            Some(value) if !(value > 0.0 && value.is_finite()) => {
                Err(LayoutError::InvalidCellSize { value })
            }
            _ => Ok(()),
        }
    }

    /// User cell size, raised so the largest shape does not span too many cells.
    fn grid_cell_size(&self, largest: f64) -> Option<f64> {
        let user = self.cell_size?;
        let min = largest / CELLS_PER_SHAPE;
        if user < min {
            log::debug!("raising grid cell size from {} to {}", user, min);
            return Some(min);
        }
        Some(user)
    }

    fn resolve(&self, n_shapes: usize) -> Engine {
        match self.engine {
            Engine::Auto if n_shapes > GRID_THRESHOLD => Engine::Grid,
            Engine::Auto => Engine::AllPairs,
            e => e,
        }
    }
}

fn overlap(first: ShapeRef<'_>, second: ShapeRef<'_>) -> Violation {
    Violation::Overlap {
        first: first.id().to_string(),
        second: second.id().to_string(),
    }
}

/// Rectangle pairs, then circle pairs, then every rectangle against every circle.
fn all_pairs(rectangles: &[Rectangle], circles: &[Circle]) -> Vec<Violation> {
    let mut found = vec![];

    for (i, a) in rectangles.iter().enumerate() {
        for b in &rectangles[i + 1..] {
            if rect_vs_rect(a, b) {
                found.push(overlap(a.into(), b.into()));
            }
        }
    }

    for (i, a) in circles.iter().enumerate() {
        for b in &circles[i + 1..] {
            if circle_vs_circle(a, b) {
                found.push(overlap(a.into(), b.into()));
            }
        }
    }

    for r in rectangles {
        for c in circles {
            if rect_vs_circle(r, c) {
                found.push(overlap(r.into(), c.into()));
            }
        }
    }

    found
}

/// Validates a plan with the default [`Validator`].
///
/// Returns the ids of every shape that sticks out of `boundary` or overlaps another shape,
/// or an error if the plan is malformed.
pub fn validate(
    boundary: &Boundary,
    rectangles: &[Rectangle],
    circles: &[Circle],
) -> Result<ViolationSet> {
    Validator::default().validate(boundary, rectangles, circles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{is_contained, Intersect};

    fn truck() -> Boundary {
        Boundary::new(13.6, 2.45)
    }

    fn pallet(id: &str, x: f64, y: f64) -> Rectangle {
        Rectangle::new(id, [x, y], 1.2, 0.8)
    }

    fn roll(id: &str, x: f64, y: f64) -> Circle {
        Circle::new(id, [x, y], 0.5)
    }

    fn load_list() -> (Vec<Rectangle>, Vec<Circle>) {
        let rects = vec![
            pallet("P1", 1.0, 0.6),
            pallet("P2", 1.5, 0.6),
            pallet("P3", 13.2, 0.6),
            pallet("P4", 3.0, 1.8),
            pallet("P5", 6.0, 0.6),
            pallet("P6", 9.0, 1.8),
        ];
        let circles = vec![
            roll("R1", 4.0, 0.6),
            roll("R2", 4.3, 0.6),
            roll("R3", 8.0, 1.5),
            roll("R4", 14.0, 1.0),
        ];
        (rects, circles)
    }

    fn engines() -> [Validator; 3] {
        [
            Validator::new().with_engine(Engine::AllPairs),
            Validator::new().with_engine(Engine::Grid),
            Validator::new().with_engine(Engine::Grid).with_cell_size(0.25),
        ]
    }

    #[test]
    fn test_load_list() {
        let (rects, circles) = load_list();

        for v in engines() {
            let flagged = v.validate(&truck(), &rects, &circles).unwrap();
            assert_eq!(
                flagged.iter().collect::<Vec<_>>(),
                vec!["P1", "P2", "P3", "P6", "R1", "R2", "R3", "R4"]
            );

            let report = v.report(&truck(), &rects, &circles).unwrap();
            assert_eq!(report.out_of_bounds().collect::<Vec<_>>(), vec!["P3", "R4"]);
            // R3 reaches x = 8.5, past P6's left edge at 8.4
            assert_eq!(
                report.overlaps().collect::<Vec<_>>(),
                vec![("P1", "P2"), ("P3", "R4"), ("P6", "R3"), ("R1", "R2")]
            );
        }
    }

    #[test]
    fn test_clean_pallet_absent() {
        let (rects, circles) = load_list();
        let flagged = validate(&truck(), &rects, &circles).unwrap();

        assert!(!flagged.contains("P4"));
        assert!(!flagged.contains("P5"));
    }

    #[test]
    fn test_out_of_bounds_without_overlap() {
        let flagged = validate(&truck(), &[], &[roll("R4", 14.0, 1.0)]).unwrap();
        assert_eq!(flagged.iter().collect::<Vec<_>>(), vec!["R4"]);
    }

    #[test]
    fn test_cross_kind_overlap() {
        let rects = [pallet("P1", 5.0, 1.0)];
        let circles = [Circle::new("R1", [5.0, 1.0], 0.2)];

        for v in engines() {
            let report = v.report(&truck(), &rects, &circles).unwrap();
            assert_eq!(report.overlaps().collect::<Vec<_>>(), vec![("P1", "R1")]);
        }
    }

    #[test]
    fn test_touching_shapes_are_valid() {
        let rects = [
            Rectangle::new("P1", [0.5, 0.5], 1.0, 1.0),
            Rectangle::new("P2", [1.5, 0.5], 1.0, 1.0),
            Rectangle::new("P3", [0.5, 1.5], 1.0, 1.0),
        ];
        // R1 is tangent to P2's right edge, the floor, and R2
        let circles = [roll("R1", 2.5, 0.5), roll("R2", 3.5, 0.5)];

        for v in engines() {
            let report = v.report(&truck(), &rects, &circles).unwrap();
            assert!(report.is_valid(), "{:?}", report);
        }
    }

    #[test]
    fn test_empty_plan() {
        let flagged = validate(&truck(), &[], &[]).unwrap();
        assert!(flagged.is_empty());
    }

    #[test]
    fn test_error_names_the_shape() {
        let rects = [pallet("P1", 1.0, 1.0), pallet("P1", 5.0, 1.0)];
        assert_eq!(
            validate(&truck(), &rects, &[]),
            Err(LayoutError::DuplicateId { id: "P1".into() })
        );
    }

    #[test]
    fn test_bad_cell_size() {
        let (rects, circles) = load_list();
        let v = Validator::new().with_engine(Engine::Grid).with_cell_size(0.0);

        assert_eq!(
            v.validate(&truck(), &rects, &circles),
            Err(LayoutError::InvalidCellSize { value: 0.0 })
        );
    }

    #[test]
    fn test_cell_size_only_checked_for_grid() {
        let (rects, circles) = load_list();

        let v = Validator::new()
            .with_engine(Engine::AllPairs)
            .with_cell_size(0.0);
        assert_eq!(v.validate(&truck(), &rects, &circles).unwrap().len(), 8);

        // 10 shapes, Auto runs all-pairs
        let v = Validator::new().with_cell_size(f64::NAN);
        assert!(v.validate(&truck(), &rects, &circles).is_ok());

        let many: Vec<_> = (0..GRID_THRESHOLD + 1)
            .map(|i| pallet(&format!("F{}", i), 1.0, 1.0 + i as f64))
            .collect();
        let v = Validator::new().with_cell_size(-1.0);
        assert_eq!(
            v.validate(&truck(), &many, &[]),
            Err(LayoutError::InvalidCellSize { value: -1.0 })
        );
    }

    #[test]
    fn test_tiny_cell_size_is_raised() {
        let v = Validator::new().with_engine(Engine::Grid).with_cell_size(2e-4);
        assert_eq!(v.grid_cell_size(1.2), Some(1.2 / CELLS_PER_SHAPE));
        assert_eq!(v.grid_cell_size(0.0), Some(2e-4));
        assert_eq!(Validator::new().with_cell_size(0.5).grid_cell_size(1.2), Some(0.5));
        assert_eq!(Validator::new().grid_cell_size(1.2), None);

        let rects = [pallet("P1", 1.0, 0.6), pallet("P2", 1.5, 0.6)];
        let flagged = v.validate(&truck(), &rects, &[]).unwrap();
        assert_eq!(flagged.iter().collect::<Vec<_>>(), vec!["P1", "P2"]);
    }

    #[test]
    fn test_engines_agree_far_from_origin() {
        let boundary = Boundary::new(1e10, 10.0);
        let mut rects: Vec<_> = (0..63)
            .map(|i| Rectangle::new(format!("F{}", i), [2.0 * i as f64 + 1.0, 1.0], 1.0, 1.0))
            .collect();
        rects.push(Rectangle::new("A", [5e9, 5.0], 1.0, 1.0));
        rects.push(Rectangle::new("B", [5e9 + 0.5, 5.0], 1.0, 1.0));
        assert!(rects.len() > GRID_THRESHOLD);

        let flagged = validate(&boundary, &rects, &[]).unwrap();
        assert_eq!(flagged.iter().collect::<Vec<_>>(), vec!["A", "B"]);

        let brute = Validator::new()
            .with_engine(Engine::AllPairs)
            .report(&boundary, &rects, &[])
            .unwrap();
        assert_eq!(brute.overlaps().collect::<Vec<_>>(), vec![("A", "B")]);
        for v in engines() {
            assert_eq!(v.report(&boundary, &rects, &[]).unwrap(), brute);
        }
    }

    #[test]
    fn test_auto_resolves_by_size() {
        let v = Validator::new();
        assert_eq!(v.engine(), Engine::Auto);
        assert_eq!(v.resolve(GRID_THRESHOLD), Engine::AllPairs);
        assert_eq!(v.resolve(GRID_THRESHOLD + 1), Engine::Grid);
        assert_eq!(
            Validator::new()
                .with_engine(Engine::AllPairs)
                .resolve(10_000),
            Engine::AllPairs
        );
    }

    #[test]
    fn test_idempotent() {
        let (rects, circles) = load_list();
        let a = validate(&truck(), &rects, &circles).unwrap();
        let b = validate(&truck(), &rects, &circles).unwrap();
        assert_eq!(a, b);
    }

    fn random_plan(
        rng: &fastrand::Rng,
        n_rects: usize,
        n_circles: usize,
    ) -> (Vec<Rectangle>, Vec<Circle>) {
        let rects = (0..n_rects)
            .map(|i| {
                Rectangle::new(
                    format!("P{}", i),
                    [rng.f64() * 40.0 - 1.0, rng.f64() * 12.0 - 1.0],
                    0.2 + rng.f64() * 2.0,
                    0.2 + rng.f64() * 2.0,
                )
            })
            .collect();
        let circles = (0..n_circles)
            .map(|i| {
                Circle::new(
                    format!("R{}", i),
                    [rng.f64() * 40.0 - 1.0, rng.f64() * 12.0 - 1.0],
                    0.1 + rng.f64(),
                )
            })
            .collect();
        (rects, circles)
    }

    #[test]
    fn test_union_completeness() {
        let rng = fastrand::Rng::with_seed(42);
        let boundary = Boundary::new(38.0, 10.0);

        for _ in 0..20 {
            let (rects, circles) = random_plan(&rng, 30, 30);
            let flagged = validate(&boundary, &rects, &circles).unwrap();

            for s in shapes(&rects, &circles) {
                let out = !is_contained(s, &boundary);
                let hit = shapes(&rects, &circles).any(|o| o.id() != s.id() && s.overlaps(o));
                assert_eq!(flagged.contains(s.id()), out || hit, "{}", s.id());
            }
        }
    }

    #[test]
    fn test_engines_agree() {
        let rng = fastrand::Rng::with_seed(1234);
        let boundary = Boundary::new(38.0, 10.0);

        for round in 0..30 {
            let (rects, circles) = random_plan(&rng, 10 + round * 3, 5 + round * 2);

            let brute = Validator::new()
                .with_engine(Engine::AllPairs)
                .report(&boundary, &rects, &circles)
                .unwrap();
            let grid = Validator::new()
                .with_engine(Engine::Grid)
                .report(&boundary, &rects, &circles)
                .unwrap();
            let fine_grid = Validator::new()
                .with_engine(Engine::Grid)
                .with_cell_size(0.3)
                .report(&boundary, &rects, &circles)
                .unwrap();

            assert_eq!(brute, grid);
            assert_eq!(brute, fine_grid);
        }
    }

    #[test]
    fn test_pair_order_follows_plan() {
        let rects = [pallet("Z", 5.0, 1.0)];
        let circles = [roll("A", 5.0, 1.0)];
        let flagged = validate(&truck(), &rects, &circles).unwrap();
        assert_eq!(flagged.len(), 2);

        let report = Validator::new().report(&truck(), &rects, &circles).unwrap();
        assert_eq!(report.overlaps().collect::<Vec<_>>(), vec![("Z", "A")]);
        assert!(rects[0].intersects(&circles[0]));
    }
}
