use fnv::FnvHashMap;
use mint::Point2;


pub type CellIdx = (i64, i64);

/// Cell coordinates are clamped to `[-CELL_LIMIT, CELL_LIMIT]`.
/// Clamping keeps `cell_id` monotonic, so far away shapes end up sharing a border cell
/// instead of being lost, and the inclusive ranges below never overflow.
pub const CELL_LIMIT: i64 = 1 << 52;

/// SparseStorage stores cells in a HashMap to be used in a PlanGrid.
/// It is Sparse because cells are only allocated once something is inserted in them.
#[derive(Clone, Debug)]
pub struct SparseStorage<T: Default> {
    cell_size: f64,
    cells: FnvHashMap<CellIdx, T>,
}

impl<T: Default> SparseStorage<T> {
    pub fn new(cell_size: f64) -> Self {
        assert!(
            cell_size > 0.0 && cell_size.is_finite(),
            "Cell size ({}) must be strictly positive and finite",
            cell_size
        );
        Self {
            cell_size,
            cells: Default::default(),
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn cells(&self) -> &FnvHashMap<CellIdx, T> {
        &self.cells
    }

    pub fn cell_mut(&mut self, id: CellIdx) -> &mut T {
        self.cells.entry(id).or_default()
    }

    pub fn cell(&self, id: CellIdx) -> Option<&T> {
        self.cells.get(&id)
    }

    /// Id of the cell containing `pos`, points on a cell's lower or left edge belong to it.
    pub fn cell_id(&self, pos: Point2<f64>) -> CellIdx {
        (self.axis_id(pos.x), self.axis_id(pos.y))
    }

    fn axis_id(&self, v: f64) -> i64 {
        // `as` saturates and maps NaN to 0, the clamp bounds what is left
        ((v / self.cell_size).floor() as i64).clamp(-CELL_LIMIT, CELL_LIMIT)
    }
}

/// Iterates over every cell id between ll and ur, both included, row by row.
pub fn cell_range((x1, y1): CellIdx, (x2, y2): CellIdx) -> XYRange {
    XYRange {
        x1,
        x2: x2 + 1,
        y2: y2 + 1,
        x: x1,
        y: y1,
    }
}

/// Number of cells covered by the range ll..=ur on its longest axis.
pub fn cell_span((x1, y1): CellIdx, (x2, y2): CellIdx) -> i64 {
    (x2 - x1 + 1).max(y2 - y1 + 1)
}

pub struct XYRange {
    x1: i64,
    x2: i64,
    y2: i64,
    x: i64,
    y: i64,
}

impl Iterator for XYRange {
    type Item = CellIdx;

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.y2 || self.x1 >= self.x2 {
            return None;
        }

        let v = (self.x, self.y);
        self.x += 1;
        if self.x == self.x2 {
            self.x = self.x1;
            self.y += 1;
        }

        Some(v)
    }
}
