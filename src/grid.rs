use crate::plan::shapes;
use crate::shape::{Circle, Rectangle, ShapeRef};
use crate::storage::{cell_range, cell_span, SparseStorage, XYRange};
use fnv::FnvHashSet;
use slotmapd::new_key_type;
use slotmapd::SlotMap;

/// Shapes whose bounding box spans more cells than this on either axis are not bucketed,
/// they are kept aside and tested against every other shape.
pub const MAX_SPAN: i64 = 64;

new_key_type! {
    /// This handle is used to get back a shape inserted in a PlanGrid.
    /// It is returned by the _insert_ method.
    pub struct ShapeHandle;
}

/// The actual object stored in the store
#[derive(Clone, Copy, Debug)]
struct StoreObject<'a> {
    shape: ShapeRef<'a>,
    /// Insertion rank, orders the two members of a reported pair
    rank: usize,
}

/// A single cell of the grid, can be empty
#[derive(Default, Clone, Debug)]
pub struct PlanGridCell {
    pub objs: Vec<ShapeHandle>,
}

/// PlanGrid is a broad phase over the shapes of a load plan, bucketing every shape
/// into the cells of a uniform sparse grid that its bounding box covers.
///
/// Two shapes can only overlap if they share at least one cell, so only those pairs go
/// through the exact overlap predicates.
///
/// ## Cell size
/// Queries are fast when shapes span few cells and cells hold few shapes.
/// [`PlanGrid::from_shapes`] picks the largest extent of any shape, so each shape spans
/// at most 2x2 cells.
/// A shape spanning more than [`MAX_SPAN`] cells is kept out of the cells and checked
/// against everything, so a cell size far too small stays correct, only slower.
///
/// ## Examples
/// ```rust
/// use flat_loadcheck::{Circle, PlanGrid, Rectangle, ShapeRef};
///
/// let rects = vec![Rectangle::new("P1", [1.0, 0.6], 1.2, 0.8)];
/// let circles = vec![
///     Circle::new("R1", [1.5, 0.6], 0.5),
///     Circle::new("R2", [8.0, 1.5], 0.5),
/// ];
///
/// let g = PlanGrid::from_shapes(&rects, &circles);
/// assert_eq!(g.len(), 3);
///
/// let pairs: Vec<_> = g
///     .overlapping_pairs()
///     .into_iter()
///     .map(|(a, b)| (a.id(), b.id()))
///     .collect();
/// assert_eq!(pairs, vec![("P1", "R1")]);
///
/// let hits: Vec<_> = g.query(ShapeRef::from(&circles[1])).map(|(_, s)| s.id()).collect();
/// assert_eq!(hits, vec!["R2"]);
/// ```
#[derive(Clone, Debug)]
pub struct PlanGrid<'a> {
    storage: SparseStorage<PlanGridCell>,
    objects: SlotMap<ShapeHandle, StoreObject<'a>>,
    /// Shapes spanning more than `MAX_SPAN` cells
    oversized: Vec<ShapeHandle>,
    next_rank: usize,
}

impl<'a> PlanGrid<'a> {
    /// Creates an empty grid.
    ///
    /// # Panics
    /// If `cell_size` is not strictly positive and finite.
    pub fn new(cell_size: f64) -> Self {
        Self {
            storage: SparseStorage::new(cell_size),
            objects: SlotMap::with_key(),
            oversized: vec![],
            next_rank: 0,
        }
    }

    /// Creates a grid holding every rectangle then every circle,
    /// with a cell size matching the largest shape.
    pub fn from_shapes(rectangles: &'a [Rectangle], circles: &'a [Circle]) -> Self {
        let largest = largest_extent(rectangles, circles);

        let mut g = Self::new(if largest > 0.0 { largest } else { 1.0 });
        for s in shapes(rectangles, circles) {
            g.insert(s);
        }
        g
    }

    /// Cells covered by the bounding box of `shape`, None if it spans too many of them.
    fn cells_of(&self, shape: ShapeRef<'_>) -> Option<XYRange> {
        let bbox = shape.bbox();
        let (ll, ur) = (self.storage.cell_id(bbox.ll), self.storage.cell_id(bbox.ur));

        if cell_span(ll, ur) > MAX_SPAN {
            return None;
        }
        Some(cell_range(ll, ur))
    }

    /// Inserts a shape, returns the unique and stable handle to be used with get
    pub fn insert(&mut self, shape: ShapeRef<'a>) -> ShapeHandle {
        let rank = self.next_rank;
        self.next_rank += 1;

        let h = self.objects.insert(StoreObject { shape, rank });
        match self.cells_of(shape) {
            Some(cells) => {
                for id in cells {
                    self.storage.cell_mut(id).objs.push(h);
                }
            }
            None => self.oversized.push(h),
        }
        h
    }

    /// Removes a shape from the grid, returning it if it was still there.
    pub fn remove(&mut self, handle: ShapeHandle) -> Option<ShapeRef<'a>> {
        let st = self.objects.remove(handle)?;

        match self.cells_of(st.shape) {
            Some(cells) => {
                for id in cells {
                    let cell = self.storage.cell_mut(id);
                    if let Some(p) = cell.objs.iter().position(|x| *x == handle) {
                        cell.objs.swap_remove(p);
                    }
                }
            }
            None => self.oversized.retain(|x| *x != handle),
        }
        Some(st.shape)
    }

    pub fn get(&self, handle: ShapeHandle) -> Option<ShapeRef<'a>> {
        self.objects.get(handle).map(|x| x.shape)
    }

    /// Iterate over all handles
    pub fn handles(&self) -> impl Iterator<Item = ShapeHandle> + '_ {
        self.objects.keys()
    }

    /// Handles of the shapes kept out of the cells
    pub fn oversized(&self) -> &[ShapeHandle] {
        &self.oversized
    }

    /// The underlying storage
    pub fn storage(&self) -> &SparseStorage<PlanGridCell> {
        &self.storage
    }

    /// Queries for the shapes whose interior overlaps `shape`.
    /// If `shape` itself was inserted, it is returned as well.
    pub fn query<'q>(
        &'q self,
        shape: ShapeRef<'q>,
    ) -> impl Iterator<Item = (ShapeHandle, ShapeRef<'a>)> + 'q {
        let candidates: Vec<ShapeHandle> = match self.cells_of(shape) {
            Some(cells) => cells
                .flat_map(|id| self.storage.cell(id))
                .flat_map(|cell| cell.objs.iter().copied())
                .chain(self.oversized.iter().copied())
                .collect(),
            None => self.objects.keys().collect(),
        };
        let mut seen = FnvHashSet::default();

        candidates
            .into_iter()
            .filter(move |h| seen.insert(*h))
            .map(move |h| (h, self.objects[h].shape))
            .filter(move |(_, other)| shape.overlaps(*other))
    }

    /// Every unordered pair of overlapping shapes, each pair reported once,
    /// the earlier inserted shape first.
    pub fn overlapping_pairs(&self) -> Vec<(ShapeRef<'a>, ShapeRef<'a>)> {
        let mut tested = FnvHashSet::default();
        let mut pairs = vec![];

        let mut test = |ha: ShapeHandle, hb: ShapeHandle| {
            let (a, b) = (&self.objects[ha], &self.objects[hb]);
            let (a, b) = if a.rank < b.rank { (a, b) } else { (b, a) };

            if a.rank == b.rank || !tested.insert((a.rank, b.rank)) {
                return;
            }
            if a.shape.overlaps(b.shape) {
                pairs.push(((a.rank, b.rank), a.shape, b.shape));
            }
        };

        for cell in self.storage.cells().values() {
            for (i, &ha) in cell.objs.iter().enumerate() {
                for &hb in &cell.objs[i + 1..] {
                    test(ha, hb);
                }
            }
        }

        for &ha in &self.oversized {
            for hb in self.objects.keys() {
                test(ha, hb);
            }
        }

        pairs.sort_by_key(|(ranks, _, _)| *ranks);
        pairs.into_iter().map(|(_, a, b)| (a, b)).collect()
    }

    /// Returns the number of shapes in the grid
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Checks if the grid contains shapes or not
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Largest finite bounding box side over all shapes, 0 if there is none.
pub(crate) fn largest_extent(rectangles: &[Rectangle], circles: &[Circle]) -> f64 {
    shapes(rectangles, circles)
        .map(|s| {
            let b = s.bbox();
            b.width().max(b.height())
        })
        .filter(|x| x.is_finite())
        .fold(0.0, f64::max)
}
