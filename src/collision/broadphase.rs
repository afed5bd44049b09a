use crate::{
    config::{SimulationConfig, MAX_GRID_SLOTS},
    error::{ConfigError, Result},
};

/// Cells visited by a neighborhood query.
const NEIGHBOR_SPAN: usize = 9;

/// Bookkeeping for one bucket of the grid.
///
/// The bucket's ids live in the grid's shared slab; they are only meaningful
/// while `generation` matches the grid's current generation.
#[derive(Debug, Clone, Copy, Default)]
struct GridCell {
    generation: u64,
    len: usize,
}

/// Uniform grid spatial partitioning used by the broad phase.
///
/// Every cell owns a fixed number of slots. Inserting into a full cell drops
/// the id, so in dense clusters some particles are invisible to collision
/// resolution for that frame. Clearing bumps a generation counter and stale
/// buckets are reset the first time they are touched.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    columns: usize,
    rows: usize,
    capacity: usize,
    cells: Vec<GridCell>,
    slots: Vec<usize>,
    generation: u64,
}

impl SpatialGrid {
    pub fn new(cell_size: f32, world_width: f32, world_height: f32, capacity: usize) -> Result<Self> {
        let (columns, rows) = Self::layout(cell_size, world_width, world_height, capacity)?;
        let cell_count = columns * rows;

        Ok(Self {
            cell_size,
            columns,
            rows,
            capacity,
            cells: vec![GridCell::default(); cell_count],
            slots: vec![0; cell_count * capacity],
            generation: 1,
        })
    }

    /// Checks the grid parameters and returns the `(columns, rows)` they
    /// produce. Fails when the slab would exceed [`MAX_GRID_SLOTS`].
    pub fn layout(
        cell_size: f32,
        world_width: f32,
        world_height: f32,
        capacity: usize,
    ) -> Result<(usize, usize)> {
        for (field, value) in [
            ("cell_size", cell_size),
            ("world_width", world_width),
            ("world_height", world_height),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if capacity == 0 {
            return Err(ConfigError::ZeroCount {
                field: "cell_capacity",
            });
        }

        // Float to int casts saturate, so an infinite ratio shows up as usize::MAX.
        let columns = (world_width / cell_size).ceil() as usize;
        let rows = (world_height / cell_size).ceil() as usize;
        let slots = columns
            .checked_mul(rows)
            .and_then(|cells| cells.checked_mul(capacity));

        match slots {
            Some(slots) if slots <= MAX_GRID_SLOTS => Ok((columns, rows)),
            _ => Err(ConfigError::GridTooLarge {
                width: world_width,
                height: world_height,
                cell_size,
                capacity,
                limit: MAX_GRID_SLOTS,
            }),
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        Self::new(
            config.cell_size,
            config.world_width,
            config.world_height,
            config.cell_capacity,
        )
    }

    /// Grid extent as `(columns, rows)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn cell_capacity(&self) -> usize {
        self.capacity
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cell containing `(x, y)`, clamped into the grid extent.
    fn world_to_grid(&self, x: f32, y: f32) -> (i64, i64) {
        let cx = (x / self.cell_size).floor() as i64;
        let cy = (y / self.cell_size).floor() as i64;
        (
            cx.clamp(0, self.columns as i64 - 1),
            cy.clamp(0, self.rows as i64 - 1),
        )
    }

    fn cell_index(&self, cx: i64, cy: i64) -> Option<usize> {
        if cx < 0 || cy < 0 || cx >= self.columns as i64 || cy >= self.rows as i64 {
            return None;
        }
        Some(cy as usize * self.columns + cx as usize)
    }

    fn bucket(&self, cx: i64, cy: i64) -> &[usize] {
        let Some(index) = self.cell_index(cx, cy) else {
            return &[];
        };
        let cell = &self.cells[index];
        if cell.generation != self.generation {
            return &[];
        }
        let base = index * self.capacity;
        &self.slots[base..base + cell.len]
    }

    /// Invalidates every bucket in O(1).
    pub fn clear(&mut self) {
        self.generation += 1;
    }

    /// Stores `id` in the cell containing `(x, y)`. Returns `false` when the
    /// cell was already full and the id was dropped.
    pub fn insert(&mut self, id: usize, x: f32, y: f32) -> bool {
        let (cx, cy) = self.world_to_grid(x, y);
        let index = cy as usize * self.columns + cx as usize;
        let generation = self.generation;
        let cell = &mut self.cells[index];

        if cell.generation != generation {
            cell.generation = generation;
            cell.len = 0;
        }
        if cell.len >= self.capacity {
            return false;
        }

        self.slots[index * self.capacity + cell.len] = id;
        cell.len += 1;
        true
    }

    /// Number of live ids in the cell containing `(x, y)`.
    pub fn len_at(&self, x: f32, y: f32) -> usize {
        let (cx, cy) = self.world_to_grid(x, y);
        self.bucket(cx, cy).len()
    }

    /// Lazily enumerates the ids stored in the 3x3 block around `(x, y)`.
    pub fn neighbors(&self, x: f32, y: f32) -> NeighborIter<'_> {
        let empty: &[usize] = &[];
        NeighborIter {
            grid: self,
            center: self.world_to_grid(x, y),
            next_offset: 0,
            current: empty.iter(),
        }
    }

    /// Calls `visit` for every id in the 3x3 block around `(x, y)`, in the
    /// same order as [`SpatialGrid::neighbors`].
    pub fn query_neighbors<F>(&self, x: f32, y: f32, mut visit: F)
    where
        F: FnMut(usize),
    {
        for id in self.neighbors(x, y) {
            visit(id);
        }
    }
}

/// Iterator over a 3x3 cell neighborhood.
///
/// Cells are scanned with the X offset in the outer loop and the Y offset in
/// the inner loop, each from -1 to +1; ids within a cell come out in insertion
/// order. Offsets that fall outside the grid are skipped.
#[derive(Debug, Clone)]
pub struct NeighborIter<'a> {
    grid: &'a SpatialGrid,
    center: (i64, i64),
    next_offset: usize,
    current: std::slice::Iter<'a, usize>,
}

impl Iterator for NeighborIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if let Some(&id) = self.current.next() {
                return Some(id);
            }
            if self.next_offset >= NEIGHBOR_SPAN {
                return None;
            }
            let dx = (self.next_offset / 3) as i64 - 1;
            let dy = (self.next_offset % 3) as i64 - 1;
            self.next_offset += 1;
            self.current = self
                .grid
                .bucket(self.center.0 + dx, self.center.1 + dy)
                .iter();
        }
    }
}
