mod builder;
mod synthetic;

pub use builder::GridBuilder;
pub use synthetic::{SYNTHETIC_NAME, generate as generate_synthetic};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    rows: usize,
    columns: usize,
}

impl GridShape {
    pub fn new(rows: usize, columns: usize) -> anyhow::Result<Self> {
        if rows == 0 || columns == 0 {
            anyhow::bail!("Grid needs at least one row and one column, got {}x{}", rows, columns);
        }

        Ok(Self { rows, columns })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cells(&self) -> usize {
        self.rows * self.columns
    }
}

impl Default for GridShape {
    fn default() -> Self {
        Self { rows: 4, columns: 12 }
    }
}

/// Occupancy of the next few hours, one row per hour and a fixed number of slots per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeGrid {
    name: String,
    date: String,
    occupied_now: bool,
    shape: GridShape,
    rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    label: String,
    cells: Vec<bool>,
}

impl TimeGrid {
    /// `labels` has one entry per row, `cells` is row-major with `shape.cells()` entries.
    fn new(
        name: String,
        date: String,
        occupied_now: bool,
        shape: GridShape,
        labels: Vec<String>,
        cells: Vec<bool>,
    ) -> Self {
        debug_assert_eq!(labels.len(), shape.rows());
        debug_assert_eq!(cells.len(), shape.cells());

        let rows = labels
            .into_iter()
            .zip(cells.chunks(shape.columns()))
            .map(|(label, cells)| Row {
                label,
                cells: cells.to_vec(),
            })
            .collect();

        Self {
            name,
            date,
            occupied_now,
            shape,
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn occupied_now(&self) -> bool {
        self.occupied_now
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

impl Row {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }
}

fn hour_label(hour: u32) -> String {
    format!("{:02}:00", hour)
}
