//! Declarative grid layout for tab views.
//!
//! Each kind describes where its widgets go as a list of cells
//! (`{widget, row, col, row_span, col_span}`) plus optional row and column
//! stretch factors. [`LayoutDescriptor::plan`] is the kind-agnostic layout
//! builder: it validates the descriptor against the widgets that exist and
//! produces a [`GridPlan`] the frontend can walk slot by slot.

use std::collections::HashSet;

/// Largest number of rows or columns a grid may span
pub const MAX_GRID_EXTENT: usize = 256;

/// Placement of one widget in the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutCell {
    pub widget: &'static str,
    pub row: usize,
    pub col: usize,
    pub row_span: usize,
    pub col_span: usize,
}

impl LayoutCell {
    fn out_of_range(&self) -> LayoutError {
        LayoutError::OutOfRange {
            widget: self.widget,
            row: self.row,
            col: self.col,
            max: MAX_GRID_EXTENT,
        }
    }
}

/// Problems found while turning a descriptor into a grid plan
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("widget '{0}' is placed with a zero span")]
    EmptySpan(&'static str),
    #[error("widget '{0}' is placed more than once")]
    DuplicatePlacement(&'static str),
    #[error("layout references unknown widget '{0}'")]
    UnknownWidget(&'static str),
    #[error("widget '{widget}' at row {row}, column {col} lies outside the {max}x{max} grid")]
    OutOfRange {
        widget: &'static str,
        row: usize,
        col: usize,
        max: usize,
    },
    #[error("widgets '{first}' and '{second}' overlap at row {row}, column {col}")]
    Overlap {
        first: &'static str,
        second: &'static str,
        row: usize,
        col: usize,
    },
}

/// Declarative description of a tab's grid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutDescriptor {
    cells: Vec<LayoutCell>,
    column_stretch: Vec<u32>,
    row_stretch: Vec<u32>,
}

impl LayoutDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a widget in a single grid slot
    pub fn place(self, widget: &'static str, row: usize, col: usize) -> Self {
        self.place_span(widget, row, col, 1, 1)
    }

    /// Place a widget spanning several rows and/or columns
    pub fn place_span(
        mut self,
        widget: &'static str,
        row: usize,
        col: usize,
        row_span: usize,
        col_span: usize,
    ) -> Self {
        self.cells.push(LayoutCell {
            widget,
            row,
            col,
            row_span,
            col_span,
        });
        self
    }

    pub fn with_column_stretch(mut self, stretch: impl Into<Vec<u32>>) -> Self {
        self.column_stretch = stretch.into();
        self
    }

    pub fn with_row_stretch(mut self, stretch: impl Into<Vec<u32>>) -> Self {
        self.row_stretch = stretch.into();
        self
    }

    pub fn cells(&self) -> &[LayoutCell] {
        &self.cells
    }

    pub fn column_stretch(&self) -> &[u32] {
        &self.column_stretch
    }

    pub fn row_stretch(&self) -> &[u32] {
        &self.row_stretch
    }

    /// Fraction of the spare width each of `cols` columns takes
    pub fn column_shares(&self, cols: usize) -> Vec<f32> {
        stretch_shares(&self.column_stretch, cols)
    }

    /// Fraction of the spare height each of `rows` rows takes
    pub fn row_shares(&self, rows: usize) -> Vec<f32> {
        stretch_shares(&self.row_stretch, rows)
    }

    /// Validate the descriptor against `widgets` (the keys that exist) and
    /// compute slot occupancy.
    pub fn plan(&self, widgets: &[&'static str]) -> Result<GridPlan, LayoutError> {
        let known: HashSet<&str> = widgets.iter().copied().collect();
        let mut placed: HashSet<&str> = HashSet::new();

        let mut rows = 0;
        let mut cols = 0;
        for cell in &self.cells {
            if cell.row_span == 0 || cell.col_span == 0 {
                return Err(LayoutError::EmptySpan(cell.widget));
            }
            if !known.contains(cell.widget) {
                return Err(LayoutError::UnknownWidget(cell.widget));
            }
            if !placed.insert(cell.widget) {
                return Err(LayoutError::DuplicatePlacement(cell.widget));
            }
            let (Some(row_end), Some(col_end)) = (
                cell.row.checked_add(cell.row_span),
                cell.col.checked_add(cell.col_span),
            ) else {
                return Err(cell.out_of_range());
            };
            if row_end > MAX_GRID_EXTENT || col_end > MAX_GRID_EXTENT {
                return Err(cell.out_of_range());
            }
            rows = rows.max(row_end);
            cols = cols.max(col_end);
        }

        let mut slots = vec![vec![Slot::Empty; cols]; rows];
        for (index, cell) in self.cells.iter().enumerate() {
            for row in cell.row..cell.row + cell.row_span {
                for col in cell.col..cell.col + cell.col_span {
                    let occupant = match slots[row][col] {
                        Slot::Empty => None,
                        Slot::Anchor(other) | Slot::Covered(other) => Some(other),
                    };
                    if let Some(other) = occupant {
                        return Err(LayoutError::Overlap {
                            first: self.cells[other].widget,
                            second: cell.widget,
                            row,
                            col,
                        });
                    }
                    slots[row][col] = if row == cell.row && col == cell.col {
                        Slot::Anchor(index)
                    } else {
                        Slot::Covered(index)
                    };
                }
            }
        }

        Ok(GridPlan { rows, cols, slots })
    }
}

/// What occupies one grid slot. Indices refer to [`LayoutDescriptor::cells`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Empty,
    /// Top-left slot of a cell; the widget is drawn here
    Anchor(usize),
    /// Slot covered by a cell's span
    Covered(usize),
}

/// Validated slot occupancy of a layout
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridPlan {
    rows: usize,
    cols: usize,
    slots: Vec<Vec<Slot>>,
}

impl GridPlan {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn slot(&self, row: usize, col: usize) -> Slot {
        self.slots
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(Slot::Empty)
    }
}

/// Normalize stretch factors over `count` tracks. Tracks past the end of
/// `stretch` get factor 0; with no positive factor every track shares equally.
fn stretch_shares(stretch: &[u32], count: usize) -> Vec<f32> {
    let factors: Vec<u32> = (0..count)
        .map(|i| stretch.get(i).copied().unwrap_or(0))
        .collect();
    let total: u64 = factors.iter().map(|&f| u64::from(f)).sum();
    if total == 0 {
        return vec![1.0 / count.max(1) as f32; count];
    }
    factors
        .into_iter()
        .map(|f| (f64::from(f) / total as f64) as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_marks_anchor_and_covered_slots() {
        let layout = LayoutDescriptor::new()
            .place("title", 0, 0)
            .place_span("combo", 1, 0, 1, 2)
            .place("ok", 2, 1);
        let plan = layout.plan(&["title", "combo", "ok"]).unwrap();

        assert_eq!((plan.rows(), plan.cols()), (3, 2));
        assert_eq!(plan.slot(0, 0), Slot::Anchor(0));
        assert_eq!(plan.slot(0, 1), Slot::Empty);
        assert_eq!(plan.slot(1, 0), Slot::Anchor(1));
        assert_eq!(plan.slot(1, 1), Slot::Covered(1));
        assert_eq!(plan.slot(2, 1), Slot::Anchor(2));
        assert_eq!(plan.slot(9, 9), Slot::Empty);
    }

    #[test]
    fn overlapping_cells_are_rejected() {
        let layout = LayoutDescriptor::new()
            .place_span("wide", 0, 0, 1, 3)
            .place("inner", 0, 2);
        assert_eq!(
            layout.plan(&["wide", "inner"]),
            Err(LayoutError::Overlap {
                first: "wide",
                second: "inner",
                row: 0,
                col: 2,
            })
        );
    }

    #[test]
    fn unknown_duplicate_and_empty_cells_are_rejected() {
        let unknown = LayoutDescriptor::new().place("ghost", 0, 0);
        assert_eq!(unknown.plan(&[]), Err(LayoutError::UnknownWidget("ghost")));

        let duplicate = LayoutDescriptor::new().place("a", 0, 0).place("a", 1, 0);
        assert_eq!(
            duplicate.plan(&["a"]),
            Err(LayoutError::DuplicatePlacement("a"))
        );

        let empty = LayoutDescriptor::new().place_span("a", 0, 0, 0, 1);
        assert_eq!(empty.plan(&["a"]), Err(LayoutError::EmptySpan("a")));
    }

    #[test]
    fn cells_past_the_grid_limit_are_rejected() {
        let overflow = LayoutDescriptor::new().place("a", usize::MAX, 0);
        assert!(matches!(
            overflow.plan(&["a"]),
            Err(LayoutError::OutOfRange { widget: "a", .. })
        ));

        let wide = LayoutDescriptor::new().place_span("a", 0, 1, 1, MAX_GRID_EXTENT);
        assert!(matches!(
            wide.plan(&["a"]),
            Err(LayoutError::OutOfRange { .. })
        ));

        let edge = LayoutDescriptor::new().place("a", MAX_GRID_EXTENT - 1, 0);
        assert_eq!(edge.plan(&["a"]).map(|p| p.rows()), Ok(MAX_GRID_EXTENT));
    }

    #[test]
    fn stretch_becomes_shares_of_spare_space() {
        let layout = LayoutDescriptor::new()
            .with_column_stretch([5u32, 1, 1, 1, 1, 1, 1])
            .with_row_stretch([1u32, 1, 10]);

        let cols = layout.column_shares(7);
        assert!((cols[0] - 5.0 / 11.0).abs() < 1e-6);
        assert!((cols[6] - 1.0 / 11.0).abs() < 1e-6);
        assert!((cols.iter().sum::<f32>() - 1.0).abs() < 1e-5);

        // A fourth row with no factor gets nothing extra
        let rows = layout.row_shares(4);
        assert!((rows[2] - 10.0 / 12.0).abs() < 1e-6);
        assert_eq!(rows[3], 0.0);

        // Factors for tracks the grid does not have are ignored
        let two = layout.column_shares(2);
        assert_eq!(two.len(), 2);
        assert!((two[0] - 5.0 / 6.0).abs() < 1e-6);
    }

    #[test]
    fn missing_stretch_splits_evenly() {
        let layout = LayoutDescriptor::new().with_row_stretch([0u32, 0]);
        assert_eq!(layout.column_shares(4), vec![0.25; 4]);
        assert_eq!(layout.row_shares(2), vec![0.5, 0.5]);
        assert!(layout.row_shares(0).is_empty());
    }

    #[test]
    fn empty_layout_plans_to_empty_grid() {
        let plan = LayoutDescriptor::new().plan(&[]).unwrap();
        assert_eq!((plan.rows(), plan.cols()), (0, 0));
    }
}
