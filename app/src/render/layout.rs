use embedded_graphics::{pixelcolor::Rgb888, prelude::*, primitives::Rectangle};

/// Pixel geometry of the board. All positions are fixed, text is anchored at its baseline
/// and never measured.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub frame_width: u32,
    pub name_at: Point,
    pub date_at: Point,
    pub grid_left: i32,
    pub grid_right_margin: i32,
    pub grid_top: i32,
    pub row_height: i32,
    pub divider: i32,
    pub line_width: u32,
    pub label_inset: i32,
    pub label_raise: i32,
    pub tick_raise: i32,
    pub cell_inset: i32,
    pub corner_radius: u32,
    pub banner_gap: i32,
    pub banner_height: i32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 640,
            height: 384,
            frame_width: 2,
            name_at: Point::new(85, 70),
            date_at: Point::new(425, 60),
            grid_left: 85,
            grid_right_margin: 85,
            grid_top: 100,
            row_height: 50,
            divider: 150,
            line_width: 2,
            label_inset: 5,
            label_raise: 17,
            tick_raise: 4,
            cell_inset: 4,
            corner_radius: 5,
            banner_gap: 25,
            banner_height: 25,
        }
    }
}

pub const TICK_LABELS: [&str; 4] = [":00", ":15", ":30", ":45"];

impl Layout {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn grid_right(&self) -> i32 {
        self.width as i32 - self.grid_right_margin
    }

    pub fn grid_bottom(&self, rows: usize) -> i32 {
        self.row_line(rows)
    }

    pub fn row_line(&self, row: usize) -> i32 {
        self.grid_top + self.row_height * row as i32
    }

    /// Vertical boundaries, the outer right one sits just past the last cell column
    pub fn vertical_lines(&self) -> [i32; 3] {
        [self.grid_left, self.divider - 2, self.grid_right() + 2]
    }

    pub fn row_label_at(&self, row: usize) -> Point {
        Point::new(
            self.grid_left + self.label_inset,
            self.row_line(row + 1) - self.label_raise,
        )
    }

    /// Tick labels divide the cell area in four regardless of the column count
    pub fn tick_at(&self, tick: usize) -> Point {
        let width = (self.grid_right() - self.divider) as f64 / TICK_LABELS.len() as f64;
        Point::new(
            (self.divider as f64 + width * tick as f64).round() as i32,
            self.grid_top - self.tick_raise,
        )
    }

    /// Area of the filled marker for cell (`row`, `column`), already inset
    pub fn cell_bounds(&self, row: usize, column: usize, columns: usize) -> Rectangle {
        let width = (self.grid_right() - self.divider) as f64 / columns.max(1) as f64;
        let left = (self.divider as f64 + width * column as f64).round() as i32 + self.cell_inset;
        let right = (self.divider as f64 + width * (column + 1) as f64).round() as i32 - self.cell_inset;
        let top = self.row_line(row) + self.cell_inset;
        let bottom = self.row_line(row + 1) - self.cell_inset;

        Rectangle::new(
            Point::new(left, top),
            Size::new((right - left).max(0) as u32, (bottom - top).max(0) as u32),
        )
    }

    pub fn banner(&self, rows: usize) -> Rectangle {
        let top = self.grid_bottom(rows) + self.banner_gap;
        let right = self.grid_right() + 2;

        Rectangle::new(
            Point::new(self.grid_left, top),
            Size::new(
                (right - self.grid_left).max(0) as u32,
                self.banner_height.max(0) as u32,
            ),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb888,
    pub foreground: Rgb888,
    pub alert: Rgb888,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb888::WHITE,
            foreground: Rgb888::BLACK,
            alert: Rgb888::RED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_borders() {
        let layout = Layout::default();

        assert_eq!(layout.grid_right(), 555);
        assert_eq!(layout.grid_bottom(4), 300);
        assert_eq!(layout.vertical_lines(), [85, 148, 557]);
    }

    #[test]
    fn test_cell_bounds_are_inset() {
        let layout = Layout::default();

        let first = layout.cell_bounds(0, 0, 12);
        assert_eq!(first.top_left, Point::new(154, 104));
        assert_eq!(first.size, Size::new(26, 42));

        let last = layout.cell_bounds(3, 11, 12);
        assert_eq!(last.top_left, Point::new(525, 254));
        assert_eq!(last.top_left.x + last.size.width as i32, 551);
    }

    #[test]
    fn test_cells_shrink_with_more_columns() {
        let layout = Layout::default();

        assert!(layout.cell_bounds(0, 0, 24).size.width < layout.cell_bounds(0, 0, 12).size.width);
        assert_eq!(layout.cell_bounds(0, 0, 500).size.width, 0);
    }

    #[test]
    fn test_ticks_ignore_column_count() {
        let layout = Layout::default();

        let xs: Vec<i32> = (0..TICK_LABELS.len()).map(|i| layout.tick_at(i).x).collect();
        assert_eq!(xs, vec![150, 251, 353, 454]);
        assert_eq!(layout.tick_at(0).y, 96);
    }

    #[test]
    fn test_labels_and_banner() {
        let layout = Layout::default();

        assert_eq!(layout.row_label_at(0), Point::new(90, 133));
        assert_eq!(
            layout.banner(4),
            Rectangle::new(Point::new(85, 325), Size::new(472, 25))
        );
    }
}
