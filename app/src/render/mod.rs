mod canvas;
mod fonts;
mod layout;

use anyhow::Context as _;
use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Line, PrimitiveStyle, PrimitiveStyleBuilder, RoundedRectangle, StrokeAlignment},
    text::{Baseline, Text},
};

use crate::grid::TimeGrid;

pub use canvas::Canvas;
use canvas::{PaintBatch, Shape};
pub use fonts::{FontConfig, FontFace, Fonts};
pub use layout::{Layout, Palette};
use layout::TICK_LABELS;

/// Draws a [`TimeGrid`] onto a fixed-size board. Holds only immutable configuration and
/// can be shared freely between requests.
#[derive(Debug, Clone)]
pub struct Renderer {
    layout: Layout,
    palette: Palette,
    fonts: Fonts,
}

impl Renderer {
    pub fn new(layout: Layout, palette: Palette, fonts: Fonts) -> Self {
        Self {
            layout,
            palette,
            fonts,
        }
    }

    pub fn content_type(&self) -> mime::Mime {
        mime::IMAGE_PNG
    }

    pub fn render(&self, grid: &TimeGrid) -> anyhow::Result<Vec<u8>> {
        let mut canvas = Canvas::new(self.layout.size(), self.palette.background);
        self.draw(grid, &mut canvas)?;

        canvas.to_png().context("Error encoding board image")
    }

    pub fn draw<D>(&self, grid: &TimeGrid, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        self.draw_frame(target)?;
        self.text(grid.name(), self.layout.name_at, self.fonts.bold, target)?;
        self.text(grid.date(), self.layout.date_at, self.fonts.regular, target)?;

        if grid.occupied_now() {
            let mut banner = PaintBatch::new(PrimitiveStyle::with_fill(self.palette.alert));
            banner.push(Shape::Rectangle(self.layout.banner(grid.rows().len())));
            banner.paint(target)?;
        }

        self.draw_grid_lines(grid.rows().len(), target)?;

        for (i, row) in grid.rows().iter().enumerate() {
            self.text(row.label(), self.layout.row_label_at(i), self.fonts.bold, target)?;
        }

        for (i, tick) in TICK_LABELS.iter().enumerate() {
            self.text(tick, self.layout.tick_at(i), self.fonts.regular, target)?;
        }

        self.draw_cells(grid, target)
    }

    fn draw_frame<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let style = PrimitiveStyleBuilder::new()
            .fill_color(self.palette.background)
            .stroke_color(self.palette.foreground)
            .stroke_width(self.layout.frame_width)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();

        let mut frame = PaintBatch::new(style);
        frame.push(Shape::Rectangle(target.bounding_box()));
        frame.paint(target)
    }

    fn draw_grid_lines<D>(&self, rows: usize, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let layout = &self.layout;
        let (top, bottom) = (layout.grid_top, layout.grid_bottom(rows));
        let (left, right) = (layout.grid_left, layout.grid_right() + 2);

        let mut lines = PaintBatch::new(PrimitiveStyle::with_stroke(
            self.palette.foreground,
            layout.line_width,
        ));

        for x in layout.vertical_lines() {
            lines.push(Shape::Line(Line::new(Point::new(x, top), Point::new(x, bottom))));
        }

        for i in 0..=rows {
            let y = layout.row_line(i);
            lines.push(Shape::Line(Line::new(Point::new(left, y), Point::new(right, y))));
        }

        lines.paint(target)
    }

    fn draw_cells<D>(&self, grid: &TimeGrid, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let columns = grid.shape().columns();
        let corner = Size::new(self.layout.corner_radius, self.layout.corner_radius);
        let mut cells = PaintBatch::new(PrimitiveStyle::with_fill(self.palette.foreground));

        for (i, row) in grid.rows().iter().enumerate() {
            for (j, _) in row.cells().iter().enumerate().filter(|(_, occupied)| **occupied) {
                let bounds = self.layout.cell_bounds(i, j, columns);
                cells.push(Shape::Rounded(RoundedRectangle::with_equal_corners(bounds, corner)));
            }
        }

        if cells.is_empty() {
            return Ok(());
        }

        cells.paint(target)
    }

    fn text<D>(&self, text: &str, at: Point, face: FontFace, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let style = MonoTextStyle::new(face.font(), self.palette.foreground);
        Text::with_baseline(text, at, style, Baseline::Alphabetic).draw(target)?;

        Ok(())
    }
}
