use std::convert::Infallible;

use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle, RoundedRectangle},
};

/// In-memory RGB framebuffer. Pixels outside the canvas are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    size: Size,
    pixels: Vec<Rgb888>,
}

impl Canvas {
    pub fn new(size: Size, background: Rgb888) -> Self {
        Self {
            size,
            pixels: vec![background; (size.width * size.height) as usize],
        }
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        if x < self.size.width && y < self.size.height {
            Some(self.pixels[(y * self.size.width + x) as usize])
        } else {
            None
        }
    }

    pub fn to_png(&self) -> Result<Vec<u8>, png::EncodingError> {
        let data: Vec<u8> = self.pixels.iter().flat_map(|c| [c.r(), c.g(), c.b()]).collect();

        let mut out = Vec::new();
        let mut encoder = png::Encoder::new(&mut out, self.size.width, self.size.height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&data)?;
        writer.finish()?;

        Ok(out)
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                let (x, y) = (point.x as u32, point.y as u32);
                if x < self.size.width && y < self.size.height {
                    self.pixels[(y * self.size.width + x) as usize] = color;
                }
            }
        }

        Ok(())
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        self.size
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Shape {
    Line(Line),
    Rectangle(Rectangle),
    Rounded(RoundedRectangle),
}

/// Shapes sharing one style, painted together by [`PaintBatch::paint`].
#[derive(Debug, Clone)]
pub struct PaintBatch {
    style: PrimitiveStyle<Rgb888>,
    shapes: Vec<Shape>,
}

impl PaintBatch {
    pub fn new(style: PrimitiveStyle<Rgb888>) -> Self {
        Self { style, shapes: vec![] }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn paint<D>(self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        for shape in self.shapes {
            match shape {
                Shape::Line(line) => line.into_styled(self.style).draw(target)?,
                Shape::Rectangle(rect) => rect.into_styled(self.style).draw(target)?,
                Shape::Rounded(rect) => rect.into_styled(self.style).draw(target)?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_pixels_are_dropped() {
        let mut canvas = Canvas::new(Size::new(4, 4), Rgb888::WHITE);

        Rectangle::new(Point::new(-2, -2), Size::new(4, 4))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::BLACK))
            .draw(&mut canvas)
            .unwrap();

        assert_eq!(canvas.pixel(0, 0), Some(Rgb888::BLACK));
        assert_eq!(canvas.pixel(1, 1), Some(Rgb888::BLACK));
        assert_eq!(canvas.pixel(2, 2), Some(Rgb888::WHITE));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn test_batch_uses_its_style() {
        let mut canvas = Canvas::new(Size::new(10, 10), Rgb888::WHITE);
        let mut batch = PaintBatch::new(PrimitiveStyle::with_fill(Rgb888::RED));
        batch.push(Shape::Rectangle(Rectangle::new(Point::new(0, 0), Size::new(2, 2))));
        batch.push(Shape::Rectangle(Rectangle::new(Point::new(5, 5), Size::new(2, 2))));

        batch.paint(&mut canvas).unwrap();

        assert_eq!(canvas.pixel(1, 1), Some(Rgb888::RED));
        assert_eq!(canvas.pixel(6, 6), Some(Rgb888::RED));
        assert_eq!(canvas.pixel(3, 3), Some(Rgb888::WHITE));
    }

    #[test]
    fn test_png_header() {
        let png = Canvas::new(Size::new(3, 2), Rgb888::WHITE).to_png().unwrap();

        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
