use crate::color::Color;

const MAX_PIXEL_VALUE: u8 = 255;
const MAX_LINE_LEN: usize = 70;

/// A grid of unclamped colors, stored row-major in a single buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pub width: usize,
    pub height: usize,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Every pixel starts out black.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::black(); width * height],
        }
    }

    /// Panics if x or y are outside the canvas.
    pub fn pixel_at(&self, x: usize, y: usize) -> Color {
        self.pixels[self.offset(x, y)]
    }

    /// Panics if x or y are outside the canvas.
    pub fn write_pixel(&mut self, x: usize, y: usize, color: Color) {
        let offset = self.offset(x, y);
        self.pixels[offset] = color;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.pixels.chunks(self.width.max(1))
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) is off the canvas");
        y * self.width + x
    }

    /// Serializes to plain PPM (P3). Channels are clamped to 0-255
    /// and no line is longer than 70 characters.
    pub fn to_ppm(&self) -> String {
        let mut ppm = format!("P3\n{} {}\n{}\n", self.width, self.height, MAX_PIXEL_VALUE);

        for row in self.rows() {
            let mut line = String::new();
            for value in row.iter().flat_map(Color::to_rgb) {
                let token = value.to_string();
                if !line.is_empty() {
                    if line.len() + 1 + token.len() > MAX_LINE_LEN {
                        ppm.push_str(&line);
                        ppm.push('\n');
                        line.clear();
                    } else {
                        line.push(' ');
                    }
                }
                line.push_str(&token);
            }
            ppm.push_str(&line);
            ppm.push('\n');
        }

        ppm
    }
}
