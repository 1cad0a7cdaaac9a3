// RGBA pixel buffer that particles paint their trails onto.
// The background keeps every segment ever drawn, it is only written to.

use crate::color::Color;
use crate::error::SimError;
use vecmath::Vector2;

/// Anything a particle can leave a trail segment on.
pub trait TrailSurface {
    fn draw_line(&mut self, color: Color, from: Vector2<f64>, to: Vector2<f64>);
}

#[derive(Clone, Debug)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixel_data: Vec<u8>,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32, fill: Color) -> PixelSurface {
        let mut pixel_data = vec![0x00; (width * height * 4) as usize];
        for pixel in pixel_data.chunks_exact_mut(4) {
            pixel.copy_from_slice(&[fill.r, fill.g, fill.b, fill.a]);
        }
        PixelSurface {
            width,
            height,
            pixel_data,
        }
    }

    // Wraps pixels read back from an ImageData, row-major RGBA
    pub fn from_rgba(width: u32, height: u32, pixel_data: Vec<u8>) -> Result<PixelSurface, SimError> {
        if pixel_data.len() != (width * height * 4) as usize {
            return Err(SimError::BufferSize {
                width,
                height,
                actual: pixel_data.len(),
            });
        }
        Ok(PixelSurface {
            width,
            height,
            pixel_data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixel_data
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.get_pixel_index(x, y).map(|idx| Color {
            r: self.pixel_data[idx],
            g: self.pixel_data[idx + 1],
            b: self.pixel_data[idx + 2],
            a: self.pixel_data[idx + 3],
        })
    }

    /// Overwrites this surface with the contents of `other`. Sizes must match.
    pub fn copy_from(&mut self, other: &PixelSurface) {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        self.pixel_data.copy_from_slice(&other.pixel_data);
    }

    fn get_pixel_index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(((y * self.width as i32 + x) * 4) as usize)
        } else {
            None
        }
    }

    // Out of range pixels are dropped, which clips lines and rects to the surface
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.get_pixel_index(x, y) {
            self.pixel_data[idx] = color.r;
            self.pixel_data[idx + 1] = color.g;
            self.pixel_data[idx + 2] = color.b;
            self.pixel_data[idx + 3] = color.a;
        }
    }

    pub fn draw_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        for pixel_y in y..y + height as i32 {
            for pixel_x in x..x + width as i32 {
                self.set_pixel(pixel_x, pixel_y, color);
            }
        }
    }
}

impl TrailSurface for PixelSurface {
    // Bresenham between the rounded endpoints, both ends inclusive
    fn draw_line(&mut self, color: Color, from: Vector2<f64>, to: Vector2<f64>) {
        let (mut x0, mut y0) = (from[0].round() as i32, from[1].round() as i32);
        let (x1, y1) = (to[0].round() as i32, to[1].round() as i32);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let step_x = if x0 < x1 { 1 } else { -1 };
        let step_y = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.set_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += step_x;
            }
            if e2 <= dx {
                err += dx;
                y0 += step_y;
            }
        }
    }
}
