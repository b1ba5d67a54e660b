use std::io;
use std::io::{ BufWriter, Write };
use std::fs::File;
use std::path::Path;
use std::slice::ChunksMut;

use image::{ ImageBuffer, Rgb };
use log::info;

use crate::color::Color;
use crate::error::SceneError;

/// A canvas for drawing pixels.
///
/// The canvas stores the resultant colors for each pixel ray, row-major with
/// the top row first. Once rendering finishes, the `Canvas` can be saved to a
/// PPM or PNG file.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored as a flattened vector.
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a new black canvas with specified width and height.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::black(); width * height]
        }
    }

    /// Saves the canvas, choosing the format from the file extension.
    ///
    /// `.ppm` files are written as plain-text PPM; anything else is handed to
    /// the `image` crate (PNG for `.png`).
    pub fn save(&self, path: &Path) -> Result<(), SceneError> {
        let is_ppm = path.extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("ppm"));

        if is_ppm {
            let io_err = |source: io::Error| SceneError::Io { path: path.to_path_buf(), source };

            let mut out = BufWriter::new(File::create(path).map_err(io_err)?);
            self.write_ppm(&mut out).map_err(io_err)?;
            out.flush().map_err(io_err)?;
        } else {
            self.to_image().save(path)?;
        }

        info!("Saved render to {}.", path.display());
        Ok(())
    }

    /// Writes the canvas as a plain (P3) PPM image.
    ///
    /// Lines in the PPM file are clamped to 70 columns. If some color component
    /// would exceed the 70 column mark on a line, it is moved to the next line.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        // Write PPM header, as well as metadata
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?; // Maximum color value

        // Current line length; a component that would push a line past 70
        // columns starts a new line instead.
        let mut col = 0;
        for pixel in self.pixels.iter() {
            for component in pixel.to_rgb8().iter() {
                let s = component.to_string();

                if col > 0 && col + 1 + s.len() > 70 {
                    writeln!(out)?;
                    col = 0;
                } else if col > 0 {
                    write!(out, " ")?;
                    col += 1;
                }

                write!(out, "{}", s)?;
                col += s.len();
            }
        }

        // Terminate the PPM file with a newline
        writeln!(out)
    }

    /// Converts the canvas to an 8-bit RGB image buffer.
    pub fn to_image(&self) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
        ImageBuffer::from_fn(self.width as u32, self.height as u32, |x, y| {
            Rgb(self.pixels[(y as usize * self.width) + x as usize].to_rgb8())
        })
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// Out-of-bounds pixels are ignored. `y` is the row of the pixel, and `x`
    /// is the column. Rows and columns are zero-indexed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ray_caster::color::Color;
    /// # use ray_caster::canvas::Canvas;
    /// let white = Color::white();
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, &white);
    /// assert_eq!(canvas.read_pixel(4, 2).unwrap(), white);
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: &Color) {
        // Silently ignore out-of-bounds pixels
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = *pixel;
    }

    /// Reads a color from a location on the `Canvas`.
    ///
    /// If the specified pixel location is out-of-bounds, `None` is returned.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None
        }

        Some(self.pixels[(y * self.width) + x])
    }

    /// Splits the canvas into disjoint bands of `rows_per_band` rows each.
    ///
    /// Each band is a mutable slice of `width * rows` pixels; bands can be
    /// handed to separate threads.
    pub fn rows_mut(&mut self, rows_per_band: usize) -> ChunksMut<'_, Color> {
        let chunk = (rows_per_band * self.width).max(1);
        self.pixels.chunks_mut(chunk)
    }
}

/* Tests */

#[test]
fn out_of_bounds_is_ignored() {
    let mut c = Canvas::new(2, 2);
    c.write_pixel(2, 0, &Color::white());

    assert_eq!(c.read_pixel(2, 0), None);
    assert_eq!(c, Canvas::new(2, 2));
}

#[test]
fn ppm_header_and_pixels() {
    let mut c = Canvas::new(3, 2);
    c.write_pixel(0, 0, &Color::white());
    c.write_pixel(2, 1, &Color::rgb(0.5, 0.0, 1.0));

    let mut out = Vec::new();
    c.write_ppm(&mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text,
        "P3\n3 2\n255\n255 255 255 0 0 0 0 0 0 0 0 0 0 0 0 128 0 255\n");
}

#[test]
fn ppm_lines_do_not_exceed_70_columns() {
    let mut c = Canvas::new(10, 2);
    for y in 0..2 {
        for x in 0..10 {
            c.write_pixel(x, y, &Color::rgb(1.0, 0.8, 0.6));
        }
    }

    let mut out = Vec::new();
    c.write_ppm(&mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.lines().all(|l| l.len() <= 70));
    assert!(text.ends_with('\n'));
}

#[test]
fn rows_mut_splits_into_bands() {
    let mut c = Canvas::new(4, 5);
    let lens: Vec<usize> = c.rows_mut(2).map(|band| band.len()).collect();

    assert_eq!(lens, vec![8, 8, 4]);
}

#[test]
fn image_matches_canvas() {
    let mut c = Canvas::new(2, 1);
    c.write_pixel(1, 0, &Color::white());

    let img = c.to_image();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 0]));
    assert_eq!(img.get_pixel(1, 0), &Rgb([255, 255, 255]));
}
