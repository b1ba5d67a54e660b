use serde::{ Serialize, Deserialize };

use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::color::Color;
use crate::consts::{ HIT_COLOR, MISS_COLOR };
use crate::geometry::Intersectable;

/// The colors used for hit and miss pixels.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub hit: Color,
    pub miss: Color,
}

impl Default for Palette {
    fn default() -> Palette {
        Palette { hit: HIT_COLOR, miss: MISS_COLOR }
    }
}

impl Palette {
    pub fn shade(&self, hit: Option<f64>) -> Color {
        match hit {
            Some(_) => self.hit,
            None => self.miss,
        }
    }
}

/// Maps pixel `(i, j)` to normalized viewport coordinates.
///
/// `i` is the column and `j` the row, with row 0 at the top of the image.
/// The viewport has `(0, 0)` at the bottom-left, so `y` is flipped. The first
/// and last pixel of each axis land exactly on the viewport edges; an axis
/// with a single pixel maps it to the center.
///
/// ```
/// # use ray_caster::render::pixel_to_viewport;
/// assert_eq!(pixel_to_viewport(0, 0, 5, 3), (0.0, 1.0));
/// assert_eq!(pixel_to_viewport(4, 2, 5, 3), (1.0, 0.0));
/// assert_eq!(pixel_to_viewport(2, 1, 5, 3), (0.5, 0.5));
/// ```
pub fn pixel_to_viewport(i: usize, j: usize, width: usize, height: usize)
    -> (f64, f64) {
    (normalize_index(i, width), 1.0 - normalize_index(j, height))
}

fn normalize_index(index: usize, size: usize) -> f64 {
    if size <= 1 {
        0.5
    } else {
        index as f64 / (size - 1) as f64
    }
}

/// Casts the ray for pixel `(i, j)` and returns the hit distance, if any.
pub fn trace_pixel<S>(camera: &Camera, shape: &S, i: usize, j: usize,
    width: usize, height: usize) -> Option<f64>
    where S: Intersectable + ?Sized {
    let (x, y) = pixel_to_viewport(i, j, width, height);
    shape.intersect(&camera.get_ray(x, y))
}

/// Classifies every pixel as hit (`true`) or miss, row-major from the top.
pub fn hit_mask<S>(camera: &Camera, shape: &S, width: usize, height: usize)
    -> Vec<bool>
    where S: Intersectable + ?Sized {
    let mut mask = Vec::with_capacity(width * height);

    for j in 0..height {
        for i in 0..width {
            mask.push(trace_pixel(camera, shape, i, j, width, height).is_some());
        }
    }

    mask
}

/// Shades a band of consecutive rows starting at `first_row`.
///
/// `band` holds whole rows of `width` pixels each, as produced by
/// `Canvas::rows_mut`.
pub fn render_band<S>(camera: &Camera, shape: &S, palette: &Palette,
    width: usize, height: usize, first_row: usize, band: &mut [Color])
    where S: Intersectable + ?Sized {
    for (offset, pixel) in band.iter_mut().enumerate() {
        let i = offset % width;
        let j = first_row + offset / width;

        *pixel = palette.shade(trace_pixel(camera, shape, i, j, width, height));
    }
}

/// Renders the whole image on the calling thread.
pub fn render<S>(camera: &Camera, shape: &S, palette: &Palette,
    width: usize, height: usize) -> Canvas
    where S: Intersectable + ?Sized {
    let mut image = Canvas::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let hit = trace_pixel(camera, shape, x, y, width, height);
            image.write_pixel(x, y, &palette.shade(hit));
        }
    }

    image
}

/* Tests */

#[cfg(test)]
use crate::{ geometry::Sphere, tuple::Vec3 };

#[cfg(test)]
fn test_scene(fov: f64, width: u32, height: u32) -> (Camera, Sphere) {
    let camera = Camera::new(
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(0.0, 1.0, 0.0),
        fov, width, height
    ).unwrap();
    let sphere = Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0).unwrap();

    (camera, sphere)
}

#[test]
fn single_pixel_axis_maps_to_center() {
    assert_eq!(pixel_to_viewport(0, 0, 1, 1), (0.5, 0.5));
    assert_eq!(pixel_to_viewport(3, 0, 4, 1), (1.0, 0.5));
}

#[test]
fn center_pixel_hits_and_corners_miss() {
    let (camera, sphere) = test_scene(90.0, 5, 3);
    let mask = hit_mask(&camera, &sphere, 5, 3);

    // Only the exact center ray falls within the sphere's silhouette.
    let expected = vec![
        false, false, false, false, false,
        false, false, true,  false, false,
        false, false, false, false, false,
    ];
    assert_eq!(mask, expected);
}

#[test]
fn render_uses_palette() {
    let (camera, sphere) = test_scene(90.0, 5, 3);
    let palette = Palette {
        hit: Color::rgb(1.0, 0.0, 0.0),
        miss: Color::rgb(0.0, 0.0, 1.0),
    };
    let image = render(&camera, &sphere, &palette, 5, 3);

    assert_eq!(image.read_pixel(2, 1).unwrap(), Color::rgb(1.0, 0.0, 0.0));
    assert_eq!(image.read_pixel(0, 0).unwrap(), Color::rgb(0.0, 0.0, 1.0));
}

#[test]
fn render_band_matches_render() {
    let (camera, sphere) = test_scene(30.0, 4, 3);
    let palette = Palette::default();

    let whole = render(&camera, &sphere, &palette, 4, 3);

    let mut banded = Canvas::new(4, 3);
    for (index, band) in banded.rows_mut(2).enumerate() {
        render_band(&camera, &sphere, &palette, 4, 3, index * 2, band);
    }

    assert_eq!(whole, banded);
}
