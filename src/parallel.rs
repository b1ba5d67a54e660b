use std::thread;

use log::{ debug, info };

use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::geometry::Intersectable;
use crate::render::{ render_band, Palette };

/// Renders an image on `threads` worker threads.
///
/// The canvas is split into contiguous bands of rows and each worker owns one
/// band outright, so no pixel is shared between threads and no locking is
/// needed. The camera and shape are only read. The result is identical to
/// `render::render`.
pub fn parallel_render<S>(camera: &Camera, shape: &S, palette: &Palette,
    width: usize, height: usize, threads: usize) -> Canvas
    where S: Intersectable + Sync + ?Sized {
    let (rows_per_band, bands) = band_layout(height, threads);

    let mut canvas = Canvas::new(width, height);

    info!("Rendering {}x{} using {} threads...", width, height, bands);
    thread::scope(|scope| {
        for (index, band) in canvas.rows_mut(rows_per_band).enumerate() {
            let first_row = index * rows_per_band;
            debug!("worker {} takes rows from {}", index, first_row);

            scope.spawn(move || {
                render_band(camera, shape, palette, width, height, first_row, band);
            });
        }
    });
    info!("...done.");

    canvas
}

/// Returns the number of rows per band and the number of bands (one per
/// worker) that `height` rows split into when `threads` are requested.
///
/// Rounding up the band size can leave fewer bands than threads: 23 rows on
/// 7 threads give bands of 4 rows, so only 6 workers.
fn band_layout(height: usize, threads: usize) -> (usize, usize) {
    // There should be at least one thread, and no more threads than rows.
    let threads = threads.max(1).min(height.max(1));
    let rows_per_band = (height + threads - 1) / threads;

    if rows_per_band == 0 {
        return (0, 0);
    }

    (rows_per_band, (height + rows_per_band - 1) / rows_per_band)
}

/* Tests */

#[cfg(test)]
use crate::{ geometry::Sphere, render::render, tuple::Vec3 };

#[cfg(test)]
fn test_scene(width: u32, height: u32) -> (Camera, Sphere) {
    let camera = Camera::new(
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(0.0, 1.0, 0.0),
        60.0, width, height
    ).unwrap();
    let sphere = Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0).unwrap();

    (camera, sphere)
}

#[test]
fn parallel_matches_serial() {
    let (camera, sphere) = test_scene(37, 23);
    let palette = Palette::default();
    let serial = render(&camera, &sphere, &palette, 37, 23);

    for &threads in [1, 2, 3, 4, 7, 23, 64].iter() {
        let parallel = parallel_render(&camera, &sphere, &palette, 37, 23, threads);
        assert_eq!(parallel, serial, "threads = {}", threads);
    }
}

#[test]
fn zero_threads_still_renders() {
    let (camera, sphere) = test_scene(8, 6);
    let palette = Palette::default();

    let image = parallel_render(&camera, &sphere, &palette, 8, 6, 0);
    assert_eq!(image, render(&camera, &sphere, &palette, 8, 6));
}

#[test]
fn empty_canvas() {
    let (camera, sphere) = test_scene(8, 6);
    let image = parallel_render(&camera, &sphere, &Palette::default(), 0, 0, 4);

    assert_eq!(image, Canvas::new(0, 0));
}

#[test]
fn band_count_follows_rounded_band_size() {
    assert_eq!(band_layout(23, 7), (4, 6));
    assert_eq!(band_layout(23, 23), (1, 23));
    assert_eq!(band_layout(23, 64), (1, 23));
    assert_eq!(band_layout(6, 4), (2, 3));
    assert_eq!(band_layout(6, 0), (6, 1));
    assert_eq!(band_layout(0, 4), (0, 0));
}

#[test]
fn workers_match_band_count() {
    let mut canvas = Canvas::new(37, 23);
    let (rows_per_band, bands) = band_layout(23, 7);

    assert_eq!(canvas.rows_mut(rows_per_band).count(), bands);
}
