use std::convert::TryFrom;
use std::fs;

use ray_caster::canvas::Canvas;
use ray_caster::color::Color;
use ray_caster::parallel::parallel_render;
use ray_caster::render::{ hit_mask, render, Palette };
use ray_caster::scene::{ Scene, SceneJson };
use ray_caster::{ Camera, Intersectable, Sphere, Vec3 };

fn camera(fov: f64, width: u32, height: u32) -> Camera {
    Camera::new(
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(0.0, 1.0, 0.0),
        fov, width, height
    ).unwrap()
}

fn sphere() -> Sphere {
    Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0).unwrap()
}

/// Mask rows are top-to-bottom, `#` for hit and `.` for miss.
fn mask_to_string(mask: &[bool], width: usize) -> Vec<String> {
    mask.chunks(width)
        .map(|row| row.iter().map(|&hit| if hit { '#' } else { '.' }).collect())
        .collect()
}

// A ray with direction (dx, dy, -1) hits the unit sphere at distance 3 iff
// dx^2 + dy^2 < 1/8. At 30 degrees the 4x3 viewport is 0.7145 x 0.5359, so
// the pixel offsets are dx in {+-0.357, +-0.119} and dy in {0.268, 0, -0.268}:
// the two inner columns hit, the two outer columns miss.
#[test]
fn four_by_three_narrow_fov() {
    let mask = hit_mask(&camera(30.0, 4, 3), &sphere(), 4, 3);

    assert_eq!(mask_to_string(&mask, 4), vec![
        ".##.",
        ".##.",
        ".##.",
    ]);
}

// At 90 degrees every pixel of a 4x3 grid points at least 4/9 off-axis
// horizontally, which is outside the sphere's silhouette.
#[test]
fn four_by_three_wide_fov() {
    let mask = hit_mask(&camera(90.0, 4, 3), &sphere(), 4, 3);

    assert_eq!(mask_to_string(&mask, 4), vec![
        "....",
        "....",
        "....",
    ]);
}

#[test]
fn hit_distances_are_forward() {
    let camera = camera(30.0, 4, 3);
    let sphere = sphere();

    for j in 0..3 {
        for i in 0..4 {
            let (x, y) = ray_caster::render::pixel_to_viewport(i, j, 4, 3);
            let ray = camera.get_ray(x, y);

            if let Some(t) = sphere.intersect(&ray) {
                assert!(t >= 2.0 && t < 3.0, "t = {}", t);

                let p = ray.at(t);
                let r = (p - sphere.center()).magnitude();
                assert!((r - 1.0).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn canvas_colors_follow_mask() {
    let camera = camera(30.0, 4, 3);
    let sphere = sphere();
    let palette = Palette::default();

    let mask = hit_mask(&camera, &sphere, 4, 3);
    let image = parallel_render(&camera, &sphere, &palette, 4, 3, 2);

    for j in 0..3 {
        for i in 0..4 {
            let expected = if mask[j * 4 + i] { Color::white() } else { Color::black() };
            assert_eq!(image.read_pixel(i, j), Some(expected));
        }
    }
}

#[test]
fn default_scene_renders_symmetric_disc() {
    let scene = Scene::try_from(SceneJson::default()).unwrap();
    let image = scene.render(4);

    assert_eq!(image, render(&scene.camera, &scene.sphere, &scene.palette,
        scene.width, scene.height));

    // Left/right mirror symmetry about the vertical axis.
    for j in 0..scene.height {
        for i in 0..scene.width {
            assert_eq!(image.read_pixel(i, j),
                image.read_pixel(scene.width - 1 - i, j));
        }
    }

    // Corners miss, the middle hits.
    assert_eq!(image.read_pixel(0, 0), Some(Color::black()));
    assert_eq!(image.read_pixel(240, 100), Some(Color::white()));
}

#[test]
fn scene_file_round_trip_through_disk() {
    let dir = std::env::temp_dir().join(format!("ray-caster-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();

    let scene_path = dir.join("scene.json");
    fs::write(&scene_path, r#"{
        "canvas_width": 4,
        "canvas_height": 3,
        "field_of_view": 30.0,
        "camera_from": [0, 0, 0],
        "camera_to": [0, 0, -1],
        "camera_up": [0, 1, 0],
        "sphere": { "center": [0, 0, -3], "radius": 1 }
    }"#).unwrap();

    let scene = Scene::load(&scene_path).unwrap();
    let image = scene.render(1);

    let ppm_path = dir.join("out.ppm");
    image.save(&ppm_path).unwrap();
    let ppm = fs::read_to_string(&ppm_path).unwrap();
    assert!(ppm.starts_with("P3\n4 3\n255\n0 0 0 255 255 255"));

    let png_path = dir.join("out.png");
    image.save(&png_path).unwrap();
    assert!(fs::metadata(&png_path).unwrap().len() > 0);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_scene_file_is_an_error() {
    let err = Scene::load(std::path::Path::new("/nonexistent/scene.json"));
    assert!(matches!(err, Err(ray_caster::SceneError::Io { .. })));
}

#[test]
fn blank_canvas_is_black() {
    let c = Canvas::new(3, 3);
    assert_eq!(c.read_pixel(1, 1), Some(Color::black()));
}
