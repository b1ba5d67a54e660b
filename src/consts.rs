use crate::color::Color;

// Runtime parameters
pub const DEFAULT_THREADS: usize = 3;
pub const OUT_FILE: &str = "render.png";

// Default scene: an ultra-wide frame looking down -z at a unit sphere
pub const CANVAS_WIDTH: u32 = 480;
pub const CANVAS_HEIGHT: u32 = 200; // 480 / 2.39, truncated
pub const FIELD_OF_VIEW: f64 = 90.0;
pub const SPHERE_CENTER: [f64; 3] = [0.0, 0.0, -3.0];
pub const SPHERE_RADIUS: f64 = 1.0;

// Pixel colors
pub const HIT_COLOR: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
pub const MISS_COLOR: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.0001;
