use std::path::PathBuf;

use clap::{ Parser, ValueEnum };
use log::LevelFilter;

use ray_caster::consts::OUT_FILE;
use ray_caster::scene::SceneJson;

/// Log levels selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Casts one ray per pixel at a sphere and writes a hit/miss image.
#[derive(Parser, Debug)]
#[clap(name = "ray-caster", author, version, about)]
pub struct Args {
    /// JSON scene description; the built-in scene is used when omitted
    #[clap(short, long)]
    pub scene: Option<PathBuf>,

    /// Output image (.ppm, or any format the image crate knows, e.g. .png)
    #[clap(short, long, default_value = OUT_FILE)]
    pub output: PathBuf,

    /// Image width in pixels (overrides the scene)
    #[clap(long)]
    pub width: Option<u32>,

    /// Image height in pixels (overrides the scene)
    #[clap(long)]
    pub height: Option<u32>,

    /// Vertical field of view in degrees (overrides the scene)
    #[clap(long)]
    pub fov: Option<f64>,

    /// Number of render threads (defaults to the available parallelism)
    #[clap(short, long)]
    pub threads: Option<usize>,

    /// Logging level
    #[clap(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Applies command line overrides to a scene description.
    pub fn apply(&self, scene_json: &mut SceneJson) {
        if let Some(width) = self.width {
            scene_json.canvas_width = width;
        }
        if let Some(height) = self.height {
            scene_json.canvas_height = height;
        }
        if let Some(fov) = self.fov {
            scene_json.field_of_view = fov;
        }
    }
}

/* Tests */

#[test]
fn overrides_replace_scene_values() {
    let args = Args::parse_from(&["ray-caster", "--width", "64", "--fov", "45"]);
    let mut scene_json = SceneJson::default();
    args.apply(&mut scene_json);

    assert_eq!(scene_json.canvas_width, 64);
    assert_eq!(scene_json.canvas_height, SceneJson::default().canvas_height);
    assert_eq!(scene_json.field_of_view, 45.0);
    assert_eq!(args.output, PathBuf::from("render.png"));
}
