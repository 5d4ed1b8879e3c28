use std::path::PathBuf;

use clap::Parser;
use nalgebra::{Point3, Vector3};

use crate::edit::Edit;
use crate::error::{Error, Result};
use crate::tracer::{Settings, DEFAULT_DEPTH, MAX_DEPTH};
use crate::util::parse_vector;

/// 한 변의 최대 픽셀 수
pub const MAX_VIEWPORT: u32 = 16384;

#[derive(Parser, Debug, Clone)]
#[command(name = "prism")]
#[command(about = "Recursive Whitted-style ray tracer for a small editable room scene", long_about = None)]
pub struct Config {
    /// Framebuffer width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Framebuffer height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Maximum number of trace recursions per camera ray
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    pub depth: u32,

    /// Camera position as `x,y,z`
    #[arg(long, value_parser = parse_vector, default_value = "0,0,-2", allow_hyphen_values = true)]
    pub eye: Vector3<f32>,

    /// Distance from the eye to the image plane
    #[arg(long, default_value_t = 1.0)]
    pub focal_length: f32,

    /// Number of frames to render; edits are applied before the first one
    #[arg(long, default_value_t = 1)]
    pub frames: u32,

    /// Where the last frame is written (PNG)
    #[arg(short, long, default_value = "prism.png")]
    pub output: PathBuf,

    /// Scene edits, e.g. `sphere`, `cube:1,0,0,0.3,1,0,0`, `glass:6`, `move-light:0,-0.5,0`
    #[arg(short, long = "edit", allow_hyphen_values = true)]
    pub edits: Vec<Edit>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            depth: DEFAULT_DEPTH,
            eye: Vector3::new(0.0, 0.0, -2.0),
            focal_length: 1.0,
            frames: 1,
            output: PathBuf::from("prism.png"),
            edits: vec![],
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidSettings(format!(
                "viewport must not be empty, got {}x{}",
                self.width, self.height
            )));
        }

        if self.width > MAX_VIEWPORT || self.height > MAX_VIEWPORT {
            return Err(Error::InvalidSettings(format!(
                "viewport must be at most {MAX_VIEWPORT}x{MAX_VIEWPORT}, got {}x{}",
                self.width, self.height
            )));
        }

        if !(1..=MAX_DEPTH).contains(&self.depth) {
            return Err(Error::InvalidSettings(format!(
                "depth must be between 1 and {MAX_DEPTH}, got {}",
                self.depth
            )));
        }

        if self.focal_length.is_nan() || self.focal_length <= 0.0 {
            return Err(Error::InvalidSettings(format!(
                "focal length must be positive, got {}",
                self.focal_length
            )));
        }

        if self.frames == 0 {
            return Err(Error::InvalidSettings("at least one frame must be rendered".to_string()));
        }

        Ok(())
    }

    pub fn eye(&self) -> Point3<f32> {
        Point3::from(self.eye)
    }

    pub fn settings(&self) -> Settings {
        Settings { depth: self.depth }
    }
}
