pub mod app;
pub mod camera;
pub mod config;
pub mod edit;
pub mod error;
pub mod tracer;
pub mod util;

pub use app::{run, Application};
pub use camera::Camera;
pub use config::Config;
pub use edit::Edit;
pub use error::{Error, Result};
pub use tracer::scene::Scene;
pub use tracer::Tracer;
