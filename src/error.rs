use thiserror::Error;

use crate::tracer::scene::ObjectId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("no object with id {0}")]
    NoSuchObject(ObjectId),

    #[error("scene has no lights")]
    NoLights,

    #[error("invalid edit `{input}`: {reason}")]
    InvalidEdit { input: String, reason: String },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, Error>;
