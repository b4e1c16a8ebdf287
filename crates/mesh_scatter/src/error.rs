//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid parameters (including unusable meshes), baking without placed instances,
//! and IO.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("nothing to bake: generate placements with a preview first")]
    NothingToBake,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
