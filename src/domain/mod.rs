//! Domain aggregates exposed by the image search service layer.

pub mod image;
pub mod search;
pub mod types;
