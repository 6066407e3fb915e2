//! Decoding pipeline: line scanner feeding the resolution engine

pub(crate) mod engine;
pub mod scanner;
