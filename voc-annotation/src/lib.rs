//! Normalization of Pascal VOC annotation files.

mod common;

pub mod coord;
pub use coord::*;

pub mod bndbox;
pub use bndbox::*;

pub mod strip;
pub use strip::*;

pub mod document;
pub use document::*;

pub mod config;
pub use config::*;

pub mod batch;
pub use batch::*;
