//! Stage catalogs and the wave/progression controller.

pub mod data;
pub mod progression;

pub use data::*;
pub use progression::*;
