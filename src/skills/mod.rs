//! Skills: catalog plus ownership, equip slots, and cooldowns.

pub mod data;
pub mod logic;

pub use data::*;
pub use logic::*;
