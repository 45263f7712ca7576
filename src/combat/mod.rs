pub mod logic;
pub mod math;
pub mod types;

pub use logic::*;
pub use types::*;
