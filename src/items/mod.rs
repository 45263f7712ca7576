//! Item system: types, equipment slots, generation, loot, and enhancement.

pub mod drops;
pub mod enhancement;
pub mod equipment;
pub mod generation;
pub mod types;

pub use drops::*;
pub use enhancement::*;
pub use equipment::*;
pub use generation::*;
pub use types::*;
