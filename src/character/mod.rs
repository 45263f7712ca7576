//! Character progression: stat aggregation, experience, bestiary, check-in.

pub mod bestiary;
pub mod bonus;
pub mod checkin;
pub mod derived_stats;
pub mod experience;

pub use bestiary::*;
pub use bonus::*;
pub use checkin::*;
pub use derived_stats::*;
pub use experience::*;
