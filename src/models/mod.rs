//! Core data models for squad assignment.

mod ids;
mod player;
mod position;
mod squad;
mod tier;
mod tournament;

pub use ids::*;
pub use player::*;
pub use position::*;
pub use squad::*;
pub use tier::*;
pub use tournament::*;
