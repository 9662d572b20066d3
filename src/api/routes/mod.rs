pub mod assign;
pub mod compositions;
pub mod tournaments;
