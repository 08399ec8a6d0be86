pub mod grid;
pub mod sweep;
