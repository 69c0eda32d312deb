pub mod grid;
pub mod log_setup;
pub mod pgm;
pub mod test_utils;

pub use grid::Grid;
