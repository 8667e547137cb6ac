use ndarray::Array2;

use crate::*;
pub use random::*;

mod random;

/// Strategy for choosing which squares hide mines.
pub trait MinePlacer {
    fn place(self, config: BoardConfig) -> Array2<bool>;
}
