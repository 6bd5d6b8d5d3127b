pub use random::*;

mod random;

/// Source of pseudo-random integers within a fixed, inclusive range.
pub trait NumberGenerator {
    fn generate(&mut self) -> u32;
}
