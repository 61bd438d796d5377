//! Core trait definitions.
//!
//! The generator never reaches for a random source on its own; callers hand
//! it something implementing [`Draw`]. Production code uses
//! [`RngDraws`](crate::generator::RngDraws), tests use
//! [`ScriptedDraws`](crate::generator::ScriptedDraws).

/// A source of uniformly distributed integers.
pub trait Draw {
    /// Draw an integer from the closed range `low..=high`.
    ///
    /// Callers guarantee `low <= high`.
    fn draw(&mut self, low: u32, high: u32) -> u32;
}
