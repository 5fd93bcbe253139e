//! Terminal plotting for projected response curves.

pub mod ascii;

pub use ascii::*;
