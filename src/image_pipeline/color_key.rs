//! Color keying module
//!
//! Turns pixels close to a reference color transparent. The comparison is
//! done per channel with an inclusive tolerance on each of R, G and B.

mod keyer;
mod parallel_keyer;
pub mod types;

pub use keyer::{make_transparent, ColorKeyer, SerialKeyer};
pub use parallel_keyer::ParallelKeyer;
pub use types::{ColorKeyParams, KeyStats, ParseColorError, TargetColor};
