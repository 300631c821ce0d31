//! Board representation and win detection for Fivestone.
//!
//! A [`Board`] is a fixed-size square grid of optional [`Stone`]s.
//! Placement is monotonic: a cell, once filled, is never cleared or
//! overwritten. Win detection ([`has_run`]) scans outward from the
//! last-placed stone along the four axes, with the required run length
//! supplied by the caller rather than baked in.

mod board;
mod error;
mod rules;

pub use board::{Board, Stone};
pub use error::BoardError;
pub use rules::has_run;
