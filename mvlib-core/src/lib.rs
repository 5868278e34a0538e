//! Pose telemetry core for MVLib on no-std robot brains.
//!
//! The logger samples robot pose through an installable getter. Optional
//! odometry backends (EZ-Template, LemLib) are selected with cargo features;
//! see [`utils::optional`].
#![no_std]

extern crate alloc;

pub mod utils;

#[doc(hidden)]
pub use static_cell as __static_cell;
