//! Utility re-exports and helper macros for MVLib.
//!
//! - `logger`: the pose-sampling logger and its telemetry channel
//! - `math`: pose data model
//! - `optional`: odometry backend adapters, at most one selected per build
//!
//! The `mk_static!` macro simplifies static initialization in no-std contexts.

pub mod logger;
pub mod math;
pub mod optional;

pub use embassy_time::{Duration, Instant};
pub use logger::{Logger, PoseSource, POSE_CHANNEL};
pub use math::pose::{Pose, PoseRecord, PoseSample};

#[macro_export]
/// Initialize a no-std static cell and write the given value into it.
///
/// This macro creates a `static_cell::StaticCell` for type `$t` and initializes
/// it with `$val`, returning a mutable reference to the stored value.
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: $crate::__static_cell::StaticCell<$t> =
            $crate::__static_cell::StaticCell::new();
        STATIC_CELL.uninit().write($val)
    }};
}
