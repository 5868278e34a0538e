//! Pose-sampling logger for MVLib.
//!
//! The logger owns one installable pose getter (any [`PoseSource`]) and
//! samples it on its own schedule. Each sample is stamped and handed off
//! through `POSE_CHANNEL` to whatever task ships telemetry.

extern crate alloc;

use alloc::boxed::Box;
use core::{convert::Infallible, fmt};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Duration, Instant, Ticker};

use crate::utils::math::pose::{Pose, PoseRecord, PoseSample};

/// Channel carrying stamped pose samples (`PoseRecord` messages).
pub static POSE_CHANNEL: embassy_sync::channel::Channel<CriticalSectionRawMutex, PoseRecord, 16> =
    embassy_sync::channel::Channel::new();

/// Sample period used by [`Logger::run`] when none is given.
pub const DEFAULT_SAMPLE_PERIOD: Duration = Duration::from_millis(50);

/// Anything the logger can ask for the current pose.
///
/// Implementations must be cheap and non-blocking, and must report missing
/// data as [`PoseSample::Unavailable`] instead of failing.
pub trait PoseSource {
    fn sample(&self) -> PoseSample;
}

impl<F> PoseSource for F
where
    F: Fn() -> PoseSample,
{
    fn sample(&self) -> PoseSample {
        self()
    }
}

/// Errors returned by the logger sampling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerError {
    /// `run` was called before a pose getter was installed.
    NoPoseSource,
    /// The sample period was zero.
    InvalidPeriod,
}

impl fmt::Display for LoggerError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            LoggerError::NoPoseSource => f.write_str("no pose getter installed"),
            LoggerError::InvalidPeriod => f.write_str("sample period must be non-zero"),
        }
    }
}

/// Telemetry logger that samples robot pose through an installed getter.
pub struct Logger<'a> {
    pose_getter: Option<Box<dyn PoseSource + 'a>>,
    last_pose: Option<Pose>,
    available: bool,
}

impl Default for Logger<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Logger<'a> {
    /// Create a logger with no pose getter installed.
    pub fn new() -> Self {
        Self {
            pose_getter: None,
            last_pose: None,
            available: false,
        }
    }

    /// Install the pose getter, replacing any previous one.
    pub fn set_pose_getter<S>(
        &mut self,
        getter: S,
    ) where
        S: PoseSource + 'a,
    {
        if self.pose_getter.is_some() {
            tracing::debug!("replacing installed pose getter");
        }
        self.pose_getter = Some(Box::new(getter));
    }

    pub fn has_pose_getter(&self) -> bool {
        self.pose_getter.is_some()
    }

    /// Last pose that was actually available, if any.
    pub fn last_pose(&self) -> Option<Pose> {
        self.last_pose
    }

    /// Query the installed getter once.
    ///
    /// Returns `Unavailable` when no getter is installed.
    pub fn sample_pose(&mut self) -> PoseSample {
        let sample = self
            .pose_getter
            .as_ref()
            .map_or(PoseSample::Unavailable, |getter| getter.sample());

        match (self.available, sample) {
            (false, PoseSample::Pose(_)) => tracing::debug!("pose available"),
            (true, PoseSample::Unavailable) => tracing::debug!("pose unavailable"),
            _ => {}
        }
        self.available = sample.is_available();
        if let PoseSample::Pose(p) = sample {
            self.last_pose = Some(p);
        }
        sample
    }

    /// Sample, stamp, and publish one record on `POSE_CHANNEL`.
    ///
    /// A full channel drops the record.
    pub fn log_pose(&mut self) -> PoseRecord {
        let record = PoseRecord {
            timestamp_ms: Instant::now().as_millis(),
            sample: self.sample_pose(),
        };
        if POSE_CHANNEL.try_send(record).is_err() {
            tracing::warn!(t = record.timestamp_ms, "pose channel full, dropping sample");
        }
        record
    }

    /// Sample the pose every `period` forever (default 50 ms).
    ///
    /// Only returns on a configuration error.
    pub async fn run(
        &mut self,
        period: Option<Duration>,
    ) -> Result<Infallible, LoggerError> {
        let period = period.unwrap_or(DEFAULT_SAMPLE_PERIOD);
        if period.as_ticks() == 0 {
            return Err(LoggerError::InvalidPeriod);
        }
        if !self.has_pose_getter() {
            return Err(LoggerError::NoPoseSource);
        }

        tracing::info!("Pose logger sampling every {} ms", period.as_millis());
        let mut ticker = Ticker::every(period);
        loop {
            self.log_pose();
            ticker.next().await;
        }
    }
}
