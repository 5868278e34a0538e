//! Host-side mock robot brain.
//!
//! Drives a simulated chassis in a circle, installs it as the logger's pose
//! source through the selected odometry backend, and prints one JSON
//! telemetry line per pose sample.

use clap::Parser;
use core::cell::Cell;
use embassy_executor::{Executor, Spawner};
use embassy_time::{Duration, Ticker};
use mvlib_core::mk_static;
use mvlib_core::utils::logger::{Logger, POSE_CHANNEL};
use mvlib_core::utils::math::pose::Pose;
#[cfg(feature = "ez-template")]
use mvlib_core::utils::optional::ez_template::EzDrive;
#[cfg(feature = "lemlib")]
use mvlib_core::utils::optional::lemlib::{LemChassis, LemPose};
use mvlib_core::utils::optional::{self, Backend, SELECTED_BACKEND};
use static_cell::StaticCell;
use tracing::{debug, error, info, trace, warn};

#[cfg(not(any(feature = "ez-template", feature = "lemlib")))]
compile_error!("mock-brain needs an odometry backend: enable `ez-template` or `lemlib`");

/// Simulated drive physics step.
const SIM_STEP: Duration = Duration::from_millis(10);

#[derive(Parser)]
#[clap(version = "1.0")]
struct Opts
{
    /// Pose sample period in milliseconds
    #[clap(long, default_value = "50", value_parser = clap::value_parser!(u64).range(1..))]
    period_ms: u64,
    /// Simulate EZ-Template odometry switched off (ignored for LemLib)
    #[clap(long)]
    odom_disabled: bool,
    /// Simulated forward speed (in/s)
    #[clap(long, default_value = "12.0")]
    speed: f32,
    /// Exit after printing this many samples
    #[clap(long)]
    samples: Option<u64>,
}

impl Opts {
    /// LemLib has no odometry enable flag, so `--odom-disabled` has no effect.
    fn odom_disabled_ignored(&self) -> bool {
        self.odom_disabled && SELECTED_BACKEND == Some(Backend::LemLib)
    }
}

/// Chassis whose odometry is integrated in software.
struct SimChassis {
    #[cfg_attr(not(feature = "ez-template"), allow(dead_code))]
    odom_enabled: Cell<bool>,
    x: Cell<f32>,
    y: Cell<f32>,
    theta: Cell<f32>,
}

impl SimChassis {
    fn new(odom_enabled: bool) -> Self {
        Self {
            odom_enabled: Cell::new(odom_enabled),
            x: Cell::new(0.0),
            y: Cell::new(0.0),
            theta: Cell::new(0.0),
        }
    }

    fn pose(&self) -> Pose {
        Pose::new(self.x.get(), self.y.get(), self.theta.get())
    }

    /// Advance along a circle; heading turns 30 deg/s.
    fn step(
        &self,
        speed: f32,
        dt: f32,
    ) {
        let theta = (self.theta.get() + 30.0 * dt) % 360.0;
        let rad = theta.to_radians();
        self.x.set(self.x.get() + speed * dt * rad.cos());
        self.y.set(self.y.get() + speed * dt * rad.sin());
        self.theta.set(theta);
    }
}

#[cfg(feature = "ez-template")]
impl EzDrive for SimChassis {
    fn odom_enabled(&self) -> bool {
        self.odom_enabled.get()
    }
    fn odom_x_get(&self) -> f32 {
        self.x.get()
    }
    fn odom_y_get(&self) -> f32 {
        self.y.get()
    }
    fn odom_theta_get(&self) -> f32 {
        self.theta.get()
    }
}

#[cfg(feature = "lemlib")]
impl LemChassis for SimChassis {
    fn get_pose(&self) -> LemPose {
        let p = self.pose();
        LemPose {
            x: p.x,
            y: p.y,
            theta: p.theta,
        }
    }
}

#[embassy_executor::task]
async fn drive_task(chassis: &'static SimChassis, speed: f32) -> ! {
    let mut ticker = Ticker::every(SIM_STEP);
    let dt = SIM_STEP.as_micros() as f32 / 1_000_000.0;
    loop {
        chassis.step(speed, dt);
        trace!(pose = ?chassis.pose(), "sim step");
        ticker.next().await;
    }
}

#[embassy_executor::task]
async fn logger_task(mut logger: Logger<'static>, period: Duration) {
    match logger.run(Some(period)).await {
        Ok(never) => match never {},
        Err(e) => {
            error!("Pose logger stopped: {}", e);
            std::process::exit(1);
        }
    }
}

#[embassy_executor::task]
async fn main_task(spawner: Spawner) {
    let opts: Opts = Opts::parse();
    if opts.odom_disabled_ignored() {
        warn!("--odom-disabled has no effect with the LemLib backend");
    }

    let chassis: &'static SimChassis = mk_static!(SimChassis, SimChassis::new(!opts.odom_disabled));
    if let Err(e) = spawner.spawn(drive_task(chassis, opts.speed)) {
        error!("Failed to spawn drive task: {:?}", e);
        std::process::exit(1);
    }

    let mut logger = Logger::new();
    optional::set_odom(&mut logger, chassis);
    if let Some(backend) = SELECTED_BACKEND {
        info!("Odometry backend: {}", backend.name());
    }
    if let Err(e) = spawner.spawn(logger_task(logger, Duration::from_millis(opts.period_ms))) {
        error!("Failed to spawn logger task: {:?}", e);
        std::process::exit(1);
    }

    let mut printed = 0u64;
    let mut last: Option<Pose> = None;
    let mut travelled = 0.0f32;
    loop {
        let record = POSE_CHANNEL.receive().await;
        match record.to_json() {
            Ok(line) => println!("{line}"),
            Err(e) => error!("Failed to serialize pose record: {}", e),
        }
        if let Some(p) = record.sample.pose() {
            if let Some(prev) = last {
                travelled += prev.distance_to(&p);
            }
            last = Some(p);
            debug!(travelled, "Distance travelled (in)");
        }
        printed += 1;
        if opts.samples.is_some_and(|n| printed >= n) {
            info!("Printed {} samples, travelled {:.1} in, exiting", printed, travelled);
            std::process::exit(0);
        }
    }
}

static EXECUTOR: StaticCell<Executor> = StaticCell::new();

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let executor = EXECUTOR.init(Executor::new());
    executor.run(|spawner| {
        if let Err(e) = spawner.spawn(main_task(spawner)) {
            error!("Failed to spawn main task: {:?}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_opts() {
        let opts = Opts::try_parse_from(["mock-brain"]).unwrap();
        assert_eq!(opts.period_ms, 50);
        assert!(!opts.odom_disabled);
        assert!((opts.speed - 12.0).abs() < 1e-6);
        assert_eq!(opts.samples, None);
    }

    #[test]
    fn test_zero_period_rejected() {
        assert!(Opts::try_parse_from(["mock-brain", "--period-ms", "0"]).is_err());
        assert!(Opts::try_parse_from(["mock-brain", "--period-ms", "1"]).is_ok());
    }

    #[test]
    fn test_odom_disabled_only_ignored_for_lemlib() {
        let opts = Opts::try_parse_from(["mock-brain", "--odom-disabled"]).unwrap();
        assert_eq!(opts.odom_disabled_ignored(), cfg!(feature = "lemlib"));

        let opts = Opts::try_parse_from(["mock-brain"]).unwrap();
        assert!(!opts.odom_disabled_ignored());
    }

    #[test]
    fn test_step_moves_at_speed() {
        let chassis = SimChassis::new(true);
        let mut prev = chassis.pose();
        let mut travelled = 0.0;
        for _ in 0..100 {
            chassis.step(12.0, 0.01);
            let p = chassis.pose();
            travelled += prev.distance_to(&p);
            prev = p;
        }
        assert!((travelled - 12.0).abs() < 1e-3);
        assert!((chassis.pose().theta - 30.0).abs() < 1e-3);
        assert!(chassis.pose().distance_to(&Pose::default()) < 12.0);
    }

    #[cfg(feature = "ez-template")]
    #[test]
    fn test_odom_disabled_reaches_logger() {
        let chassis = SimChassis::new(false);
        let mut logger = Logger::new();
        optional::set_odom(&mut logger, &chassis);
        assert!(!logger.sample_pose().is_available());
    }

    #[cfg(feature = "lemlib")]
    #[test]
    fn test_lemlib_reports_sim_pose() {
        let chassis = SimChassis::new(false);
        chassis.step(12.0, 0.5);
        let mut logger = Logger::new();
        optional::set_odom(&mut logger, &chassis);
        assert_eq!(logger.sample_pose().pose(), Some(chassis.pose()));
    }
}
