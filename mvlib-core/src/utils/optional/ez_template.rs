//! EZ-Template odometry backend.
//!
//! EZ-Template exposes odometry as three independent getters plus an
//! enable flag. When tracking is off the pose is reported as unavailable.

use super::ChassisRef;
use crate::utils::{
    logger::{Logger, PoseSource},
    math::pose::{Pose, PoseSample},
};

/// Odometry surface of an EZ-Template `ez::Drive`.
pub trait EzDrive {
    /// Whether onboard odometry tracking is running.
    fn odom_enabled(&self) -> bool;
    /// X position (in).
    fn odom_x_get(&self) -> f32;
    /// Y position (in).
    fn odom_y_get(&self) -> f32;
    /// Heading (deg).
    fn odom_theta_get(&self) -> f32;
}

/// Pose getter reading an EZ-Template drive through a non-owning handle.
#[derive(Debug, Clone)]
pub struct EzTemplateOdom<H> {
    chassis: H,
}

impl<H> EzTemplateOdom<H>
where
    H: ChassisRef,
    H::Chassis: EzDrive,
{
    pub fn new(chassis: H) -> Self {
        Self { chassis }
    }
}

impl<H> PoseSource for EzTemplateOdom<H>
where
    H: ChassisRef,
    H::Chassis: EzDrive,
{
    fn sample(&self) -> PoseSample {
        self.chassis
            .with_chassis(|drive| {
                if !drive.odom_enabled() {
                    return PoseSample::Unavailable;
                }
                PoseSample::Pose(Pose::new(
                    drive.odom_x_get(),
                    drive.odom_y_get(),
                    drive.odom_theta_get(),
                ))
            })
            .unwrap_or(PoseSample::Unavailable)
    }
}

/// Install an EZ-Template drive as the logger's pose getter.
pub fn set_odom<'a, H>(
    logger: &mut Logger<'a>,
    chassis: H,
) where
    H: ChassisRef + 'a,
    H::Chassis: EzDrive,
{
    logger.set_pose_getter(EzTemplateOdom::new(chassis));
}
