//! LemLib odometry backend.
//!
//! LemLib reports its pose as a single struct. There is no enable flag, so
//! any live chassis yields a pose, passed through in LemLib's own heading
//! convention.

use super::ChassisRef;
use crate::utils::{
    logger::{Logger, PoseSource},
    math::pose::{Pose, PoseSample},
};

/// Pose as returned by `lemlib::Chassis::getPose`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LemPose {
    pub x: f32,
    pub y: f32,
    pub theta: f32,
}

/// Odometry surface of a LemLib `lemlib::Chassis`.
pub trait LemChassis {
    fn get_pose(&self) -> LemPose;
}

/// Pose getter reading a LemLib chassis through a non-owning handle.
#[derive(Debug, Clone)]
pub struct LemLibOdom<H> {
    chassis: H,
}

impl<H> LemLibOdom<H>
where
    H: ChassisRef,
    H::Chassis: LemChassis,
{
    pub fn new(chassis: H) -> Self {
        Self { chassis }
    }
}

impl<H> PoseSource for LemLibOdom<H>
where
    H: ChassisRef,
    H::Chassis: LemChassis,
{
    fn sample(&self) -> PoseSample {
        self.chassis
            .with_chassis(|chassis| {
                let p = chassis.get_pose();
                PoseSample::Pose(Pose::new(p.x, p.y, p.theta))
            })
            .unwrap_or(PoseSample::Unavailable)
    }
}

/// Install a LemLib chassis as the logger's pose getter.
pub fn set_odom<'a, H>(
    logger: &mut Logger<'a>,
    chassis: H,
) where
    H: ChassisRef + 'a,
    H::Chassis: LemChassis,
{
    logger.set_pose_getter(LemLibOdom::new(chassis));
}
