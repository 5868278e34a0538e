//! Math utilities for MVLib.
//!
//! This module provides the pose data model shared by the logger and the
//! odometry backends.

pub mod pose;
