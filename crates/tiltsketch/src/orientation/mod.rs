//! Device tilt → gravity.
//!
//! [`device`] classifies the hardware once at startup, [`calibrate`] maps raw
//! tilt angles to a gravity vector, [`gravity`] owns the per-session gravity
//! and its one-way latch, and [`permission`] decides whether tilt data will
//! ever arrive.

pub mod calibrate;
pub mod device;
pub mod gravity;
pub mod permission;
