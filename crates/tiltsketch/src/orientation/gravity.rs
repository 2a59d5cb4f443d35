use glam::Vec2;

use crate::orientation::calibrate::{calibrate, OrientationSample};
use crate::orientation::device::{DeviceClass, ScreenRotation};

/// Which rule owns the gravity vector this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravitySource {
    /// Constant downward pull. Applies until the first usable tilt sample.
    StaticFallback,
    /// Calibrated tilt. Once here the session never returns to the fallback.
    Orientation,
}

/// Session gravity in engine units (multiply by `gravity_scale` for px/s²).
#[derive(Debug, Clone)]
pub struct GravityContext {
    vector: Vec2,
    source: GravitySource,
    device: DeviceClass,
    rotation: ScreenRotation,
    fallback: Vec2,
}

impl GravityContext {
    pub fn new(device: DeviceClass, rotation: ScreenRotation, fallback_gravity: f32) -> Self {
        let fallback = Vec2::new(0.0, fallback_gravity);
        Self {
            vector: fallback,
            source: GravitySource::StaticFallback,
            device,
            rotation,
            fallback,
        }
    }

    /// Feed one orientation sample. Returns `true` if it produced gravity.
    pub fn apply_sample(&mut self, sample: &OrientationSample) -> bool {
        let Some(gravity) = calibrate(sample, self.device, self.rotation) else {
            return false;
        };
        if self.source == GravitySource::StaticFallback {
            log::info!(
                "orientation data received ({:?}, {:?}); static gravity disabled",
                self.device,
                self.rotation
            );
            self.source = GravitySource::Orientation;
        }
        self.vector = gravity;
        true
    }

    pub fn set_rotation(&mut self, rotation: ScreenRotation) {
        if rotation != self.rotation {
            log::debug!("screen rotation {}°", rotation.degrees());
            self.rotation = rotation;
        }
    }

    /// Gravity for the coming physics step. The fallback rule writes the vector
    /// only while no tilt sample has ever been accepted.
    pub fn frame_gravity(&mut self) -> Vec2 {
        if self.source == GravitySource::StaticFallback {
            self.vector = self.fallback;
        }
        self.vector
    }

    pub fn vector(&self) -> Vec2 {
        self.vector
    }

    pub fn source(&self) -> GravitySource {
        self.source
    }

    pub fn is_latched(&self) -> bool {
        self.source == GravitySource::Orientation
    }

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    pub fn rotation(&self) -> ScreenRotation {
        self.rotation
    }
}

impl Default for GravityContext {
    fn default() -> Self {
        Self::new(DeviceClass::Other, ScreenRotation::Rot0, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_fallback() {
        let mut ctx = GravityContext::default();
        assert_eq!(ctx.source(), GravitySource::StaticFallback);
        assert_eq!(ctx.frame_gravity(), Vec2::new(0.0, 0.5));
        assert!(!ctx.is_latched());
    }

    #[test]
    fn incomplete_sample_changes_nothing() {
        let mut ctx = GravityContext::default();
        assert!(!ctx.apply_sample(&OrientationSample::new(Some(10.0), None, None)));
        assert_eq!(ctx.source(), GravitySource::StaticFallback);
        assert_eq!(ctx.frame_gravity(), Vec2::new(0.0, 0.5));
    }

    #[test]
    fn first_sample_latches() {
        let mut ctx = GravityContext::new(DeviceClass::Phone, ScreenRotation::Rot0, 0.5);
        assert!(ctx.apply_sample(&OrientationSample::tilt(0.0, 45.0)));
        assert!(ctx.is_latched());
        assert_eq!(ctx.frame_gravity(), Vec2::new(0.5, 0.0));
    }

    #[test]
    fn latch_survives_null_samples() {
        let mut ctx = GravityContext::new(DeviceClass::Phone, ScreenRotation::Rot0, 0.5);
        ctx.apply_sample(&OrientationSample::tilt(0.0, -90.0));
        for _ in 0..5 {
            assert!(!ctx.apply_sample(&OrientationSample::default()));
            assert_eq!(ctx.frame_gravity(), Vec2::new(-1.0, 0.0));
        }
        assert_eq!(ctx.source(), GravitySource::Orientation);
    }

    #[test]
    fn level_device_yields_zero_gravity_not_fallback() {
        let mut ctx = GravityContext::new(DeviceClass::Phone, ScreenRotation::Rot0, 0.5);
        ctx.apply_sample(&OrientationSample::tilt(0.0, 0.0));
        assert_eq!(ctx.frame_gravity(), Vec2::ZERO);
    }

    #[test]
    fn rotation_update_applies_to_next_sample() {
        let mut ctx = GravityContext::new(DeviceClass::Tablet, ScreenRotation::Rot0, 0.5);
        ctx.set_rotation(ScreenRotation::Rot90);
        ctx.apply_sample(&OrientationSample::tilt(0.0, 45.0));
        assert!((ctx.vector() - Vec2::new(0.0, 1.5)).length() < 1e-5);
        assert_eq!(ctx.rotation(), ScreenRotation::Rot90);
        assert_eq!(ctx.device(), DeviceClass::Tablet);
    }
}
