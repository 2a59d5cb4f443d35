//! Raw device tilt → 2D gravity.
//!
//! `beta` is front/back tilt (−180..180), `gamma` is left/right tilt (−90..90).
//! Phones map a 90° tilt to one unit of gravity. Tablets map 45° to 1.5 units
//! and rotate the result into screen space, since a tablet is often held in
//! landscape while the sensor axes stay fixed to the hardware.

use glam::Vec2;

use crate::orientation::device::{DeviceClass, ScreenRotation};

pub const PHONE_DIVISOR: f32 = 90.0;
pub const TABLET_DIVISOR: f32 = 45.0;
pub const TABLET_SENSITIVITY: f32 = 1.5;

/// One `deviceorientation` reading. Any angle may be missing while the sensor
/// warms up or on hardware without it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationSample {
    pub beta: Option<f32>,
    pub gamma: Option<f32>,
    pub alpha: Option<f32>,
}

impl OrientationSample {
    pub fn new(beta: Option<f32>, gamma: Option<f32>, alpha: Option<f32>) -> Self {
        Self { beta, gamma, alpha }
    }

    /// A reading with both tilt angles present.
    pub fn tilt(beta: f32, gamma: f32) -> Self {
        Self::new(Some(beta), Some(gamma), None)
    }

    /// Both tilt angles, if present and finite.
    fn tilt_angles(&self) -> Option<(f32, f32)> {
        let beta = self.beta.filter(|v| v.is_finite())?;
        let gamma = self.gamma.filter(|v| v.is_finite())?;
        Some((beta, gamma))
    }
}

impl ScreenRotation {
    /// Rotate a sensor-space vector into screen space.
    pub fn compensate(self, g: Vec2) -> Vec2 {
        match self {
            ScreenRotation::Rot0 => g,
            ScreenRotation::Rot90 => Vec2::new(-g.y, g.x),
            ScreenRotation::RotNeg90 => Vec2::new(g.y, -g.x),
            ScreenRotation::Rot180 => Vec2::new(-g.x, -g.y),
        }
    }
}

/// Map a sample to gravity. Returns `None` when either tilt angle is missing;
/// the caller then leaves gravity as it was.
pub fn calibrate(
    sample: &OrientationSample,
    device: DeviceClass,
    rotation: ScreenRotation,
) -> Option<Vec2> {
    let (beta, gamma) = sample.tilt_angles()?;
    let gravity = match device {
        DeviceClass::Tablet => {
            let g = Vec2::new(gamma, beta) / TABLET_DIVISOR * TABLET_SENSITIVITY;
            rotation.compensate(g)
        }
        DeviceClass::Phone | DeviceClass::Other => Vec2::new(gamma, beta) / PHONE_DIVISOR,
    };
    Some(gravity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_close(actual: Vec2, expected: Vec2) {
        assert!(
            (actual - expected).length() < 1e-5,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn missing_angles_decline() {
        let none = OrientationSample::default();
        let no_gamma = OrientationSample::new(Some(10.0), None, Some(3.0));
        let no_beta = OrientationSample::new(None, Some(10.0), None);
        for sample in [none, no_gamma, no_beta] {
            assert_eq!(calibrate(&sample, DeviceClass::Phone, ScreenRotation::Rot0), None);
            assert_eq!(calibrate(&sample, DeviceClass::Tablet, ScreenRotation::Rot90), None);
        }
    }

    #[test]
    fn non_finite_angles_decline() {
        let sample = OrientationSample::tilt(f32::NAN, 10.0);
        assert_eq!(calibrate(&sample, DeviceClass::Phone, ScreenRotation::Rot0), None);
    }

    #[test]
    fn alpha_is_ignored() {
        let a = OrientationSample::new(Some(30.0), Some(-15.0), None);
        let b = OrientationSample::new(Some(30.0), Some(-15.0), Some(270.0));
        assert_eq!(
            calibrate(&a, DeviceClass::Phone, ScreenRotation::Rot0),
            calibrate(&b, DeviceClass::Phone, ScreenRotation::Rot0),
        );
    }

    #[test]
    fn phone_forward_tilt() {
        let g = calibrate(&OrientationSample::tilt(45.0, 0.0), DeviceClass::Phone, ScreenRotation::Rot0);
        assert_close(g.unwrap(), Vec2::new(0.0, 0.5));
    }

    #[test]
    fn phone_ignores_rotation() {
        let sample = OrientationSample::tilt(20.0, 60.0);
        let upright = calibrate(&sample, DeviceClass::Phone, ScreenRotation::Rot0);
        let turned = calibrate(&sample, DeviceClass::Phone, ScreenRotation::Rot90);
        assert_eq!(upright, turned);
    }

    #[test]
    fn other_devices_map_like_phones() {
        let sample = OrientationSample::tilt(-90.0, 45.0);
        let g = calibrate(&sample, DeviceClass::Other, ScreenRotation::Rot180).unwrap();
        assert_close(g, Vec2::new(0.5, -1.0));
    }

    #[test]
    fn tablet_portrait() {
        let g = calibrate(&OrientationSample::tilt(0.0, 45.0), DeviceClass::Tablet, ScreenRotation::Rot0);
        assert_close(g.unwrap(), Vec2::new(1.5, 0.0));
    }

    #[test]
    fn tablet_rotations() {
        let sample = OrientationSample::tilt(0.0, 45.0);
        let at = |rotation| calibrate(&sample, DeviceClass::Tablet, rotation).unwrap();
        assert_close(at(ScreenRotation::Rot90), Vec2::new(0.0, 1.5));
        assert_close(at(ScreenRotation::RotNeg90), Vec2::new(0.0, -1.5));
        assert_close(at(ScreenRotation::Rot180), Vec2::new(-1.5, 0.0));
    }

    #[test]
    fn tablet_rotation_uses_both_axes() {
        // gx = 1.5, gy = 0.75 before rotation.
        let sample = OrientationSample::tilt(22.5, 45.0);
        let at = |rotation| calibrate(&sample, DeviceClass::Tablet, rotation).unwrap();
        assert_close(at(ScreenRotation::Rot0), Vec2::new(1.5, 0.75));
        assert_close(at(ScreenRotation::Rot90), Vec2::new(-0.75, 1.5));
        assert_close(at(ScreenRotation::RotNeg90), Vec2::new(0.75, -1.5));
        assert_close(at(ScreenRotation::Rot180), Vec2::new(-1.5, -0.75));
    }

    fn arb_device() -> impl Strategy<Value = DeviceClass> {
        prop_oneof![
            Just(DeviceClass::Phone),
            Just(DeviceClass::Tablet),
            Just(DeviceClass::Other),
        ]
    }

    fn arb_rotation() -> impl Strategy<Value = ScreenRotation> {
        prop_oneof![
            Just(ScreenRotation::Rot0),
            Just(ScreenRotation::Rot90),
            Just(ScreenRotation::RotNeg90),
            Just(ScreenRotation::Rot180),
        ]
    }

    proptest! {
        #[test]
        fn calibration_is_pure(
            beta in -180.0f32..180.0,
            gamma in -90.0f32..90.0,
            device in arb_device(),
            rotation in arb_rotation(),
        ) {
            let sample = OrientationSample::tilt(beta, gamma);
            let first = calibrate(&sample, device, rotation);
            let second = calibrate(&sample, device, rotation);
            prop_assert!(first.is_some());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn rotation_preserves_magnitude(
            beta in -180.0f32..180.0,
            gamma in -90.0f32..90.0,
            rotation in arb_rotation(),
        ) {
            let sample = OrientationSample::tilt(beta, gamma);
            let upright = calibrate(&sample, DeviceClass::Tablet, ScreenRotation::Rot0).unwrap();
            let turned = calibrate(&sample, DeviceClass::Tablet, rotation).unwrap();
            prop_assert!((upright.length() - turned.length()).abs() < 1e-4);
        }
    }
}
