use crate::orientation::permission::OrientationCapability;

/// Hardware class, resolved once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceClass {
    Phone,
    /// Large touch device. Uses a more sensitive mapping and compensates for
    /// screen rotation.
    Tablet,
    /// Desktops and anything unrecognised. Mapped like a phone.
    #[default]
    Other,
}

/// What the browser reports about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigatorInfo {
    pub user_agent: String,
    pub platform: String,
    pub max_touch_points: u32,
}

impl DeviceClass {
    /// iPads report either "iPad" in the user agent or, in desktop mode, a
    /// "MacIntel" platform with multi-touch.
    pub fn detect(info: &NavigatorInfo) -> Self {
        let desktop_mode_ipad = info.max_touch_points > 2 && info.platform.contains("MacIntel");
        if desktop_mode_ipad || info.user_agent.contains("iPad") {
            DeviceClass::Tablet
        } else if info.user_agent.contains("iPhone") || info.user_agent.contains("iPod") {
            DeviceClass::Phone
        } else {
            DeviceClass::Other
        }
    }
}

/// Screen rotation relative to the device's natural orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenRotation {
    #[default]
    Rot0,
    Rot90,
    RotNeg90,
    Rot180,
}

impl ScreenRotation {
    /// Map a `window.orientation`-style angle. 270 is the same as −90.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees {
            0 => Some(ScreenRotation::Rot0),
            90 => Some(ScreenRotation::Rot90),
            -90 | 270 => Some(ScreenRotation::RotNeg90),
            180 | -180 => Some(ScreenRotation::Rot180),
            _ => None,
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            ScreenRotation::Rot0 => 0,
            ScreenRotation::Rot90 => 90,
            ScreenRotation::RotNeg90 => -90,
            ScreenRotation::Rot180 => 180,
        }
    }
}

/// Everything the calibrator and negotiator need to know about the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceProfile {
    pub class: DeviceClass,
    pub rotation: ScreenRotation,
    pub capability: OrientationCapability,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(user_agent: &str, platform: &str, max_touch_points: u32) -> NavigatorInfo {
        NavigatorInfo {
            user_agent: user_agent.into(),
            platform: platform.into(),
            max_touch_points,
        }
    }

    #[test]
    fn ipad_user_agent_is_tablet() {
        let ua = "Mozilla/5.0 (iPad; CPU OS 12_2 like Mac OS X) AppleWebKit/605.1.15";
        assert_eq!(DeviceClass::detect(&info(ua, "iPad", 5)), DeviceClass::Tablet);
    }

    #[test]
    fn desktop_mode_ipad_is_tablet() {
        let ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15) AppleWebKit/605.1.15";
        assert_eq!(DeviceClass::detect(&info(ua, "MacIntel", 5)), DeviceClass::Tablet);
    }

    #[test]
    fn mac_without_touch_is_other() {
        let ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15) AppleWebKit/605.1.15";
        assert_eq!(DeviceClass::detect(&info(ua, "MacIntel", 0)), DeviceClass::Other);
    }

    #[test]
    fn iphone_and_ipod_are_phones() {
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 16_0 like Mac OS X)";
        let ipod = "Mozilla/5.0 (iPod touch; CPU iPhone OS 12_0 like Mac OS X)";
        assert_eq!(DeviceClass::detect(&info(iphone, "iPhone", 5)), DeviceClass::Phone);
        assert_eq!(DeviceClass::detect(&info(ipod, "iPod", 5)), DeviceClass::Phone);
    }

    #[test]
    fn android_is_other() {
        let ua = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36";
        assert_eq!(DeviceClass::detect(&info(ua, "Linux armv8l", 5)), DeviceClass::Other);
    }

    #[test]
    fn rotation_from_degrees() {
        assert_eq!(ScreenRotation::from_degrees(0), Some(ScreenRotation::Rot0));
        assert_eq!(ScreenRotation::from_degrees(90), Some(ScreenRotation::Rot90));
        assert_eq!(ScreenRotation::from_degrees(-90), Some(ScreenRotation::RotNeg90));
        assert_eq!(ScreenRotation::from_degrees(270), Some(ScreenRotation::RotNeg90));
        assert_eq!(ScreenRotation::from_degrees(180), Some(ScreenRotation::Rot180));
        assert_eq!(ScreenRotation::from_degrees(45), None);
        assert_eq!(ScreenRotation::RotNeg90.degrees(), -90);
    }
}
