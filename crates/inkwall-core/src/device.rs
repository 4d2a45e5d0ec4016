//! Device classification capability.

/// Decides whether the session runs on a mobile-class device.
///
/// Kept behind a trait so the heuristic can be swapped out and the viewport
/// gate tested without any user-agent plumbing.
pub trait DeviceClassifier {
    fn is_mobile(&self) -> bool;
}

/// User-agent markers that indicate a mobile device.
const MOBILE_UA_MARKERS: &[&str] = &["iPhone", "iPod", "BlackBerry", "IEMobile", "Opera Mini"];

/// Heuristic classifier over a user-agent string and touch capability.
///
/// A device is mobile when its user agent carries a mobile marker and touch
/// input is actually present; touch-capable laptops stay desktop-class.
#[derive(Debug, Clone)]
pub struct UserAgentClassifier {
    user_agent: String,
    max_touch_points: u32,
}

impl UserAgentClassifier {
    pub fn new(user_agent: impl Into<String>, max_touch_points: u32) -> Self {
        Self {
            user_agent: user_agent.into(),
            max_touch_points,
        }
    }

    fn ua_indicates_mobile(&self) -> bool {
        let ua = self.user_agent.as_str();
        MOBILE_UA_MARKERS.iter().any(|marker| ua.contains(marker))
            || (ua.contains("Android") && ua.contains("Mobile"))
    }
}

impl DeviceClassifier for UserAgentClassifier {
    fn is_mobile(&self) -> bool {
        self.ua_indicates_mobile() && self.max_touch_points > 0
    }
}

/// Fixed answer, for tests and embedders that already know the device class.
#[derive(Debug, Clone, Copy)]
pub struct FixedClassifier(pub bool);

impl DeviceClassifier for FixedClassifier {
    fn is_mobile(&self) -> bool {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE_UA: &str =
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";
    const ANDROID_PHONE_UA: &str =
        "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Mobile Safari/537.36";
    const DESKTOP_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

    #[test]
    fn test_iphone_with_touch_is_mobile() {
        assert!(UserAgentClassifier::new(IPHONE_UA, 5).is_mobile());
    }

    #[test]
    fn test_android_phone_is_mobile() {
        assert!(UserAgentClassifier::new(ANDROID_PHONE_UA, 5).is_mobile());
    }

    #[test]
    fn test_desktop_is_not_mobile() {
        assert!(!UserAgentClassifier::new(DESKTOP_UA, 0).is_mobile());
    }

    #[test]
    fn test_mobile_ua_without_touch_is_not_mobile() {
        // Both signals are required, not just the user agent.
        assert!(!UserAgentClassifier::new(IPHONE_UA, 0).is_mobile());
    }

    #[test]
    fn test_touch_laptop_is_not_mobile() {
        assert!(!UserAgentClassifier::new(DESKTOP_UA, 10).is_mobile());
    }

    #[test]
    fn test_fixed_classifier() {
        assert!(FixedClassifier(true).is_mobile());
        assert!(!FixedClassifier(false).is_mobile());
    }
}
