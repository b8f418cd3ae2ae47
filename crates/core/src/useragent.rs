//! User-Agent string classification.
//!
//! Pattern matching over well-known product tokens. Order matters: Edge and
//! Opera also advertise `Chrome/`, Chrome advertises `Safari/`, and so on.

use regex::Regex;
use serde::Serialize;

const UNKNOWN: &str = "Unknown";

/// Browsers identified by a single `Token/version` pattern, in priority order.
const BROWSER_TOKENS: &[(&str, &str)] = &[
    (r"Edg/(\S+)", "Microsoft Edge"),
    (r"OPR/(\S+)", "Opera"),
    (r"Opera/(\S+)", "Opera"),
    (r"SamsungBrowser/(\S+)", "Samsung Internet"),
    (r"UCBrowser/(\S+)", "UC Browser"),
    (r"YaBrowser/(\S+)", "Yandex Browser"),
    (r"CriOS/(\S+)", "Chrome (iOS)"),
    (r"FxiOS/(\S+)", "Firefox (iOS)"),
    (r"Firefox/(\S+)", "Firefox"),
];

const WINDOWS_VERSIONS: &[(&str, &str)] = &[
    ("10.0", "10/11"),
    ("6.3", "8.1"),
    ("6.2", "8"),
    ("6.1", "7"),
    ("6.0", "Vista"),
    ("5.2", "XP x64"),
    ("5.1", "XP"),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserAgentError {
    #[error("User-Agent string is empty")]
    Empty,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Component {
    pub name: String,
    pub version: String,
}

impl Component {
    fn new(name: &str, version: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            version: version.into(),
        }
    }

    fn unknown() -> Self {
        Self::new(UNKNOWN, "")
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Device {
    #[serde(rename = "type")]
    pub device_type: String,
    pub vendor: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserAgent {
    pub browser: Component,
    pub engine: Component,
    pub os: Component,
    pub device: Device,
    pub raw: String,
}

/// First capture group of `pattern` in `text`.
fn capture(text: &str, pattern: &str) -> Option<String> {
    Regex::new(pattern)
        .ok()?
        .captures(text)?
        .get(1)
        .map(|m| m.as_str().to_string())
}

fn is_match(text: &str, pattern: &str) -> bool {
    Regex::new(pattern).map(|re| re.is_match(text)).unwrap_or(false)
}

fn detect_browser(ua: &str) -> Component {
    for (pattern, name) in BROWSER_TOKENS {
        if let Some(version) = capture(ua, pattern) {
            return Component::new(name, version);
        }
    }

    if !ua.contains("Chromium") {
        if let Some(version) = capture(ua, r"Chrome/(\S+)") {
            return Component::new("Chrome", version);
        }
    }
    if let Some(version) = capture(ua, r"Chromium/(\S+)") {
        return Component::new("Chromium", version);
    }
    if is_match(ua, r"Version/\S+.*Safari") {
        let version = capture(ua, r"Version/(\S+)").unwrap_or_default();
        return Component::new("Safari", version);
    }
    if is_match(ua, r"MSIE \S+") || is_match(ua, r"Trident.*rv:\S+") {
        let version = capture(ua, r"MSIE ([\d.]+)")
            .or_else(|| capture(ua, r"rv:([\d.]+)"))
            .unwrap_or_default();
        return Component::new("Internet Explorer", version);
    }

    Component::unknown()
}

fn detect_engine(ua: &str) -> Component {
    if is_match(ua, r"Gecko/\S+") && ua.contains("Firefox") {
        return Component::new("Gecko", capture(ua, r"rv:([\d.]+)").unwrap_or_default());
    }
    if let Some(version) = capture(ua, r"AppleWebKit/([\d.]+)") {
        let name = if ua.contains("Chrome") || ua.contains("Chromium") {
            "Blink"
        } else {
            "WebKit"
        };
        return Component::new(name, version);
    }
    if let Some(version) = capture(ua, r"Trident/([\d.]+)") {
        return Component::new("Trident", version);
    }
    if let Some(version) = capture(ua, r"Presto/([\d.]+)") {
        return Component::new("Presto", version);
    }

    Component::unknown()
}

fn detect_os(ua: &str) -> Component {
    if let Some(nt) = capture(ua, r"Windows NT ([\d.]+)") {
        let version = WINDOWS_VERSIONS
            .iter()
            .find(|(kernel, _)| *kernel == nt)
            .map(|(_, marketing)| marketing.to_string())
            .unwrap_or(nt);
        return Component::new("Windows", version);
    }
    if let Some(version) = capture(ua, r"Android ([\d.]+)") {
        return Component::new("Android", version);
    }
    if is_match(ua, r"iPhone OS [\d_]+") || is_match(ua, r"(?:iPad|iPod).*OS [\d_]+") {
        let version = capture(ua, r"(?:iPhone OS|CPU OS|iPod.*OS) ([\d_]+)")
            .map(|v| v.replace('_', "."))
            .unwrap_or_default();
        return Component::new("iOS", version);
    }
    if let Some(version) = capture(ua, r"Mac OS X ([\d_.]+)") {
        return Component::new("macOS", version.replace('_', "."));
    }
    if ua.contains("Linux") {
        let name = if ua.contains("Ubuntu") {
            "Ubuntu"
        } else if ua.contains("Fedora") {
            "Fedora"
        } else if ua.contains("CrOS") {
            "Chrome OS"
        } else {
            "Linux"
        };
        return Component::new(name, "");
    }
    if ua.contains("CrOS") {
        return Component::new("Chrome OS", "");
    }

    Component::unknown()
}

fn detect_device(ua: &str) -> Device {
    let device_type = if ua.contains("Mobi") {
        "Mobile"
    } else if ua.contains("iPad") || ua.contains("Tablet") || ua.contains("tablet") {
        "Tablet"
    } else if ua.contains("Android") {
        // Android without a Mobile token is a tablet by convention
        "Tablet"
    } else {
        "Desktop"
    };

    let (vendor, model) = if ua.contains("iPhone") {
        ("Apple", "iPhone".to_string())
    } else if ua.contains("iPad") {
        ("Apple", "iPad".to_string())
    } else if ua.contains("iPod") {
        ("Apple", "iPod".to_string())
    } else if let Some(model) = capture(ua, r"Pixel (\w+)") {
        ("Google", format!("Pixel {model}"))
    } else if let Some(model) = capture(ua, r"SM-(\w+)") {
        ("Samsung", model)
    } else if let Some(model) = capture(ua, r"Nexus (\d+)") {
        ("Google", format!("Nexus {model}"))
    } else {
        ("", String::new())
    };

    Device {
        device_type: device_type.to_string(),
        vendor: vendor.to_string(),
        model,
    }
}

pub fn parse(ua: &str) -> Result<UserAgent, UserAgentError> {
    let ua = ua.trim();
    if ua.is_empty() {
        return Err(UserAgentError::Empty);
    }

    Ok(UserAgent {
        browser: detect_browser(ua),
        engine: detect_engine(ua),
        os: detect_os(ua),
        device: detect_device(ua),
        raw: ua.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_MAC: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";
    const FIREFOX_WIN: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:123.0) Gecko/20100101 Firefox/123.0";
    const SAFARI_IOS: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_3 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.3 Mobile/15E148 Safari/604.1";
    const EDGE_WIN: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36 Edg/122.0.0.0";
    const ANDROID_CHROME: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.6261.105 Mobile Safari/537.36";
    const IPAD_SAFARI: &str = "Mozilla/5.0 (iPad; CPU OS 16_6 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.6 Mobile/15E148 Safari/604.1";
    const IE11: &str = "Mozilla/5.0 (Windows NT 6.1; WOW64; Trident/7.0; rv:11.0) like Gecko";
    const SAMSUNG_TABLET: &str = "Mozilla/5.0 (Linux; Android 13; SM-X700) AppleWebKit/537.36 (KHTML, like Gecko) SamsungBrowser/23.0 Chrome/115.0.0.0 Safari/537.36";

    #[test]
    fn test_parse_chrome_mac() {
        let ua = parse(CHROME_MAC).unwrap();
        assert_eq!(ua.browser, Component::new("Chrome", "122.0.0.0"));
        assert_eq!(ua.engine, Component::new("Blink", "537.36"));
        assert_eq!(ua.os, Component::new("macOS", "10.15.7"));
        assert_eq!(ua.device.device_type, "Desktop");
    }

    #[test]
    fn test_parse_firefox_windows() {
        let ua = parse(FIREFOX_WIN).unwrap();
        assert_eq!(ua.browser, Component::new("Firefox", "123.0"));
        assert_eq!(ua.engine, Component::new("Gecko", "123.0"));
        assert_eq!(ua.os, Component::new("Windows", "10/11"));
    }

    #[test]
    fn test_parse_safari_iphone() {
        let ua = parse(SAFARI_IOS).unwrap();
        assert_eq!(ua.browser, Component::new("Safari", "17.3"));
        assert_eq!(ua.engine, Component::new("WebKit", "605.1.15"));
        assert_eq!(ua.os, Component::new("iOS", "17.3"));
        assert_eq!(ua.device.device_type, "Mobile");
        assert_eq!(ua.device.vendor, "Apple");
        assert_eq!(ua.device.model, "iPhone");
    }

    #[test]
    fn test_parse_ipad_reports_os_version() {
        let ua = parse(IPAD_SAFARI).unwrap();
        assert_eq!(ua.os, Component::new("iOS", "16.6"));
        // iPad Safari still sends a Mobile/ token
        assert_eq!(ua.device.model, "iPad");
    }

    #[test]
    fn test_parse_edge_wins_over_chrome() {
        let ua = parse(EDGE_WIN).unwrap();
        assert_eq!(ua.browser, Component::new("Microsoft Edge", "122.0.0.0"));
        assert_eq!(ua.engine.name, "Blink");
    }

    #[test]
    fn test_parse_android_pixel() {
        let ua = parse(ANDROID_CHROME).unwrap();
        assert_eq!(ua.browser, Component::new("Chrome", "122.0.6261.105"));
        assert_eq!(ua.os, Component::new("Android", "14"));
        assert_eq!(ua.device.device_type, "Mobile");
        assert_eq!(ua.device.vendor, "Google");
        assert_eq!(ua.device.model, "Pixel 8");
    }

    #[test]
    fn test_parse_internet_explorer() {
        let ua = parse(IE11).unwrap();
        assert_eq!(ua.browser, Component::new("Internet Explorer", "11.0"));
        assert_eq!(ua.engine, Component::new("Trident", "7.0"));
        assert_eq!(ua.os, Component::new("Windows", "7"));
    }

    #[test]
    fn test_parse_samsung_tablet() {
        let ua = parse(SAMSUNG_TABLET).unwrap();
        assert_eq!(ua.browser, Component::new("Samsung Internet", "23.0"));
        assert_eq!(ua.device.device_type, "Tablet");
        assert_eq!(ua.device.vendor, "Samsung");
        assert_eq!(ua.device.model, "X700");
    }

    #[test]
    fn test_parse_unknown_agent() {
        let ua = parse("curl/8.4.0").unwrap();
        assert_eq!(ua.browser, Component::unknown());
        assert_eq!(ua.engine, Component::unknown());
        assert_eq!(ua.os, Component::unknown());
        assert_eq!(ua.device.device_type, "Desktop");
        assert_eq!(ua.raw, "curl/8.4.0");
    }

    #[test]
    fn test_parse_linux_distributions() {
        let ua = parse("Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0")
            .unwrap();
        assert_eq!(ua.os.name, "Ubuntu");
        let ua = parse("Mozilla/5.0 (X11; CrOS x86_64 14541.0.0) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .unwrap();
        assert_eq!(ua.os.name, "Chrome OS");
    }

    #[test]
    fn test_parse_empty_is_error() {
        assert_eq!(parse("   ").unwrap_err(), UserAgentError::Empty);
    }
}
