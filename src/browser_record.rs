use serde::{Deserialize, Serialize};

/// One observed browser/OS/version combination with its real-world usage share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserRecord {
    #[serde(rename = "useragent")]
    pub user_agent: String,
    #[serde(rename = "percent")]
    pub usage_percent: f64,
    #[serde(rename = "type")]
    pub device_type: String,
    pub device_brand: Option<String>,
    #[serde(rename = "browser")]
    pub browser_name: String,
    pub browser_version: String,
    pub browser_version_major_minor: f64,
    #[serde(rename = "os")]
    pub os_name: String,
    pub os_version: Option<String>,
    pub platform: String,
}

impl BrowserRecord {
    /// Record returned when no candidate matches a query.
    pub fn fallback(user_agent: &str) -> BrowserRecord {
        BrowserRecord {
            user_agent: user_agent.to_string(),
            usage_percent: 100.0,
            device_type: "desktop".to_string(),
            device_brand: None,
            browser_name: "Edge".to_string(),
            browser_version: "122.0.0.0".to_string(),
            browser_version_major_minor: 122.0,
            os_name: "win32".to_string(),
            os_version: Some("10".to_string()),
            platform: "Win32".to_string(),
        }
    }

    // a usable record needs a header value and a finite, non-negative weight
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.user_agent.trim().is_empty() {
            return Err("'useragent' must not be empty".to_string());
        }
        if !self.usage_percent.is_finite() || self.usage_percent < 0.0 {
            return Err(format!(
                "'percent' must be a non-negative number but got {}",
                self.usage_percent
            ));
        }
        if !self.browser_version_major_minor.is_finite() {
            return Err("'browser_version_major_minor' must be a finite number".to_string());
        }
        Ok(())
    }
}
