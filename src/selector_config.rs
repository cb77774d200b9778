use crate::fake_ua_error::FakeUaError;
use crate::fake_ua_error::FakeUaError::{ConfigurationTypeError, InvalidConfiguration};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_BROWSERS: [&str; 23] = [
    "Google",
    "Chrome",
    "Firefox",
    "Edge",
    "Opera",
    "Safari",
    "Android",
    "Yandex Browser",
    "Samsung Internet",
    "Opera Mobile",
    "Mobile Safari",
    "Firefox Mobile",
    "Firefox iOS",
    "Chrome Mobile",
    "Chrome Mobile iOS",
    "Mobile Safari UI/WKWebView",
    "Edge Mobile",
    "DuckDuckGo Mobile",
    "MiuiBrowser",
    "Whale",
    "Twitter",
    "Facebook",
    "Amazon Silk",
];

pub const DEFAULT_OPERATING_SYSTEMS: [&str; 7] = [
    "Windows",
    "Linux",
    "Ubuntu",
    "Chrome OS",
    "Mac OS X",
    "Android",
    "iOS",
];

pub const DEFAULT_PLATFORMS: [&str; 3] = ["desktop", "mobile", "tablet"];

pub const DEFAULT_FALLBACK: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36 Edg/122.0.0.0";

pub const DEFAULT_BYPASS_NAMES: [&str; 1] = ["shape"];

/// How one record is drawn from the candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingPolicy {
    Uniform,
    /// Proportional to each record's usage percentage.
    #[default]
    Weighted,
}

/// What to do with candidates sharing the same User-Agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    #[default]
    Keep,
    /// Only the first record of each User-Agent string survives.
    FirstSeen,
}

/// What to do with configured browser names the dataset does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownBrowserPolicy {
    #[default]
    Ignore,
    Reject,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorConfig {
    browsers: Vec<String>,
    explicit_browsers: bool,
    operating_systems: Vec<String>,
    platforms: Vec<String>,
    min_version: f64,
    min_usage_percent: f64,
    fallback_user_agent: String,
    bypass_names: Vec<String>,
    sampling: SamplingPolicy,
    duplicates: DuplicatePolicy,
    unknown_browsers: UnknownBrowserPolicy,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        SelectorConfig {
            browsers: name_set(None, &DEFAULT_BROWSERS),
            explicit_browsers: false,
            operating_systems: name_set(None, &DEFAULT_OPERATING_SYSTEMS),
            platforms: name_set(None, &DEFAULT_PLATFORMS),
            min_version: 0.0,
            min_usage_percent: 0.0,
            fallback_user_agent: DEFAULT_FALLBACK.to_string(),
            bypass_names: name_set(None, &DEFAULT_BYPASS_NAMES),
            sampling: SamplingPolicy::default(),
            duplicates: DuplicatePolicy::default(),
            unknown_browsers: UnknownBrowserPolicy::default(),
        }
    }
}

impl SelectorConfig {
    pub fn builder() -> SelectorConfigBuilder {
        SelectorConfigBuilder::default()
    }

    pub fn from_json_str(content: &str) -> Result<SelectorConfig, FakeUaError> {
        ConfigFile::from_json_str(content)?.into_builder().build()
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<SelectorConfig, FakeUaError> {
        ConfigFile::from_json_file(path)?.into_builder().build()
    }

    pub fn browsers(&self) -> &[String] {
        &self.browsers
    }

    /// Whether the browser names were supplied rather than taken from the defaults.
    pub fn has_explicit_browsers(&self) -> bool {
        self.explicit_browsers
    }

    pub fn operating_systems(&self) -> &[String] {
        &self.operating_systems
    }

    pub fn platforms(&self) -> &[String] {
        &self.platforms
    }

    pub fn min_version(&self) -> f64 {
        self.min_version
    }

    pub fn min_usage_percent(&self) -> f64 {
        self.min_usage_percent
    }

    pub fn fallback_user_agent(&self) -> &str {
        &self.fallback_user_agent
    }

    pub fn bypass_names(&self) -> &[String] {
        &self.bypass_names
    }

    pub fn is_bypass_name(&self, name: &str) -> bool {
        self.bypass_names.iter().any(|b| b == name)
    }

    pub fn sampling(&self) -> SamplingPolicy {
        self.sampling
    }

    pub fn duplicates(&self) -> DuplicatePolicy {
        self.duplicates
    }

    pub fn unknown_browsers(&self) -> UnknownBrowserPolicy {
        self.unknown_browsers
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectorConfigBuilder {
    browsers: Option<Vec<String>>,
    operating_systems: Option<Vec<String>>,
    platforms: Option<Vec<String>>,
    min_version: Option<f64>,
    min_usage_percent: Option<f64>,
    fallback_user_agent: Option<String>,
    bypass_names: Option<Vec<String>>,
    sampling: Option<SamplingPolicy>,
    duplicates: Option<DuplicatePolicy>,
    unknown_browsers: Option<UnknownBrowserPolicy>,
}

impl SelectorConfigBuilder {
    pub fn browsers<I, S>(mut self, browsers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.browsers = Some(browsers.into_iter().map(Into::into).collect());
        self
    }

    pub fn operating_systems<I, S>(mut self, operating_systems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.operating_systems = Some(operating_systems.into_iter().map(Into::into).collect());
        self
    }

    pub fn platforms<I, S>(mut self, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.platforms = Some(platforms.into_iter().map(Into::into).collect());
        self
    }

    pub fn min_version(mut self, min_version: f64) -> Self {
        self.min_version = Some(min_version);
        self
    }

    pub fn min_usage_percent(mut self, min_usage_percent: f64) -> Self {
        self.min_usage_percent = Some(min_usage_percent);
        self
    }

    pub fn fallback_user_agent(mut self, fallback: impl Into<String>) -> Self {
        self.fallback_user_agent = Some(fallback.into());
        self
    }

    pub fn bypass_names<I, S>(mut self, bypass_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bypass_names = Some(bypass_names.into_iter().map(Into::into).collect());
        self
    }

    pub fn sampling(mut self, sampling: SamplingPolicy) -> Self {
        self.sampling = Some(sampling);
        self
    }

    pub fn duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = Some(duplicates);
        self
    }

    pub fn unknown_browsers(mut self, unknown_browsers: UnknownBrowserPolicy) -> Self {
        self.unknown_browsers = Some(unknown_browsers);
        self
    }

    pub fn build(self) -> Result<SelectorConfig, FakeUaError> {
        let fallback_user_agent = match self.fallback_user_agent {
            Some(fallback) if fallback.trim().is_empty() => {
                return Err(InvalidConfiguration {
                    message: "'fallback' must be a non-empty string".to_string(),
                })
            }
            Some(fallback) => fallback,
            None => DEFAULT_FALLBACK.to_string(),
        };

        let min_version = finite("min_version", self.min_version.unwrap_or(0.0))?;
        let min_usage_percent = finite("min_percentage", self.min_usage_percent.unwrap_or(0.0))?;

        // an explicit empty list disables bypassing, unlike the other sets
        let bypass_names = match self.bypass_names {
            Some(names) => dedup(names.into_iter().filter(|n| !n.is_empty()).collect()),
            None => name_set(None, &DEFAULT_BYPASS_NAMES),
        };

        let explicit_browsers = self.browsers.as_ref().is_some_and(|b| !b.is_empty());

        Ok(SelectorConfig {
            browsers: name_set(self.browsers, &DEFAULT_BROWSERS),
            explicit_browsers,
            operating_systems: name_set(self.operating_systems, &DEFAULT_OPERATING_SYSTEMS),
            platforms: name_set(self.platforms, &DEFAULT_PLATFORMS),
            min_version,
            min_usage_percent,
            fallback_user_agent,
            bypass_names,
            sampling: self.sampling.unwrap_or_default(),
            duplicates: self.duplicates.unwrap_or_default(),
            unknown_browsers: self.unknown_browsers.unwrap_or_default(),
        })
    }
}

/// A single name or a list of names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(name) => vec![name],
            OneOrMany::Many(names) => names,
        }
    }
}

/// On-disk JSON form of the selector configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub browsers: Option<OneOrMany>,
    pub os: Option<OneOrMany>,
    pub platforms: Option<OneOrMany>,
    pub min_version: Option<f64>,
    pub min_percentage: Option<f64>,
    pub fallback: Option<String>,
    #[serde(alias = "bypass_names")]
    pub safe_attrs: Option<Vec<String>>,
    pub sampling: Option<SamplingPolicy>,
    pub duplicates: Option<DuplicatePolicy>,
    pub unknown_browsers: Option<UnknownBrowserPolicy>,
}

impl ConfigFile {
    pub fn from_json_str(content: &str) -> Result<ConfigFile, FakeUaError> {
        serde_json::from_str(content).map_err(|e| ConfigurationTypeError { e })
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<ConfigFile, FakeUaError> {
        let content = std::fs::read_to_string(path)?;
        ConfigFile::from_json_str(&content)
    }

    pub fn into_builder(self) -> SelectorConfigBuilder {
        SelectorConfigBuilder {
            browsers: self.browsers.map(OneOrMany::into_vec),
            operating_systems: self.os.map(OneOrMany::into_vec),
            platforms: self.platforms.map(OneOrMany::into_vec),
            min_version: self.min_version,
            min_usage_percent: self.min_percentage,
            fallback_user_agent: self.fallback,
            bypass_names: self.safe_attrs,
            sampling: self.sampling,
            duplicates: self.duplicates,
            unknown_browsers: self.unknown_browsers,
        }
    }
}

fn finite(name: &str, value: f64) -> Result<f64, FakeUaError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvalidConfiguration {
            message: format!("'{}' must be a finite number but got {}", name, value),
        })
    }
}

// empty input falls back to the built-in defaults
fn name_set(values: Option<Vec<String>>, defaults: &[&str]) -> Vec<String> {
    match values {
        Some(values) if !values.is_empty() => dedup(values),
        _ => defaults.iter().map(|s| s.to_string()).collect(),
    }
}

fn dedup(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

#[cfg(test)]
mod selector_config_tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SelectorConfig::default();
        assert_eq!(config.browsers().len(), 23);
        assert_eq!(config.operating_systems().len(), 7);
        assert_eq!(config.platforms(), ["desktop", "mobile", "tablet"]);
        assert_eq!(config.min_version(), 0.0);
        assert_eq!(config.min_usage_percent(), 0.0);
        assert_eq!(config.fallback_user_agent(), DEFAULT_FALLBACK);
        assert_eq!(config.bypass_names(), ["shape"]);
        assert_eq!(config.sampling(), SamplingPolicy::Weighted);
        assert_eq!(config.duplicates(), DuplicatePolicy::Keep);
        assert_eq!(config.unknown_browsers(), UnknownBrowserPolicy::Ignore);
        assert_eq!(SelectorConfig::builder().build().unwrap(), config);
    }

    #[test]
    fn empty_sets_use_defaults() {
        let config = SelectorConfig::builder()
            .browsers(Vec::<String>::new())
            .operating_systems(Vec::<String>::new())
            .platforms(Vec::<String>::new())
            .build()
            .unwrap();
        assert_eq!(config.browsers().len(), DEFAULT_BROWSERS.len());
        assert!(!config.has_explicit_browsers());
        assert_eq!(config.operating_systems().len(), DEFAULT_OPERATING_SYSTEMS.len());
        assert_eq!(config.platforms().len(), DEFAULT_PLATFORMS.len());
    }

    #[test]
    fn sets_are_deduplicated_in_order() {
        let config = SelectorConfig::builder()
            .browsers(["Firefox", "Chrome", "Firefox"])
            .build()
            .unwrap();
        assert_eq!(config.browsers(), ["Firefox", "Chrome"]);
        assert!(config.has_explicit_browsers());
    }

    #[test]
    fn empty_fallback_is_rejected() {
        let res = SelectorConfig::builder().fallback_user_agent("   ").build();
        match res {
            Err(FakeUaError::InvalidConfiguration { message }) => {
                assert_eq!(message, "'fallback' must be a non-empty string")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn non_finite_thresholds_are_rejected() {
        assert!(SelectorConfig::builder().min_version(f64::NAN).build().is_err());
        assert!(SelectorConfig::builder()
            .min_usage_percent(f64::INFINITY)
            .build()
            .is_err());
    }

    #[test]
    fn explicit_empty_bypass_list() {
        let config = SelectorConfig::builder()
            .bypass_names(Vec::<String>::new())
            .build()
            .unwrap();
        assert!(config.bypass_names().is_empty());
        assert!(!config.is_bypass_name("shape"));
    }

    #[test]
    fn json_single_string_or_list() {
        let config = SelectorConfig::from_json_str(
            r#"{"browsers": "Chrome", "os": ["Windows", "Mac OS X"], "min_version": 131, "min_percentage": 0.5}"#,
        )
        .unwrap();
        assert_eq!(config.browsers(), ["Chrome"]);
        assert_eq!(config.operating_systems(), ["Windows", "Mac OS X"]);
        assert_eq!(config.min_version(), 131.0);
        assert_eq!(config.min_usage_percent(), 0.5);
    }

    #[test]
    fn json_policies() {
        let config = SelectorConfig::from_json_str(
            r#"{"sampling": "uniform", "duplicates": "first_seen", "unknown_browsers": "reject", "bypass_names": ["shape", "dtype"]}"#,
        )
        .unwrap();
        assert_eq!(config.sampling(), SamplingPolicy::Uniform);
        assert_eq!(config.duplicates(), DuplicatePolicy::FirstSeen);
        assert_eq!(config.unknown_browsers(), UnknownBrowserPolicy::Reject);
        assert!(config.is_bypass_name("dtype"));
    }

    #[test]
    fn json_non_string_fallback_is_a_type_error() {
        let res = SelectorConfig::from_json_str(r#"{"fallback": 42}"#);
        assert!(matches!(res, Err(FakeUaError::ConfigurationTypeError { .. })));
    }

    #[test]
    fn json_non_string_bypass_entry_is_a_type_error() {
        let res = SelectorConfig::from_json_str(r#"{"safe_attrs": ["shape", 7]}"#);
        assert!(matches!(res, Err(FakeUaError::ConfigurationTypeError { .. })));
    }

    #[test]
    fn json_unknown_key_is_rejected() {
        let res = SelectorConfig::from_json_str(r#"{"browser": "Chrome"}"#);
        assert!(matches!(res, Err(FakeUaError::ConfigurationTypeError { .. })));
    }
}
