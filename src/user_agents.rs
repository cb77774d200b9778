use crate::browser_record::BrowserRecord;
use crate::dataset::Dataset;
use crate::fake_ua_error::FakeUaError;
use crate::filter::filter_records;
use crate::selector::Selector;
use crate::selector_config::{SelectorConfig, UnknownBrowserPolicy};
use rand::Rng;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;
use tracing::warn;

pub const RANDOM: &str = "random";

/// Browser families reachable through a named accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrowserFamily {
    Chrome,
    Firefox,
    Safari,
    Opera,
    Edge,
    Google,
}

impl BrowserFamily {
    pub const ALL: [BrowserFamily; 6] = [
        BrowserFamily::Chrome,
        BrowserFamily::Firefox,
        BrowserFamily::Safari,
        BrowserFamily::Opera,
        BrowserFamily::Edge,
        BrowserFamily::Google,
    ];

    /// Dataset browser names belonging to the family.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            BrowserFamily::Chrome => &["Chrome", "Chrome Mobile", "Chrome Mobile iOS"],
            BrowserFamily::Firefox => &["Firefox", "Firefox Mobile", "Firefox iOS"],
            BrowserFamily::Safari => &["Safari", "Mobile Safari"],
            BrowserFamily::Opera => &["Opera", "Opera Mobile"],
            BrowserFamily::Edge => &["Edge", "Edge Mobile"],
            BrowserFamily::Google => &["Google"],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BrowserFamily::Chrome => "chrome",
            BrowserFamily::Firefox => "firefox",
            BrowserFamily::Safari => "safari",
            BrowserFamily::Opera => "opera",
            BrowserFamily::Edge => "edge",
            BrowserFamily::Google => "google",
        }
    }

    /// Canonical accessor names only, `"Chrome"` is a literal browser name.
    pub fn from_name(name: &str) -> Option<BrowserFamily> {
        match name {
            "chrome" | "googlechrome" => Some(BrowserFamily::Chrome),
            "firefox" | "ff" => Some(BrowserFamily::Firefox),
            "safari" => Some(BrowserFamily::Safari),
            "opera" => Some(BrowserFamily::Opera),
            "edge" => Some(BrowserFamily::Edge),
            "google" => Some(BrowserFamily::Google),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BrowserQuery {
    Random,
    Family(BrowserFamily),
    Browsers(Vec<String>),
}

impl BrowserQuery {
    pub fn parse(name: &str) -> BrowserQuery {
        if name == RANDOM {
            BrowserQuery::Random
        } else if let Some(family) = BrowserFamily::from_name(name) {
            BrowserQuery::Family(family)
        } else {
            BrowserQuery::Browsers(vec![name.to_string()])
        }
    }
}

impl fmt::Display for BrowserQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserQuery::Random => write!(f, "{}", RANDOM),
            BrowserQuery::Family(family) => write!(f, "{:?}", family.aliases()),
            BrowserQuery::Browsers(names) => write!(f, "{:?}", names),
        }
    }
}

/// Names starting with an underscore are internal and never treated as browsers.
pub fn is_reserved_name(name: &str) -> bool {
    name.starts_with('_')
}

/// Random User-Agent source filtered by a fixed configuration.
///
/// Every accessor draws again, nothing is remembered between calls.
#[derive(Debug)]
pub struct FakeUserAgent {
    dataset: Arc<Dataset>,
    config: SelectorConfig,
    selector: Selector,
}

impl FakeUserAgent {
    /// Embedded dataset with the default configuration.
    pub fn new() -> Result<FakeUserAgent, FakeUaError> {
        FakeUserAgent::with_config(SelectorConfig::default())
    }

    pub fn with_config(config: SelectorConfig) -> Result<FakeUserAgent, FakeUaError> {
        FakeUserAgent::with_dataset(Dataset::embedded()?, config)
    }

    pub fn with_dataset(dataset: Arc<Dataset>, config: SelectorConfig) -> Result<FakeUserAgent, FakeUaError> {
        // only requested names are checked, the defaults may exceed a custom dataset
        let unknown: Vec<String> = if config.has_explicit_browsers() {
            config
                .browsers()
                .iter()
                .filter(|name| !dataset.contains_browser(name))
                .cloned()
                .collect()
        } else {
            Vec::new()
        };
        if !unknown.is_empty() {
            match config.unknown_browsers() {
                UnknownBrowserPolicy::Reject => return Err(FakeUaError::UnknownBrowsers { names: unknown }),
                UnknownBrowserPolicy::Ignore => warn!("Ignoring browser(s) absent from the dataset: {:?}", unknown),
            }
        }
        let selector = Selector::new(config.sampling(), config.fallback_user_agent());
        Ok(FakeUserAgent {
            dataset,
            config,
            selector,
        })
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn fallback(&self) -> &BrowserRecord {
        self.selector.fallback()
    }

    pub fn is_fallback(&self, record: &BrowserRecord) -> bool {
        self.selector.is_fallback(record)
    }

    /// Records a query may draw from.
    pub fn candidates(&self, query: &BrowserQuery) -> Vec<&BrowserRecord> {
        match query {
            BrowserQuery::Random => filter_records(&self.dataset, &self.config, None),
            BrowserQuery::Family(family) => filter_records(&self.dataset, &self.config, Some(family.aliases())),
            BrowserQuery::Browsers(names) => {
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                filter_records(&self.dataset, &self.config, Some(names.as_slice()))
            }
        }
    }

    pub fn get_browser_with<R: Rng + ?Sized>(&self, query: &BrowserQuery, rng: &mut R) -> &BrowserRecord {
        let candidates = self.candidates(query);
        let chosen = self.selector.select(&candidates, rng);
        if self.selector.is_fallback(chosen) {
            warn!("No user agent available for browser(s) {}, suppressed with fallback.", query);
        }
        chosen
    }

    pub fn get_browser(&self, query: &BrowserQuery) -> &BrowserRecord {
        self.get_browser_with(query, &mut rand::thread_rng())
    }

    /// Bypass and reserved names are never looked up as browsers.
    pub fn is_bypassed(&self, name: &str) -> bool {
        is_reserved_name(name) || self.config.is_bypass_name(name)
    }

    /// Full record for a named request, `None` for bypass and reserved names.
    pub fn get(&self, name: &str) -> Option<&BrowserRecord> {
        if self.is_bypassed(name) {
            return None;
        }
        Some(self.get_browser(&BrowserQuery::parse(name)))
    }

    /// User-Agent for a named request, `None` for bypass and reserved names.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(|r| r.user_agent.as_str())
    }

    pub fn random(&self) -> &str {
        &self.get_random().user_agent
    }

    pub fn chrome(&self) -> &str {
        self.family(BrowserFamily::Chrome)
    }

    pub fn googlechrome(&self) -> &str {
        self.chrome()
    }

    pub fn firefox(&self) -> &str {
        self.family(BrowserFamily::Firefox)
    }

    pub fn ff(&self) -> &str {
        self.firefox()
    }

    pub fn safari(&self) -> &str {
        self.family(BrowserFamily::Safari)
    }

    pub fn opera(&self) -> &str {
        self.family(BrowserFamily::Opera)
    }

    pub fn edge(&self) -> &str {
        self.family(BrowserFamily::Edge)
    }

    pub fn google(&self) -> &str {
        self.family(BrowserFamily::Google)
    }

    pub fn get_random(&self) -> &BrowserRecord {
        self.get_browser(&BrowserQuery::Random)
    }

    pub fn get_chrome(&self) -> &BrowserRecord {
        self.get_family(BrowserFamily::Chrome)
    }

    pub fn get_firefox(&self) -> &BrowserRecord {
        self.get_family(BrowserFamily::Firefox)
    }

    pub fn get_safari(&self) -> &BrowserRecord {
        self.get_family(BrowserFamily::Safari)
    }

    pub fn get_opera(&self) -> &BrowserRecord {
        self.get_family(BrowserFamily::Opera)
    }

    pub fn get_edge(&self) -> &BrowserRecord {
        self.get_family(BrowserFamily::Edge)
    }

    pub fn get_google(&self) -> &BrowserRecord {
        self.get_family(BrowserFamily::Google)
    }

    fn family(&self, family: BrowserFamily) -> &str {
        &self.get_family(family).user_agent
    }

    fn get_family(&self, family: BrowserFamily) -> &BrowserRecord {
        self.get_browser(&BrowserQuery::Family(family))
    }
}

/// `ua["random"]`, `ua["chrome"]` or `ua["Chrome Mobile"]`.
///
/// Panics on bypass and reserved names, use [`FakeUserAgent::lookup`] to probe.
impl Index<&str> for FakeUserAgent {
    type Output = str;

    fn index(&self, name: &str) -> &str {
        match self.lookup(name) {
            Some(ua) => ua,
            None => panic!("'{}' is not a browser lookup", name),
        }
    }
}
