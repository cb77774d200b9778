//! Realistic random User-Agent strings drawn from real-world browser usage statistics.
//!
//! ```no_run
//! use fake_ua::{FakeUserAgent, SelectorConfig};
//!
//! let config = SelectorConfig::builder()
//!     .browsers(["Chrome", "Firefox", "Edge"])
//!     .operating_systems(["Windows", "Mac OS X"])
//!     .min_version(131.0)
//!     .build()?;
//! let ua = FakeUserAgent::with_config(config)?;
//! println!("{}", ua.random());
//! println!("{}", ua.chrome());
//! println!("{}", &ua["Samsung Internet"]);
//! // bypass names are not browsers: `lookup` gives `None`, `ua["shape"]` panics
//! assert_eq!(ua.lookup("shape"), None);
//! # Ok::<(), fake_ua::FakeUaError>(())
//! ```
//!
//! Index access panics for bypass names (`"shape"` by default) and names starting
//! with an underscore, like indexing a `HashMap` with a missing key.
//! Use [`FakeUserAgent::lookup`] when the name comes from untrusted input.

pub mod browser_record;
pub mod dataset;
pub mod diversity;
pub mod fake_ua_error;
pub mod filter;
pub mod selector;
pub mod selector_config;
pub mod user_agents;

pub use browser_record::BrowserRecord;
pub use dataset::Dataset;
pub use diversity::DiversityReport;
pub use fake_ua_error::FakeUaError;
pub use filter::filter_records;
pub use selector::Selector;
pub use selector_config::{DuplicatePolicy, SamplingPolicy, SelectorConfig, UnknownBrowserPolicy};
pub use user_agents::{BrowserFamily, BrowserQuery, FakeUserAgent};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
