use crate::browser_record::BrowserRecord;
use crate::fake_ua_error::FakeUaError;
use crate::fake_ua_error::FakeUaError::{
    DatasetNotFound, DatasetParseError, EmptyDataset, InvalidRecord, InvalidRecordEntry,
};
use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

const EMBEDDED_BROWSERS: &str = include_str!("../data/browsers.jsonl");

static EMBEDDED: OnceCell<Arc<Dataset>> = OnceCell::new();

/// Immutable, ordered collection of browser usage records.
#[derive(Debug)]
pub struct Dataset {
    records: Vec<BrowserRecord>,
}

impl Dataset {
    /// The dataset bundled with the crate, parsed on first use and shared afterwards.
    pub fn embedded() -> Result<Arc<Dataset>, FakeUaError> {
        EMBEDDED
            .get_or_try_init(|| {
                let dataset = Dataset::from_jsonl(EMBEDDED_BROWSERS)?;
                debug!("Loaded {} embedded browser records", dataset.len());
                Ok::<_, FakeUaError>(Arc::new(dataset))
            })
            .cloned()
    }

    /// Loads a dataset file, either JSON lines or a single JSON array.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Dataset, FakeUaError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DatasetNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let dataset = Dataset::parse(&content)?;
        debug!("Loaded {} browser records from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    pub fn parse(content: &str) -> Result<Dataset, FakeUaError> {
        if content.trim_start().starts_with('[') {
            Dataset::from_json_array(content)
        } else {
            Dataset::from_jsonl(content)
        }
    }

    /// One record per line, blank lines are skipped.
    pub fn from_jsonl(content: &str) -> Result<Dataset, FakeUaError> {
        let mut records = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: BrowserRecord =
                serde_json::from_str(line).map_err(|e| DatasetParseError { line: idx + 1, e })?;
            record
                .validate()
                .map_err(|message| InvalidRecord { line: idx + 1, message })?;
            records.push(record);
        }
        Dataset::non_empty(records)
    }

    pub fn from_json_array(content: &str) -> Result<Dataset, FakeUaError> {
        let records: Vec<BrowserRecord> = serde_json::from_str(content).map_err(|e| DatasetParseError {
            line: e.line(),
            e,
        })?;
        Dataset::from_records(records)
    }

    /// Records are reported by their 0-based position when invalid.
    pub fn from_records(records: Vec<BrowserRecord>) -> Result<Dataset, FakeUaError> {
        for (index, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|message| InvalidRecordEntry { index, message })?;
        }
        Dataset::non_empty(records)
    }

    fn non_empty(records: Vec<BrowserRecord>) -> Result<Dataset, FakeUaError> {
        if records.is_empty() {
            Err(EmptyDataset)
        } else {
            Ok(Dataset { records })
        }
    }

    pub fn records(&self) -> &[BrowserRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &BrowserRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    // construction refuses empty input
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains_browser(&self, browser_name: &str) -> bool {
        self.records.iter().any(|r| r.browser_name == browser_name)
    }

    /// Distinct browser names in order of first appearance.
    pub fn browser_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for record in &self.records {
            if !names.contains(&record.browser_name.as_str()) {
                names.push(record.browser_name.as_str());
            }
        }
        names
    }
}

#[cfg(test)]
pub(crate) mod dataset_tests {
    use super::*;
    use std::io::Write;

    pub(crate) fn record(ua: &str, percent: f64, browser: &str, os: &str, device: &str, version: f64) -> BrowserRecord {
        BrowserRecord {
            user_agent: ua.to_string(),
            usage_percent: percent,
            device_type: device.to_string(),
            device_brand: None,
            browser_name: browser.to_string(),
            browser_version: format!("{}.0.0.0", version),
            browser_version_major_minor: version,
            os_name: os.to_string(),
            os_version: None,
            platform: "Win32".to_string(),
        }
    }

    #[test]
    fn embedded_dataset_loads() {
        let dataset = Dataset::embedded().unwrap();
        assert!(dataset.len() > 40);
        assert!(dataset.iter().all(|r| r.usage_percent >= 0.0));
        assert!(dataset.contains_browser("Chrome"));
        assert!(dataset.contains_browser("Mobile Safari"));
        assert!(!dataset.contains_browser("Nonexistent"));
    }

    #[test]
    fn embedded_dataset_is_shared() {
        let first = Dataset::embedded().unwrap();
        let second = Dataset::embedded().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn embedded_dataset_has_repeated_user_agents() {
        let dataset = Dataset::embedded().unwrap();
        let mut seen = std::collections::HashSet::new();
        let repeated = dataset.iter().any(|r| !seen.insert(r.user_agent.as_str()));
        assert!(repeated);
    }

    #[test]
    fn jsonl_skips_blank_lines() {
        let content = r#"
{"useragent":"A","percent":1.0,"type":"desktop","device_brand":null,"browser":"Chrome","browser_version":"130.0.0.0","browser_version_major_minor":130.0,"os":"Windows","os_version":null,"platform":"Win32"}

{"useragent":"B","percent":2.0,"type":"mobile","device_brand":"Apple","browser":"Mobile Safari","browser_version":"18.1","browser_version_major_minor":18.1,"os":"iOS","os_version":"18.1","platform":"iPhone"}
"#;
        let dataset = Dataset::parse(content).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[0].user_agent, "A");
        assert_eq!(dataset.records()[1].user_agent, "B");
        assert_eq!(dataset.browser_names(), vec!["Chrome", "Mobile Safari"]);
    }

    #[test]
    fn json_array_is_accepted() {
        let content = r#"[
  {"useragent":"A","percent":1.0,"type":"desktop","device_brand":null,"browser":"Chrome","browser_version":"130.0.0.0","browser_version_major_minor":130.0,"os":"Windows","os_version":null,"platform":"Win32"}
]"#;
        let dataset = Dataset::parse(content).unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn empty_content_is_rejected() {
        assert!(matches!(Dataset::parse(""), Err(FakeUaError::EmptyDataset)));
        assert!(matches!(Dataset::parse("\n  \n"), Err(FakeUaError::EmptyDataset)));
        assert!(matches!(Dataset::parse("[]"), Err(FakeUaError::EmptyDataset)));
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let content = "{\"useragent\":\"A\"}\n";
        match Dataset::parse(content) {
            Err(FakeUaError::DatasetParseError { line, .. }) => assert_eq!(line, 1),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn negative_percent_is_rejected() {
        let records = vec![
            record("A", 1.0, "Chrome", "Windows", "desktop", 130.0),
            record("B", -1.0, "Chrome", "Windows", "desktop", 130.0),
        ];
        match Dataset::from_records(records) {
            Err(FakeUaError::InvalidRecordEntry { index, message }) => {
                assert_eq!(index, 1);
                assert!(message.contains("percent"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn invalid_jsonl_record_reports_line_number() {
        let content = concat!(
            "\n",
            r#"{"useragent":"A","percent":-2.0,"type":"desktop","device_brand":null,"browser":"Chrome","browser_version":"130.0.0.0","browser_version_major_minor":130.0,"os":"Windows","os_version":null,"platform":"Win32"}"#,
            "\n"
        );
        match Dataset::parse(content) {
            Err(FakeUaError::InvalidRecord { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn invalid_array_record_reports_index() {
        let content = r#"[
  {"useragent":"A","percent":1.0,"type":"desktop","device_brand":null,"browser":"Chrome","browser_version":"130.0.0.0","browser_version_major_minor":130.0,"os":"Windows","os_version":null,"platform":"Win32"},
  {"useragent":"","percent":1.0,"type":"desktop","device_brand":null,"browser":"Chrome","browser_version":"130.0.0.0","browser_version_major_minor":130.0,"os":"Windows","os_version":null,"platform":"Win32"}
]"#;
        match Dataset::parse(content) {
            Err(FakeUaError::InvalidRecordEntry { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_rejected() {
        let res = Dataset::from_path("/definitely/not/here/browsers.jsonl");
        assert!(matches!(res, Err(FakeUaError::DatasetNotFound { .. })));
    }

    #[test]
    fn file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"useragent":"A","percent":1.0,"type":"desktop","device_brand":null,"browser":"Chrome","browser_version":"130.0.0.0","browser_version_major_minor":130.0,"os":"Windows","os_version":null,"platform":"Win32"}}"#
        )
        .unwrap();
        let dataset = Dataset::from_path(file.path()).unwrap();
        assert_eq!(dataset.len(), 1);
    }
}
