use crate::browser_record::BrowserRecord;
use crate::dataset::Dataset;
use crate::selector_config::{DuplicatePolicy, SelectorConfig};
use std::collections::HashSet;

/// Narrows the dataset to the records matching the configuration.
///
/// `browser_override` narrows the configured browsers for this call only.
/// Dataset order is preserved and an empty result is not an error.
pub fn filter_records<'a>(
    dataset: &'a Dataset,
    config: &SelectorConfig,
    browser_override: Option<&[&str]>,
) -> Vec<&'a BrowserRecord> {
    let matching = dataset
        .iter()
        .filter(|r| matches(r, config))
        .filter(|r| match browser_override {
            Some(names) => names.contains(&r.browser_name.as_str()),
            None => true,
        })
        .collect();
    apply_duplicate_policy(matching, config.duplicates())
}

pub fn matches(record: &BrowserRecord, config: &SelectorConfig) -> bool {
    config.browsers().contains(&record.browser_name)
        && config.operating_systems().contains(&record.os_name)
        && config.platforms().contains(&record.device_type)
        && record.browser_version_major_minor >= config.min_version()
        && record.usage_percent >= config.min_usage_percent()
}

pub fn apply_duplicate_policy(records: Vec<&BrowserRecord>, policy: DuplicatePolicy) -> Vec<&BrowserRecord> {
    match policy {
        DuplicatePolicy::Keep => records,
        DuplicatePolicy::FirstSeen => {
            let mut seen = HashSet::with_capacity(records.len());
            records
                .into_iter()
                .filter(|&r| seen.insert(r.user_agent.as_str()))
                .collect()
        }
    }
}
