mod args;

use crate::args::get_args;
use fake_ua::fake_ua_error::FakeUaError;
use fake_ua::fake_ua_error::FakeUaError::CliArgumentError;
use fake_ua::{BrowserQuery, Dataset, DiversityReport, FakeUserAgent};
use std::io::Write;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<(), FakeUaError> {
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = get_args()?;
    let dataset = match &args.data {
        Some(path) => Arc::new(Dataset::from_path(path)?),
        None => Dataset::embedded()?,
    };
    let ua = FakeUserAgent::with_dataset(dataset, args.config)?;
    if ua.is_bypassed(&args.query) {
        return Err(CliArgumentError {
            message: format!("'{}' is not a browser query", args.query),
        });
    }
    let query = BrowserQuery::parse(&args.query);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut drawn: Vec<&str> = Vec::with_capacity(args.count);
    for _ in 0..args.count {
        let record = ua.get_browser(&query);
        if args.json {
            writeln!(out, "{}", serde_json::to_string(record)?)?;
        } else {
            writeln!(out, "{}", record.user_agent)?;
        }
        drawn.push(record.user_agent.as_str());
    }

    if args.stats {
        writeln!(out, "{}", DiversityReport::from_samples(&drawn))?;
    }
    Ok(())
}
