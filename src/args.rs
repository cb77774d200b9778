use clap::{crate_version, value_parser, Arg, ArgAction, ArgMatches, Command};
use fake_ua::fake_ua_error::FakeUaError;
use fake_ua::fake_ua_error::FakeUaError::CliArgumentError;
use fake_ua::selector_config::{ConfigFile, SelectorConfigBuilder};
use fake_ua::{DuplicatePolicy, SamplingPolicy, SelectorConfig, UnknownBrowserPolicy};
use std::path::PathBuf;

const DATA_ENV: &str = "FAKE_UA_DATA";

fn command() -> Command {
    Command::new("fua")
        .version(crate_version!())
        .author("Arnaud Gourlay <arnaud.gourlay@gmail.com>")
        .about("Realistic random User-Agent strings")
        .arg(
            Arg::new("query")
                .help("'random', a browser family (chrome, firefox, safari, opera, edge, google) or a browser name")
                .default_value("random"),
        )
        .arg(
            Arg::new("browsers")
                .help("comma separated browser names to draw from")
                .long("browsers")
                .short('b')
                .value_delimiter(',')
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("os")
                .help("comma separated operating systems to draw from")
                .long("os")
                .short('o')
                .value_delimiter(',')
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("platforms")
                .help("comma separated device types (desktop, mobile, tablet)")
                .long("platforms")
                .short('p')
                .value_delimiter(',')
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("minVersion")
                .help("minimum browser major.minor version")
                .long("min-version")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("minPercentage")
                .help("minimum usage percentage of a record")
                .long("min-percentage")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("fallback")
                .help("User-Agent returned when nothing matches")
                .long("fallback"),
        )
        .arg(
            Arg::new("bypass")
                .help("comma separated names never looked up as browsers")
                .long("bypass")
                .value_delimiter(',')
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("uniform")
                .help("draw uniformly instead of weighting by usage percentage")
                .long("uniform")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dedup")
                .help("collapse records sharing the same User-Agent before drawing")
                .long("dedup")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("strict")
                .help("fail if a configured browser is absent from the dataset")
                .long("strict")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .help("JSON configuration file, flags take precedence")
                .long("config")
                .short('c')
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("data")
                .help("alternative dataset (JSON lines or JSON array), defaults to $FAKE_UA_DATA")
                .long("data")
                .short('d')
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("count")
                .help("number of User-Agents to draw")
                .long("count")
                .short('n')
                .default_value("1")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("json")
                .help("print full records as JSON lines")
                .long("json")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stats")
                .help("print a diversity report after the draws")
                .long("stats")
                .action(ArgAction::SetTrue),
        )
}

pub struct Arguments {
    pub query: String,
    pub config: SelectorConfig,
    pub data: Option<PathBuf>,
    pub count: usize,
    pub json: bool,
    pub stats: bool,
}

pub fn get_args() -> Result<Arguments, FakeUaError> {
    parse_matches(command().get_matches())
}

#[cfg(test)]
fn get_args_from<I, T>(itr: I) -> Result<Arguments, FakeUaError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    parse_matches(command().try_get_matches_from(itr)?)
}

fn parse_matches(matches: ArgMatches) -> Result<Arguments, FakeUaError> {
    // safe unwrap because of default value
    let count = *matches.get_one::<usize>("count").expect("impossible");
    if count == 0 {
        return Err(CliArgumentError {
            message: "'count' must be positive".to_string(),
        });
    }

    let query = matches
        .get_one::<String>("query")
        .expect("impossible")
        .to_string();

    let data = matches
        .get_one::<PathBuf>("data")
        .cloned()
        .or_else(|| std::env::var_os(DATA_ENV).map(PathBuf::from));

    let builder = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            if !path.is_file() {
                return Err(CliArgumentError {
                    message: "'config' does not exist".to_string(),
                });
            }
            ConfigFile::from_json_file(path)?.into_builder()
        }
        None => SelectorConfig::builder(),
    };
    let config = apply_flags(builder, &matches).build()?;

    Ok(Arguments {
        query,
        config,
        data,
        count,
        json: matches.get_flag("json"),
        stats: matches.get_flag("stats"),
    })
}

fn apply_flags(mut builder: SelectorConfigBuilder, matches: &ArgMatches) -> SelectorConfigBuilder {
    if let Some(browsers) = matches.get_many::<String>("browsers") {
        builder = builder.browsers(browsers.cloned());
    }
    if let Some(os) = matches.get_many::<String>("os") {
        builder = builder.operating_systems(os.cloned());
    }
    if let Some(platforms) = matches.get_many::<String>("platforms") {
        builder = builder.platforms(platforms.cloned());
    }
    if let Some(min_version) = matches.get_one::<f64>("minVersion") {
        builder = builder.min_version(*min_version);
    }
    if let Some(min_percentage) = matches.get_one::<f64>("minPercentage") {
        builder = builder.min_usage_percent(*min_percentage);
    }
    if let Some(fallback) = matches.get_one::<String>("fallback") {
        builder = builder.fallback_user_agent(fallback.clone());
    }
    if let Some(bypass) = matches.get_many::<String>("bypass") {
        builder = builder.bypass_names(bypass.cloned());
    }
    if matches.get_flag("uniform") {
        builder = builder.sampling(SamplingPolicy::Uniform);
    }
    if matches.get_flag("dedup") {
        builder = builder.duplicates(DuplicatePolicy::FirstSeen);
    }
    if matches.get_flag("strict") {
        builder = builder.unknown_browsers(UnknownBrowserPolicy::Reject);
    }
    builder
}
