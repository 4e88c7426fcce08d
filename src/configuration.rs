use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};

use crate::error::AppError;

/// Fully-resolved runtime configuration, built once per invocation and never
/// mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuration {
    pub use_std_in: bool,
    pub help: bool,
    pub no_color: bool,
    pub quiet: bool,
    pub version: bool,
    pub cve_exclusions: Vec<String>,
    pub path: String,
    pub iq_mode: bool,
    pub iq_user: String,
    pub iq_token: String,
    pub iq_server_url: String,
    pub iq_application: String,
    pub iq_stage: String,
}

#[derive(Parser)]
#[command(name = "nancy", disable_help_flag = true, help_template = "{options}")]
struct PrimaryArgs {
    /// Provides help text on how to use nancy
    #[arg(long)]
    help: bool,

    /// Indicate output should not be colorized
    #[arg(long = "no-color")]
    no_color: bool,

    /// Indicate output should not be colorized (deprecated: please use no-color)
    #[arg(long = "noColor")]
    no_color_deprecated: bool,

    /// Indicate output should contain only packages with vulnerabilities
    #[arg(long)]
    quiet: bool,

    /// Prints current nancy version
    #[arg(long)]
    version: bool,

    /// Comma separated list of CVEs to exclude
    #[arg(long = "exclude-vulnerability", value_name = "CVE,CVE", value_delimiter = ',')]
    exclude_vulnerability: Vec<String>,

    /// Path to a file containing newline separated CVEs to be excluded
    #[arg(
        long = "exclude-vulnerability-file",
        value_name = "PATH",
        default_value = "./.nancy-ignore"
    )]
    exclude_vulnerability_file: PathBuf,

    /// Dependency lock file to scan; a module list is read from stdin when omitted
    #[arg(value_name = "LOCKFILE")]
    lockfiles: Vec<String>,
}

#[derive(Parser)]
#[command(
    name = "iq",
    bin_name = "nancy iq",
    disable_help_flag = true,
    help_template = "{options}"
)]
struct IqArgs {
    /// Specify username for request
    #[arg(long, default_value = "admin")]
    user: String,

    /// Specify token/password for request
    #[arg(long, default_value = "admin123")]
    token: String,

    /// Specify Nexus IQ Server URL/port
    #[arg(long = "server-url", default_value = "http://localhost:8070")]
    server_url: String,

    /// Specify application ID for request
    #[arg(long, default_value = "")]
    application: String,

    /// Specify stage for application
    #[arg(long, default_value = "develop")]
    stage: String,
}

impl Configuration {
    /// Resolve a configuration from the argument sequence following the
    /// program name.
    ///
    /// A leading `iq` token switches to the IQ flag set and forces stdin
    /// mode; anything else is parsed against the primary flag set, with the
    /// last positional argument selecting the lock file to scan. Parsing
    /// builds its flag definitions locally and never exits the process; the
    /// caller decides what to do with errors and the `help`/`version`
    /// toggles.
    pub fn resolve<I, S>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();

        if args.first().map(String::as_str) == Some("iq") {
            let iq = IqArgs::try_parse_from(
                std::iter::once("nancy").chain(args.iter().skip(1).map(String::as_str)),
            )?;
            return Ok(Configuration {
                use_std_in: true,
                iq_mode: true,
                iq_user: iq.user,
                iq_token: iq.token,
                iq_server_url: iq.server_url,
                iq_application: iq.application,
                iq_stage: iq.stage,
                ..Configuration::default()
            });
        }

        let primary = PrimaryArgs::try_parse_from(
            std::iter::once("nancy").chain(args.iter().map(String::as_str)),
        )?;

        if primary.no_color_deprecated {
            eprintln!(
                "warning: the 'noColor' flag is deprecated and will be removed in a future release, please use 'no-color'"
            );
        }

        let mut config = Configuration {
            use_std_in: primary.lockfiles.is_empty(),
            help: primary.help,
            no_color: primary.no_color || primary.no_color_deprecated,
            quiet: primary.quiet,
            version: primary.version,
            cve_exclusions: primary.exclude_vulnerability,
            path: primary.lockfiles.last().cloned().unwrap_or_default(),
            ..Configuration::default()
        };

        append_exclusions_from_file(
            &primary.exclude_vulnerability_file,
            &mut config.cve_exclusions,
        )?;

        Ok(config)
    }
}

/// Usage synopsis followed by the generated flag documentation for both the
/// primary and IQ flag sets.
pub fn usage() -> String {
    let primary = PrimaryArgs::command().render_help();
    let iq = IqArgs::command().render_help();
    format!(
        "Usage:\n  go list -m all | nancy [options]\n  go list -m all | nancy iq [options]\n  nancy [options] </path/to/go.sum>\n\nOptions:\n{primary}\nIQ Options:\n{iq}"
    )
}

fn append_exclusions_from_file(path: &Path, cves: &mut Vec<String>) -> Result<(), AppError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        // The exclusion file is optional
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(AppError::ExclusionFile { path: path.to_path_buf(), source: err }),
    };
    if metadata.is_dir() {
        return Ok(());
    }

    let file = fs::File::open(path)
        .map_err(|err| AppError::ExclusionFile { path: path.to_path_buf(), source: err })?;
    for line in io::BufReader::new(file).lines() {
        let line = line
            .map_err(|err| AppError::ExclusionFile { path: path.to_path_buf(), source: err })?;
        // Everything from the first '#' onward is a comment
        let entry = match line.find('#') {
            Some(idx) => line[..idx].trim(),
            None => line.trim(),
        };
        if !entry.is_empty() {
            cves.push(entry.to_string());
        }
    }

    Ok(())
}
