//! Command-line flags and build information

use clap::Parser;
use std::fmt;

/// Top-level CLI struct.
///
/// clap's own `--version` is disabled: ours prints build details and exits
/// with a failure status.
#[derive(Debug, Parser)]
#[command(name = "owm-proxy", about = "Compact OpenWeatherMap relay", disable_version_flag = true)]
pub struct Cli {
    /// Print version, commit and build date, then exit.
    #[arg(long)]
    pub version: bool,

    /// Enable verbose HTTP and application logging.
    #[arg(long)]
    pub debug: bool,

    /// Port to listen on; overrides `server.port` (default 8080).
    #[arg(long)]
    pub port: Option<u16>,
}

/// Build details stamped in at compile time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub date: &'static str,
}

pub const BUILD_INFO: BuildInfo = BuildInfo {
    version: match option_env!("OWM_PROXY_VERSION") {
        Some(version) => version,
        None => env!("CARGO_PKG_VERSION"),
    },
    commit: match option_env!("OWM_PROXY_COMMIT") {
        Some(commit) => commit,
        None => "none",
    },
    date: match option_env!("OWM_PROXY_BUILD_DATE") {
        Some(date) => date,
        None => "unknown",
    },
};

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f, "Commit:  {}", self.commit)?;
        writeln!(f, "Date:    {}", self.date)
    }
}
