//! Command-line arguments.

use clap::Parser;
use memoir_core::LogFormat;
use memoir_server::Settings;
use std::path::PathBuf;

/// Command-line arguments for the memoir server.
#[derive(Parser, Debug)]
#[command(name = "memoir")]
#[command(about = "Memoir - ghostwritten life stories over HTTP")]
#[command(version)]
pub struct Args {
    /// Path to a TOML configuration file (defaults to ./memoir.toml if present)
    #[arg(short, long, env = "MEMOIR_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Log output format: pretty or json
    #[arg(long)]
    pub log_format: Option<LogFormat>,

    /// Load and print the configuration, then exit
    #[arg(long)]
    pub check_config: bool,
}

impl Args {
    /// Apply command-line overrides on top of loaded settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.set_host(host.as_str());
        }
        if let Some(port) = self.port {
            settings.set_port(port);
        }
        if let Some(format) = self.log_format {
            settings.set_log_format(format);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_settings() {
        let args = Args::try_parse_from([
            "memoir",
            "--host",
            "127.0.0.1",
            "--port",
            "9090",
            "--log-format",
            "json",
        ])
        .unwrap();

        let mut settings = Settings::default();
        args.apply(&mut settings);

        assert_eq!(settings.server().host(), "127.0.0.1");
        assert_eq!(*settings.server().port(), 9090);
        assert_eq!(*settings.server().log_format(), LogFormat::Json);
    }

    #[test]
    fn no_flags_leave_settings_alone() {
        let args = Args::try_parse_from(["memoir"]).unwrap();
        let mut settings = Settings::default();
        args.apply(&mut settings);

        assert_eq!(settings, Settings::default());
        assert!(!args.check_config);
    }

    #[test]
    fn rejects_unknown_log_format() {
        assert!(Args::try_parse_from(["memoir", "--log-format", "xml"]).is_err());
    }
}
