//! CLI configuration: thin wrapper around `thermoctl_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--url, --zone, --insecure, --timeout).

use std::time::Duration;

use clap::ValueEnum;

use thermoctl_core::{ClientConfig, TlsVerification};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use thermoctl_config::{Config, Profile, config_path, load_config_or_default, save_config};

/// Everything a thermostat command needs from config and flags.
#[derive(Debug)]
pub struct Resolved {
    pub client: ClientConfig,
    /// Zone from `--zone` or the profile.
    pub zone: Option<i64>,
}

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Output format from the flag, else the config default, else table.
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global.output.unwrap_or_else(|| {
        OutputFormat::from_str(&config.defaults.output, true).unwrap_or(OutputFormat::Table)
    })
}

/// Translate the active profile + global flags into a `ClientConfig`.
///
/// CLI flag overrides take priority over profile values. With `--url` and
/// no matching profile, flags alone are enough.
pub fn resolve(global: &GlobalOpts, config: &Config) -> Result<Resolved, CliError> {
    let profile_name = active_profile_name(global, config);

    let profile = match (config.profiles.get(&profile_name), &global.url) {
        (Some(profile), Some(url)) => Profile {
            url: url.clone(),
            ..profile.clone()
        },
        (Some(profile), None) => profile.clone(),
        (None, Some(url)) => Profile {
            url: url.clone(),
            ca_cert: None,
            insecure: None,
            timeout: None,
            zone: None,
        },
        (None, None) if config.profiles.is_empty() => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
        (None, None) => {
            let mut available: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
            available.sort_unstable();
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available.join(", "),
            });
        }
    };

    let mut client = thermoctl_config::profile_to_client_config(&profile, &config.defaults)?;
    if global.insecure {
        client.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        client.timeout = Duration::from_secs(secs);
    }

    Ok(Resolved {
        client,
        zone: global.zone.or(profile.zone),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["thermoctl"];
        argv.extend_from_slice(args);
        argv.push("zones");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with(name: &str, url: &str, zone: Option<i64>) -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            name.into(),
            Profile {
                url: url.into(),
                ca_cert: None,
                insecure: None,
                timeout: Some(5),
                zone,
            },
        );
        cfg
    }

    #[test]
    fn flags_override_profile() {
        let cfg = config_with("default", "http://house.local", Some(1));
        let resolved = resolve(
            &global(&["--url", "http://10.0.0.9:8080", "--zone", "7", "-k", "--timeout", "9"]),
            &cfg,
        )
        .unwrap();

        assert_eq!(resolved.client.url.as_str(), "http://10.0.0.9:8080/");
        assert_eq!(resolved.zone, Some(7));
        assert_eq!(resolved.client.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(resolved.client.timeout, Duration::from_secs(9));
    }

    #[test]
    fn profile_supplies_zone_and_timeout() {
        let cfg = config_with("default", "http://house.local", Some(3));
        let resolved = resolve(&global(&[]), &cfg).unwrap();
        assert_eq!(resolved.zone, Some(3));
        assert_eq!(resolved.client.timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_everything_is_no_config() {
        let err = resolve(&global(&[]), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn unknown_named_profile_lists_alternatives() {
        let cfg = config_with("house", "http://house.local", None);
        let err = resolve(&global(&["--profile", "cabin"]), &cfg).unwrap_err();
        match err {
            CliError::ProfileNotFound { name, available } => {
                assert_eq!(name, "cabin");
                assert_eq!(available, "house");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn output_falls_back_to_config_default() {
        let mut cfg = Config::default();
        cfg.defaults.output = "yaml".into();
        assert_eq!(output_format(&global(&[]), &cfg), OutputFormat::Yaml);
        assert_eq!(output_format(&global(&["-o", "json"]), &cfg), OutputFormat::Json);
    }
}
