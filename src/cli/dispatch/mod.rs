use crate::{
    cli::actions::{Action, OutputFormat},
    inspect::{HostnameMode, InspectConfig, VerifyMode},
};
use anyhow::{Context, Result, anyhow, bail};
use clap::ArgMatches;
use std::{net::IpAddr, time::Duration};

/// Build the inspection settings shared by `inspect` and `serve`
///
/// `port_arg` names the argument holding the port to connect to.
fn extract_inspect_config(matches: &ArgMatches, port_arg: &str) -> Result<InspectConfig> {
    let defaults = InspectConfig::default();

    let verify = matches
        .get_one::<String>("verify")
        .map(|mode| mode.parse::<VerifyMode>().map_err(|e| anyhow!(e)))
        .transpose()?
        .unwrap_or_default();

    let hostname = if matches.get_flag("bare") {
        HostnameMode::Bare
    } else {
        HostnameMode::Url
    };

    let port = matches
        .get_one::<u16>(port_arg)
        .copied()
        .unwrap_or(defaults.port);

    let connect_timeout = matches
        .get_one::<u64>("connect-timeout")
        .copied()
        .map_or(defaults.connect_timeout, Duration::from_secs);

    let handshake_timeout = matches
        .get_one::<u64>("handshake-timeout")
        .copied()
        .map(Duration::from_secs);

    Ok(InspectConfig {
        verify,
        hostname,
        port,
        connect_timeout,
        handshake_timeout,
    })
}

/// Convert `ArgMatches` into typed Action enum with validation
///
/// # Errors
///
/// Returns an error if a value is invalid or required parameters are missing
pub fn dispatch(matches: &ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some(("inspect", sub)) => {
            let target = sub
                .get_one::<String>("target")
                .context("target is required")?
                .clone();

            let format = sub
                .get_one::<String>("format")
                .map(|f| f.parse::<OutputFormat>().map_err(|e| anyhow!(e)))
                .transpose()?
                .unwrap_or_default();

            let config = extract_inspect_config(sub, "port")?;

            Ok(Action::Inspect {
                target,
                format,
                config,
            })
        }
        Some(("serve", sub)) => {
            // Extract and validate listen address
            let listen = sub
                .get_one::<String>("listen")
                .map(|addr| {
                    addr.parse::<IpAddr>()
                        .with_context(|| format!("Invalid IP address: {addr}"))
                })
                .transpose()?;

            let port = sub.get_one::<u16>("port").copied().unwrap_or(8080);

            let config = extract_inspect_config(sub, "target-port")?;

            Ok(Action::Serve {
                listen,
                port,
                config,
            })
        }
        Some((name, _)) => bail!("unknown command: {name}"),
        None => bail!("a command is required"),
    }
}
