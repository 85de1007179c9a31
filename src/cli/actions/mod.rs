mod run;

use crate::inspect::InspectConfig;
use std::{net::IpAddr, process::ExitCode, str::FromStr};

/// Action enum representing each possible command
#[derive(Debug)]
pub enum Action {
    Inspect {
        target: String,
        format: OutputFormat,
        config: InspectConfig,
    },
    Serve {
        listen: Option<IpAddr>,
        port: u16,
        config: InspectConfig,
    },
}

impl Action {
    /// Execute the action
    ///
    /// # Errors
    ///
    /// Returns an error if the action fails to execute
    pub async fn execute(self) -> anyhow::Result<ExitCode> {
        run::execute(self).await
    }
}

/// How `inspect` prints its outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s}")),
        }
    }
}
