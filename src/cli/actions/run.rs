use super::{Action, OutputFormat};
use crate::inspect::{CertificateReport, InspectConfig, InspectError, Inspector};
use std::process::ExitCode;

/// Execute the action's business logic by delegating to the appropriate module
pub async fn execute(action: Action) -> anyhow::Result<ExitCode> {
    match action {
        Action::Inspect {
            target,
            format,
            config,
        } => inspect(&target, format, config).await,
        Action::Serve {
            listen,
            port,
            config,
        } => {
            crate::serve::start(listen, port, Inspector::new(config)).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn inspect(
    target: &str,
    format: OutputFormat,
    config: InspectConfig,
) -> anyhow::Result<ExitCode> {
    let result = Inspector::new(config)
        .inspect_report(target.as_bytes())
        .await;

    print!("{}", render(&result, format)?);

    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn render(
    result: &Result<CertificateReport, InspectError>,
    format: OutputFormat,
) -> serde_json::Result<String> {
    Ok(match (format, result) {
        (OutputFormat::Text, Ok(report)) => report.to_string(),
        (OutputFormat::Text, Err(err)) => format!("{err}\n"),
        (OutputFormat::Json, Ok(report)) => {
            format!("{}\n", serde_json::to_string_pretty(report)?)
        }
        (OutputFormat::Json, Err(err)) => format!(
            "{}\n",
            serde_json::to_string_pretty(&serde_json::json!({ "error": err.to_string() }))?
        ),
    })
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::indexing_slicing
    )]

    use super::*;
    use chrono::{TimeZone, Utc};

    fn report() -> CertificateReport {
        CertificateReport {
            host: "142.250.184.206".to_string(),
            port: 443,
            issuer: "WR2".to_string(),
            common_name: "*.google.com".to_string(),
            not_before: Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap(),
            not_after: Utc.with_ymd_and_hms(2024, 4, 8, 8, 29, 59).unwrap(),
            sans: vec!["*.google.com".to_string(), "google.com".to_string()],
        }
    }

    #[test]
    fn test_render_text_report() {
        let text = render(&Ok(report()), OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "Host 142.250.184.206\n\
             Port 443\n\
             Issuer WR2\n\
             CommonName *.google.com\n\
             NotBefore 2024-01-15 08:30:00 UTC\n\
             NotAfter 2024-04-08 08:29:59 UTC\n\
             SANs [*.google.com, google.com]\n"
        );
    }

    #[test]
    fn test_render_text_error() {
        let err = InspectError::Parse("parse invalid domain character".to_string());
        let text = render(&Err(err), OutputFormat::Text).unwrap();
        assert_eq!(text, "Error: parse invalid domain character\n");
    }

    #[test]
    fn test_render_json_report() {
        let text = render(&Ok(report()), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["host"], "142.250.184.206");
        assert_eq!(value["issuer"], "WR2");
        assert_eq!(value["not_before"], "2024-01-15T08:30:00Z");
        assert_eq!(value["sans"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_render_json_error() {
        let text = render(&Err(InspectError::EmptyChain), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value["error"],
            "Error: server presented an empty certificate chain"
        );
    }

    #[tokio::test]
    async fn test_inspect_exit_code_on_error() {
        let code = inspect("exa mple.com", OutputFormat::Text, InspectConfig::default())
            .await
            .unwrap();
        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::FAILURE));
    }
}
