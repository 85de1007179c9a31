use super::{HostnameMode, InspectError};
use rustls::pki_types::ServerName;
use std::net::IpAddr;
use url::Url;

/// Lower-case the request and make sure it carries a scheme so it can be
/// parsed as a URL.
#[must_use]
pub fn normalize(input: &str) -> String {
    let request = input.trim().to_lowercase();
    if request.starts_with("https://") || request.starts_with("http://") {
        request
    } else {
        format!("https://{request}")
    }
}

/// Reduce raw input to the hostname to connect to
///
/// With [`HostnameMode::Url`] any scheme, userinfo, explicit port, path and
/// query are discarded. IPv6 literals are returned without brackets.
///
/// # Errors
///
/// Returns [`InspectError::Parse`] if no non-empty hostname can be extracted.
pub fn resolve_hostname(input: &str, mode: HostnameMode) -> Result<String, InspectError> {
    let host = match mode {
        HostnameMode::Url => {
            let url = Url::parse(&normalize(input))?;
            url.host_str()
                .unwrap_or_default()
                .trim_start_matches('[')
                .trim_end_matches(']')
                .to_string()
        }
        HostnameMode::Bare => input.trim().to_lowercase(),
    };

    if host.is_empty() {
        return Err(InspectError::Parse(format!(
            "no hostname found in {:?}",
            input.trim()
        )));
    }

    Ok(host)
}

/// Server name used for SNI; IP addresses are accepted but sent without SNI
///
/// # Errors
///
/// Returns [`InspectError::Parse`] if the host is neither an IP address nor a
/// valid DNS name.
pub fn server_name_from_host(host: &str) -> Result<ServerName<'static>, InspectError> {
    host.parse::<IpAddr>().map_or_else(
        |_| {
            ServerName::try_from(host.to_string())
                .map_err(|_| InspectError::Parse(format!("invalid server name: {host}")))
        },
        |ip| Ok(ServerName::from(ip)),
    )
}
