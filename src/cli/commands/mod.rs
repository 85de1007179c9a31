use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

/// Pure clap command definitions with zero business logic
#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("increase log verbosity (-v info, -vv debug, -vvv trace)")
                .long("verbose")
                .short('v'),
        )
        .subcommand(inspect())
        .subcommand(serve())
}

fn inspect() -> Command {
    Command::new("inspect")
        .about("print the leaf certificate presented by a host")
        .arg(
            Arg::new("target")
                .help("hostname or URL, e.g. example.com or https://example.com/path")
                .required(true)
                .value_name("TARGET"),
        )
        .arg(
            Arg::new("port")
                .default_value("443")
                .env("CERTINFO_PORT")
                .help("port to connect to")
                .long("port")
                .short('p')
                .value_parser(clap::value_parser!(u16).range(1..)),
        )
        .args(probe_args())
        .arg(
            Arg::new("format")
                .default_value("text")
                .env("CERTINFO_FORMAT")
                .help("output format: text, json")
                .long("format")
                .short('f')
                .value_name("FORMAT")
                .value_parser(["text", "json"]),
        )
}

fn serve() -> Command {
    Command::new("serve")
        .about("answer POSTed hosts with certificate reports over HTTP")
        .arg(
            Arg::new("listen")
                .env("CERTINFO_LISTEN")
                .help("IP address to bind to (default: [::]:port, accepts both IPv6 and IPv4)")
                .long("listen")
                .long_help(
                    "IP address to bind to:\n\
                    Not specified (default) binds to [::]:port which accepts both IPv6 and IPv4 connections.\n\
                    Falls back to 0.0.0.0:port if IPv6 is unavailable.\n\n\
                    Specific IPv4 examples: '0.0.0.0', '127.0.0.1'\n\
                    Specific IPv6: '::', '::1'",
                )
                .short('l')
                .value_name("IP"),
        )
        .arg(
            Arg::new("port")
                .default_value("8080")
                .env("CERTINFO_SERVE_PORT")
                .help("listening port for the HTTP endpoint")
                .long("port")
                .short('p')
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("target-port")
                .default_value("443")
                .env("CERTINFO_TARGET_PORT")
                .help("port to connect to on inspected hosts")
                .long("target-port")
                .value_parser(clap::value_parser!(u16).range(1..)),
        )
        .args(probe_args())
}

/// Connection settings shared by `inspect` and `serve`
fn probe_args() -> [Arg; 4] {
    [
        Arg::new("connect-timeout")
            .default_value("2")
            .env("CERTINFO_CONNECT_TIMEOUT")
            .help("seconds allowed to establish the TCP connection")
            .long("connect-timeout")
            .value_name("SECONDS")
            .value_parser(clap::value_parser!(u64).range(1..)),
        Arg::new("handshake-timeout")
            .env("CERTINFO_HANDSHAKE_TIMEOUT")
            .help("seconds allowed for the TLS handshake (default: unbounded)")
            .long("handshake-timeout")
            .value_name("SECONDS")
            .value_parser(clap::value_parser!(u64).range(1..)),
        Arg::new("bare")
            .action(ArgAction::SetTrue)
            .help("treat the input as a bare hostname instead of a URL")
            .long("bare"),
        Arg::new("verify")
            .default_value("none")
            .env("CERTINFO_VERIFY")
            .help("certificate verification: none")
            .long("verify")
            .long_help(
                "Certificate verification applied during the handshake.\n\n\
                - none: accept any certificate (expired, self-signed, wrong host)\n\n\
                The peer certificate is only read, never trusted.",
            )
            .value_name("MODE")
            .value_parser(["none"]),
    ]
}
