//! Unit tests for transport configuration.

use super::transport::{Transport, TransportArgs, TransportMode};
use clap::Parser;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    transport: TransportArgs,
}

#[test]
fn test_transport_default_is_stdio() {
    let transport = Transport::default();
    assert!(transport.is_stdio());
    assert_eq!(transport.port(), None);
    assert_eq!(transport.to_string(), "stdio");
}

#[test]
fn test_network_transports_carry_port() {
    let http = Transport::http(3000);
    assert!(http.is_http());
    assert_eq!(http.port(), Some(3000));
    assert_eq!(http.to_string(), "http (port 3000)");

    let sse = Transport::sse(8080);
    assert!(sse.is_sse());
    assert_eq!(sse.port(), Some(8080));
    assert_eq!(sse.to_string(), "sse (port 8080)");
}

#[test]
fn test_transport_args_default() {
    let args = TransportArgs::default();
    assert_eq!(args.transport, TransportMode::Stdio);
    assert_eq!(args.port, 8080);
    assert!(args.into_transport().is_stdio());
}

#[test]
fn test_stdio_ignores_port() {
    let args = TransportArgs {
        transport: TransportMode::Stdio,
        port: 9000,
    };
    assert_eq!(args.into_transport().port(), None);
}

#[test]
fn test_cli_parses_http_mode() {
    let cli = TestCli::try_parse_from(["mcpollinations", "--transport", "http", "--port", "3001"]).unwrap();
    assert_eq!(cli.transport.into_transport(), Transport::http(3001));
}

#[test]
fn test_cli_mode_is_case_insensitive() {
    let cli = TestCli::try_parse_from(["mcpollinations", "--transport", "SSE", "--port", "4000"]).unwrap();
    assert_eq!(cli.transport.into_transport(), Transport::sse(4000));
}

#[test]
fn test_cli_rejects_unknown_mode() {
    let result = TestCli::try_parse_from(["mcpollinations", "--transport", "carrier-pigeon"]);
    assert!(result.is_err());
}
