//! Server startup integration tests.
//!
//! The server can be built from default configuration, reports its info, and
//! the HTTP transport starts and shuts down on request.

use mcpollinations::{AudioPlayer, PollinationsServer};
use mcpollinations_common::Config;

/// Server with default configuration and playback turned off.
pub fn test_server() -> PollinationsServer {
    PollinationsServer::new(Config::default()).with_player(AudioPlayer::disabled())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcpollinations_common::{McpServerBuilder, ServerError, Transport, shutdown_channel};
    use rmcp::ServerHandler;
    use std::time::Duration;

    #[test]
    fn test_server_info() {
        let info = test_server().get_info();

        let instructions = info.instructions.as_deref().unwrap_or_default().to_lowercase();
        for topic in ["image", "text", "speech"] {
            assert!(instructions.contains(topic), "instructions should mention '{topic}'");
        }
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
    }

    #[test]
    fn test_server_from_environment_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        let _server = PollinationsServer::new(config);
    }

    #[tokio::test]
    async fn test_http_server_stops_on_shutdown() {
        let (tx, rx) = shutdown_channel();
        let handle = tokio::spawn(
            McpServerBuilder::new(test_server())
                .with_transport(Transport::http(0))
                .with_shutdown(rx)
                .run(),
        );

        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(()).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("server should stop after shutdown")
            .unwrap();
        assert!(result.is_ok(), "{result:?}");
    }

    #[tokio::test]
    async fn test_http_server_reports_bind_failure() {
        let taken = std::net::TcpListener::bind("0.0.0.0:0").unwrap();
        let port = taken.local_addr().unwrap().port();

        let (_tx, rx) = shutdown_channel();
        let result = McpServerBuilder::new(test_server())
            .with_transport(Transport::sse(port))
            .with_shutdown(rx)
            .run()
            .await;

        match result {
            Err(ServerError::BindFailed { port: failed, .. }) => assert_eq!(failed, port),
            other => panic!("expected bind failure, got {other:?}"),
        }
    }
}
