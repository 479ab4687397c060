//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use secrecy::SecretString;
use tokio::net::TcpListener;
use vaija_gateway::config::GatewayConfig;
use vaija_gateway::{HttpServer, Shutdown};
use wiremock::MockServer;

/// A gateway running on an ephemeral port.
pub struct RunningGateway {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl RunningGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for RunningGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the gateway with `config` and wait until it accepts connections.
pub async fn start_gateway(config: GatewayConfig) -> RunningGateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();

    let server = HttpServer::new(config).unwrap();
    let stop = shutdown.triggered();
    tokio::spawn(async move {
        let _ = server.run(listener, stop).await;
    });

    for _ in 0..50 {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    RunningGateway { addr, shutdown }
}

/// Config pointing both adapters at mock servers.
#[allow(dead_code)]
pub fn mocked_config(store: &MockServer, messaging: &MockServer) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.datastore.url = Some(store.uri());
    config.datastore.key = Some(SecretString::new("test-store-key".into()));
    config.messaging.account_sid = Some("ACtest".into());
    config.messaging.auth_token = Some(SecretString::new("test-auth-token".into()));
    config.messaging.whatsapp_from = Some("whatsapp:+14155238886".into());
    config.messaging.api_base = messaging.uri();
    config
}

/// HTTP client that never reuses connections across a shutdown.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
