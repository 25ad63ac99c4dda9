//! Internet reachability probing.
//!
//! Link connectivity and internet reachability are independent facts: a
//! device can hold an address on an up interface while nothing routes past
//! the gateway. The probe answers the second question by attempting TCP
//! connections to well-known anycast endpoints.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;

/// Configuration for reachability probes.
#[derive(Clone, Debug)]
pub struct ReachabilityConfig {
    /// Probe endpoints, tried in order until one accepts a connection.
    pub endpoints: Vec<(String, u16)>,
    /// Per-endpoint connection timeout.
    pub timeout: Duration,
}

impl Default for ReachabilityConfig {
    fn default() -> Self {
        Self {
            endpoints: vec![
                ("1.1.1.1".to_string(), 80),        // Cloudflare
                ("8.8.8.8".to_string(), 53),        // Google DNS
                ("208.67.222.222".to_string(), 53), // OpenDNS
            ],
            timeout: Duration::from_secs(5),
        }
    }
}

impl ReachabilityConfig {
    /// Create a configuration with the default endpoints and timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-endpoint connection timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the endpoint list.
    pub fn endpoints(mut self, endpoints: Vec<(String, u16)>) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Append one probe endpoint.
    pub fn endpoint(mut self, host: impl Into<String>, port: u16) -> Self {
        self.endpoints.push((host.into(), port));
        self
    }
}

/// Probe the configured endpoints; `true` as soon as one accepts a TCP
/// connection within the timeout.
pub async fn check_reachability(config: &ReachabilityConfig) -> bool {
    for (host, port) in &config.endpoints {
        let addr = format!("{host}:{port}");
        match timeout(config.timeout, TcpStream::connect(&addr)).await {
            Ok(Ok(_)) => return true,
            Ok(Err(e)) => {
                tracing::debug!(target: "netinfo::reachability", %addr, error = %e, "probe failed");
            }
            Err(_) => {
                tracing::debug!(target: "netinfo::reachability", %addr, "probe timed out");
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = ReachabilityConfig::new()
            .timeout(Duration::from_millis(250))
            .endpoints(vec![("192.0.2.1".to_string(), 9)])
            .endpoint("192.0.2.2", 9);
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.endpoints.len(), 2);
    }

    #[tokio::test]
    async fn empty_endpoint_list_is_unreachable() {
        let config = ReachabilityConfig::new().endpoints(Vec::new());
        assert!(!check_reachability(&config).await);
    }

    #[tokio::test]
    async fn unroutable_endpoint_times_out_to_false() {
        // TEST-NET-1 address, guaranteed unroutable.
        let config = ReachabilityConfig::new()
            .endpoints(vec![("192.0.2.1".to_string(), 9)])
            .timeout(Duration::from_millis(200));
        assert!(!check_reachability(&config).await);
    }
}
