//! DNS resolution probe
//!
//! The probe times one lookup of the target host and reports the address
//! it resolved to. Lookups go through the [`Resolver`] trait so tests can
//! substitute a canned answer for the system resolver.

use crate::{
    error::{AppError, Result},
    models::ProbeResult,
    stats::duration_ms,
    types::Hostname,
};
use async_trait::async_trait;
use chrono::Local;
use std::{net::IpAddr, sync::Arc, time::Instant};
use trust_dns_resolver::{system_conf, TokioAsyncResolver};

/// Name resolution capability
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolve `host` to its addresses
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>>;
}

/// Resolver backed by the operating system's DNS configuration
/// (`/etc/resolv.conf`, hosts file, or the Windows registry).
pub struct SystemResolver {
    resolver: std::result::Result<TokioAsyncResolver, String>,
}

impl SystemResolver {
    /// Build a resolver from the system configuration.
    ///
    /// A missing or unreadable configuration is not fatal here: it is
    /// remembered and surfaces as a failed DNS probe.
    pub fn new() -> Self {
        let resolver = system_conf::read_system_conf()
            .map(|(config, opts)| TokioAsyncResolver::tokio(config, opts))
            .map_err(|e| format!("Failed to read system DNS config: {}", e));

        Self { resolver }
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Resolver for SystemResolver {
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>> {
        let resolver = self.resolver.as_ref().map_err(|e| AppError::dns_resolution(e.clone()))?;

        let response = resolver
            .lookup_ip(host)
            .await
            .map_err(|e| AppError::dns_resolution(format!("lookup failed for {}: {}", host, e)))?;

        Ok(response.iter().collect())
    }
}

/// Pick the address to report: the first IPv4 address, else the first one
pub fn preferred_address(addresses: &[IpAddr]) -> Option<IpAddr> {
    addresses
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addresses.first())
        .copied()
}

/// DNS probe producing a `ProbeResult`
#[derive(Clone)]
pub struct DnsProbe {
    resolver: Arc<dyn Resolver>,
}

impl DnsProbe {
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Self { resolver }
    }

    /// Probe using the system resolver
    pub fn system() -> Self {
        Self::new(Arc::new(SystemResolver::new()))
    }

    /// Resolve the host, timing the lookup. Never fails: resolver errors
    /// become the result's `error`.
    pub async fn resolve(&self, host: &Hostname) -> ProbeResult {
        let started_at = Local::now();
        let start = Instant::now();
        let outcome = self.resolver.lookup(host.as_str()).await;
        let elapsed = start.elapsed();

        let result = match outcome {
            Ok(addresses) => match preferred_address(&addresses) {
                Some(ip) => ProbeResult::dns_success(host.as_str(), ip.to_string(), duration_ms(elapsed)),
                None => ProbeResult::dns_failure(
                    host.as_str(),
                    "DNS resolution failed: no addresses returned".to_string(),
                ),
            },
            Err(e) => ProbeResult::dns_failure(
                host.as_str(),
                format!("DNS resolution failed: {}", e.detail()),
            ),
        };

        result.with_timestamp(started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    struct StaticResolver(Vec<IpAddr>);

    #[async_trait]
    impl Resolver for StaticResolver {
        async fn lookup(&self, _host: &str) -> Result<Vec<IpAddr>> {
            Ok(self.0.clone())
        }
    }

    struct FailingResolver;

    #[async_trait]
    impl Resolver for FailingResolver {
        async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>> {
            Err(AppError::dns_resolution(format!("{}: Name or service not known", host)))
        }
    }

    fn host(name: &str) -> Hostname {
        Hostname::parse(name).unwrap()
    }

    #[test]
    fn test_preferred_address_picks_ipv4() {
        let v6 = IpAddr::V6(Ipv6Addr::LOCALHOST);
        let v4 = IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34));
        assert_eq!(preferred_address(&[v6, v4]), Some(v4));
        assert_eq!(preferred_address(&[v6]), Some(v6));
        assert_eq!(preferred_address(&[]), None);
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let probe = DnsProbe::new(Arc::new(StaticResolver(vec![
            IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)),
        ])));

        let result = probe.resolve(&host("dns.google")).await;
        assert!(result.success);
        assert!(result.error.is_none());

        let details = result.as_dns().unwrap();
        assert_eq!(details.hostname, "dns.google");
        assert_eq!(details.resolved_address.as_deref(), Some("8.8.8.8"));
        assert!(details.response_time_ms.unwrap() >= 0.0);
    }

    #[tokio::test]
    async fn test_resolve_failure_is_captured() {
        let probe = DnsProbe::new(Arc::new(FailingResolver));

        let result = probe.resolve(&host("nonexistent.invalid")).await;
        assert!(!result.success);
        let error = result.error.as_deref().unwrap();
        assert!(error.starts_with("DNS resolution failed:"));
        assert!(error.contains("Name or service not known"));
        assert!(result.as_dns().unwrap().response_time_ms.is_none());
    }

    #[tokio::test]
    async fn test_resolve_empty_answer_is_failure() {
        let probe = DnsProbe::new(Arc::new(StaticResolver(vec![])));
        let result = probe.resolve(&host("example.com")).await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("no addresses"));
    }

    #[tokio::test]
    async fn test_system_resolver_returns_ip_literals_verbatim() {
        let probe = DnsProbe::system();
        let result = probe.resolve(&host("127.0.0.1")).await;
        // An unreadable resolver configuration is reported, not panicked on
        if result.success {
            assert_eq!(result.as_dns().unwrap().resolved_address.as_deref(), Some("127.0.0.1"));
        } else {
            assert!(result.error.is_some());
        }
    }
}
