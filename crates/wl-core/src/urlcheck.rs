//! Reachability check over a list of domains.

use crate::error::{Result, WlError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "sample-urlChecker.json";
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
pub const MIN_TIMEOUT_MS: u64 = 15_000;
pub const MAX_TIMEOUT_MS: u64 = 120_000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlCheckerConfig {
    #[serde(default)]
    pub subdomain: Option<String>,
    #[serde(default, alias = "https")]
    pub is_https: bool,
    #[serde(default)]
    pub domain_list: Vec<String>,
    #[serde(default)]
    pub connect_timeout: Option<u64>,
    #[serde(default)]
    pub read_timeout: Option<u64>,
}

impl UrlCheckerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&data)
            .map_err(|e| WlError::InvalidUrlConfig(vec![e.to_string()]))?;
        tracing::debug!(config = ?cfg, "decoded url checker config");
        let violations = cfg.validate();
        if !violations.is_empty() {
            return Err(WlError::InvalidUrlConfig(violations));
        }
        Ok(cfg)
    }

    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();
        if self.domain_list.is_empty() {
            violations.push("domainList must not be empty".to_string());
        }
        if self.domain_list.iter().any(|d| d.trim().is_empty()) {
            violations.push("domainList must not contain blank elements".to_string());
        }
        for (name, value) in [
            ("connectTimeout", self.connect_timeout),
            ("readTimeout", self.read_timeout),
        ] {
            if let Some(ms) = value {
                if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&ms) {
                    violations.push(format!(
                        "{name} must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS} ms (got {ms})"
                    ));
                }
            }
        }
        violations
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout.unwrap_or(DEFAULT_TIMEOUT_MS))
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout.unwrap_or(DEFAULT_TIMEOUT_MS))
    }

    fn host(&self, domain: &str) -> String {
        match self.subdomain.as_deref().map(str::trim) {
            Some(sub) if !sub.is_empty() => format!("{sub}.{domain}"),
            _ => domain.to_string(),
        }
    }

    /// `(host, url)` for every domain, in list order.
    pub fn targets(&self) -> Vec<(String, String)> {
        let scheme = if self.is_https { "https" } else { "http" };
        self.domain_list
            .iter()
            .map(|d| {
                let host = self.host(d.trim());
                let url = format!("{scheme}://{host}");
                (host, url)
            })
            .collect()
    }
}

/// Issues one GET and reports the status code, or a transport error.
pub trait Probe {
    fn get(
        &self,
        url: &str,
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> std::result::Result<u16, String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UrlOutcome {
    Ok,
    /// Reached the server, got something other than 200.
    Failed { code: u16 },
    /// Never got a response.
    Error { reason: String },
}

impl UrlOutcome {
    pub fn reason(&self) -> Option<String> {
        match self {
            UrlOutcome::Ok => None,
            UrlOutcome::Failed { code } => Some(format!("Response code: {code}")),
            UrlOutcome::Error { reason } => Some(format!("Connection failed: {reason}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlResult {
    pub host: String,
    pub url: String,
    pub outcome: UrlOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UrlCheckReport {
    pub total: usize,
    pub results: Vec<UrlResult>,
}

impl UrlCheckReport {
    pub fn failures(&self) -> impl Iterator<Item = &UrlResult> {
        self.results.iter().filter(|r| r.outcome != UrlOutcome::Ok)
    }
}

/// Probe every target in order. `on_result` sees each result as it lands,
/// with its 1-based position.
pub fn check_all(
    config: &UrlCheckerConfig,
    probe: &dyn Probe,
    mut on_result: impl FnMut(usize, usize, &UrlResult),
) -> UrlCheckReport {
    let targets = config.targets();
    let total = targets.len();
    let (connect, read) = (config.connect_timeout(), config.read_timeout());
    let mut report = UrlCheckReport {
        total,
        results: Vec::with_capacity(total),
    };

    for (i, (host, url)) in targets.into_iter().enumerate() {
        let outcome = match probe.get(&url, connect, read) {
            Ok(200) => UrlOutcome::Ok,
            Ok(code) => UrlOutcome::Failed { code },
            Err(reason) => UrlOutcome::Error { reason },
        };
        tracing::debug!(%url, ?outcome, "probed");
        let result = UrlResult { host, url, outcome };
        on_result(i + 1, total, &result);
        report.results.push(result);
    }
    report
}
