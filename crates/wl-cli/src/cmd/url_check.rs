use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use std::time::Duration;
use wl_core::urlcheck::{check_all, Probe, UrlCheckerConfig, UrlOutcome, DEFAULT_CONFIG_FILE};
use wl_core::WlError;

/// Blocking GET via `ureq`. Non-2xx statuses arrive as `Error::Status` and
/// are still a response, so they map to `Ok(code)`.
struct HttpProbe;

impl Probe for HttpProbe {
    fn get(
        &self,
        url: &str,
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> Result<u16, String> {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(connect_timeout)
            .timeout_read(read_timeout)
            .build();
        match agent.get(url).call() {
            Ok(response) => Ok(response.status()),
            Err(ureq::Error::Status(code, _)) => Ok(code),
            Err(ureq::Error::Transport(t)) => Err(t.to_string()),
        }
    }
}

pub fn run(root: &Path, file: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let path = match file {
        Some(p) => p.to_path_buf(),
        None => root.join(DEFAULT_CONFIG_FILE),
    };
    let config = match UrlCheckerConfig::load(&path) {
        Ok(config) => config,
        Err(e @ WlError::InvalidUrlConfig(_)) => {
            for violation in e.violations() {
                eprintln!("❌ {violation}");
            }
            return Err(e.into());
        }
        Err(e) => return Err(e).with_context(|| format!("failed to load {}", path.display())),
    };

    if !json {
        println!("Total {}", config.domain_list.len());
    }
    let report = check_all(&config, &HttpProbe, |i, total, result| {
        if json {
            return;
        }
        let status = match &result.outcome {
            UrlOutcome::Ok => "✅ [OK] 200 OK".to_string(),
            UrlOutcome::Failed { .. } => format!("❌ [FAILED] {}", reason(&result.outcome)),
            UrlOutcome::Error { .. } => format!("⚠️ [ERROR] {}", reason(&result.outcome)),
        };
        println!("[{i}/{total}] Checking URL: {} ... {status}", result.url);
    });

    if json {
        return print_json(&report);
    }

    let failures: Vec<_> = report.failures().collect();
    let rule = "=".repeat(40);
    if failures.is_empty() {
        println!("\nAll URLs checked successfully!");
    } else {
        println!("\n{rule}");
        println!("Total failed: {} out of {}", failures.len(), report.total);
        println!("{rule}");
        for failed in failures {
            println!("{} - {}", failed.host, reason(&failed.outcome));
        }
        println!("{rule}");
    }
    Ok(())
}

fn reason(outcome: &UrlOutcome) -> String {
    outcome.reason().unwrap_or_default()
}
