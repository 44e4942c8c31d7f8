use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use wl_core::config::WhiteLabelConfig;
use wl_core::generator::generate;
use wl_core::paths::Workspace;
use wl_core::WlError;

pub fn run(root: &Path, config_path: &Path, json: bool) -> anyhow::Result<()> {
    let config = match WhiteLabelConfig::load(config_path) {
        Ok(config) => config,
        Err(e @ WlError::InvalidConfig(_)) => {
            for violation in e.violations() {
                eprintln!("❌ {violation}");
            }
            return Err(e.into());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to load {}", config_path.display()))
        }
    };

    let workspace = Workspace::new(root);
    let report = generate(&workspace, &config);

    if json {
        return print_json(&report);
    }

    for path in &report.written {
        println!("written  {}", path.display());
    }
    for path in &report.spliced {
        println!("spliced  {}", path.display());
    }
    if report.is_clean() {
        println!("White label {} generated.", config.web_site_name);
    } else {
        eprintln!("{} step(s) failed:", report.failures.len());
        for failure in &report.failures {
            eprintln!("  [{}] {}: {}", failure.step, failure.path.display(), failure.error);
        }
    }
    Ok(())
}
