//! The replacement maps every generated file is rendered with.

use crate::config::WhiteLabelConfig;
use crate::placeholder::{PlaceholderMapper, ReplacementMap};
use crate::transform::Transformer;
use crate::types::Environment;
use std::collections::HashMap;

pub const CORS_DOMAIN_VALUES: &str = "{$corsDomainValues}";
pub const SEPARATION_VALUES: &str = "{$enableFrontendBackendSeparationByDomainValues}";

/// One `corsdomain` VALUES row, without separator.
pub fn cors_domain_row(domain: &str, env: Environment) -> String {
    format!(
        "\n\t('{domain}', 1, '{}', '{}', sysdate(6), sysdate(6))",
        env.sub_domain_static(),
        env.sub_domain_api()
    )
}

/// One `"<domain>": 1` entry of the frontend/backend separation JSON.
pub fn separation_row(domain: &str) -> String {
    format!("\n\t\t\"{domain}\": 1")
}

/// Auto-mapped fields plus the derived names every template relies on.
pub fn base_replacements(config: &WhiteLabelConfig) -> ReplacementMap {
    let api = config.api_white_label;
    PlaceholderMapper::builder(config)
        .auto_map()
        .derived_with(
            "{$webSiteName}",
            |c| Some(c.web_site_name.as_str()),
            Transformer::SnakeToCamelUpper,
        )
        .derived_with(
            "{$className}",
            |c| Some(c.web_site_name.as_str()),
            Transformer::SnakeToCamel,
        )
        .derived_with(
            "{$lowerCase}",
            |c| Some(c.web_site_name.as_str()),
            Transformer::SnakeToCamelLower,
        )
        .derived_with("{$enumName}", |c| c.host(), Transformer::DotToUnderscoreUpper)
        .derived_if("$url", move |_| !api, |c| c.host().map(str::to_string))
        .derived_if(
            "$group",
            move |_| api,
            |c| c.api_wallet_info.as_ref().map(|w| w.group.clone()),
        )
        .derived_if(
            "$cert",
            move |_| api,
            |c| c.api_wallet_info.as_ref().map(|w| w.cert.clone()),
        )
        .build()
}

/// The base map plus the single-host cors and separation rows for `env`.
/// Without a host this is the base map unchanged.
pub fn env_replacements(config: &WhiteLabelConfig, env: Environment) -> ReplacementMap {
    with_host_rows(config, base_replacements(config), env)
}

/// `base` extended with the host rows for `env`, when there is a host.
fn with_host_rows(config: &WhiteLabelConfig, base: ReplacementMap, env: Environment) -> ReplacementMap {
    match config.host() {
        Some(host) => PlaceholderMapper::builder(config)
            .put_all(base)
            .put(CORS_DOMAIN_VALUES, cors_domain_row(host, env))
            .put(SEPARATION_VALUES, separation_row(host))
            .build(),
        None => base,
    }
}

/// Lazily built maps for one generation run.
///
/// Each map is computed at most once. Not shared across threads; a run
/// owns its cache and drops it at the end.
#[derive(Debug)]
pub struct ReplacementCache<'c> {
    config: &'c WhiteLabelConfig,
    base: Option<ReplacementMap>,
    by_env: HashMap<Environment, ReplacementMap>,
}

impl<'c> ReplacementCache<'c> {
    pub fn new(config: &'c WhiteLabelConfig) -> Self {
        Self {
            config,
            base: None,
            by_env: HashMap::new(),
        }
    }

    pub fn config(&self) -> &'c WhiteLabelConfig {
        self.config
    }

    pub fn base(&mut self) -> &ReplacementMap {
        let config = self.config;
        self.base.get_or_insert_with(|| base_replacements(config))
    }

    /// A copy of the cached base map plus the host rows for `env`.
    pub fn for_env(&mut self, env: Environment) -> &ReplacementMap {
        if self.by_env.contains_key(&env) {
            tracing::debug!(%env, "replacement cache hit");
        } else {
            let config = self.config;
            let seeded = with_host_rows(config, self.base().clone(), env);
            self.by_env.insert(env, seeded);
        }
        &self.by_env[&env]
    }

    pub fn clear(&mut self) {
        self.base = None;
        self.by_env.clear();
    }
}
