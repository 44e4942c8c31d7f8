//! Value blocks for the new-group SQL migration.

use crate::config::{ApiWalletInfo, GroupInfo, WhiteLabelConfig};
use crate::paths::{UAT_PRIVATE_DOMAIN_LIST, UAT_PUBLIC_DOMAIN_LIST};
use crate::placeholder::{PlaceholderMapper, ReplacementMap};
use crate::replacements::{cors_domain_row, separation_row, CORS_DOMAIN_VALUES, SEPARATION_VALUES};
use crate::types::Environment;

pub const API_DOMAIN_VALUES: &str = "{$apiDomainValues}";

/// `apidomaintype` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DomainKind {
    Private = 0,
    Public = 1,
}

fn api_domain_row(group: &str, domain: &str, active: bool, priority: usize, kind: DomainKind) -> String {
    format!(
        "\n\t(apidomainname_id_seq_nextval(), '{group}', '{domain}', {}, {priority}, 'SYSTEM', {}, NOW(6), NOW(6))",
        u8::from(active),
        kind as u8
    )
}

/// A domain list with the UAT allow-list appended when generating for UAT.
fn with_allow_list(domains: &[String], allow: &[&str], env: Environment) -> Vec<String> {
    let mut out = domains.to_vec();
    if env.is_uat() {
        out.extend(allow.iter().map(|d| d.to_string()));
    }
    out
}

/// The three VALUES blocks of a new API group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainValueBlocks {
    pub api_domain_values: String,
    pub cors_domain_values: String,
    pub separation_values: String,
}

impl DomainValueBlocks {
    /// Private rows come first and each ends with `,`. Public rows are
    /// comma-separated and the last one ends the statement with `;`.
    ///
    /// Outside UAT every private domain is active and only the first two
    /// public ones are. In UAT a row is active iff its domain is on the
    /// matching allow-list.
    pub fn build(group: &str, info: &GroupInfo, env: Environment) -> Self {
        let mut blocks = Self::default();

        for (i, domain) in with_allow_list(&info.private_ip, UAT_PRIVATE_DOMAIN_LIST, env)
            .iter()
            .enumerate()
        {
            let active = !env.is_uat() || UAT_PRIVATE_DOMAIN_LIST.contains(&domain.as_str());
            blocks
                .api_domain_values
                .push_str(&api_domain_row(group, domain, active, i + 1, DomainKind::Private));
            blocks.api_domain_values.push(',');
        }

        let backup = with_allow_list(&info.backup, UAT_PUBLIC_DOMAIN_LIST, env);
        for (i, domain) in backup.iter().enumerate() {
            let active = if env.is_uat() {
                UAT_PUBLIC_DOMAIN_LIST.contains(&domain.as_str())
            } else {
                i < 2
            };
            blocks
                .api_domain_values
                .push_str(&api_domain_row(group, domain, active, i + 1, DomainKind::Public));
            blocks.cors_domain_values.push_str(&cors_domain_row(domain, env));
            blocks.separation_values.push_str(&separation_row(domain));

            if i + 1 < backup.len() {
                blocks.api_domain_values.push(',');
                blocks.cors_domain_values.push(',');
                blocks.separation_values.push(',');
            } else {
                blocks.api_domain_values.push(';');
                blocks.cors_domain_values.push(';');
            }
        }
        blocks
    }
}

/// Replacements for the new-group template of `env`: the base map, the
/// ip-set ids and the three value blocks.
pub fn new_group_replacements(
    config: &WhiteLabelConfig,
    base: &ReplacementMap,
    wallet: &ApiWalletInfo,
    info: &GroupInfo,
    env: Environment,
) -> ReplacementMap {
    let ip_set = |i: usize| {
        info.bk_ip_set_id.get(i).cloned().unwrap_or_else(|| {
            tracing::warn!(index = i, "bkIpSetId has no element at index, using empty");
            String::new()
        })
    };
    let blocks = DomainValueBlocks::build(&wallet.group, info, env);

    PlaceholderMapper::builder(config)
        .put_all(base.clone())
        .put("{$privateIpSetId}", info.private_ip_set_id.as_str())
        .put("{$wwwgaIpSetId}", ip_set(0))
        .put("{$wwwcfIpSetId}", ip_set(1))
        .put("{$apiInfoBkIpSetId}", info.api_info_bk_ip_set_id.as_str())
        .put(API_DOMAIN_VALUES, blocks.api_domain_values)
        .put(CORS_DOMAIN_VALUES, blocks.cors_domain_values)
        .put(SEPARATION_VALUES, blocks.separation_values)
        .build()
}
