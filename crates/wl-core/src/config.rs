use crate::error::{Result, WlError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// ---------------------------------------------------------------------------
// ExtraValue
// ---------------------------------------------------------------------------

/// Value of a JSON field the config does not declare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Json(serde_json::Value),
}

/// Renders the way the templates have always seen these values: floats
/// as `3.0` or `1.0E20`, objects as `{k=v, k2=v2}`, arrays as `[a, b]`.
impl fmt::Display for ExtraValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtraValue::Bool(b) => write!(f, "{b}"),
            ExtraValue::Int(i) => write!(f, "{i}"),
            ExtraValue::Float(x) => write_float(f, *x),
            ExtraValue::Text(s) => f.write_str(s),
            ExtraValue::Json(v) => write_json(f, v),
        }
    }
}

/// Plain decimal in `[1e-3, 1e7)` with at least one fractional digit,
/// `<mantissa>E<exponent>` outside it.
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("NaN");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" });
    }
    let abs = x.abs();
    if abs == 0.0 || (1e-3..1e7).contains(&abs) {
        return if x.fract() == 0.0 {
            write!(f, "{x:.1}")
        } else {
            write!(f, "{x}")
        };
    }
    let sci = format!("{x:e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    if mantissa.contains('.') {
        write!(f, "{mantissa}E{exponent}")
    } else {
        write!(f, "{mantissa}.0E{exponent}")
    }
}

fn write_json(f: &mut fmt::Formatter<'_>, value: &serde_json::Value) -> fmt::Result {
    use serde_json::Value;
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Number(n) => match n.as_f64() {
            Some(x) if n.is_f64() => write_float(f, x),
            _ => write!(f, "{n}"),
        },
        Value::String(s) => f.write_str(s),
        Value::Array(items) => {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_json(f, item)?;
            }
            f.write_str("]")
        }
        Value::Object(map) => {
            f.write_str("{")?;
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{key}=")?;
                write_json(f, item)?;
            }
            f.write_str("}")
        }
    }
}

impl From<&str> for ExtraValue {
    fn from(s: &str) -> Self {
        ExtraValue::Text(s.to_string())
    }
}

impl From<String> for ExtraValue {
    fn from(s: String) -> Self {
        ExtraValue::Text(s)
    }
}

impl From<i64> for ExtraValue {
    fn from(i: i64) -> Self {
        ExtraValue::Int(i)
    }
}

impl From<bool> for ExtraValue {
    fn from(b: bool) -> Self {
        ExtraValue::Bool(b)
    }
}

impl From<f64> for ExtraValue {
    fn from(x: f64) -> Self {
        ExtraValue::Float(x)
    }
}

/// Undeclared fields in first-seen order. `None` records an explicit JSON `null`.
pub type ExtraProperties = IndexMap<String, Option<ExtraValue>>;

// ---------------------------------------------------------------------------
// GroupInfo
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupInfo {
    #[serde(default)]
    pub private_ip_set_id: String,
    #[serde(default)]
    pub private_ip: Vec<String>,
    /// Positional: `[0]` is the wwwga set, `[1]` the wwwcf set.
    #[serde(default)]
    pub bk_ip_set_id: Vec<String>,
    #[serde(default)]
    pub api_info_bk_ip_set_id: String,
    #[serde(default)]
    pub backup: Vec<String>,
}

// ---------------------------------------------------------------------------
// ApiWalletInfo
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiWalletInfo {
    #[serde(default)]
    pub cert: String,
    #[serde(default)]
    pub new_group: bool,
    #[serde(default)]
    pub group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_info: Option<GroupInfo>,
}

// ---------------------------------------------------------------------------
// WhiteLabelConfig
// ---------------------------------------------------------------------------

fn default_developer() -> String {
    "MCP".to_string()
}

/// One onboarding request, as read from the ticket's JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhiteLabelConfig {
    #[serde(default)]
    pub sql_only: bool,
    #[serde(default)]
    pub ticket_no: String,
    #[serde(default)]
    pub web_site_name: String,
    #[serde(default)]
    pub web_site_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default)]
    pub api_white_label: bool,
    #[serde(default)]
    pub customized: bool,
    #[serde(default)]
    pub jira_summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix_version: Option<String>,
    #[serde(default = "default_developer")]
    pub developer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_wallet_info: Option<ApiWalletInfo>,
    #[serde(flatten)]
    pub additional_properties: ExtraProperties,
}

impl Default for WhiteLabelConfig {
    fn default() -> Self {
        Self {
            sql_only: false,
            ticket_no: String::new(),
            web_site_name: String::new(),
            web_site_value: None,
            host: None,
            api_white_label: false,
            customized: false,
            jira_summary: String::new(),
            fix_version: None,
            developer: default_developer(),
            api_wallet_info: None,
            additional_properties: IndexMap::new(),
        }
    }
}

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

impl WhiteLabelConfig {
    /// Decode and validate the config at `path`.
    ///
    /// Fails with [`WlError::InvalidConfig`] carrying every violation, so no
    /// caller ever holds an invalid config. A document that does not decode
    /// is reported the same way, as a single violation.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let cfg = Self::from_json(&data).map_err(|e| WlError::InvalidConfig(vec![e.to_string()]))?;
        tracing::debug!(config = ?cfg, "decoded white-label config");
        let violations = cfg.validate();
        if !violations.is_empty() {
            return Err(WlError::InvalidConfig(violations));
        }
        Ok(cfg)
    }

    /// Decode without validating.
    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Non-blank `host`, if any.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref().filter(|h| !blank(h))
    }

    /// The group info when this is an API white label creating a new group.
    pub fn new_group_info(&self) -> Option<(&ApiWalletInfo, &GroupInfo)> {
        if !self.api_white_label {
            return None;
        }
        let wallet = self.api_wallet_info.as_ref()?;
        if !wallet.new_group {
            return None;
        }
        wallet.group_info.as_ref().map(|g| (wallet, g))
    }

    pub fn additional_property(&self, name: &str) -> Option<&ExtraValue> {
        self.additional_properties.get(name).and_then(Option::as_ref)
    }

    pub fn set_additional_property(&mut self, name: impl Into<String>, value: Option<ExtraValue>) {
        self.additional_properties.insert(name.into(), value);
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Every constraint violation, in field order. Empty means valid.
    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();

        if blank(&self.ticket_no) {
            violations.push("ticketNo must not be blank".to_string());
        }
        if blank(&self.web_site_name) {
            violations.push("webSiteName must not be blank".to_string());
        }
        match self.web_site_value {
            None => violations.push("webSiteValue must not be null".to_string()),
            Some(v) if v < 1 => {
                violations.push(format!("webSiteValue must be at least 1 (got {v})"))
            }
            Some(_) => {}
        }
        if blank(&self.jira_summary) {
            violations.push("jiraSummary must not be blank".to_string());
        }

        // Nested records are checked whenever present.
        if let Some(wallet) = &self.api_wallet_info {
            if blank(&wallet.cert) {
                violations.push("apiWalletInfo.cert must not be blank".to_string());
            }
            if blank(&wallet.group) {
                violations.push("apiWalletInfo.group must not be blank".to_string());
            }
            if let Some(info) = &wallet.group_info {
                if blank(&info.private_ip_set_id) {
                    violations
                        .push("apiWalletInfo.groupInfo.privateIpSetId must not be blank".to_string());
                }
                if blank(&info.api_info_bk_ip_set_id) {
                    violations.push(
                        "apiWalletInfo.groupInfo.apiInfoBkIpSetId must not be blank".to_string(),
                    );
                }
            }
        }

        if self.api_white_label {
            match &self.api_wallet_info {
                None => violations
                    .push("apiWalletInfo is required when apiWhiteLabel is true".to_string()),
                Some(wallet) if wallet.new_group => match &wallet.group_info {
                    None => violations
                        .push("groupInfo is required when newGroup is true".to_string()),
                    Some(info) => {
                        check_list(&mut violations, "privateIp", &info.private_ip);
                        check_list(&mut violations, "bkIpSetId", &info.bk_ip_set_id);
                        check_list(&mut violations, "backup", &info.backup);
                    }
                },
                Some(_) => {}
            }
        } else if self.host().is_none() {
            violations.push("host is required when apiWhiteLabel is false".to_string());
        }

        violations
    }
}

fn check_list(violations: &mut Vec<String>, name: &str, items: &[String]) {
    if items.is_empty() {
        violations.push(format!("{name} must not be empty when newGroup is true"));
    } else if items.iter().any(|i| blank(i)) {
        violations.push(format!(
            "{name} must not contain blank elements when newGroup is true"
        ));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn regular() -> WhiteLabelConfig {
        WhiteLabelConfig {
            ticket_no: "123".to_string(),
            web_site_name: "ABC_SITE".to_string(),
            web_site_value: Some(101),
            host: Some("abc.com".to_string()),
            jira_summary: "x".to_string(),
            developer: "W".to_string(),
            ..Default::default()
        }
    }

    fn api_new_group() -> WhiteLabelConfig {
        WhiteLabelConfig {
            host: None,
            api_white_label: true,
            api_wallet_info: Some(ApiWalletInfo {
                cert: "CERT".to_string(),
                group: "A48".to_string(),
                new_group: true,
                group_info: Some(GroupInfo {
                    private_ip_set_id: "ipset-1".to_string(),
                    private_ip: vec!["10.0.0.1".to_string()],
                    bk_ip_set_id: vec!["bk-1".to_string(), "bk-2".to_string()],
                    api_info_bk_ip_set_id: "api-bk".to_string(),
                    backup: vec!["a.com".to_string()],
                }),
            }),
            ..regular()
        }
    }

    #[test]
    fn decode_camel_case_fields() {
        let json = r#"{
            "sqlOnly": true,
            "ticketNo": "T12345",
            "webSiteName": "abc_site",
            "webSiteValue": 101,
            "host": "abc.com",
            "apiWhiteLabel": false,
            "jiraSummary": "summary"
        }"#;
        let cfg = WhiteLabelConfig::from_json(json).unwrap();
        assert!(cfg.sql_only);
        assert_eq!(cfg.ticket_no, "T12345");
        assert_eq!(cfg.web_site_value, Some(101));
        assert_eq!(cfg.developer, "MCP");
        assert!(cfg.additional_properties.is_empty());
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn unknown_fields_are_captured_in_order() {
        let json = r#"{
            "ticketNo": "1",
            "region": "Asia",
            "webSiteName": "a",
            "maxUsers": 100000,
            "beta": true,
            "ratio": 2.75,
            "nothing": null,
            "tags": ["x", "y"]
        }"#;
        let cfg = WhiteLabelConfig::from_json(json).unwrap();
        let keys: Vec<&str> = cfg.additional_properties.keys().map(String::as_str).collect();
        assert_eq!(keys, ["region", "maxUsers", "beta", "ratio", "nothing", "tags"]);
        assert_eq!(cfg.additional_property("region"), Some(&ExtraValue::from("Asia")));
        assert_eq!(cfg.additional_property("maxUsers"), Some(&ExtraValue::Int(100000)));
        assert_eq!(cfg.additional_property("beta"), Some(&ExtraValue::Bool(true)));
        assert_eq!(cfg.additional_property("nothing"), None);
        assert_eq!(
            cfg.additional_property("tags").map(ToString::to_string),
            Some("[x, y]".to_string())
        );
    }

    #[test]
    fn extra_value_display() {
        assert_eq!(ExtraValue::Float(2.75).to_string(), "2.75");
        assert_eq!(ExtraValue::Float(3.0).to_string(), "3.0");
        assert_eq!(ExtraValue::Int(12345).to_string(), "12345");
        assert_eq!(ExtraValue::Bool(true).to_string(), "true");
    }

    #[test]
    fn extra_float_switches_to_exponent_outside_plain_range() {
        assert_eq!(ExtraValue::Float(1e20).to_string(), "1.0E20");
        assert_eq!(ExtraValue::Float(1.5e-5).to_string(), "1.5E-5");
        assert_eq!(ExtraValue::Float(12345678.0).to_string(), "1.2345678E7");
        assert_eq!(ExtraValue::Float(1234567.0).to_string(), "1234567.0");
        assert_eq!(ExtraValue::Float(0.001).to_string(), "0.001");
        assert_eq!(ExtraValue::Float(0.0).to_string(), "0.0");
        assert_eq!(ExtraValue::Float(-2.5e10).to_string(), "-2.5E10");
    }

    #[test]
    fn extra_nested_values_render_as_map_and_list() {
        let cfg = WhiteLabelConfig::from_json(
            r#"{"big": 1e20, "obj": {"k": 1, "s": "x", "l": [1, 2.5, null], "t": true}}"#,
        )
        .unwrap();
        assert_eq!(cfg.additional_property("big").map(ToString::to_string).as_deref(), Some("1.0E20"));
        assert_eq!(
            cfg.additional_property("obj").map(ToString::to_string).as_deref(),
            Some("{k=1, s=x, l=[1, 2.5, null], t=true}")
        );
    }

    #[test]
    fn regular_config_is_valid() {
        assert!(regular().validate().is_empty());
        assert!(api_new_group().validate().is_empty());
    }

    #[test]
    fn violations_are_aggregated() {
        let cfg = WhiteLabelConfig {
            ticket_no: " ".to_string(),
            web_site_name: String::new(),
            web_site_value: Some(0),
            host: None,
            ..regular()
        };
        let v = cfg.validate();
        assert_eq!(v.len(), 4, "{v:?}");
        assert!(v[0].contains("ticketNo"));
        assert!(v[1].contains("webSiteName"));
        assert!(v[2].contains("webSiteValue"));
        assert!(v[3].contains("host"));
    }

    #[test]
    fn missing_web_site_value_is_a_violation() {
        let cfg = WhiteLabelConfig {
            web_site_value: None,
            ..regular()
        };
        assert!(cfg.validate()[0].contains("must not be null"));
    }

    #[test]
    fn api_white_label_requires_wallet() {
        let cfg = WhiteLabelConfig {
            api_white_label: true,
            api_wallet_info: None,
            ..regular()
        };
        assert!(cfg.validate().iter().any(|v| v.contains("apiWalletInfo is required")));
    }

    #[test]
    fn wallet_fields_must_not_be_blank() {
        let mut cfg = api_new_group();
        if let Some(w) = cfg.api_wallet_info.as_mut() {
            w.cert = String::new();
            w.group = "  ".to_string();
        }
        let v = cfg.validate();
        assert!(v.iter().any(|m| m.contains("apiWalletInfo.cert")));
        assert!(v.iter().any(|m| m.contains("apiWalletInfo.group")));
    }

    #[test]
    fn new_group_requires_group_info() {
        let mut cfg = api_new_group();
        if let Some(w) = cfg.api_wallet_info.as_mut() {
            w.group_info = None;
        }
        assert!(cfg.validate().iter().any(|v| v.contains("groupInfo is required")));
    }

    #[test]
    fn new_group_lists_must_be_filled() {
        let mut cfg = api_new_group();
        if let Some(info) = cfg
            .api_wallet_info
            .as_mut()
            .and_then(|w| w.group_info.as_mut())
        {
            info.private_ip.clear();
            info.backup = vec!["ok.com".to_string(), " ".to_string()];
        }
        let v = cfg.validate();
        assert!(v.iter().any(|m| m.starts_with("privateIp must not be empty")));
        assert!(v.iter().any(|m| m.starts_with("backup must not contain blank")));
        assert!(!v.iter().any(|m| m.starts_with("bkIpSetId")));
    }

    #[test]
    fn existing_group_skips_list_checks() {
        let mut cfg = api_new_group();
        if let Some(w) = cfg.api_wallet_info.as_mut() {
            w.new_group = false;
            w.group_info = None;
        }
        assert!(cfg.validate().is_empty());
        assert!(cfg.new_group_info().is_none());
    }

    #[test]
    fn non_api_requires_host() {
        let cfg = WhiteLabelConfig {
            host: Some(String::new()),
            ..regular()
        };
        assert!(cfg.validate().iter().any(|v| v.contains("host is required")));
    }

    #[test]
    fn load_rejects_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wl.json");
        std::fs::write(&path, r#"{"ticketNo": "", "webSiteValue": 1}"#).unwrap();
        let err = WhiteLabelConfig::load(&path).unwrap_err();
        assert!(matches!(err, WlError::InvalidConfig(_)));
        assert!(err.violations().len() >= 3);
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wl.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = WhiteLabelConfig::load(&path).unwrap_err();
        assert!(matches!(err, WlError::InvalidConfig(_)));
        assert_eq!(err.violations().len(), 1);
        assert!(err.violations()[0].contains("line 1"));
    }

    #[test]
    fn load_reports_wrong_field_type_as_violation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wl.json");
        std::fs::write(&path, r#"{"ticketNo": "1", "webSiteValue": "many"}"#).unwrap();
        let err = WhiteLabelConfig::load(&path).unwrap_err();
        assert_eq!(err.violations().len(), 1, "{err}");
        assert!(err.violations()[0].contains("invalid type"));
    }

    #[test]
    fn missing_file_stays_an_io_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            WhiteLabelConfig::load(&dir.path().join("none.json")),
            Err(WlError::Io(_))
        ));
    }
}
