//! Placeholder maps: `{$field}` keys derived from a config record.
//!
//! Records describe their fields through [`Placeholders`]; [`auto_map`]
//! walks them and [`PlaceholderMapper`] layers derived, conditional and
//! constant entries on top, in the order the rules were added.

use crate::config::{ApiWalletInfo, ExtraProperties, GroupInfo, WhiteLabelConfig};
use crate::transform::Transformer;
use indexmap::IndexMap;

/// Insertion-ordered placeholder key → value.
pub type ReplacementMap = IndexMap<String, String>;

/// `{$name}`
pub fn placeholder_key(name: &str) -> String {
    format!("{{${name}}}")
}

// ---------------------------------------------------------------------------
// Field registration
// ---------------------------------------------------------------------------

/// What the auto-mapper sees for one declared field.
pub enum FieldValue<'a> {
    /// Absent; produces no entry.
    Null,
    /// Rendered as-is.
    Scalar(String),
    /// Only the element count is mapped, as `{$path.size}`.
    Collection(usize),
    /// Walked with `<field>.` prepended to every nested key.
    Record(&'a dyn Placeholders),
}

/// A record that can enumerate its declared fields for auto-mapping.
pub trait Placeholders {
    /// Call `visit` once per declared field, in declaration order. Fields that
    /// should never become placeholders are simply not visited.
    fn for_each_field(&self, visit: &mut dyn FnMut(&str, FieldValue<'_>));

    /// Undeclared properties appended after the declared fields.
    fn additional_properties(&self) -> Option<&ExtraProperties> {
        None
    }
}

/// Conversion of a field's value into a [`FieldValue`].
pub trait ToFieldValue {
    fn to_field_value(&self) -> FieldValue<'_>;
}

impl ToFieldValue for String {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Scalar(self.clone())
    }
}

impl ToFieldValue for bool {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Scalar(self.to_string())
    }
}

impl ToFieldValue for i64 {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Scalar(self.to_string())
    }
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    fn to_field_value(&self) -> FieldValue<'_> {
        match self {
            Some(v) => v.to_field_value(),
            None => FieldValue::Null,
        }
    }
}

impl<T> ToFieldValue for Vec<T> {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Collection(self.len())
    }
}

impl<K, V> ToFieldValue for IndexMap<K, V> {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Collection(self.len())
    }
}

impl ToFieldValue for GroupInfo {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Record(self)
    }
}

impl ToFieldValue for ApiWalletInfo {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Record(self)
    }
}

impl Placeholders for GroupInfo {
    fn for_each_field(&self, visit: &mut dyn FnMut(&str, FieldValue<'_>)) {
        visit("privateIpSetId", self.private_ip_set_id.to_field_value());
        visit("privateIp", self.private_ip.to_field_value());
        visit("bkIpSetId", self.bk_ip_set_id.to_field_value());
        visit("apiInfoBkIpSetId", self.api_info_bk_ip_set_id.to_field_value());
        visit("backup", self.backup.to_field_value());
    }
}

impl Placeholders for ApiWalletInfo {
    fn for_each_field(&self, visit: &mut dyn FnMut(&str, FieldValue<'_>)) {
        visit("cert", self.cert.to_field_value());
        visit("newGroup", self.new_group.to_field_value());
        visit("group", self.group.to_field_value());
        visit("groupInfo", self.group_info.to_field_value());
    }
}

impl Placeholders for WhiteLabelConfig {
    fn for_each_field(&self, visit: &mut dyn FnMut(&str, FieldValue<'_>)) {
        visit("sqlOnly", self.sql_only.to_field_value());
        visit("ticketNo", self.ticket_no.to_field_value());
        visit("webSiteName", self.web_site_name.to_field_value());
        visit("webSiteValue", self.web_site_value.to_field_value());
        visit("host", self.host.to_field_value());
        visit("apiWhiteLabel", self.api_white_label.to_field_value());
        visit("customized", self.customized.to_field_value());
        visit("jiraSummary", self.jira_summary.to_field_value());
        visit("fixVersion", self.fix_version.to_field_value());
        visit("developer", self.developer.to_field_value());
        visit("apiWalletInfo", self.api_wallet_info.to_field_value());
    }

    fn additional_properties(&self) -> Option<&ExtraProperties> {
        Some(&self.additional_properties)
    }
}

// ---------------------------------------------------------------------------
// Auto-mapping
// ---------------------------------------------------------------------------

/// Map every non-null declared field of `record` (recursively), then its
/// additional properties.
pub fn auto_map(record: &dyn Placeholders) -> ReplacementMap {
    let mut out = ReplacementMap::new();
    walk(record, "", &mut out);
    out
}

fn walk(record: &dyn Placeholders, prefix: &str, out: &mut ReplacementMap) {
    record.for_each_field(&mut |name, value| match value {
        FieldValue::Null => {}
        FieldValue::Scalar(s) => {
            out.insert(placeholder_key(&format!("{prefix}{name}")), s);
        }
        FieldValue::Collection(len) => {
            out.insert(
                placeholder_key(&format!("{prefix}{name}.size")),
                len.to_string(),
            );
        }
        FieldValue::Record(nested) => walk(nested, &format!("{prefix}{name}."), out),
    });

    if let Some(extras) = record.additional_properties() {
        for (name, value) in extras {
            if let Some(value) = value {
                out.insert(placeholder_key(&format!("{prefix}{name}")), value.to_string());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

type Extractor<'r, T> = Box<dyn Fn(&T) -> Option<String> + 'r>;

/// One step of map construction.
pub enum Rule<'r, T> {
    AutoMap,
    /// Computed from the config; `None` adds nothing.
    Derived { key: String, extract: Extractor<'r, T> },
    Constant { key: String, value: String },
    PutAll(ReplacementMap),
}

impl<'r, T: Placeholders> Rule<'r, T> {
    pub fn derived(key: impl Into<String>, extract: impl Fn(&T) -> Option<String> + 'r) -> Self {
        Rule::Derived {
            key: key.into(),
            extract: Box::new(extract),
        }
    }

    /// Derived only when `condition` holds.
    pub fn derived_if(
        key: impl Into<String>,
        condition: impl Fn(&T) -> bool + 'r,
        extract: impl Fn(&T) -> Option<String> + 'r,
    ) -> Self {
        Self::derived(key, move |c| if condition(c) { extract(c) } else { None })
    }

    /// A field passed through a transformer.
    pub fn derived_with(
        key: impl Into<String>,
        field: impl Fn(&T) -> Option<&str> + 'r,
        transformer: Transformer,
    ) -> Self {
        Self::derived(key, move |c| field(c).map(|v| transformer.apply(v)))
    }

    pub fn constant(key: impl Into<String>, value: impl Into<String>) -> Self {
        Rule::Constant {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn apply(&self, config: &T, out: &mut ReplacementMap) {
        match self {
            Rule::AutoMap => out.extend(auto_map(config)),
            Rule::Derived { key, extract } => {
                if let Some(value) = extract(config) {
                    out.insert(key.clone(), value);
                }
            }
            Rule::Constant { key, value } => {
                out.insert(key.clone(), value.clone());
            }
            Rule::PutAll(map) => out.extend(map.iter().map(|(k, v)| (k.clone(), v.clone()))),
        }
    }
}

// ---------------------------------------------------------------------------
// PlaceholderMapper
// ---------------------------------------------------------------------------

/// Fluent front end over a list of [`Rule`]s.
///
/// ```
/// use wl_core::config::WhiteLabelConfig;
/// use wl_core::placeholder::PlaceholderMapper;
/// use wl_core::transform::Transformer;
///
/// let config = WhiteLabelConfig {
///     web_site_name: "hello_world".into(),
///     ..Default::default()
/// };
/// let map = PlaceholderMapper::builder(&config)
///     .auto_map()
///     .derived_with("{$className}", |c| Some(c.web_site_name.as_str()), Transformer::SnakeToCamel)
///     .constant("{$systemName}", "WhiteLabelSystem")
///     .build();
/// assert_eq!(map["{$webSiteName}"], "hello_world");
/// assert_eq!(map["{$className}"], "HelloWorld");
/// ```
pub struct PlaceholderMapper<'c, 'r, T> {
    config: &'c T,
    rules: Vec<Rule<'r, T>>,
}

impl<'c, 'r, T: Placeholders> PlaceholderMapper<'c, 'r, T> {
    pub fn builder(config: &'c T) -> Self {
        Self {
            config,
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule<'r, T>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn auto_map(self) -> Self {
        self.rule(Rule::AutoMap)
    }

    pub fn derived(
        self,
        key: impl Into<String>,
        extract: impl Fn(&T) -> Option<String> + 'r,
    ) -> Self {
        self.rule(Rule::derived(key, extract))
    }

    pub fn derived_if(
        self,
        key: impl Into<String>,
        condition: impl Fn(&T) -> bool + 'r,
        extract: impl Fn(&T) -> Option<String> + 'r,
    ) -> Self {
        self.rule(Rule::derived_if(key, condition, extract))
    }

    pub fn derived_with(
        self,
        key: impl Into<String>,
        field: impl Fn(&T) -> Option<&str> + 'r,
        transformer: Transformer,
    ) -> Self {
        self.rule(Rule::derived_with(key, field, transformer))
    }

    pub fn constant(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.rule(Rule::constant(key, value))
    }

    pub fn put(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.rule(Rule::constant(key, value))
    }

    pub fn put_all(self, map: ReplacementMap) -> Self {
        self.rule(Rule::PutAll(map))
    }

    /// Apply the rules in order. Later rules overwrite a key's value but
    /// keep its original position.
    pub fn build(self) -> ReplacementMap {
        let mut out = ReplacementMap::new();
        for rule in &self.rules {
            rule.apply(self.config, &mut out);
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
