//! Pure string conversions used to derive placeholder values.
//!
//! Every transformer maps blank input (empty or whitespace only) to the
//! empty string. Transformers are plain data, so they can be stored in
//! rules, compared and reused freely.

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transformer {
    /// `hello_world` → `HelloWorld`
    SnakeToCamel,
    /// `hello_world` → `HELLOWORLD`
    SnakeToCamelUpper,
    /// `hello_world` → `helloworld`
    SnakeToCamelLower,
    /// `example.com` → `EXAMPLE_COM`
    DotToUnderscoreUpper,
    ToUpper,
    ToLower,
    RemoveWhitespace,
    Identity,
    Replace { target: String, replacement: String },
    AddPrefix(String),
    AddSuffix(String),
    /// Left-to-right pipeline.
    Chain(Vec<Transformer>),
}

static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();

fn whitespace_re() -> &'static Regex {
    WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

/// Split on `_`, capitalise each non-empty token and lowercase the rest.
pub fn snake_to_camel(input: &str) -> String {
    if is_blank(input) {
        return String::new();
    }
    let mut out = String::with_capacity(input.len());
    for word in input.split('_') {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}

impl Transformer {
    pub fn replace(target: impl Into<String>, replacement: impl Into<String>) -> Self {
        Transformer::Replace {
            target: target.into(),
            replacement: replacement.into(),
        }
    }

    pub fn add_prefix(prefix: impl Into<String>) -> Self {
        Transformer::AddPrefix(prefix.into())
    }

    pub fn add_suffix(suffix: impl Into<String>) -> Self {
        Transformer::AddSuffix(suffix.into())
    }

    /// Compose `self` then `next`. Nested chains are flattened, so grouping
    /// never changes the result.
    pub fn and_then(self, next: Transformer) -> Transformer {
        let mut steps = match self {
            Transformer::Chain(steps) => steps,
            other => vec![other],
        };
        match next {
            Transformer::Chain(more) => steps.extend(more),
            other => steps.push(other),
        }
        Transformer::Chain(steps)
    }

    pub fn apply(&self, input: &str) -> String {
        if is_blank(input) {
            return String::new();
        }
        match self {
            Transformer::SnakeToCamel => snake_to_camel(input),
            Transformer::SnakeToCamelUpper => snake_to_camel(input).to_uppercase(),
            Transformer::SnakeToCamelLower => snake_to_camel(input).to_lowercase(),
            Transformer::DotToUnderscoreUpper => input.replace('.', "_").to_uppercase(),
            Transformer::ToUpper => input.to_uppercase(),
            Transformer::ToLower => input.to_lowercase(),
            Transformer::RemoveWhitespace => whitespace_re().replace_all(input, "").into_owned(),
            Transformer::Identity => input.to_string(),
            Transformer::Replace {
                target,
                replacement,
            } => input.replace(target.as_str(), replacement),
            Transformer::AddPrefix(prefix) => format!("{prefix}{input}"),
            Transformer::AddSuffix(suffix) => format!("{input}{suffix}"),
            Transformer::Chain(steps) => steps
                .iter()
                .fold(input.to_string(), |acc, step| step.apply(&acc)),
        }
    }
}
