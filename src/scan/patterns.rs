//! Icon reference patterns.
//!
//! A pattern only has to locate a reference-shaped span of text; the
//! `prefix:name` token is then taken from the first token inside the match.
//! This keeps patterns independent of how later stages consume them.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::errors::PreloadError;

/// `icon: 'p:n'`, `activeIcon: "p:n"` and markup `icon="p:n"`.
pub const CONFIG_ICON_PATTERN: &str = r#"\b(?:icon|activeIcon)\s*:\s*['"][a-z0-9-]+:[a-z0-9-]+['"]|\bicon=['"][a-z0-9-]+:[a-z0-9-]+['"]"#;

/// `createIconifyIcon('p:n')` factory calls.
pub const FACTORY_CALL_PATTERN: &str =
    r#"\bcreateIconifyIcon\s*\(\s*['"][a-z0-9-]+:[a-z0-9-]+['"]\s*\)"#;

static ICON_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-z0-9-]+):([a-z0-9-]+)").expect("icon token regex is valid")
});

/// An icon reference, `prefix:name`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IconRef {
    pub prefix: String,
    pub name: String,
}

impl IconRef {
    pub fn new(prefix: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for IconRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.name)
    }
}

impl FromStr for IconRef {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, name) = s
            .split_once(':')
            .ok_or_else(|| anyhow::anyhow!("Icon reference '{}' is missing ':'", s))?;
        if !is_icon_segment(prefix) || !is_icon_segment(name) {
            anyhow::bail!(
                "Invalid icon reference '{}': prefix and name must match [a-z0-9-]+",
                s
            );
        }
        Ok(Self::new(prefix, name))
    }
}

fn is_icon_segment(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Extract the first `prefix:name` token from a matched span.
pub fn extract_icon(text: &str) -> Option<IconRef> {
    ICON_TOKEN
        .captures(text)
        .map(|caps| IconRef::new(&caps[1], &caps[2]))
}

/// One recognized syntactic form of icon reference.
#[derive(Debug, Clone)]
pub struct ReferencePattern {
    pub label: String,
    regex: Regex,
}

impl ReferencePattern {
    pub fn new(label: impl Into<String>, pattern: &str) -> Result<Self, PreloadError> {
        let regex = Regex::new(pattern).map_err(|source| PreloadError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            label: label.into(),
            regex,
        })
    }

    /// Built-in config-field and factory-call forms.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self {
                label: "config".to_string(),
                regex: Regex::new(CONFIG_ICON_PATTERN).expect("config pattern is valid"),
            },
            Self {
                label: "factory".to_string(),
                regex: Regex::new(FACTORY_CALL_PATTERN).expect("factory pattern is valid"),
            },
        ]
    }

    /// Compile user-supplied patterns, falling back to the defaults when none are given.
    pub fn from_config(patterns: &[String]) -> Result<Vec<Self>, PreloadError> {
        if patterns.is_empty() {
            return Ok(Self::defaults());
        }
        patterns
            .iter()
            .enumerate()
            .map(|(i, p)| Self::new(format!("custom-{}", i + 1), p))
            .collect()
    }

    /// References found in a single line, in match order.
    pub fn find_in_line<'a>(&'a self, line: &'a str) -> impl Iterator<Item = IconRef> + 'a {
        self.regex
            .find_iter(line)
            .filter_map(|m| extract_icon(m.as_str()))
    }
}

/// Every reference in `text`, line by line and pattern by pattern.
///
/// Duplicates are kept so callers can count occurrences.
pub fn scan_text(text: &str, patterns: &[ReferencePattern]) -> Vec<IconRef> {
    let mut found = Vec::new();
    for line in text.lines() {
        for pattern in patterns {
            found.extend(pattern.find_in_line(line));
        }
    }
    found
}
