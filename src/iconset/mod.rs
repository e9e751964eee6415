//! Iconify icon-set documents.
//!
//! Only the fields the extractor and the runtime registry need are modelled;
//! metadata such as `info`, `chars` or `categories` is dropped on load.

mod source;

pub use source::{DirectorySource, ICONIFY_JSON_DIR_ENV, IconSetSource, MemorySource};

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;

/// A full or partial icon collection in IconifyJSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconifyJson {
    pub prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<u64>,
    #[serde(default)]
    pub icons: BTreeMap<String, IconData>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: BTreeMap<String, AliasData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Number>,
}

/// Optional viewbox and transformation props shared by icons and aliases.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h_flip: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v_flip: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IconData {
    pub body: String,
    #[serde(flatten)]
    pub props: IconProps,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AliasData {
    pub parent: String,
    #[serde(flatten)]
    pub props: IconProps,
}

impl IconifyJson {
    /// An empty document carrying this set's prefix and default dimensions.
    pub fn empty_like(&self) -> Self {
        Self {
            prefix: self.prefix.clone(),
            last_modified: self.last_modified,
            icons: BTreeMap::new(),
            aliases: BTreeMap::new(),
            left: self.left.clone(),
            top: self.top.clone(),
            width: self.width.clone(),
            height: self.height.clone(),
        }
    }
}
