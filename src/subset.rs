//! Subset extraction.
//!
//! Produces a reduced icon set holding exactly the requested names. Aliases
//! are flattened into concrete icons so the runtime registry never has to
//! follow a parent link.

use std::collections::BTreeSet;

use crate::errors::PreloadError;
use crate::iconset::{IconData, IconProps, IconifyJson};

/// Longest alias chain followed before giving up.
pub const MAX_ALIAS_DEPTH: usize = 36;

/// Extract `names` from `set`.
///
/// Names are processed in lexicographic order and deduplicated. Any name that
/// cannot be resolved to icon data fails the whole extraction.
pub fn extract_subset<S: AsRef<str>>(
    set: &IconifyJson,
    names: &[S],
) -> Result<IconifyJson, PreloadError> {
    let names: BTreeSet<&str> = names.iter().map(|n| n.as_ref()).collect();

    let mut subset = set.empty_like();
    let mut missing = Vec::new();

    for name in names {
        match resolve_icon(set, name) {
            Some(icon) => {
                subset.icons.insert(name.to_string(), icon);
            }
            None => missing.push(name.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(PreloadError::IconsNotFound {
            prefix: set.prefix.clone(),
            names: missing,
        });
    }
    if subset.icons.is_empty() {
        return Err(PreloadError::EmptySubset {
            prefix: set.prefix.clone(),
        });
    }

    tracing::debug!(prefix = %set.prefix, icons = subset.icons.len(), "extracted subset");
    Ok(subset)
}

/// Resolve `name` to concrete icon data, flattening any alias chain.
///
/// Returns `None` for unknown names, dangling parents, cycles and chains
/// deeper than [`MAX_ALIAS_DEPTH`].
pub fn resolve_icon(set: &IconifyJson, name: &str) -> Option<IconData> {
    if let Some(icon) = set.icons.get(name) {
        return Some(icon.clone());
    }

    // Child-most props first.
    let mut chain: Vec<&IconProps> = Vec::new();
    let mut visited = BTreeSet::new();
    let mut current = name;

    loop {
        if chain.len() > MAX_ALIAS_DEPTH || !visited.insert(current) {
            return None;
        }
        if let Some(icon) = set.icons.get(current) {
            let mut props = icon.props.clone();
            for child in chain.iter().rev() {
                props = merge_props(&props, child);
            }
            return Some(IconData {
                body: icon.body.clone(),
                props,
            });
        }
        let alias = set.aliases.get(current)?;
        chain.push(&alias.props);
        current = alias.parent.as_str();
    }
}

/// Merge child props over parent props.
///
/// Transformations combine: rotations add (mod 4) and flips toggle. Every
/// other prop comes from the child when set, else the parent.
fn merge_props(parent: &IconProps, child: &IconProps) -> IconProps {
    let rotate = (parent.rotate.unwrap_or(0) % 4 + child.rotate.unwrap_or(0) % 4) % 4;
    let h_flip = parent.h_flip.unwrap_or(false) != child.h_flip.unwrap_or(false);
    let v_flip = parent.v_flip.unwrap_or(false) != child.v_flip.unwrap_or(false);

    IconProps {
        left: child.left.clone().or_else(|| parent.left.clone()),
        top: child.top.clone().or_else(|| parent.top.clone()),
        width: child.width.clone().or_else(|| parent.width.clone()),
        height: child.height.clone().or_else(|| parent.height.clone()),
        rotate: (rotate != 0).then_some(rotate),
        h_flip: h_flip.then_some(true),
        v_flip: v_flip.then_some(true),
        hidden: child.hidden.or(parent.hidden),
    }
}
