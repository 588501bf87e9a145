//! Item template substitution
//!
//! Parameter values may reference the current item with a `{{item}}`
//! placeholder. Matching ignores case and whitespace inside the braces
//! (`{{Item}}`, `{{ ITEM }}`); replacement is literal, so an item containing
//! `$` or braces is inserted as-is and never substituted again.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{NoExpand, Regex};

use crate::domain::job::ResolvedInputs;

static ITEM_PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn item_placeholder() -> &'static Regex {
    ITEM_PLACEHOLDER.get_or_init(|| Regex::new(r"(?i)\{\{\s*item\s*\}\}").unwrap())
}

/// Replaces every item placeholder in `value` with `item`
pub fn substitute_item<'a>(value: &'a str, item: &str) -> Cow<'a, str> {
    item_placeholder().replace_all(value, NoExpand(item))
}

/// Builds the concrete inputs for one item
///
/// Params are applied in order; a key declared twice keeps the later value.
/// An empty item turns every placeholder into an empty string.
pub fn resolve_inputs(params: &[(String, String)], item: &str) -> ResolvedInputs {
    let mut inputs = ResolvedInputs::with_capacity(params.len());
    for (key, template) in params {
        inputs.insert(key.clone(), substitute_item(template, item).into_owned());
    }
    inputs
}
