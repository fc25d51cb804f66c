//! Child keys
//!
//! A child element is stored under `"<category>:<name>"`. Only the first separator splits, so a
//! name may contain colons but a category may not.

/// Separator between category and name in a child key.
pub const CATEGORY_NAME_SEPARATOR: char = ':';

pub fn encode_child_key(category: &str, name: &str) -> String {
    let mut key = String::with_capacity(category.len() + name.len() + 1);
    key.push_str(category);
    key.push(CATEGORY_NAME_SEPARATOR);
    key.push_str(name);
    key
}

/// Split a child key into `(category, name)`. Keys without a separator are not child keys.
pub fn decode_child_key(key: &str) -> Option<(&str, &str)> {
    key.split_once(CATEGORY_NAME_SEPARATOR)
}
