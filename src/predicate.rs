//! Attribute predicates — pure functions of `&[Attribute] -> bool` used by
//! [`crate::selector::Strategy::SelectOne`] and `SelectAny`.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::token::Attribute;

/// A reusable, cheaply-clonable test over a `TagOpen` token's attributes.
///
/// Wraps an `Arc<dyn Fn>` rather than a plain closure type so that a
/// [`crate::selector::Selector`] built once (e.g. `tag("a").with(has_class("x"))`)
/// can be cloned and reused across many `select` calls without re-allocating.
#[derive(Clone)]
pub struct AttributePredicate(Arc<dyn Fn(&[Attribute]) -> bool + Send + Sync>);

impl AttributePredicate {
    pub fn new(f: impl Fn(&[Attribute]) -> bool + Send + Sync + 'static) -> Self {
        AttributePredicate(Arc::new(f))
    }

    pub fn test(&self, attributes: &[Attribute]) -> bool {
        (self.0)(attributes)
    }
}

impl fmt::Debug for AttributePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AttributePredicate(..)")
    }
}

/// Matches when some attribute has key `key` (case-insensitive) and value
/// exactly `value` (case-sensitive).
pub fn attribute(key: impl Into<String>, value: impl Into<String>) -> AttributePredicate {
    let key = key.into();
    let value = value.into();
    AttributePredicate::new(move |attrs| {
        attrs.iter().any(|a| a.key_eq_ignore_ascii_case(&key) && a.value == value)
    })
}

/// Matches when some attribute (any key) has value exactly `value`.
pub fn any_attribute(value: impl Into<String>) -> AttributePredicate {
    let value = value.into();
    AttributePredicate::new(move |attrs| attrs.iter().any(|a| a.value == value))
}

/// Matches when some attribute has key `key` (case-insensitive) and a
/// value the given regex matches anywhere in.
pub fn attribute_regex(key: impl Into<String>, re: Regex) -> AttributePredicate {
    let key = key.into();
    AttributePredicate::new(move |attrs| {
        attrs.iter().any(|a| a.key_eq_ignore_ascii_case(&key) && re.is_match(&a.value))
    })
}

/// Matches when some attribute (any key) has a value the given regex
/// matches anywhere in.
pub fn any_attribute_regex(re: Regex) -> AttributePredicate {
    AttributePredicate::new(move |attrs| attrs.iter().any(|a| re.is_match(&a.value)))
}

/// Matches when the `class` attribute is present and contains `name` as a
/// plain substring (not a tokenized class-list membership test).
pub fn has_class(name: impl Into<String>) -> AttributePredicate {
    let name = name.into();
    AttributePredicate::new(move |attrs| {
        attrs.iter().any(|a| a.key_eq_ignore_ascii_case("class") && a.value.contains(name.as_str()))
    })
}

/// Matches via an arbitrary `(key, value) -> bool` test, applied to every
/// attribute until one satisfies it.
pub fn satisfies(f: impl Fn(&str, &str) -> bool + Send + Sync + 'static) -> AttributePredicate {
    AttributePredicate::new(move |attrs| attrs.iter().any(|a| f(&a.key, &a.value)))
}
