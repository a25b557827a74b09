//! String conversion utilities.

/// Converts an empty `String` to `None`, otherwise returns `Some(value)`.
///
/// Records store "no value" as either a missing key or an empty string.
///
/// # Examples
///
/// ```
/// use charsheet_domain::common::some_if_not_empty;
///
/// assert_eq!(some_if_not_empty("abc".to_string()), Some("abc".to_string()));
/// assert_eq!(some_if_not_empty(String::new()), None);
/// ```
pub fn some_if_not_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Pushes `value` unless an equal element is already present.
///
/// Returns `true` if the value was added.
pub fn push_unique<T: PartialEq>(items: &mut Vec<T>, value: T) -> bool {
    if items.contains(&value) {
        return false;
    }
    items.push(value);
    true
}
