use once_cell::sync::Lazy;
use regex::Regex;

static INDEX_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\d+\]").unwrap());

/// Replace every bracketed integer index segment in an error key with the
/// literal `[array]` marker, so violations from different array positions
/// collapse into one category.
///
/// The substitution is global and non-overlapping: a key that traverses
/// several arrays has every index normalized independently. The function is a
/// fixed point: normalizing an already-normalized key changes nothing.
pub fn normalize_key(key: &str) -> String {
    INDEX_SEGMENT.replace_all(key, "[array]").into_owned()
}
