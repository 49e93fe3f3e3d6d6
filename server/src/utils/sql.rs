//! SQL helpers

/// Escape LIKE metacharacters (`%`, `_`, `\`) so user text matches literally.
///
/// Pair the result with `LIKE ? ESCAPE '\'`.
///
/// ```
/// use planets_server::utils::sql::escape_like_pattern;
///
/// let pattern = format!("%{}%", escape_like_pattern("50%_off"));
/// assert_eq!(pattern, "%50\\%\\_off%");
/// ```
pub fn escape_like_pattern(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
