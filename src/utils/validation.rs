/// Check an email address against `^[^\s@]+@[^\s@]+\.[^\s@]+$`
///
/// Exactly one `@`, no whitespace, a non-empty local part, and a domain with
/// at least one `.` that has characters on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
