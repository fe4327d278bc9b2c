//! CAS registry number normalization and validation.
//!
//! A well-formed CAS number is `\d{1,7}-\d{2}-\d`. Normalization strips
//! labels and whitespace ("CAS No. 67-64-1" -> "67-64-1") before validating.

/// Normalize a raw CAS string to canonical `N{1,7}-NN-N` form.
///
/// Returns `None` when the input does not contain a well-formed CAS number.
pub fn normalize(raw: &str) -> Option<String> {
    let mut s = raw.trim().to_lowercase();

    // Strip leading labels like "cas", "cas no.", "cas #", "cas:".
    for prefix in ["cas no.", "cas no", "cas number", "cas#", "cas:", "cas"] {
        if let Some(rest) = s.strip_prefix(prefix) {
            s = rest.trim_start_matches([' ', '.', ':', '#']).to_string();
            break;
        }
    }

    // Keep only digits and hyphens; whitespace inside the number is noise.
    let cleaned: String = s.chars().filter(|c| c.is_ascii_digit() || *c == '-').collect();

    let parts: Vec<&str> = cleaned.split('-').collect();
    if parts.len() != 3 {
        return None;
    }
    let (first, second, third) = (parts[0], parts[1], parts[2]);
    let digits_only = |p: &str| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit());
    if !digits_only(first) || !digits_only(second) || !digits_only(third) {
        return None;
    }
    if first.len() > 7 || second.len() != 2 || third.len() != 1 {
        return None;
    }

    Some(format!("{first}-{second}-{third}"))
}

pub fn is_valid(raw: &str) -> bool {
    normalize(raw).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_cas() {
        assert_eq!(normalize("67-64-1"), Some("67-64-1".into()));
        assert_eq!(normalize("7647-01-0"), Some("7647-01-0".into()));
    }

    #[test]
    fn test_labelled_cas() {
        assert_eq!(normalize("CAS No. 67-64-1"), Some("67-64-1".into()));
        assert_eq!(normalize("CAS# 108-88-3"), Some("108-88-3".into()));
        assert_eq!(normalize("  67-64-1  "), Some("67-64-1".into()));
    }

    #[test]
    fn test_internal_whitespace() {
        assert_eq!(normalize("67 - 64 - 1"), Some("67-64-1".into()));
    }

    #[test]
    fn test_invalid_shapes_rejected() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("not a cas"), None);
        assert_eq!(normalize("67-64"), None);
        assert_eq!(normalize("67-641-1"), None);
        assert_eq!(normalize("12345678-64-1"), None); // first segment too long
        assert_eq!(normalize("67-64-12"), None);
        assert!(!is_valid("N/A"));
    }
}
