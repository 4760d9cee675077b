/// Checks that an address has the `local@domain.tld` shape.
///
/// This is deliberately shallow: one `@`, no whitespace, and a dot in the
/// domain with non-empty pieces on both sides. Deliverability is the mail
/// server's problem; the form only wants to catch obvious typos before the
/// store write.
pub fn is_valid_email(address: &str) -> bool {
    let address = address.trim();
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if address.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_minimal_address() {
        assert!(is_valid_email("a@b.co"));
    }

    #[test]
    fn test_accepts_subdomains_and_plus_tags() {
        assert!(is_valid_email("ankit.dutta+site@mail.example.org"));
    }

    #[test]
    fn test_rejects_missing_at() {
        assert!(!is_valid_email("not-an-email"));
    }

    #[test]
    fn test_rejects_missing_tld() {
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a@.co"));
    }

    #[test]
    fn test_rejects_empty_local_part() {
        assert!(!is_valid_email("@b.co"));
    }

    #[test]
    fn test_rejects_double_at() {
        assert!(!is_valid_email("a@b@c.co"));
    }

    #[test]
    fn test_rejects_whitespace() {
        assert!(!is_valid_email("a b@c.co"));
        assert!(!is_valid_email("a@b .co"));
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert!(is_valid_email("  a@b.co  "));
    }
}
