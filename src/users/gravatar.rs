use md5::{Digest, Md5};

/// Deterministic avatar for an email: 200px, PG-rated, "mystery man"
/// fallback when the address has no gravatar.
pub fn gravatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = Md5::digest(normalized.as_bytes());
    let hash: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    format!("https://www.gravatar.com/avatar/{hash}?s=200&r=pg&d=mm")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_the_documented_gravatar_example() {
        // md5("myemailaddress@example.com") from gravatar's own docs.
        let url = gravatar_url("MyEmailAddress@example.com ");
        assert_eq!(
            url,
            "https://www.gravatar.com/avatar/0bc83cb571cd1c50ba6f3e8a78ef1346?s=200&r=pg&d=mm"
        );
    }

    #[test]
    fn is_deterministic_and_case_insensitive() {
        assert_eq!(gravatar_url("dev@example.com"), gravatar_url("DEV@example.com"));
        assert_eq!(gravatar_url("dev@example.com"), gravatar_url(" dev@example.com "));
    }
}
