use sha2::{Digest, Sha256};

use precall_core::website_domain;

/// Builds the cache key for one set of audit inputs:
/// `{domain}_{city}_{service}_{name_hash}`.
///
/// The business name is hashed (first 16 hex chars of SHA-256) rather than
/// embedded, which keeps the key length bounded and free of user-supplied
/// punctuation.
#[must_use]
pub fn cache_key(business_name: &str, website_url: &str, city: &str, service: &str) -> String {
    let domain = website_domain(website_url);
    let digest = Sha256::digest(business_name.as_bytes());
    let name_hash: String = digest[..8].iter().map(|b| format!("{b:02x}")).collect();
    format!("{domain}_{city}_{service}_{name_hash}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_embeds_domain_city_and_service() {
        let key = cache_key(
            "ABC Pest Control",
            "https://www.abcpestcontrol.com/contact",
            "Austin",
            "pest_control",
        );
        assert!(key.starts_with("abcpestcontrol.com_Austin_pest_control_"));
        let hash = key.rsplit('_').next().unwrap();
        assert_eq!(hash.len(), 16);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn key_is_stable_for_identical_inputs() {
        let a = cache_key("ABC Pest Control", "abcpestcontrol.com", "Austin", "pest_control");
        let b = cache_key("ABC Pest Control", "abcpestcontrol.com", "Austin", "pest_control");
        assert_eq!(a, b);
    }

    #[test]
    fn different_names_produce_different_keys() {
        let a = cache_key("ABC Pest Control", "abcpestcontrol.com", "Austin", "pest_control");
        let b = cache_key("ABC Pest Co", "abcpestcontrol.com", "Austin", "pest_control");
        assert_ne!(a, b);
    }
}
