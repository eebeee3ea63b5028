//! Website-domain normalization shared by the resolver and the cache key.

/// Extracts the bare domain from a website URL or hostname.
///
/// Strips the scheme, path, query, port, and a single leading `www.`, and
/// lowercases the result. Accepts inputs with or without a scheme.
#[must_use]
pub fn website_domain(url: &str) -> String {
    let lowered = url.to_lowercase();
    let without_scheme = lowered
        .split_once("://")
        .map_or(lowered.as_str(), |(_, rest)| rest);
    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(without_scheme);
    let host = host.split(':').next().unwrap_or(host);
    let host = host.strip_prefix("www.").unwrap_or(host);
    host.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scheme_and_path() {
        assert_eq!(
            website_domain("https://abcpestcontrol.com/contact"),
            "abcpestcontrol.com"
        );
    }

    #[test]
    fn strips_leading_www() {
        assert_eq!(
            website_domain("https://www.abcpestcontrol.com"),
            "abcpestcontrol.com"
        );
    }

    #[test]
    fn accepts_bare_hostname() {
        assert_eq!(website_domain("AbcPestControl.com"), "abcpestcontrol.com");
    }

    #[test]
    fn strips_port_and_query() {
        assert_eq!(
            website_domain("http://example.com:8080/a?b=c"),
            "example.com"
        );
    }

    #[test]
    fn www_in_the_middle_is_kept() {
        assert_eq!(website_domain("https://my.www.site.com"), "my.www.site.com");
    }
}
