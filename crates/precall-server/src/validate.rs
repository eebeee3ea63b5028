//! Request validation, applied before any upstream call is made.

use serde::Deserialize;

use precall_core::is_allowed_service;

#[derive(Debug, Clone, Deserialize)]
pub struct AuditRequest {
    pub business_name: String,
    pub website_url: String,
    pub city: String,
    pub primary_service: String,
}

/// Validates an audit request, returning the first failure as a message.
///
/// - `business_name`: 2..=50 characters after trimming
/// - `city`: 2..=50 characters, letters, spaces, and hyphens only
/// - `primary_service`: must be in the service catalog
/// - `website_url`: non-empty
///
/// # Errors
///
/// Returns a human-readable description of the first failed rule.
pub fn validate(request: &AuditRequest) -> Result<(), String> {
    let name_len = request.business_name.trim().chars().count();
    if !(2..=50).contains(&name_len) {
        return Err("business_name must be 2-50 characters".to_owned());
    }

    let city = request.city.trim();
    let city_len = city.chars().count();
    if !(2..=50).contains(&city_len) {
        return Err("city must be 2-50 characters".to_owned());
    }
    if !city
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace() || c == '-')
    {
        return Err("city must contain only letters, spaces, and hyphens".to_owned());
    }

    if !is_allowed_service(&request.primary_service) {
        return Err(format!(
            "primary_service '{}' is not in the service catalog",
            request.primary_service
        ));
    }

    if request.website_url.trim().is_empty() {
        return Err("website_url must not be empty".to_owned());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> AuditRequest {
        AuditRequest {
            business_name: "ABC Pest Control".to_owned(),
            website_url: "abcpestcontrol.com".to_owned(),
            city: "Austin".to_owned(),
            primary_service: "pest_control".to_owned(),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(validate(&request()).is_ok());
    }

    #[test]
    fn single_char_name_is_rejected() {
        let mut req = request();
        req.business_name = "A".to_owned();
        assert!(validate(&req).unwrap_err().contains("business_name"));
    }

    #[test]
    fn overlong_name_is_rejected() {
        let mut req = request();
        req.business_name = "x".repeat(51);
        assert!(validate(&req).is_err());
    }

    #[test]
    fn city_with_digits_is_rejected() {
        let mut req = request();
        req.city = "Austin 78701".to_owned();
        assert!(validate(&req).unwrap_err().contains("letters"));
    }

    #[test]
    fn hyphenated_city_passes() {
        let mut req = request();
        req.city = "Winston-Salem".to_owned();
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn unknown_service_is_rejected() {
        let mut req = request();
        req.primary_service = "roof_repair".to_owned();
        assert!(validate(&req).unwrap_err().contains("primary_service"));
    }

    #[test]
    fn empty_website_is_rejected() {
        let mut req = request();
        req.website_url = "  ".to_owned();
        assert!(validate(&req).unwrap_err().contains("website_url"));
    }
}
