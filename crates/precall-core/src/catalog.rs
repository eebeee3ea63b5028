//! Service catalog and vendor signature lists.

/// Service slugs accepted by request validation.
pub const ALLOWED_SERVICES: &[&str] = &[
    "pest_control",
    "termite_treatment",
    "rodent_control",
    "mosquito_control",
    "wildlife_removal",
    "general_pest_management",
    "fumigation",
    "bed_bug_treatment",
    "ant_control",
    "cockroach_control",
    "bee_control",
];

/// Call-tracking vendor signatures matched against script srcs and page text.
pub const CALL_TRACKING_VENDORS: &[&str] = &[
    "callrail",
    "calltrackingmetrics",
    "whatconverts",
    "invoca",
    "ringba",
];

/// Hosted-form vendor signatures (a literal `<form` tag is checked first).
pub const FORM_VENDORS: &[&str] = &[
    "gravity-forms",
    "gravityforms",
    "formspree",
    "typeform",
    "hubspot",
];

/// Scheduling widget signatures.
pub const SCHEDULING_WIDGETS: &[&str] = &["calendly", "acuity", "hubspot scheduling", "booking.com"];

#[must_use]
pub fn is_allowed_service(slug: &str) -> bool {
    ALLOWED_SERVICES.contains(&slug)
}

/// Human-readable name for a service slug, used in opportunity text.
///
/// Unknown slugs fall back to the slug with underscores replaced, so the
/// generated text stays readable even if the catalog lags behind intake.
#[must_use]
pub fn service_readable(slug: &str) -> String {
    match slug {
        "general_pest_management" => "pest management".to_owned(),
        "bee_control" => "bee removal".to_owned(),
        _ => slug.replace('_', " "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_services_are_allowed() {
        assert!(is_allowed_service("pest_control"));
        assert!(is_allowed_service("bee_control"));
    }

    #[test]
    fn unknown_service_is_rejected() {
        assert!(!is_allowed_service("roofing"));
        assert!(!is_allowed_service(""));
    }

    #[test]
    fn readable_names_match_catalog() {
        assert_eq!(service_readable("pest_control"), "pest control");
        assert_eq!(service_readable("general_pest_management"), "pest management");
        assert_eq!(service_readable("bee_control"), "bee removal");
    }

    #[test]
    fn readable_name_falls_back_to_slug() {
        assert_eq!(service_readable("crawl_space_repair"), "crawl space repair");
    }
}
