// src/engine/platform.rs
//! Decide which selector table applies to the current page

use lazy_static::lazy_static;
use scraper::Selector;

use crate::dom::PageDom;
use crate::types::PlatformVariant;

const GENERIC_FORM_INDICATORS: &[&str] = &[
    r#"input[name*="name"]"#,
    r#"input[name*="email"]"#,
    r#"input[name*="phone"]"#,
    r#"textarea[name*="cover"]"#,
    r#"input[type="file"]"#,
    ".application-form",
    ".job-application",
    ".apply-form",
];

lazy_static! {
    static ref LINKEDIN_APPLY_FORM: Selector =
        Selector::parse(".jobs-apply-form").expect("apply form selector is valid");
    static ref INDICATORS: Vec<Selector> = GENERIC_FORM_INDICATORS
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .collect();
}

fn is_linkedin_host(host: &str) -> bool {
    host == "linkedin.com" || host.ends_with(".linkedin.com")
}

/// Resolve the platform for the document's current location and content.
///
/// A LinkedIn host only counts as `linkedin` on a jobs path or when the
/// apply form is already rendered; otherwise it is `unknown`, not `generic`.
pub fn detect_platform<D: PageDom>(dom: &D) -> PlatformVariant {
    let location = dom.location();

    if is_linkedin_host(&location.host) {
        if location.path.contains("/jobs/") || dom.query_exists(&LINKEDIN_APPLY_FORM) {
            return PlatformVariant::Linkedin;
        }
        return PlatformVariant::Unknown;
    }

    if location.host.contains("simplify.jobs") {
        return PlatformVariant::Simplify;
    }

    if location.host.contains("jobrightai.com") {
        return PlatformVariant::Jobrightai;
    }

    if looks_like_application_form(dom) {
        return PlatformVariant::Generic;
    }

    PlatformVariant::Unknown
}

/// Probe for any of the common application-form indicators.
pub fn looks_like_application_form<D: PageDom>(dom: &D) -> bool {
    INDICATORS.iter().any(|selector| dom.query_exists(selector))
}
