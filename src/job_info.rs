// src/job_info.rs
//! Scrape the posting details shown on the current page

use lazy_static::lazy_static;
use scraper::Selector;
use tracing::info;

use crate::dom::PageDom;
use crate::types::{JobInfo, PlatformVariant};
use crate::utils::clean_text;

struct JobSelectors {
    title: Selector,
    company: Selector,
    location: Selector,
    description: Option<Selector>,
}

impl JobSelectors {
    fn parse(title: &str, company: &str, location: &str, description: Option<&str>) -> Self {
        let parse = |css: &str| Selector::parse(css).expect("job selector is valid");
        Self {
            title: parse(title),
            company: parse(company),
            location: parse(location),
            description: description.map(parse),
        }
    }
}

lazy_static! {
    static ref LINKEDIN: JobSelectors = JobSelectors::parse(
        ".jobs-unified-top-card__job-title",
        ".jobs-unified-top-card__company-name",
        ".jobs-unified-top-card__bullet",
        Some(".jobs-box__html-content"),
    );
    static ref GENERIC: JobSelectors = JobSelectors::parse(
        "h1, .job-title, .position-title",
        ".company-name, .employer",
        ".location, .job-location",
        None,
    );
}

fn find_text<D: PageDom>(dom: &D, selector: &Selector) -> String {
    dom.first_text(selector)
        .map(|text| clean_text(&text))
        .unwrap_or_default()
}

/// Posting details for the page. Missing elements yield empty strings.
pub fn extract_job_info<D: PageDom>(dom: &D, platform: PlatformVariant) -> JobInfo {
    let selectors: &JobSelectors = match platform {
        PlatformVariant::Linkedin => &LINKEDIN,
        _ => &GENERIC,
    };

    let job = JobInfo {
        title: find_text(dom, &selectors.title),
        company: find_text(dom, &selectors.company),
        location: find_text(dom, &selectors.location),
        description: selectors
            .description
            .as_ref()
            .map(|selector| find_text(dom, selector))
            .unwrap_or_default(),
        requirements: Vec::new(),
        platform,
    };

    info!("Extracted job: '{}' at '{}'", job.title, job.company);
    job
}
