// src/engine/registry.rs
//! Per-platform selector tables

use scraper::Selector;
use tracing::warn;

use crate::types::{PlatformVariant, SemanticFieldType};

use SemanticFieldType::*;

type SelectorTable = &'static [(SemanticFieldType, &'static str)];

const LINKEDIN_SELECTORS: SelectorTable = &[
    (FirstName, r#"input[name="firstName"], input[id*="first"], input[placeholder*="First"]"#),
    (LastName, r#"input[name="lastName"], input[id*="last"], input[placeholder*="Last"]"#),
    (Email, r#"input[name="email"], input[type="email"]"#),
    (Phone, r#"input[name="phone"], input[type="tel"], input[placeholder*="phone"]"#),
    (
        CoverLetter,
        r#"textarea[name="coverLetter"], textarea[placeholder*="cover"], .jobs-apply-form textarea"#,
    ),
    (Resume, r#"input[type="file"][name*="resume"], input[type="file"][accept*=".pdf"]"#),
    (LinkedinProfile, r#"input[name="linkedinProfile"], input[placeholder*="linkedin"]"#),
    (
        Location,
        r#"input[name="location"], input[placeholder*="location"], input[placeholder*="city"]"#,
    ),
    (Experience, r#"select[name*="experience"], input[name*="experience"]"#),
    (Education, r#"input[name*="education"], select[name*="education"]"#),
    (Company, r#"input[name*="company"], input[placeholder*="company"]"#),
    (
        Position,
        r#"input[name*="position"], input[placeholder*="title"], input[name*="title"]"#,
    ),
    (Salary, r#"input[name*="salary"], input[placeholder*="salary"]"#),
];

const SIMPLIFY_SELECTORS: SelectorTable = &[
    (FirstName, r#"input[name="firstName"], #firstName, input[placeholder*="first" i]"#),
    (LastName, r#"input[name="lastName"], #lastName, input[placeholder*="last" i]"#),
    (Email, r#"input[name="email"], input[type="email"], #email"#),
    (Phone, r#"input[name="phone"], input[type="tel"], #phone"#),
    (
        CoverLetter,
        r#"textarea[name*="cover"], #coverLetter, textarea[placeholder*="cover" i]"#,
    ),
    (Resume, r#"input[type="file"]"#),
    (Location, r#"input[name*="location"], #location"#),
    (Experience, r#"input[name*="experience"], select[name*="experience"]"#),
    (LinkedinProfile, r#"input[name*="linkedin"], input[placeholder*="linkedin" i]"#),
];

const JOBRIGHTAI_SELECTORS: SelectorTable = &[
    (FirstName, r#"input[name="first_name"], input[id="first_name"]"#),
    (LastName, r#"input[name="last_name"], input[id="last_name"]"#),
    (Email, r#"input[name="email"], input[type="email"]"#),
    (Phone, r#"input[name="phone"], input[type="tel"]"#),
    (CoverLetter, r#"textarea[name="cover_letter"], textarea[name="message"]"#),
    (Resume, r#"input[type="file"][name="resume"]"#),
    (Location, r#"input[name="location"]"#),
    (Experience, r#"select[name="experience_level"]"#),
];

const GENERIC_SELECTORS: SelectorTable = &[
    (
        FirstName,
        r#"input[name*="first" i], input[id*="first" i], input[placeholder*="first" i]"#,
    ),
    (
        LastName,
        r#"input[name*="last" i], input[id*="last" i], input[placeholder*="last" i]"#,
    ),
    (
        FullName,
        r#"input[name*="name" i]:not([name*="first"]):not([name*="last"]), input[placeholder*="full name" i]"#,
    ),
    (Email, r#"input[name*="email" i], input[type="email"]"#),
    (
        Phone,
        r#"input[name*="phone" i], input[type="tel"], input[placeholder*="phone" i]"#,
    ),
    (
        CoverLetter,
        r#"textarea[name*="cover" i], textarea[name*="message" i], textarea[placeholder*="cover" i]"#,
    ),
    (
        Resume,
        r#"input[type="file"], input[name*="resume" i], input[accept*="pdf"]"#,
    ),
    (
        Location,
        r#"input[name*="location" i], input[name*="city" i], input[placeholder*="location" i]"#,
    ),
    (Experience, r#"select[name*="experience" i], input[name*="experience" i]"#),
    (Company, r#"input[name*="company" i], input[placeholder*="company" i]"#),
    (
        Position,
        r#"input[name*="position" i], input[name*="title" i], input[placeholder*="title" i]"#,
    ),
];

/// One OR-combined selector pattern, kept with its source text for logs.
#[derive(Debug, Clone)]
pub struct SelectorPattern {
    pub source: &'static str,
    pub selector: Selector,
}

/// Ordered mapping from field type to selector pattern for one platform.
#[derive(Debug, Clone)]
pub struct SelectorSet {
    pub platform: PlatformVariant,
    entries: Vec<(SemanticFieldType, SelectorPattern)>,
}

impl SelectorSet {
    pub fn entries(&self) -> &[(SemanticFieldType, SelectorPattern)] {
        &self.entries
    }

    /// Pattern for a field type; `None` means no candidates, never a fault.
    pub fn pattern(&self, field_type: SemanticFieldType) -> Option<&SelectorPattern> {
        self.entries
            .iter()
            .find(|(t, _)| *t == field_type)
            .map(|(_, pattern)| pattern)
    }

    pub fn field_types(&self) -> impl Iterator<Item = SemanticFieldType> + '_ {
        self.entries.iter().map(|(t, _)| *t)
    }
}

fn table_for(platform: PlatformVariant) -> SelectorTable {
    match platform {
        PlatformVariant::Linkedin => LINKEDIN_SELECTORS,
        PlatformVariant::Simplify => SIMPLIFY_SELECTORS,
        PlatformVariant::Jobrightai => JOBRIGHTAI_SELECTORS,
        PlatformVariant::Generic | PlatformVariant::Unknown => GENERIC_SELECTORS,
    }
}

/// Resolve the selector set for a platform. `unknown` gets the generic table.
pub fn selector_set(platform: PlatformVariant) -> SelectorSet {
    let entries = table_for(platform)
        .iter()
        .filter_map(|&(field_type, source)| match Selector::parse(source) {
            Ok(selector) => Some((field_type, SelectorPattern { source, selector })),
            Err(e) => {
                warn!("Skipping unparsable {} selector for {}: {:?}", field_type, platform, e);
                None
            }
        })
        .collect();

    SelectorSet { platform, entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PLATFORMS: [PlatformVariant; 5] = [
        PlatformVariant::Linkedin,
        PlatformVariant::Simplify,
        PlatformVariant::Jobrightai,
        PlatformVariant::Generic,
        PlatformVariant::Unknown,
    ];

    #[test]
    fn test_every_pattern_parses() {
        for platform in ALL_PLATFORMS {
            let set = selector_set(platform);
            assert_eq!(
                set.entries().len(),
                table_for(platform).len(),
                "unparsable selector in {} table",
                platform
            );
        }
    }

    #[test]
    fn test_unknown_uses_generic_table() {
        let unknown: Vec<_> = selector_set(PlatformVariant::Unknown).field_types().collect();
        let generic: Vec<_> = selector_set(PlatformVariant::Generic).field_types().collect();
        assert_eq!(unknown, generic);
    }

    #[test]
    fn test_generic_covers_minimum_types() {
        let set = selector_set(PlatformVariant::Generic);
        for required in [
            FirstName, LastName, FullName, Email, Phone, CoverLetter, Resume, Location,
            Experience, Company, Position,
        ] {
            assert!(set.pattern(required).is_some(), "generic set lacks {}", required);
        }
    }

    #[test]
    fn test_missing_type_has_no_candidates() {
        let set = selector_set(PlatformVariant::Jobrightai);
        assert!(set.pattern(Salary).is_none());
        assert!(set.pattern(Company).is_none());
    }
}
