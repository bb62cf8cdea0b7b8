// src/engine/fill_pass.rs
//! One scan, classify, resolve, write cycle

use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info};

use super::classifier::classify_field;
use super::executor::{FillExecutor, HighlightTracker};
use super::registry::SelectorSet;
use super::resolver::resolve_value;
use super::scanner::scan_fields;
use crate::dom::PageDom;
use crate::types::{
    AnalyzedField, FieldAnalysis, FieldDescriptor, FillReport, FilledField, PersonalInfoRecord,
    PlatformVariant, SemanticFieldType,
};

/// Field type for every scanned control: the first binding entry whose
/// pattern matches claims it; unclaimed controls go through the classifier.
fn assign_types<D: PageDom>(
    dom: &D,
    binding: &SelectorSet,
    fields: &[FieldDescriptor],
) -> Vec<SemanticFieldType> {
    let mut claimed: Vec<Option<SemanticFieldType>> = vec![None; fields.len()];

    for (field_type, pattern) in binding.entries() {
        for (slot, field) in claimed.iter_mut().zip(fields) {
            if slot.is_none() && dom.matches(field.handle, &pattern.selector) {
                debug!(
                    "'{}' claimed as {} by `{}`",
                    field.display_name(),
                    field_type,
                    pattern.source
                );
                *slot = Some(*field_type);
            }
        }
    }

    claimed
        .into_iter()
        .zip(fields)
        .map(|(claim, field)| claim.unwrap_or_else(|| classify_field(field)))
        .collect()
}

pub fn run_fill_pass<D: PageDom>(
    dom: &mut D,
    binding: &SelectorSet,
    record: &PersonalInfoRecord,
    executor: &FillExecutor,
    highlights: &mut HighlightTracker,
    now: Instant,
) -> FillReport {
    let fields = scan_fields(dom);
    let types = assign_types(dom, binding, &fields);
    let mut values: HashMap<SemanticFieldType, Option<String>> = HashMap::new();
    let mut report = FillReport::new(binding.platform);

    for (field, field_type) in fields.iter().zip(types) {
        if field_type == SemanticFieldType::Unknown {
            report.skipped_unclassified += 1;
            continue;
        }

        let value = values
            .entry(field_type)
            .or_insert_with(|| resolve_value(field_type, record))
            .clone();

        let Some(value) = value else {
            debug!("No data for {} field '{}'", field_type, field.display_name());
            report.skipped_no_data += 1;
            continue;
        };

        if executor.fill(dom, highlights, field, Some(&value), now) {
            report.filled += 1;
            report.fields.push(FilledField {
                field_type,
                element: field.tag.clone(),
                name: field.display_name().to_string(),
                value,
            });
        } else {
            report.failed += 1;
        }
    }

    info!(
        "{} on {} platform ({} without data, {} unclassified, {} failed)",
        report.summary(),
        report.platform,
        report.skipped_no_data,
        report.skipped_unclassified,
        report.failed
    );
    report
}

/// Describe the fillable controls on the page without touching them.
pub fn analyze_fields<D: PageDom>(dom: &D, platform: PlatformVariant) -> FieldAnalysis {
    let fields: Vec<AnalyzedField> = scan_fields(dom)
        .iter()
        .map(|field| AnalyzedField {
            field_type: classify_field(field),
            element: field.tag.clone(),
            name: field.display_name().to_string(),
            placeholder: field.placeholder.clone(),
            required: field.required,
        })
        .collect();

    info!("Found {} form fields on {} platform", fields.len(), platform);
    FieldAnalysis {
        platform,
        fields_found: fields.len(),
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{HtmlPage, PageLocation};
    use crate::engine::registry::selector_set;
    use std::time::Duration;

    fn generic_page(markup: &str) -> HtmlPage {
        HtmlPage::parse(PageLocation::new("careers.acme.io", "/apply"), markup)
    }

    fn executor() -> FillExecutor {
        FillExecutor::new(Duration::from_millis(2000))
    }

    #[test]
    fn test_binding_claims_before_classifier() {
        let page = generic_page(
            r#"<input type="email" name="contact">
               <input name="linkedin_url">
               <input type="file" name="company_doc">"#,
        );
        let fields = scan_fields(&page);
        let types = assign_types(&page, &selector_set(PlatformVariant::Generic), &fields);

        assert_eq!(
            types,
            vec![
                SemanticFieldType::Email,
                // not in the generic table, so the classifier decides
                SemanticFieldType::LinkedinProfile,
                // resume precedes company in table order
                SemanticFieldType::Resume,
            ]
        );
    }

    #[test]
    fn test_value_resolved_once_and_applied_to_every_match() {
        let mut page = generic_page(
            r#"<input name="email"><input name="backup_email"><input name="notes">"#,
        );
        let record = PersonalInfoRecord {
            email: "ada@x.com".to_string(),
            ..Default::default()
        };
        let mut highlights = HighlightTracker::default();

        let report = run_fill_pass(
            &mut page,
            &selector_set(PlatformVariant::Generic),
            &record,
            &executor(),
            &mut highlights,
            Instant::now(),
        );

        assert_eq!(report.filled, 2);
        assert_eq!(report.skipped_unclassified, 1);
        assert!(report.fields.iter().all(|f| f.value == "ada@x.com"));
    }

    #[test]
    fn test_assignment_failures_are_counted_not_raised() {
        // generic email selector also matches this file input
        let mut page = generic_page(
            r#"<input type="file" name="email_attachment"><input name="phone">"#,
        );
        let record = PersonalInfoRecord {
            email: "ada@x.com".to_string(),
            phone: "555-123-4567".to_string(),
            ..Default::default()
        };
        let mut highlights = HighlightTracker::default();

        let report = run_fill_pass(
            &mut page,
            &selector_set(PlatformVariant::Generic),
            &record,
            &executor(),
            &mut highlights,
            Instant::now(),
        );

        assert_eq!(report.filled, 1);
        assert_eq!(report.failed, 1);
    }

    #[test]
    fn test_analyze_fields_reports_classification() {
        let page = generic_page(
            r#"<input name="first_name" placeholder="First name" required>
               <input id="city_input">
               <textarea placeholder="Cover Letter"></textarea>
               <input type="submit" value="Send">"#,
        );

        let analysis = analyze_fields(&page, PlatformVariant::Generic);
        assert_eq!(analysis.fields_found, 3);
        assert_eq!(analysis.fields[0].field_type, SemanticFieldType::FirstName);
        assert!(analysis.fields[0].required);
        assert_eq!(analysis.fields[1].name, "city_input");
        assert_eq!(analysis.fields[1].field_type, SemanticFieldType::Location);
        assert_eq!(analysis.fields[2].field_type, SemanticFieldType::CoverLetter);
        assert_eq!(analysis.fields[2].element, "textarea");
    }
}
