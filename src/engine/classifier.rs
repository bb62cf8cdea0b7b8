// src/engine/classifier.rs
//! Heuristic field classification from static attributes

use crate::types::{ControlKind, FieldDescriptor, SemanticFieldType};

/// Map one control to exactly one field type.
///
/// Text rules are evaluated in a fixed order and the first match wins. A file
/// input is `resume` regardless of its text signals.
pub fn classify_field(field: &FieldDescriptor) -> SemanticFieldType {
    classify(
        &field.name,
        &field.id,
        &field.placeholder,
        &field.kind,
        &field.tag,
    )
}

pub fn classify(
    name: &str,
    id: &str,
    placeholder: &str,
    kind: &ControlKind,
    tag: &str,
) -> SemanticFieldType {
    if *kind == ControlKind::File {
        return SemanticFieldType::Resume;
    }

    let signal = format!("{} {} {}", name, id, placeholder).to_lowercase();
    let has = |needle: &str| signal.contains(needle);

    if has("first") && has("name") {
        SemanticFieldType::FirstName
    } else if has("last") && has("name") {
        SemanticFieldType::LastName
    } else if has("email") {
        SemanticFieldType::Email
    } else if has("phone") {
        SemanticFieldType::Phone
    } else if has("cover") && has("letter") {
        SemanticFieldType::CoverLetter
    } else if has("location") || has("city") {
        SemanticFieldType::Location
    } else if has("experience") {
        SemanticFieldType::Experience
    } else if has("linkedin") {
        SemanticFieldType::LinkedinProfile
    } else if has("company") {
        SemanticFieldType::Company
    } else if has("salary") {
        SemanticFieldType::Salary
    } else if *kind == ControlKind::Textarea || tag.eq_ignore_ascii_case("textarea") {
        SemanticFieldType::TextArea
    } else {
        SemanticFieldType::Unknown
    }
}
