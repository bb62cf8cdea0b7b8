// src/engine/resolver.rs
//! Field type to fill value

use crate::types::{PersonalInfoRecord, SemanticFieldType};

/// Value for a field type, or `None` when the record has nothing to offer.
///
/// Cover letters, resumes, salary, full name and free text are never
/// auto-resolved. An empty record value is "no data", not an empty fill.
pub fn resolve_value(field_type: SemanticFieldType, record: &PersonalInfoRecord) -> Option<String> {
    let value = match field_type {
        SemanticFieldType::FirstName => &record.first_name,
        SemanticFieldType::LastName => &record.last_name,
        SemanticFieldType::Email => &record.email,
        SemanticFieldType::Phone => &record.phone,
        SemanticFieldType::Location => &record.location,
        SemanticFieldType::LinkedinProfile => &record.linkedin,
        SemanticFieldType::Company => &record.current_company,
        SemanticFieldType::Position => &record.current_position,
        SemanticFieldType::Experience => &record.years_experience,
        SemanticFieldType::Education => &record.education,
        SemanticFieldType::CoverLetter
        | SemanticFieldType::Resume
        | SemanticFieldType::Salary
        | SemanticFieldType::FullName
        | SemanticFieldType::TextArea
        | SemanticFieldType::Unknown => return None,
    };

    if value.is_empty() {
        None
    } else {
        Some(value.clone())
    }
}
