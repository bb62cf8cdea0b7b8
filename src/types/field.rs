// src/types/field.rs
//! Field, platform and control vocabulary shared by the engine

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dom::NodeHandle;

/// Canonical meaning a form control can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SemanticFieldType {
    FirstName,
    LastName,
    FullName,
    Email,
    Phone,
    CoverLetter,
    Resume,
    LinkedinProfile,
    Location,
    Experience,
    Education,
    Company,
    Position,
    Salary,
    /// Free-form textarea that matched no more specific rule
    TextArea,
    Unknown,
}

impl SemanticFieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::CoverLetter => "coverLetter",
            Self::Resume => "resume",
            Self::LinkedinProfile => "linkedinProfile",
            Self::Location => "location",
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Company => "company",
            Self::Position => "position",
            Self::Salary => "salary",
            Self::TextArea => "textArea",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SemanticFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detected site category driving which selector set applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformVariant {
    Linkedin,
    Simplify,
    Jobrightai,
    Generic,
    Unknown,
}

impl PlatformVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linkedin => "linkedin",
            Self::Simplify => "simplify",
            Self::Jobrightai => "jobrightai",
            Self::Generic => "generic",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PlatformVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Control kind as the host page reports it (`type` attribute for inputs).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Text,
    Email,
    Tel,
    Url,
    Number,
    File,
    Checkbox,
    Radio,
    Hidden,
    Submit,
    Button,
    Reset,
    Textarea,
    Select,
    Other(String),
}

impl ControlKind {
    /// Derive the kind from the element tag and its `type` attribute.
    pub fn from_tag_and_type(tag: &str, input_type: Option<&str>) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "textarea" => return Self::Textarea,
            "select" => return Self::Select,
            _ => {}
        }

        let input_type = input_type
            .map(|t| t.trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "text".to_string());

        match input_type.as_str() {
            "text" => Self::Text,
            "email" => Self::Email,
            "tel" => Self::Tel,
            "url" => Self::Url,
            "number" => Self::Number,
            "file" => Self::File,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "hidden" => Self::Hidden,
            "submit" => Self::Submit,
            "button" => Self::Button,
            "reset" => Self::Reset,
            _ => Self::Other(input_type),
        }
    }

    /// Kinds that never take user data.
    pub fn is_excluded(&self) -> bool {
        matches!(
            self,
            Self::Hidden | Self::Submit | Self::Button | Self::Reset
        )
    }
}

/// Raw attributes of one control, as read from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlAttributes {
    pub tag: String,
    pub kind: ControlKind,
    pub name: String,
    pub id: String,
    pub placeholder: String,
    pub required: bool,
}

/// Handle plus read-only metadata for one control, valid only for the scan
/// that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub handle: NodeHandle,
    pub tag: String,
    pub kind: ControlKind,
    pub name: String,
    pub id: String,
    pub placeholder: String,
    pub required: bool,
    pub visible: bool,
}

impl FieldDescriptor {
    pub fn new(handle: NodeHandle, attributes: ControlAttributes, visible: bool) -> Self {
        Self {
            handle,
            tag: attributes.tag,
            kind: attributes.kind,
            name: attributes.name,
            id: attributes.id,
            placeholder: attributes.placeholder,
            required: attributes.required,
            visible,
        }
    }

    /// Name used in reports: the `name` attribute, else the id.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
