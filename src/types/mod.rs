pub mod field;
pub mod personal_info;
pub mod response;

pub use field::{
    ControlAttributes, ControlKind, FieldDescriptor, PlatformVariant, SemanticFieldType,
};
pub use personal_info::{PersonalInfoRecord, ResumeData, Settings};
pub use response::{
    AnalyzedField, CommandResponse, CoverLetterOutcome, FieldAnalysis, FillReport, FilledField,
    JobInfo,
};
