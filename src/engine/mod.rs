// src/engine/mod.rs
//! Field detection and auto-fill engine

pub mod classifier;
pub mod executor;
pub mod fill_pass;
pub mod platform;
pub mod registry;
pub mod resolver;
pub mod scanner;
pub mod session;
pub mod watcher;

pub use classifier::{classify, classify_field};
pub use executor::{FillExecutor, HighlightTracker, HIGHLIGHT_STYLE};
pub use platform::detect_platform;
pub use registry::{selector_set, SelectorPattern, SelectorSet};
pub use resolver::resolve_value;
pub use scanner::scan_fields;
pub use session::{DispatchOutcome, EngineEvent, PageSession};
pub use watcher::DomWatcher;
