// src/engine/session.rs
//! Per-navigation engine state and the single event dispatch point

use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use super::executor::{FillExecutor, HighlightTracker};
use super::fill_pass::{analyze_fields, run_fill_pass};
use super::platform::detect_platform;
use super::registry::{selector_set, SelectorSet};
use super::watcher::DomWatcher;
use crate::config::EngineConfig;
use crate::dom::{NodeHandle, PageDom, PageLocation};
use crate::types::{FieldAnalysis, FillReport, PersonalInfoRecord, PlatformVariant, Settings};

/// Everything that can change a running session.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// The document now shows a different page
    Navigated,
    NodesAdded { nodes: Vec<NodeHandle>, at: Instant },
    SettingsChanged(Settings),
    Tick(Instant),
}

/// What a dispatched event caused, mostly for logs and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub restarted: bool,
    pub refresh_scheduled: bool,
    pub binding_refreshed: bool,
    pub highlights_restored: usize,
}

/// Engine state for one page visit. Created on navigation and threaded
/// through every call; refreshed only through [`PageSession::dispatch`].
#[derive(Debug)]
pub struct PageSession {
    id: Uuid,
    location: PageLocation,
    platform: PlatformVariant,
    binding: SelectorSet,
    settings: Settings,
    config: EngineConfig,
    watcher: DomWatcher,
    highlights: HighlightTracker,
    executor: FillExecutor,
    binding_refreshes: usize,
}

impl PageSession {
    pub fn start<D: PageDom>(dom: &D, settings: Settings, config: &EngineConfig) -> Self {
        let id = Uuid::new_v4();
        let platform = detect_platform(dom);
        let location = dom.location().clone();
        info!(
            "Session {} started on {}{} (platform: {})",
            id, location.host, location.path, platform
        );

        Self {
            id,
            location,
            platform,
            binding: selector_set(platform),
            settings,
            config: config.clone(),
            watcher: DomWatcher::new(config.debounce()),
            highlights: HighlightTracker::default(),
            executor: FillExecutor::new(config.highlight_window()),
            binding_refreshes: 0,
        }
    }

    pub fn dispatch<D: PageDom>(&mut self, dom: &mut D, event: EngineEvent) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();

        match event {
            EngineEvent::Navigated => {
                let settings = std::mem::take(&mut self.settings);
                *self = Self::start(dom, settings, &self.config);
                outcome.restarted = true;
            }
            EngineEvent::NodesAdded { nodes, at } => {
                outcome.refresh_scheduled = self.watcher.observe(dom, &nodes, at);
            }
            EngineEvent::SettingsChanged(settings) => {
                debug!("Session {} received new settings", self.id);
                self.settings = settings;
            }
            EngineEvent::Tick(now) => {
                if self.watcher.take_due(now) {
                    self.refresh_binding();
                    outcome.binding_refreshed = true;
                }
                outcome.highlights_restored = self.highlights.restore_due(dom, now);
            }
        }

        outcome
    }

    fn refresh_binding(&mut self) {
        self.binding = selector_set(self.platform);
        self.binding_refreshes += 1;
        debug!(
            "Session {} refreshed {} selector binding ({} entries)",
            self.id,
            self.platform,
            self.binding.entries().len()
        );
    }

    pub fn fill_pass<D: PageDom>(
        &mut self,
        dom: &mut D,
        record: &PersonalInfoRecord,
        now: Instant,
    ) -> FillReport {
        run_fill_pass(
            dom,
            &self.binding,
            record,
            &self.executor,
            &mut self.highlights,
            now,
        )
    }

    pub fn analyze_fields<D: PageDom>(&self, dom: &D) -> FieldAnalysis {
        analyze_fields(dom, self.platform)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn location(&self) -> &PageLocation {
        &self.location
    }

    pub fn platform(&self) -> PlatformVariant {
        self.platform
    }

    pub fn binding(&self) -> &SelectorSet {
        &self.binding
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn binding_refreshes(&self) -> usize {
        self.binding_refreshes
    }

    /// Earliest instant at which a `Tick` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.watcher.refresh_due(), self.highlights.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
