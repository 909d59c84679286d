//! View controller for the sample table and its Add/Edit form.
//!
//! The dashboard owns the record store and all mutable UI state. Every
//! operation mutates state and then calls `refresh`, so `view()` always
//! reflects the latest store contents and query inputs.

mod config;
mod editor;
mod state;

pub use config::*;
pub use editor::*;
pub use state::*;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{DraftChange, Sample, SampleDraft, SamplePatch, SampleStatus};
use crate::query::{SortKey, SortSpec, StatusFilter};
use crate::store::{SampleStore, StoreError};
use crate::validation::{self, FieldErrors};

/// Dashboard errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("Unsupported page size: {0}")]
    UnsupportedPageSize(usize),
}

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Source of "today" for date validation and form defaults.
pub trait Clock: Send {
    fn today(&self) -> NaiveDate;
}

/// Local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Created(Sample),
    Updated(Sample),
    /// Draft failed validation; the form stays open
    Rejected(FieldErrors),
}

/// The view controller.
pub struct Dashboard {
    store: SampleStore,
    config: DashboardConfig,
    state: ViewState,
    editor: Editor,
    clock: Box<dyn Clock>,
    view: DashboardView,
}

impl Dashboard {
    /// Dashboard over `store` using the system clock.
    pub fn new(store: SampleStore, config: DashboardConfig) -> Self {
        Self::with_clock(store, config, Box::new(SystemClock))
    }

    pub fn with_clock(store: SampleStore, config: DashboardConfig, clock: Box<dyn Clock>) -> Self {
        let state = ViewState::new(&config);
        let mut dashboard = Self {
            store,
            config,
            state,
            editor: Editor::Idle,
            clock,
            view: DashboardView::default(),
        };
        dashboard.refresh();
        dashboard
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// Current visible page.
    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Full collection, unfiltered.
    pub fn samples(&self) -> &[Sample] {
        self.store.all()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // =========================================================================
    // Query inputs
    // =========================================================================

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.state.set_search(search.into());
        self.refresh();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.state.set_status_filter(status);
        self.refresh();
    }

    /// Column-header click.
    pub fn toggle_sort(&mut self, key: SortKey) {
        let sort = self.state.query.sort.toggle(key);
        self.set_sort(sort);
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.state.set_sort(sort);
        self.refresh();
    }

    pub fn set_page(&mut self, page: usize) {
        self.state.page = page;
        self.refresh();
    }

    pub fn set_page_size(&mut self, page_size: usize) -> DashboardResult<()> {
        if !self.config.allows_page_size(page_size) {
            return Err(DashboardError::UnsupportedPageSize(page_size));
        }
        self.state.set_page_size(page_size);
        self.refresh();
        Ok(())
    }

    // =========================================================================
    // Form workflow
    // =========================================================================

    pub fn open_add(&mut self) -> DashboardResult<()> {
        self.require_idle("open the add form")?;
        self.editor = Editor::Adding {
            draft: SampleDraft::new(self.clock.today()),
            errors: FieldErrors::default(),
        };
        debug!("editor: idle -> adding");
        self.refresh();
        Ok(())
    }

    /// Open the edit form seeded from the record with `id`.
    pub fn open_edit(&mut self, id: &str) -> DashboardResult<()> {
        self.require_idle("open the edit form")?;
        let Some(sample) = self.store.all().iter().find(|s| s.id == id) else {
            warn!(id, "edit requested for unknown sample");
            return Err(StoreError::NotFound(id.to_string()).into());
        };
        self.editor = Editor::Editing {
            id: sample.id.clone(),
            draft: SampleDraft::from(sample),
            errors: FieldErrors::default(),
        };
        debug!(id, "editor: idle -> editing");
        self.refresh();
        Ok(())
    }

    /// Apply one field edit to the open draft.
    pub fn edit_draft(&mut self, change: DraftChange) -> DashboardResult<()> {
        if !self.editor.edit(change) {
            return Err(self.invalid("edit the draft"));
        }
        Ok(())
    }

    /// Discard the open draft.
    pub fn cancel(&mut self) -> DashboardResult<()> {
        if self.editor.is_idle() {
            return Err(self.invalid("cancel"));
        }
        debug!(from = self.editor.name(), "editor: cancelled");
        self.editor = Editor::Idle;
        self.refresh();
        Ok(())
    }

    /// Validate the open draft and commit it to the store.
    ///
    /// An invalid draft leaves the form open with its errors and does not
    /// touch the store. A store failure also leaves the form open.
    pub fn save(&mut self) -> DashboardResult<SaveOutcome> {
        let today = self.clock.today();
        let Some(draft) = self.editor.draft() else {
            return Err(self.invalid("save"));
        };

        let fields = match validation::check(draft, today) {
            Ok(fields) => fields,
            Err(errors) => {
                debug!(state = self.editor.name(), errors = errors.len(), "save rejected");
                self.editor.set_errors(errors.clone());
                self.refresh();
                return Ok(SaveOutcome::Rejected(errors));
            }
        };

        let outcome = match &self.editor {
            Editor::Editing { id, .. } => {
                let id = id.clone();
                SaveOutcome::Updated(self.store.update(&id, SamplePatch::from(fields))?)
            }
            _ => SaveOutcome::Created(self.store.create(fields)?),
        };

        debug!(from = self.editor.name(), "editor: saved -> idle");
        self.editor = Editor::Idle;
        self.refresh();
        Ok(outcome)
    }

    // =========================================================================
    // Inline update
    // =========================================================================

    /// Row-level status change; independent of the form workflow.
    pub fn change_status(&mut self, id: &str, status: SampleStatus) -> DashboardResult<Sample> {
        let sample = self.store.update_status(id, status)?;
        self.refresh();
        Ok(sample)
    }

    /// Recompute the derived view from the store and view state.
    pub fn refresh(&mut self) {
        self.view = self.state.derive(self.store.all());
    }

    fn require_idle(&self, action: &'static str) -> DashboardResult<()> {
        if self.editor.is_idle() {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> DashboardError {
        let state = self.editor.name();
        warn!(action, state, "rejected editor transition");
        DashboardError::InvalidTransition { action, state }
    }
}
