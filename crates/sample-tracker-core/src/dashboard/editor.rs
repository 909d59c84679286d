//! Add/Edit form state machine.
//!
//! ```text
//! Idle --open_add--> Adding --save(valid)/cancel--> Idle
//! Idle --open_edit--> Editing --save(valid)/cancel--> Idle
//! Adding/Editing --save(invalid)--> same state, errors surfaced
//! ```

use serde::Serialize;

use crate::models::{DraftChange, SampleDraft};
use crate::validation::FieldErrors;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub enum Editor {
    /// Table view, no form open
    #[default]
    Idle,
    /// Form open for a new sample
    Adding {
        draft: SampleDraft,
        errors: FieldErrors,
    },
    /// Form open for an existing sample
    Editing {
        id: String,
        draft: SampleDraft,
        errors: FieldErrors,
    },
}

impl Editor {
    pub fn name(&self) -> &'static str {
        match self {
            Editor::Idle => "idle",
            Editor::Adding { .. } => "adding",
            Editor::Editing { .. } => "editing",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Editor::Idle)
    }

    pub fn draft(&self) -> Option<&SampleDraft> {
        match self {
            Editor::Idle => None,
            Editor::Adding { draft, .. } | Editor::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Editor::Idle => None,
            Editor::Adding { errors, .. } | Editor::Editing { errors, .. } => Some(errors),
        }
    }

    /// Apply a field edit and clear that field's stale error.
    /// Returns false when no form is open.
    pub(crate) fn edit(&mut self, change: DraftChange) -> bool {
        match self {
            Editor::Idle => false,
            Editor::Adding { draft, errors } | Editor::Editing { draft, errors, .. } => {
                errors.clear(change.field());
                draft.apply(change);
                true
            }
        }
    }

    /// Replace the error map after a failed submit.
    pub(crate) fn set_errors(&mut self, new_errors: FieldErrors) {
        match self {
            Editor::Idle => {}
            Editor::Adding { errors, .. } | Editor::Editing { errors, .. } => *errors = new_errors,
        }
    }
}
