use crossterm::event::{KeyCode, KeyModifiers};

use crate::store::TaskId;

use super::input::InputBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Viewing,
    Editing,
}

/// Per-row interaction state machine.
///
/// Each task row owns its own `Viewing`/`Editing` state and an uncommitted
/// draft of the title. Rows are fully independent: nothing here (or in the
/// app) enforces a single concurrent editor, so several rows may be mid-edit
/// at once, each with its own draft.
///
/// Focus follows state: entering `Editing` acquires keyboard focus for the
/// draft, leaving it (commit or cancel) releases it.
#[derive(Debug, Clone)]
pub struct TaskRow {
    pub task_id: TaskId,
    state: RowState,
    draft: InputBuffer,
    focused: bool,
}

impl TaskRow {
    /// New row in `Viewing`, draft seeded from the task's current title.
    pub fn new(task_id: TaskId, title: &str) -> Self {
        TaskRow {
            task_id,
            state: RowState::Viewing,
            draft: InputBuffer::with_text(title),
            focused: false,
        }
    }

    pub fn state(&self) -> RowState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        self.state == RowState::Editing
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// The in-progress, uncommitted title text.
    pub fn draft(&self) -> &str {
        self.draft.text()
    }

    pub fn draft_with_cursor(&self) -> String {
        self.draft.display_with_cursor()
    }

    /// `Viewing → Editing`: re-seed the draft from the task's current title
    /// and take focus. No-op when already editing.
    pub fn start_editing(&mut self, current_title: &str) {
        if self.state == RowState::Editing {
            return;
        }
        self.draft.set_text(current_title);
        self.state = RowState::Editing;
        self.focused = true;
    }

    /// `Editing → Viewing` via cancel: discard the draft, restoring the
    /// last-committed title. The store is not touched.
    pub fn cancel_editing(&mut self, committed_title: &str) {
        if self.state != RowState::Editing {
            return;
        }
        self.draft.set_text(committed_title);
        self.state = RowState::Viewing;
        self.focused = false;
    }

    /// `Editing → Viewing` via commit: yields the draft verbatim (not trimmed
    /// or validated) for the caller to pass to `TaskStore::edit`.
    pub fn commit(&mut self) -> Option<String> {
        if self.state != RowState::Editing {
            return None;
        }
        self.state = RowState::Viewing;
        self.focused = false;
        Some(self.draft.text().to_string())
    }

    /// Route a key into the draft. Only consumes keys while `Editing`.
    pub fn handle_edit_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if self.state != RowState::Editing {
            return false;
        }
        self.draft.handle_key(code, modifiers)
    }
}
