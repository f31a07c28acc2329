use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::DefaultTerminal;

use crate::store::{AddOutcome, Task, TaskId, TaskStore};

use super::event::{self, AppEvent};
use super::input::InputBuffer;
use super::keymap::{Action, KeyMap};
use super::row::TaskRow;
use super::theme::Theme;
use super::ui;

// Dialog copy, kept verbatim from the original app.
pub const REMOVE_TITLE: &str = "Remover item";
pub const REMOVE_QUESTION: &str = "Tem certeza que você deseja remover esse item?";
pub const REMOVE_CANCEL: &str = "Não";
pub const REMOVE_CONFIRM: &str = "Sim";
pub const DUPLICATE_TITLE: &str = "Task já cadastrada";
pub const DUPLICATE_BODY: &str = "Você não pode cadastrar uma task com o mesmo nome";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    AddingTask,
    ConfirmRemove,
    Notice,
    Help,
}

/// Removal awaiting the user's answer in the confirmation dialog.
#[derive(Debug, Clone)]
pub struct PendingRemove {
    pub id: TaskId,
    pub title: String,
}

/// A blocking single-acknowledgement notification.
#[derive(Debug, Clone, Copy)]
pub struct Notice {
    pub title: &'static str,
    pub body: &'static str,
}

pub struct App {
    pub store: TaskStore,
    pub theme: Theme,
    pub keymap: KeyMap,
    pub tick_rate: Duration,
    pub should_quit: bool,
    pub input_mode: InputMode,

    /// One controller per task, parallel to `store.tasks()` order.
    pub rows: Vec<TaskRow>,
    pub selected: usize,

    /// Buffer behind the "new task" bar.
    pub new_task_input: InputBuffer,

    // Confirm-remove dialog state
    pub pending_remove: Option<PendingRemove>,
    /// Which button is highlighted; starts on "Não".
    pub confirm_yes: bool,

    pub notice: Option<Notice>,
}

impl App {
    pub fn new(store: TaskStore, theme: Theme, tick_rate_ms: u64) -> Self {
        let rows = store
            .tasks()
            .iter()
            .map(|t| TaskRow::new(t.id, &t.title))
            .collect();

        App {
            store,
            theme,
            keymap: KeyMap::default_keymap(),
            tick_rate: Duration::from_millis(tick_rate_ms),
            should_quit: false,
            input_mode: InputMode::Normal,
            rows,
            selected: 0,
            new_task_input: InputBuffer::new(),
            pending_remove: None,
            confirm_yes: false,
            notice: None,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let tick_rate = self.tick_rate;

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            match event::poll(tick_rate)? {
                AppEvent::Key(key) => self.handle_key(key.code, key.modifiers)?,
                AppEvent::Tick => {}
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.store.tasks().get(self.selected)
    }

    /// Rebuild the row controllers to mirror the store, carrying over the
    /// state of rows whose task survived. A row mid-edit keeps its draft.
    fn sync_rows(&mut self) {
        let mut old = std::mem::take(&mut self.rows);
        self.rows = self
            .store
            .tasks()
            .iter()
            .map(|task| match old.iter().position(|r| r.task_id == task.id) {
                Some(i) => old.swap_remove(i),
                None => TaskRow::new(task.id, &task.title),
            })
            .collect();

        if self.selected >= self.rows.len() {
            self.selected = self.rows.len().saturating_sub(1);
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Result<()> {
        // Ctrl+C bails out of any mode.
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(code, modifiers),
            InputMode::AddingTask => self.handle_add_key(code, modifiers),
            InputMode::ConfirmRemove => self.handle_confirm_key(code),
            InputMode::Notice => self.handle_notice_key(code),
            InputMode::Help => self.handle_help_key(code),
        }
        Ok(())
    }

    fn handle_normal_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        // A row mid-edit captures input before the keymap, so its draft can
        // contain any character the bindings use. Up/Down still move the
        // selection away, leaving the row editing.
        let selected_is_editing = self
            .rows
            .get(self.selected)
            .is_some_and(TaskRow::is_editing);

        if selected_is_editing {
            match code {
                KeyCode::Enter => self.commit_selected(),
                KeyCode::Esc => self.cancel_selected(),
                KeyCode::Up => self.move_up(),
                KeyCode::Down => self.move_down(),
                _ => {
                    if let Some(row) = self.rows.get_mut(self.selected) {
                        row.handle_edit_key(code, modifiers);
                    }
                }
            }
            return;
        }

        if let Some(action) = self.keymap.lookup(code, modifiers) {
            self.execute_action(action);
        }
    }

    fn execute_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ShowHelp => self.input_mode = InputMode::Help,

            Action::MoveUp => self.move_up(),
            Action::MoveDown => self.move_down(),
            Action::MoveTop => self.selected = 0,
            Action::MoveBottom => {
                self.selected = self.rows.len().saturating_sub(1);
            }

            Action::ToggleDone => {
                if let Some(id) = self.selected_task().map(|t| t.id) {
                    self.store.toggle_done(id);
                }
            }
            Action::StartEditing => {
                if let Some(row) = self.rows.get_mut(self.selected)
                    && let Some(task) = self.store.get(row.task_id)
                {
                    row.start_editing(&task.title);
                }
            }
            Action::RemoveTask => {
                if let Some((id, title)) = self.selected_task().map(|t| (t.id, t.title.clone())) {
                    self.pending_remove = Some(PendingRemove { id, title });
                    self.confirm_yes = false;
                    self.input_mode = InputMode::ConfirmRemove;
                }
            }
            Action::NewTask => {
                self.new_task_input.clear();
                self.input_mode = InputMode::AddingTask;
            }
        }
    }

    fn commit_selected(&mut self) {
        if let Some(row) = self.rows.get_mut(self.selected)
            && let Some(draft) = row.commit()
        {
            self.store.edit(row.task_id, &draft);
        }
    }

    fn cancel_selected(&mut self) {
        if let Some(row) = self.rows.get_mut(self.selected) {
            let committed = self
                .store
                .get(row.task_id)
                .map(|t| t.title.clone())
                .unwrap_or_default();
            row.cancel_editing(&committed);
        }
    }

    fn handle_add_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Enter => self.submit_new_task(),
            KeyCode::Esc => {
                self.new_task_input.clear();
                self.input_mode = InputMode::Normal;
            }
            _ => {
                self.new_task_input.handle_key(code, modifiers);
            }
        }
    }

    fn submit_new_task(&mut self) {
        // The store expects a trimmed, non-empty title; rejecting empty
        // input is the shell's job.
        let title = self.new_task_input.text().trim().to_string();
        if title.is_empty() {
            return;
        }

        match self.store.add(&title) {
            AddOutcome::Added(_) => {
                self.new_task_input.clear();
                self.sync_rows();
                self.selected = self.rows.len().saturating_sub(1);
                self.input_mode = InputMode::Normal;
            }
            AddOutcome::DuplicateTitle => {
                // Input is kept so the title can be fixed after dismissing.
                self.notice = Some(Notice {
                    title: DUPLICATE_TITLE,
                    body: DUPLICATE_BODY,
                });
                self.input_mode = InputMode::Notice;
            }
        }
    }

    fn handle_confirm_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.confirm_yes = !self.confirm_yes;
            }
            KeyCode::Char('s' | 'S') => self.resolve_remove(true),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => self.resolve_remove(false),
            KeyCode::Enter => {
                let yes = self.confirm_yes;
                self.resolve_remove(yes);
            }
            _ => {}
        }
    }

    fn resolve_remove(&mut self, confirmed: bool) {
        if let Some(pending) = self.pending_remove.take()
            && confirmed
        {
            self.store.remove(pending.id);
            self.sync_rows();
        }
        self.confirm_yes = false;
        self.input_mode = InputMode::Normal;
    }

    fn handle_notice_key(&mut self, code: KeyCode) {
        if matches!(code, KeyCode::Enter | KeyCode::Esc) {
            self.notice = None;
            // Back to the input bar so the rejected title can be fixed.
            self.input_mode = InputMode::AddingTask;
        }
    }

    fn handle_help_key(&mut self, code: KeyCode) {
        if matches!(
            code,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q' | '?')
        ) {
            self.input_mode = InputMode::Normal;
        }
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn move_down(&mut self) {
        if !self.rows.is_empty() {
            self.selected = (self.selected + 1).min(self.rows.len() - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(TaskStore::new(), Theme::default(), 250)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(code, KeyModifiers::NONE).unwrap();
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn add_task(app: &mut App, title: &str) {
        press(app, KeyCode::Char('n'));
        type_str(app, title);
        press(app, KeyCode::Enter);
    }

    #[test]
    fn add_task_via_input_bar() {
        let mut app = app();
        add_task(&mut app, "Buy milk");

        assert_eq!(app.store.len(), 1);
        let task = &app.store.tasks()[0];
        assert_eq!(task.title, "Buy milk");
        assert!(!task.done);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.new_task_input.is_empty());
        assert_eq!(app.rows.len(), 1);
    }

    #[test]
    fn add_trims_title_and_ignores_empty() {
        let mut app = app();
        add_task(&mut app, "  padded  ");
        assert_eq!(app.store.tasks()[0].title, "padded");

        press(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        // Whitespace-only input is dropped; still in the input bar.
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.input_mode, InputMode::AddingTask);
    }

    #[test]
    fn duplicate_add_shows_notice_and_keeps_input() {
        let mut app = app();
        add_task(&mut app, "A");
        add_task(&mut app, "A");

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.input_mode, InputMode::Notice);
        let notice = app.notice.expect("duplicate notice");
        assert_eq!(notice.title, "Task já cadastrada");
        assert_eq!(
            notice.body,
            "Você não pode cadastrar uma task com o mesmo nome"
        );

        press(&mut app, KeyCode::Enter);
        assert!(app.notice.is_none());
        assert_eq!(app.input_mode, InputMode::AddingTask);
        assert_eq!(app.new_task_input.text(), "A");
    }

    #[test]
    fn toggle_done_with_enter_and_space() {
        let mut app = app();
        add_task(&mut app, "A");

        press(&mut app, KeyCode::Enter);
        assert!(app.store.tasks()[0].done);
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.store.tasks()[0].done);
    }

    #[test]
    fn remove_confirmed_with_sim() {
        let mut app = app();
        add_task(&mut app, "A");
        add_task(&mut app, "B");
        press(&mut app, KeyCode::Char('g'));

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.input_mode, InputMode::ConfirmRemove);
        assert_eq!(app.pending_remove.as_ref().unwrap().title, "A");

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.tasks()[0].title, "B");
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn remove_cancelled_with_nao() {
        let mut app = app();
        add_task(&mut app, "A");
        let revision = app.store.revision();

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('n'));

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.revision(), revision);
        assert!(app.pending_remove.is_none());
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn confirm_dialog_defaults_to_nao_on_enter() {
        let mut app = app();
        add_task(&mut app, "A");

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.len(), 1);

        // Switching to "Sim" and confirming removes.
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert!(app.store.is_empty());
    }

    #[test]
    fn edit_commit_applies_draft_verbatim() {
        let mut app = app();
        add_task(&mut app, "A");

        press(&mut app, KeyCode::Char('e'));
        assert!(app.rows[0].is_editing());
        assert!(app.rows[0].has_focus());

        type_str(&mut app, "BC");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.store.tasks()[0].title, "ABC");
        assert!(!app.rows[0].is_editing());
        assert!(!app.rows[0].has_focus());
    }

    #[test]
    fn edit_cancel_restores_title_without_mutation() {
        let mut app = app();
        add_task(&mut app, "A");
        let revision = app.store.revision();

        press(&mut app, KeyCode::Char('e'));
        type_str(&mut app, "garbage");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.store.tasks()[0].title, "A");
        assert_eq!(app.store.revision(), revision);
        assert!(!app.rows[0].is_editing());
        assert_eq!(app.rows[0].draft(), "A");
    }

    #[test]
    fn remove_is_inert_while_editing() {
        let mut app = app();
        add_task(&mut app, "A");

        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Char('d'));

        // 'd' went into the draft instead of opening the dialog.
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.pending_remove.is_none());
        assert_eq!(app.rows[0].draft(), "Ad");
        assert_eq!(app.store.len(), 1);
    }

    #[test]
    fn rows_keep_independent_edit_state() {
        let mut app = app();
        add_task(&mut app, "A");
        add_task(&mut app, "B");
        press(&mut app, KeyCode::Char('g'));

        press(&mut app, KeyCode::Char('e'));
        type_str(&mut app, "1");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('e'));
        type_str(&mut app, "2");

        // Both rows are mid-edit, each with its own draft.
        assert!(app.rows[0].is_editing());
        assert!(app.rows[1].is_editing());
        assert_eq!(app.rows[0].draft(), "A1");
        assert_eq!(app.rows[1].draft(), "B2");

        // Committing the second row leaves the first untouched.
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.tasks()[1].title, "B2");
        assert_eq!(app.store.tasks()[0].title, "A");
        assert!(app.rows[0].is_editing());
    }

    #[test]
    fn editing_row_survives_adding_another_task() {
        let mut app = app();
        add_task(&mut app, "A");
        add_task(&mut app, "B");
        press(&mut app, KeyCode::Char('g'));

        press(&mut app, KeyCode::Char('e'));
        type_str(&mut app, "!");
        press(&mut app, KeyCode::Down);
        add_task(&mut app, "C");

        assert_eq!(app.store.len(), 3);
        assert!(app.rows[0].is_editing());
        assert_eq!(app.rows[0].draft(), "A!");
    }

    #[test]
    fn new_task_is_appended_and_selected() {
        let mut app = app();
        add_task(&mut app, "A");
        add_task(&mut app, "B");

        let titles: Vec<&str> = app
            .store
            .tasks()
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn selection_clamps_after_remove() {
        let mut app = app();
        add_task(&mut app, "A");
        add_task(&mut app, "B");
        assert_eq!(app.selected, 1);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn help_overlay_opens_and_closes() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.input_mode, InputMode::Help);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL)
            .unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn actions_on_empty_list_are_harmless() {
        let mut app = app();
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('k'));

        assert!(app.store.is_empty());
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.pending_remove.is_none());
    }
}
