use crossterm::event::{KeyCode, KeyModifiers};

// ── Actions ──────────────────────────────────────────────────────────

/// Every discrete action the TUI can perform in response to a key press
/// while in normal mode.
///
/// Actions are context-free identifiers; the execution code in `App`
/// decides what actually happens based on the current selection / state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ShowHelp,

    MoveUp,
    MoveDown,
    MoveTop,
    MoveBottom,

    ToggleDone,
    StartEditing,
    RemoveTask,
    NewTask,
}

// ── Help categories ──────────────────────────────────────────────────

/// Logical groupings shown in the help overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpCategory {
    General,
    Navigation,
    Tasks,
}

impl HelpCategory {
    fn label(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Navigation => "Navigation",
            Self::Tasks => "Tasks",
        }
    }

    /// Fixed display order for the help overlay.
    const ORDERED: &[Self] = &[Self::General, Self::Navigation, Self::Tasks];
}

// ── Keybinding ───────────────────────────────────────────────────────

/// A single key → action mapping with metadata for the help overlay.
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: Action,
    /// Human-readable key label shown in help (e.g. `"Ctrl+C"`).
    pub label: &'static str,
    /// Short description shown next to the label. Empty descriptions are
    /// alias bindings and stay out of the overlay.
    pub description: &'static str,
    pub category: HelpCategory,
}

/// A single row in the help overlay.
#[derive(Debug, Clone)]
pub struct HelpEntry {
    pub label: &'static str,
    pub description: &'static str,
}

// ── KeyMap ────────────────────────────────────────────────────────────

/// Declarative registry of the normal-mode key bindings.
pub struct KeyMap {
    pub normal: Vec<KeyBinding>,
}

impl KeyMap {
    pub fn default_keymap() -> Self {
        Self {
            normal: default_normal_bindings(),
        }
    }

    /// Look up the action for a normal-mode key event.
    pub fn lookup(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        self.normal
            .iter()
            .find(|kb| kb.code == code && kb.modifiers == modifiers)
            .map(|kb| kb.action)
    }

    /// Grouped help entries in display order, aliases deduplicated.
    pub fn help_entries(&self) -> Vec<(&'static str, Vec<HelpEntry>)> {
        let mut out = Vec::new();
        for &cat in HelpCategory::ORDERED {
            let mut entries: Vec<HelpEntry> = Vec::new();
            for kb in &self.normal {
                if kb.category == cat
                    && !kb.description.is_empty()
                    && !entries.iter().any(|e| e.label == kb.label)
                {
                    entries.push(HelpEntry {
                        label: kb.label,
                        description: kb.description,
                    });
                }
            }
            if !entries.is_empty() {
                out.push((cat.label(), entries));
            }
        }
        out
    }
}

fn bind(
    code: KeyCode,
    modifiers: KeyModifiers,
    action: Action,
    label: &'static str,
    description: &'static str,
    category: HelpCategory,
) -> KeyBinding {
    KeyBinding {
        code,
        modifiers,
        action,
        label,
        description,
        category,
    }
}

fn default_normal_bindings() -> Vec<KeyBinding> {
    use HelpCategory::{General, Navigation, Tasks};

    vec![
        bind(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            Action::Quit,
            "q",
            "quit",
            General,
        ),
        bind(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            Action::Quit,
            "Ctrl+C",
            "",
            General,
        ),
        bind(
            KeyCode::Char('?'),
            KeyModifiers::NONE,
            Action::ShowHelp,
            "?",
            "show this help",
            General,
        ),
        bind(
            KeyCode::Char('k'),
            KeyModifiers::NONE,
            Action::MoveUp,
            "k/↑",
            "move up",
            Navigation,
        ),
        bind(
            KeyCode::Up,
            KeyModifiers::NONE,
            Action::MoveUp,
            "k/↑",
            "",
            Navigation,
        ),
        bind(
            KeyCode::Char('j'),
            KeyModifiers::NONE,
            Action::MoveDown,
            "j/↓",
            "move down",
            Navigation,
        ),
        bind(
            KeyCode::Down,
            KeyModifiers::NONE,
            Action::MoveDown,
            "j/↓",
            "",
            Navigation,
        ),
        bind(
            KeyCode::Char('g'),
            KeyModifiers::NONE,
            Action::MoveTop,
            "g",
            "first task",
            Navigation,
        ),
        bind(
            KeyCode::Char('G'),
            KeyModifiers::SHIFT,
            Action::MoveBottom,
            "G",
            "last task",
            Navigation,
        ),
        bind(
            KeyCode::Enter,
            KeyModifiers::NONE,
            Action::ToggleDone,
            "Enter/Space",
            "toggle done",
            Tasks,
        ),
        bind(
            KeyCode::Char(' '),
            KeyModifiers::NONE,
            Action::ToggleDone,
            "Enter/Space",
            "",
            Tasks,
        ),
        bind(
            KeyCode::Char('n'),
            KeyModifiers::NONE,
            Action::NewTask,
            "n",
            "new task",
            Tasks,
        ),
        bind(
            KeyCode::Char('e'),
            KeyModifiers::NONE,
            Action::StartEditing,
            "e",
            "edit task",
            Tasks,
        ),
        bind(
            KeyCode::Char('d'),
            KeyModifiers::NONE,
            Action::RemoveTask,
            "d",
            "remove task",
            Tasks,
        ),
    ]
}
