mod models;

pub use models::*;

use chrono::Utc;

/// Single source of truth for the task collection.
///
/// Owns the ordered sequence of tasks; order is insertion order and is never
/// changed by toggle or edit. All mutations happen synchronously inside the
/// caller's event handler — there is no persistence and no sharing.
///
/// Operations on an id that is not in the collection are silent no-ops; the
/// only user-visible rejection is a duplicate title on [`TaskStore::add`].
pub struct TaskStore {
    tasks: Vec<Task>,
    last_id: TaskId,
    revision: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        TaskStore {
            tasks: Vec::new(),
            // Seeded from wall-clock millis so ids look like creation
            // timestamps; next_id keeps them strictly increasing regardless.
            last_id: Utc::now().timestamp_millis().max(0) as u64,
            revision: 0,
        }
    }

    fn next_id(&mut self) -> TaskId {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        self.last_id = now.max(self.last_id + 1);
        self.last_id
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Bumped once per applied mutation. Lets observers (and tests) tell
    /// whether an operation actually changed the collection.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Append a new task with `done = false`.
    ///
    /// Rejects the add when another task carries the exact same title
    /// (case-sensitive). The caller is expected to have trimmed the title and
    /// rejected empty input already.
    pub fn add(&mut self, title: &str) -> AddOutcome {
        if self.tasks.iter().any(|t| t.title == title) {
            tracing::debug!(title, "add rejected: duplicate title");
            return AddOutcome::DuplicateTitle;
        }

        let id = self.next_id();
        self.tasks.push(Task {
            id,
            title: title.to_string(),
            done: false,
        });
        self.revision += 1;
        tracing::debug!(id, title, "task added");
        AddOutcome::Added(id)
    }

    /// Flip the `done` flag of the matching task. Absent id: no-op.
    pub fn toggle_done(&mut self, id: TaskId) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.done = !task.done;
            self.revision += 1;
            tracing::debug!(id, done = task.done, "task toggled");
        }
    }

    /// Replace the matching task's title with `new_title`, unconditionally:
    /// no duplicate check and no emptiness check. Absent id: no-op.
    pub fn edit(&mut self, id: TaskId, new_title: &str) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.title = new_title.to_string();
            self.revision += 1;
            tracing::debug!(id, new_title, "task edited");
        }
    }

    /// Remove the matching task. Absent id: no-op.
    ///
    /// The caller must have obtained user confirmation before calling this;
    /// the store itself never prompts.
    pub fn remove(&mut self, id: TaskId) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            self.revision += 1;
            tracing::debug!(id, "task removed");
        }
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}
