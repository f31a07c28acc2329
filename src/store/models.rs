/// Session-unique task identifier.
///
/// Assigned monotonically by the store, seeded from wall-clock milliseconds.
/// Usable as a sort-stable key, but ordering carries no meaning — display
/// order is insertion order.
pub type TaskId = u64;

/// A single to-do entry held in memory for the lifetime of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub done: bool,
}

impl Task {
    pub fn marker(&self) -> &'static str {
        if self.done { "✓" } else { "☐" }
    }
}

/// Result of [`crate::store::TaskStore::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The task was appended with this id.
    Added(TaskId),
    /// An existing task already carries the exact same title; nothing changed.
    DuplicateTitle,
}
