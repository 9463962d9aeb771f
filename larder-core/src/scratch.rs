//! Scratch task list (`/temp`), unrelated to recipes.
//!
//! The title input only takes effect once typing settles: every keystroke goes
//! through a [`Debouncer`] and "add" reads the settled value.

use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// How long the title input must stay unchanged before it settles.
pub const TITLE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Publishes the last input value once no newer input arrived for `delay`.
///
/// Each input cancels the timer scheduled by the previous one. Must be fed
/// from inside a tokio runtime.
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    settled: Arc<watch::Sender<String>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        let (settled, _) = watch::channel(String::new());
        Self {
            delay,
            pending: None,
            settled: Arc::new(settled),
        }
    }

    /// Restart the timer with a new value.
    pub fn input(&mut self, value: String) {
        self.cancel();
        let settled = Arc::clone(&self.settled);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            settled.send_replace(value);
        }));
    }

    /// Cancel any pending timer and publish `value` immediately.
    pub fn settle_now(&mut self, value: String) {
        self.cancel();
        self.settled.send_replace(value);
    }

    /// The last settled value.
    pub fn settled(&self) -> String {
        self.settled.borrow().clone()
    }

    /// Watch settled values as they are published.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.settled.subscribe()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskChange {
    Added(u32),
    Renamed(u32),
}

/// Local task list with debounced add/rename, edit and delete.
pub struct TaskList {
    tasks: Vec<Task>,
    title: String,
    debouncer: Debouncer,
    editing: Option<u32>,
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskList {
    pub fn new() -> Self {
        Self::with_debounce(TITLE_DEBOUNCE)
    }

    pub fn with_debounce(delay: Duration) -> Self {
        Self {
            tasks: Vec::new(),
            title: String::new(),
            debouncer: Debouncer::new(delay),
            editing: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Raw input text, as typed.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Input text after the debounce delay.
    pub fn settled_title(&self) -> String {
        self.debouncer.settled()
    }

    pub fn editing(&self) -> Option<u32> {
        self.editing
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.debouncer.input(self.title.clone());
    }

    /// Add a task from the settled title, or rename the edit target.
    /// A blank settled title does nothing.
    pub fn add(&mut self) -> Option<TaskChange> {
        let title = self.debouncer.settled();
        if title.trim().is_empty() {
            return None;
        }

        let change = match self.editing.take() {
            Some(id) => {
                for task in self.tasks.iter_mut().filter(|t| t.id == id) {
                    task.title = title.clone();
                }
                TaskChange::Renamed(id)
            }
            None => {
                let id = self.fresh_id();
                self.tasks.push(Task {
                    id,
                    title,
                    completed: false,
                });
                TaskChange::Added(id)
            }
        };

        self.clear_input();
        Some(change)
    }

    /// Pre-fill the input with a task's title and make it the edit target.
    pub fn edit(&mut self, id: u32) -> bool {
        let Some(task) = self.tasks.iter().find(|t| t.id == id) else {
            return false;
        };
        self.title = task.title.clone();
        self.debouncer.settle_now(self.title.clone());
        self.editing = Some(id);
        true
    }

    pub fn delete(&mut self, id: u32) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.editing == Some(id) {
            self.clear_input();
            self.editing = None;
        }
        self.tasks.len() != before
    }

    fn clear_input(&mut self) {
        self.title.clear();
        self.debouncer.settle_now(String::new());
    }

    fn fresh_id(&self) -> u32 {
        let mut rng = rand::thread_rng();
        loop {
            let id = rng.gen_range(0..1_000_000);
            if !self.tasks.iter().any(|t| t.id == id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn settle() {
        tokio::time::sleep(TITLE_DEBOUNCE + Duration::from_millis(10)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_publishes_only_last_value() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        let mut rx = debouncer.subscribe();

        debouncer.input("b".to_string());
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.input("bu".to_string());
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.input("buy".to_string());
        assert_eq!(debouncer.settled(), "");
        assert!(debouncer.is_pending());

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), "buy");
        assert_eq!(debouncer.settled(), "buy");
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_uses_settled_title() {
        let mut list = TaskList::new();
        list.set_title("buy milk");
        assert_eq!(list.add(), None);

        settle().await;
        let change = list.add();

        assert!(matches!(change, Some(TaskChange::Added(_))));
        assert_eq!(list.tasks().len(), 1);
        assert_eq!(list.tasks()[0].title, "buy milk");
        assert!(!list.tasks()[0].completed);
        assert_eq!(list.title(), "");
        assert_eq!(list.add(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_title_is_ignored() {
        let mut list = TaskList::new();
        list.set_title("   ");
        settle().await;
        assert_eq!(list.add(), None);
        assert!(list.tasks().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_renames_in_place() {
        let mut list = TaskList::new();
        list.set_title("buy milk");
        settle().await;
        let Some(TaskChange::Added(id)) = list.add() else {
            panic!("expected a new task");
        };

        assert!(list.edit(id));
        assert_eq!(list.title(), "buy milk");
        list.set_title("buy oat milk");
        settle().await;

        assert_eq!(list.add(), Some(TaskChange::Renamed(id)));
        assert_eq!(list.tasks().len(), 1);
        assert_eq!(list.tasks()[0].title, "buy oat milk");
        assert_eq!(list.editing(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_edit_target_clears_input() {
        let mut list = TaskList::new();
        list.set_title("walk dog");
        settle().await;
        let Some(TaskChange::Added(id)) = list.add() else {
            panic!("expected a new task");
        };
        list.edit(id);

        assert!(list.delete(id));
        assert!(list.tasks().is_empty());
        assert_eq!(list.editing(), None);
        assert_eq!(list.title(), "");
        assert!(!list.delete(id));
    }
}
