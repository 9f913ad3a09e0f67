use crate::model::{Filter, Task};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub filter: Filter,
}

#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    filter: Filter,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Prepend a task built from the trimmed text. Blank text is ignored.
    pub fn create(&mut self, text: &str) -> Option<Task> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let task = Task::new(trimmed);
        self.tasks.insert(0, task.clone());
        Some(task)
    }

    pub fn edit_text(&mut self, id: &str, new_text: &str) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.text = new_text.to_string();
        Some(task.clone())
    }

    /// Set `is_done` to `explicit` when given, otherwise flip it.
    pub fn toggle_done(&mut self, id: &str, explicit: Option<bool>) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.is_done = explicit.unwrap_or(!task.is_done);
        Some(task.clone())
    }

    /// Flip the removal tombstone. Removing and restoring are the same intent.
    pub fn toggle_removed(&mut self, id: &str) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.is_removed = !task.is_removed;
        Some(task.clone())
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn visible_tasks(&self) -> impl Iterator<Item = &Task> {
        let filter = self.filter;
        self.tasks.iter().filter(move |task| filter.matches(task))
    }

    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tasks: self.visible_tasks().cloned().collect(),
            filter: self.filter,
        }
    }
}
