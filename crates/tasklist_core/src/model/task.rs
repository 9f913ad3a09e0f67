use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub is_done: bool,
    #[serde(default)]
    pub is_removed: bool,
}

impl Task {
    pub fn new(text: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            is_done: false,
            is_removed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Done,
    Unchecked,
    Removed,
}

impl Filter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => !task.is_removed,
            Self::Done => task.is_done && !task.is_removed,
            Self::Unchecked => !task.is_done && !task.is_removed,
            Self::Removed => task.is_removed,
        }
    }

}
