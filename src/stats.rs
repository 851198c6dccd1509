//! Dashboard task counters.

use task_api::Task;

/// Aggregate counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TaskStats {
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total: tasks.len(),
            completed,
            pending: tasks.len() - completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, completed: bool) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            description: None,
            completed,
            user_id: "user-1".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn counts_split_by_completion() {
        let tasks = vec![task(1, true), task(2, false), task(3, false)];
        let stats = TaskStats::from_tasks(&tasks);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 2);
    }

    #[test]
    fn empty_list_is_all_zero() {
        assert_eq!(TaskStats::from_tasks(&[]), TaskStats::default());
    }
}
