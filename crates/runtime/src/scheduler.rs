use crate::host::{FrameCallback, IntervalCallback, TimeoutCallback};

pub enum TaskKind {
    Frame(FrameCallback),
    Timeout(TimeoutCallback),
    Interval {
        period_ms: f64,
        callback: IntervalCallback,
    },
}

impl TaskKind {
    pub fn is_frame(&self) -> bool {
        matches!(self, TaskKind::Frame(_))
    }
}

impl std::fmt::Debug for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskKind::Frame(_) => write!(f, "Frame"),
            TaskKind::Timeout(_) => write!(f, "Timeout"),
            TaskKind::Interval { period_ms, .. } => write!(f, "Interval({period_ms}ms)"),
        }
    }
}

#[derive(Debug)]
pub struct Task {
    pub id: u64,
    pub due_ms: f64,
    pub kind: TaskKind,
}

/// Pending callbacks, popped in a deterministic order.
///
/// Ordering is `(due_ms, insertion_order)`: two callbacks due at the same
/// instant fire in the order they were scheduled.
#[derive(Debug, Default)]
pub struct TaskQueue {
    next_order: u64,
    tasks: Vec<(u64, Task)>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: Task) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.tasks.push((order, task));
    }

    /// Removes the task with `id`; returns whether it was present.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|(_, t)| t.id != id);
        self.tasks.len() != before
    }

    /// Pops the earliest task due at or before `limit_ms`.
    pub fn pop_due(&mut self, limit_ms: f64) -> Option<Task> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, (_, t))| t.due_ms <= limit_ms)
            .min_by(|(_, (oa, a)), (_, (ob, b))| {
                a.due_ms.total_cmp(&b.due_ms).then_with(|| oa.cmp(ob))
            })
            .map(|(i, _)| i)?;
        Some(self.tasks.remove(idx).1)
    }

    pub fn next_due(&self) -> Option<f64> {
        self.tasks
            .iter()
            .map(|(_, t)| t.due_ms)
            .min_by(|a, b| a.total_cmp(b))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn frame_count(&self) -> usize {
        self.tasks.iter().filter(|(_, t)| t.kind.is_frame()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskKind, TaskQueue};

    fn timeout(id: u64, due_ms: f64) -> Task {
        Task {
            id,
            due_ms,
            kind: TaskKind::Timeout(Box::new(|| {})),
        }
    }

    #[test]
    fn pops_earliest_due_first() {
        let mut q = TaskQueue::new();
        q.push(timeout(1, 30.0));
        q.push(timeout(2, 10.0));
        q.push(timeout(3, 20.0));

        let ids: Vec<u64> = std::iter::from_fn(|| q.pop_due(100.0)).map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn ties_fire_in_insertion_order() {
        let mut q = TaskQueue::new();
        q.push(timeout(7, 5.0));
        q.push(timeout(3, 5.0));

        assert_eq!(q.pop_due(5.0).map(|t| t.id), Some(7));
        assert_eq!(q.pop_due(5.0).map(|t| t.id), Some(3));
    }

    #[test]
    fn respects_limit() {
        let mut q = TaskQueue::new();
        q.push(timeout(1, 50.0));
        assert!(q.pop_due(49.9).is_none());
        assert_eq!(q.next_due(), Some(50.0));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn remove_reports_presence() {
        let mut q = TaskQueue::new();
        q.push(timeout(1, 1.0));
        assert!(q.remove(1));
        assert!(!q.remove(1));
        assert!(q.is_empty());
    }
}
