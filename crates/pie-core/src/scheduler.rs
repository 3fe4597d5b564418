use std::time::Duration;

#[derive(Debug)]
struct Pending<T> {
    due: Duration,
    task: T,
}

/// Same-thread deferred task queue. Nothing runs on post: tasks come back
/// from [`Scheduler::take_due`] once their time has come, ordered by due
/// time and, for equal times, by posting order.
#[derive(Debug)]
pub struct Scheduler<T> {
    pending: Vec<Pending<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs at the next pump.
    pub fn post(&mut self, now: Duration, task: T) {
        self.pending.push(Pending { due: now, task });
    }

    pub fn post_delayed(&mut self, now: Duration, delay: Duration, task: T) {
        self.pending.push(Pending {
            due: now + delay,
            task,
        });
    }

    /// Drops every pending task matching `pred`, returning how many were removed.
    pub fn remove(&mut self, pred: impl Fn(&T) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| !pred(&p.task));
        before - self.pending.len()
    }

    pub fn count(&self, pred: impl Fn(&T) -> bool) -> usize {
        self.pending.iter().filter(|p| pred(&p.task)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn take_due(&mut self, now: Duration) -> Vec<T> {
        let (mut due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.due <= now);
        self.pending = rest;
        // stable, so equal due times keep posting order
        due.sort_by_key(|p| p.due);
        due.into_iter().map(|p| p.task).collect()
    }
}
