use std::time::Duration;

/// Outcome of advancing an [`Animation`] to a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress<A> {
    Idle,
    Running(f64),
    /// Reached its end value. `end` carries the end action, handed out once.
    Finished { value: f64, end: Option<A> },
}

/// Linear interpolation from `from` to `to`. The value is kept after the end
/// (fill-after). Starting a new run always cancels the previous one together
/// with its end action, so at most one run can ever finish.
#[derive(Debug, Clone)]
pub struct Animation<A> {
    from: f64,
    to: f64,
    duration: Duration,
    started_at: Option<Duration>,
    value: f64,
    end_action: Option<A>,
}

impl<A> Animation<A> {
    pub fn new(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            duration: Duration::ZERO,
            started_at: None,
            value,
            end_action: None,
        }
    }

    pub fn start(&mut self, now: Duration, duration: Duration, from: f64, to: f64, end: Option<A>) {
        self.cancel();
        self.reset();
        self.from = from;
        self.to = to;
        self.duration = duration;
        self.value = from;
        self.end_action = end;
        self.started_at = Some(now);
    }

    /// Stops without reporting an end; the pending end action is dropped.
    pub fn cancel(&mut self) {
        self.started_at = None;
        self.end_action = None;
    }

    /// Rewinds to the start value.
    pub fn reset(&mut self) {
        self.value = self.from;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn has_end_action(&self) -> bool {
        self.end_action.is_some()
    }

    pub fn advance(&mut self, now: Duration) -> Progress<A> {
        let Some(started_at) = self.started_at else {
            return Progress::Idle;
        };

        let elapsed = now.saturating_sub(started_at);
        let fraction = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };
        self.value = self.from + (self.to - self.from) * fraction;

        if fraction >= 1.0 {
            self.started_at = None;
            Progress::Finished {
                value: self.value,
                end: self.end_action.take(),
            }
        } else {
            Progress::Running(self.value)
        }
    }
}
