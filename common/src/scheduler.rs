#[derive(Debug, Clone, Copy)]
struct RecurringTask<K> {
    kind: K,
    interval_ms: u64,
    next_due_ms: u64,
}

#[derive(Debug, Clone)]
pub struct Scheduler<K> {
    tasks: Vec<RecurringTask<K>>,
    paused: bool,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            paused: false,
        }
    }
}

impl<K: Copy + PartialEq> Scheduler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    // Re-registering a kind replaces its interval.
    pub fn every(&mut self, kind: K, interval_ms: u64, now_ms: u64) {
        let interval_ms = interval_ms.max(1);
        let task = RecurringTask {
            kind,
            interval_ms,
            next_due_ms: now_ms.saturating_add(interval_ms),
        };
        match self.tasks.iter_mut().find(|task| task.kind == kind) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self, now_ms: u64) {
        if !self.paused {
            return;
        }
        self.paused = false;
        for task in &mut self.tasks {
            task.next_due_ms = now_ms.saturating_add(task.interval_ms);
        }
    }

    // Ticks missed while the caller was late are skipped, not replayed.
    pub fn due(&mut self, now_ms: u64) -> Vec<K> {
        if self.paused {
            return Vec::new();
        }

        let mut due = Vec::new();
        for task in &mut self.tasks {
            if task.next_due_ms > now_ms {
                continue;
            }
            due.push(task.kind);
            let behind = now_ms - task.next_due_ms;
            let skipped = behind / task.interval_ms;
            task.next_due_ms += (skipped + 1) * task.interval_ms;
        }
        due
    }
}
