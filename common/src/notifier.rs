pub const TOAST_DURATION_MS: u64 = 5_000;

// One dismissal deadline: a new message always supersedes the old timer.
#[derive(Debug, Clone)]
pub struct Notifier {
    duration_ms: u64,
    message: Option<String>,
    dismiss_at_ms: Option<u64>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(TOAST_DURATION_MS)
    }
}

impl Notifier {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            message: None,
            dismiss_at_ms: None,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, now_ms: u64) {
        self.message = Some(message.into());
        self.dismiss_at_ms = Some(now_ms.saturating_add(self.duration_ms));
    }

    pub fn expire(&mut self, now_ms: u64) -> bool {
        match self.dismiss_at_ms {
            Some(deadline) if now_ms >= deadline => {
                self.message = None;
                self.dismiss_at_ms = None;
                true
            }
            _ => false,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }
}
