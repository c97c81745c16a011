#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
}

pub const READY_STATUS: &str = "Ready. Press Ctrl+S to send, Esc to cancel.";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn set_raw(&mut self, msg: impl Into<String>) {
        self.message = msg.into();
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
    }

    pub fn editing(&mut self, label: &str) {
        self.message = format!("Editing {label}");
    }

    pub fn rejected(&mut self, label: &str) {
        self.message = format!("Input rejected for {label}");
    }

    pub fn issues_remaining(&mut self, count: usize, first: &str) {
        self.message = if count > 1 {
            format!("{count} issue(s): {first}")
        } else {
            first.to_string()
        };
    }

    pub fn pending_exit(&mut self) {
        self.message = "Unsaved changes. Press Esc or Ctrl+Q again to cancel.".to_string();
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
