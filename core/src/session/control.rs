use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

#[derive(Debug, Clone, Default)]
pub struct SessionControl {
    inner: Arc<ControlState>,
}

#[derive(Debug, Default)]
struct ControlState {
    end_requested: AtomicBool,
    final_message: OnceLock<String>,
}

impl SessionControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first final message wins; later requests only keep the flag set.
    pub fn request_end(&self, final_message: &str) {
        let _ = self.inner.final_message.set(final_message.to_string());
        self.inner.end_requested.store(true, Ordering::SeqCst);
    }

    pub fn is_end_requested(&self) -> bool {
        self.inner.end_requested.load(Ordering::SeqCst)
    }

    pub fn final_message(&self) -> Option<String> {
        self.inner.final_message.get().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let control = SessionControl::new();
        let handle = control.clone();
        assert!(!control.is_end_requested());

        handle.request_end("bye");
        handle.request_end("again");

        assert!(control.is_end_requested());
        assert_eq!(control.final_message().as_deref(), Some("bye"));
    }
}
