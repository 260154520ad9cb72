use std::time::{Duration, Instant};

const SUCCESS_LIFETIME: Duration = Duration::from_secs(4);
const FAILURE_LIFETIME: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStyle {
    Success,
    Failure,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub style: ToastStyle,
    pub title: String,
    pub message: String,
    pub created_at: Instant,
    pub expires_at: Instant,
}

impl Toast {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToastStyle::Success, title.into(), message.into(), SUCCESS_LIFETIME)
    }

    pub fn failure(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToastStyle::Failure, title.into(), message.into(), FAILURE_LIFETIME)
    }

    fn new(style: ToastStyle, title: String, message: String, lifetime: Duration) -> Self {
        let created_at = Instant::now();
        Self {
            style,
            title,
            message,
            created_at,
            expires_at: created_at + lifetime,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Toasts currently on screen, oldest first
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    /// Drop expired toasts and return the rest
    pub fn visible(&mut self, now: Instant) -> &[Toast] {
        self.toasts.retain(|toast| !toast.is_expired(now));
        &self.toasts
    }

    pub fn dismiss(&mut self, index: usize) {
        if index < self.toasts.len() {
            self.toasts.remove(index);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_toasts_are_dropped() {
        let mut queue = ToastQueue::new();
        queue.push(Toast::success("Job Started", "started nightly-etl"));
        queue.push(Toast::failure("AccessDeniedException", "denied"));

        let later = Instant::now() + Duration::from_secs(5);
        let visible = queue.visible(later);

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].style, ToastStyle::Failure);
    }

    #[test]
    fn test_dismiss_out_of_range_is_noop() {
        let mut queue = ToastQueue::new();
        queue.push(Toast::success("a", "b"));
        queue.dismiss(3);
        queue.dismiss(0);
        assert!(queue.is_empty());
    }
}
