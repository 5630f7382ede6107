use boardsync_core::{SyncError, SyncResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A message for the toast/alert surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// The user lost access to the board; the view should navigate away.
    pub access_revoked: bool,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            access_revoked: false,
        }
    }
}

/// Where user-facing notices go. Implemented by the presentation layer.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Turns the outcome of a controller operation into a notice and sends it.
///
/// `NotFound` outcomes are dropped: they mean a reload already removed the
/// target. Returns the notice that was sent, if any.
pub fn report_outcome<T>(
    sink: &dyn NotificationSink,
    action: &str,
    result: &SyncResult<T>,
) -> Option<Notice> {
    let notice = match result {
        Ok(_) => Notice::new(NoticeLevel::Success, format!("{} succeeded", action)),
        Err(e) if e.is_silent() => return None,
        Err(SyncError::Validation(reason)) => Notice::new(NoticeLevel::Warning, reason.clone()),
        Err(SyncError::Authorization(reason)) => Notice {
            level: NoticeLevel::Error,
            message: format!("{} failed: {}", action, reason),
            access_revoked: true,
        },
        Err(e) => Notice::new(NoticeLevel::Error, format!("{} failed: {}", action, e)),
    };
    sink.notify(notice.clone());
    Some(notice)
}
