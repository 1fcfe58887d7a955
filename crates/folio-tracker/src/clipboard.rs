#![forbid(unsafe_code)]

//! Copy-to-clipboard with a transient notification.
//!
//! Contact affordances (email, phone) copy a value and flash a short
//! message. [`CopyNotifier`] keeps at most one notification on screen: a new
//! copy replaces the visible one and restarts its hide timer.
//!
//! # Failure Modes
//!
//! - Clipboard write refused or unavailable: logged at `warn`, shown as the
//!   configured failure message, never returned to the caller.

use std::fmt;
use std::time::Duration;

use folio_core::timer::TimerQueue;

/// Why a clipboard write failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The user agent refused permission.
    Denied,
    /// No clipboard API in this context (insecure origin, old browser).
    Unsupported,
    /// Any other host-reported failure.
    Host(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Denied => f.write_str("clipboard permission denied"),
            Self::Unsupported => f.write_str("clipboard unavailable"),
            Self::Host(msg) => write!(f, "clipboard write failed: {msg}"),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// System clipboard as exposed by the host.
pub trait Clipboard {
    /// Place `text` on the clipboard.
    ///
    /// # Errors
    ///
    /// Any [`ClipboardError`] the host reports.
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Outcome shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Text copied.
    Success,
    /// Copy failed.
    Failure,
}

/// The notification currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// User-facing message.
    pub text: String,
    /// Success or failure styling.
    pub kind: NoticeKind,
    /// Host time the notification appeared.
    pub shown_at: Duration,
}

/// Notifier configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// How long a notification stays up.
    /// Default: 2s
    pub duration: Duration,
    /// Message shown when the clipboard write fails.
    pub failure_message: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(2),
            failure_message: "Failed to copy to clipboard".to_owned(),
        }
    }
}

/// Single-slot notification driven by host time.
#[derive(Debug)]
pub struct CopyNotifier {
    config: NotifierConfig,
    current: Option<Notification>,
    timers: TimerQueue<()>,
    now: Duration,
}

impl CopyNotifier {
    /// Create an idle notifier.
    #[must_use]
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            config,
            current: None,
            timers: TimerQueue::new(),
            now: Duration::ZERO,
        }
    }

    /// Copy `text` and show `success_message`, or the failure message if
    /// the clipboard refuses. Returns which one is now on screen.
    pub fn copy(
        &mut self,
        clipboard: &dyn Clipboard,
        text: &str,
        success_message: &str,
    ) -> NoticeKind {
        match clipboard.write_text(text) {
            Ok(()) => {
                self.show(success_message.to_owned(), NoticeKind::Success);
                NoticeKind::Success
            }
            Err(err) => {
                tracing::warn!(error = %err, "clipboard copy failed");
                self.show(self.config.failure_message.clone(), NoticeKind::Failure);
                NoticeKind::Failure
            }
        }
    }

    /// Feed host time; hides the notification once its timer is due.
    pub fn advance_to(&mut self, now: Duration) {
        self.now = self.now.max(now);
        if self.timers.pop_due(self.now).is_some() {
            self.current = None;
        }
    }

    /// Hide everything and refuse further timers.
    pub fn teardown(&mut self) {
        self.timers.close();
        self.current = None;
    }

    /// The notification on screen, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// When the visible notification will hide.
    #[must_use]
    pub fn hides_at(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    fn show(&mut self, text: String, kind: NoticeKind) {
        // Pre-empt: the old hide timer must not close the new notification.
        self.timers.cancel_all();
        if self
            .timers
            .schedule(self.now, self.config.duration, ())
            .is_none()
        {
            return;
        }
        self.current = Some(Notification {
            text,
            kind,
            shown_at: self.now,
        });
    }
}
