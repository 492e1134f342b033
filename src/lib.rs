use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};

pub mod config;
pub mod environment;
pub mod error;
pub mod launcher;
pub mod process;
pub mod remote;
pub mod resource;
pub mod reveal;
pub mod target;
pub mod translate;
pub mod winpath;

pub use config::Config;
pub use environment::Environment;
pub use error::RevealError;
pub use resource::{ResourceCandidates, ResourceIdentifier};
pub use reveal::{RevealOutcome, Revealer};
pub use target::{decide_target, ExplorerTarget};

/// How a user-facing message should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Ok,
    Warn,
    Error,
}

impl Severity {
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Ok => "OK",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

/// Receives each user-facing message, e.g. to raise an editor notification with the
/// matching severity. Stderr gets the same message as `[TAG] message` regardless.
pub type NotifyHook = Arc<Mutex<dyn Fn(Severity, &str) + Send + Sync + 'static>>;

static NOTIFY_HOOK: Lazy<Mutex<Option<NotifyHook>>> = Lazy::new(|| Mutex::new(None));

pub fn set_notify_hook(hook: Option<NotifyHook>) {
    if let Ok(mut guard) = NOTIFY_HOOK.lock() {
        *guard = hook;
    }
}

pub(crate) fn notify(severity: Severity, message: &str) {
    eprintln!("[{}] {}", severity.tag(), message);

    let hook = NOTIFY_HOOK.lock().ok().and_then(|guard| guard.clone());
    if let Some(callback) = hook.as_ref().and_then(|hook| hook.lock().ok()) {
        callback(severity, message);
    }
}

pub(crate) fn logi(message: impl AsRef<str>) {
    notify(Severity::Info, message.as_ref());
}

pub(crate) fn logok(message: impl AsRef<str>) {
    notify(Severity::Ok, message.as_ref());
}

pub(crate) fn logw(message: impl AsRef<str>) {
    notify(Severity::Warn, message.as_ref());
}

pub(crate) fn loge(message: impl AsRef<str>) {
    notify(Severity::Error, message.as_ref());
}
