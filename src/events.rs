use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Delivered when the end user completes the sign-in flow.
///
/// `session_id` and `session_id_signature` are the credentials the host
/// exchanges with its backend; the widget treats them as opaque here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessEvent {
    pub target: String,
    pub session_id: String,
    pub session_id_signature: String,
    /// Raw widget options object, JSON-stringified on its way across the
    /// bridge.
    pub options_json: String,
}

impl SuccessEvent {
    /// Parse the options payload as JSON.
    pub fn options(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.options_json)
    }
}

/// Delivered when the widget reports an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEvent {
    /// Vendor exception code, e.g. `InvalidCredentials`.
    pub exception: String,
    pub options_json: String,
    /// True when the exception is one the widget already displays to the end
    /// user; hosts usually skip their own error UI for these.
    pub handled_in_view: bool,
}

impl ErrorEvent {
    /// Parse the options payload as JSON.
    pub fn options(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.options_json)
    }
}

/// Delivered when the user picks the "my bank is not listed" option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsupportedTargetEvent {
    pub target: String,
    pub country: String,
    pub address: String,
}

/// Delivered when the user selects a bank from the list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSelectedEvent {
    pub name: String,
    pub official_name: String,
}

/// One widget callback on its way from the surface's script thread to the
/// UI thread.
#[derive(Debug, Clone)]
pub enum WidgetEvent {
    Success(SuccessEvent),
    Error(ErrorEvent),
    UnsupportedTarget(UnsupportedTargetEvent),
    Initialized,
    Started,
    TargetSelected(TargetSelectedEvent),
    CredentialEntered,
}

impl WidgetEvent {
    /// Widget-side callback name, used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            WidgetEvent::Success(_) => "onSuccess",
            WidgetEvent::Error(_) => "onError",
            WidgetEvent::UnsupportedTarget(_) => "onUnsupportedTarget",
            WidgetEvent::Initialized => "onInitialized",
            WidgetEvent::Started => "onStarted",
            WidgetEvent::TargetSelected(_) => "onTargetSelected",
            WidgetEvent::CredentialEntered => "onCredentialEntered",
        }
    }
}

pub(crate) type SuccessHandler = Arc<dyn Fn(SuccessEvent) + Send + Sync>;
pub(crate) type ErrorHandler = Arc<dyn Fn(ErrorEvent) + Send + Sync>;
pub(crate) type UnsupportedTargetHandler = Arc<dyn Fn(UnsupportedTargetEvent) + Send + Sync>;
pub(crate) type TargetSelectedHandler = Arc<dyn Fn(TargetSelectedEvent) + Send + Sync>;
pub(crate) type NotifyHandler = Arc<dyn Fn() + Send + Sync>;

/// One replaceable slot per widget callback. An unset slot is a no-op.
#[derive(Default)]
pub(crate) struct CallbackRegistry {
    pub(crate) on_success: Option<SuccessHandler>,
    pub(crate) on_error: Option<ErrorHandler>,
    pub(crate) on_unsupported_target: Option<UnsupportedTargetHandler>,
    pub(crate) on_initialized: Option<NotifyHandler>,
    pub(crate) on_started: Option<NotifyHandler>,
    pub(crate) on_target_selected: Option<TargetSelectedHandler>,
    pub(crate) on_credential_entered: Option<NotifyHandler>,
}

pub(crate) type SharedCallbacks = Arc<Mutex<CallbackRegistry>>;

/// Invoke the registered handler for `event`. Runs on the UI thread.
///
/// The slot is read here, not when the event was queued, so a handler
/// replaced while an event was in flight never runs. The lock is released
/// before the handler is called; handlers may re-enter the view and swap
/// handlers themselves.
pub(crate) fn deliver(callbacks: &SharedCallbacks, event: WidgetEvent) {
    match event {
        WidgetEvent::Success(event) => {
            let handler = callbacks.lock().unwrap().on_success.clone();
            if let Some(handler) = handler {
                handler(event);
            }
        }
        WidgetEvent::Error(event) => {
            let handler = callbacks.lock().unwrap().on_error.clone();
            if let Some(handler) = handler {
                handler(event);
            }
        }
        WidgetEvent::UnsupportedTarget(event) => {
            let handler = callbacks.lock().unwrap().on_unsupported_target.clone();
            if let Some(handler) = handler {
                handler(event);
            }
        }
        WidgetEvent::Initialized => {
            let handler = callbacks.lock().unwrap().on_initialized.clone();
            if let Some(handler) = handler {
                handler();
            }
        }
        WidgetEvent::Started => {
            let handler = callbacks.lock().unwrap().on_started.clone();
            if let Some(handler) = handler {
                handler();
            }
        }
        WidgetEvent::TargetSelected(event) => {
            let handler = callbacks.lock().unwrap().on_target_selected.clone();
            if let Some(handler) = handler {
                handler(event);
            }
        }
        WidgetEvent::CredentialEntered => {
            let handler = callbacks.lock().unwrap().on_credential_entered.clone();
            if let Some(handler) = handler {
                handler();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn options_parse_as_json() {
        let event = SuccessEvent {
            target: "mbank".to_string(),
            session_id: "abc".to_string(),
            session_id_signature: "sig".to_string(),
            options_json: r#"{"ownerExternalId":"42"}"#.to_string(),
        };
        let options = event.options().expect("options json");
        assert_eq!(options["ownerExternalId"], "42");
    }

    #[test]
    fn malformed_options_surface_as_parse_errors() {
        let event = ErrorEvent {
            exception: "ServerError".to_string(),
            options_json: "not json".to_string(),
            handled_in_view: false,
        };
        assert!(event.options().is_err());
    }

    #[test]
    fn unset_slots_are_no_ops() {
        let callbacks: SharedCallbacks = Arc::new(Mutex::new(CallbackRegistry::default()));
        deliver(&callbacks, WidgetEvent::Initialized);
        deliver(&callbacks, WidgetEvent::CredentialEntered);
    }

    #[test]
    fn handlers_may_swap_handlers_while_running() {
        let callbacks: SharedCallbacks = Arc::new(Mutex::new(CallbackRegistry::default()));
        let calls = Arc::new(AtomicUsize::new(0));

        let inner = callbacks.clone();
        let counted = calls.clone();
        callbacks.lock().unwrap().on_started = Some(Arc::new(move || {
            counted.fetch_add(1, Ordering::SeqCst);
            // Re-entering the registry here must not deadlock.
            inner.lock().unwrap().on_started = None;
        }));

        deliver(&callbacks, WidgetEvent::Started);
        deliver(&callbacks, WidgetEvent::Started);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
