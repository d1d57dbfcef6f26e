//! The script-facing bridge object.
//!
//! The generated document forwards every widget callback to a method on one
//! global object, registered under [`BRIDGE_NAME`]. The surface's script
//! engine may call these entry points from any thread, any number of times,
//! in any order; each call is a fire-and-forget notification that is
//! marshalled to the UI thread before the host handler runs.

use std::sync::Arc;

use tracing::debug;

use crate::dispatch::{MainThreadDispatcher, MainThreadTask};
use crate::events::{
    deliver, ErrorEvent, SharedCallbacks, SuccessEvent, TargetSelectedEvent,
    UnsupportedTargetEvent, WidgetEvent,
};

/// Global name the generated script resolves the bridge object under.
///
/// Must match the object name the document template calls; the default
/// template is pinned to it by a unit test.
pub const BRIDGE_NAME: &str = "kontomatikBridge";

/// Exception codes the widget already displays to the end user itself.
///
/// This is the vendor's documented error taxonomy frozen at integration
/// time. Membership is exact and case-sensitive; codes the vendor adds later
/// classify as not user-caused until the list is updated.
pub const USER_CAUSED_EXCEPTIONS: [&str; 8] = [
    "AccessBlocked",
    "AccessTemporarilyBlocked",
    "ManualActionRequired",
    "InvalidCredentials",
    "TargetCredentialsMismatch",
    "UnsupportedLoginMethod",
    "UnsupportedLanguage",
    "InsufficientIdentificationLevel",
];

/// True when the widget already showed `exception` to the user itself.
pub fn is_user_caused(exception: &str) -> bool {
    USER_CAUSED_EXCEPTIONS.contains(&exception)
}

/// Host side of the script bridge.
///
/// One instance per view; the surface exposes it to page scripts under
/// [`BRIDGE_NAME`]. Every entry point routes through the view's main-thread
/// dispatcher and returns nothing to the calling script.
pub struct SignInBridge {
    callbacks: SharedCallbacks,
    dispatcher: Arc<dyn MainThreadDispatcher>,
}

impl SignInBridge {
    pub(crate) fn new(
        callbacks: SharedCallbacks,
        dispatcher: Arc<dyn MainThreadDispatcher>,
    ) -> Self {
        Self {
            callbacks,
            dispatcher,
        }
    }

    pub fn on_success(
        &self,
        target: String,
        session_id: String,
        session_id_signature: String,
        options_json: String,
    ) {
        self.dispatch(WidgetEvent::Success(SuccessEvent {
            target,
            session_id,
            session_id_signature,
            options_json,
        }));
    }

    pub fn on_error(&self, exception: String, options_json: String) {
        let handled_in_view = is_user_caused(&exception);
        debug!(
            target: "kontomatik",
            exception = %exception,
            handled_in_view = handled_in_view,
            "widget reported an error"
        );
        self.dispatch(WidgetEvent::Error(ErrorEvent {
            exception,
            options_json,
            handled_in_view,
        }));
    }

    pub fn on_unsupported_target(&self, target: String, country: String, address: String) {
        self.dispatch(WidgetEvent::UnsupportedTarget(UnsupportedTargetEvent {
            target,
            country,
            address,
        }));
    }

    pub fn on_initialized(&self) {
        self.dispatch(WidgetEvent::Initialized);
    }

    pub fn on_started(&self) {
        self.dispatch(WidgetEvent::Started);
    }

    pub fn on_target_selected(&self, name: String, official_name: String) {
        self.dispatch(WidgetEvent::TargetSelected(TargetSelectedEvent {
            name,
            official_name,
        }));
    }

    pub fn on_credential_entered(&self) {
        self.dispatch(WidgetEvent::CredentialEntered);
    }

    fn dispatch(&self, event: WidgetEvent) {
        debug!(target: "kontomatik", event = event.name(), "forwarding widget event to the UI thread");
        let callbacks = Arc::clone(&self.callbacks);
        self.dispatcher
            .run_on_main(MainThreadTask::new(move || deliver(&callbacks, event)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_the_documented_user_caused_codes() {
        for code in USER_CAUSED_EXCEPTIONS {
            assert!(is_user_caused(code), "{code} should be user-caused");
        }
    }

    #[test]
    fn unknown_codes_are_not_user_caused() {
        assert!(!is_user_caused("SomeOtherError"));
        assert!(!is_user_caused("ServerError"));
        assert!(!is_user_caused(""));
    }

    #[test]
    fn membership_is_case_sensitive() {
        assert!(is_user_caused("InvalidCredentials"));
        assert!(!is_user_caused("invalidcredentials"));
        assert!(!is_user_caused("INVALIDCREDENTIALS"));
    }
}
