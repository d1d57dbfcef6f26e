use std::sync::Arc;

use url::Url;

use crate::bridge::SignInBridge;

/// Host-provided web surface the widget document is loaded into.
///
/// The component does not pick a webview or windowing toolkit; the host
/// implements this over whatever it renders with. All methods are called on
/// the UI thread during [`SignInView::load`](crate::view::SignInView::load).
/// Failures belong to the surface's own error channel and are not routed
/// back through the component.
pub trait SignInSurface {
    /// Enable script execution and DOM storage. The widget needs both.
    /// Called before every navigation; must be idempotent.
    fn enable_scripting(&mut self);

    /// Expose `bridge` to page scripts as a global named `name`, replacing
    /// any previously installed object.
    fn install_bridge(&mut self, name: &'static str, bridge: Arc<SignInBridge>);

    /// Load the freshly written widget document.
    fn navigate(&mut self, url: Url);
}
