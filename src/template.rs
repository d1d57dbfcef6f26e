//! Widget document generation.
//!
//! The page handed to the surface is produced by literal placeholder
//! substitution, two tokens and nothing else. Substituted text lands in the
//! generated script verbatim, so an unsafe client id or parameter value
//! produces a syntactically broken page that only fails once the surface
//! executes it.

use crate::params::WidgetParams;

/// Token replaced with the caller's client id.
pub const CLIENT_ID_PLACEHOLDER: &str = "[CLIENT_ID]";

/// Token replaced with the rendered parameter block.
pub const PARAMS_PLACEHOLDER: &str = "[WIDGET_PARAMS]";

/// Default widget document.
///
/// Loads the vendor widget script and calls its embed function with the
/// client id, the target div, the configured parameters, and one forwarder
/// per widget callback. The forwarders call the bridge object registered
/// under [`BRIDGE_NAME`](crate::bridge::BRIDGE_NAME); options objects cross
/// the bridge as JSON text.
pub const DEFAULT_TEMPLATE: &str = r#"<html>
<head><script src="https://signin.kontomatik.com/assets/signin-widget.js"></script></head>
<body>
<div id="kontomatik"></div>
<script type="text/javascript">
embedKontomatik({
    client: '[CLIENT_ID]',
    divId: 'kontomatik',
    [WIDGET_PARAMS]
    onSuccess: function(target, sessionId, sessionIdSignature, options) {
        kontomatikBridge.onSuccess(target, sessionId, sessionIdSignature, JSON.stringify(options));
    },
    onError: function(exception, options) {
        kontomatikBridge.onError(exception, JSON.stringify(options));
    },
    onUnsupportedTarget: function(target, country, address) {
        kontomatikBridge.onUnsupportedTarget(target, country, address);
    },
    onInitialized: function() {
        kontomatikBridge.onInitialized();
    },
    onStarted: function() {
        kontomatikBridge.onStarted();
    },
    onTargetSelected: function(name, officialName) {
        kontomatikBridge.onTargetSelected(name, officialName);
    },
    onCredentialEntered: function() {
        kontomatikBridge.onCredentialEntered();
    }
});
</script>
</body>
</html>
"#;

/// Substitute the client id and parameter block into `template`.
///
/// Every occurrence of each token is replaced; a template without a token is
/// passed through untouched. `client_id` is embedded without escaping, so the
/// caller must supply a value safe for direct script embedding.
pub fn render(template: &str, client_id: &str, params: &WidgetParams) -> String {
    template
        .replace(CLIENT_ID_PLACEHOLDER, client_id)
        .replace(PARAMS_PLACEHOLDER, &params.render_block())
}
