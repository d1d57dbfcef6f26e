use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::info;
use url::Url;

use crate::bridge::{SignInBridge, BRIDGE_NAME};
use crate::dispatch::MainThreadDispatcher;
use crate::events::{
    CallbackRegistry, ErrorEvent, SharedCallbacks, SuccessEvent, TargetSelectedEvent,
    UnsupportedTargetEvent,
};
use crate::params::WidgetParams;
use crate::surface::SignInSurface;
use crate::template::{self, DEFAULT_TEMPLATE};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to write widget document: {0}")]
    Write(#[from] io::Error),
    #[error("target path {0:?} cannot be expressed as a file URL")]
    InvalidTargetPath(PathBuf),
}

/// Embeds the Kontomatik SignIn widget in a host-provided web surface.
///
/// Configure parameters and event handlers, then call [`load`](Self::load);
/// the widget drives the registered handlers through the bridge for as long
/// as the document stays loaded. Parameters and the template persist across
/// `load` calls until explicitly changed.
pub struct SignInView {
    template: String,
    params: WidgetParams,
    callbacks: SharedCallbacks,
    bridge: Arc<SignInBridge>,
    surface: Box<dyn SignInSurface>,
}

impl SignInView {
    pub fn new(surface: Box<dyn SignInSurface>, dispatcher: Arc<dyn MainThreadDispatcher>) -> Self {
        let callbacks: SharedCallbacks = Arc::new(Mutex::new(CallbackRegistry::default()));
        let bridge = Arc::new(SignInBridge::new(Arc::clone(&callbacks), dispatcher));
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            params: WidgetParams::new(),
            callbacks,
            bridge,
            surface,
        }
    }

    /// Render the widget document, persist it to `target_file`, and point
    /// the surface at it.
    ///
    /// Each call renders from the template and parameters as they are right
    /// now; mutations between calls are picked up by the next call. The
    /// target file is overwritten. The surface is only touched once the
    /// document has been written.
    pub fn load(&mut self, client_id: &str, target_file: &Path) -> Result<(), LoadError> {
        let document = template::render(&self.template, client_id, &self.params);
        fs::write(target_file, &document)?;
        let url = file_url(target_file)?;

        info!(
            target: "kontomatik",
            url = %url,
            params = self.params.len(),
            "loading sign-in widget document"
        );
        self.surface.enable_scripting();
        self.surface
            .install_bridge(BRIDGE_NAME, Arc::clone(&self.bridge));
        self.surface.navigate(url);
        Ok(())
    }

    pub fn params(&self) -> &WidgetParams {
        &self.params
    }

    /// Mutable access to the parameter store, e.g.
    /// `view.params_mut().set_str("country", "pl").set_bool("psd2", true)`.
    pub fn params_mut(&mut self) -> &mut WidgetParams {
        &mut self.params
    }

    /// Remove every configured widget parameter.
    pub fn clear_params(&mut self) {
        self.params.clear();
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Replace the document template.
    ///
    /// A replacement must keep calling the bridge object by its registered
    /// name for callbacks to reach the host.
    pub fn set_template(&mut self, template: impl Into<String>) {
        self.template = template.into();
    }

    /// The bridge object the surface exposes to page scripts. Useful for
    /// hosts that wire their surface outside [`load`](Self::load).
    pub fn bridge(&self) -> Arc<SignInBridge> {
        Arc::clone(&self.bridge)
    }

    // Handler setters. Each slot holds one handler; setting it again
    // replaces the previous one entirely, including for events already
    // queued but not yet delivered.

    /// Runs after the user completes the sign-in flow.
    pub fn on_success(&mut self, handler: impl Fn(SuccessEvent) + Send + Sync + 'static) {
        self.callbacks.lock().unwrap().on_success = Some(Arc::new(handler));
    }

    /// Runs when the widget reports an error. `handled_in_view` on the event
    /// tells the host whether the widget already displayed it.
    pub fn on_error(&mut self, handler: impl Fn(ErrorEvent) + Send + Sync + 'static) {
        self.callbacks.lock().unwrap().on_error = Some(Arc::new(handler));
    }

    /// Runs when the user reports their bank as missing from the list.
    pub fn on_unsupported_target(
        &mut self,
        handler: impl Fn(UnsupportedTargetEvent) + Send + Sync + 'static,
    ) {
        self.callbacks.lock().unwrap().on_unsupported_target = Some(Arc::new(handler));
    }

    /// Runs once the widget is initialized and ready for use.
    pub fn on_initialized(&mut self, handler: impl Fn() + Send + Sync + 'static) {
        self.callbacks.lock().unwrap().on_initialized = Some(Arc::new(handler));
    }

    /// Runs when the widget shows its bank selection screen.
    pub fn on_started(&mut self, handler: impl Fn() + Send + Sync + 'static) {
        self.callbacks.lock().unwrap().on_started = Some(Arc::new(handler));
    }

    /// Runs when the user selects a bank from the list.
    pub fn on_target_selected(
        &mut self,
        handler: impl Fn(TargetSelectedEvent) + Send + Sync + 'static,
    ) {
        self.callbacks.lock().unwrap().on_target_selected = Some(Arc::new(handler));
    }

    /// Runs after the user submits their credentials.
    pub fn on_credential_entered(&mut self, handler: impl Fn() + Send + Sync + 'static) {
        self.callbacks.lock().unwrap().on_credential_entered = Some(Arc::new(handler));
    }
}

fn file_url(path: &Path) -> Result<Url, LoadError> {
    let absolute = std::path::absolute(path)
        .map_err(|_| LoadError::InvalidTargetPath(path.to_path_buf()))?;
    Url::from_file_path(&absolute).map_err(|_| LoadError::InvalidTargetPath(absolute))
}
