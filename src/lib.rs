//! Embeds the Kontomatik SignIn widget in a host application.
//!
//! The component renders the widget bootstrap document from a template,
//! writes it to a file, has the host's web surface load it, and forwards the
//! widget's script-side callbacks to host closures on the UI thread.

pub mod bridge;
pub mod dispatch;
pub mod events;
pub mod params;
pub mod surface;
pub mod template;
pub mod view;

// Re-export the types most hosts touch.
pub use bridge::{is_user_caused, SignInBridge, BRIDGE_NAME, USER_CAUSED_EXCEPTIONS};
pub use dispatch::{EventLoopDispatcher, MainThreadDispatcher, MainThreadTask};
pub use events::{
    ErrorEvent, SuccessEvent, TargetSelectedEvent, UnsupportedTargetEvent, WidgetEvent,
};
pub use params::WidgetParams;
pub use surface::SignInSurface;
pub use template::DEFAULT_TEMPLATE;
pub use view::{LoadError, SignInView};
