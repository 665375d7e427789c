//! listnav: viewport-anchored incremental list navigation.
//!
//! The crate locates and positions items inside a very long, lazily paginated
//! list. It never renders anything: hosts plug in a [`surface::ListSurface`]
//! (geometry + scroll primitives) and a [`source::PageSource`] (pagination),
//! then drive a [`ListNavigator`] once per animation frame.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod source;
pub mod surface;
pub mod telemetry;

pub use api::{ListNavigator, NavigatorConfig};
pub use error::{NavigatorError, NavigatorResult};
