//! User-facing notifications.
//!
//! Provides the notification types and the sink trait core services emit
//! through after an operation completes. The host application implements
//! the sink to display toasts.

mod notification;
mod sink;

pub use notification::*;
pub use sink::*;
