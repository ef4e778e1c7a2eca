//! Observer-style delivery of finished selections.

#[path = "notify/event.rs"]
mod event;

#[path = "notify/channel.rs"]
mod channel;

pub use channel::{NotificationChannel, SelectionListener};
pub use event::SelectionEvent;
