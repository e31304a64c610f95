//! Reminder delivery
//!
//! The server does not talk to messaging providers itself. A dispatcher turns
//! a reminder into whatever the device needs to hand the text to the
//! messaging app; [`DeepLinkDispatcher`] produces launch URLs.

mod link;

pub use link::{DeepLinkDispatcher, normalize_phone, reminder_url};

use async_trait::async_trait;
use shared::models::{DispatchReceipt, ReminderChannel};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("'{0}' is not a usable phone number")]
    InvalidPhone(String),

    #[error("channel {} is not available", .0.as_str())]
    ChannelUnavailable(ReminderChannel),
}

/// Notification dispatcher contract
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn send(
        &self,
        channel: ReminderChannel,
        phone: &str,
        text: &str,
    ) -> Result<DispatchReceipt, DispatchError>;
}
