use std::collections::HashSet;

use async_trait::async_trait;
use shared::models::{DispatchReceipt, ReminderChannel};

use super::{DispatchError, NotificationDispatcher};

/// Strip formatting from a phone number.
///
/// Spaces, dashes, dots and parentheses are dropped and a single leading `+`
/// is kept. Returns `None` when nothing dialable remains or any other
/// character is present.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let (plus, rest) = match raw.strip_prefix('+') {
        Some(rest) => ("+", rest),
        None => ("", raw),
    };

    let mut digits = String::with_capacity(rest.len());
    for c in rest.chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '-' | '.' | '(' | ')' => {}
            _ => return None,
        }
    }

    if digits.is_empty() {
        None
    } else {
        Some(format!("{plus}{digits}"))
    }
}

/// Launch URL for a reminder on `channel`.
///
/// `phone` must already be normalized.
pub fn reminder_url(channel: ReminderChannel, phone: &str, text: &str) -> String {
    let text = urlencoding::encode(text);
    match channel {
        ReminderChannel::WhatsApp => format!("whatsapp://send?phone={phone}&text={text}"),
        ReminderChannel::WhatsAppBusiness => {
            // wa.me wants the bare international number
            let digits = phone.trim_start_matches('+');
            format!("https://wa.me/{digits}?text={text}")
        }
        ReminderChannel::Sms => format!("sms:{phone}?body={text}"),
    }
}

/// Dispatcher that answers with the deep link the device should open
#[derive(Debug, Clone)]
pub struct DeepLinkDispatcher {
    enabled: HashSet<ReminderChannel>,
}

impl DeepLinkDispatcher {
    pub fn new(enabled: impl IntoIterator<Item = ReminderChannel>) -> Self {
        Self {
            enabled: enabled.into_iter().collect(),
        }
    }

    pub fn is_enabled(&self, channel: ReminderChannel) -> bool {
        self.enabled.contains(&channel)
    }
}

impl Default for DeepLinkDispatcher {
    fn default() -> Self {
        Self::new([
            ReminderChannel::Sms,
            ReminderChannel::WhatsApp,
            ReminderChannel::WhatsAppBusiness,
        ])
    }
}

#[async_trait]
impl NotificationDispatcher for DeepLinkDispatcher {
    async fn send(
        &self,
        channel: ReminderChannel,
        phone: &str,
        text: &str,
    ) -> Result<DispatchReceipt, DispatchError> {
        if !self.is_enabled(channel) {
            return Err(DispatchError::ChannelUnavailable(channel));
        }
        let phone =
            normalize_phone(phone).ok_or_else(|| DispatchError::InvalidPhone(phone.to_string()))?;

        let launch_url = reminder_url(channel, &phone, text);
        tracing::debug!(channel = channel.as_str(), %phone, "Reminder link prepared");

        Ok(DispatchReceipt {
            channel,
            phone,
            launch_url,
            dispatched_at: shared::util::now_millis(),
        })
    }
}
