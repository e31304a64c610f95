//! Renewal reminder types

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::member::Member;

/// Messaging channel used to deliver a reminder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderChannel {
    /// Plain text message
    #[serde(rename = "sms")]
    Sms,
    /// Chat app, personal account
    #[serde(rename = "whatsapp")]
    WhatsApp,
    /// Chat app, business account
    #[serde(rename = "business_whatsapp")]
    WhatsAppBusiness,
}

impl ReminderChannel {
    pub const ALL: [ReminderChannel; 3] = [
        ReminderChannel::Sms,
        ReminderChannel::WhatsApp,
        ReminderChannel::WhatsAppBusiness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::WhatsApp => "whatsapp",
            Self::WhatsAppBusiness => "business_whatsapp",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reminder channel '{0}'")]
pub struct ParseChannelError(pub String);

impl FromStr for ReminderChannel {
    type Err = ParseChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ReminderChannel::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| ParseChannelError(s.to_string()))
    }
}

/// Renewal urgency of one member relative to an as-of date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Expired more than one day ago
    Expired,
    /// Expired exactly one day ago
    DueYesterday,
    /// Expires today
    DueToday,
    /// Expires within the next three days
    DueSoon,
    /// Expires later than that
    NotDue,
}

impl Urgency {
    /// Whether staff should be reminded about this member
    pub fn needs_attention(&self) -> bool {
        matches!(self, Self::DueYesterday | Self::DueToday | Self::DueSoon)
    }
}

/// A member in the reminder list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderCandidate {
    pub member: Member,
    pub urgency: Urgency,
    /// Ready-to-send reminder text
    pub message: String,
}

/// Send reminder payload
///
/// The channel stays text until [`SendReminderRequest::channel`] parses it, so
/// an unknown name is reported like any other invalid field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendReminderRequest {
    #[serde(default, rename = "channel")]
    pub channel_name: String,
}

impl SendReminderRequest {
    pub fn channel(&self) -> Result<ReminderChannel, ParseChannelError> {
        self.channel_name.parse()
    }
}

/// Outcome of a successful dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReceipt {
    pub channel: ReminderChannel,
    pub phone: String,
    /// URL the device opens to hand the message to the messaging app
    pub launch_url: String,
    pub dispatched_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_wire_names() {
        assert_eq!(
            serde_json::to_string(&ReminderChannel::WhatsAppBusiness).unwrap(),
            "\"business_whatsapp\""
        );
        let channel: ReminderChannel = serde_json::from_str("\"sms\"").unwrap();
        assert_eq!(channel, ReminderChannel::Sms);
        assert_eq!(ReminderChannel::WhatsApp.as_str(), "whatsapp");
    }

    #[test]
    fn channel_from_config_text() {
        assert_eq!(" SMS ".parse::<ReminderChannel>(), Ok(ReminderChannel::Sms));
        assert_eq!(
            "business_whatsapp".parse::<ReminderChannel>(),
            Ok(ReminderChannel::WhatsAppBusiness)
        );
        assert_eq!(
            "pigeon".parse::<ReminderChannel>(),
            Err(ParseChannelError("pigeon".to_string()))
        );
    }

    #[test]
    fn send_request_parses_channel_late() {
        let request: SendReminderRequest =
            serde_json::from_str(r#"{"channel":"WhatsApp"}"#).unwrap();
        assert_eq!(request.channel(), Ok(ReminderChannel::WhatsApp));

        let request: SendReminderRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.channel(), Err(ParseChannelError(String::new())));
    }

    #[test]
    fn urgency_attention_set() {
        assert!(Urgency::DueYesterday.needs_attention());
        assert!(Urgency::DueToday.needs_attention());
        assert!(Urgency::DueSoon.needs_attention());
        assert!(!Urgency::Expired.needs_attention());
        assert!(!Urgency::NotDue.needs_attention());
        assert_eq!(
            serde_json::to_string(&Urgency::DueYesterday).unwrap(),
            "\"due_yesterday\""
        );
    }
}
