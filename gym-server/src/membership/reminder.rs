use chrono::NaiveDate;
use shared::models::{Member, ReminderCandidate};

use super::{classify_urgency, select_members_needing_attention};

/// dd/mm/yyyy
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Renewal reminder text for one member
pub fn build_reminder_text(member: &Member) -> String {
    format!(
        "Hi {}, your gym membership is expiring on {}. Please renew your membership to continue using our facilities.",
        member.name,
        format_date(member.expiry_date)
    )
}

/// Members needing attention at `as_of`, soonest expiry first, each with
/// its urgency and reminder text.
pub fn reminder_candidates(members: &[Member], as_of: NaiveDate) -> Vec<ReminderCandidate> {
    let mut candidates: Vec<ReminderCandidate> = select_members_needing_attention(members, as_of)
        .into_iter()
        .map(|member| ReminderCandidate {
            member: member.clone(),
            urgency: classify_urgency(member.expiry_date, as_of),
            message: build_reminder_text(member),
        })
        .collect();
    candidates.sort_by_key(|c| c.member.expiry_date);
    candidates
}
