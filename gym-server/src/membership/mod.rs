//! Membership lifecycle service
//!
//! Pure rules for the member lifecycle: expiry computation, renewal
//! urgency, draft validation, renewal and reminder text. Nothing here reads
//! the clock or touches storage; callers pass an explicit `as_of` date.
//!
//! ```text
//! Active(far) → Active(due_soon) → Active(due_today) → Active(due_yesterday) → Lapsed
//!      ↑______________________ apply_renewal (from any state) ______________|
//! ```

mod expiry;
mod reminder;
mod renewal;
mod search;
mod urgency;
mod validation;

pub use expiry::compute_expiry;
pub use reminder::{build_reminder_text, format_date, reminder_candidates};
pub use renewal::{RenewalTerms, apply_renewal};
pub use search::search_members;
pub use urgency::{REMINDER_WINDOW_DAYS, classify_urgency, select_members_needing_attention};
pub use validation::{
    MemberField, ValidationError, ValidationReason, validate_member_patch, validate_new_member,
    validate_renewal,
};
