//! Member form validation
//!
//! Every check fails fast on the first violation and never produces a
//! partially applied value: the typed result exists only when the whole
//! input is valid.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{
    Gender, MemberDraft, MemberPatch, MemberUpdate, NewMember, Plan, PlanCatalog, RenewalRequest,
};

use super::compute_expiry;
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN};

/// Member form fields that can fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberField {
    Name,
    Mobile,
    Gender,
    PlanType,
    AmountPaid,
    DueAmount,
}

impl MemberField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Mobile => "mobile",
            Self::Gender => "gender",
            Self::PlanType => "plan_type",
            Self::AmountPaid => "amount_paid",
            Self::DueAmount => "due_amount",
        }
    }
}

impl fmt::Display for MemberField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a field was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationReason {
    #[error("must not be empty")]
    Empty,

    #[error("is too long (max {max} chars)")]
    TooLong { max: usize },

    #[error("'{0}' is not one of Male, Female, Other")]
    UnknownGender(String),

    #[error("'{0}' is not a known plan")]
    UnknownPlan(String),

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("must not be negative")]
    Negative,
}

impl ValidationReason {
    /// Stable machine-readable reason
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooLong { .. } => "too_long",
            Self::UnknownGender(_) => "unknown_gender",
            Self::UnknownPlan(_) => "unknown_plan",
            Self::NotANumber(_) => "not_a_number",
            Self::Negative => "negative",
        }
    }
}

/// A rejected member field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} {reason}")]
pub struct ValidationError {
    pub field: MemberField,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: MemberField, reason: ValidationReason) -> Self {
        Self { field, reason }
    }
}

type Result<T> = std::result::Result<T, ValidationError>;

/// Validate a join form and build the member to store.
///
/// Checks, in order: name, mobile, gender, plan, amount paid, due amount.
/// `join_date` defaults to `as_of`; `expiry_date` is derived from the plan.
pub fn validate_new_member(
    draft: &MemberDraft,
    catalog: &PlanCatalog,
    as_of: NaiveDate,
) -> Result<NewMember> {
    let name = required_text(MemberField::Name, &draft.name, MAX_NAME_LEN)?;
    let mobile = required_text(MemberField::Mobile, &draft.mobile, MAX_SHORT_TEXT_LEN)?;
    let gender = gender(&draft.gender)?;
    let plan = known_plan(catalog, &draft.plan_type)?;
    let amount_paid = amount(MemberField::AmountPaid, &draft.amount_paid, false)?;
    let due_amount = amount(MemberField::DueAmount, &draft.due_amount, true)?;

    let join_date = draft.join_date.unwrap_or(as_of);

    Ok(NewMember {
        name,
        mobile,
        gender,
        plan_type: plan.name.clone(),
        amount_paid,
        due_amount,
        join_date,
        expiry_date: compute_expiry(join_date, plan.duration),
    })
}

/// Validate an edit form. Absent fields stay absent in the update.
pub fn validate_member_patch(patch: &MemberPatch) -> Result<MemberUpdate> {
    Ok(MemberUpdate {
        name: patch
            .name
            .as_deref()
            .map(|v| required_text(MemberField::Name, v, MAX_NAME_LEN))
            .transpose()?,
        mobile: patch
            .mobile
            .as_deref()
            .map(|v| required_text(MemberField::Mobile, v, MAX_SHORT_TEXT_LEN))
            .transpose()?,
        gender: patch.gender.as_deref().map(gender).transpose()?,
        amount_paid: patch
            .amount_paid
            .as_deref()
            .map(|v| amount(MemberField::AmountPaid, v, false))
            .transpose()?,
        due_amount: patch
            .due_amount
            .as_deref()
            .map(|v| amount(MemberField::DueAmount, v, true))
            .transpose()?,
        ..MemberUpdate::default()
    })
}

/// Validate a renewal form against the catalog.
///
/// `renewal_date` defaults to `as_of`.
pub fn validate_renewal(
    request: &RenewalRequest,
    catalog: &PlanCatalog,
    as_of: NaiveDate,
) -> Result<super::RenewalTerms> {
    let plan = known_plan(catalog, &request.plan_type)?;
    let amount_paid = amount(MemberField::AmountPaid, &request.amount_paid, false)?;
    let due_amount = amount(MemberField::DueAmount, &request.due_amount, true)?;

    Ok(super::RenewalTerms {
        plan: plan.clone(),
        amount_paid,
        due_amount,
        renewal_date: request.renewal_date.unwrap_or(as_of),
    })
}

fn required_text(field: MemberField, value: &str, max_len: usize) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::new(field, ValidationReason::Empty));
    }
    if value.chars().count() > max_len {
        return Err(ValidationError::new(
            field,
            ValidationReason::TooLong { max: max_len },
        ));
    }
    Ok(value.to_string())
}

fn gender(value: &str) -> Result<Gender> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(
            MemberField::Gender,
            ValidationReason::Empty,
        ));
    }
    value.parse::<Gender>().map_err(|e| {
        ValidationError::new(MemberField::Gender, ValidationReason::UnknownGender(e.0))
    })
}

fn known_plan<'a>(catalog: &'a PlanCatalog, name: &str) -> Result<&'a Plan> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::new(
            MemberField::PlanType,
            ValidationReason::Empty,
        ));
    }
    catalog.find_by_name(name).ok_or_else(|| {
        ValidationError::new(
            MemberField::PlanType,
            ValidationReason::UnknownPlan(name.to_string()),
        )
    })
}

/// Parse a non-negative decimal amount. Blank input is zero only when
/// `blank_is_zero` is set (the due amount).
fn amount(field: MemberField, raw: &str, blank_is_zero: bool) -> Result<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return if blank_is_zero {
            Ok(Decimal::ZERO)
        } else {
            Err(ValidationError::new(field, ValidationReason::Empty))
        };
    }

    let value = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| {
            ValidationError::new(field, ValidationReason::NotANumber(raw.to_string()))
        })?;

    if value < Decimal::ZERO {
        return Err(ValidationError::new(field, ValidationReason::Negative));
    }
    Ok(value.normalize())
}
