//! Member Model

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Member gender, a fixed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of [`Gender::ALL`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gender '{0}'")]
pub struct ParseGenderError(pub String);

impl FromStr for Gender {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str() == s.trim())
            .ok_or_else(|| ParseGenderError(s.to_string()))
    }
}

/// Member entity
///
/// `expiry_date` is always `join_date + plan.duration` days for the plan
/// named by `plan_type` at the time the period was started. Nothing
/// re-derives it automatically; renewal is the only path that moves either
/// date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub mobile: String,
    pub gender: Gender,
    /// Plan name at join/renewal time (not a foreign key)
    pub plan_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_paid: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub due_amount: Decimal,
    pub join_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Member {
    /// Zero due amount means the current period is fully paid
    pub fn is_fully_paid(&self) -> bool {
        self.due_amount.is_zero()
    }
}

/// Create member payload, as typed into the join form
///
/// Amounts are kept as text until validation; JSON numbers are accepted too.
/// Missing fields read as empty so validation can name them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub plan_type: String,
    #[serde(default, deserialize_with = "amount_text")]
    pub amount_paid: String,
    /// Empty means fully paid
    #[serde(default, deserialize_with = "amount_text")]
    pub due_amount: String,
    /// Defaults to today when absent
    #[serde(default)]
    pub join_date: Option<NaiveDate>,
}

/// Validated member ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewMember {
    pub name: String,
    pub mobile: String,
    pub gender: Gender,
    pub plan_type: String,
    pub amount_paid: Decimal,
    pub due_amount: Decimal,
    pub join_date: NaiveDate,
    pub expiry_date: NaiveDate,
}

/// Edit member payload (contact and payment fields only)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "optional_amount_text")]
    pub amount_paid: Option<String>,
    #[serde(default, deserialize_with = "optional_amount_text")]
    pub due_amount: Option<String>,
}

/// Typed partial update handed to the member repository
///
/// `None` leaves the stored column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberUpdate {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub gender: Option<Gender>,
    pub plan_type: Option<String>,
    pub amount_paid: Option<Decimal>,
    pub due_amount: Option<Decimal>,
    pub join_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
}

impl MemberUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The billing-period columns of an already renewed member
    pub fn period_of(member: &Member) -> Self {
        Self {
            plan_type: Some(member.plan_type.clone()),
            amount_paid: Some(member.amount_paid),
            due_amount: Some(member.due_amount),
            join_date: Some(member.join_date),
            expiry_date: Some(member.expiry_date),
            ..Self::default()
        }
    }
}

/// Renewal payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenewalRequest {
    #[serde(default)]
    pub plan_type: String,
    #[serde(default, deserialize_with = "amount_text")]
    pub amount_paid: String,
    #[serde(default, deserialize_with = "amount_text")]
    pub due_amount: String,
    /// Defaults to today when absent
    #[serde(default)]
    pub renewal_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountText {
    Text(String),
    Number(serde_json::Number),
}

impl From<AmountText> for String {
    fn from(value: AmountText) -> Self {
        match value {
            AmountText::Text(s) => s,
            AmountText::Number(n) => n.to_string(),
        }
    }
}

fn amount_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    AmountText::deserialize(deserializer).map(String::from)
}

fn optional_amount_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<AmountText>::deserialize(deserializer)?.map(String::from))
}
