use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{Member, Plan};

use super::compute_expiry;

/// Validated renewal input, see [`super::validate_renewal`]
#[derive(Debug, Clone, PartialEq)]
pub struct RenewalTerms {
    pub plan: Plan,
    pub amount_paid: Decimal,
    pub due_amount: Decimal,
    pub renewal_date: NaiveDate,
}

impl RenewalTerms {
    pub fn apply_to(&self, member: &Member) -> Member {
        apply_renewal(
            member,
            &self.plan,
            self.amount_paid,
            self.due_amount,
            self.renewal_date,
        )
    }
}

/// Start a new billing period for `member`.
///
/// Returns a new value: plan, both dates and both payment figures are
/// replaced; identity and contact fields are carried over untouched.
pub fn apply_renewal(
    member: &Member,
    plan: &Plan,
    amount_paid: Decimal,
    due_amount: Decimal,
    renewal_date: NaiveDate,
) -> Member {
    Member {
        plan_type: plan.name.clone(),
        join_date: renewal_date,
        expiry_date: compute_expiry(renewal_date, plan.duration),
        amount_paid,
        due_amount,
        ..member.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::classify_urgency;
    use shared::models::{Gender, PlanCatalog, Urgency};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lapsed_member() -> Member {
        Member {
            id: 77,
            name: "Karan".to_string(),
            mobile: "+91 98765 43210".to_string(),
            gender: Gender::Male,
            plan_type: "Monthly".to_string(),
            amount_paid: Decimal::from(1000),
            due_amount: Decimal::from(200),
            join_date: date(2024, 1, 1),
            expiry_date: date(2024, 1, 31),
            created_at: 1,
            updated_at: 2,
        }
    }

    #[test]
    fn replaces_period_and_payment() {
        let catalog = PlanCatalog::default();
        let plan = catalog.find_by_name("Quarterly").unwrap();
        let renewed = apply_renewal(
            &lapsed_member(),
            plan,
            Decimal::from(2500),
            Decimal::ZERO,
            date(2024, 2, 10),
        );

        assert_eq!(renewed.plan_type, "Quarterly");
        assert_eq!(renewed.join_date, date(2024, 2, 10));
        assert_eq!(renewed.expiry_date, date(2024, 5, 10));
        assert_eq!(renewed.amount_paid, Decimal::from(2500));
        assert_eq!(renewed.due_amount, Decimal::ZERO);
    }

    #[test]
    fn keeps_identity_and_contact() {
        let original = lapsed_member();
        let plan = PlanCatalog::default().find_by_name("Yearly").cloned().unwrap();
        let renewed = apply_renewal(
            &original,
            &plan,
            Decimal::from(8000),
            Decimal::ZERO,
            date(2024, 3, 1),
        );

        assert_eq!(renewed.id, original.id);
        assert_eq!(renewed.name, original.name);
        assert_eq!(renewed.mobile, original.mobile);
        assert_eq!(renewed.gender, original.gender);
        assert_eq!(renewed.created_at, original.created_at);
        // input is not mutated
        assert_eq!(original.plan_type, "Monthly");
    }

    #[test]
    fn applying_twice_gives_same_result() {
        let plan = PlanCatalog::default().find_by_name("Monthly").cloned().unwrap();
        let terms = RenewalTerms {
            plan,
            amount_paid: Decimal::from(1000),
            due_amount: Decimal::from(100),
            renewal_date: date(2024, 2, 1),
        };

        let once = terms.apply_to(&lapsed_member());
        let twice = terms.apply_to(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn renewed_member_is_no_longer_urgent() {
        let plan = PlanCatalog::default().find_by_name("Monthly").cloned().unwrap();
        let as_of = date(2024, 2, 1);
        let before = lapsed_member();
        assert_eq!(
            classify_urgency(before.expiry_date, as_of),
            Urgency::DueYesterday
        );

        let after = apply_renewal(&before, &plan, Decimal::from(1000), Decimal::ZERO, as_of);
        assert_eq!(classify_urgency(after.expiry_date, as_of), Urgency::NotDue);
    }
}
