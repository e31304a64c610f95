use chrono::NaiveDate;
use shared::models::{Member, Urgency};

/// Forward window, in days, for [`Urgency::DueSoon`]
pub const REMINDER_WINDOW_DAYS: i64 = 3;

/// Classify an expiry date relative to `as_of`.
///
/// Both values are calendar dates, so time of day never participates.
///
/// | `expiry - as_of` | result |
/// |------------------|--------|
/// | ≤ -2 | `Expired` |
/// | -1 | `DueYesterday` |
/// | 0 | `DueToday` |
/// | 1..=3 | `DueSoon` |
/// | > 3 | `NotDue` |
pub fn classify_urgency(expiry_date: NaiveDate, as_of: NaiveDate) -> Urgency {
    match expiry_date.signed_duration_since(as_of).num_days() {
        ..=-2 => Urgency::Expired,
        -1 => Urgency::DueYesterday,
        0 => Urgency::DueToday,
        1..=REMINDER_WINDOW_DAYS => Urgency::DueSoon,
        _ => Urgency::NotDue,
    }
}

/// Members whose renewal is due yesterday, today, or within the window.
///
/// Members lapsed for more than one day are left out; they are assumed
/// handled or churned. Input order is preserved.
pub fn select_members_needing_attention(members: &[Member], as_of: NaiveDate) -> Vec<&Member> {
    members
        .iter()
        .filter(|m| classify_urgency(m.expiry_date, as_of).needs_attention())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::Gender;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn member(id: i64, expiry_date: NaiveDate) -> Member {
        Member {
            id,
            name: format!("member_{id}"),
            mobile: format!("90000000{id:02}"),
            gender: Gender::Other,
            plan_type: "Monthly".to_string(),
            amount_paid: Decimal::from(1000),
            due_amount: Decimal::ZERO,
            join_date: date(2024, 1, 1),
            expiry_date,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn boundaries() {
        let as_of = date(2024, 3, 10);
        assert_eq!(classify_urgency(date(2024, 3, 8), as_of), Urgency::Expired);
        assert_eq!(
            classify_urgency(date(2024, 3, 9), as_of),
            Urgency::DueYesterday
        );
        assert_eq!(classify_urgency(date(2024, 3, 10), as_of), Urgency::DueToday);
        assert_eq!(classify_urgency(date(2024, 3, 11), as_of), Urgency::DueSoon);
        assert_eq!(classify_urgency(date(2024, 3, 13), as_of), Urgency::DueSoon);
        assert_eq!(classify_urgency(date(2024, 3, 14), as_of), Urgency::NotDue);
    }

    #[test]
    fn every_offset_gets_exactly_one_class() {
        let as_of = date(2024, 12, 30);
        for offset in -400_i64..=400 {
            let expiry = as_of + chrono::Duration::days(offset);
            let expected = if offset <= -2 {
                Urgency::Expired
            } else if offset == -1 {
                Urgency::DueYesterday
            } else if offset == 0 {
                Urgency::DueToday
            } else if offset <= 3 {
                Urgency::DueSoon
            } else {
                Urgency::NotDue
            };
            assert_eq!(classify_urgency(expiry, as_of), expected, "offset {offset}");
        }
    }

    #[test]
    fn thirty_day_plan_walkthrough() {
        let expiry = crate::membership::compute_expiry(date(2024, 1, 1), 30);
        assert_eq!(expiry, date(2024, 1, 31));

        assert_eq!(classify_urgency(expiry, date(2024, 1, 30)), Urgency::DueSoon);
        assert_eq!(classify_urgency(expiry, date(2024, 1, 31)), Urgency::DueToday);
        assert_eq!(
            classify_urgency(expiry, date(2024, 2, 1)),
            Urgency::DueYesterday
        );
        assert_eq!(classify_urgency(expiry, date(2024, 2, 5)), Urgency::Expired);
    }

    #[test]
    fn selection_skips_far_and_stale() {
        let as_of = date(2024, 5, 15);
        let members = vec![
            member(1, date(2024, 5, 13)), // expired two days ago
            member(2, date(2024, 5, 14)), // yesterday
            member(3, date(2024, 6, 30)), // far
            member(4, date(2024, 5, 15)), // today
            member(5, date(2024, 5, 18)), // edge of window
            member(6, date(2024, 5, 19)), // just outside
        ];

        let ids: Vec<i64> = select_members_needing_attention(&members, as_of)
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![2, 4, 5]);
    }

    #[test]
    fn selection_of_empty_list_is_empty() {
        assert!(select_members_needing_attention(&[], date(2024, 1, 1)).is_empty());
    }
}
