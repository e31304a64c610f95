//! Member Repository (SQLite)

use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{Gender, Member, MemberUpdate, NewMember};
use sqlx::SqlitePool;

use super::{MemberRepository, RepoError, RepoResult};

/// Snowflake ids carry 12 random bits per millisecond, so same-millisecond
/// inserts can collide
const MAX_ID_ATTEMPTS: usize = 8;

const MEMBER_SELECT: &str = "SELECT id, name, mobile, gender, plan_type, amount_paid, due_amount, join_date, expiry_date, created_at, updated_at FROM member";

/// Raw column values; money and dates are stored as text
#[derive(sqlx::FromRow)]
struct MemberRow {
    id: i64,
    name: String,
    mobile: String,
    gender: String,
    plan_type: String,
    amount_paid: String,
    due_amount: String,
    join_date: String,
    expiry_date: String,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<MemberRow> for Member {
    type Error = RepoError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupted = |column: &str, value: &str| {
            RepoError::Corrupted(format!("member {id}: bad {column} '{value}'"))
        };
        let decimal = |column: &str, value: &str| {
            Decimal::from_str(value).map_err(|_| corrupted(column, value))
        };
        let date = |column: &str, value: &str| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| corrupted(column, value))
        };

        Ok(Member {
            gender: Gender::from_str(&row.gender).map_err(|_| corrupted("gender", &row.gender))?,
            amount_paid: decimal("amount_paid", &row.amount_paid)?,
            due_amount: decimal("due_amount", &row.due_amount)?,
            join_date: date("join_date", &row.join_date)?,
            expiry_date: date("expiry_date", &row.expiry_date)?,
            id: row.id,
            name: row.name,
            mobile: row.mobile,
            plan_type: row.plan_type,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn not_found(id: i64) -> RepoError {
    RepoError::NotFound(format!("Member {id} not found"))
}

/// sqlx-backed [`MemberRepository`]
#[derive(Clone)]
pub struct SqliteMemberRepository {
    pool: SqlitePool,
}

impl SqliteMemberRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert under the first id from `next_id` that is not taken yet
    async fn insert_with_fresh_id(
        &self,
        data: &NewMember,
        mut next_id: impl FnMut() -> i64,
    ) -> RepoResult<i64> {
        let now = shared::util::now_millis();
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = next_id();
            let result = sqlx::query(
                "INSERT INTO member (id, name, mobile, gender, plan_type, amount_paid, due_amount, join_date, expiry_date, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
            )
            .bind(id)
            .bind(&data.name)
            .bind(&data.mobile)
            .bind(data.gender.as_str())
            .bind(&data.plan_type)
            .bind(data.amount_paid.to_string())
            .bind(data.due_amount.to_string())
            .bind(data.join_date)
            .bind(data.expiry_date)
            .bind(now)
            .execute(&self.pool)
            .await;

            match result {
                Ok(_) => return Ok(id),
                Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                    tracing::debug!(id, "Member id already taken, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(RepoError::Database(format!(
            "No free member id after {MAX_ID_ATTEMPTS} attempts"
        )))
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepository {
    async fn find_all(&self) -> RepoResult<Vec<Member>> {
        let sql = format!("{MEMBER_SELECT} ORDER BY created_at DESC, id DESC");
        let rows = sqlx::query_as::<_, MemberRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Member::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Member>> {
        let sql = format!("{MEMBER_SELECT} WHERE id = ?");
        let row = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Member::try_from).transpose()
    }

    async fn create(&self, data: NewMember) -> RepoResult<Member> {
        let id = self
            .insert_with_fresh_id(&data, shared::util::snowflake_id)
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create member".into()))
    }

    async fn update(&self, id: i64, data: MemberUpdate) -> RepoResult<Member> {
        let now = shared::util::now_millis();
        let rows = sqlx::query(
            "UPDATE member SET name = COALESCE(?1, name), mobile = COALESCE(?2, mobile), gender = COALESCE(?3, gender), plan_type = COALESCE(?4, plan_type), amount_paid = COALESCE(?5, amount_paid), due_amount = COALESCE(?6, due_amount), join_date = COALESCE(?7, join_date), expiry_date = COALESCE(?8, expiry_date), updated_at = ?9 WHERE id = ?10",
        )
        .bind(data.name)
        .bind(data.mobile)
        .bind(data.gender.map(|g| g.as_str()))
        .bind(data.plan_type)
        .bind(data.amount_paid.map(|d| d.to_string()))
        .bind(data.due_amount.map(|d| d.to_string()))
        .bind(data.join_date)
        .bind(data.expiry_date)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;
        if rows.rows_affected() == 0 {
            return Err(not_found(id));
        }

        self.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let rows = sqlx::query("DELETE FROM member WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if rows.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
