use chrono::NaiveDate;
use sqlx::MySqlPool;

use crate::model::leave_request::{LeaveRequest, LeaveStatus};

const SELECT_LEAVE: &str = r#"
    SELECT
        id,
        employee_id,
        DATE_FORMAT(start_date, '%Y-%m-%d') AS from_date,
        DATE_FORMAT(end_date, '%Y-%m-%d') AS to_date,
        leave_type,
        status,
        reason
    FROM leave_requests
"#;

/// Leaves of one employee whose span touches `from..=to`.
pub async fn overlapping(
    pool: &MySqlPool,
    employee_id: u64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<LeaveRequest>, sqlx::Error> {
    let sql = format!(
        "{SELECT_LEAVE} WHERE employee_id = ? AND start_date <= ? AND end_date >= ? ORDER BY start_date, id"
    );
    sqlx::query_as::<_, LeaveRequest>(&sql)
        .bind(employee_id)
        .bind(to)
        .bind(from)
        .fetch_all(pool)
        .await
}

pub async fn insert(
    pool: &MySqlPool,
    employee_id: u64,
    from: NaiveDate,
    to: NaiveDate,
    leave_type: &str,
    reason: Option<&str>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO leave_requests
            (employee_id, start_date, end_date, leave_type, status, reason)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(employee_id)
    .bind(from)
    .bind(to)
    .bind(leave_type)
    .bind(LeaveStatus::Pending.as_ref())
    .bind(reason)
    .execute(pool)
    .await?;

    Ok(result.last_insert_id())
}

pub async fn by_id(pool: &MySqlPool, leave_id: u64) -> Result<Option<LeaveRequest>, sqlx::Error> {
    let sql = format!("{SELECT_LEAVE} WHERE id = ?");
    sqlx::query_as::<_, LeaveRequest>(&sql)
        .bind(leave_id)
        .fetch_optional(pool)
        .await
}

pub async fn for_employee(
    pool: &MySqlPool,
    employee_id: u64,
) -> Result<Vec<LeaveRequest>, sqlx::Error> {
    let sql = format!("{SELECT_LEAVE} WHERE employee_id = ? ORDER BY start_date DESC, id DESC");
    sqlx::query_as::<_, LeaveRequest>(&sql)
        .bind(employee_id)
        .fetch_all(pool)
        .await
}

/// Filtered, paginated listing for HR. Returns the page and the total count.
pub async fn list(
    pool: &MySqlPool,
    employee_id: Option<u64>,
    status: Option<LeaveStatus>,
    limit: u64,
    offset: u64,
) -> Result<(Vec<LeaveRequest>, i64), sqlx::Error> {
    let mut where_sql = String::from(" WHERE 1=1");
    if employee_id.is_some() {
        where_sql.push_str(" AND employee_id = ?");
    }
    if status.is_some() {
        where_sql.push_str(" AND status = ?");
    }

    let count_sql = format!("SELECT COUNT(*) FROM leave_requests{where_sql}");
    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    if let Some(id) = employee_id {
        count_q = count_q.bind(id);
    }
    if let Some(s) = status {
        count_q = count_q.bind(s.to_string());
    }
    let total = count_q.fetch_one(pool).await?;

    let data_sql = format!("{SELECT_LEAVE}{where_sql} ORDER BY start_date DESC, id DESC LIMIT ? OFFSET ?");
    let mut data_q = sqlx::query_as::<_, LeaveRequest>(&data_sql);
    if let Some(id) = employee_id {
        data_q = data_q.bind(id);
    }
    if let Some(s) = status {
        data_q = data_q.bind(s.to_string());
    }
    let leaves = data_q.bind(limit).bind(offset).fetch_all(pool).await?;

    Ok((leaves, total))
}

/// Moves a pending leave to `decision`. False when the leave does not exist
/// or was already decided.
pub async fn decide(
    pool: &MySqlPool,
    leave_id: u64,
    decision: LeaveStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE leave_requests
        SET status = ?
        WHERE id = ?
        AND status = ?
        "#,
    )
    .bind(decision.as_ref())
    .bind(leave_id)
    .bind(LeaveStatus::Pending.as_ref())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
