use chrono::NaiveDate;
use sqlx::MySqlPool;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};

/// Attendance of one employee between `from` and `to`, oldest first.
pub async fn for_range(
    pool: &MySqlPool,
    employee_id: u64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT DATE_FORMAT(date, '%Y-%m-%d') AS date, status, note
        FROM attendance
        WHERE employee_id = ?
        AND date BETWEEN ? AND ?
        ORDER BY date, id
        "#,
    )
    .bind(employee_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}

/// Opens today's record. Fails with a duplicate-key error on a second punch.
pub async fn check_in(pool: &MySqlPool, employee_id: u64) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO attendance (employee_id, date, status, check_in)
        VALUES (?, CURDATE(), ?, CURTIME())
        "#,
    )
    .bind(employee_id)
    .bind(AttendanceStatus::Present.as_ref())
    .execute(pool)
    .await?;
    Ok(())
}

/// Closes today's open record; returns false when there was none.
pub async fn check_out(pool: &MySqlPool, employee_id: u64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE attendance
        SET check_out = CURTIME()
        WHERE employee_id = ?
        AND date = CURDATE()
        AND check_out IS NULL
        "#,
    )
    .bind(employee_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Sets the status and note of one day, creating the record if needed.
pub async fn mark(
    pool: &MySqlPool,
    employee_id: u64,
    date: NaiveDate,
    status: AttendanceStatus,
    note: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO attendance (employee_id, date, status, note)
        VALUES (?, ?, ?, ?)
        ON DUPLICATE KEY UPDATE status = VALUES(status), note = VALUES(note)
        "#,
    )
    .bind(employee_id)
    .bind(date)
    .bind(status.as_ref())
    .bind(note)
    .execute(pool)
    .await?;
    Ok(())
}
