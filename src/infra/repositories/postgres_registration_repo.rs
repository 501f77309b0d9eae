use crate::domain::{
    models::registration::{EventRegistrationRow, Registration, UserRegistrationRow},
    ports::RegistrationRepository,
};
use crate::error::{map_unique_violation, AppError};
use async_trait::async_trait;
use sqlx::{PgPool, Row};

pub struct PostgresRegistrationRepo {
    pool: PgPool,
}

impl PostgresRegistrationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepo {
    async fn create(&self, registration: &Registration) -> Result<Registration, AppError> {
        sqlx::query_as::<_, Registration>(
            r#"INSERT INTO registrations (
                id, user_id, event_id, name, mobile, attendance_status, registered_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *"#,
        )
            .bind(&registration.id)
            .bind(&registration.user_id)
            .bind(&registration.event_id)
            .bind(&registration.name)
            .bind(&registration.mobile)
            .bind(&registration.attendance_status)
            .bind(registration.registered_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, AppError::DuplicateRegistration))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Registration>, AppError> {
        sqlx::query_as::<_, Registration>("SELECT * FROM registrations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_active(&self, user_id: &str, event_id: &str) -> Result<Option<Registration>, AppError> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE user_id = $1 AND event_id = $2 AND attendance_status != 'cancelled'",
        )
            .bind(user_id)
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn cancel(&self, id: &str) -> Result<bool, AppError> {
        // Only a non-cancelled row transitions; rows_affected tells the
        // caller whether this call owns the matching counter decrement.
        let result = sqlx::query(
            "UPDATE registrations SET attendance_status = 'cancelled' WHERE id = $1 AND attendance_status != 'cancelled'",
        )
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(())
    }

    async fn set_attendance(&self, id: &str, status: &str) -> Result<Option<Registration>, AppError> {
        sqlx::query_as::<_, Registration>(
            "UPDATE registrations SET attendance_status = $1 WHERE id = $2 RETURNING *",
        )
            .bind(status)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_active(&self, event_id: &str) -> Result<i64, AppError> {
        let result = sqlx::query(
            "SELECT COUNT(*) as count FROM registrations WHERE event_id = $1 AND attendance_status != 'cancelled'",
        )
            .bind(event_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.get::<i64, _>("count"))
    }

    async fn active_event_ids(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        let rows = sqlx::query(
            "SELECT event_id FROM registrations WHERE user_id = $1 AND attendance_status != 'cancelled'",
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(rows.into_iter().map(|r| r.get::<String, _>("event_id")).collect())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<UserRegistrationRow>, AppError> {
        sqlx::query_as::<_, UserRegistrationRow>(
            r#"SELECT r.id, r.event_id, r.attendance_status, r.registered_at,
                      e.title AS event_title, e.date AS event_date, e.time AS event_time, e.venue AS event_venue
               FROM registrations r
               JOIN events e ON e.id = r.event_id
               WHERE r.user_id = $1
               ORDER BY r.registered_at DESC"#,
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<EventRegistrationRow>, AppError> {
        sqlx::query_as::<_, EventRegistrationRow>(
            r#"SELECT r.id, r.user_id, r.name, r.mobile, r.attendance_status, r.registered_at,
                      u.name AS user_name, u.email AS user_email
               FROM registrations r
               JOIN users u ON u.id = r.user_id
               WHERE r.event_id = $1
               ORDER BY r.registered_at ASC"#,
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
