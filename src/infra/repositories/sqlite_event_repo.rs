use crate::domain::{models::event::Event, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

pub struct SqliteEventRepo {
    pool: SqlitePool,
}

impl SqliteEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, title, description, date, time, venue, max_participants, registered_count, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&event.id).bind(&event.title).bind(&event.description).bind(event.date)
            .bind(&event.time).bind(&event.venue).bind(event.max_participants)
            .bind(event.registered_count).bind(event.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY date ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET title=?, description=?, date=?, time=?, venue=?, max_participants=?
             WHERE id=?
             RETURNING *"
        )
            .bind(&event.title).bind(&event.description).bind(event.date).bind(&event.time)
            .bind(&event.venue).bind(event.max_participants).bind(&event.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let active = sqlx::query("SELECT COUNT(*) as count FROM registrations WHERE event_id = ? AND attendance_status != 'cancelled'")
            .bind(id).fetch_one(&mut *tx).await.map_err(AppError::Database)?
            .get::<i64, _>("count");
        if active > 0 {
            return Err(AppError::Conflict("Event has active registrations".into()));
        }
        sqlx::query("DELETE FROM registrations WHERE event_id = ?").bind(id).execute(&mut *tx).await.map_err(AppError::Database)?;
        let result = sqlx::query("DELETE FROM events WHERE id = ?").bind(id).execute(&mut *tx).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }
        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn reserve_slot(&self, id: &str) -> Result<bool, AppError> {
        // Conditional increment; concurrent writers race on the WHERE clause
        // instead of on a value read earlier by the service.
        let result = sqlx::query(
            "UPDATE events SET registered_count = registered_count + 1
             WHERE id = ? AND registered_count < max_participants"
        )
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }

    async fn release_slot(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE events SET registered_count = MAX(registered_count - 1, 0) WHERE id = ?")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
}
