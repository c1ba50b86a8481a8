use portal_core::model::{MemberId, Profile, Role};

use super::SqliteRepository;
use super::mapping::{map_profile_row, ser};
use crate::repository::{MemberRepository, StorageError};

#[async_trait::async_trait]
impl MemberRepository for SqliteRepository {
    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO members (id, email, display_name, photo_url, role, phone_number, hostel_name, date_of_birth, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(id) DO UPDATE SET
                email = excluded.email,
                display_name = excluded.display_name,
                photo_url = excluded.photo_url,
                role = excluded.role,
                phone_number = excluded.phone_number,
                hostel_name = excluded.hostel_name,
                date_of_birth = excluded.date_of_birth
            ",
        )
        .bind(profile.id().as_str())
        .bind(profile.email())
        .bind(profile.display_name())
        .bind(profile.photo_url().map(|u| u.as_str().to_owned()))
        .bind(profile.role().as_str())
        .bind(profile.phone_number())
        .bind(profile.hostel_name())
        .bind(profile.date_of_birth())
        .bind(profile.created_at())
        .execute(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn get_profile(&self, id: &MemberId) -> Result<Option<Profile>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, email, display_name, photo_url, role, phone_number, hostel_name, date_of_birth, created_at
            FROM members WHERE id = ?1
            ",
        )
        .bind(id.as_str())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => map_profile_row(&row).map(Some),
            None => Ok(None),
        }
    }

    async fn list_profiles(&self, limit: u32) -> Result<Vec<Profile>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, email, display_name, photo_url, role, phone_number, hostel_name, date_of_birth, created_at
            FROM members
            ORDER BY created_at ASC, id ASC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut profiles = Vec::with_capacity(rows.len());
        for row in rows {
            profiles.push(map_profile_row(&row)?);
        }
        Ok(profiles)
    }

    async fn set_role(&self, id: &MemberId, role: Role) -> Result<(), StorageError> {
        let res = sqlx::query("UPDATE members SET role = ?1 WHERE id = ?2")
            .bind(role.as_str())
            .bind(id.as_str())
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn count_profiles(&self) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        u64::try_from(count).map_err(ser)
    }
}
