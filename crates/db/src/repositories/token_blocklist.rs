//! Revoked access token storage.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    sea_query::OnConflict,
};
use uuid::Uuid;

use crate::entities::token_blocklist;

/// Repository for the access token blocklist.
#[derive(Debug, Clone)]
pub struct TokenBlocklistRepository {
    db: Arc<DatabaseConnection>,
}

impl TokenBlocklistRepository {
    /// Creates a new blocklist repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Revokes a token by its `jti`. Revoking twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn revoke(
        &self,
        jti: Uuid,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        let entry = token_blocklist::ActiveModel {
            id: Set(Uuid::new_v4()),
            jti: Set(jti),
            user_id: Set(user_id),
            expires_at: Set(expires_at.into()),
            revoked_at: Set(Utc::now().into()),
        };

        token_blocklist::Entity::insert(entry)
            .on_conflict(
                OnConflict::column(token_blocklist::Column::Jti)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;

        tracing::debug!(%jti, %user_id, "Token revoked");
        Ok(())
    }

    /// Returns true if the token has been revoked.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn is_revoked(&self, jti: Uuid) -> Result<bool, DbErr> {
        let entry = token_blocklist::Entity::find()
            .filter(token_blocklist::Column::Jti.eq(jti))
            .one(self.db.as_ref())
            .await?;

        Ok(entry.is_some())
    }

    /// Deletes entries for tokens that have expired anyway.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn purge_expired(&self) -> Result<u64, DbErr> {
        let result = token_blocklist::Entity::delete_many()
            .filter(token_blocklist::Column::ExpiresAt.lt(Utc::now()))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
#[path = "token_blocklist_tests.rs"]
mod tests;
