//! Token blocklist migration.
//!
//! Stores the `jti` of access tokens revoked by logout or account deletion.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(TOKEN_BLOCKLIST_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS token_blocklist CASCADE;")
            .await?;
        Ok(())
    }
}

// user_id is not a foreign key: entries must outlive a deleted account
// until the token itself expires.
const TOKEN_BLOCKLIST_SQL: &str = r"
CREATE TABLE token_blocklist (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    jti UUID NOT NULL UNIQUE,
    user_id UUID NOT NULL,
    expires_at TIMESTAMPTZ NOT NULL,
    revoked_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Index for purging expired entries
CREATE INDEX idx_token_blocklist_expires ON token_blocklist(expires_at);
";
