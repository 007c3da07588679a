use sea_orm::{ConnectionTrait, DbErr};

/// Apply the schema for the connected backend. Statements are idempotent,
/// so running this on every boot is safe.
pub async fn migrate<C: ConnectionTrait>(conn: &C) -> Result<(), DbErr> {
    let schema = match conn.get_database_backend() {
        sea_orm::DatabaseBackend::Postgres => include_str!("migration/postgres.sql"),
        sea_orm::DatabaseBackend::Sqlite => include_str!("migration/sqlite.sql"),
        #[allow(clippy::unimplemented)]
        sea_orm::DatabaseBackend::MySql => unimplemented!(),
    };

    conn.execute_unprepared(schema).await?;
    Ok(())
}
