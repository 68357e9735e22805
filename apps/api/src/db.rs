use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS jobs (
        id          UUID PRIMARY KEY,
        title       TEXT NOT NULL,
        description TEXT NOT NULL,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS applicants (
        id               UUID PRIMARY KEY,
        job_id           UUID NOT NULL REFERENCES jobs(id),
        name             TEXT NOT NULL,
        document_key     TEXT NOT NULL UNIQUE,
        match_score      DOUBLE PRECISION NOT NULL,
        missing_keywords TEXT[] NOT NULL DEFAULT '{}',
        ats_status       TEXT NOT NULL,
        resume_quality   TEXT NOT NULL,
        created_at       TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS applicants_job_score_idx ON applicants (job_id, match_score DESC)",
];

/// Creates the jobs and applicants tables if they do not exist yet.
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Database schema ready");
    Ok(())
}
