use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

use crate::store::Collection;

/// Secondary indexes: `(name, table, expression)`. Date bounds are compared
/// as text under the "C" collation, so that index carries it too.
pub(crate) const INDEXES: &[(&str, Collection, &str)] = &[
    ("idx_students_group_id", Collection::Students, "(doc ->> 'group_id')"),
    ("idx_schedules_group_id", Collection::Schedules, "(doc ->> 'group_id')"),
    ("idx_schedules_teacher_id", Collection::Schedules, "(doc ->> 'teacher_id')"),
    ("idx_lessons_group_id", Collection::Lessons, "(doc ->> 'group_id')"),
    ("idx_lessons_teacher_id", Collection::Lessons, "(doc ->> 'teacher_id')"),
    ("idx_lessons_subject_id", Collection::Lessons, "(doc ->> 'subject_id')"),
    (
        "idx_lessons_date_c",
        Collection::Lessons,
        "(doc ->> 'date') COLLATE \"C\"",
    ),
    (
        "idx_lessons_times",
        Collection::Lessons,
        "(doc ->> 'start_time'), (doc ->> 'end_time')",
    ),
];

/// Natural keys that must stay unique.
const UNIQUE_INDEXES: &[(&str, Collection, &str)] = &[
    ("uq_students_iin", Collection::Students, "(doc ->> 'iin')"),
    ("uq_teachers_iin", Collection::Teachers, "(doc ->> 'iin')"),
    ("uq_subjects_code", Collection::Subjects, "(doc ->> 'code')"),
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    for collection in Collection::ALL {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {collection} (
                id UUID PRIMARY KEY,
                seq BIGSERIAL NOT NULL,
                doc JSONB NOT NULL
            );
            "#
        ))
        .execute(pool)
        .await?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{collection}_seq ON {collection} (seq);"
        ))
        .execute(pool)
        .await?;
    }

    for (name, collection, expression) in INDEXES {
        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS {name} ON {collection} ({expression});"
        ))
        .execute(pool)
        .await?;
    }

    for (name, collection, expression) in UNIQUE_INDEXES {
        sqlx::query(&format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS {name} ON {collection} ({expression});"
        ))
        .execute(pool)
        .await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
