use async_trait::async_trait;

use common::database::DbPool;

use crate::core::{Job, JobError};

pub const SECTIONS: [(&str, &str); 5] = [("6", "A"), ("7", "A"), ("7", "B"), ("8", "A"), ("8", "B")];

pub const TEACHERS: [(&str, &str); 4] = [
    ("Mr. Rahman", "Mathematics"),
    ("Ms. Ayesha", "English"),
    ("Mr. Kabir", "Science"),
    ("Mrs. Sultana", "Bangla"),
];

pub const STAFF: [(&str, &str); 3] = [
    ("Anwar", "Security"),
    ("Rina", "Cleaning"),
    ("Masud", "Office Assistant"),
];

/// Fills an empty directory with the starter sections, teachers and staff.
/// Existing rows are left alone, so running it twice changes nothing.
pub struct SeedJob;

impl SeedJob {
    pub fn new() -> Self {
        Self
    }

    pub async fn is_needed(pool: &DbPool) -> Result<bool, JobError> {
        let client = pool
            .get()
            .await
            .map_err(|e| JobError::Database(e.to_string()))?;
        let row = client
            .query_one("SELECT COUNT(*) FROM class_sections", &[])
            .await?;
        Ok(row.get::<_, i64>(0) == 0)
    }
}

#[async_trait]
impl Job for SeedJob {
    async fn execute(&self, pool: &DbPool) -> Result<(), JobError> {
        let mut client = pool
            .get()
            .await
            .map_err(|e| JobError::Database(e.to_string()))?;
        let transaction = client.transaction().await?;

        let mut inserted = 0u64;
        for (class_name, section_name) in SECTIONS {
            inserted += transaction
                .execute(
                    "INSERT INTO class_sections (class_name, section_name) VALUES ($1, $2)
                     ON CONFLICT DO NOTHING",
                    &[&class_name, &section_name],
                )
                .await?;
        }
        for (name, subject) in TEACHERS {
            inserted += transaction
                .execute(
                    "INSERT INTO teachers (name, subject) VALUES ($1, $2) ON CONFLICT DO NOTHING",
                    &[&name, &subject],
                )
                .await?;
        }
        for (name, role) in STAFF {
            inserted += transaction
                .execute(
                    "INSERT INTO staff (name, role) VALUES ($1, $2) ON CONFLICT DO NOTHING",
                    &[&name, &role],
                )
                .await?;
        }

        transaction.commit().await?;
        tracing::info!(inserted, "Directory seeded");
        Ok(())
    }

    fn name(&self) -> &str {
        "seed"
    }
}
