use async_trait::async_trait;
use chrono::Utc;

use common::{
    database::{
        DbPool,
        queries::{load_approved_notes, load_directory},
    },
    tally::materialize_winners,
};

use crate::core::{Job, JobError};

/// Recomputes the top three of every category for every period and replaces
/// the `winners` table with the result in a single transaction.
pub struct CrownJob;

impl CrownJob {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Job for CrownJob {
    async fn execute(&self, pool: &DbPool) -> Result<(), JobError> {
        let mut client = pool
            .get()
            .await
            .map_err(|e| JobError::Database(e.to_string()))?;

        let notes = load_approved_notes(&client).await?;
        let directory = load_directory(&client).await?;
        let winners = materialize_winners(&notes, &directory, Utc::now());

        let transaction = client.transaction().await?;
        let cleared = transaction.execute("DELETE FROM winners", &[]).await?;

        let insert = transaction
            .prepare(
                "INSERT INTO winners (period_type, category, period_label, rank, title, description, points)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .await?;
        for winner in &winners {
            transaction
                .execute(
                    &insert,
                    &[
                        &winner.period_type.as_str(),
                        &winner.category.as_str(),
                        &winner.period_label,
                        &winner.rank,
                        &winner.title,
                        &winner.description,
                        &winner.points,
                    ],
                )
                .await?;
        }
        transaction.commit().await?;

        tracing::info!(
            notes = notes.len(),
            cleared,
            crowned = winners.len(),
            "Winners refreshed"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "crown"
    }
}
