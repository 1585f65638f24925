use std::fmt::Write as _;

use anyhow::{Context, Result};
use rusqlite::{params, Row};

use crate::{
    db::{
        helpers::{format_timestamp, parse_timestamp},
        Database,
    },
    error::PipelineError,
    models::{PredictionRecord, SensorReadings},
};

/// Log columns in schema order; the CSV header uses exactly these names.
pub const LOG_COLUMNS: [&str; 12] = [
    "timestamp",
    "iron_feed",
    "silica_feed",
    "starch_flow",
    "amina_flow",
    "ore_pulp_flow",
    "ore_pulp_ph",
    "ore_pulp_density",
    "iron_concentrate",
    "prediction",
    "bias",
    "final_result",
];

fn row_to_record(row: &Row) -> Result<PredictionRecord> {
    let timestamp: String = row.get("timestamp")?;

    Ok(PredictionRecord {
        timestamp: parse_timestamp(&timestamp)?,
        readings: SensorReadings {
            iron_feed: row.get("iron_feed")?,
            silica_feed: row.get("silica_feed")?,
            starch_flow: row.get("starch_flow")?,
            amina_flow: row.get("amina_flow")?,
            ore_pulp_flow: row.get("ore_pulp_flow")?,
            ore_pulp_ph: row.get("ore_pulp_ph")?,
            ore_pulp_density: row.get("ore_pulp_density")?,
            iron_concentrate: row.get("iron_concentrate")?,
        },
        raw_prediction: row.get("prediction")?,
        bias: row.get("bias")?,
        final_result: row.get("final_result")?,
    })
}

impl Database {
    /// Appends one prediction event. The single-row insert commits atomically;
    /// on failure nothing is written and the caller decides how to degrade.
    pub async fn append_prediction(&self, record: &PredictionRecord) -> Result<(), PipelineError> {
        let record = *record;
        self.execute(move |conn| {
            let r = record.readings;
            conn.execute(
                "INSERT INTO predictions (timestamp, iron_feed, silica_feed, starch_flow, amina_flow,
                                          ore_pulp_flow, ore_pulp_ph, ore_pulp_density, iron_concentrate,
                                          prediction, bias, final_result)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    format_timestamp(&record.timestamp),
                    r.iron_feed,
                    r.silica_feed,
                    r.starch_flow,
                    r.amina_flow,
                    r.ore_pulp_flow,
                    r.ore_pulp_ph,
                    r.ore_pulp_density,
                    r.iron_concentrate,
                    record.raw_prediction,
                    record.bias,
                    record.final_result,
                ],
            )
            .context("failed to insert prediction")?;
            Ok(())
        })
        .await
        .map_err(|err| PipelineError::StorageWrite(format!("{err:#}")))
    }

    /// Full history in insertion order for the trend view. Zero rows is a
    /// valid result (no history yet); a missing table or unreadable store
    /// surfaces as [`PipelineError::StorageRead`].
    pub async fn list_predictions(&self) -> Result<Vec<PredictionRecord>, PipelineError> {
        self.execute(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT timestamp, iron_feed, silica_feed, starch_flow, amina_flow,
                            ore_pulp_flow, ore_pulp_ph, ore_pulp_density, iron_concentrate,
                            prediction, bias, final_result
                     FROM predictions
                     ORDER BY rowid",
                )
                .context("failed to prepare prediction query")?;

            let mut rows = stmt.query([]).context("failed to query predictions")?;
            let mut records = Vec::new();
            while let Some(row) = rows.next().context("failed to step prediction rows")? {
                records.push(row_to_record(row)?);
            }
            Ok(records)
        })
        .await
        .map_err(|err| PipelineError::StorageRead(format!("{err:#}")))
    }

    /// The full log rendered as CSV with a header row in schema column order.
    pub async fn export_csv(&self) -> Result<String, PipelineError> {
        let records = self.list_predictions().await?;

        let mut out = LOG_COLUMNS.join(",");
        out.push('\n');
        for record in records {
            let r = record.readings;
            let _ = writeln!(
                out,
                "{},{},{},{},{},{},{},{},{},{},{},{}",
                format_timestamp(&record.timestamp),
                r.iron_feed,
                r.silica_feed,
                r.starch_flow,
                r.amina_flow,
                r.ore_pulp_flow,
                r.ore_pulp_ph,
                r.ore_pulp_density,
                r.iron_concentrate,
                record.raw_prediction,
                record.bias,
                record.final_result,
            );
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_database(dir: &tempfile::TempDir) -> Database {
        Database::new(dir.path().join("monitoring.db")).unwrap()
    }

    fn sample_record(raw: f64, bias: f64) -> PredictionRecord {
        PredictionRecord::new(SensorReadings::default(), raw, bias, raw + bias)
    }

    #[tokio::test]
    async fn appended_rows_read_back_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_database(&dir);

        let records = [
            sample_record(2.3, 0.0),
            sample_record(1.8, 0.2),
            sample_record(4.1, -0.1),
        ];
        for record in &records {
            db.append_prediction(record).await.unwrap();
        }

        let history = db.list_predictions().await.unwrap();
        assert_eq!(history.len(), 3);
        for (stored, original) in history.iter().zip(&records) {
            assert_eq!(stored, original);
        }
    }

    #[tokio::test]
    async fn empty_log_is_success_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_database(&dir);

        let history = db.list_predictions().await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn missing_table_surfaces_as_storage_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_database(&dir);

        db.execute(|conn| {
            conn.execute("DROP TABLE predictions", [])
                .context("drop failed")?;
            Ok(())
        })
        .await
        .unwrap();

        let err = db.list_predictions().await.unwrap_err();
        assert!(matches!(err, PipelineError::StorageRead(_)));
    }

    #[tokio::test]
    async fn csv_export_has_schema_header_and_one_line_per_row() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_database(&dir);

        db.append_prediction(&sample_record(2.3, 0.2)).await.unwrap();

        let csv = db.export_csv().await.unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "timestamp,iron_feed,silica_feed,starch_flow,amina_flow,ore_pulp_flow,\
             ore_pulp_ph,ore_pulp_density,iron_concentrate,prediction,bias,final_result"
        );
        let row = lines.next().unwrap();
        assert!(row.ends_with(",2.3,0.2,2.5"));
        assert!(lines.next().is_none());
    }
}
