//! DuckDB claim storage.

use std::path::Path;

use arrow::array::{Array, ArrayRef, Date32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use duckdb::{Connection, params};
use tracing::info;
use warranty_core::Claim;

use crate::{ClaimSource, StoreError};

const CLAIMS_DDL: &str = "CREATE TABLE IF NOT EXISTS claims (
    id BIGINT PRIMARY KEY,
    vin VARCHAR NOT NULL,
    retail_date DATE NOT NULL,
    ro_open_date DATE NOT NULL,
    ro_close_date DATE NOT NULL
)";

const CLAIM_COLUMNS: &str = "id::BIGINT AS id, \
    vin::VARCHAR AS vin, \
    retail_date::DATE AS retail_date, \
    ro_open_date::DATE AS ro_open_date, \
    ro_close_date::DATE AS ro_close_date";

/// DuckDB store holding the `claims` table.
///
/// Supports both in-memory (ephemeral) and persistent (file-backed) modes.
/// Use [`open`](Self::open) for in-memory and [`open_persistent`](Self::open_persistent)
/// for file-backed storage that survives across process restarts. Either way
/// the `claims` table exists once the store is open.
pub struct DuckStore {
    conn: Connection,
}

impl DuckStore {
    /// Open an in-memory DuckDB database.
    pub fn open() -> Result<Self, StoreError> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Open or create a persistent DuckDB database at the given path.
    pub fn open_persistent(path: &Path) -> Result<Self, StoreError> {
        let store = Self {
            conn: Connection::open(path)?,
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Create the `claims` table if it does not exist yet.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(CLAIMS_DDL)?;
        Ok(())
    }

    /// Whether any claims have been loaded.
    pub fn has_claims(&self) -> Result<bool, StoreError> {
        Ok(self.claims_count()? > 0)
    }

    /// Insert or replace a single claim, keyed by id.
    pub fn insert_claim(&self, claim: &Claim) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO claims VALUES (?, ?, CAST(? AS DATE), CAST(? AS DATE), CAST(? AS DATE))",
            params![
                claim.id,
                claim.vin.as_str(),
                claim.retail_date.to_string(),
                claim.ro_open_date.to_string(),
                claim.ro_close_date.to_string(),
            ],
        )?;
        Ok(())
    }

    pub fn insert_claims(&self, claims: &[Claim]) -> Result<(), StoreError> {
        for claim in claims {
            self.insert_claim(claim)?;
        }
        info!(count = claims.len(), "inserted claims");
        Ok(())
    }

    /// Load a claims export (`.csv` or `.parquet`) into the `claims` table.
    ///
    /// The file needs the columns `id, vin, retail_date, ro_open_date,
    /// ro_close_date`; rows with an existing id replace the stored row.
    /// Returns the number of rows read from the file.
    pub fn load_claims(&self, path: &Path) -> Result<usize, StoreError> {
        if !path.exists() {
            return Err(StoreError::FileNotFound(path.to_path_buf()));
        }
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let reader = match extension.as_deref() {
            Some("csv") => "read_csv_auto",
            Some("parquet") => "read_parquet",
            _ => return Err(StoreError::UnsupportedFormat(path.to_path_buf())),
        };
        let quoted = path.display().to_string().replace('\'', "''");
        let sql = format!("INSERT OR REPLACE INTO claims SELECT {CLAIM_COLUMNS} FROM {reader}('{quoted}')");
        let rows = self.conn.execute(&sql, [])?;
        let count = self.claims_count()?;
        info!(path = %path.display(), rows, count, "loaded claims");
        Ok(rows)
    }

    /// Number of rows in the `claims` table.
    pub fn claims_count(&self) -> Result<usize, StoreError> {
        let batches = self.query_arrow("SELECT count(*)::BIGINT AS cnt FROM claims")?;
        let batch = batches.first().ok_or(StoreError::NoResults)?;
        let col = batch
            .column(0)
            .as_any()
            .downcast_ref::<Int64Array>()
            .ok_or_else(|| StoreError::Other("count column not i64".into()))?;
        Ok(col.value(0) as usize)
    }

    // ── Escape hatch ──

    /// Execute arbitrary SQL and return Arrow RecordBatches.
    pub fn query_arrow(&self, sql: &str) -> Result<Vec<RecordBatch>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let batches: Vec<RecordBatch> = stmt.query_arrow([])?.collect();
        Ok(batches)
    }
}

impl ClaimSource for DuckStore {
    fn claims_by_vin(&self, vin: &str) -> Result<Vec<Claim>, StoreError> {
        let sql = format!(
            "SELECT {CLAIM_COLUMNS} FROM claims WHERE lower(vin) = lower(?) ORDER BY id DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let batches: Vec<RecordBatch> = stmt.query_arrow(params![vin.trim()])?.collect();
        claims_from_batches(&batches)
    }

    fn retail_date(&self, vin: &str) -> Result<Option<NaiveDate>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT min(retail_date)::DATE AS retail_date FROM claims WHERE lower(vin) = lower(?)",
        )?;
        let batches: Vec<RecordBatch> = stmt.query_arrow(params![vin.trim()])?.collect();
        let Some(batch) = batches.iter().find(|b| b.num_rows() > 0) else {
            return Ok(None);
        };
        let col = typed_column(batch, "retail_date", &DataType::Date32)?;
        let dates = as_dates(&col)?;
        if dates.is_null(0) {
            return Ok(None);
        }
        Ok(dates.value_as_date(0))
    }

    fn claims_overlapping(
        &self,
        vin: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Claim>, StoreError> {
        let sql = format!(
            "SELECT {CLAIM_COLUMNS} FROM claims
             WHERE lower(vin) = lower(?)
               AND ro_open_date <= CAST(? AS DATE)
               AND ro_close_date >= CAST(? AS DATE)
             ORDER BY ro_open_date ASC, id ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let batches: Vec<RecordBatch> = stmt
            .query_arrow(params![vin.trim(), to.to_string(), from.to_string()])?
            .collect();
        claims_from_batches(&batches)
    }
}

/// Fetch a column by name, cast to the expected Arrow type.
fn typed_column(
    batch: &RecordBatch,
    name: &str,
    data_type: &DataType,
) -> Result<ArrayRef, StoreError> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| StoreError::Other(format!("missing '{name}' column")))?;
    Ok(arrow::compute::cast(col, data_type)?)
}

fn as_dates(col: &ArrayRef) -> Result<&Date32Array, StoreError> {
    col.as_any()
        .downcast_ref::<Date32Array>()
        .ok_or_else(|| StoreError::Other("date column not date32".into()))
}

fn date_at(dates: &Date32Array, row: usize, name: &str) -> Result<NaiveDate, StoreError> {
    if dates.is_null(row) {
        return Err(StoreError::Other(format!("null {name} at row {row}")));
    }
    dates
        .value_as_date(row)
        .ok_or_else(|| StoreError::Other(format!("{name} out of range at row {row}")))
}

fn claims_from_batches(batches: &[RecordBatch]) -> Result<Vec<Claim>, StoreError> {
    let mut claims = Vec::new();
    for batch in batches {
        if batch.num_rows() == 0 {
            continue;
        }
        let ids = typed_column(batch, "id", &DataType::Int64)?;
        let ids = ids
            .as_any()
            .downcast_ref::<Int64Array>()
            .ok_or_else(|| StoreError::Other("id column not i64".into()))?;
        let vins = typed_column(batch, "vin", &DataType::Utf8)?;
        let vins = vins
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| StoreError::Other("vin column not utf8".into()))?;

        let retail = typed_column(batch, "retail_date", &DataType::Date32)?;
        let open = typed_column(batch, "ro_open_date", &DataType::Date32)?;
        let close = typed_column(batch, "ro_close_date", &DataType::Date32)?;
        let (retail, open, close) = (as_dates(&retail)?, as_dates(&open)?, as_dates(&close)?);

        for row in 0..batch.num_rows() {
            claims.push(Claim {
                id: ids.value(row),
                vin: vins.value(row).to_string(),
                retail_date: date_at(retail, row, "retail_date")?,
                ro_open_date: date_at(open, row, "ro_open_date")?,
                ro_close_date: date_at(close, row, "ro_close_date")?,
            });
        }
    }
    Ok(claims)
}
