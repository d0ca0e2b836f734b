//! Columnar export of sweep results

use arrow::array::{Array, ArrayRef, StringArray, UInt32Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::DataError;
use crate::optimizer::{GridResult, OptimizationReport};

const DECIMAL_COLUMNS: [&str; 5] = [
    "total_profit",
    "trigger_rate",
    "completion_rate",
    "avg_profit_per_trade",
    "max_drawdown",
];

/// Result table schema
pub fn result_schema() -> Schema {
    let mut fields = vec![
        Field::new("run_id", DataType::Utf8, false),
        Field::new("rank", DataType::UInt32, false),
        Field::new("status", DataType::Utf8, false),
        Field::new("reason", DataType::Utf8, true),
        // Decimals as strings to keep exact values
        Field::new("move_threshold", DataType::Utf8, false),
        Field::new("sum_target", DataType::Utf8, false),
        Field::new("window_minutes", DataType::Utf8, false),
        Field::new("rounds", DataType::UInt64, true),
        Field::new("trade_count", DataType::UInt64, true),
        Field::new("wins", DataType::UInt64, true),
        Field::new("losses", DataType::UInt64, true),
    ];
    for name in DECIMAL_COLUMNS {
        fields.push(Field::new(name, DataType::Utf8, true));
    }
    Schema::new(fields)
}

/// One flattened grid point
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub run_id: String,
    /// 1-based position in ranking order
    pub rank: u32,
    pub status: String,
    pub reason: Option<String>,
    pub move_threshold: Decimal,
    pub sum_target: Decimal,
    pub window_minutes: Decimal,
    pub rounds: Option<u64>,
    pub trade_count: Option<u64>,
    pub wins: Option<u64>,
    pub losses: Option<u64>,
    pub total_profit: Option<Decimal>,
    pub trigger_rate: Option<Decimal>,
    pub completion_rate: Option<Decimal>,
    pub avg_profit_per_trade: Option<Decimal>,
    pub max_drawdown: Option<Decimal>,
}

impl ResultRow {
    /// Flatten a grid result at the given rank
    pub fn from_result(run_id: &str, rank: u32, result: &GridResult) -> Self {
        let params = result.params();
        let mut row = Self {
            run_id: run_id.to_string(),
            rank,
            status: String::new(),
            reason: None,
            move_threshold: params.move_threshold,
            sum_target: params.sum_target,
            window_minutes: params.window_minutes,
            rounds: None,
            trade_count: None,
            wins: None,
            losses: None,
            total_profit: None,
            trigger_rate: None,
            completion_rate: None,
            avg_profit_per_trade: None,
            max_drawdown: None,
        };

        match result {
            GridResult::Evaluated(s) => {
                row.status = "evaluated".to_string();
                row.rounds = Some(s.rounds as u64);
                row.trade_count = Some(s.trade_count as u64);
                row.wins = Some(s.wins as u64);
                row.losses = Some(s.losses as u64);
                row.total_profit = Some(s.total_profit);
                row.trigger_rate = Some(s.trigger_rate);
                row.completion_rate = s.completion_rate;
                row.avg_profit_per_trade = s.avg_profit_per_trade;
                row.max_drawdown = Some(s.max_drawdown);
            }
            GridResult::Invalid { reason, .. } => {
                row.status = "invalid".to_string();
                row.reason = Some(reason.clone());
            }
        }
        row
    }

    /// Flatten every result of a report in ranking order
    pub fn from_report(report: &OptimizationReport) -> Vec<Self> {
        let run_id = report.run_id.to_string();
        report
            .results
            .iter()
            .enumerate()
            .map(|(i, r)| Self::from_result(&run_id, i as u32 + 1, r))
            .collect()
    }

    fn decimals(&self) -> [Option<Decimal>; 5] {
        [
            self.total_profit,
            self.trigger_rate,
            self.completion_rate,
            self.avg_profit_per_trade,
            self.max_drawdown,
        ]
    }
}

/// Write result rows to a single Parquet file
pub fn write_result_rows(path: &Path, rows: &[ResultRow]) -> Result<(), DataError> {
    let schema = Arc::new(result_schema());
    let file = File::create(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

    let strings = |f: fn(&ResultRow) -> String| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let counts = |f: fn(&ResultRow) -> Option<u64>| -> ArrayRef {
        Arc::new(UInt64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let mut columns: Vec<ArrayRef> = vec![
        strings(|r| r.run_id.clone()),
        Arc::new(UInt32Array::from(
            rows.iter().map(|r| r.rank).collect::<Vec<_>>(),
        )),
        strings(|r| r.status.clone()),
        Arc::new(StringArray::from(
            rows.iter().map(|r| r.reason.clone()).collect::<Vec<_>>(),
        )),
        strings(|r| r.move_threshold.to_string()),
        strings(|r| r.sum_target.to_string()),
        strings(|r| r.window_minutes.to_string()),
        counts(|r| r.rounds),
        counts(|r| r.trade_count),
        counts(|r| r.wins),
        counts(|r| r.losses),
    ];

    for i in 0..DECIMAL_COLUMNS.len() {
        let values: Vec<Option<String>> = rows
            .iter()
            .map(|r| r.decimals()[i].map(|d| d.to_string()))
            .collect();
        columns.push(Arc::new(StringArray::from(values)));
    }

    let batch = RecordBatch::try_new(schema, columns)?;

    writer.write(&batch)?;
    writer.close()?;

    tracing::debug!(path = ?path, count = rows.len(), "Wrote results to Parquet");

    Ok(())
}

fn column<'a, T: 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a T, DataError> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<T>())
        .ok_or_else(|| ArrowError::SchemaError(format!("Invalid {name} column")).into())
}

fn optional_str(array: &StringArray, i: usize) -> Option<&str> {
    (!array.is_null(i)).then(|| array.value(i))
}

fn parse_decimal(s: &str) -> Result<Decimal, DataError> {
    Decimal::from_str(s).map_err(|e| ArrowError::ParseError(e.to_string()).into())
}

/// Read result rows back from a Parquet file
pub fn read_result_rows(path: &Path) -> Result<Vec<ResultRow>, DataError> {
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch?;

        let run_ids = column::<StringArray>(&batch, "run_id")?;
        let ranks = column::<UInt32Array>(&batch, "rank")?;
        let statuses = column::<StringArray>(&batch, "status")?;
        let reasons = column::<StringArray>(&batch, "reason")?;
        let moves = column::<StringArray>(&batch, "move_threshold")?;
        let sums = column::<StringArray>(&batch, "sum_target")?;
        let windows = column::<StringArray>(&batch, "window_minutes")?;
        let rounds = column::<UInt64Array>(&batch, "rounds")?;
        let trades = column::<UInt64Array>(&batch, "trade_count")?;
        let wins = column::<UInt64Array>(&batch, "wins")?;
        let losses = column::<UInt64Array>(&batch, "losses")?;
        let mut decimals = Vec::with_capacity(DECIMAL_COLUMNS.len());
        for name in DECIMAL_COLUMNS {
            decimals.push(column::<StringArray>(&batch, name)?);
        }

        let count_at = |a: &UInt64Array, i: usize| (!a.is_null(i)).then(|| a.value(i));
        let decimal_at = |col: usize, i: usize| -> Result<Option<Decimal>, DataError> {
            optional_str(decimals[col], i).map(parse_decimal).transpose()
        };

        for i in 0..batch.num_rows() {
            rows.push(ResultRow {
                run_id: run_ids.value(i).to_string(),
                rank: ranks.value(i),
                status: statuses.value(i).to_string(),
                reason: optional_str(reasons, i).map(str::to_string),
                move_threshold: parse_decimal(moves.value(i))?,
                sum_target: parse_decimal(sums.value(i))?,
                window_minutes: parse_decimal(windows.value(i))?,
                rounds: count_at(rounds, i),
                trade_count: count_at(trades, i),
                wins: count_at(wins, i),
                losses: count_at(losses, i),
                total_profit: decimal_at(0, i)?,
                trigger_rate: decimal_at(1, i)?,
                completion_rate: decimal_at(2, i)?,
                avg_profit_per_trade: decimal_at(3, i)?,
                max_drawdown: decimal_at(4, i)?,
            });
        }
    }

    Ok(rows)
}
