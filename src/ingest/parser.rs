//! CSV shift parsing.

use std::collections::BTreeMap;
use std::io::Read;
use std::str::FromStr;

use csv::StringRecord;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::calculation::parse_calendar_date;
use crate::error::{EngineError, EngineResult};
use crate::models::RawShift;

use super::columns::ColumnMap;

/// Parses a shift spreadsheet exported as CSV.
///
/// The header row is mapped with [`normalize_header`](super::normalize_header);
/// all six shift columns must be present. Cells are trimmed. Blank duration and
/// delivery cells become absent values, which the scorer treats as zero.
///
/// # Errors
///
/// - [`EngineError::MissingColumn`] when a required column is absent
/// - [`EngineError::InvalidRecord`] for a blank worker id, an unparsable date or
///   a delivery count that is not a non-negative whole number
/// - [`EngineError::Csv`] when the file itself cannot be read as CSV
///
/// # Examples
///
/// ```
/// use delivery_ranking::ingest::parse_shifts_csv;
///
/// let data = "\
/// id_da_pessoa_entregadora,pessoa_entregadora,data_do_periodo,duracao_do_periodo,tempo_disponivel_absoluto,numero_de_corridas_completadas
/// w1,Ana,2024-12-25,08:00:00,07:30:00,25
/// ";
///
/// let shifts = parse_shifts_csv(data.as_bytes()).unwrap();
/// assert_eq!(shifts.len(), 1);
/// assert_eq!(shifts[0].completed_deliveries, Some(25));
/// ```
pub fn parse_shifts_csv<R: Read>(reader: R) -> EngineResult<Vec<RawShift>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(csv_reader.headers()?)?;
    let mut shifts = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = index + 1;
        if record.iter().all(str::is_empty) {
            continue;
        }
        shifts.push(parse_row(&record, &columns, row)?);
    }

    debug!(rows = shifts.len(), "Parsed shift spreadsheet");
    Ok(shifts)
}

fn parse_row(record: &StringRecord, columns: &ColumnMap, row: usize) -> EngineResult<RawShift> {
    let cell = |position: usize| record.get(position).unwrap_or("");

    let worker_id = cell(columns.worker_id);
    if worker_id.is_empty() {
        return Err(EngineError::InvalidRecord {
            row,
            message: "blank id_da_pessoa_entregadora".to_string(),
        });
    }

    let date_text = cell(columns.period_date);
    let date = parse_calendar_date(date_text).ok_or_else(|| EngineError::InvalidRecord {
        row,
        message: format!("invalid data_do_periodo '{}'", date_text),
    })?;

    let completed_deliveries = parse_deliveries(cell(columns.completed_deliveries))
        .map_err(|message| EngineError::InvalidRecord { row, message })?;

    let extra: BTreeMap<String, String> = columns
        .extras
        .iter()
        .filter_map(|(position, name)| {
            let value = cell(*position);
            (!value.is_empty()).then(|| (name.clone(), value.to_string()))
        })
        .collect();

    Ok(RawShift {
        worker_id: worker_id.to_string(),
        worker_name: cell(columns.worker_name).to_string(),
        date,
        scheduled_duration: non_empty(cell(columns.scheduled_duration)),
        online_duration: non_empty(cell(columns.online_duration)),
        completed_deliveries,
        extra,
    })
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Reads a delivery count. Spreadsheets often write whole numbers as `12.0`.
fn parse_deliveries(value: &str) -> Result<Option<u32>, String> {
    if value.is_empty() {
        return Ok(None);
    }

    let invalid = || format!("invalid numero_de_corridas_completadas '{}'", value);
    let number = Decimal::from_str(value).map_err(|_| invalid())?;
    if number.is_sign_negative() && !number.is_zero() {
        return Err(format!(
            "negative numero_de_corridas_completadas '{}'",
            value
        ));
    }
    if !number.fract().is_zero() {
        return Err(invalid());
    }
    number.to_u32().map(Some).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const HEADER: &str = "id_da_pessoa_entregadora,pessoa_entregadora,data_do_periodo,duracao_do_periodo,tempo_disponivel_absoluto,numero_de_corridas_completadas";

    fn parse(rows: &[&str]) -> EngineResult<Vec<RawShift>> {
        let data = format!("{}\n{}\n", HEADER, rows.join("\n"));
        parse_shifts_csv(data.as_bytes())
    }

    /// IN-001: a complete row maps every field
    #[test]
    fn test_in_001_complete_row() {
        let shifts = parse(&["w1, Ana Souza ,2024-12-25,08:00:00,07:30:00,25"]).unwrap();

        assert_eq!(shifts.len(), 1);
        let shift = &shifts[0];
        assert_eq!(shift.worker_id, "w1");
        assert_eq!(shift.worker_name, "Ana Souza");
        assert_eq!(shift.date, NaiveDate::from_ymd_opt(2024, 12, 25).unwrap());
        assert_eq!(shift.scheduled_duration.as_deref(), Some("08:00:00"));
        assert_eq!(shift.online_duration.as_deref(), Some("07:30:00"));
        assert_eq!(shift.completed_deliveries, Some(25));
        assert!(shift.extra.is_empty());
    }

    /// IN-002: blank cells become absent values
    #[test]
    fn test_in_002_blank_cells_absent() {
        let shifts = parse(&["w1,Ana,2024-12-25,,,"]).unwrap();

        assert_eq!(shifts[0].scheduled_duration, None);
        assert_eq!(shifts[0].online_duration, None);
        assert_eq!(shifts[0].completed_deliveries, None);
    }

    /// IN-003: malformed durations are kept for the scorer to degrade
    #[test]
    fn test_in_003_malformed_duration_kept() {
        let shifts = parse(&["w1,Ana,2024-12-25,8h,7h30,3"]).unwrap();
        assert_eq!(shifts[0].scheduled_duration.as_deref(), Some("8h"));
    }

    /// IN-004: timestamps with zones keep their calendar day
    #[test]
    fn test_in_004_timestamp_date() {
        let shifts = parse(&["w1,Ana,2024-12-31T23:59:59-03:00,08:00:00,08:00:00,1"]).unwrap();
        assert_eq!(shifts[0].date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    /// IN-005: whole-number floats are accepted
    #[test]
    fn test_in_005_whole_number_float() {
        let shifts = parse(&["w1,Ana,2024-12-25,08:00:00,08:00:00,12.0"]).unwrap();
        assert_eq!(shifts[0].completed_deliveries, Some(12));
    }

    #[test]
    fn test_negative_deliveries_rejected() {
        match parse(&["w1,Ana,2024-12-25,08:00:00,08:00:00,-3"]) {
            Err(EngineError::InvalidRecord { row, message }) => {
                assert_eq!(row, 1);
                assert!(message.contains("negative"));
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_fractional_deliveries_rejected() {
        let result = parse(&["w1,Ana,2024-12-25,08:00:00,08:00:00,2.5"]);
        assert!(matches!(result, Err(EngineError::InvalidRecord { row: 1, .. })));
    }

    #[test]
    fn test_bad_date_reports_row() {
        let result = parse(&[
            "w1,Ana,2024-12-25,08:00:00,08:00:00,1",
            "w2,Bia,someday,08:00:00,08:00:00,1",
        ]);
        match result {
            Err(EngineError::InvalidRecord { row, message }) => {
                assert_eq!(row, 2);
                assert!(message.contains("someday"));
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_worker_id_rejected() {
        let result = parse(&[",Ana,2024-12-25,08:00:00,08:00:00,1"]);
        assert!(matches!(result, Err(EngineError::InvalidRecord { .. })));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let shifts = parse(&[
            "w1,Ana,2024-12-25,08:00:00,08:00:00,1",
            ",,,,,",
            "w2,Bia,2024-12-25,08:00:00,08:00:00,2",
        ])
        .unwrap();
        assert_eq!(shifts.len(), 2);
    }

    #[test]
    fn test_missing_column_fails_before_rows() {
        let data = "id_da_pessoa_entregadora,pessoa_entregadora,data_do_periodo\nw1,Ana,2024-12-25\n";
        let result = parse_shifts_csv(data.as_bytes());
        assert!(matches!(result, Err(EngineError::MissingColumn { .. })));
    }

    #[test]
    fn test_extra_columns_are_kept() {
        let data = "Praca,ID da Pessoa Entregadora,Pessoa Entregadora,Data do Periodo,Duracao do Periodo,Tempo Disponivel Absoluto,Numero de Corridas Completadas,Periodo\n\
                    Sao Paulo,w1,Ana,25/12/2024,08:00:00,08:00:00,4,\n";
        let shifts = parse_shifts_csv(data.as_bytes()).unwrap();

        assert_eq!(shifts[0].worker_id, "w1");
        assert_eq!(shifts[0].date, NaiveDate::from_ymd_opt(2024, 12, 25).unwrap());
        assert_eq!(shifts[0].extra.get("praca").map(String::as_str), Some("Sao Paulo"));
        assert!(!shifts[0].extra.contains_key("periodo"));
    }

    #[test]
    fn test_ragged_row_is_csv_error() {
        let result = parse(&["w1,Ana,2024-12-25"]);
        assert!(matches!(result, Err(EngineError::Csv(_))));
    }
}
