//! Spreadsheet column mapping.
//!
//! Exports name their columns inconsistently (`Data do Periodo`,
//! `data_do_periodo`, trailing spaces). Headers are normalised before being
//! matched against the canonical field names.

use csv::StringRecord;

use crate::error::{EngineError, EngineResult};

/// Worker identifier column.
pub const WORKER_ID: &str = "id_da_pessoa_entregadora";
/// Worker display name column.
pub const WORKER_NAME: &str = "pessoa_entregadora";
/// Period date column.
pub const PERIOD_DATE: &str = "data_do_periodo";
/// Scheduled duration column.
pub const SCHEDULED_DURATION: &str = "duracao_do_periodo";
/// Online duration column.
pub const ONLINE_DURATION: &str = "tempo_disponivel_absoluto";
/// Completed deliveries column.
pub const COMPLETED_DELIVERIES: &str = "numero_de_corridas_completadas";

/// Columns every shift spreadsheet must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    WORKER_ID,
    WORKER_NAME,
    PERIOD_DATE,
    SCHEDULED_DURATION,
    ONLINE_DURATION,
    COMPLETED_DELIVERIES,
];

/// Normalises a header: trimmed, lowercase, spaces and hyphens as underscores.
///
/// # Examples
///
/// ```
/// use delivery_ranking::ingest::normalize_header;
///
/// assert_eq!(normalize_header(" Data do Periodo "), "data_do_periodo");
/// assert_eq!(normalize_header("ID-da-Pessoa-Entregadora"), "id_da_pessoa_entregadora");
/// ```
pub fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Column positions resolved from a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnMap {
    pub(crate) worker_id: usize,
    pub(crate) worker_name: usize,
    pub(crate) period_date: usize,
    pub(crate) scheduled_duration: usize,
    pub(crate) online_duration: usize,
    pub(crate) completed_deliveries: usize,
    /// Unmapped columns, by position and normalised name.
    pub(crate) extras: Vec<(usize, String)>,
}

impl ColumnMap {
    pub(crate) fn from_headers(headers: &StringRecord) -> EngineResult<Self> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |column: &str| {
            normalized
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| EngineError::MissingColumn {
                    column: column.to_string(),
                })
        };

        let worker_id = find(WORKER_ID)?;
        let worker_name = find(WORKER_NAME)?;
        let period_date = find(PERIOD_DATE)?;
        let scheduled_duration = find(SCHEDULED_DURATION)?;
        let online_duration = find(ONLINE_DURATION)?;
        let completed_deliveries = find(COMPLETED_DELIVERIES)?;

        let extras = normalized
            .iter()
            .enumerate()
            .filter(|(_, name)| !name.is_empty() && !REQUIRED_COLUMNS.contains(&name.as_str()))
            .map(|(position, name)| (position, name.clone()))
            .collect();

        Ok(Self {
            worker_id,
            worker_name,
            period_date,
            scheduled_duration,
            online_duration,
            completed_deliveries,
            extras,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> StringRecord {
        StringRecord::from(names.to_vec())
    }

    #[test]
    fn test_maps_canonical_headers() {
        let map = ColumnMap::from_headers(&headers(&REQUIRED_COLUMNS)).unwrap();
        assert_eq!(map.worker_id, 0);
        assert_eq!(map.completed_deliveries, 5);
        assert!(map.extras.is_empty());
    }

    #[test]
    fn test_maps_human_headers_in_any_order() {
        let map = ColumnMap::from_headers(&headers(&[
            "Praca",
            "Numero de Corridas Completadas",
            "Pessoa Entregadora",
            "ID da Pessoa Entregadora",
            "Data do Periodo",
            "Tempo Disponivel Absoluto",
            "Duracao do Periodo",
        ]))
        .unwrap();

        assert_eq!(map.worker_id, 3);
        assert_eq!(map.worker_name, 2);
        assert_eq!(map.period_date, 4);
        assert_eq!(map.scheduled_duration, 6);
        assert_eq!(map.online_duration, 5);
        assert_eq!(map.completed_deliveries, 1);
        assert_eq!(map.extras, vec![(0, "praca".to_string())]);
    }

    #[test]
    fn test_missing_column_is_named() {
        let result = ColumnMap::from_headers(&headers(&REQUIRED_COLUMNS[..5]));
        match result {
            Err(EngineError::MissingColumn { column }) => {
                assert_eq!(column, COMPLETED_DELIVERIES);
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_byte_order_mark_is_stripped() {
        assert_eq!(normalize_header("\u{feff}id_da_pessoa_entregadora"), WORKER_ID);
    }
}
