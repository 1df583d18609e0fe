//! CSV rendering and download.

use std::sync::Arc;

use commdash_telemetry::Metrics;
use commdash_ui::{Download, Notifier, Surface, UiContext};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::config::ExportConfig;
use crate::error::{ExportError, ExportResult};

pub const CSV_MIME: &str = "text/csv";

/// Render records as CSV text.
///
/// The header is the key order of the first record. Keys missing from a
/// later record become empty fields; keys it has beyond the header are
/// ignored. Fields are quoted only when they contain a comma, a quote or a
/// line break. Rows are joined with `\n` and the last row has no line
/// ending. A row whose only field is empty renders as an empty line. No
/// records render as an empty string.
pub fn render_csv(records: &[Map<String, Value>]) -> ExportResult<String> {
    let Some(first) = records.first() else {
        return Ok(String::new());
    };
    let columns: Vec<&String> = first.keys().collect();

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Buffer::default());

    write_row(&mut writer, columns.iter().map(|c| c.to_string()).collect())?;
    for record in records {
        write_row(
            &mut writer,
            columns.iter().map(|c| field(record.get(c.as_str()))).collect(),
        )?;
    }

    let mut bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Encoding(e.to_string()))?
        .take();
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    String::from_utf8(bytes).map_err(|e| ExportError::Encoding(e.to_string()))
}

/// Output buffer that stays reachable while the csv writer owns it
/// (`csv::Writer` has no `get_mut`).
#[derive(Default)]
struct Buffer(std::rc::Rc<std::cell::RefCell<Vec<u8>>>);

impl Buffer {
    fn push(&self, byte: u8) {
        self.0.borrow_mut().push(byte);
    }

    fn take(self) -> Vec<u8> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

impl std::io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn write_row(writer: &mut csv::Writer<Buffer>, row: Vec<String>) -> ExportResult<()> {
    // csv quotes a lone empty field as `""` so the row survives a reparse
    if let [only] = row.as_slice() {
        if only.is_empty() {
            writer.flush()?;
            writer.get_ref().push(b'\n');
            return Ok(());
        }
    }
    writer.write_record(&row)?;
    Ok(())
}

fn field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => match n.as_f64() {
            // 3.0 prints as 3
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Some(nested) => nested.to_string(),
    }
}

/// Renders records to CSV and hands the file to the surface.
#[derive(Clone)]
pub struct CsvExporter {
    surface: Arc<dyn Surface>,
    notifier: Notifier,
    default_filename: String,
}

impl CsvExporter {
    pub fn new(ui: &UiContext, config: &ExportConfig) -> Self {
        Self {
            surface: ui.surface().clone(),
            notifier: ui.notifier().clone(),
            default_filename: config.default_filename.clone(),
        }
    }

    /// Export `records` as `filename` (or the configured default).
    ///
    /// Empty input shows a warning and returns `Ok(None)` without a
    /// download. Otherwise returns the filename that was downloaded.
    pub fn export(
        &self,
        records: &[Map<String, Value>],
        filename: Option<&str>,
    ) -> ExportResult<Option<String>> {
        if records.is_empty() {
            warn!("Export requested with no records");
            self.notifier.warning("No data to export");
            return Ok(None);
        }

        let filename = filename.unwrap_or(&self.default_filename).to_string();
        let contents = render_csv(records)?;
        self.surface.download(&Download {
            filename: filename.clone(),
            mime: CSV_MIME.to_string(),
            contents,
        })?;

        Metrics::exported_rows(records.len());
        info!(%filename, rows = records.len(), "CSV exported");
        self.notifier.success("Data exported successfully");
        Ok(Some(filename))
    }

    /// Export typed rows. Each row must serialize to a JSON object; its
    /// field order becomes the column order.
    pub fn export_serialized<T: Serialize>(
        &self,
        rows: &[T],
        filename: Option<&str>,
    ) -> ExportResult<Option<String>> {
        let records = rows
            .iter()
            .enumerate()
            .map(|(index, row)| match serde_json::to_value(row)? {
                Value::Object(map) => Ok(map),
                _ => Err(ExportError::NotAnObject { index }),
            })
            .collect::<ExportResult<Vec<_>>>()?;
        self.export(&records, filename)
    }
}

impl std::fmt::Debug for CsvExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvExporter")
            .field("default_filename", &self.default_filename)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commdash_core::{CommissionRecord, Severity};
    use commdash_ui::{RecordingSurface, UiConfig};
    use serde_json::json;

    fn records(value: Value) -> Vec<Map<String, Value>> {
        serde_json::from_value(value).unwrap()
    }

    fn exporter() -> (Arc<RecordingSurface>, CsvExporter) {
        let surface = Arc::new(RecordingSurface::default());
        let config = UiConfig {
            notification_dismiss_ms: 0,
            ..Default::default()
        };
        let ui = UiContext::new(surface.clone(), &config);
        (surface, CsvExporter::new(&ui, &ExportConfig::default()))
    }

    #[test]
    fn test_missing_key_renders_empty() {
        let rows = records(json!([{"a": 1, "b": "x,y"}, {"a": 2}]));
        assert_eq!(render_csv(&rows).unwrap(), "a,b\n1,\"x,y\"\n2,");
    }

    #[test]
    fn test_first_record_fixes_column_order() {
        let rows = records(json!([
            {"month": 1, "amount": 10.5},
            {"amount": 20, "month": 2, "extra": true}
        ]));
        assert_eq!(render_csv(&rows).unwrap(), "month,amount\n1,10.5\n2,20");
    }

    #[test]
    fn test_scalar_rendering() {
        let rows = records(json!([
            {"n": null, "e": "", "z": 0, "f": false, "x": 3.0, "o": {"k": [1, 2]}}
        ]));
        assert_eq!(
            render_csv(&rows).unwrap(),
            "n,e,z,f,x,o\n,,0,false,3,\"{\"\"k\"\":[1,2]}\""
        );
    }

    #[test]
    fn test_quotes_and_newlines_are_escaped() {
        let rows = records(json!([{"note": "say \"hi\"", "memo": "line1\nline2"}]));
        assert_eq!(
            render_csv(&rows).unwrap(),
            "note,memo\n\"say \"\"hi\"\"\",\"line1\nline2\""
        );
    }

    #[test]
    fn test_single_empty_column_renders_blank_lines() {
        let rows = records(json!([{"a": 1}, {"a": null}, {"a": ""}, {"b": 2}]));
        assert_eq!(render_csv(&rows).unwrap(), "a\n1\n\n\n");
    }

    #[test]
    fn test_last_row_has_no_line_ending() {
        let rows = records(json!([{"a": "x", "b": "y"}]));
        let csv = render_csv(&rows).unwrap();
        assert_eq!(csv, "a,b\nx,y");
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn test_empty_export_warns_without_download() {
        let (surface, exporter) = exporter();
        let result = exporter.export(&[], Some("x.csv")).unwrap();

        assert_eq!(result, None);
        assert!(surface.downloads().is_empty());
        let shown = surface.shown_notifications();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].severity, Severity::Warning);
        assert_eq!(shown[0].message, "No data to export");
    }

    #[test]
    fn test_export_downloads_and_notifies() {
        let (surface, exporter) = exporter();
        let rows = records(json!([{"a": 1}]));

        let name = exporter.export(&rows, None).unwrap();
        assert_eq!(name.as_deref(), Some("data.csv"));

        let downloads = surface.downloads();
        assert_eq!(downloads.len(), 1);
        assert_eq!(downloads[0].mime, "text/csv");
        assert_eq!(downloads[0].contents, "a\n1");

        let shown = surface.shown_notifications();
        assert_eq!(shown[0].severity, Severity::Success);
        assert_eq!(shown[0].message, "Data exported successfully");
    }

    #[test]
    fn test_export_serialized_uses_field_names() {
        let (surface, exporter) = exporter();
        let row = CommissionRecord {
            year: 2024,
            month: 3,
            product_category: Some("Life".to_string()),
            internal_replacement: Some(false),
            commission_type: Some("Gross".to_string()),
            personality: None,
            amount: Some(1500.25),
            new_business_monthly_premium: Some(200.0),
            sales_count_client: Some(4),
            sales_count_product: Some(5),
        };

        exporter.export_serialized(&[row], Some("gross.csv")).unwrap();
        let contents = &surface.downloads()[0].contents;
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("Year,Month,ProductCategoryDescription,InternalReplacement,Type,Personality_To_Use,Amount,NewBusinessMonthlyPremium,SalesCount_Client,SalesCount_Product")
        );
        assert_eq!(lines.next(), Some("2024,3,Life,false,Gross,,1500.25,200,4,5"));
    }

    #[test]
    fn test_export_serialized_rejects_scalars() {
        let (_surface, exporter) = exporter();
        let err = exporter.export_serialized(&[1, 2], None).unwrap_err();
        assert!(matches!(err, ExportError::NotAnObject { index: 0 }));
    }
}
