use chrono::{DateTime, Local, TimeZone};
use csv::{QuoteStyle, WriterBuilder};

use super::domain::DecisionRecord;

/// Column order expected by downstream spreadsheet tooling. The header line
/// is written verbatim; data fields are always quoted.
const HEADER: &str = "id,permit_no,name,zones,status,valid_to,scanned_at,result,reason";

/// Failure producing the CSV byte output.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv serialization failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv buffer write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize records to UTF-8 CSV bytes, preserving input order.
///
/// Every field is double-quoted with embedded quotes doubled; an absent
/// `reason` becomes an empty quoted field. An empty input yields only the
/// header line.
pub fn export_csv(records: &[DecisionRecord]) -> Result<Vec<u8>, ExportError> {
    let mut out = Vec::with_capacity(HEADER.len() + 1 + records.len() * 96);
    out.extend_from_slice(HEADER.as_bytes());
    out.push(b'\n');

    {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .has_headers(false)
            .from_writer(&mut out);
        for record in records {
            writer.write_record([
                record.id.to_string().as_str(),
                &record.permit_no,
                &record.name,
                &record.zones,
                &record.status,
                &record.valid_to,
                &record.scanned_at,
                record.result.as_str(),
                record.reason.as_deref().unwrap_or(""),
            ])?;
        }
        writer.flush()?;
    }

    Ok(out)
}

/// Conventional export filename for file-writing collaborators.
pub fn export_filename<Tz: TimeZone>(at: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("boarding_history_{}.csv", at.format("%Y%m%d_%H%M%S"))
}

/// [`export_filename`] stamped with the current local time.
pub fn export_filename_now() -> String {
    export_filename(Local::now())
}
