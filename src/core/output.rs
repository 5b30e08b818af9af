use crate::domain::model::{OutputFormat, UncoveredLine};
use crate::utils::error::{CoverageError, Result};

pub fn render(records: &[UncoveredLine], format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Text => Ok(render_text(records).into_bytes()),
        OutputFormat::Csv => render_csv(records),
        OutputFormat::Json => render_json(records),
    }
}

/// `path:line\n`，沒有記錄時輸出空內容
pub fn render_text(records: &[UncoveredLine]) -> String {
    records.iter().map(|record| format!("{}\n", record)).collect()
}

fn render_csv(records: &[UncoveredLine]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(["path", "line"])?;
    for record in records {
        writer.write_record([record.path.as_str(), record.line.to_string().as_str()])?;
    }

    writer
        .into_inner()
        .map_err(|e| CoverageError::IoError(e.into_error()))
}

fn render_json(records: &[UncoveredLine]) -> Result<Vec<u8>> {
    let mut data = serde_json::to_vec_pretty(records)?;
    data.push(b'\n');
    Ok(data)
}
