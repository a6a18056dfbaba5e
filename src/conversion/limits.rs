use crate::conversion::config::ExportConfig;
use crate::error::{ExportError, ExportResult};

/// Check the number of files against the configured ceiling.
/// Exceeding it is fatal for the whole export; no partial workbook is built.
pub fn check_file_count(count: usize, config: &ExportConfig) -> ExportResult<()> {
    if count > config.max_files {
        return Err(ExportError::TooManyFiles {
            count,
            limit: config.max_files,
        });
    }

    Ok(())
}
