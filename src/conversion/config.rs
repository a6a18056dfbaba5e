//! Configuration for workbook export

/// File name suffix of JSON files picked up by a scan
pub const JSON_SUFFIX: &str = ".json";

/// Maximum number of JSON files combined into one workbook
pub const MAX_FILES: usize = 100;

/// Prefix of the generated workbook's file name
pub const FILE_NAME_PREFIX: &str = "combined-json-data";

pub const DATA_SHEET_NAME: &str = "Combined Data";
pub const SUMMARY_SHEET_NAME: &str = "Summary";

/// Provenance columns added to every record
pub const SOURCE_FILE_COLUMN: &str = "_source_file";
pub const ROW_INDEX_COLUMN: &str = "_row_index";

/// Default object nesting limit. Kept below serde_json's parse recursion limit (128)
/// so it also applies to documents read from files.
pub const MAX_DEPTH: usize = 100;

/// Excel's limit on worksheet name length
const MAX_SHEET_NAME_LEN: usize = 31;

/// Export configuration options
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// File name suffix used to select JSON files (ASCII case-insensitive)
    pub json_suffix: String,
    /// Maximum number of files per workbook
    pub max_files: usize,
    /// Maximum object nesting depth accepted by the flattener
    pub max_depth: Option<usize>,
    /// Prefix of the generated file name
    pub file_name_prefix: String,
    /// Name of the combined records sheet
    pub data_sheet_name: String,
    /// Name of the summary sheet
    pub summary_sheet_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            json_suffix: JSON_SUFFIX.to_string(),
            max_files: MAX_FILES,
            max_depth: Some(MAX_DEPTH),
            file_name_prefix: FILE_NAME_PREFIX.to_string(),
            data_sheet_name: DATA_SHEET_NAME.to_string(),
            summary_sheet_name: SUMMARY_SHEET_NAME.to_string(),
        }
    }
}

impl ExportConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file-count ceiling
    pub fn with_max_files(mut self, limit: usize) -> Self {
        self.max_files = limit;
        self
    }

    /// Set maximum nesting depth
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the generated file name prefix
    pub fn with_file_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_name_prefix = prefix.into();
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        if !self.json_suffix.starts_with('.') || self.json_suffix.len() < 2 {
            return Err(format!(
                "JSON suffix must start with '.' and name an extension, got '{}'",
                self.json_suffix
            ));
        }

        if self.max_files == 0 {
            return Err("File limit must be at least 1".to_string());
        }

        if let Some(depth) = self.max_depth {
            if depth == 0 {
                return Err("Max depth must be at least 1".to_string());
            }
        }

        if self.file_name_prefix.trim().is_empty() {
            return Err("File name prefix must not be empty".to_string());
        }

        for name in [&self.data_sheet_name, &self.summary_sheet_name] {
            validate_sheet_name(name)?;
        }

        if self
            .data_sheet_name
            .eq_ignore_ascii_case(&self.summary_sheet_name)
        {
            return Err(format!("Duplicate sheet name '{}'", self.data_sheet_name));
        }

        Ok(())
    }
}

fn validate_sheet_name(name: &str) -> Result<(), String> {
    if name.is_empty() || name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(format!(
            "Sheet name '{}' must be 1-{} characters",
            name, MAX_SHEET_NAME_LEN
        ));
    }

    if name.contains(['[', ']', ':', '*', '?', '/', '\\']) {
        return Err(format!("Sheet name '{}' contains invalid characters", name));
    }

    Ok(())
}
