//! jsonsheet: combine a folder of JSON files into one Excel workbook
//!
//! Every `.json` file under a folder is parsed, its records are flattened into
//! dotted-path rows, and all rows are written to a "Combined Data" sheet next to a
//! "Summary" sheet listing which files were processed and which failed.

pub mod cli;
pub mod conversion;
pub mod error;
pub mod fs;
pub mod parser;
pub mod session;
pub mod workbook;

// Re-export commonly used types
pub use conversion::{
    assemble, export_folder, flatten, AssembledWorkbook, ExportConfig, ExportReport, FlatRow,
    ProcessingSummary,
};
pub use error::{ExportError, FileError, HandleError, ParseError};
pub use fs::{DirectoryHandle, FileHandle, FsDirectory, MemoryDirectory};
pub use session::{FolderInput, FolderPicker, FolderSession, GenerateOutcome, ScanReport};
pub use workbook::{DirectorySink, DownloadSink, MemorySink, Workbook};
