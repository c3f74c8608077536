//! Task management module
//!
//! - Task record, ID and bounded priority types
//! - Optional-field edit requests
//! - CSV snapshot storage with best-effort loading

pub mod model;
pub mod storage;

pub use model::{
    format_date, parse_date, Priority, Task, TaskId, TaskPatch, DATE_FORMAT, PRIORITY_MAX,
    PRIORITY_MIN,
};
pub use storage::{LoadOutcome, SkippedRow, Storage, StorageError, HEADER_LINE};
