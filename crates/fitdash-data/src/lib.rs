pub mod aggregate;
pub mod error;
pub mod loader;
pub mod parser;

pub use aggregate::*;
pub use error::{CoercionReason, FieldCoercionWarning, LoadError, ParseError};
pub use loader::{load_dataset, load_or_empty, Dataset};
pub use parser::{parse_csv, parse_csv_bytes, parse_row, parse_rows, ParseOutcome, ParsedRow, RawRow};
