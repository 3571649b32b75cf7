//! Tabular ingestion pipeline for facility data.
//!
//! Fetches raw delimited text (UTF-16 by default, the encoding the source
//! data ships in), decodes it, parses header + positional rows, and
//! normalizes each row into a typed [`Facility`](capmap_common::Facility)
//! under asymmetric validation rules: a row without a usable name or
//! coordinates is excluded, every other malformed field is defaulted.

pub mod decode;
pub mod fetch;
pub mod loader;
pub mod normalize;
pub mod tabular;

pub use decode::{decode_text, TextEncoding};
pub use fetch::Fetcher;
pub use loader::load_facilities;
pub use normalize::normalize_rows;
pub use tabular::{parse_table, Delimiter, RawRow};
