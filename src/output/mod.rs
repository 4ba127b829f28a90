pub mod csv;
pub mod write;

pub use csv::{encode, encode_records};
pub use write::{output_path, write_csv};
