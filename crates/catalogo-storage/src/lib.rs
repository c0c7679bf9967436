pub mod document;
pub mod file;
pub mod mem;
pub mod reader;
pub mod traits;

pub use document::read_json;
pub use file::{read_collection, FileStore, COLLECTION_FILE};
pub use mem::InMemoryStore;
pub use reader::{preview_lines, read_rows, read_rows_blocking};
pub use traits::*;
