pub mod types;
pub mod evaluation;
pub mod search;
pub mod source;
pub mod retry;
pub mod logger_extensions;

pub use types::*;
pub use evaluation::*;
pub use search::*;
pub use source::*;
pub use retry::*;
pub use logger_extensions::AILoggerExtensions;
