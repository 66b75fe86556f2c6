/// Terminal front end for gtool: a character-cell drawing surface plus
/// logger setup for the demo binary
pub mod canvas;
pub mod logging;

pub use canvas::TermCanvas;
pub use logging::{init_logging, LoggingConfig};
