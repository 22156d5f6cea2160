pub mod definition;
pub mod loader;

pub use definition::*;
pub use loader::{SourceLocator, load_file, load_str};
