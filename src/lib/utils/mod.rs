//! Shortcuts to the shared helpers under `crate::core`.

pub use crate::core::errors::is_broken_pipe;
pub use crate::core::fs::make_parent_dirs;
pub use crate::core::io::{create_text, get_writer, open_text};
