//! XML emission helpers.
//!
//! - [`sanitize`]: encoding safety for every string written as XML
//! - [`filelist`]: `filelists` metadata fragments built with `quick-xml`

pub mod filelist;
pub mod sanitize;

pub use filelist::{filelists_document, write_files, write_package, FILELISTS_NS};
pub use sanitize::{has_control_chars, latin1_to_utf8, sanitize_attr, sanitize_text};
