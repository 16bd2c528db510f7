pub mod dialog;

pub use dialog::{Dialog, DialogVariant};
