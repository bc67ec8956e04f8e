pub mod admin;
pub mod catalog;
pub mod images;
pub mod validate;

pub use admin::AdminError;
pub use images::{ImageKind, ImageLifecycle};
pub use validate::ValidationError;
