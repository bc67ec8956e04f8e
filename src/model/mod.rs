pub mod category;
pub mod common;
pub mod image;
pub mod product;
pub mod session;

pub use category::*;
pub use common::*;
pub use image::*;
pub use product::*;
pub use session::*;
