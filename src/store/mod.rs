pub mod auth;
pub mod object_storage;
pub mod postgres;
pub mod session_cache;
pub mod traits;

pub use auth::*;
pub use object_storage::*;
pub use postgres::*;
pub use session_cache::*;
pub use traits::*;
