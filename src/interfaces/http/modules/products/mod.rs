//! Products module: paginated listing, detail, add and delete

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
