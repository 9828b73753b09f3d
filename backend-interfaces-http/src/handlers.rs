pub mod import_handlers;
pub mod match_handlers;
pub mod ops_handlers;

pub use import_handlers::*;
pub use match_handlers::*;
pub use ops_handlers::*;
