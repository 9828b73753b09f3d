// Domain entities
pub mod imported_event;
pub mod match_record;
pub mod requests;
pub mod runtime_config;

pub use imported_event::*;
pub use match_record::*;
pub use requests::*;
pub use runtime_config::*;
