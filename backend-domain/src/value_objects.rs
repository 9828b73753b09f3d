// Domain value objects
pub mod event_type;
pub mod game_format;
pub mod hero;
pub mod identifiers;
pub mod match_result;

pub use event_type::*;
pub use game_format::*;
pub use hero::*;
pub use identifiers::*;
pub use match_result::*;
