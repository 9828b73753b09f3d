pub mod hero_commands;
pub mod import_commands;
pub mod link_commands;

pub use link_commands::LinkSummary;
