// Repository and Service Port Traits (Interfaces)
// Define what the domain needs from storage and account lookup

pub mod repositories;
pub mod services;

pub use repositories::*;
pub use services::*;
