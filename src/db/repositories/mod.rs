pub mod pass;
pub mod user;
