pub mod prelude;

pub mod outing_passes;
pub mod users;
