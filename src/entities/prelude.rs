pub use super::outing_passes::Entity as OutingPasses;
pub use super::users::Entity as Users;
