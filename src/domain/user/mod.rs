//! User domain
//!
//! User entities with their profile value objects, validation rules and the
//! repository trait. Users are sortable by any field listed in their field
//! table, so listings go through the pagination domain.

mod entity;
mod repository;
mod validation;

pub use entity::{
    Address, Geolocation, Name, User, UserId, UserInput, UserProfile, UserRole, UserStatus,
};
pub use repository::UserRepository;
pub use validation::{
    validate_email, validate_password, validate_phone, validate_profile, validate_username,
    UserValidator,
};

#[cfg(test)]
pub(crate) use entity::fixtures;
#[cfg(test)]
pub use repository::mock::MockUserRepository;
