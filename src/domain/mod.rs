//! Domain layer - Core business logic and entities

pub mod error;
pub mod pagination;
pub mod user;
pub mod validation;

pub use error::{DomainError, ORDER_PARAM, PAGE_SIZE_PARAM};
pub use pagination::{
    paginate, paginate_source, Comparator, FieldMap, InMemoryPageSource, OrderKey, OrderSpec, Page,
    PageRequest, PageSource, PaginationError, SortValue, Sortable,
};
pub use user::{
    Address, Geolocation, Name, User, UserId, UserInput, UserProfile, UserRepository, UserRole,
    UserStatus, UserValidator,
};
pub use validation::{FieldError, ValidationReport, Validator};
