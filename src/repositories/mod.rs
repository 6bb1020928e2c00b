pub mod contact;
pub mod summary;
pub mod user;

pub use contact::{ContactRepository, ContactRepositoryTrait};
pub use summary::{SummaryRepository, SummaryRepositoryTrait};
pub use user::{UserRepository, UserRepositoryTrait};
