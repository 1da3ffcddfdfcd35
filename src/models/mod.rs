// Models module

pub mod person;
pub mod poll;
pub mod product;
pub mod user;

// Re-export commonly used types
pub use person::{CreatePersonRequest, Person, UpdatePersonRequest};
pub use poll::{PollData, PollDataRequest};
pub use product::{Price, Product, ProductChanges};
pub use user::{CreateUserRequest, UpdateUserRequest, User};
