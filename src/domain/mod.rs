pub mod author;
pub mod book;
pub mod borrower;
pub mod identity;
pub mod value_objects;

pub use author::{Author, AuthorRequest};
pub use book::{Book, BookRequest};
pub use borrower::{Borrower, BorrowerRequest};
pub use identity::{Identity, IdentityFilter};
pub use value_objects::*;
