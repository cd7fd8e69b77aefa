pub mod codec;
pub mod commands;
pub mod errors;
pub mod events;
pub mod item;
pub mod library;
pub mod loan;
pub mod member;
pub mod value_objects;

pub use errors::*;
pub use events::*;
pub use item::{CatalogItem, ItemFormat};
pub use library::Library;
pub use loan::{LOAN_PERIOD_DAYS, LoanEntry, LoanStatus};
pub use member::Member;
pub use value_objects::*;
