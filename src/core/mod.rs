pub mod dates;
pub mod errors;
pub mod record;

pub use dates::DateStrategy;
pub use errors::{Result, StoreError, ValidationError};
pub use record::{AgedEmployee, Employee, Gender};
