pub mod gateway;
pub mod query;

pub use gateway::{EmployeeStore, OPTIMIZATION_INDEX};
pub use query::{MatchStrategy, QueryPlan};
