pub mod add;
pub mod create;
pub mod generate;
pub mod list;
pub mod matrix;
pub mod optimize;
pub mod perf;
