pub mod driver;
pub mod location;
pub mod task;
pub mod vehicle;
