pub mod driver_controller;
pub mod point_controller;
pub mod task_controller;
pub mod vehicle_controller;
