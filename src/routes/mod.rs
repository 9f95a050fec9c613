pub mod driver_routes;
pub mod point_routes;
pub mod position_routes;
pub mod task_routes;
pub mod vehicle_routes;
