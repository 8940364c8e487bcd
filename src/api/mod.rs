pub mod health_controller;
pub mod person_controller;
