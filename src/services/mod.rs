pub mod functional_patterns;
pub mod person_service;
