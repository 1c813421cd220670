pub mod activity_service;
pub mod auth;
pub mod case_rules;
pub mod case_service;
pub mod dashboard_service;
pub mod employee_service;
pub mod user_service;
