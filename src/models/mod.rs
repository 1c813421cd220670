pub mod activity;
pub mod auth;
pub mod cases;
pub mod dashboard;
pub mod employees;
pub mod users;
