pub mod activity_repo;
pub mod case_repo;
pub mod dashboard_repo;
pub mod employee_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepository;
pub use case_repo::CaseRepository;
pub use dashboard_repo::DashboardRepository;
pub use employee_repo::EmployeeRepository;
pub use user_repo::UserRepository;
