// Repository modules
pub mod minion_repository;
pub mod domain_repository;
pub mod task_repository;
pub mod assignment_repository;

// Re-export repository types
pub use minion_repository::MinionRepository;
pub use domain_repository::DomainRepository;
pub use task_repository::TaskRepository;
pub use assignment_repository::AssignmentRepository;
