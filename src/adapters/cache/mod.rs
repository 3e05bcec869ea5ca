//! Caching decorators over the repository ports.

pub mod cached_assignment_repository;

pub use cached_assignment_repository::CachedAssignmentRepository;
