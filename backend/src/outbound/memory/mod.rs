//! Process-local user store used when no database is configured and in tests.

mod in_memory_user_repository;

pub use in_memory_user_repository::InMemoryUserRepository;
