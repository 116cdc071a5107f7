//! Database-backed repository implementations.

pub mod pg_record_repository;

pub use pg_record_repository::PgRecordRepository;
