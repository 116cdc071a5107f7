//! Repository traits abstracting the record store.

pub mod record_repository;

pub use record_repository::RecordRepository;

#[cfg(test)]
pub use record_repository::MockRecordRepository;
