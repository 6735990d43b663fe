pub mod file;
pub mod traits;

// Re-export
pub use file::FileSetRepository;
pub use traits::SetRepository;
