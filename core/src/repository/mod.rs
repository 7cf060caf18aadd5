pub mod file;
pub mod photo;
pub mod traits;

pub use file::FileJournalRepository;
pub use photo::FilePhotoStorage;
pub use traits::{JournalRepository, PhotoStorage};
