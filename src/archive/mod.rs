mod filename;
mod store;

pub use filename::ArchivePaths;
pub use store::ArchiveStore;
