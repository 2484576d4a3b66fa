pub mod file;

// Public library API - the graph engine should depend on these types rather
// than reaching into submodules.
pub use file::classify::SourceClassifier;
pub use file::config::FileSystemConfig;
pub use file::error::FileError;
pub use file::local::LocalFileReader;
pub use file::memory::MemoryFileReader;
pub use file::reader::FileReader;
