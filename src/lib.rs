pub mod config;
pub mod enumerator;
pub mod error;
pub mod file_set;
pub mod filetype;
pub mod git;
pub mod notifier;
pub mod processor;
pub mod render;
pub mod scratch;
pub mod sources;
pub mod writer;

// Re-exports for easy access
pub use config::{Config, Credentials, Location, ScanOptions, SourceReference};
pub use error::{Error, FileReadWarning, Result};
pub use file_set::{FileDescriptor, FileKind, FileSet, Stats};
pub use git::GitRepo;
pub use notifier::Notifier;
pub use processor::{DocProcessor, Report};
pub use render::{Artifact, Project, RenderedOutputs};
pub use scratch::ScratchDirs;
pub use sources::LocalSource;
pub use sources::RemoteSource;
pub use sources::Source;
