pub mod local;
pub mod naming;
pub mod remote;
pub mod source;

pub use local::LocalSource;
pub use remote::RemoteSource;
pub use source::{ResolvedSource, Source};
