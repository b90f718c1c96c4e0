//! Heterogeneous filesystem layer: entry model, listing parsers, shell
//! escaping, and the local and remote gateways.

pub mod contracts;
pub mod entry;
pub mod escape;
pub mod listing;
pub mod local;
pub mod paths;
pub mod remote;
pub mod temp;

pub use contracts::Backend;
pub use entry::{BackendBinding, BackendKind, FileEntry};
pub use listing::{ListingParser, LsLongParser};
pub use local::LocalGateway;
pub use remote::RemoteGateway;
pub use temp::{TempArtifact, TempArtifacts};
