//! # Remote Collaborators
//!
//! Everything that talks to the network: the record source that fills list
//! screens, and the connectivity monitor that gates them.

pub mod connectivity;
pub mod source;

pub use connectivity::{ConnectivityMonitor, ProbeMonitor, StaticMonitor, Subscription};
pub use source::{HttpSource, Page, RecordSource, SourceError};
