//! Domain vocabulary for the wrapper channel.
//!
//! Pure types with no I/O and no async dependencies: the event-name
//! enumeration the bridge fans out on, and the helpers for reading
//! site-info push payloads.

pub mod events;
pub mod siteinfo;

pub use events::EventName;
pub use siteinfo::SiteTrigger;
