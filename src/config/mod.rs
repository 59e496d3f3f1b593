//! Profile configuration
//!
//! - **profile**: the DHCP / static profile record and its JSON shape
//! - **store**: the ordered name -> profile map persisted to `profiles.json`

pub mod profile;
pub mod store;

pub use profile::{Profile, StaticProfile};
pub use store::ProfileStore;
