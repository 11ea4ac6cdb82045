pub mod json;
pub mod memory;
pub mod traits;
pub mod types;

pub use json::{JsonPropertyStore, JsonShareLedger};
pub use memory::{MemoryPropertyStore, MemoryShareLedger, DEMO_USER};
pub use traits::{PropertyStore, UserShareLedger};
pub use types::StoreConfig;
