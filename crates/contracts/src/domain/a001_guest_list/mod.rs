pub mod aggregate;
pub mod gate;

pub use aggregate::{compact_typed_name, normalize_name, AllowList};
pub use gate::{AccessGate, GateState, GateVerdict, NameListCache, NameSource};
