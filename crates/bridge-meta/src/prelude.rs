pub use bridge_types::prelude::*;

// vim: ts=4
