pub mod preview;

pub use preview::{index, preview, preview_routes};
