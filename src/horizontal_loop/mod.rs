pub mod layout;
pub mod nav;
pub mod timeline;

pub use layout::{LoopConfig, Snap};
pub use nav::{NavHandle, NavOptions};
pub use timeline::HorizontalLoop;
