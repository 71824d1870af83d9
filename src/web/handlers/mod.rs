pub mod cv_handlers;
pub mod preview_handlers;
pub mod system_handlers;

pub use cv_handlers::*;
pub use preview_handlers::*;
pub use system_handlers::*;
