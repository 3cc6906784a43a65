//! UI Components

pub mod navbar;
pub mod toasts;

pub use navbar::Navbar;
pub use toasts::Toasts;
