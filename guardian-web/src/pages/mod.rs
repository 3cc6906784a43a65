//! Page modules

pub mod connect;
pub mod dashboard;
pub mod status;

pub use connect::ConnectPage;
pub use dashboard::DashboardPage;
pub use status::StatusPage;
