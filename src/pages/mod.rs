//! Pages
//!
//! Top-level page components for each route.

pub mod add_log;
pub mod auth;
pub mod charts;
pub mod dashboard;
pub mod history;
pub mod landing;
pub mod profile;

pub use add_log::AddLog;
pub use auth::AuthPage;
pub use charts::Charts;
pub use dashboard::Dashboard;
pub use history::History;
pub use landing::Landing;
pub use profile::Profile;
