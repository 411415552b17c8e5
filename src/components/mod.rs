//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod chart;
pub mod loading;
pub mod nav;
pub mod reading_card;
pub mod stat_card;
pub mod toast;

pub use chart::GlucoseChart;
pub use loading::Loading;
pub use nav::Nav;
pub use reading_card::ReadingCard;
pub use stat_card::StatCard;
pub use toast::Toast;
