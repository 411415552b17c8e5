//! State Management
//!
//! Application-scoped reactive state: the authenticated session and the
//! cached reading list with its invalidate-on-mutation discipline.

pub mod readings;
pub mod session;

pub use readings::{provide_readings, use_readings, ReadingsState};
pub use session::{provide_session, use_session, SessionState};
