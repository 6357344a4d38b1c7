//! Dashboard rendering: pure formatting and view shaping, handlebars templates,
//! and the per-page controllers that tie selection to pulse requests.

pub mod dashboard;
pub mod format;
pub mod session;
pub mod templates;
pub mod view;

pub use session::{SelectOutcome, SessionId, Sessions};
pub use templates::Templates;
