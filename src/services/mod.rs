//! Service layer: filter building, summary generation, session state.

pub mod filter;
pub mod session;
pub mod summary;

pub use filter::{build_criteria, FilterSelection};
pub use session::{Credentials, Session, SessionStore};
pub use summary::SummaryService;
