pub mod analysis;
pub mod config;
pub mod error;
pub mod fields;
pub mod intake;
pub mod io;
pub mod paths;
pub mod record;
pub mod report;
pub mod search;
pub mod store;
pub mod summary;

pub use error::{IntakeError, Result};
pub use record::ClientRecord;
pub use search::SearchCriteria;
pub use store::ClientStore;
pub use summary::ClientSummary;
