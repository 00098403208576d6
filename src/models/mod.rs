pub mod qa;
pub mod state;

pub use qa::{QaItem, QaRecord, Section};
pub use state::RequestState;
