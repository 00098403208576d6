pub mod generation_client;
pub mod scripted;

pub use generation_client::{GeneratedQa, GenerationClient, HealthStatus, QaGenerator};
pub use scripted::ScriptedGenerator;
