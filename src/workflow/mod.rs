pub mod dispatcher;
pub mod lifecycle;

pub use dispatcher::{Command, Dispatcher, Outcome};
pub use lifecycle::LifecycleController;
