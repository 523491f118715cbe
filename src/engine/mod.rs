pub mod config;
pub mod scheduler;

pub use config::EngineConfig;
pub use scheduler::StepScheduler;
