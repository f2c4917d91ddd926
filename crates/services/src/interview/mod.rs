mod autosave;
mod sampler;
mod session;
mod workflow;

// Public API of the interview subsystem.
pub use crate::error::SessionError;
pub use autosave::{AUTOSAVE_INTERVAL_SECS, AutosaveTimer};
pub use sampler::QuestionSampler;
pub use session::{InterviewSession, SessionPhase};
pub use workflow::InterviewWorkflow;
