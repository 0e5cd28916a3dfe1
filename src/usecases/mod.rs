//! Application use cases. Orchestrate domain logic via ports.

pub mod birthday_run;
pub mod media_picker;
pub mod message_composer;
pub mod roster_service;

pub use birthday_run::{BirthdayRun, RunReport, RunStatus, RunTargets};
pub use media_picker::MediaPicker;
pub use message_composer::MessageComposer;
pub use roster_service::RosterService;
