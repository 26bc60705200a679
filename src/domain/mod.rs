mod analysis;
mod audio_name;
mod comment;
mod ids;
mod webhook_event;

pub use analysis::{AnalysisFailure, AnalysisFailureKind, AnalysisOutcome, CallAnalysis};
pub use audio_name::derive_audio_filename;
pub use comment::{FileDescriptor, TimelineComment};
pub use ids::{CommentId, FileId, LeadId};
pub use webhook_event::WebhookEvent;
