use super::{FileId, LeadId};

/// A file attached to a timeline comment.
#[derive(Debug, Clone)]
pub struct FileDescriptor {
    pub id: FileId,
}

/// A CRM timeline comment as returned by `crm.timeline.comment.get`.
#[derive(Debug, Clone)]
pub struct TimelineComment {
    pub entity_id: Option<LeadId>,
    pub files: Vec<FileDescriptor>,
}

impl TimelineComment {
    /// The attachment to process. When a comment carries several files only
    /// the first is used; the CRM serves the FILES mapping in arbitrary
    /// order, so which one wins is unspecified.
    pub fn first_file(&self) -> Option<&FileDescriptor> {
        self.files.first()
    }
}
