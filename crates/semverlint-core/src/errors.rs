use thiserror::Error;

/// Result type alias using SemverLintError
pub type Result<T> = std::result::Result<T, SemverLintError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and machine-readable reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Version discovery
    RepositoryOpen,
    MissingHead,
    HeadLookup,
    TagListing,
    TagResolution,

    // Introspection
    Introspection,
    SnapshotRead,
    SnapshotWrite,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::RepositoryOpen => "ERR_REPOSITORY_OPEN",
            ExErrorKind::MissingHead => "ERR_MISSING_HEAD",
            ExErrorKind::HeadLookup => "ERR_HEAD_LOOKUP",
            ExErrorKind::TagListing => "ERR_TAG_LISTING",
            ExErrorKind::TagResolution => "ERR_TAG_RESOLUTION",
            ExErrorKind::Introspection => "ERR_INTROSPECTION",
            ExErrorKind::SnapshotRead => "ERR_SNAPSHOT_READ",
            ExErrorKind::SnapshotWrite => "ERR_SNAPSHOT_WRITE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification used by logs and reports, plus the operation
/// and entity the failure relates to.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity context (tag name, version name, snapshot path)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity: {})", entity_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Failures raised by the collaborators around the diff engine.
///
/// The diff itself is total; every variant here comes from opening a
/// repository, listing or resolving versions, or obtaining a snapshot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SemverLintError {
    /// The version-control repository could not be opened
    #[error("unable to open repository: {message}")]
    RepositoryOpen { message: String },

    /// The repository has no HEAD reference
    #[error("no HEAD reference found in repository")]
    MissingHead,

    /// HEAD exists but could not be read
    #[error("unable to get HEAD of repository: {message}")]
    HeadLookup { message: String },

    /// Tags could not be listed
    #[error("unable to list tags of repository: {message}")]
    TagListing { message: String },

    /// Unexpected failure while resolving a tag to a commit
    #[error("unknown error getting commit for tag {tag}: {message}")]
    TagResolution { tag: String, message: String },

    /// The project at a version failed to load or type-check
    #[error("unable to obtain API of version {version}: {message}")]
    Introspection { version: String, message: String },

    /// A snapshot file could not be read
    #[error("unable to read snapshot {path}: {message}")]
    SnapshotRead { path: String, message: String },

    /// A snapshot file could not be written
    #[error("unable to write snapshot {path}: {message}")]
    SnapshotWrite { path: String, message: String },

    /// JSON encoding/decoding error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<SemverLintError> for ExError {
    fn from(err: SemverLintError) -> Self {
        match err {
            SemverLintError::RepositoryOpen { message } => {
                ExError::new(ExErrorKind::RepositoryOpen)
                    .with_op("open_repository")
                    .with_message(message)
            }

            SemverLintError::MissingHead => ExError::new(ExErrorKind::MissingHead)
                .with_op("discover_versions")
                .with_message("No HEAD reference found in repository"),

            SemverLintError::HeadLookup { message } => ExError::new(ExErrorKind::HeadLookup)
                .with_op("discover_versions")
                .with_message(message),

            SemverLintError::TagListing { message } => ExError::new(ExErrorKind::TagListing)
                .with_op("discover_versions")
                .with_message(message),

            SemverLintError::TagResolution { tag, message } => {
                ExError::new(ExErrorKind::TagResolution)
                    .with_op("discover_versions")
                    .with_entity_id(tag)
                    .with_message(message)
            }

            SemverLintError::Introspection { version, message } => {
                ExError::new(ExErrorKind::Introspection)
                    .with_op("api_for")
                    .with_entity_id(version)
                    .with_message(message)
            }

            SemverLintError::SnapshotRead { path, message } => {
                ExError::new(ExErrorKind::SnapshotRead)
                    .with_op("load_snapshot")
                    .with_entity_id(path)
                    .with_message(message)
            }

            SemverLintError::SnapshotWrite { path, message } => {
                ExError::new(ExErrorKind::SnapshotWrite)
                    .with_op("write_snapshot")
                    .with_entity_id(path)
                    .with_message(message)
            }

            SemverLintError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to SemverLintError
impl From<serde_json::Error> for SemverLintError {
    fn from(err: serde_json::Error) -> Self {
        SemverLintError::Serialization {
            message: err.to_string(),
        }
    }
}
