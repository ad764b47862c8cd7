use thiserror::Error;

/// Result type alias using SnapguardError
pub type Result<T> = std::result::Result<T, SnapguardError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code. Store failures are split by the
/// step that failed so callers can tell "cannot write" from "cannot read"
/// and both from "no baseline present" (which is not an error at all).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SgErrorKind {
    // Validation
    InvalidInput,
    InvalidConfig,

    // Store
    CreateDir,
    OpenForWrite,
    ShortWrite,
    Read,
    Delete,
    Serialization,

    // Diff rendering
    ExternalProcess,

    // Integration/IO
    Io,

    // Internal
    Internal,
}

impl SgErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            SgErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            SgErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            SgErrorKind::CreateDir => "ERR_CREATE_DIR",
            SgErrorKind::OpenForWrite => "ERR_OPEN_FOR_WRITE",
            SgErrorKind::ShortWrite => "ERR_SHORT_WRITE",
            SgErrorKind::Read => "ERR_READ",
            SgErrorKind::Delete => "ERR_DELETE",
            SgErrorKind::Serialization => "ERR_SERIALIZATION",
            SgErrorKind::ExternalProcess => "ERR_EXTERNAL_PROCESS",
            SgErrorKind::Io => "ERR_IO",
            SgErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the context
/// (operation, fingerprint, path) needed to debug a failed store call.
#[derive(Debug, Clone)]
pub struct SgError {
    kind: SgErrorKind,
    op: Option<String>,
    fingerprint: Option<String>,
    path: Option<String>,
    message: String,
}

impl SgError {
    /// Create a new error with the specified kind
    pub fn new(kind: SgErrorKind) -> Self {
        Self {
            kind,
            op: None,
            fingerprint: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add fingerprint context
    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }

    /// Add filesystem path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> SgErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the fingerprint context, if any
    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for SgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(fingerprint) = &self.fingerprint {
            write!(f, " (fingerprint: {})", fingerprint)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for SgError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for Snapguard operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapguardError {
    /// Fingerprint text is not 40 hex characters
    #[error("Invalid fingerprint '{value}': {reason}")]
    InvalidFingerprint { value: String, reason: String },

    /// Configuration failed to parse or validate
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Diff subprocess could not be run or exited abnormally
    #[error("Diff program '{program}' failed: {reason}")]
    DiffProgramFailed { program: String, reason: String },

    /// Scratch file handling for the diff subprocess failed
    #[error("Scratch file error: {message}")]
    ScratchFile { message: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<SnapguardError> for SgError {
    fn from(err: SnapguardError) -> Self {
        match err {
            SnapguardError::InvalidFingerprint { value, reason } => {
                SgError::new(SgErrorKind::InvalidInput)
                    .with_op("parse_fingerprint")
                    .with_message(format!("'{}': {}", value, reason))
            }
            SnapguardError::InvalidConfig { reason } => SgError::new(SgErrorKind::InvalidConfig)
                .with_op("load_config")
                .with_message(reason),
            SnapguardError::DiffProgramFailed { program, reason } => {
                SgError::new(SgErrorKind::ExternalProcess)
                    .with_op("render_diff")
                    .with_message(format!("{}: {}", program, reason))
            }
            SnapguardError::ScratchFile { message } => SgError::new(SgErrorKind::Io)
                .with_op("render_diff")
                .with_message(message),
            SnapguardError::Serialization { message } => {
                SgError::new(SgErrorKind::Serialization).with_message(message)
            }
            SnapguardError::Internal { message } => {
                SgError::new(SgErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for SnapguardError {
    fn from(err: serde_json::Error) -> Self {
        SnapguardError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SnapguardError {
    fn from(err: toml::de::Error) -> Self {
        SnapguardError::InvalidConfig {
            reason: err.to_string(),
        }
    }
}
