use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum MinifyErrorKind {
    Io(std::io::Error),
    /// The file starts with a UTF-16/UTF-32 BOM-like pattern.
    UnsupportedEncoding,
    Parse(String),
}

/// Driver-level failure. The minification core itself is tolerant and
/// never fails; errors arise from the filesystem around it.
#[derive(Debug)]
pub struct MinifyError {
    pub kind: MinifyErrorKind,
    pub path: Option<PathBuf>,
}

impl MinifyError {
    pub fn new(kind: MinifyErrorKind) -> Self {
        Self { kind, path: None }
    }

    pub fn io(path: &Path, err: std::io::Error) -> Self {
        Self {
            kind: MinifyErrorKind::Io(err),
            path: Some(path.to_path_buf()),
        }
    }

    pub fn encoding(path: &Path) -> Self {
        Self {
            kind: MinifyErrorKind::UnsupportedEncoding,
            path: Some(path.to_path_buf()),
        }
    }

    #[cfg(feature = "serde")]
    pub fn from_serde(what: &str, err: serde_json::Error) -> Self {
        Self::new(MinifyErrorKind::Parse(format!(
            "serde_json {} error: {}",
            what, err
        )))
    }
}

impl fmt::Display for MinifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(p) = &self.path {
            write!(f, "{}: ", p.display())?;
        }
        match &self.kind {
            MinifyErrorKind::Io(e) => write!(f, "{}", e),
            MinifyErrorKind::UnsupportedEncoding => {
                write!(f, "only UTF-8 input is currently supported")
            }
            MinifyErrorKind::Parse(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for MinifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            MinifyErrorKind::Io(e) => Some(e),
            _ => None,
        }
    }
}
