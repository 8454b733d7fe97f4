//! Scroll engine errors

use std::fmt;

/// The five view-tree handles a region needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Viewport,
    Content,
    /// Indicator bar wrapping the track
    Bar,
    Track,
    Thumb,
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandleKind::Viewport => "viewport",
            HandleKind::Content => "content",
            HandleKind::Bar => "bar",
            HandleKind::Track => "track",
            HandleKind::Thumb => "thumb",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScrollError {
    #[error("missing {0} handle")]
    MissingHandle(HandleKind),

    #[error("invalid scroll config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("failed to parse scroll config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("unknown scroll region `{0}`")]
    UnknownRegion(String),

    #[error("scroll region `{0}` is already registered")]
    DuplicateRegion(String),

    #[error("frame host is borrowed; release it before tearing down")]
    HostBusy,
}

pub type Result<T> = std::result::Result<T, ScrollError>;
