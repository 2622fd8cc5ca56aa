/// A shared input that may legitimately be missing or empty.
///
/// Stages branch on this instead of treating an absent corpus or index as an
/// error; the dependent stage simply produces empty output.
#[derive(Debug, Clone)]
pub enum Resource<T> {
    Ready(T),
    Unavailable { reason: String },
}

impl<T> Resource<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Unavailable { reason } => Some(reason),
        }
    }
}
