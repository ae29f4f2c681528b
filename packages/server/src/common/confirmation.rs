use serde::Serialize;

/// A completed write plus the message shown to the user.
#[derive(Debug, Clone, Serialize)]
pub struct Confirmed<T> {
    pub level: &'static str,
    pub message: String,
    pub data: T,
}

impl<T> Confirmed<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            level: "success",
            message: message.into(),
            data,
        }
    }
}
