/// Loading/success/error wrapper handed to UI consumers by the repositories.
///
/// This type exists only at the use-case boundary; the session and HTTP layers
/// below it work with plain `Result` values.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    /// Data is being fetched.
    Loading,
    /// Successful result with a user-facing message and the payload.
    Success { message: String, data: T },
    /// Failure with a user-facing message and an optional underlying cause.
    Error {
        message: String,
        cause: Option<String>,
    },
}

impl<T> Resource<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Resource::Success {
            message: message.into(),
            data,
        }
    }

    pub fn error(message: impl Into<String>, cause: Option<String>) -> Self {
        Resource::Error {
            message: message.into(),
            cause,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Resource::Success { .. })
    }

    /// The payload, if this is a success.
    pub fn data(&self) -> Option<&T> {
        match self {
            Resource::Success { data, .. } => Some(data),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_accessors() {
        let ok: Resource<i32> = Resource::success("fetched", 7);
        assert!(ok.is_success());
        assert_eq!(ok.data(), Some(&7));

        let err: Resource<i32> = Resource::error("boom", Some("cause".to_string()));
        assert!(!err.is_success());
        assert_eq!(err.data(), None);

        let loading: Resource<i32> = Resource::Loading;
        assert!(!loading.is_success());
    }
}
