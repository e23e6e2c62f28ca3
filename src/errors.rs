use std::collections::TryReserveError;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid 'Location' header URL: {0}")]
    InvalidLocationUrl(String),

    #[error("Out of memory while building header list")]
    ResourceExhaustion(#[from] TryReserveError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reserve_everything() -> Result<(), FetchError> {
        let mut bytes: Vec<u8> = Vec::new();
        bytes.try_reserve(usize::MAX)?;
        Ok(())
    }

    #[test]
    fn allocation_failure_becomes_resource_exhaustion() {
        let err = reserve_everything().unwrap_err();
        assert!(matches!(err, FetchError::ResourceExhaustion(_)));
        assert_eq!(err.to_string(), "Out of memory while building header list");
    }

    #[test]
    fn invalid_location_message() {
        let err = FetchError::InvalidLocationUrl("relative URL without a base".into());
        assert_eq!(err.to_string(), "Invalid 'Location' header URL: relative URL without a base");
    }
}
