use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("required field `{field}` is missing")]
    MissingField { field: &'static str },
    #[error("invalid calendar date `{value}` (expected YYYY-MM-DD)")]
    InvalidDate { value: String },
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

/// Rejections raised while converting backend records into domain records.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("product `{product_id}` has unknown marketplace `{value}`")]
    UnknownMarketplace { product_id: String, value: String },
    #[error("product `{product_id}` has unknown review source `{value}`")]
    UnknownReviewSource { product_id: String, value: String },
    #[error("product `{product_id}` has inverted age range {min_age}..={max_age}")]
    InvalidAgeRange { product_id: String, min_age: u32, max_age: u32 },
    #[error("review `{review_id}` has rating {rating} outside 1..=5")]
    InvalidRating { review_id: String, rating: u8 },
    #[error("product `{product_id}` has average rating {value} outside 0..=5")]
    InvalidAverageRating { product_id: String, value: String },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error("{resource} `{id}` was not found")]
    NotFound { resource: &'static str, id: String },
    #[error("transient network failure during `{operation}`")]
    TransientNetwork { operation: &'static str },
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("not found: {message}")]
    NotFound { message: String, correlation_id: String },
    #[error("service unavailable: {message}")]
    ServiceUnavailable { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl ApplicationError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { resource, id: id.into() }
    }

    /// Injected network failures are the only errors a caller should retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientNetwork { .. })
    }

    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::NotFound { correlation_id: id, .. }
            | InterfaceError::ServiceUnavailable { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "Some of the provided details are invalid.",
            Self::NotFound { .. } => "This gift is no longer available.",
            Self::ServiceUnavailable { .. } => {
                "The service is temporarily unavailable. Please retry shortly."
            }
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        let correlation_id = "unassigned".to_owned();
        match value {
            ApplicationError::Domain(error) => {
                Self::BadRequest { message: error.to_string(), correlation_id }
            }
            ApplicationError::NotFound { .. } => {
                Self::NotFound { message: value.to_string(), correlation_id }
            }
            ApplicationError::TransientNetwork { .. } | ApplicationError::Persistence(_) => {
                Self::ServiceUnavailable { message: value.to_string(), correlation_id }
            }
            ApplicationError::Mapping(error) => {
                Self::Internal { message: error.to_string(), correlation_id }
            }
            ApplicationError::Configuration(message) => Self::Internal { message, correlation_id },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::{ApplicationError, DomainError, InterfaceError, MappingError};

    #[test]
    fn missing_field_maps_to_bad_request_interface_error() {
        let interface = ApplicationError::from(DomainError::MissingField { field: "budget" })
            .into_interface("req-1");

        assert!(matches!(
            interface,
            InterfaceError::BadRequest {
                ref correlation_id,
                ref message,
            } if correlation_id == "req-1" && message.contains("budget")
        ));
    }

    #[test]
    fn invalid_date_gets_a_neutral_bad_request_message() {
        let interface = ApplicationError::from(DomainError::InvalidDate { value: "31.12".into() })
            .into_interface("req-5");

        assert!(matches!(
            interface,
            InterfaceError::BadRequest { ref message, .. } if message.contains("31.12")
        ));
        assert_eq!(interface.user_message(), "Some of the provided details are invalid.");
    }

    #[test]
    fn not_found_keeps_product_id_in_message() {
        let interface = ApplicationError::not_found("product", "999").into_interface("req-2");

        assert!(matches!(
            interface,
            InterfaceError::NotFound { ref message, .. } if message.contains("999")
        ));
        assert_eq!(interface.user_message(), "This gift is no longer available.");
    }

    #[test]
    fn transient_network_is_the_only_retryable_error() {
        assert!(ApplicationError::TransientNetwork { operation: "get_products_by_ids" }
            .is_retryable());
        assert!(!ApplicationError::not_found("product", "1").is_retryable());
        assert!(!ApplicationError::Persistence("disk full".to_owned()).is_retryable());
    }

    #[test]
    fn transient_network_maps_to_service_unavailable() {
        let interface = ApplicationError::TransientNetwork { operation: "get_products_by_ids" }
            .into_interface("req-3");

        assert!(matches!(interface, InterfaceError::ServiceUnavailable { .. }));
        assert_eq!(
            interface.user_message(),
            "The service is temporarily unavailable. Please retry shortly."
        );
    }

    #[test]
    fn mapping_error_maps_to_internal() {
        let interface = ApplicationError::from(MappingError::UnknownMarketplace {
            product_id: "7".to_owned(),
            value: "eBay".to_owned(),
        })
        .into_interface("req-4");

        assert!(matches!(interface, InterfaceError::Internal { .. }));
        assert_eq!(interface.user_message(), "An unexpected internal error occurred.");
    }
}
