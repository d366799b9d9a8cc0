//! # Error Types
//!
//! Domain-specific error types for plexiquote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  plexiquote-core errors (this file)                                    │
//! │  ├── CoreError        - Offer/engine domain errors                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Host application errors (outside this crate)                          │
//! │  └── ApiError         - What the quoting UI sees (serialized)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Sales UI               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Where errors do NOT appear
//! The calculation pipeline itself never errors: an incomplete or
//! inconsistent configuration yields `None` from `compute_line_item`, and an
//! unknown catalog id contributes zero cost. Errors are reserved for the
//! edges — the `Offer` aggregate and the input-collection validators.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (material id, line id, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Offer-level and engine-edge errors.
///
/// These represent business rule violations raised when the host drives the
/// `Offer` aggregate. They should be caught and translated to user-friendly
/// messages by the UI layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The configuration cannot be priced yet.
    ///
    /// ## When This Occurs
    /// - Required fields (material, positive dimensions) are absent
    /// - Thickness is outside a fixed-thickness material's allowed set
    ///
    /// Raised only when a host tries to *freeze* such a configuration into
    /// an offer line; mid-edit the engine simply returns `None`.
    #[error("Configuration is incomplete: {reason}")]
    IncompleteConfiguration { reason: String },

    /// Offer line cannot be found for removal.
    #[error("Offer line not found: {0}")]
    LineNotFound(String),

    /// Offer has exceeded the maximum allowed lines.
    #[error("Offer cannot have more than {max} lines")]
    OfferTooLarge { max: usize },

    /// Requested quantity exceeds the maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u32, max: u32 },

    /// Delivery region id is not present in the tariff table.
    #[error("Delivery region not found: {0}")]
    RegionNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Per the engine's failure policy, out-of-range numeric input is clamped or
/// rejected at the input-collection layer; these are the errors that layer
/// reports. The pure engine never raises them.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Material restricts thickness to a fixed set and the value is not in it.
    #[error("thickness {thickness_mm} mm is not available for {material_id}: allowed {allowed:?}")]
    ThicknessNotAvailable {
        material_id: String,
        thickness_mm: f64,
        allowed: Vec<f64>,
    },

    /// Referenced catalog id does not exist.
    #[error("{field} '{id}' is not in the catalog")]
    UnknownCatalogId { field: String, id: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::QuantityTooLarge {
            requested: 12000,
            max: 9999,
        };
        assert_eq!(
            err.to_string(),
            "Quantity 12000 exceeds maximum allowed (9999)"
        );

        let err = CoreError::IncompleteConfiguration {
            reason: "width must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Configuration is incomplete: width must be positive"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "width".to_string(),
        };
        assert_eq!(err.to_string(), "width must be positive");

        let err = ValidationError::ThicknessNotAvailable {
            material_id: "acrylic-color".to_string(),
            thickness_mm: 4.0,
            allowed: vec![3.0, 5.0, 8.0],
        };
        assert!(err.to_string().contains("acrylic-color"));
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "material".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
