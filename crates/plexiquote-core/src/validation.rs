//! # Validation Module
//!
//! Input validation for the quoting engine's edges.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Quoting UI                                                   │
//! │  ├── Basic format checks (empty, numeric)                              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE — business rule validation                       │
//! │  ├── Positive dimensions within plausible fabrication range            │
//! │  ├── Quantity and discount caps                                        │
//! │  └── Thickness against the material's stocked gauges                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine completeness gate                                     │
//! │  └── compute_line_item returns None for anything still incomplete      │
//! │                                                                         │
//! │  The engine never panics on bad input; these validators exist so the   │
//! │  UI can report WHY a field is rejected instead of just "no price".     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use plexiquote_core::validation::{validate_dimension_mm, validate_quantity};
//!
//! validate_dimension_mm("width", 300.0).unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::catalog::MaterialDef;
use crate::error::ValidationError;
use crate::{MAX_DIMENSION_MM, MAX_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a single dimension in millimetres.
///
/// ## Rules
/// - Must be finite and positive (> 0)
/// - Must not exceed MAX_DIMENSION_MM (largest sheet the shop can process)
pub fn validate_dimension_mm(field: &str, value_mm: f64) -> ValidationResult<()> {
    if !value_mm.is_finite() || value_mm <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    if value_mm > MAX_DIMENSION_MM {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: MAX_DIMENSION_MM,
        });
    }

    Ok(())
}

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_QUANTITY (9999)
pub fn validate_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1.0,
            max: f64::from(MAX_QUANTITY),
        });
    }

    Ok(())
}

/// Validates a discount percentage.
///
/// ## Rules
/// - Must be between 0 and 100 inclusive
/// - Zero is allowed (no discount)
pub fn validate_discount_pct(pct: f64) -> ValidationResult<()> {
    if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0.0,
            max: 100.0,
        });
    }

    Ok(())
}

// =============================================================================
// Catalog-Aware Validators
// =============================================================================

/// Validates a thickness against a material's stocked gauges.
///
/// ## Rules
/// - Must be positive (> 0)
/// - For fixed-thickness materials (cast colored acrylic, composites),
///   must be one of the stocked gauges exactly
pub fn validate_thickness(material: &MaterialDef, thickness_mm: f64) -> ValidationResult<()> {
    if !thickness_mm.is_finite() || thickness_mm <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "thickness".to_string(),
        });
    }

    if !material.allows_thickness(thickness_mm) {
        return Err(ValidationError::ThicknessNotAvailable {
            material_id: material.id.clone(),
            thickness_mm,
            allowed: material.fixed_thicknesses_mm.clone().unwrap_or_default(),
        });
    }

    Ok(())
}

/// Validates a catalog id reference.
///
/// ## Rules
/// - Must not be empty after trimming
pub fn validate_catalog_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
