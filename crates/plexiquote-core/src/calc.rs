//! # Line Item Calculation
//!
//! The engine's first entry point: derive everything the offer needs from a
//! single product configuration.
//!
//! ## The Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              compute_line_item(catalog, config)                         │
//! │                                                                         │
//! │  gate ──► surface ──► weight ──► options/material cost ──► unit price  │
//! │                                                        │                │
//! │                                                        ▼                │
//! │                                              packaging plan ──► total  │
//! │                                                                         │
//! │  Each stage consumes only prior stage outputs; options cost always     │
//! │  lands before price composition. Recomputation is cheap, so every      │
//! │  configuration change recomputes the whole Calculation — there is no   │
//! │  partial update and no cached state.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//! `None` means "not yet configured": missing material, non-positive
//! dimensions or quantity, or a thickness a fixed-thickness material does
//! not stock. Nothing here is an error — the UI shows "fill required
//! fields" and gates submission on a priced line.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::packaging::{plan_packaging, PackagingPlan};
use crate::pricing::{price_configuration, unit_weight_kg, CostBreakdown};
use crate::types::ProductConfiguration;

// =============================================================================
// Calculation
// =============================================================================

/// Everything derived from one configuration.
///
/// Never persisted on its own: it lives embedded in the offer line that
/// froze it, and is recomputed from scratch on every configuration change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    /// Exposed surface area of one unit.
    pub surface_m2: f64,

    /// Weight of one unit.
    pub unit_weight_kg: f64,

    /// Cost decomposition of one unit.
    pub breakdown: CostBreakdown,

    /// Price of one unit.
    pub unit_price: f64,

    /// `unit_price × quantity`.
    pub total_price: f64,

    /// Carton/pallet rollup for the requested quantity.
    pub packaging: PackagingPlan,
}

// =============================================================================
// Entry Point
// =============================================================================

/// Computes the full calculation for a configuration, or `None` while the
/// configuration is incomplete.
///
/// Pure and deterministic: identical configurations yield bit-identical
/// results.
pub fn compute_line_item(
    catalog: &Catalog,
    config: &ProductConfiguration,
) -> Option<Calculation> {
    if !is_computable(catalog, config) {
        tracing::debug!(material = %config.material_id, "configuration incomplete, no calculation");
        return None;
    }

    let surface_m2 = config.product.surface_area_m2(&config.dimensions);
    let edge_length_m = config.product.edge_length_m(&config.dimensions);

    let density = catalog
        .material(&config.material_id)
        .map(|m| m.density_kg_m3)?;
    let weight = unit_weight_kg(surface_m2, config.thickness_mm, density);

    let (breakdown, unit_price) =
        price_configuration(catalog, config, surface_m2, edge_length_m)?;

    let packaging = plan_packaging(config, weight);
    let total_price = unit_price * f64::from(config.quantity);

    tracing::debug!(
        family = ?config.product.family(),
        surface_m2,
        unit_price,
        cartons = packaging.cartons_required,
        "line item computed"
    );

    Some(Calculation {
        surface_m2,
        unit_weight_kg: weight,
        breakdown,
        unit_price,
        total_price,
        packaging,
    })
}

/// Completeness gate. Out-of-range input is the input layer's problem; this
/// only distinguishes "configured" from "still being filled in".
fn is_computable(catalog: &Catalog, config: &ProductConfiguration) -> bool {
    if config.quantity == 0 {
        return false;
    }

    let dims = &config.dimensions;
    if dims.width_mm <= 0.0 || dims.height_mm <= 0.0 {
        return false;
    }
    if config.product.needs_depth() && dims.depth_mm <= 0.0 {
        return false;
    }

    if config.thickness_mm <= 0.0 {
        return false;
    }

    match catalog.material(&config.material_id) {
        Some(material) => material.allows_thickness(config.thickness_mm),
        None => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
