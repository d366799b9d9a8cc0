//! # Packaging & Logistics Optimizer
//!
//! Derives the shipping-carton dimensions for a configuration, how many
//! units fit per carton, how cartons arrange on a pallet, and how many
//! cartons/pallets the requested quantity needs.
//!
//! ## Packing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Packaging Pipeline                                  │
//! │                                                                         │
//! │  ProductConfiguration                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  carton sizing ──► flat families: sheet stack (w+40)×(h+40)×stack      │
//! │                    3D families:   box (w+40)×(h+40)×(d+40)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  units per carton ──► flat: stack depth ÷ thickness, capped at 50      │
//! │                       3D: best of 6 axis orientations in the           │
//! │                           600×400×400 envelope (+10 mm clearance)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pallet layer ──► cartons per 1200×800 layer (width↔depth swap         │
//! │                   trial) × layers under 1656 mm clearance              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  rollup ──► cartons required, pallets required, shipped weight         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Known limitation (by contract)
//! The 3D orientation search is a greedy upper-bound heuristic: it picks the
//! best single orientation per axis count, but does not prove that a real
//! carton can be packed that way (units inside one carton cannot mix
//! orientations). Real packing efficiency may be lower. This is the agreed
//! estimating rule, not a bug.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Dimensions, ProductConfiguration};

// =============================================================================
// Packaging Constants
// =============================================================================

/// Carton wall allowance added around the product, per axis.
pub const CARTON_MARGIN_MM: f64 = 40.0;

/// Padding clearance per axis in the orientation search.
pub const ORIENTATION_CLEARANCE_MM: f64 = 10.0;

/// Largest carton the shop stocks (internal envelope).
pub const MAX_CARTON_ENVELOPE_MM: [f64; 3] = [600.0, 400.0, 400.0];

/// Ceiling on the stacked-sheet carton depth.
pub const MAX_FLAT_STACK_MM: f64 = 400.0;

/// Minimum carton depth even for a single thin sheet.
pub const MIN_FLAT_STACK_MM: f64 = 50.0;

/// Sheets per carton cap, whatever the thickness.
pub const MAX_SHEETS_PER_CARTON: u32 = 50;

/// Euro pallet footprint.
pub const PALLET_WIDTH_MM: f64 = 1200.0;
pub const PALLET_DEPTH_MM: f64 = 800.0;

/// Maximum stack height above the pallet deck.
pub const PALLET_MAX_HEIGHT_MM: f64 = 1656.0;

/// Areal density used to estimate carton weight from carton surface.
pub const CARTON_KG_PER_M2: f64 = 0.8;

// =============================================================================
// Packaging Plan
// =============================================================================

/// The physical packing plan for one quote line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PackagingPlan {
    /// Outer carton dimensions in mm.
    pub carton: Dimensions,

    /// Carton board surface in m² (all six faces).
    pub carton_surface_m2: f64,

    /// Estimated empty carton weight.
    pub carton_weight_kg: f64,

    /// Units per carton — an upper-bound estimate for 3D products, see the
    /// module notes.
    pub units_per_carton: u32,

    /// `ceil(quantity / units_per_carton)`.
    pub cartons_required: u32,

    /// Cartons per pallet layer in the best footprint orientation.
    pub cartons_per_layer: u32,

    /// Carton layers under the pallet height clearance.
    pub pallet_layers: u32,

    /// `ceil(cartons_required / (cartons_per_layer × pallet_layers))`.
    pub pallets_required: u32,

    /// Product weight plus carton tare for the whole line.
    pub total_shipped_weight_kg: f64,
}

// =============================================================================
// Planner
// =============================================================================

/// Builds the packing plan for a configuration.
///
/// Pure; the caller has already gated on a positive quantity and dimensions.
pub fn plan_packaging(config: &ProductConfiguration, unit_weight_kg: f64) -> PackagingPlan {
    let dims = &config.dimensions;
    let quantity = config.quantity.max(1);

    let (carton, units_per_carton) = if config.product.family().is_flat() {
        flat_carton(dims, config.thickness_mm, quantity)
    } else {
        let carton = Dimensions::new(
            dims.width_mm + CARTON_MARGIN_MM,
            dims.height_mm + CARTON_MARGIN_MM,
            dims.depth_mm + CARTON_MARGIN_MM,
        );
        (carton, units_per_carton_3d(dims, config.thickness_mm))
    };

    let cartons_required = quantity.div_ceil(units_per_carton);

    let (cartons_per_layer, pallet_layers) = pallet_arrangement(&carton);
    let per_pallet = cartons_per_layer * pallet_layers;
    let pallets_required = cartons_required.div_ceil(per_pallet);

    let carton_surface_m2 = box_surface_m2(&carton);
    let carton_weight_kg = carton_surface_m2 * CARTON_KG_PER_M2;
    let total_shipped_weight_kg =
        unit_weight_kg * f64::from(quantity) + carton_weight_kg * f64::from(cartons_required);

    PackagingPlan {
        carton,
        carton_surface_m2,
        carton_weight_kg,
        units_per_carton,
        cartons_required,
        cartons_per_layer,
        pallet_layers,
        pallets_required,
        total_shipped_weight_kg,
    }
}

/// Sheet-stack carton for flat products.
///
/// Depth is sized for the sheets one carton actually holds, so it never
/// exceeds the stack ceiling the per-carton count is derived from.
fn flat_carton(dims: &Dimensions, thickness_mm: f64, quantity: u32) -> (Dimensions, u32) {
    let units = units_per_carton_flat(thickness_mm);
    let sheets_in_carton = quantity.min(units);
    let depth = (thickness_mm * f64::from(sheets_in_carton) + 20.0).max(MIN_FLAT_STACK_MM);

    let carton = Dimensions::new(
        dims.width_mm + CARTON_MARGIN_MM,
        dims.height_mm + CARTON_MARGIN_MM,
        depth,
    );
    (carton, units)
}

/// Sheets per carton: stack depth budget over thickness, clamped to [1, 50].
fn units_per_carton_flat(thickness_mm: f64) -> u32 {
    if thickness_mm <= 0.0 {
        return 1;
    }
    let fit = ((MAX_FLAT_STACK_MM - 20.0) / thickness_mm).floor() as u32;
    fit.clamp(1, MAX_SHEETS_PER_CARTON)
}

/// Units per carton for 3D products: best of all six axis orientations
/// against the maximum carton envelope, each axis padded with clearance.
///
/// Upper-bound heuristic — see the module notes.
fn units_per_carton_3d(dims: &Dimensions, thickness_mm: f64) -> u32 {
    // A zero depth (open-backed signs) still occupies at least the sheet
    // thickness in the stack.
    let product = [
        dims.width_mm.max(thickness_mm),
        dims.height_mm.max(thickness_mm),
        dims.depth_mm.max(thickness_mm),
    ];

    const PERMUTATIONS: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    let mut best = 0u32;
    for perm in PERMUTATIONS {
        let mut fit = 1u32;
        for axis in 0..3 {
            let padded = product[perm[axis]] + ORIENTATION_CLEARANCE_MM;
            fit = fit.saturating_mul((MAX_CARTON_ENVELOPE_MM[axis] / padded).floor() as u32);
        }
        best = best.max(fit);
    }
    best.max(1)
}

/// Cartons per pallet layer and layer count.
///
/// Tries the carton footprint as-is and with width↔depth swapped, and keeps
/// the orientation that maximizes cartons per pallet. Oversize cartons clamp
/// to one per layer (quoted as oversize freight).
fn pallet_arrangement(carton: &Dimensions) -> (u32, u32) {
    let layers = ((PALLET_MAX_HEIGHT_MM / carton.height_mm).floor() as u32).max(1);

    let straight = footprint_fit(carton.width_mm, carton.depth_mm);
    let swapped = footprint_fit(carton.depth_mm, carton.width_mm);
    let per_layer = straight.max(swapped).max(1);

    (per_layer, layers)
}

fn footprint_fit(carton_w: f64, carton_d: f64) -> u32 {
    let across = (PALLET_WIDTH_MM / carton_w).floor() as u32;
    let deep = (PALLET_DEPTH_MM / carton_d).floor() as u32;
    across.saturating_mul(deep)
}

/// All six faces of a carton, in m².
fn box_surface_m2(carton: &Dimensions) -> f64 {
    let (w, h, d) = (carton.w(), carton.h(), carton.d());
    2.0 * (w * h + w * d + h * d)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CaseParams, ProductSpec};

    fn flat_config(w: f64, h: f64, t: f64, quantity: u32) -> ProductConfiguration {
        ProductConfiguration {
            product: ProductSpec::FlatPanel,
            material_id: "acrylic-clear".to_string(),
            thickness_mm: t,
            dimensions: Dimensions::new(w, h, 0.0),
            quantity,
            options: vec![],
        }
    }

    fn box_config(w: f64, h: f64, d: f64, quantity: u32) -> ProductConfiguration {
        ProductConfiguration {
            product: ProductSpec::DisplayCase(CaseParams::default()),
            material_id: "acrylic-clear".to_string(),
            thickness_mm: 3.0,
            dimensions: Dimensions::new(w, h, d),
            quantity,
            options: vec![],
        }
    }

    #[test]
    fn test_flat_units_per_carton() {
        // floor((400−20)/3) = 126, capped at 50 sheets.
        assert_eq!(units_per_carton_flat(3.0), 50);
        // floor(380/10) = 38.
        assert_eq!(units_per_carton_flat(10.0), 38);
        // Thick slab still ships one per carton.
        assert_eq!(units_per_carton_flat(500.0), 1);
    }

    #[test]
    fn test_flat_carton_sized_for_contained_stack() {
        let plan = plan_packaging(&flat_config(1000.0, 1000.0, 10.0, 5), 3.0);
        assert_eq!(plan.carton.width_mm, 1040.0);
        assert_eq!(plan.carton.height_mm, 1040.0);
        // 5 sheets × 10 mm + 20 padding.
        assert_eq!(plan.carton.depth_mm, 70.0);
    }

    #[test]
    fn test_flat_carton_minimum_depth() {
        let plan = plan_packaging(&flat_config(500.0, 400.0, 2.0, 1), 0.5);
        assert_eq!(plan.carton.depth_mm, MIN_FLAT_STACK_MM);
    }

    #[test]
    fn test_3d_carton_adds_margin() {
        let plan = plan_packaging(&box_config(300.0, 200.0, 150.0, 1), 1.0);
        assert_eq!(plan.carton.width_mm, 340.0);
        assert_eq!(plan.carton.height_mm, 240.0);
        assert_eq!(plan.carton.depth_mm, 190.0);
    }

    #[test]
    fn test_orientation_search_finds_best_axis_assignment() {
        // 90×180×380 against 600×400×400 with 10 mm clearance:
        //   (90,180,380) → 6×2×1 = 12, the best of the six orientations.
        let dims = Dimensions::new(90.0, 180.0, 380.0);
        assert_eq!(units_per_carton_3d(&dims, 3.0), 12);
    }

    #[test]
    fn test_cartons_required_rounds_up() {
        // Quantity 37 at 12 per carton → 4 cartons.
        let plan = plan_packaging(&box_config(90.0, 180.0, 380.0, 37), 0.5);
        assert_eq!(plan.units_per_carton, 12);
        assert_eq!(plan.cartons_required, 4);
    }

    #[test]
    fn test_oversized_product_ships_one_per_carton() {
        let dims = Dimensions::new(900.0, 900.0, 900.0);
        assert_eq!(units_per_carton_3d(&dims, 3.0), 1);
    }

    #[test]
    fn test_pallet_arrangement_tries_swapped_footprint() {
        // Carton 500 wide × 300 high × 390 deep:
        //   straight: floor(1200/500)×floor(800/390) = 2×2 = 4
        //   swapped:  floor(1200/390)×floor(800/500) = 3×1 = 3
        let (per_layer, layers) = pallet_arrangement(&Dimensions::new(500.0, 300.0, 390.0));
        assert_eq!(per_layer, 4);
        assert_eq!(layers, 5); // floor(1656/300)
    }

    #[test]
    fn test_oversize_carton_clamps_to_one_per_layer() {
        let (per_layer, layers) = pallet_arrangement(&Dimensions::new(1500.0, 2000.0, 900.0));
        assert_eq!(per_layer, 1);
        assert_eq!(layers, 1);
    }

    #[test]
    fn test_packaging_consistency_invariants() {
        for quantity in [1u32, 7, 37, 250] {
            let plan = plan_packaging(&box_config(90.0, 180.0, 380.0, quantity), 0.75);
            assert!(plan.cartons_required * plan.units_per_carton >= quantity);
            assert!(
                plan.pallets_required * plan.cartons_per_layer * plan.pallet_layers
                    >= plan.cartons_required
            );
        }
    }

    #[test]
    fn test_shipped_weight_includes_carton_tare() {
        let plan = plan_packaging(&box_config(300.0, 200.0, 150.0, 10), 0.8);
        let expected =
            0.8 * 10.0 + plan.carton_weight_kg * f64::from(plan.cartons_required);
        assert!((plan.total_shipped_weight_kg - expected).abs() < 1e-9);
        assert!(plan.carton_weight_kg > 0.0);
    }
}
