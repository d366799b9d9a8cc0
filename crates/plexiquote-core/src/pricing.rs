//! # Cost & Pricing Engine
//!
//! Combines surface, waste fraction, material price, labor fraction, option
//! costs and the per-family multiplier into a unit price and a cost
//! breakdown.
//!
//! ## Two Pricing Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  STANDARD PATH (all families except light-box signs)                    │
//! │                                                                         │
//! │  materialCost = basePrice × thickness × surface × (1 + waste)          │
//! │       × colorSurcharge (tinted stock)                                  │
//! │       × 1.10 (UV-bonded joints)                                        │
//! │       + alternate-bottom material cost (containers)                    │
//! │  wasteCost  = materialCost × waste                                     │
//! │  laborCost  = materialCost × 0.01                                      │
//! │  unitPrice  = (materialCost + laborCost) × multiplier + optionsCost    │
//! │  margin     = unitPrice − material − waste − labor − options           │
//! │                                                                         │
//! │  FIXED-BASE-PRICE PATH (light-box signs, per face variant)             │
//! │                                                                         │
//! │  unitPrice    = rate(face) × surface + optionsCost                     │
//! │  materialCost = rate × surface × 0.4                                   │
//! │  laborCost    = rate × surface × 0.2                                   │
//! │  wasteCost    = materialCost × 0.08                                    │
//! │  margin       = remainder                                              │
//! │                                                                         │
//! │  The two paths share no formula. That divergence is the shop's         │
//! │  flat per-area brand pricing for light boxes — intentional policy,     │
//! │  kept as two explicit code paths.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//! Options cost MUST be computed before the unit price: price composition
//! consumes the options total. `price_configuration` encodes that order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{
    Catalog, OptionPricing, OPT_LED_POWER_SUPPLY, OPT_LED_STRIP_STANDARD, OPT_LED_WATERPROOF,
    OPT_UV_BONDING,
};
use crate::types::{ProductConfiguration, ProductFamily, ProductSpec};

// =============================================================================
// Pricing Constants
// =============================================================================

/// Labor as a fraction of material cost (standard path).
pub const LABOR_FRACTION: f64 = 0.01;

/// Material-cost multiplier when joints are UV-bonded.
pub const UV_BONDING_FACTOR: f64 = 1.10;

/// Waterproofing surcharge on the accumulated LED cost.
pub const LED_WATERPROOF_FACTOR: f64 = 0.15;

/// Material share of the fixed light-box rate.
pub const LIGHT_BOX_MATERIAL_SHARE: f64 = 0.4;

/// Labor share of the fixed light-box rate.
pub const LIGHT_BOX_LABOR_SHARE: f64 = 0.2;

/// Waste fraction applied on the light-box material share.
pub const LIGHT_BOX_WASTE_FRACTION: f64 = 0.08;

// =============================================================================
// Weight
// =============================================================================

/// Unit weight: surface × thickness × density, uniform across families.
#[inline]
pub fn unit_weight_kg(surface_m2: f64, thickness_mm: f64, density_kg_m3: f64) -> f64 {
    surface_m2 * (thickness_mm / 1000.0) * density_kg_m3
}

// =============================================================================
// Cost Breakdown
// =============================================================================

/// Decomposition of one unit's price.
///
/// Invariant (within float tolerance):
/// `material + waste + labor + options + margin == unit price`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub material_cost: f64,
    pub waste_cost: f64,
    pub labor_cost: f64,
    pub options_cost: f64,
    pub margin: f64,
}

impl CostBreakdown {
    /// Sum of all components; equals the unit price by construction.
    pub fn total(&self) -> f64 {
        self.material_cost + self.waste_cost + self.labor_cost + self.options_cost + self.margin
    }
}

// =============================================================================
// Options Cost
// =============================================================================

/// Total cost of the selected options for one unit.
///
/// ## Per-unit rules
/// - per m²: `price × surface`
/// - per meter, finish (edge polish): `price × edge length`
/// - per meter, LED: `price × stripLength`; length comes from the family
///   parameters where the family carries one, else from the option quantity
///   read as centimetres
/// - each / set: `price × selected quantity`
/// - special options carry no direct price here (UV bonding and the
///   alternate bottom act on material cost; waterproofing is applied below)
///
/// ## Derived rules
/// - Any LED cost without an explicitly selected power supply auto-adds the
///   supply exactly once.
/// - The LED-sign family always carries at least the standard strip rate
///   over its strip length, even with no strip variant selected.
/// - Waterproofing adds 15% of the LED cost accumulated so far.
///
/// Unknown option ids contribute zero (catalog and configuration are built
/// from the same tables; a miss means "not configured yet").
pub fn options_cost(
    catalog: &Catalog,
    config: &ProductConfiguration,
    surface_m2: f64,
    edge_length_m: f64,
) -> f64 {
    let mut total = 0.0;
    let mut led_cost = 0.0;
    let mut led_selected = false;
    let mut strip_selected = false;

    for sel in &config.options {
        let Some(def) = catalog.option(&sel.option_id) else {
            tracing::debug!(option_id = %sel.option_id, "unknown option id, contributing zero");
            continue;
        };

        let cost = match def.pricing {
            OptionPricing::PerSquareMeter => def.unit_price * surface_m2,
            OptionPricing::PerMeter if def.led_related => {
                let length_cm = config.product.led_length_cm().unwrap_or(sel.quantity);
                strip_selected = true;
                def.unit_price * (length_cm / 100.0)
            }
            OptionPricing::PerMeter => def.unit_price * edge_length_m,
            OptionPricing::Each | OptionPricing::Set => def.unit_price * sel.quantity,
            // Handled by the material path or the post-pass below.
            OptionPricing::Special => 0.0,
        };

        total += cost;
        if def.led_related && def.pricing != OptionPricing::Special {
            led_cost += cost;
            led_selected = true;
        }
    }

    // LED signs are never quoted without strip cost: charge the standard
    // rate over the configured length when no variant was picked.
    if config.product.family() == ProductFamily::LedSign && !strip_selected {
        if let Some(standard) = catalog.option(OPT_LED_STRIP_STANDARD) {
            let length_cm = config.product.led_length_cm().unwrap_or(0.0);
            let minimum = standard.unit_price * (length_cm / 100.0);
            total += minimum;
            led_cost += minimum;
            led_selected = true;
        }
    }

    // A lit product needs a driver: auto-add the supply when LED cost exists
    // and the rep did not add one explicitly.
    if led_selected && !config.has_option(OPT_LED_POWER_SUPPLY) {
        if let Some(supply) = catalog.option(OPT_LED_POWER_SUPPLY) {
            total += supply.unit_price;
            led_cost += supply.unit_price;
        }
    }

    if config.has_option(OPT_LED_WATERPROOF) {
        total += LED_WATERPROOF_FACTOR * led_cost;
    }

    total
}

// =============================================================================
// Material Cost (standard path)
// =============================================================================

/// Material cost for one unit on the standard path, including the color
/// surcharge, UV-bonding factor and any alternate-bottom material.
///
/// Returns `None` when the material id is not in the catalog (incomplete
/// configuration). An unknown alternate-bottom material contributes zero.
fn material_cost(
    catalog: &Catalog,
    config: &ProductConfiguration,
    surface_m2: f64,
    waste_fraction: f64,
) -> Option<f64> {
    let material = catalog.material(&config.material_id)?;

    let mut cost =
        material.base_price_per_m2_mm * config.thickness_mm * surface_m2 * (1.0 + waste_fraction);
    cost *= material.surcharge();

    if config.has_option(OPT_UV_BONDING) {
        cost *= UV_BONDING_FACTOR;
    }

    // Containers may cut the bottom from a second material; that panel left
    // the main surface and is costed here with its own thickness and its
    // own surcharge rule.
    if let ProductSpec::Container(params) = &config.product {
        if let Some(ab) = &params.alt_bottom {
            match catalog.material(&ab.material_id) {
                Some(bottom) => {
                    let bottom_area = config.dimensions.w() * config.dimensions.d();
                    cost += bottom.base_price_per_m2_mm
                        * ab.thickness_mm
                        * bottom_area
                        * (1.0 + waste_fraction)
                        * bottom.surcharge();
                }
                None => {
                    tracing::debug!(
                        material_id = %ab.material_id,
                        "unknown alternate-bottom material, contributing zero"
                    );
                }
            }
        }
    }

    Some(cost)
}

// =============================================================================
// Price Composition
// =============================================================================

/// Prices one unit of the configuration: cost breakdown plus unit price.
///
/// Pure. Returns `None` when the product type or material cannot be
/// resolved — the "not yet configured" case, never an error.
pub fn price_configuration(
    catalog: &Catalog,
    config: &ProductConfiguration,
    surface_m2: f64,
    edge_length_m: f64,
) -> Option<(CostBreakdown, f64)> {
    // Options total first: unit price composition consumes it.
    let options = options_cost(catalog, config, surface_m2, edge_length_m);

    if let ProductSpec::LightBoxSign(params) = &config.product {
        // Fixed-base-price path: flat per-m² brand rate by face variant.
        let rate = catalog.light_box_rate(params.face);
        let unit_price = rate * surface_m2 + options;
        let material = rate * surface_m2 * LIGHT_BOX_MATERIAL_SHARE;
        let labor = rate * surface_m2 * LIGHT_BOX_LABOR_SHARE;
        let waste = material * LIGHT_BOX_WASTE_FRACTION;
        let margin = unit_price - material - waste - labor - options;

        return Some((
            CostBreakdown {
                material_cost: material,
                waste_cost: waste,
                labor_cost: labor,
                options_cost: options,
                margin,
            },
            unit_price,
        ));
    }

    let type_def = catalog.product_type(config.product.family())?;
    let material = material_cost(catalog, config, surface_m2, type_def.waste_fraction)?;

    let waste = material * type_def.waste_fraction;
    let labor = material * LABOR_FRACTION;
    let unit_price = (material + labor) * type_def.price_multiplier + options;
    let margin = unit_price - material - waste - labor - options;

    Some((
        CostBreakdown {
            material_cost: material,
            waste_cost: waste,
            labor_cost: labor,
            options_cost: options,
            margin,
        },
        unit_price,
    ))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OPT_ALT_BOTTOM;
    use crate::types::{
        AltBottom, ContainerParams, Dimensions, LedSignParams, LightBoxFace, LightBoxParams,
        SelectedOption,
    };

    const EPS: f64 = 1e-6;

    fn flat_panel_config() -> ProductConfiguration {
        ProductConfiguration {
            product: ProductSpec::FlatPanel,
            material_id: "acrylic-clear".to_string(),
            thickness_mm: 3.0,
            dimensions: Dimensions::new(1000.0, 1000.0, 0.0),
            quantity: 1,
            options: vec![],
        }
    }

    fn price(config: &ProductConfiguration) -> (CostBreakdown, f64) {
        let catalog = Catalog::standard();
        let surface = config.product.surface_area_m2(&config.dimensions);
        let edge = config.product.edge_length_m(&config.dimensions);
        price_configuration(&catalog, config, surface, edge).unwrap()
    }

    #[test]
    fn test_unit_weight_reference_case() {
        // 0.225 m² × 3 mm × 1190 kg/m³ = 0.80325 kg
        let w = unit_weight_kg(0.225, 3.0, 1190.0);
        assert!((w - 0.80325).abs() < EPS);
    }

    #[test]
    fn test_flat_panel_standard_path_reference_case() {
        // base 30, thickness 3, surface 1.0, waste 5%, multiplier 1.7
        let (breakdown, unit_price) = price(&flat_panel_config());

        assert!((breakdown.material_cost - 94.5).abs() < EPS);
        assert!((breakdown.waste_cost - 4.725).abs() < EPS);
        assert!((breakdown.labor_cost - 0.945).abs() < EPS);
        assert!((breakdown.options_cost - 0.0).abs() < EPS);
        assert!((unit_price - 162.2565).abs() < EPS);
    }

    #[test]
    fn test_breakdown_conserves_unit_price() {
        let mut config = flat_panel_config();
        config.options = vec![
            SelectedOption::new("edge-polish"),
            SelectedOption::with_quantity("drill-hole", 4.0),
        ];
        let (breakdown, unit_price) = price(&config);
        assert!((breakdown.total() - unit_price).abs() < EPS);
    }

    #[test]
    fn test_color_surcharge_applies_before_derivation() {
        let mut config = flat_panel_config();
        config.material_id = "acrylic-color".to_string();
        let (breakdown, _) = price(&config);

        // base 34 × 3 × 1.0 × 1.05 = 107.1, then ×1.4 surcharge
        let expected_material = 107.1 * 1.4;
        assert!((breakdown.material_cost - expected_material).abs() < EPS);
        // Waste and labor derive from the surcharged material cost.
        assert!((breakdown.waste_cost - expected_material * 0.05).abs() < EPS);
        assert!((breakdown.labor_cost - expected_material * 0.01).abs() < EPS);
    }

    #[test]
    fn test_uv_bonding_multiplies_material_cost() {
        let mut config = flat_panel_config();
        config.options = vec![SelectedOption::new(OPT_UV_BONDING)];
        let (breakdown, _) = price(&config);
        assert!((breakdown.material_cost - 94.5 * 1.10).abs() < EPS);
    }

    #[test]
    fn test_alt_bottom_adds_second_material_cost() {
        let config = ProductConfiguration {
            product: ProductSpec::Container(ContainerParams {
                lid: false,
                partition_count: 0,
                alt_bottom: Some(AltBottom {
                    material_id: "pvc-foam".to_string(),
                    thickness_mm: 5.0,
                }),
            }),
            material_id: "acrylic-clear".to_string(),
            thickness_mm: 3.0,
            dimensions: Dimensions::new(300.0, 200.0, 150.0),
            quantity: 1,
            options: vec![SelectedOption::new(OPT_ALT_BOTTOM)],
        };
        let (breakdown, _) = price(&config);

        // Main body: surface without bottom = 0.225 − 0.045 = 0.18 m²
        let body = 30.0 * 3.0 * 0.18 * 1.10;
        // Bottom: pvc-foam 14 × 5 mm × 0.045 m² × 1.10
        let bottom = 14.0 * 5.0 * 0.045 * 1.10;
        assert!((breakdown.material_cost - (body + bottom)).abs() < EPS);
    }

    #[test]
    fn test_led_option_auto_adds_power_supply_once() {
        let mut config = flat_panel_config();
        // Strip length on a family without an LED length parameter: the
        // option quantity is the length in cm.
        config.options = vec![SelectedOption::with_quantity(OPT_LED_STRIP_STANDARD, 200.0)];

        let catalog = Catalog::standard();
        let cost = options_cost(&catalog, &config, 1.0, 4.0);
        // 9 × 2 m strip + 25 auto supply
        assert!((cost - (18.0 + 25.0)).abs() < EPS);
    }

    #[test]
    fn test_explicit_power_supply_not_doubled() {
        let mut config = flat_panel_config();
        config.options = vec![
            SelectedOption::with_quantity(OPT_LED_STRIP_STANDARD, 200.0),
            SelectedOption::new(OPT_LED_POWER_SUPPLY),
        ];

        let catalog = Catalog::standard();
        let cost = options_cost(&catalog, &config, 1.0, 4.0);
        assert!((cost - (18.0 + 25.0)).abs() < EPS);
    }

    #[test]
    fn test_led_sign_minimum_strip_cost() {
        let config = ProductConfiguration {
            product: ProductSpec::LedSign(LedSignParams {
                led_length_cm: 300.0,
            }),
            material_id: "acrylic-clear".to_string(),
            thickness_mm: 3.0,
            dimensions: Dimensions::new(1200.0, 400.0, 40.0),
            quantity: 1,
            options: vec![],
        };

        let catalog = Catalog::standard();
        let cost = options_cost(&catalog, &config, 0.48, 3.2);
        // Standard rate over 3 m + auto power supply.
        assert!((cost - (27.0 + 25.0)).abs() < EPS);
    }

    #[test]
    fn test_waterproofing_adds_15_percent_of_led_cost() {
        let config = ProductConfiguration {
            product: ProductSpec::LedSign(LedSignParams {
                led_length_cm: 300.0,
            }),
            material_id: "acrylic-clear".to_string(),
            thickness_mm: 3.0,
            dimensions: Dimensions::new(1200.0, 400.0, 40.0),
            quantity: 1,
            options: vec![SelectedOption::new(OPT_LED_WATERPROOF)],
        };

        let catalog = Catalog::standard();
        let cost = options_cost(&catalog, &config, 0.48, 3.2);
        let led = 27.0 + 25.0;
        assert!((cost - (led + 0.15 * led)).abs() < EPS);
    }

    #[test]
    fn test_light_box_fixed_price_path() {
        let config = ProductConfiguration {
            product: ProductSpec::LightBoxSign(LightBoxParams {
                face: LightBoxFace::Acrylic,
                led_length_cm: 0.0,
            }),
            material_id: "acrylic-clear".to_string(),
            thickness_mm: 3.0,
            dimensions: Dimensions::new(2000.0, 1000.0, 0.0),
            quantity: 1,
            options: vec![],
        };
        let (breakdown, unit_price) = price(&config);

        // 2 m² × 420 = 840
        assert!((unit_price - 840.0).abs() < EPS);
        assert!((breakdown.material_cost - 840.0 * 0.4).abs() < EPS);
        assert!((breakdown.labor_cost - 840.0 * 0.2).abs() < EPS);
        assert!((breakdown.waste_cost - 840.0 * 0.4 * 0.08).abs() < EPS);
        assert!((breakdown.total() - unit_price).abs() < EPS);
    }

    #[test]
    fn test_unknown_option_id_contributes_zero() {
        let mut config = flat_panel_config();
        config.options = vec![SelectedOption::new("retired-option")];
        let (breakdown, unit_price) = price(&config);
        assert_eq!(breakdown.options_cost, 0.0);
        assert!((unit_price - 162.2565).abs() < EPS);
    }

    #[test]
    fn test_unknown_material_yields_none() {
        let mut config = flat_panel_config();
        config.material_id = "unobtainium".to_string();
        let catalog = Catalog::standard();
        assert!(price_configuration(&catalog, &config, 1.0, 4.0).is_none());
    }

    #[test]
    fn test_material_cost_monotonic_in_thickness() {
        let catalog = Catalog::standard();
        let mut config = flat_panel_config();

        let mut previous = 0.0;
        for thickness in [2.0, 3.0, 5.0, 8.0, 10.0] {
            config.thickness_mm = thickness;
            let (breakdown, _) = price_configuration(&catalog, &config, 1.0, 4.0).unwrap();
            assert!(breakdown.material_cost > previous);
            previous = breakdown.material_cost;
        }
    }
}
