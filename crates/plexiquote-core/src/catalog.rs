//! # Catalog Tables
//!
//! Static reference data for the quoting engine: product families, materials,
//! additional options and delivery-region tariffs.
//!
//! ## Role in the Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog → Engine                                   │
//! │                                                                         │
//! │  ProductTypeDef ───► price multiplier, waste fraction                  │
//! │  MaterialDef ──────► base price, density, thickness rules, surcharge   │
//! │  OptionDef ────────► option unit prices and pricing mode               │
//! │  DeliveryRegion ───► per-kg tariff + minimum for offer delivery cost   │
//! │                                                                         │
//! │  The catalog is FROZEN: loaded once at process start and treated as    │
//! │  read-only by every computation. No lookup inside the engine ever      │
//! │  mutates it.                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//! An id that is not in the catalog is not an error: configuration and
//! catalog are constructed from the same tables, so a miss means "not yet
//! configured" and contributes zero cost. Lookups return `Option` and the
//! engine skips misses (with a `tracing` debug event).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{LightBoxFace, ProductFamily};

// =============================================================================
// Well-Known Option Ids
// =============================================================================
// The "special" options are referenced by the pricing rules themselves, so
// their ids are part of the engine contract, not just catalog data.

/// Polished edges, priced per meter of edge length.
pub const OPT_EDGE_POLISH: &str = "edge-polish";
/// Standard LED strip, priced per meter of strip.
pub const OPT_LED_STRIP_STANDARD: &str = "led-strip-standard";
/// Premium LED strip, priced per meter of strip.
pub const OPT_LED_STRIP_PREMIUM: &str = "led-strip-premium";
/// LED driver; auto-added whenever LED cost exists without it.
pub const OPT_LED_POWER_SUPPLY: &str = "led-power-supply";
/// Waterproofing of the LED assembly; +15% on accumulated LED cost.
pub const OPT_LED_WATERPROOF: &str = "led-waterproof";
/// UV bonding of joints; multiplies material cost by 1.10.
pub const OPT_UV_BONDING: &str = "uv-bonding";
/// Container bottom cut from a different material (costed separately).
pub const OPT_ALT_BOTTOM: &str = "alt-bottom";

// =============================================================================
// Product Type Definition
// =============================================================================

/// Per-family pricing parameters.
///
/// One record per product family; immutable reference data.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductTypeDef {
    /// The family this record prices.
    pub family: ProductFamily,

    /// Markup factor applied to base production cost to reach unit price.
    pub price_multiplier: f64,

    /// Fraction of material cost added for fabrication scrap (0..1).
    pub waste_fraction: f64,
}

// =============================================================================
// Material Definition
// =============================================================================

/// A sheet material the shop fabricates from.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDef {
    /// Catalog id, e.g. "acrylic-clear".
    pub id: String,

    /// Display name shown in the material picker.
    pub name: String,

    /// Base price per m² per mm of thickness.
    pub base_price_per_m2_mm: f64,

    /// Density in kg/m³, used for unit weight.
    pub density_kg_m3: f64,

    /// Some materials are only stocked in fixed thicknesses.
    /// `None` means any thickness the shop can source.
    pub fixed_thicknesses_mm: Option<Vec<f64>>,

    /// Surcharge multiplier on material cost for tinted/colored stock.
    /// `None` means no surcharge.
    pub color_surcharge: Option<f64>,
}

impl MaterialDef {
    /// Whether the given thickness can be quoted for this material.
    pub fn allows_thickness(&self, thickness_mm: f64) -> bool {
        match &self.fixed_thicknesses_mm {
            None => thickness_mm > 0.0,
            Some(allowed) => allowed
                .iter()
                .any(|t| (t - thickness_mm).abs() < f64::EPSILON),
        }
    }

    /// Effective surcharge multiplier (1.0 when none applies).
    #[inline]
    pub fn surcharge(&self) -> f64 {
        self.color_surcharge.unwrap_or(1.0)
    }
}

// =============================================================================
// Option Definition
// =============================================================================

/// How an additional option is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OptionPricing {
    /// `unit_price × surface area` (prints, engraving).
    PerSquareMeter,
    /// `unit_price × length` — edge length for finishes, strip length for LED.
    PerMeter,
    /// `unit_price × selected quantity` (holes, hinges, locks).
    Each,
    /// `unit_price × selected quantity`, sold as a set (standoffs).
    Set,
    /// No direct unit price; modifies other cost components
    /// (UV bonding, waterproofing, alternate bottom material).
    Special,
}

/// An additional option from the price list.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OptionDef {
    /// Catalog id, e.g. "edge-polish".
    pub id: String,

    /// Display name shown in the options panel.
    pub name: String,

    /// Price per pricing unit. Zero for `Special` options.
    pub unit_price: f64,

    /// Pricing mode.
    pub pricing: OptionPricing,

    /// LED-related options participate in the power-supply auto-add and
    /// waterproofing rules.
    pub led_related: bool,
}

// =============================================================================
// Delivery Region Tariff
// =============================================================================

/// Per-region delivery tariff applied to the total shipped weight.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRegionTariff {
    /// Catalog id, e.g. "zone-b". The id "local-pickup" ships nothing.
    pub id: String,

    /// Display name shown in the delivery picker.
    pub name: String,

    /// Price per kg of total shipped weight.
    pub price_per_kg: f64,

    /// Floor applied when the per-kg price comes out lower.
    pub minimum_price: f64,
}

impl DeliveryRegionTariff {
    /// Delivery cost for a given total shipped weight.
    pub fn cost_for_weight(&self, total_weight_kg: f64) -> f64 {
        (self.price_per_kg * total_weight_kg).max(self.minimum_price)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The frozen catalog consumed by every computation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub product_types: Vec<ProductTypeDef>,
    pub materials: Vec<MaterialDef>,
    pub options: Vec<OptionDef>,
    pub delivery_regions: Vec<DeliveryRegionTariff>,

    /// Fixed per-m² rate for light-box signs with an acrylic face.
    pub light_box_acrylic_rate: f64,

    /// Fixed per-m² rate for light-box signs with an aluminum-composite face.
    pub light_box_composite_rate: f64,
}

impl Catalog {
    /// Looks up the pricing parameters for a product family.
    pub fn product_type(&self, family: ProductFamily) -> Option<&ProductTypeDef> {
        self.product_types.iter().find(|p| p.family == family)
    }

    /// Looks up a material by catalog id.
    pub fn material(&self, id: &str) -> Option<&MaterialDef> {
        self.materials.iter().find(|m| m.id == id)
    }

    /// Looks up an option by catalog id.
    pub fn option(&self, id: &str) -> Option<&OptionDef> {
        self.options.iter().find(|o| o.id == id)
    }

    /// Looks up a delivery region by catalog id.
    pub fn delivery_region(&self, id: &str) -> Option<&DeliveryRegionTariff> {
        self.delivery_regions.iter().find(|r| r.id == id)
    }

    /// Fixed per-m² rate for the light-box fixed-price path.
    pub fn light_box_rate(&self, face: LightBoxFace) -> f64 {
        match face {
            LightBoxFace::Acrylic => self.light_box_acrylic_rate,
            LightBoxFace::AluminumComposite => self.light_box_composite_rate,
        }
    }

    /// The shop's standard catalog.
    ///
    /// This is the reference data the sales UI loads at startup. Values are
    /// maintained by the back office; the engine treats them as opaque.
    pub fn standard() -> Self {
        Catalog {
            product_types: vec![
                type_def(ProductFamily::FlatPanel, 1.7, 0.05),
                type_def(ProductFamily::Container, 2.0, 0.10),
                type_def(ProductFamily::DisplayStand, 2.2, 0.12),
                // Multiplier unused: the light-box family prices on the
                // fixed per-m² path.
                type_def(ProductFamily::LightBoxSign, 1.0, 0.08),
                type_def(ProductFamily::LedSign, 2.4, 0.08),
                type_def(ProductFamily::DisplayCase, 2.1, 0.10),
                type_def(ProductFamily::Enclosure, 1.9, 0.08),
                type_def(ProductFamily::CounterDisplay, 2.3, 0.12),
            ],
            materials: vec![
                MaterialDef {
                    id: "acrylic-clear".to_string(),
                    name: "Acrylic, clear".to_string(),
                    base_price_per_m2_mm: 30.0,
                    density_kg_m3: 1190.0,
                    fixed_thicknesses_mm: None,
                    color_surcharge: None,
                },
                MaterialDef {
                    id: "acrylic-color".to_string(),
                    name: "Acrylic, color-tinted".to_string(),
                    base_price_per_m2_mm: 34.0,
                    density_kg_m3: 1190.0,
                    fixed_thicknesses_mm: Some(vec![3.0, 5.0, 8.0]),
                    color_surcharge: Some(crate::DEFAULT_COLOR_SURCHARGE),
                },
                MaterialDef {
                    id: "petg-clear".to_string(),
                    name: "PET-G, clear".to_string(),
                    base_price_per_m2_mm: 22.0,
                    density_kg_m3: 1270.0,
                    fixed_thicknesses_mm: None,
                    color_surcharge: None,
                },
                MaterialDef {
                    id: "polycarbonate".to_string(),
                    name: "Polycarbonate".to_string(),
                    base_price_per_m2_mm: 38.0,
                    density_kg_m3: 1200.0,
                    fixed_thicknesses_mm: None,
                    color_surcharge: None,
                },
                MaterialDef {
                    id: "aluminum-composite".to_string(),
                    name: "Aluminum composite panel".to_string(),
                    base_price_per_m2_mm: 28.0,
                    density_kg_m3: 1500.0,
                    fixed_thicknesses_mm: Some(vec![3.0, 4.0, 6.0]),
                    color_surcharge: None,
                },
                MaterialDef {
                    id: "pvc-foam".to_string(),
                    name: "PVC foam board".to_string(),
                    base_price_per_m2_mm: 14.0,
                    density_kg_m3: 550.0,
                    fixed_thicknesses_mm: None,
                    color_surcharge: None,
                },
            ],
            options: vec![
                option_def(OPT_EDGE_POLISH, "Edge polishing", 4.5, OptionPricing::PerMeter, false),
                option_def("uv-print", "UV print", 55.0, OptionPricing::PerSquareMeter, false),
                option_def("engraving", "Laser engraving", 35.0, OptionPricing::PerSquareMeter, false),
                option_def("drill-hole", "Drilled hole", 1.2, OptionPricing::Each, false),
                option_def("standoff-set", "Wall standoff set", 18.0, OptionPricing::Set, false),
                option_def("hinge", "Hinge", 6.5, OptionPricing::Each, false),
                option_def("lock", "Lock", 12.0, OptionPricing::Each, false),
                option_def(OPT_LED_STRIP_STANDARD, "LED strip, standard", 9.0, OptionPricing::PerMeter, true),
                option_def(OPT_LED_STRIP_PREMIUM, "LED strip, premium", 14.0, OptionPricing::PerMeter, true),
                option_def(OPT_LED_POWER_SUPPLY, "LED power supply", 25.0, OptionPricing::Each, true),
                option_def(OPT_LED_WATERPROOF, "LED waterproofing", 0.0, OptionPricing::Special, true),
                option_def(OPT_UV_BONDING, "UV-bonded joints", 0.0, OptionPricing::Special, false),
                option_def(OPT_ALT_BOTTOM, "Alternate bottom material", 0.0, OptionPricing::Special, false),
            ],
            delivery_regions: vec![
                region("local-pickup", "Local pickup", 0.0, 0.0),
                region("zone-a", "Zone A (metro)", 0.9, 45.0),
                region("zone-b", "Zone B (regional)", 1.2, 80.0),
                region("zone-c", "Zone C (national)", 1.6, 120.0),
                region("express", "Express courier", 2.8, 150.0),
            ],
            light_box_acrylic_rate: 420.0,
            light_box_composite_rate: 380.0,
        }
    }
}

fn type_def(family: ProductFamily, price_multiplier: f64, waste_fraction: f64) -> ProductTypeDef {
    ProductTypeDef {
        family,
        price_multiplier,
        waste_fraction,
    }
}

fn option_def(
    id: &str,
    name: &str,
    unit_price: f64,
    pricing: OptionPricing,
    led_related: bool,
) -> OptionDef {
    OptionDef {
        id: id.to_string(),
        name: name.to_string(),
        unit_price,
        pricing,
        led_related,
    }
}

fn region(id: &str, name: &str, price_per_kg: f64, minimum_price: f64) -> DeliveryRegionTariff {
    DeliveryRegionTariff {
        id: id.to_string(),
        name: name.to_string(),
        price_per_kg,
        minimum_price,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
