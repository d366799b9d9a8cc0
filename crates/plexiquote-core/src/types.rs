//! # Domain Types
//!
//! Core domain types for the quoting engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐   ┌───────────────────┐   │
//! │  │ ProductSpec      │   │ Dimensions       │   │ SelectedOption    │   │
//! │  │ ──────────────── │   │ ──────────────── │   │ ───────────────── │   │
//! │  │ FlatPanel        │   │ width_mm         │   │ option_id         │   │
//! │  │ Container(p)     │   │ height_mm        │   │ quantity          │   │
//! │  │ DisplayStand(p)  │   │ depth_mm         │   └───────────────────┘   │
//! │  │ LightBoxSign(p)  │   └──────────────────┘                           │
//! │  │ LedSign(p)       │                                                  │
//! │  │ DisplayCase(p)   │        ProductConfiguration                      │
//! │  │ Enclosure        │        = spec + material + thickness             │
//! │  │ CounterDisplay(p)│          + dims + quantity + options             │
//! │  └──────────────────┘                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why a tagged union instead of a parameter bag
//! Family-specific parameters (shelf count, pocket count, LED length) only
//! exist on the variants that use them. A shelf count cannot leak into a
//! flat-panel quote because the type does not have one.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product Family
// =============================================================================

/// The eight top-level product categories, each with its own geometry rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductFamily {
    FlatPanel,
    Container,
    DisplayStand,
    LightBoxSign,
    LedSign,
    DisplayCase,
    Enclosure,
    CounterDisplay,
}

impl ProductFamily {
    /// All families, in catalog order.
    pub const ALL: [ProductFamily; 8] = [
        ProductFamily::FlatPanel,
        ProductFamily::Container,
        ProductFamily::DisplayStand,
        ProductFamily::LightBoxSign,
        ProductFamily::LedSign,
        ProductFamily::DisplayCase,
        ProductFamily::Enclosure,
        ProductFamily::CounterDisplay,
    ];

    /// Flat families ship as stacked sheets; everything else packs as a box.
    pub const fn is_flat(self) -> bool {
        matches!(self, ProductFamily::FlatPanel | ProductFamily::LightBoxSign)
    }
}

// =============================================================================
// Display Stand Subtype
// =============================================================================

/// Geometry variant of the display-stand family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StandSubtype {
    Pedestal,
    Stepped,
    Pegboard,
    WallMounted,
    FloorStanding,
    CosmeticOrganizer,
}

// =============================================================================
// Light-Box Face
// =============================================================================

/// Backing material variant for the light-box fixed-price path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LightBoxFace {
    Acrylic,
    AluminumComposite,
}

// =============================================================================
// Dimensions
// =============================================================================

/// Outer dimensions in millimetres.
///
/// Depth is unused (zero) for flat products.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub width_mm: f64,
    pub height_mm: f64,
    pub depth_mm: f64,
}

impl Dimensions {
    pub const fn new(width_mm: f64, height_mm: f64, depth_mm: f64) -> Self {
        Dimensions {
            width_mm,
            height_mm,
            depth_mm,
        }
    }

    /// Width in meters, for surface formulas.
    #[inline]
    pub fn w(&self) -> f64 {
        self.width_mm / 1000.0
    }

    /// Height in meters, for surface formulas.
    #[inline]
    pub fn h(&self) -> f64 {
        self.height_mm / 1000.0
    }

    /// Depth in meters, for surface formulas.
    #[inline]
    pub fn d(&self) -> f64 {
        self.depth_mm / 1000.0
    }
}

// =============================================================================
// Family-Specific Parameters
// =============================================================================

/// Alternate material for a container bottom, costed independently of the
/// main body material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AltBottom {
    pub material_id: String,
    pub thickness_mm: f64,
}

/// Container / organizer parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ContainerParams {
    /// Add a lid panel (and its edge when polishing).
    pub lid: bool,

    /// Number of internal partitions.
    pub partition_count: u32,

    /// When set, the bottom is cut from this material instead and its area
    /// leaves the main surface.
    pub alt_bottom: Option<AltBottom>,
}

/// Display-stand parameters. Only the fields the chosen subtype reads are
/// meaningful; the UI greys out the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StandParams {
    pub subtype: StandSubtype,

    /// Shelves / steps (stepped, floor-standing, cosmetic organizer).
    pub shelf_count: u32,

    /// Dividers per shelf (cosmetic organizer).
    pub partition_count: u32,

    /// Literature pockets (wall-mounted).
    pub pocket_count: u32,

    /// Header/topper panel (pedestal, pegboard).
    pub topper: bool,
}

impl StandParams {
    pub fn new(subtype: StandSubtype) -> Self {
        StandParams {
            subtype,
            shelf_count: 0,
            partition_count: 0,
            pocket_count: 0,
            topper: false,
        }
    }
}

/// Light-box sign parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LightBoxParams {
    pub face: LightBoxFace,

    /// Installed LED strip length in centimetres.
    pub led_length_cm: f64,
}

/// LED sign parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LedSignParams {
    /// Installed LED strip length in centimetres.
    pub led_length_cm: f64,
}

/// Display case parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CaseParams {
    /// Add a lid panel (and its edge when polishing).
    pub lid: bool,
}

/// Impulse counter-display parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CounterParams {
    pub shelf_count: u32,
}

// =============================================================================
// Product Spec
// =============================================================================

/// A product family together with its family-specific parameters.
///
/// This is the closed dispatch point for all per-family geometry and pricing
/// rules: adding a family means adding a variant here and covering it in
/// `geometry.rs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "family", content = "params", rename_all = "snake_case")]
pub enum ProductSpec {
    FlatPanel,
    Container(ContainerParams),
    DisplayStand(StandParams),
    LightBoxSign(LightBoxParams),
    LedSign(LedSignParams),
    DisplayCase(CaseParams),
    Enclosure,
    CounterDisplay(CounterParams),
}

impl ProductSpec {
    /// The catalog family this spec belongs to.
    pub const fn family(&self) -> ProductFamily {
        match self {
            ProductSpec::FlatPanel => ProductFamily::FlatPanel,
            ProductSpec::Container(_) => ProductFamily::Container,
            ProductSpec::DisplayStand(_) => ProductFamily::DisplayStand,
            ProductSpec::LightBoxSign(_) => ProductFamily::LightBoxSign,
            ProductSpec::LedSign(_) => ProductFamily::LedSign,
            ProductSpec::DisplayCase(_) => ProductFamily::DisplayCase,
            ProductSpec::Enclosure => ProductFamily::Enclosure,
            ProductSpec::CounterDisplay(_) => ProductFamily::CounterDisplay,
        }
    }

    /// LED strip length carried by the family parameters, when the family
    /// has one. Other families supply strip length on the option itself.
    pub fn led_length_cm(&self) -> Option<f64> {
        match self {
            ProductSpec::LightBoxSign(p) => Some(p.led_length_cm),
            ProductSpec::LedSign(p) => Some(p.led_length_cm),
            _ => None,
        }
    }

    /// Whether this product needs a depth to be configured.
    pub const fn needs_depth(&self) -> bool {
        !matches!(
            self,
            ProductSpec::FlatPanel | ProductSpec::LightBoxSign(_) | ProductSpec::LedSign(_)
        )
    }
}

// =============================================================================
// Selected Option
// =============================================================================

/// An option picked on a configuration, with an optional per-option quantity.
///
/// Quantity defaults to 1 and is read as: piece count for `Each`/`Set`
/// options, strip centimetres for per-meter LED options on families without
/// an LED length parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SelectedOption {
    pub option_id: String,

    #[serde(default = "default_option_quantity")]
    pub quantity: f64,
}

fn default_option_quantity() -> f64 {
    1.0
}

impl SelectedOption {
    pub fn new(option_id: impl Into<String>) -> Self {
        SelectedOption {
            option_id: option_id.into(),
            quantity: 1.0,
        }
    }

    pub fn with_quantity(option_id: impl Into<String>, quantity: f64) -> Self {
        SelectedOption {
            option_id: option_id.into(),
            quantity,
        }
    }
}

// =============================================================================
// Product Configuration
// =============================================================================

/// Everything the sales rep picked for one quote line.
///
/// Mutable while editing; frozen (cloned) once added to an offer. The engine
/// never mutates it — every change triggers a full recomputation of the
/// derived `Calculation` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductConfiguration {
    pub product: ProductSpec,
    pub material_id: String,
    pub thickness_mm: f64,
    pub dimensions: Dimensions,
    pub quantity: u32,
    #[serde(default)]
    pub options: Vec<SelectedOption>,
}

impl ProductConfiguration {
    /// Whether the given option id is selected.
    pub fn has_option(&self, option_id: &str) -> bool {
        self.options.iter().any(|o| o.option_id == option_id)
    }

    /// The selected quantity for an option, when selected.
    pub fn option_quantity(&self, option_id: &str) -> Option<f64> {
        self.options
            .iter()
            .find(|o| o.option_id == option_id)
            .map(|o| o.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
