//! # plexiquote-core: Pure Quoting Engine for PlexiQuote
//!
//! This crate is the **heart** of PlexiQuote. It contains the whole pricing,
//! costing and packaging pipeline as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PlexiQuote Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Quoting UI (sales desk)                     │   │
//! │  │   Configurator ──► Live Price ──► Offer Builder ──► Export     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ host commands                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ plexiquote-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌───────────┐          │   │
//! │  │   │ catalog │ │ geometry │ │ pricing │ │ packaging │          │   │
//! │  │   │ tables  │ │ surfaces │ │  costs  │ │  cartons  │          │   │
//! │  │   └─────────┘ └──────────┘ └─────────┘ └───────────┘          │   │
//! │  │        ┌──────────────────┐   ┌──────────────────┐             │   │
//! │  │        │ compute_line_item│   │  aggregate_offer │             │   │
//! │  │        └──────────────────┘   └──────────────────┘             │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           Host persistence (offers, customers, PDF)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product families, configurations, dimensions
//! - [`catalog`] - Product type, material, option and tariff tables
//! - [`geometry`] - Surface area and edge length per product family
//! - [`pricing`] - Material/waste/labor costs and unit price composition
//! - [`packaging`] - Carton sizing and pallet rollup
//! - [`calc`] - The `compute_line_item` pipeline
//! - [`offer`] - Multi-line offer aggregation
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **None, not Err**: An incomplete configuration is "not priced yet",
//!    never a failure - the pipeline returns `Option`, errors live at the edges
//! 4. **Frozen Lines**: An offer line snapshots its configuration and
//!    calculation; later catalog edits never change an existing line
//!
//! ## Example Usage
//!
//! ```rust
//! use plexiquote_core::{compute_line_item, Catalog, ProductConfiguration};
//! use plexiquote_core::types::{Dimensions, ProductSpec};
//!
//! let catalog = Catalog::standard();
//! let config = ProductConfiguration {
//!     product: ProductSpec::FlatPanel,
//!     material_id: "acrylic-clear".to_string(),
//!     thickness_mm: 3.0,
//!     dimensions: Dimensions::new(1000.0, 1000.0, 0.0),
//!     quantity: 1,
//!     options: vec![],
//! };
//!
//! let calc = compute_line_item(&catalog, &config).unwrap();
//! assert!((calc.unit_price - 162.2565).abs() < 1e-6);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calc;
pub mod catalog;
pub mod error;
pub mod geometry;
pub mod offer;
pub mod packaging;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use plexiquote_core::Catalog` instead of
// `use plexiquote_core::catalog::Catalog`

pub use calc::{compute_line_item, Calculation};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use offer::{aggregate_offer, Offer, OfferLineItem, OfferStatus, OfferTotals};
pub use packaging::{plan_packaging, PackagingPlan};
pub use pricing::CostBreakdown;
pub use types::{ProductConfiguration, ProductFamily, ProductSpec};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Surcharge factor applied to colored sheet when the material table does
/// not carry its own factor.
///
/// ## Business Reason
/// Colored cast sheet is bought in smaller batches at a worse rate; the
/// standard markup over clear sheet is 40%.
pub const DEFAULT_COLOR_SURCHARGE: f64 = 1.4;

/// Maximum quantity of a single offer line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g. typing 10000 instead of 100).
/// Larger runs are quoted as projects, not through this tool.
pub const MAX_QUANTITY: u32 = 9999;

/// Maximum lines allowed in a single offer.
///
/// ## Business Reason
/// Keeps offers reviewable and the exported PDF within a sane page count.
pub const MAX_OFFER_LINES: usize = 50;

/// Largest dimension the shop can cut, in millimetres.
///
/// ## Business Reason
/// Stock sheets top out at 3050 x 2050 mm; anything beyond 4000 mm in a
/// single dimension cannot be fabricated as one piece.
pub const MAX_DIMENSION_MM: f64 = 4000.0;
