//! # Surface Area & Edge Length
//!
//! Per-family geometry rules: exposed surface area (m²) and finishable edge
//! length (m) derived from outer dimensions and family parameters.
//!
//! ## Position in the Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   Dimensions + family params                                            │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   surface_area_m2() ──► weight, material cost, per-m² options          │
//! │   edge_length_m() ────► per-meter finish options (edge polishing)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## These are business rules, not CAD
//! The formulas are the shop's empirical approximations of fabrication panel
//! layout (a wall-mounted stand is "a back panel plus pocket strips", not an
//! unfolded solid). They are reproduced exactly as the shop prices them;
//! do not "correct" them toward geometric truth.
//!
//! All formulas work in meters (w, h, d) converted from the mm dimensions.

use crate::types::{Dimensions, ProductSpec, StandParams, StandSubtype};

impl ProductSpec {
    /// Exposed surface area in m² for this product at the given dimensions.
    ///
    /// Pure; a missing required dimension simply contributes zero area, the
    /// caller gates on completeness.
    pub fn surface_area_m2(&self, dims: &Dimensions) -> f64 {
        let (w, h, d) = (dims.w(), dims.h(), dims.d());

        match self {
            // Single sheet.
            ProductSpec::FlatPanel => w * h,

            // Front + back, two sides, bottom (unless cut from an alternate
            // material, costed separately), optional lid, partitions.
            ProductSpec::Container(p) => {
                let bottom = if p.alt_bottom.is_some() { 0.0 } else { w * d };
                let lid = if p.lid { w * d } else { 0.0 };
                2.0 * w * h + 2.0 * d * h + bottom + lid + f64::from(p.partition_count) * h * d
            }

            // Container shell without partitions.
            ProductSpec::DisplayCase(p) => {
                let lid = if p.lid { w * d } else { 0.0 };
                2.0 * w * h + 2.0 * d * h + w * d + lid
            }

            // Five-sided shell, no lid option.
            ProductSpec::Enclosure => 2.0 * w * h + 2.0 * d * h + w * d,

            // Face sheet only; the frame is priced through the fixed path
            // or the LED options.
            ProductSpec::LightBoxSign(_) | ProductSpec::LedSign(_) => w * h,

            // Back, sides, shelves, and the 50 mm divider strips under each
            // shelf edge.
            ProductSpec::CounterDisplay(p) => {
                let shelves = f64::from(p.shelf_count);
                w * h + 2.0 * d * h + shelves * w * d + shelves * 2.0 * (d * 0.05)
            }

            ProductSpec::DisplayStand(p) => stand_surface_m2(p, w, h, d),
        }
    }

    /// Finishable edge length in m, consumed by per-meter finish options.
    pub fn edge_length_m(&self, dims: &Dimensions) -> f64 {
        let (w, h, d) = (dims.w(), dims.h(), dims.d());

        match self {
            ProductSpec::FlatPanel
            | ProductSpec::LightBoxSign(_)
            | ProductSpec::LedSign(_) => 2.0 * (w + h),

            // Full box perimeter; the lid adds its own rim.
            ProductSpec::Container(p) => {
                let lid_rim = if p.lid { 2.0 * (w + d) } else { 0.0 };
                4.0 * (w + h + d) + lid_rim
            }
            ProductSpec::DisplayCase(p) => {
                let lid_rim = if p.lid { 2.0 * (w + d) } else { 0.0 };
                4.0 * (w + h + d) + lid_rim
            }
            ProductSpec::Enclosure => 4.0 * (w + h + d),

            // Panel perimeter plus the front edge of every shelf.
            ProductSpec::CounterDisplay(p) => 2.0 * (w + h) + f64::from(p.shelf_count) * w,

            ProductSpec::DisplayStand(p) => stand_edge_m(p, w, h, d),
        }
    }
}

/// Display-stand surface, dispatched on subtype.
fn stand_surface_m2(p: &StandParams, w: f64, h: f64, d: f64) -> f64 {
    let shelves = f64::from(p.shelf_count);

    match p.subtype {
        // Base + back + sides, optional topper at 20% of height.
        StandSubtype::Pedestal => {
            let topper = if p.topper { w * (h * 0.2) } else { 0.0 };
            w * d + w * h + 2.0 * d * h + topper
        }

        // Base + back + sides + step treads (the depth split across steps)
        // + a 50 mm riser strip per step.
        StandSubtype::Stepped => {
            let steps = if p.shelf_count > 0 {
                shelves * w * (d / shelves) + shelves * w * 0.05
            } else {
                0.0
            };
            w * d + w * h + 2.0 * d * h + steps
        }

        StandSubtype::Pegboard => {
            let topper = if p.topper { w * (h * 0.2) } else { 0.0 };
            w * d + w * h + 2.0 * d * h + topper
        }

        // Back panel plus a 100 mm strip per literature pocket.
        StandSubtype::WallMounted => w * h + f64::from(p.pocket_count) * w * 0.1,

        // Heavy base, two 100 mm frame strips, 200 mm shelf segments.
        StandSubtype::FloorStanding => {
            1.5 * w * d + 2.0 * (h * 0.1) + shelves * w * 0.2
        }

        // Base + back + sides + full shelves + 80 mm dividers.
        StandSubtype::CosmeticOrganizer => {
            w * d + w * h
                + 2.0 * d * h
                + shelves * w * d
                + shelves * f64::from(p.partition_count) * d * 0.08
        }
    }
}

/// Display-stand edge length, dispatched on subtype.
fn stand_edge_m(p: &StandParams, w: f64, h: f64, d: f64) -> f64 {
    let shelves = f64::from(p.shelf_count);

    match p.subtype {
        StandSubtype::Pedestal | StandSubtype::Pegboard => {
            let topper = if p.topper { w } else { 0.0 };
            2.0 * (w + d) + 2.0 * h + topper
        }
        StandSubtype::Stepped | StandSubtype::CosmeticOrganizer => {
            2.0 * (w + d) + 2.0 * h + shelves * w
        }
        StandSubtype::WallMounted => 2.0 * (w + h) + f64::from(p.pocket_count) * w,
        StandSubtype::FloorStanding => 2.0 * h + shelves * w,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
