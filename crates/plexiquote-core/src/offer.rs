//! # Offer Aggregation
//!
//! The multi-line commercial offer: frozen line items, discount, and
//! delivery cost over the total shipped weight.
//!
//! ## Offer Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Offer State Operations                               │
//! │                                                                         │
//! │  Sales UI Action           Engine Call             Offer State Change   │
//! │  ───────────────           ───────────             ──────────────────   │
//! │                                                                         │
//! │  "Add to offer" ─────────► add_line() ───────────► freeze config+calc  │
//! │                                                                         │
//! │  "Remove line" ──────────► remove_line() ────────► lines.remove(i)     │
//! │                                                                         │
//! │  Change discount ────────► set_discount_pct() ───► recompute totals    │
//! │                                                                         │
//! │  Change region ──────────► set_delivery_region() ► recompute delivery  │
//! │                                                                         │
//! │  View totals ────────────► totals(&catalog) ─────► (read only)         │
//! │                                                                         │
//! │  Totals are never stored: every read derives them from the lines, so   │
//! │  they can never drift out of sync with the line items.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::calc::{compute_line_item, Calculation};
use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::types::ProductConfiguration;
use crate::{MAX_OFFER_LINES, MAX_QUANTITY};

// =============================================================================
// Offer Status
// =============================================================================

/// Offer lifecycle status.
///
/// Carried as data only: the transitions (sending, accepting, reminders)
/// belong to the offer-management layer outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
}

// =============================================================================
// Offer Line Item
// =============================================================================

/// One line of an offer: a frozen configuration plus its calculation.
///
/// ## Design Notes
/// Uses the snapshot pattern: the configuration and its calculation are
/// cloned at add time. Later catalog or configuration edits never change an
/// existing line — immutable except for removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OfferLineItem {
    /// Line id (UUID v4).
    pub id: String,

    /// Configuration at add time (frozen).
    pub config: ProductConfiguration,

    /// Calculation at add time (frozen).
    pub calculation: Calculation,

    /// When this line was added to the offer.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl OfferLineItem {
    /// `unit_price × quantity`, as frozen at add time.
    #[inline]
    pub fn line_total(&self) -> f64 {
        self.calculation.total_price
    }

    /// Shipped weight of this line including carton tare.
    #[inline]
    pub fn shipped_weight_kg(&self) -> f64 {
        self.calculation.packaging.total_shipped_weight_kg
    }
}

// =============================================================================
// Offer
// =============================================================================

/// A commercial offer under construction.
///
/// ## Invariants
/// - Lines are immutable once added (remove and re-add to change one)
/// - `unit_price × quantity == total_price` holds for every line
/// - Discount percentage stays within [0, 100]
/// - Maximum lines: `MAX_OFFER_LINES`
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    /// Frozen line items, in add order.
    pub lines: Vec<OfferLineItem>,

    /// Percentage discount on the net total.
    pub discount_pct: f64,

    /// Delivery region id, `None` or "local-pickup" for no delivery cost.
    pub delivery_region_id: Option<String>,

    /// Lifecycle status (owned by the offer-management layer).
    pub status: OfferStatus,

    /// When the offer was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Offer {
    /// Creates a new empty draft offer.
    pub fn new() -> Self {
        Offer {
            lines: Vec::new(),
            discount_pct: 0.0,
            delivery_region_id: None,
            status: OfferStatus::Draft,
            created_at: Utc::now(),
        }
    }

    /// Freezes a configuration into a new line item.
    ///
    /// Computes the calculation here so a line can never carry a stale or
    /// missing one. Returns the new line id.
    pub fn add_line(
        &mut self,
        catalog: &Catalog,
        config: ProductConfiguration,
    ) -> CoreResult<String> {
        if self.lines.len() >= MAX_OFFER_LINES {
            return Err(CoreError::OfferTooLarge {
                max: MAX_OFFER_LINES,
            });
        }
        if config.quantity > MAX_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: config.quantity,
                max: MAX_QUANTITY,
            });
        }

        let calculation =
            compute_line_item(catalog, &config).ok_or(CoreError::IncompleteConfiguration {
                reason: "product, material and positive dimensions are required".to_string(),
            })?;

        let id = uuid::Uuid::new_v4().to_string();
        self.lines.push(OfferLineItem {
            id: id.clone(),
            config,
            calculation,
            added_at: Utc::now(),
        });
        Ok(id)
    }

    /// Removes a line by id.
    pub fn remove_line(&mut self, line_id: &str) -> CoreResult<()> {
        let initial_len = self.lines.len();
        self.lines.retain(|line| line.id != line_id);

        if self.lines.len() == initial_len {
            Err(CoreError::LineNotFound(line_id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Sets the discount percentage, clamped to [0, 100].
    pub fn set_discount_pct(&mut self, pct: f64) {
        self.discount_pct = pct.clamp(0.0, 100.0);
    }

    /// Sets (or clears) the delivery region.
    pub fn set_delivery_region(&mut self, region_id: Option<String>) {
        self.delivery_region_id = region_id;
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether the offer has no lines yet.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Derives the offer totals from the current lines.
    pub fn totals(&self, catalog: &Catalog) -> OfferTotals {
        aggregate_offer(
            &self.lines,
            self.discount_pct,
            self.delivery_region_id.as_deref(),
            catalog,
        )
    }
}

impl Default for Offer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Offer Totals
// =============================================================================

/// Derived offer totals for display and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OfferTotals {
    pub line_count: usize,
    pub net_total: f64,
    pub discount_pct: f64,
    pub discount_value: f64,
    pub net_after_discount: f64,
    pub total_shipped_weight_kg: f64,
    pub delivery_cost: f64,
    pub grand_total: f64,
}

/// The engine's second entry point: a pure reduction over already-computed
/// line items plus the delivery tariff table.
///
/// - `netTotal = Σ lineTotal`
/// - `discountValue = netTotal × discountPct / 100`
/// - delivery = `max(pricePerKg × totalWeight, minimum)` for the region,
///   zero for local pickup, no region, or an unknown region id
pub fn aggregate_offer(
    lines: &[OfferLineItem],
    discount_pct: f64,
    delivery_region_id: Option<&str>,
    catalog: &Catalog,
) -> OfferTotals {
    let net_total: f64 = lines.iter().map(OfferLineItem::line_total).sum();
    let total_weight: f64 = lines.iter().map(OfferLineItem::shipped_weight_kg).sum();

    let discount_value = net_total * discount_pct / 100.0;
    let net_after_discount = net_total - discount_value;

    let delivery_cost = match delivery_region_id {
        None => 0.0,
        Some(region_id) => match catalog.delivery_region(region_id) {
            Some(tariff) => tariff.cost_for_weight(total_weight),
            None => {
                tracing::debug!(region_id, "unknown delivery region, no delivery cost");
                0.0
            }
        },
    };

    OfferTotals {
        line_count: lines.len(),
        net_total,
        discount_pct,
        discount_value,
        net_after_discount,
        total_shipped_weight_kg: total_weight,
        delivery_cost,
        grand_total: net_after_discount + delivery_cost,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContainerParams, Dimensions, ProductSpec};

    const EPS: f64 = 1e-6;

    fn container_config(quantity: u32) -> ProductConfiguration {
        ProductConfiguration {
            product: ProductSpec::Container(ContainerParams::default()),
            material_id: "acrylic-clear".to_string(),
            thickness_mm: 3.0,
            dimensions: Dimensions::new(300.0, 200.0, 150.0),
            quantity,
            options: vec![],
        }
    }

    /// A synthetic line with exact figures, for tariff/discount arithmetic.
    fn synthetic_line(total_price: f64, shipped_weight_kg: f64) -> OfferLineItem {
        let catalog = Catalog::standard();
        let config = container_config(1);
        let mut calculation = compute_line_item(&catalog, &config).unwrap();
        calculation.total_price = total_price;
        calculation.packaging.total_shipped_weight_kg = shipped_weight_kg;

        OfferLineItem {
            id: uuid::Uuid::new_v4().to_string(),
            config,
            calculation,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_discount_and_minimum_delivery_reference_case() {
        // Net 1000 at 10% → 100 off, 900 net. Zone B at 1.2/kg over 50 kg
        // is 60, below the 80 minimum → 80.
        let catalog = Catalog::standard();
        let lines = vec![synthetic_line(600.0, 30.0), synthetic_line(400.0, 20.0)];

        let totals = aggregate_offer(&lines, 10.0, Some("zone-b"), &catalog);
        assert!((totals.net_total - 1000.0).abs() < EPS);
        assert!((totals.discount_value - 100.0).abs() < EPS);
        assert!((totals.net_after_discount - 900.0).abs() < EPS);
        assert!((totals.delivery_cost - 80.0).abs() < EPS);
        assert!((totals.grand_total - 980.0).abs() < EPS);
    }

    #[test]
    fn test_per_kg_delivery_above_minimum() {
        let catalog = Catalog::standard();
        let lines = vec![synthetic_line(1000.0, 200.0)];
        let totals = aggregate_offer(&lines, 0.0, Some("zone-b"), &catalog);
        // 200 kg × 1.2 = 240, above the 80 minimum.
        assert!((totals.delivery_cost - 240.0).abs() < EPS);
    }

    #[test]
    fn test_local_pickup_and_unknown_region_cost_nothing() {
        let catalog = Catalog::standard();
        let lines = vec![synthetic_line(1000.0, 200.0)];

        let pickup = aggregate_offer(&lines, 0.0, Some("local-pickup"), &catalog);
        assert_eq!(pickup.delivery_cost, 0.0);

        let none = aggregate_offer(&lines, 0.0, None, &catalog);
        assert_eq!(none.delivery_cost, 0.0);

        let unknown = aggregate_offer(&lines, 0.0, Some("zone-z"), &catalog);
        assert_eq!(unknown.delivery_cost, 0.0);
    }

    #[test]
    fn test_add_line_freezes_calculation() {
        let catalog = Catalog::standard();
        let mut offer = Offer::new();

        let id = offer.add_line(&catalog, container_config(5)).unwrap();
        assert_eq!(offer.line_count(), 1);

        let line = offer.lines.iter().find(|l| l.id == id).unwrap();
        assert!((line.line_total() - line.calculation.unit_price * 5.0).abs() < EPS);
        assert!(line.shipped_weight_kg() > 0.0);
    }

    #[test]
    fn test_add_incomplete_configuration_is_rejected() {
        let catalog = Catalog::standard();
        let mut offer = Offer::new();

        let mut config = container_config(5);
        config.material_id = "unobtainium".to_string();

        let err = offer.add_line(&catalog, config).unwrap_err();
        assert!(matches!(err, CoreError::IncompleteConfiguration { .. }));
        assert!(offer.is_empty());
    }

    #[test]
    fn test_remove_line_recomputes_totals() {
        let catalog = Catalog::standard();
        let mut offer = Offer::new();

        let id = offer.add_line(&catalog, container_config(5)).unwrap();
        offer.add_line(&catalog, container_config(2)).unwrap();

        let before = offer.totals(&catalog);
        offer.remove_line(&id).unwrap();
        let after = offer.totals(&catalog);

        assert_eq!(after.line_count, 1);
        assert!(after.net_total < before.net_total);

        let err = offer.remove_line(&id).unwrap_err();
        assert!(matches!(err, CoreError::LineNotFound(_)));
    }

    #[test]
    fn test_discount_changes_recompute_on_read() {
        let catalog = Catalog::standard();
        let mut offer = Offer::new();
        offer.add_line(&catalog, container_config(5)).unwrap();

        offer.set_discount_pct(10.0);
        let ten = offer.totals(&catalog);
        offer.set_discount_pct(25.0);
        let twenty_five = offer.totals(&catalog);

        assert!((ten.net_total - twenty_five.net_total).abs() < EPS);
        assert!(twenty_five.discount_value > ten.discount_value);
        assert!(twenty_five.net_after_discount < ten.net_after_discount);
    }

    #[test]
    fn test_discount_clamped_to_percentage_range() {
        let mut offer = Offer::new();
        offer.set_discount_pct(150.0);
        assert_eq!(offer.discount_pct, 100.0);
        offer.set_discount_pct(-5.0);
        assert_eq!(offer.discount_pct, 0.0);
    }

    #[test]
    fn test_quantity_cap_enforced() {
        let catalog = Catalog::standard();
        let mut offer = Offer::new();

        let err = offer
            .add_line(&catalog, container_config(MAX_QUANTITY + 1))
            .unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
    }

    #[test]
    fn test_net_total_is_sum_of_line_totals() {
        let catalog = Catalog::standard();
        let mut offer = Offer::new();
        offer.add_line(&catalog, container_config(3)).unwrap();
        offer.add_line(&catalog, container_config(7)).unwrap();

        let expected: f64 = offer.lines.iter().map(OfferLineItem::line_total).sum();
        let totals = offer.totals(&catalog);
        assert!((totals.net_total - expected).abs() < EPS);
        assert!((totals.grand_total - totals.net_after_discount).abs() < EPS); // no region set
    }
}
