//! Pure synthetic-row generation. Everything here is deterministic given
//! an `Rng`, so the seeding loops can be tested without a database.

use chrono::{Days, Duration, NaiveDate, NaiveDateTime};
use fake::faker::company::en::CompanyName;
use fake::Fake;
use rand::Rng;
use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::entities::{InventoryStatus, OrderStatus};

/// Category codes embedded in SKUs: Copy, Recycled, Gloss, Cover.
pub const SKU_CATEGORY_CODES: [&str; 4] = ["CP", "RC", "GL", "CV"];

pub const PRODUCT_CATEGORIES: [&str; 9] = [
    "Copy Paper",
    "Card Stock",
    "Recycled Paper",
    "Glossy Paper",
    "Cover Paper",
    "Bond Paper",
    "Premium Paper",
    "Letterhead",
    "Color Paper",
];

pub const LOCATIONS: [&str; 6] = [
    "Scranton", "Buffalo", "Utica", "Albany", "Syracuse", "Nashua",
];

pub const SHEET_SIZES: [&str; 5] = ["8.5x11", "11x17", "A4", "Legal", "12x18"];

pub const PAPER_WEIGHTS_GSM: [i32; 6] = [75, 90, 100, 120, 160, 200];

pub const SHEETS_PER_REAM: [i32; 3] = [250, 500, 1000];

const SECONDS_PER_YEAR: i64 = 365 * 24 * 3600;

/// Tracks SKUs already handed out within one seeding run. A fresh
/// registry is created per invocation so runs stay independent; the
/// `inventory.sku` unique constraint backs this up at the storage level.
#[derive(Debug, Default)]
pub struct SkuRegistry {
    used: HashSet<String>,
}

impl SkuRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    /// Draws a fresh `DM-<CAT>-<4digits>` SKU, retrying until an unused
    /// combination comes up.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> String {
        loop {
            let code = pick(rng, &SKU_CATEGORY_CODES);
            let sku = format!("DM-{}-{}", code, rng.gen_range(1000..=9999));
            if self.used.insert(sku.clone()) {
                return sku;
            }
        }
    }
}

/// One generated inventory row, before insertion.
#[derive(Debug, Clone)]
pub struct PaperProduct {
    pub sku: String,
    pub product_name: String,
    pub category_name: String,
    pub location_name: String,
    pub current_stock: i32,
    pub unit_weight_lbs: Decimal,
    pub unit_price: Decimal,
    pub reorder_point: i32,
    pub reorder_quantity: i32,
    pub paper_weight_gsm: i32,
    pub sheet_size: String,
    pub sheets_per_ream: i32,
    pub brightness: i32,
    pub is_recycled: bool,
    pub last_restock_date: NaiveDateTime,
    pub status: InventoryStatus,
}

/// One generated sales row, minus the inventory reference (the seeder
/// picks that from the inserted id pool).
#[derive(Debug, Clone)]
pub struct SaleDraw {
    pub sale_date: NaiveDate,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub customer_name: String,
    pub location_name: String,
}

/// One generated orders row, minus the inventory reference.
#[derive(Debug, Clone)]
pub struct OrderDraw {
    pub order_date: NaiveDate,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub customer_name: String,
    pub status: OrderStatus,
    pub expected_delivery_date: NaiveDate,
    pub location_name: String,
}

/// Generates one inventory row. `now` anchors the restock-date window so
/// generation is reproducible under test.
pub fn paper_product<R: Rng + ?Sized>(
    rng: &mut R,
    skus: &mut SkuRegistry,
    now: NaiveDateTime,
) -> PaperProduct {
    let current_stock = rng.gen_range(0..=1000);
    let reorder_point = rng.gen_range(50..=200);
    let company: String = CompanyName().fake_with_rng(rng);
    let category = pick(rng, &PRODUCT_CATEGORIES);

    PaperProduct {
        sku: skus.draw(rng),
        product_name: format!("{} {}", company, pick(rng, &PRODUCT_CATEGORIES)),
        category_name: category.to_string(),
        location_name: pick(rng, &LOCATIONS).to_string(),
        current_stock,
        unit_weight_lbs: money(rng, 100, 5000),
        unit_price: money(rng, 2000, 20000),
        reorder_point,
        reorder_quantity: reorder_point * 2,
        paper_weight_gsm: PAPER_WEIGHTS_GSM[rng.gen_range(0..PAPER_WEIGHTS_GSM.len())],
        sheet_size: pick(rng, &SHEET_SIZES).to_string(),
        sheets_per_ream: SHEETS_PER_REAM[rng.gen_range(0..SHEETS_PER_REAM.len())],
        brightness: rng.gen_range(84..=98),
        is_recycled: rng.gen_bool(0.5),
        last_restock_date: now - Duration::seconds(rng.gen_range(0..SECONDS_PER_YEAR)),
        status: InventoryStatus::for_stock_level(current_stock, reorder_point),
    }
}

/// Generates one sales row with a sale date in the year before `today`.
pub fn sale<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> SaleDraw {
    let quantity = rng.gen_range(1..=100);
    let unit_price = money(rng, 2000, 20000);
    SaleDraw {
        sale_date: today - Days::new(rng.gen_range(0..=365)),
        quantity,
        unit_price,
        total_amount: total_amount(quantity, unit_price),
        customer_name: CompanyName().fake_with_rng(rng),
        location_name: pick(rng, &LOCATIONS).to_string(),
    }
}

/// Generates one pending order: placed in the 30 days before `today`,
/// due 1 to 30 days after it. The delivery date therefore always falls
/// strictly after the order date.
pub fn purchase_order<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> OrderDraw {
    let quantity = rng.gen_range(1..=100);
    let unit_price = money(rng, 2000, 20000);
    OrderDraw {
        order_date: today - Days::new(rng.gen_range(0..=30)),
        quantity,
        unit_price,
        total_amount: total_amount(quantity, unit_price),
        customer_name: CompanyName().fake_with_rng(rng),
        status: OrderStatus::Pending,
        expected_delivery_date: today + Days::new(rng.gen_range(1..=30)),
        location_name: pick(rng, &LOCATIONS).to_string(),
    }
}

fn total_amount(quantity: i32, unit_price: Decimal) -> Decimal {
    (Decimal::from(quantity) * unit_price).round_dp(2)
}

// Uniform two-decimal value drawn in cents, so amounts are exact.
fn money<R: Rng + ?Sized>(rng: &mut R, min_cents: i64, max_cents: i64) -> Decimal {
    Decimal::new(rng.gen_range(min_cents..=max_cents), 2)
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, options: &[&'a str]) -> &'a str {
    options[rng.gen_range(0..options.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use regex::Regex;
    use rust_decimal_macros::dec;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn skus_are_distinct_and_well_formed() {
        let mut rng = rng();
        let mut skus = SkuRegistry::new();
        let pattern = Regex::new(r"^DM-(CP|RC|GL|CV)-\d{4}$").unwrap();

        let drawn: Vec<String> = (0..500).map(|_| skus.draw(&mut rng)).collect();
        assert_eq!(skus.len(), 500);
        for sku in &drawn {
            assert!(pattern.is_match(sku), "malformed SKU {sku}");
        }
        let unique: HashSet<&String> = drawn.iter().collect();
        assert_eq!(unique.len(), drawn.len());
    }

    #[test]
    fn products_stay_inside_generation_ranges() {
        let mut rng = rng();
        let mut skus = SkuRegistry::new();
        let now = Utc::now().naive_utc();

        for _ in 0..200 {
            let p = paper_product(&mut rng, &mut skus, now);
            assert!((0..=1000).contains(&p.current_stock));
            assert!((50..=200).contains(&p.reorder_point));
            assert_eq!(p.reorder_quantity, p.reorder_point * 2);
            assert!(p.unit_price >= dec!(20.00) && p.unit_price <= dec!(200.00));
            assert!(p.unit_weight_lbs >= dec!(1.00) && p.unit_weight_lbs <= dec!(50.00));
            assert_eq!(p.unit_price.scale(), 2);
            assert!((84..=98).contains(&p.brightness));
            assert!(PAPER_WEIGHTS_GSM.contains(&p.paper_weight_gsm));
            assert!(SHEETS_PER_REAM.contains(&p.sheets_per_ream));
            assert!(LOCATIONS.contains(&p.location_name.as_str()));
            assert!(SHEET_SIZES.contains(&p.sheet_size.as_str()));
            assert!(p.last_restock_date <= now);
            assert!(p.last_restock_date > now - Duration::days(366));
        }
    }

    #[test]
    fn product_status_follows_stock_rule() {
        let mut rng = rng();
        let mut skus = SkuRegistry::new();
        let now = Utc::now().naive_utc();
        let mut seen_low = false;
        let mut seen_in = false;

        for _ in 0..300 {
            let p = paper_product(&mut rng, &mut skus, now);
            let expected = if p.current_stock <= p.reorder_point {
                seen_low = true;
                InventoryStatus::LowStock
            } else {
                seen_in = true;
                InventoryStatus::InStock
            };
            assert_eq!(p.status, expected);
        }
        assert!(seen_low && seen_in, "300 draws should produce both statuses");
    }

    #[test]
    fn sale_totals_are_quantity_times_price() {
        let mut rng = rng();
        let today = Utc::now().date_naive();

        for _ in 0..200 {
            let s = sale(&mut rng, today);
            assert!((1..=100).contains(&s.quantity));
            assert_eq!(
                s.total_amount,
                (Decimal::from(s.quantity) * s.unit_price).round_dp(2)
            );
            assert!(s.sale_date <= today);
            assert!(s.sale_date >= today - Days::new(365));
            assert!(LOCATIONS.contains(&s.location_name.as_str()));
            assert!(!s.customer_name.is_empty());
        }
    }

    #[test]
    fn orders_are_pending_and_due_after_order_date() {
        let mut rng = rng();
        let today = Utc::now().date_naive();

        for _ in 0..200 {
            let o = purchase_order(&mut rng, today);
            assert_eq!(o.status, OrderStatus::Pending);
            assert!(o.expected_delivery_date > o.order_date);
            assert!(o.expected_delivery_date > today);
            assert!(o.expected_delivery_date <= today + Days::new(30));
            assert!(o.order_date <= today);
            assert!(o.order_date >= today - Days::new(30));
            assert_eq!(
                o.total_amount,
                (Decimal::from(o.quantity) * o.unit_price).round_dp(2)
            );
        }
    }
}
