//! Receipt

use std::io;

use rust_decimal::Decimal;
use tabled::{builder::Builder, settings::Style};

use crate::{cart::Cart, catalog::Catalog, coupons::CouponStore};

/// Totals summary for a cart, as shown on the cart and checkout pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Sum of line totals before any discount
    subtotal: Decimal,

    /// Amount taken off by the applied coupon
    discount: Decimal,

    /// Final payable amount
    total: Decimal,
}

impl Receipt {
    /// Build a receipt from the cart's current contents and coupon.
    pub fn for_cart<S: CouponStore>(cart: &Cart, coupons: &S) -> Self {
        let subtotal = cart.subtotal();
        let total = cart.total(coupons);

        Self {
            subtotal,
            discount: subtotal - total,
            total,
        }
    }

    /// Total cost before the discount.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Amount saved by the coupon.
    pub fn savings(&self) -> Decimal {
        self.discount
    }

    /// Final payable amount.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Render the cart lines and totals as a table.
    ///
    /// Lines whose product no longer resolves in the catalog are omitted,
    /// matching [`Cart::entries`].
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] if writing fails.
    pub fn write_to<C: Catalog>(
        &self,
        w: &mut impl io::Write,
        cart: &Cart,
        catalog: &C,
    ) -> io::Result<()> {
        let mut builder = Builder::default();

        builder.push_record(["Product", "Unit price", "Qty", "Line total"]);

        for entry in cart.entries(catalog) {
            builder.push_record([
                entry.product.name.clone(),
                format!("{:.2}", entry.unit_price),
                entry.quantity.to_string(),
                format!("{:.2}", entry.line_total),
            ]);
        }

        builder.push_record([
            "Subtotal".to_string(),
            String::new(),
            String::new(),
            format!("{:.2}", self.subtotal),
        ]);

        if !self.discount.is_zero() {
            builder.push_record([
                "Discount".to_string(),
                String::new(),
                String::new(),
                format!("-{:.2}", self.discount),
            ]);
        }

        builder.push_record([
            "Total".to_string(),
            String::new(),
            String::new(),
            format!("{:.2}", self.total),
        ]);

        let mut table = builder.build();
        table.with(Style::rounded());

        writeln!(w, "{table}")
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::{
        catalog::InMemoryCatalog,
        coupons::{Coupon, InMemoryCoupons},
        products::Product,
    };

    use super::*;

    fn setup() -> TestResult<(InMemoryCatalog, InMemoryCoupons, Cart)> {
        let mut catalog = InMemoryCatalog::new();
        let key = catalog.insert(Product::new("Biryani", "biryani", Decimal::new(450, 0)))?;
        let product = catalog.product(key).cloned().expect("product exists");

        let mut coupons = InMemoryCoupons::new();
        coupons.insert(Coupon {
            code: "SAVE".to_string(),
            discount_amount: Decimal::new(50, 0),
            discount_percentage: 10,
            min_order_amount: Decimal::new(500, 0),
            valid_from: Timestamp::UNIX_EPOCH,
            valid_to: Timestamp::MAX,
            active: true,
        });

        let mut cart = Cart::new();
        cart.add(key, &product, 2)?;

        Ok((catalog, coupons, cart))
    }

    #[test]
    fn receipt_without_coupon_has_no_savings() -> TestResult {
        let (_catalog, coupons, cart) = setup()?;

        let receipt = Receipt::for_cart(&cart, &coupons);

        assert_eq!(receipt.subtotal(), Decimal::new(900, 0));
        assert_eq!(receipt.savings(), Decimal::ZERO);
        assert_eq!(receipt.total(), Decimal::new(900, 0));

        Ok(())
    }

    #[test]
    fn receipt_with_coupon_reports_savings() -> TestResult {
        let (_catalog, coupons, mut cart) = setup()?;

        cart.apply_coupon("save", &coupons, Timestamp::now())?;

        let receipt = Receipt::for_cart(&cart, &coupons);

        assert_eq!(receipt.savings(), Decimal::new(140_00, 2));
        assert_eq!(receipt.total(), Decimal::new(760_00, 2));

        Ok(())
    }

    #[test]
    fn write_to_renders_lines_and_totals() -> TestResult {
        let (catalog, coupons, mut cart) = setup()?;

        cart.apply_coupon("save", &coupons, Timestamp::now())?;

        let receipt = Receipt::for_cart(&cart, &coupons);

        let mut out = Vec::new();
        receipt.write_to(&mut out, &cart, &catalog)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Biryani"), "missing product row");
        assert!(rendered.contains("Subtotal"), "missing subtotal row");
        assert!(rendered.contains("Discount"), "missing discount row");
        assert!(rendered.contains("760.00"), "missing payable total");

        Ok(())
    }

    #[test]
    fn write_to_renders_amounts_at_currency_precision() -> TestResult {
        // Whole-number amounts keep their operand scale inside Decimal;
        // the rendered table must still show two decimal places.
        let (catalog, coupons, mut cart) = setup()?;

        cart.apply_coupon("save", &coupons, Timestamp::now())?;

        let receipt = Receipt::for_cart(&cart, &coupons);

        let mut out = Vec::new();
        receipt.write_to(&mut out, &cart, &catalog)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("450.00"), "unit price not 2 dp");
        assert!(rendered.contains("900.00"), "subtotal not 2 dp");
        assert!(rendered.contains("-140.00"), "discount not 2 dp");
        assert!(!rendered.contains("│ 760 "), "total rendered without scale");

        Ok(())
    }
}
