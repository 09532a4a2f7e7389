//! Checkout Example
//!
//! Walks a cart through the full storefront flow: load a fixture set, add
//! every product, optionally apply a coupon, print the receipt, and place
//! the order.
//!
//! Use `-f` to load a fixture set by name
//! Use `-c` to apply a coupon code
//! Use `-q` to set the quantity added per product

use std::io;

use anyhow::Result;
use clap::Parser;
use jiff::Timestamp;
use zaikest::{
    cart::Cart,
    catalog::Catalog,
    checkout::{CustomerDetails, place_order},
    fixtures::Fixture,
    orders::{InMemoryOrders, OrderStore},
    receipt::Receipt,
    session::{InMemorySession, load_cart, save_cart},
    utils::DemoCheckoutArgs,
};

/// Checkout Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = DemoCheckoutArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let slugs = [
        "biryani-pastes",
        "karahi-pastes",
        "shashlik-pastes",
    ];

    let mut session = InMemorySession::new();
    let mut cart = load_cart(&session);

    for slug in slugs {
        if let Some((key, product)) = fixture.catalog().product_by_slug(slug) {
            let product = product.clone();
            cart.add(key, &product, args.quantity)?;
        }
    }

    if let Some(code) = args.coupon.as_deref() {
        match cart.apply_coupon(code, fixture.coupons(), Timestamp::now()) {
            Ok(_) => println!("Coupon applied: {code}"),
            Err(error) => println!("{error}"),
        }
    }

    save_cart(&mut session, &cart)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    Receipt::for_cart(&cart, fixture.coupons()).write_to(
        &mut handle,
        &cart,
        fixture.catalog(),
    )?;

    let mut orders = InMemoryOrders::new();

    let details = CustomerDetails {
        customer_name: "Demo Customer".to_string(),
        phone_number: "0300-0000000".to_string(),
        delivery_address: "12 Canal Road".to_string(),
        city: "Lahore".to_string(),
        order_notes: String::new(),
    };

    let key = place_order(
        &mut cart,
        &details,
        fixture.coupons(),
        &mut orders,
        Timestamp::now(),
    )?;

    save_cart(&mut session, &cart)?;

    if let Some(order) = orders.order(key) {
        println!(
            "\nOrder placed for {}: {} ({} items)",
            order.customer.customer_name,
            order.total_amount,
            orders.order_items(key).len(),
        );
    }

    Ok(())
}
