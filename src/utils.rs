//! Utils

use clap::Parser;

/// Arguments for the checkout demo
#[derive(Debug, Parser)]
pub struct DemoCheckoutArgs {
    /// Fixture set to use for the catalog & coupons
    #[clap(short, long, default_value = "store")]
    pub fixture: String,

    /// Coupon code to apply, if any
    #[clap(short, long)]
    pub coupon: Option<String>,

    /// Quantity of each demo product to add
    #[clap(short, long, default_value_t = 1)]
    pub quantity: u32,
}
