//! `vitrine shop`: query the Shopify APIs and print the result as JSON.
//!
//! An unconfigured client or a failed call still prints something: `null`
//! for single records and `[]` for lists, so scripts can keep piping.

use super::args::ShopCommand;
use crate::commerce::types::Tracking;
use crate::commerce::{AdminClient, StorefrontClient};
use crate::config::SiteConfig;
use anyhow::{Context, Result};
use serde::Serialize;

pub fn run(config: &SiteConfig, command: &ShopCommand) -> Result<()> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    let json = rt.block_on(dispatch(config, command))?;
    println!("{json}");
    Ok(())
}

async fn dispatch(config: &SiteConfig, command: &ShopCommand) -> Result<String> {
    let shopify = &config.shopify;

    match command {
        ShopCommand::Product { handle } => {
            let product = match StorefrontClient::from_config(shopify) {
                Some(client) => client.product_by_handle(handle).await,
                None => None,
            };
            pretty(&product)
        }
        ShopCommand::Products { first } => {
            let products = match StorefrontClient::from_config(shopify) {
                Some(client) => client.products(*first).await,
                None => Vec::new(),
            };
            pretty(&products)
        }
        ShopCommand::CartCreate { lines } => {
            let cart = match StorefrontClient::from_config(shopify) {
                Some(client) => client.create_cart(lines).await,
                None => None,
            };
            pretty(&cart)
        }
        ShopCommand::CartAdd { cart_id, lines } => {
            let cart = match StorefrontClient::from_config(shopify) {
                Some(client) => client.add_cart_lines(cart_id, lines).await,
                None => None,
            };
            pretty(&cart)
        }
        ShopCommand::Orders { limit } => {
            let orders = match AdminClient::from_config(shopify) {
                Some(client) => client.orders(*limit).await,
                None => Vec::new(),
            };
            pretty(&orders)
        }
        ShopCommand::Customers { limit } => {
            let customers = match AdminClient::from_config(shopify) {
                Some(client) => client.customers(*limit).await,
                None => Vec::new(),
            };
            pretty(&customers)
        }
        ShopCommand::Fulfill {
            order_id,
            tracking_number,
            tracking_company,
        } => {
            let tracking = Tracking {
                number: tracking_number.clone(),
                company: tracking_company.clone(),
            };
            let fulfillment = match AdminClient::from_config(shopify) {
                Some(client) => client.create_fulfillment(*order_id, &tracking).await,
                None => None,
            };
            pretty(&fulfillment)
        }
    }
}

fn pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to encode response")
}
