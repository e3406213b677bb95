//! # Comanda Bot
//!
//! WhatsApp food-ordering bot built on two actors:
//!
//! - **[session_actor](comanda::session_actor)**: one conversation per
//!   phone number, driving catalog, cart and checkout in Spanish.
//! - **[dispatch_actor](comanda::dispatch_actor)**: zone queues, tanda
//!   batching, route planning and the courier fleet.
//!
//! The binary is a scripted demo of the whole pipeline: it registers the
//! fleet, walks one customer from "Hola" to a confirmed order, fills a
//! zone queue until a tanda is cut, then rides the route stop by stop and
//! prints the zone report and courier metrics.
//!
//! Run with `RUST_LOG=debug` to also see every outbound Cloud API payload.

use comanda::catalog::Catalog;
use comanda::config::BotConfig;
use comanda::geo::GeoPoint;
use comanda::lifecycle::{setup_tracing, BotSystem};
use comanda::model::{Cart, OrderDraft, OrderReceipt};
use comanda::whatsapp::Inbound;
use tracing::{debug, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();
    dotenvy::dotenv().ok();

    let config = BotConfig::from_env();
    info!(
        lat = config.restaurant.lat,
        lon = config.restaurant.lon,
        tanda_size = config.dispatch.tanda_size,
        "Starting comanda bot"
    );

    let system = BotSystem::new(config);

    // The fleet, as the restaurant names them.
    let mut courier_ids = Vec::new();
    for name in ["Carlos (NO)", "Ana (NE)", "Pedro (SO)", "Maria (SE)"] {
        let id = system
            .dispatch
            .register_courier(name.to_string())
            .await
            .map_err(|e| e.to_string())?;
        courier_ids.push(id);
    }

    // One customer orders dinner, start to finish.
    let phone = "59899123456".to_string();
    let script: Vec<(&str, Inbound)> = vec![
        ("greeting", Inbound::Text("Hola".to_string())),
        ("pick product", Inbound::Selection("product_id_1".to_string())),
        ("add to cart", Inbound::Selection("add_product_1".to_string())),
        ("quantity", Inbound::Text("2".to_string())),
        ("note", Inbound::Text("sin tomate".to_string())),
        ("confirm order", Inbound::Text("3".to_string())),
        ("location", Inbound::Location(GeoPoint::new(-34.88, -56.15))),
    ];

    let span = tracing::info_span!("conversation", customer = %phone);
    async {
        for (step, event) in script {
            let replies = system
                .sessions
                .deliver(phone.clone(), Some("Lucía".to_string()), event)
                .await
                .map_err(|e| e.to_string())?;
            for reply in &replies {
                debug!(payload = %reply.to_payload(&phone), "Outbound");
            }
            info!(step, replies = replies.len(), "Step answered");
        }
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    // Now fill the southeast queue until a tanda is cut; the customer's
    // order above sits in the northeast queue and stays there, one short
    // of a batch.
    let catalog = Catalog::house_menu();
    let mut receipts: Vec<OrderReceipt> = Vec::new();
    let span = tracing::info_span!("dispatch_burst");
    async {
        for i in 0..7u32 {
            let location = GeoPoint::new(-34.91, -56.16 + 0.002 * f64::from(i));
            let draft = takeaway_draft(&catalog, &format!("5989900010{i}"), i + 1, 1, location)?;
            let receipt = system
                .dispatch
                .place_order(draft)
                .await
                .map_err(|e| e.to_string())?;
            info!(code = %receipt.code, zone = %receipt.zone, km = receipt.distance_km, "Order placed");
            receipts.push(receipt);
        }
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    // The tanda went to the first idle courier; ride the route in order.
    let carlos = courier_ids[0];
    receipts.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    let span = tracing::info_span!("route", courier = %carlos);
    async {
        for receipt in &receipts {
            let outcome = system
                .dispatch
                .confirm_stop(carlos, receipt.code.as_str().to_string())
                .await
                .map_err(|e| e.to_string())?;
            info!(
                code = %outcome.code,
                remaining = outcome.remaining,
                completed = outcome.completed,
                "Stop confirmed"
            );
        }
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    for status in system.dispatch.zone_report().await.map_err(|e| e.to_string())? {
        info!(
            zone = %status.zone,
            queued = status.queued,
            pending = status.pending_tandas,
            active = status.active_tandas,
            "Zone status"
        );
    }
    for courier in system.dispatch.couriers().await.map_err(|e| e.to_string())? {
        info!(
            id = %courier.id,
            name = %courier.name,
            delivered = courier.stats.orders_delivered,
            km = courier.stats.distance_km,
            fuel = courier.stats.fuel_litres,
            "Courier stats"
        );
    }

    system.shutdown().await?;
    Ok(())
}

/// One-line order for the dispatch burst, bypassing the conversation.
fn takeaway_draft(
    catalog: &Catalog,
    phone: &str,
    product_id: u32,
    quantity: u32,
    location: GeoPoint,
) -> Result<OrderDraft, String> {
    let product = catalog
        .get(product_id)
        .ok_or_else(|| format!("unknown product {product_id}"))?;
    let mut cart = Cart::default();
    cart.add(product, quantity, "");
    Ok(OrderDraft {
        customer: phone.to_string(),
        lines: cart.lines().to_vec(),
        location,
    })
}
