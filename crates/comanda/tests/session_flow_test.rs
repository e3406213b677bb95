use comanda::config::BotConfig;
use comanda::geo::{GeoPoint, Zone};
use comanda::lifecycle::BotSystem;
use comanda::session_actor::ChatState;
use comanda::whatsapp::{Inbound, Outbound};

/// Delivers one event for `phone` and returns the bot's replies.
async fn say(system: &BotSystem, phone: &str, event: Inbound) -> Vec<Outbound> {
    system
        .sessions
        .deliver(phone.to_string(), None, event)
        .await
        .expect("Failed to deliver message")
}

fn text(event: &str) -> Inbound {
    Inbound::Text(event.to_string())
}

fn tap(id: &str) -> Inbound {
    Inbound::Selection(id.to_string())
}

/// Unwraps a single text reply.
fn only_text(replies: &[Outbound]) -> &str {
    assert_eq!(replies.len(), 1, "expected exactly one reply: {replies:?}");
    match &replies[0] {
        Outbound::Text { body } => body,
        other => panic!("expected a text reply, got {other:?}"),
    }
}

/// Product row ids of a single list reply, navigation section excluded.
fn product_rows(replies: &[Outbound]) -> Vec<String> {
    assert_eq!(replies.len(), 1, "expected exactly one reply: {replies:?}");
    match &replies[0] {
        Outbound::List { sections, .. } => {
            sections[0].rows.iter().map(|r| r.id.clone()).collect()
        }
        other => panic!("expected a list reply, got {other:?}"),
    }
}

#[tokio::test]
async fn test_full_conversation_places_an_order() {
    let system = BotSystem::new(BotConfig::default());
    let phone = "59899123456";

    // The first message creates the session; the profile name sticks.
    let replies = system
        .sessions
        .deliver(phone.to_string(), Some("Lucía".to_string()), text("Hola"))
        .await
        .expect("Failed to deliver greeting");
    assert!(matches!(replies[0], Outbound::List { .. }));
    if let Outbound::List { body, .. } = &replies[0] {
        assert!(body.contains("¡Hola Lucía!"));
    }

    // Pick a product from the list, then add it.
    let replies = say(&system, phone, tap("product_id_1")).await;
    match &replies[0] {
        Outbound::Buttons { body, buttons } => {
            assert!(body.contains("Hamburguesa Clásica"));
            assert_eq!(buttons[0].id, "add_product_1");
        }
        other => panic!("expected a detail card, got {other:?}"),
    }

    let replies = say(&system, phone, tap("add_product_1")).await;
    assert!(only_text(&replies).contains("cantidad"));

    let replies = say(&system, phone, text("2")).await;
    assert!(only_text(&replies).contains("2 unidad(es)"));

    // A note lands in the cart overview along with the line subtotal.
    let replies = say(&system, phone, text("sin tomate")).await;
    let body = only_text(&replies);
    assert!(body.contains("*1) Hamburguesa Clásica*"));
    assert!(body.contains("📝 Nota: sin tomate"));
    assert!(body.contains("💰 *Total: $900.00*"));
    assert!(body.contains("3. Confirmar orden"));

    let replies = say(&system, phone, text("3")).await;
    assert!(only_text(&replies).contains("Orden a punto de confirmarse"));

    // Sharing the location confirms the order and empties the cart.
    let replies = say(
        &system,
        phone,
        Inbound::Location(GeoPoint::new(-34.88, -56.15)),
    )
    .await;
    let body = only_text(&replies);
    assert!(body.contains("¡Pedido Confirmado!"));
    assert!(body.contains("2.69 km"));
    assert!(body.contains("NE delivery"));

    let session = system
        .sessions
        .peek(phone.to_string())
        .await
        .expect("Failed to peek session")
        .expect("Session should exist");
    assert_eq!(session.name, "Lucía");
    assert_eq!(session.state, ChatState::OrderPlaced);
    assert!(session.cart.is_empty());

    // The dispatcher now holds the order in its NE queue.
    let report = system
        .dispatch
        .zone_report()
        .await
        .expect("Failed to get zone report");
    let ne = report.iter().find(|s| s.zone == Zone::NE).expect("NE row");
    assert_eq!(ne.queued, 1);

    system.shutdown().await.expect("Failed to shut down");
}

#[tokio::test]
async fn test_catalog_navigation_sorting_and_filters() {
    let system = BotSystem::new(BotConfig::default());
    let phone = "59899000002";

    // Cheapest five first, and the fallback name is built from the phone.
    let replies = say(&system, phone, text("Hola")).await;
    if let Outbound::List { body, .. } = &replies[0] {
        assert!(body.contains("¡Hola Cliente_0002!"));
    }
    assert_eq!(
        product_rows(&replies),
        vec!["product_id_8", "product_id_3", "product_id_12", "product_id_4", "product_id_13"]
    );

    // Forward a page and back again.
    let replies = say(&system, phone, tap("siguientes_productos")).await;
    if let Outbound::List { sections, .. } = &replies[0] {
        assert_eq!(sections[0].title, "Menú - Pág. 2 de 5");
    }
    let replies = say(&system, phone, tap("volver_pagina")).await;
    if let Outbound::List { sections, .. } = &replies[0] {
        assert_eq!(sections[0].title, "Menú - Pág. 1 de 5");
    }

    // Category filter, case-insensitive, then cleared with 'Todos'.
    let replies = say(&system, phone, tap("filtrar")).await;
    assert!(only_text(&replies).contains("FILTRAR POR CATEGORÍA"));

    let replies = say(&system, phone, text("pizzas")).await;
    assert_eq!(
        product_rows(&replies),
        vec!["product_id_11", "product_id_2", "product_id_17", "product_id_7", "product_id_22"]
    );

    let replies = say(&system, phone, tap("filtrar")).await;
    assert!(only_text(&replies).contains("Todos"));
    let replies = say(&system, phone, text("Todos")).await;
    assert_eq!(product_rows(&replies)[0], "product_id_8");

    // Toggling the sort shows the most expensive products first.
    let replies = say(&system, phone, tap("ordenar")).await;
    assert_eq!(product_rows(&replies)[0], "product_id_23");

    let session = system
        .sessions
        .peek(phone.to_string())
        .await
        .expect("Failed to peek session")
        .expect("Session should exist");
    assert_eq!(session.state, ChatState::Browsing);
    assert_eq!(session.view.category, None);

    system.shutdown().await.expect("Failed to shut down");
}

#[tokio::test]
async fn test_cart_removal_and_cancel() {
    let system = BotSystem::new(BotConfig::default());
    let phone = "59899000003";

    // Two products in the cart: a burger and two sodas.
    say(&system, phone, text("Hola")).await;
    say(&system, phone, tap("add_product_1")).await;
    say(&system, phone, text("1")).await;
    say(&system, phone, text("No")).await;
    say(&system, phone, text("2")).await;
    say(&system, phone, tap("add_product_3")).await;
    say(&system, phone, text("2")).await;
    let replies = say(&system, phone, text("No")).await;
    assert!(only_text(&replies).contains("💰 *Total: $690.00*"));

    // Remove the second line.
    let replies = say(&system, phone, text("1")).await;
    let body = only_text(&replies);
    assert!(body.contains("Quitar producto"));
    assert!(body.contains("2) Refresco Cola (Lata) x2"));

    let replies = say(&system, phone, text("2")).await;
    assert!(only_text(&replies).contains("✅ Producto eliminado del carrito."));

    let session = system
        .sessions
        .peek(phone.to_string())
        .await
        .expect("Failed to peek session")
        .expect("Session should exist");
    assert_eq!(session.state, ChatState::ManagingCart);
    assert_eq!(session.cart.len(), 1);

    // Cancelling wipes the cart and ends the conversation.
    let replies = say(&system, phone, text("salir")).await;
    assert!(only_text(&replies).contains("Operación cancelada"));

    let session = system
        .sessions
        .peek(phone.to_string())
        .await
        .expect("Failed to peek session")
        .expect("Session should exist");
    assert_eq!(session.state, ChatState::Ended);
    assert!(session.cart.is_empty());

    // A greeting revives the ended session.
    let replies = say(&system, phone, text("Hola")).await;
    assert!(matches!(replies[0], Outbound::List { .. }));

    system.shutdown().await.expect("Failed to shut down");
}

#[tokio::test]
async fn test_quantity_validation_and_unknown_product() {
    let system = BotSystem::new(BotConfig::default());
    let phone = "59899000004";

    say(&system, phone, text("Hola")).await;

    // Adding a product that is not on the menu is a soft error.
    let replies = say(&system, phone, tap("add_product_99")).await;
    assert!(only_text(&replies).contains("Error al agregar producto"));

    say(&system, phone, tap("add_product_1")).await;

    // Non-numeric input re-asks without losing the pending product.
    let replies = say(&system, phone, text("dos")).await;
    assert!(only_text(&replies).contains("cantidad válida"));
    let session = system
        .sessions
        .peek(phone.to_string())
        .await
        .expect("Failed to peek session")
        .expect("Session should exist");
    assert_eq!(session.state, ChatState::AwaitingQuantity { product_id: 1 });

    // Zero aborts back to browsing.
    let replies = say(&system, phone, text("0")).await;
    assert!(only_text(&replies).contains("Volviendo al menú"));
    let session = system
        .sessions
        .peek(phone.to_string())
        .await
        .expect("Failed to peek session")
        .expect("Session should exist");
    assert_eq!(session.state, ChatState::Browsing);
    assert!(session.cart.is_empty());

    system.shutdown().await.expect("Failed to shut down");
}

#[tokio::test]
async fn test_welcome_buttons_and_empty_cart_paths() {
    let system = BotSystem::new(BotConfig::default());
    let phone = "59899000005";

    // Anything that is not a greeting gets the three-button welcome.
    let replies = say(&system, phone, text("buenas")).await;
    match &replies[0] {
        Outbound::Buttons { buttons, .. } => {
            let ids: Vec<&str> = buttons.iter().map(|b| b.id.as_str()).collect();
            assert_eq!(ids, vec!["menu_productos", "ver_carrito", "ayuda"]);
        }
        other => panic!("expected the welcome buttons, got {other:?}"),
    }

    // The cart button works before anything was ever added.
    let replies = say(&system, phone, tap("ver_carrito")).await;
    let body = only_text(&replies);
    assert!(body.contains("🛒 Tu carrito está vacío."));
    assert!(body.contains("1. Quitar un producto"));

    // Option 1 on an empty cart bounces back to the catalog.
    let replies = say(&system, phone, text("1")).await;
    assert_eq!(replies.len(), 2);
    assert!(only_text(&replies[..1]).contains("Volviendo al menú"));
    assert!(matches!(replies[1], Outbound::List { .. }));

    // An off-menu option re-prints the cart menu.
    say(&system, phone, tap("ver_carrito")).await;
    let replies = say(&system, phone, text("9")).await;
    assert!(only_text(&replies).contains("Opción no válida"));

    // Help is available from any state and changes nothing.
    let replies = say(&system, phone, text("ayuda")).await;
    assert!(only_text(&replies).contains("❓ *Ayuda*"));
    let session = system
        .sessions
        .peek(phone.to_string())
        .await
        .expect("Failed to peek session")
        .expect("Session should exist");
    assert_eq!(session.state, ChatState::ManagingCart);

    system.shutdown().await.expect("Failed to shut down");
}

#[tokio::test]
async fn test_location_is_only_understood_when_asked_for() {
    let system = BotSystem::new(BotConfig::default());
    let phone = "59899000006";

    say(&system, phone, text("Hola")).await;

    // A pin while browsing is just a nudge back to the menu.
    let replies = say(
        &system,
        phone,
        Inbound::Location(GeoPoint::new(-34.88, -56.15)),
    )
    .await;
    assert!(only_text(&replies).contains("Ver Menú"));

    // Typed text while a location is expected re-asks for the pin.
    say(&system, phone, tap("add_product_1")).await;
    say(&system, phone, text("1")).await;
    say(&system, phone, text("No")).await;
    say(&system, phone, text("3")).await;
    let replies = say(&system, phone, text("aquí cerca")).await;
    assert!(only_text(&replies).contains("envíame tu ubicación"));

    system.shutdown().await.expect("Failed to shut down");
}
