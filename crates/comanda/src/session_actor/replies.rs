//! Every message the bot sends, in one place.
//!
//! The conversation is in Spanish; the wording follows the restaurant's
//! ticket style and is relied on by the flow tests, so treat the strings
//! as part of the interface.

use crate::catalog::CatalogPage;
use crate::model::{Cart, OrderReceipt, Product};
use crate::whatsapp::{ListRow, ListSection, Outbound, ReplyButton};

pub(crate) fn goodbye() -> Outbound {
    Outbound::text("👋 ¡Operación cancelada! Puedes volver a empezar escribiendo 'Menú' o 'Hola'.")
}

/// Three-button opener for customers who have not asked for anything yet.
pub(crate) fn welcome() -> Outbound {
    Outbound::Buttons {
        body: "Bienvenido 👋\nSelecciona una opción:".to_string(),
        buttons: vec![
            ReplyButton::new("menu_productos", "📦 Ver Productos"),
            ReplyButton::new("ver_carrito", "🛒 Ver Carrito"),
            ReplyButton::new("ayuda", "❓ Ayuda"),
        ],
    }
}

pub(crate) fn help() -> Outbound {
    Outbound::text(
        "❓ *Ayuda*\n\
         Escribe 'Menú' para ver el catálogo y arma tu pedido desde la lista.\n\
         En el carrito puedes quitar productos o confirmar la orden.\n\
         Escribe 'Salir' para cancelar la operación en cualquier momento.",
    )
}

/// The interactive catalog list: one section of products, one of
/// navigation options. The cart shortcut only shows once there is
/// something in the cart.
pub(crate) fn catalog_list(name: &str, page: &CatalogPage, cart_has_items: bool) -> Outbound {
    let product_rows: Vec<ListRow> = page
        .items
        .iter()
        .map(|p| {
            ListRow::with_description(
                format!("product_id_{}", p.id),
                format!("[{}] {}", p.id, p.name),
                format!("${:.2} ({})", p.price, p.category),
            )
        })
        .collect();

    let mut option_rows = Vec::new();
    if page.has_next {
        option_rows.push(ListRow::with_description(
            "siguientes_productos",
            "Siguientes productos",
            "Navegar el menú",
        ));
    }
    if page.has_prev {
        option_rows.push(ListRow::with_description(
            "volver_pagina",
            "Volver pagina",
            "Navegar el menú",
        ));
    }
    option_rows.push(ListRow::with_description(
        "ordenar",
        "Ordenar",
        "Cambiar el orden de visualización",
    ));
    option_rows.push(ListRow::with_description(
        "filtrar",
        "Filtrar",
        "Buscar por categoría",
    ));
    if cart_has_items {
        option_rows.push(ListRow::with_description(
            "ver_carrito",
            "🛒 Ver Carrito",
            "Ver resumen y finalizar pedido",
        ));
    }

    Outbound::List {
        header: "Selecciona una opción o un producto del menú.".to_string(),
        body: format!("¡Hola {name}! Revisa nuestro menú. Solo se muestran 5 productos por página."),
        button: "Ver Menú".to_string(),
        sections: vec![
            ListSection {
                title: format!("Menú - Pág. {} de {}", page.page, page.total_pages),
                rows: product_rows,
            },
            ListSection {
                title: "Opciones de Navegación".to_string(),
                rows: option_rows,
            },
        ],
    }
}

/// Detail card for one product, description trimmed to 50 characters.
pub(crate) fn product_detail(product: &Product) -> Outbound {
    let short: String = product.description.chars().take(50).collect();
    Outbound::Buttons {
        body: format!(
            "Has seleccionado: *{}*\nPrecio: ${:.2}\nDescripción: {}...",
            product.name, product.price, short
        ),
        buttons: vec![
            ReplyButton::new(format!("add_product_{}", product.id), "➕ Agregar al Carrito"),
            ReplyButton::new("cancel_selection", "Volver al Menú"),
        ],
    }
}

pub(crate) fn product_not_found() -> Outbound {
    Outbound::text("Producto no encontrado. Selecciona uno válido del menú.")
}

pub(crate) fn browse_nudge() -> Outbound {
    Outbound::text(
        "Por favor, utiliza la opción *'Ver Menú'* para navegar o el comando 'Menú' si perdiste el botón.",
    )
}

pub(crate) fn add_product_error() -> Outbound {
    Outbound::text("Error al agregar producto. Vuelve a seleccionar en el menú principal.")
}

pub(crate) fn category_prompt(categories: &[String]) -> Outbound {
    Outbound::text(format!(
        "➡️ *FILTRAR POR CATEGORÍA*\nElige una de las siguientes:\n{}\nO escribe 'Todos' para quitar el filtro.",
        categories.join(", ")
    ))
}

pub(crate) fn ask_quantity(product_name: &str) -> Outbound {
    Outbound::text(format!(
        "Has seleccionado *{product_name}*.\n¿Qué *cantidad* deseas agregar? (Ingresa solo el número)"
    ))
}

pub(crate) fn ask_note(quantity: u32) -> Outbound {
    Outbound::text(format!(
        "Perfecto, *{quantity} unidad(es)*. Ahora, ¿tienes algún detalle o especificación? (ej: 'sin tomate').\nSi no tienes detalles, simplemente escribe 'No'."
    ))
}

pub(crate) fn invalid_quantity() -> Outbound {
    Outbound::text("Por favor, ingresa una cantidad válida (solo números).")
}

pub(crate) fn quantity_process_error() -> Outbound {
    Outbound::text("Cantidad no válida o error de proceso. Volviendo al menú.")
}

pub(crate) fn process_error() -> Outbound {
    Outbound::text("Error de proceso. Volviendo al menú.")
}

/// The cart rendered line by line, or the empty-cart line.
pub(crate) fn cart_overview(cart: &Cart) -> String {
    if cart.is_empty() {
        return "🛒 Tu carrito está vacío.".to_string();
    }

    let mut msg = "🛒 *Tu carrito:*\n".to_string();
    for (idx, line) in cart.lines().iter().enumerate() {
        msg.push_str(&format!(
            "\n*{}) {}*\nCantidad: {}\nPrecio: ${:.2}\nSubtotal: ${:.2}\n",
            idx + 1,
            line.name,
            line.quantity,
            line.unit_price,
            line.subtotal
        ));
        if !line.note.is_empty() {
            msg.push_str(&format!("📝 Nota: {}\n", line.note));
        }
    }
    msg.push_str(&format!("\n💰 *Total: ${:.2}*", cart.total()));
    msg
}

const CART_OPTIONS: &str =
    "\n\nElige una opción:\n1. Quitar un producto\n2. Seguir pidiendo\n3. Confirmar orden";

fn cart_menu_text(cart: &Cart) -> String {
    format!("{}{}", cart_overview(cart), CART_OPTIONS)
}

/// Cart overview plus the numbered options the `ManagingCart` state reads.
pub(crate) fn cart_menu(cart: &Cart) -> Outbound {
    Outbound::text(cart_menu_text(cart))
}

pub(crate) fn invalid_cart_option(cart: &Cart) -> Outbound {
    Outbound::text(format!(
        "Opción no válida. Por favor, selecciona 1, 2 o 3.\n\n{}",
        cart_menu_text(cart)
    ))
}

pub(crate) fn cart_empty_back() -> Outbound {
    Outbound::text("Tu carrito está vacío. Volviendo al menú para que puedas pedir.")
}

/// Numbered list the removal state indexes into.
pub(crate) fn removal_list(cart: &Cart) -> Outbound {
    let mut msg = format!(
        "🗑️ *Quitar producto*\nIngresa el número del producto que deseas eliminar (1-{}):\n",
        cart.len()
    );
    for (idx, line) in cart.lines().iter().enumerate() {
        msg.push_str(&format!("\n{}) {} x{}", idx + 1, line.name, line.quantity));
    }
    Outbound::text(msg)
}

pub(crate) fn removal_done(cart: &Cart) -> Outbound {
    Outbound::text(format!(
        "✅ Producto eliminado del carrito.\n\n{}",
        cart_menu_text(cart)
    ))
}

pub(crate) fn removal_out_of_range(len: usize) -> Outbound {
    Outbound::text(format!(
        "Número no válido. Ingresa el número del producto que deseas eliminar (1-{len}) o escribe 'Cancelar'."
    ))
}

pub(crate) fn removal_nudge() -> Outbound {
    Outbound::text("Por favor, ingresa el número del producto a eliminar o 'Cancelar' para volver.")
}

pub(crate) fn confirm_prompt() -> Outbound {
    Outbound::text(
        "✅ *Orden a punto de confirmarse!*\nPor favor, *envíame tu ubicación* para calcular la distancia y el tiempo de entrega.",
    )
}

pub(crate) fn ask_location() -> Outbound {
    Outbound::text("Por favor, *envíame tu ubicación* para poder procesar la entrega.")
}

pub(crate) fn order_confirmed(receipt: &OrderReceipt) -> Outbound {
    Outbound::text(format!(
        "🎉 *¡Pedido Confirmado!* 🎉\n\nDistancia al restaurante: *{:.2} km*\nTiempo de entrega estimado: *{} minutos*\nTu código de verificación es: *{}*\n\nTe notificaremos cuando tu {} delivery esté en camino. ¡Gracias!",
        receipt.distance_km, receipt.eta_minutes, receipt.code, receipt.zone
    ))
}

pub(crate) fn order_failed() -> Outbound {
    Outbound::text(
        "😔 No pudimos procesar tu pedido en este momento. Tu carrito sigue intacto, intenta confirmar de nuevo en unos minutos.",
    )
}

pub(crate) fn state_error() -> Outbound {
    Outbound::text("Error de estado. Escribe 'Hola' para reiniciar el menú.")
}

pub(crate) fn ended_reminder() -> Outbound {
    Outbound::text("Escribe 'Hola' o 'Menú' cuando quieras hacer un pedido.")
}
