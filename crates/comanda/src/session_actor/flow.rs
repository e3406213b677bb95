//! The conversation graph.
//!
//! `drive` is the single entry point: it takes the session, one inbound
//! event and the shared context, mutates the session and returns what to
//! say. Commands that must work from anywhere (goodbye, greeting, the
//! product-detail buttons) are matched before the per-state logic, in that
//! order, so a customer is never trapped in a state.

use super::entity::{ChatState, Session, SessionContext};
use super::replies;
use crate::model::OrderDraft;
use crate::whatsapp::{Inbound, Outbound};
use tracing::warn;

/// Words that drop the whole operation, from any state.
const EXIT_WORDS: [&str; 3] = ["salir", "cancelar", "break"];
/// Words (and the welcome button id) that open the catalog, from any state.
const MENU_WORDS: [&str; 6] = ["hola", "menú", "menu", "catálogo", "pedir", "menu_productos"];

pub(crate) async fn drive(
    session: &mut Session,
    event: Inbound,
    ctx: &SessionContext,
) -> Vec<Outbound> {
    // Button ids and typed text travel the same lane; locations and
    // unsupported media carry no text.
    let content: Option<String> = match &event {
        Inbound::Text(body) => Some(body.trim().to_string()),
        Inbound::Selection(id) => Some(id.clone()),
        Inbound::Location(_) | Inbound::Unsupported => None,
    };
    let lowered = content.as_deref().map(str::to_lowercase);

    if let Some(word) = lowered.as_deref() {
        if EXIT_WORDS.contains(&word) {
            session.cart.clear();
            session.state = ChatState::Ended;
            return vec![replies::goodbye()];
        }
        if MENU_WORDS.contains(&word) {
            session.view.first_page();
            session.state = ChatState::Browsing;
            return vec![catalog_reply(session, ctx)];
        }
        if word == "ayuda" {
            return vec![replies::help()];
        }
    }

    // The product-detail buttons outrank the per-state logic so they work
    // no matter where the conversation wandered off to in between.
    if let Some(id) = content.as_deref() {
        if let Some(product_id) = id
            .strip_prefix("add_product_")
            .and_then(|raw| raw.parse::<u32>().ok())
        {
            return match ctx.catalog.get(product_id) {
                Some(product) => {
                    session.state = ChatState::AwaitingQuantity { product_id };
                    vec![replies::ask_quantity(&product.name)]
                }
                None => {
                    session.state = ChatState::Browsing;
                    vec![replies::add_product_error()]
                }
            };
        }
        if id == "cancel_selection" {
            session.state = ChatState::Browsing;
            return vec![catalog_reply(session, ctx)];
        }
    }

    match session.state.clone() {
        ChatState::Start => match content.as_deref() {
            Some("ver_carrito") => {
                session.state = ChatState::ManagingCart;
                vec![replies::cart_menu(&session.cart)]
            }
            _ => vec![replies::welcome()],
        },
        ChatState::Browsing => browse(session, content.as_deref(), ctx),
        ChatState::ChoosingCategory => choose_category(session, content.as_deref(), ctx),
        ChatState::AwaitingQuantity { product_id } => {
            take_quantity(session, product_id, content.as_deref(), ctx)
        }
        ChatState::AwaitingNote {
            product_id,
            quantity,
        } => take_note(session, product_id, quantity, content.as_deref(), ctx),
        ChatState::ManagingCart => manage_cart(session, content.as_deref(), ctx),
        ChatState::AwaitingRemoval => remove_line(session, content.as_deref()),
        ChatState::AwaitingLocation => confirm_location(session, &event, ctx).await,
        ChatState::OrderPlaced => {
            session.state = ChatState::Start;
            vec![replies::state_error()]
        }
        ChatState::Ended => vec![replies::ended_reminder()],
    }
}

/// Renders the catalog for the session's view and writes the clamped page
/// back, so "next" past the end does not leave the view stranded.
fn catalog_reply(session: &mut Session, ctx: &SessionContext) -> Outbound {
    let page = ctx.catalog.page(&session.view);
    session.view.page = page.page;
    replies::catalog_list(&session.name, &page, !session.cart.is_empty())
}

fn browse(session: &mut Session, content: Option<&str>, ctx: &SessionContext) -> Vec<Outbound> {
    let Some(id) = content else {
        return vec![replies::browse_nudge()];
    };

    if let Some(raw) = id.strip_prefix("product_id_") {
        return match raw.parse::<u32>().ok().and_then(|pid| ctx.catalog.get(pid)) {
            Some(product) => vec![replies::product_detail(product)],
            None => vec![replies::product_not_found()],
        };
    }

    match id {
        "siguientes_productos" => {
            session.view.next_page();
            vec![catalog_reply(session, ctx)]
        }
        "volver_pagina" => {
            session.view.prev_page();
            vec![catalog_reply(session, ctx)]
        }
        "ordenar" => {
            session.view.toggle_sort();
            vec![catalog_reply(session, ctx)]
        }
        "filtrar" => {
            session.state = ChatState::ChoosingCategory;
            vec![replies::category_prompt(&ctx.catalog.categories())]
        }
        "ver_carrito" => {
            session.state = ChatState::ManagingCart;
            vec![replies::cart_menu(&session.cart)]
        }
        _ => vec![replies::browse_nudge()],
    }
}

fn choose_category(
    session: &mut Session,
    content: Option<&str>,
    ctx: &SessionContext,
) -> Vec<Outbound> {
    let Some(raw) = content else {
        return vec![replies::category_prompt(&ctx.catalog.categories())];
    };

    if raw.trim().eq_ignore_ascii_case("todos") {
        session.view.set_category(None);
        session.state = ChatState::Browsing;
        return vec![catalog_reply(session, ctx)];
    }

    match ctx.catalog.find_category(raw) {
        Some(category) => {
            session.view.set_category(Some(category));
            session.state = ChatState::Browsing;
            vec![catalog_reply(session, ctx)]
        }
        None => vec![replies::category_prompt(&ctx.catalog.categories())],
    }
}

fn take_quantity(
    session: &mut Session,
    product_id: u32,
    content: Option<&str>,
    ctx: &SessionContext,
) -> Vec<Outbound> {
    let Some(quantity) = content.and_then(|raw| raw.trim().parse::<u32>().ok()) else {
        return vec![replies::invalid_quantity()];
    };

    if quantity == 0 || ctx.catalog.get(product_id).is_none() {
        session.state = ChatState::Browsing;
        return vec![replies::quantity_process_error()];
    }

    session.state = ChatState::AwaitingNote {
        product_id,
        quantity,
    };
    vec![replies::ask_note(quantity)]
}

fn take_note(
    session: &mut Session,
    product_id: u32,
    quantity: u32,
    content: Option<&str>,
    ctx: &SessionContext,
) -> Vec<Outbound> {
    let Some(product) = ctx.catalog.get(product_id) else {
        session.state = ChatState::Browsing;
        return vec![replies::process_error()];
    };

    // 'No' (any casing) means no note.
    let note = match content {
        Some(raw) if !raw.trim().eq_ignore_ascii_case("no") => raw.trim().to_string(),
        _ => String::new(),
    };

    session.cart.add(product, quantity, note);
    session.state = ChatState::ManagingCart;
    vec![replies::cart_menu(&session.cart)]
}

fn manage_cart(
    session: &mut Session,
    content: Option<&str>,
    ctx: &SessionContext,
) -> Vec<Outbound> {
    match content.map(str::trim) {
        Some("1") => {
            if session.cart.is_empty() {
                session.state = ChatState::Browsing;
                session.view.first_page();
                return vec![replies::cart_empty_back(), catalog_reply(session, ctx)];
            }
            session.state = ChatState::AwaitingRemoval;
            vec![replies::removal_list(&session.cart)]
        }
        Some("2") => {
            session.state = ChatState::Browsing;
            session.view.first_page();
            vec![catalog_reply(session, ctx)]
        }
        Some("3") => {
            if session.cart.is_empty() {
                session.state = ChatState::Browsing;
                session.view.first_page();
                return vec![replies::cart_empty_back(), catalog_reply(session, ctx)];
            }
            session.state = ChatState::AwaitingLocation;
            vec![replies::confirm_prompt()]
        }
        _ => vec![replies::invalid_cart_option(&session.cart)],
    }
}

fn remove_line(session: &mut Session, content: Option<&str>) -> Vec<Outbound> {
    let Some(number) = content.and_then(|raw| raw.trim().parse::<usize>().ok()) else {
        return vec![replies::removal_nudge()];
    };

    let len = session.cart.len();
    if number == 0 || number > len {
        return vec![replies::removal_out_of_range(len)];
    }

    let _ = session.cart.remove(number - 1);
    session.state = ChatState::ManagingCart;
    vec![replies::removal_done(&session.cart)]
}

/// The one step that leaves the session: the cart is snapshotted into a
/// draft and handed to dispatch. A failure keeps the cart so the customer
/// can try again.
async fn confirm_location(
    session: &mut Session,
    event: &Inbound,
    ctx: &SessionContext,
) -> Vec<Outbound> {
    let Inbound::Location(point) = event else {
        return vec![replies::ask_location()];
    };

    let draft = OrderDraft {
        customer: session.phone.clone(),
        lines: session.cart.lines().to_vec(),
        location: *point,
    };

    match ctx.dispatch.place_order(draft).await {
        Ok(receipt) => {
            session.cart.clear();
            session.state = ChatState::OrderPlaced;
            vec![replies::order_confirmed(&receipt)]
        }
        Err(error) => {
            warn!(phone = %session.phone, %error, "Order could not be dispatched");
            session.state = ChatState::ManagingCart;
            vec![replies::order_failed()]
        }
    }
}
