//! # Catalog
//!
//! The menu and its browsing views. The product list is fixed at startup
//! (a real deployment would load it from the back office; here it is the
//! house menu, in code) and shared read-only between sessions. What varies
//! per customer is the [`CatalogView`]: which page, which category filter,
//! which price order.

use crate::model::Product;
use serde::{Deserialize, Serialize};

/// Products shown per catalog page. WhatsApp list messages get unwieldy past
/// a handful of rows, so pages stay small.
pub const PAGE_SIZE: usize = 5;

/// Price ordering for the catalog list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceSort {
    Asc,
    Desc,
}

impl PriceSort {
    pub fn flipped(self) -> Self {
        match self {
            PriceSort::Asc => PriceSort::Desc,
            PriceSort::Desc => PriceSort::Asc,
        }
    }
}

/// One customer's position in the catalog: page, filter and ordering.
///
/// Pages are 1-based because that is how they are printed ("Pág. 2 de 5").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogView {
    pub page: usize,
    pub category: Option<String>,
    pub sort: PriceSort,
}

impl Default for CatalogView {
    fn default() -> Self {
        Self {
            page: 1,
            category: None,
            sort: PriceSort::Asc,
        }
    }
}

impl CatalogView {
    pub fn next_page(&mut self) {
        self.page += 1;
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn first_page(&mut self) {
        self.page = 1;
    }

    /// Flips the price ordering and rewinds to the first page.
    pub fn toggle_sort(&mut self) {
        self.sort = self.sort.flipped();
        self.page = 1;
    }

    /// Sets (or clears) the category filter and rewinds to the first page.
    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category;
        self.page = 1;
    }
}

/// One rendered page of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    pub items: Vec<Product>,
    /// The page actually shown, after clamping the requested one.
    pub page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// The product list and the queries the conversation needs over it.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The house menu.
    pub fn house_menu() -> Self {
        Self::new(vec![
            Product::new(
                1,
                "Hamburguesa Clásica",
                "Minutas",
                450.00,
                "Carne, queso cheddar, lechuga y aderezo especial.",
            ),
            Product::new(
                2,
                "Pizza Margarita",
                "Pizzas",
                520.00,
                "Salsa de tomate, mozzarella y albahaca fresca.",
            ),
            Product::new(3, "Refresco Cola (Lata)", "Bebidas", 120.00, "Lata de 350ml."),
            Product::new(
                4,
                "Papas Fritas Grandes",
                "Acompañamientos",
                210.00,
                "Porción grande de papas fritas rústicas.",
            ),
            Product::new(
                5,
                "Tarta de Manzana",
                "Postres",
                280.00,
                "Clásica tarta con helado de vainilla.",
            ),
            Product::new(
                6,
                "Milanesa a Caballo",
                "Minutas",
                610.00,
                "Milanesa de ternera con dos huevos fritos.",
            ),
            Product::new(
                7,
                "Pizza Pepperoni",
                "Pizzas",
                650.00,
                "Masa fina, mozzarella y pepperoni.",
            ),
            Product::new(8, "Agua Mineral sin Gas", "Bebidas", 90.00, "Botella de 500ml."),
            Product::new(
                9,
                "Ensalada César",
                "Ensaladas",
                390.00,
                "Pollo grillado, crutones, queso parmesano y aderezo César.",
            ),
            Product::new(
                10,
                "Lomito Completo",
                "Minutas",
                720.00,
                "Lomo, jamón, queso, huevo, panceta, lechuga y tomate.",
            ),
            Product::new(
                11,
                "Pizza Fugazza",
                "Pizzas",
                500.00,
                "Cebolla, orégano y abundante mozzarella.",
            ),
            Product::new(
                12,
                "Jugo de Naranja Natural",
                "Bebidas",
                150.00,
                "Jugo de naranja exprimido al momento.",
            ),
            Product::new(
                13,
                "Aros de Cebolla",
                "Acompañamientos",
                250.00,
                "Crujientes aros de cebolla con salsa BBQ.",
            ),
            Product::new(
                14,
                "Flan Casero",
                "Postres",
                260.00,
                "Flan de huevo con dulce de leche y crema.",
            ),
            Product::new(
                15,
                "Sándwich Vegetariano",
                "Vegetariano",
                410.00,
                "Pan integral, palta, rúcula, tomate y queso.",
            ),
            Product::new(
                16,
                "Suprema de Pollo",
                "Minutas",
                580.00,
                "Pechuga de pollo empanada y frita.",
            ),
            Product::new(
                17,
                "Pizza Napolitana",
                "Pizzas",
                580.00,
                "Tomate, mozzarella, ajo y perejil.",
            ),
            Product::new(
                18,
                "Cerveza Artesanal IPA",
                "Cervezas",
                320.00,
                "Botella de 500ml.",
            ),
            Product::new(
                19,
                "Bastones de Muzzarella",
                "Acompañamientos",
                290.00,
                "Ocho bastones de queso con salsa de tomate.",
            ),
            Product::new(
                20,
                "Helado Artesanal",
                "Postres",
                310.00,
                "Dos bochas, sabores a elección.",
            ),
            Product::new(
                21,
                "Wrap de Pollo",
                "Minutas",
                480.00,
                "Tortilla de trigo, pollo desmenuzado, verduras y salsa.",
            ),
            Product::new(
                22,
                "Pizza Cuatro Quesos",
                "Pizzas",
                680.00,
                "Mozzarella, Roquefort, Parmesano y Fontina.",
            ),
            Product::new(
                23,
                "Vino Tinto Malbec",
                "Vinos",
                950.00,
                "Botella de 750ml, reserva.",
            ),
            Product::new(
                24,
                "Sopa del Día",
                "Otros",
                300.00,
                "Consultar variedad al mozo (ej: Calabaza).",
            ),
            Product::new(25, "Brownie con Nuez", "Postres", 290.00, "Brownie tibio con nueces."),
        ])
    }

    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct categories, in menu order.
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for product in &self.products {
            if !out.iter().any(|c| c == &product.category) {
                out.push(product.category.clone());
            }
        }
        out
    }

    /// Matches a customer-typed category name, ignoring case. Returns the
    /// canonical spelling so the filter compares exactly from then on.
    pub fn find_category(&self, input: &str) -> Option<String> {
        let wanted = input.trim().to_lowercase();
        self.categories()
            .into_iter()
            .find(|c| c.to_lowercase() == wanted)
    }

    /// Renders one page for `view`: filter, sort by price (ties broken by
    /// menu id so the order is stable), slice. A page request past the end
    /// clamps to the last page; an empty filter result is one empty page.
    pub fn page(&self, view: &CatalogView) -> CatalogPage {
        let mut items: Vec<&Product> = match &view.category {
            Some(category) => self
                .products
                .iter()
                .filter(|p| &p.category == category)
                .collect(),
            None => self.products.iter().collect(),
        };

        match view.sort {
            PriceSort::Asc => {
                items.sort_by(|a, b| a.price.total_cmp(&b.price).then(a.id.cmp(&b.id)))
            }
            PriceSort::Desc => {
                items.sort_by(|a, b| b.price.total_cmp(&a.price).then(a.id.cmp(&b.id)))
            }
        }

        let total_pages = items.len().div_ceil(PAGE_SIZE).max(1);
        let page = view.page.clamp(1, total_pages);
        let start = (page - 1) * PAGE_SIZE;
        let items: Vec<Product> = items.into_iter().skip(start).take(PAGE_SIZE).cloned().collect();

        CatalogPage {
            items,
            page,
            total_pages,
            has_prev: page > 1,
            has_next: page < total_pages,
        }
    }
}
