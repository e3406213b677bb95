use crate::geo::round2;
use crate::model::product::Product;
use serde::{Deserialize, Serialize};

/// One line of a shopping cart.
///
/// The line snapshots the product's name and unit price at the moment it was
/// added, so a later menu change never rewrites an order in flight.
/// `subtotal` is maintained as `round2(unit_price * quantity)` on every
/// mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: u32,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub note: String,
    pub subtotal: f64,
}

impl CartLine {
    fn new(product: &Product, quantity: u32, note: String) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            note,
            subtotal: round2(product.price * quantity as f64),
        }
    }

    fn grow(&mut self, extra: u32) {
        self.quantity += extra;
        self.subtotal = round2(self.unit_price * self.quantity as f64);
    }
}

/// A customer's in-progress cart.
///
/// Lines keep their insertion order (the removal menu numbers them 1..n).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of `product` with an optional note.
    ///
    /// A line with the same product *and* the same note coalesces (two plain
    /// burgers become one line of two); a different note stays its own line,
    /// because "sin tomate" and "extra queso" are different requests to the
    /// kitchen.
    pub fn add(&mut self, product: &Product, quantity: u32, note: impl Into<String>) {
        let note = note.into();
        match self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.id && line.note == note)
        {
            Some(line) => line.grow(quantity),
            None => self.lines.push(CartLine::new(product, quantity, note)),
        }
    }

    /// Removes and returns the line at `index` (0-based), if there is one.
    pub fn remove(&mut self, index: usize) -> Option<CartLine> {
        if index < self.lines.len() {
            Some(self.lines.remove(index))
        } else {
            None
        }
    }

    /// Sum of line subtotals, rounded to two decimals.
    pub fn total(&self) -> f64 {
        round2(self.lines.iter().map(|line| line.subtotal).sum())
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burger() -> Product {
        Product::new(1, "Hamburguesa Clásica", "Minutas", 450.0, "Carne y queso.")
    }

    fn soda() -> Product {
        Product::new(3, "Refresco Cola (Lata)", "Bebidas", 120.0, "Lata de 350ml.")
    }

    #[test]
    fn add_computes_subtotal() {
        let mut cart = Cart::new();
        cart.add(&burger(), 2, "");
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].subtotal, 900.0);
    }

    #[test]
    fn same_product_same_note_coalesces() {
        let mut cart = Cart::new();
        cart.add(&burger(), 1, "sin tomate");
        cart.add(&burger(), 2, "sin tomate");

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.lines()[0].subtotal, 1350.0);
    }

    #[test]
    fn different_note_is_a_new_line() {
        let mut cart = Cart::new();
        cart.add(&burger(), 1, "sin tomate");
        cart.add(&burger(), 1, "");

        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn total_is_rounded_sum_of_subtotals() {
        let mut cart = Cart::new();
        cart.add(&burger(), 2, "");
        cart.add(&soda(), 3, "");

        assert_eq!(cart.total(), 900.0 + 360.0);
    }

    #[test]
    fn remove_is_bounds_checked() {
        let mut cart = Cart::new();
        cart.add(&burger(), 1, "");

        assert!(cart.remove(5).is_none());
        let removed = cart.remove(0).unwrap();
        assert_eq!(removed.product_id, 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut cart = Cart::new();
        cart.add(&burger(), 1, "");
        cart.add(&soda(), 1, "");
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);
    }
}
