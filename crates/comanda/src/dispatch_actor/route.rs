use crate::geo::GeoPoint;
use crate::model::{Order, OrderCode};

/// One stop on a courier's route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStop {
    pub code: OrderCode,
    pub customer: String,
    pub location: GeoPoint,
    pub distance_km: f64,
}

#[derive(Debug, Clone)]
struct RouteNode {
    stop: RouteStop,
    left: Option<Box<RouteNode>>,
    right: Option<Box<RouteNode>>,
}

/// Binary search tree over a tanda's stops, keyed by distance from the
/// restaurant.
///
/// The tree is built by median split of the distance-sorted stops: the
/// middle stop of each slice becomes the subtree root. That keeps the tree
/// balanced, and its inorder walk is exactly the delivery sequence, nearest
/// stop first.
#[derive(Debug, Clone, Default)]
pub struct RouteTree {
    root: Option<Box<RouteNode>>,
    len: usize,
}

impl RouteTree {
    /// Plans the route for a batch of orders.
    pub fn plan(orders: &[Order]) -> Self {
        let mut stops: Vec<RouteStop> = orders
            .iter()
            .map(|order| RouteStop {
                code: order.code.clone(),
                customer: order.customer.clone(),
                location: order.location,
                distance_km: order.distance_km,
            })
            .collect();
        stops.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        let len = stops.len();
        Self {
            root: Self::build(&stops),
            len,
        }
    }

    fn build(sorted: &[RouteStop]) -> Option<Box<RouteNode>> {
        if sorted.is_empty() {
            return None;
        }
        let mid = sorted.len() / 2;
        Some(Box::new(RouteNode {
            stop: sorted[mid].clone(),
            left: Self::build(&sorted[..mid]),
            right: Self::build(&sorted[mid + 1..]),
        }))
    }

    /// Stops in ascending-distance order.
    pub fn in_order(&self) -> Vec<RouteStop> {
        let mut out = Vec::with_capacity(self.len);
        Self::walk(&self.root, &mut out);
        out
    }

    fn walk(node: &Option<Box<RouteNode>>, out: &mut Vec<RouteStop>) {
        if let Some(n) = node {
            Self::walk(&n.left, out);
            out.push(n.stop.clone());
            Self::walk(&n.right, out);
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height in nodes; the empty tree has depth 0.
    pub fn depth(&self) -> usize {
        Self::height(&self.root)
    }

    fn height(node: &Option<Box<RouteNode>>) -> usize {
        match node {
            None => 0,
            Some(n) => 1 + Self::height(&n.left).max(Self::height(&n.right)),
        }
    }
}
