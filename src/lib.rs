//! Range Tree - point updates and range queries over a fixed-size sequence.
//!
//! # Quick Start
//!
//! ```
//! use range_tree::combine::Product;
//! use range_tree::tree::RangeTree;
//!
//! // Build a tree over a fixed sequence (sum is the default combiner)
//! let mut tree: RangeTree<i64> = RangeTree::from_slice(&[2, 4, 1, 42, 9]);
//! assert_eq!(tree.query(1, 3), 47);
//!
//! // Replace one element; every covering aggregate follows
//! tree.update_point(2, 7);
//! assert_eq!(tree.query(1, 3), 53);
//!
//! // Swap the combiner for a different aggregate
//! let product: RangeTree<i64, Product> = RangeTree::from_slice(&[2, 4, 1, 42, 9]);
//! assert_eq!(product.query(1, 3), 168);
//! ```

pub mod combine;
pub mod tree;
