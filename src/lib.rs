//! # wordvec - A Word Embedding Query Engine
//!
//! wordvec is an in-memory word-embedding model. Vectors are L2-normalized
//! when the vocabulary is built, so dot products are cosine similarities.
//! Queries run as an exhaustive scan over the vocabulary while a bounded
//! sorted list keeps the top-N neighbors per query, including analogy
//! queries computed via vector arithmetic.
//!
//! ## Example
//!
//! ```
//! use wordvec::Model;
//!
//! let model = Model::from_entries(vec![
//!     ("cat".to_string(), vec![1.0, 0.0, 0.0]),
//!     ("dog".to_string(), vec![0.0, 1.0, 0.0]),
//!     ("kitten".to_string(), vec![0.9, 0.1, 0.0]),
//! ]).unwrap();
//!
//! // Nearest neighbors of "cat", excluding "cat" itself
//! let lists = model.most_similar(&["cat"], 1, &[]).unwrap();
//! assert_eq!(lists[0][0].word, "kitten");
//!
//! // king - man + woman style arithmetic
//! let results = model.analogy(&["cat"], &["dog"], 1).unwrap();
//! assert_eq!(results[0].word, "kitten");
//! ```

pub mod vector;
pub mod rank;
pub mod parse;
pub mod server;
mod model;

// Re-export the model types as the primary public API
pub use model::{Model, WordVector};
pub use rank::WordDist;
