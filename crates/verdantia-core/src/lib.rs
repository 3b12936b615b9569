//! # Verdantia Core
//!
//! Core traits and types for pheromone-driven route finding.
//!
//! This crate defines the value types shared by every part of the engine
//! and the two seams where implementations plug in:
//!
//! - **RouteGraph** - read-only access to locations, edges and distances
//! - **PathConstructor** - one strategy for building a start-to-goal path
//!
//! ## Quick Start
//!
//! ```rust
//! use verdantia_core::prelude::*;
//!
//! let a = Position::new(0.0, 0.0);
//! let b = Position::new(3.0, 4.0);
//! assert_eq!(a.distance_to(&b), 5.0);
//!
//! let path = Path::new(vec!["BG1".into(), "BST".into()]);
//! assert_eq!(path.edge_count(), 1);
//! ```

pub mod types;
pub mod params;
pub mod topology;
pub mod construct;
pub mod error;
pub mod prelude;
