//! Hierarchical category taxonomy for news articles and forum threads.
//!
//! Each content domain owns one bounded-depth tree (maximum 3 levels)
//! that editors manage through the admin endpoints. Reads rebuild the
//! tree from the flat rows on every request; there is no in-process
//! cache.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/categories` | No | Flat list or nested tree |
//! | GET | `/api/categories/{slug}` | No | Slug lookup |
//! | GET | `/api/admin/categories` | No | Admin list incl. inactive |
//! | GET | `/api/admin/categories/{id}` | No | Get by id |
//! | POST | `/api/admin/categories` | No | Create |
//! | PUT | `/api/admin/categories/{id}` | No | Update / reparent |
//! | PUT | `/api/admin/categories/reorder` | No | Reorder one sibling group |
//! | DELETE | `/api/admin/categories/{id}` | No | Cascade-safe delete |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod tree;
pub mod validator;

pub use services::{AssociationIndex, CascadeDeleteResolver, CategoryService, ReorderService};
