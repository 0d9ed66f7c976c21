//! Member management.
//!
//! Members carry a composite wilayah `village_id`; city and district are read
//! from its prefixes, and names come from the in-memory region directory.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Access | Description |
//! |--------|----------|--------|-------------|
//! | GET | `/api/users` | member | List members with filters |
//! | GET | `/api/users/{id}` | member | Get a member |
//! | POST | `/api/users` | admin | Create a member |
//! | PUT | `/api/users/{id}` | admin | Update a member |
//! | DELETE | `/api/users/{id}` | admin | Delete a member |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
