//! # StockPickr API
//!
//! JSON over HTTP access to a [`Recommender`](stockpickr_similarity::Recommender).
//!
//! | method | path | body |
//! |---|---|---|
//! | `GET` | `/health` | status and catalog size |
//! | `GET` | `/catalog` | industries, countries and input bounds |
//! | `GET` | `/companies/{id}` | one company record |
//! | `POST` | `/recommend` | `RecommendRequest` in, ranked matches out |

pub mod rest;

pub use rest::{configure, RestApi};
