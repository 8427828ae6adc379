//! Data models
//!
//! Wire types of the XNote REST API (`/api/v1`).
//! All numeric IDs are `i32`; reference enums are keyed by name.

pub mod activity;
pub mod daily_summary;
pub mod detail;
pub mod drink;
pub mod event;
pub mod meal;
pub mod person;
pub mod product;
pub mod recipe;
pub mod reference;
pub mod response;
pub mod restaurant;

// Re-exports
pub use activity::*;
pub use daily_summary::*;
pub use detail::*;
pub use drink::*;
pub use event::*;
pub use meal::*;
pub use person::*;
pub use product::*;
pub use recipe::*;
pub use reference::*;
pub use response::*;
pub use restaurant::*;
