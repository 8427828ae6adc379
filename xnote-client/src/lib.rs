//! Xnote Client - typed client and view logic for the Xnote API
//!
//! Talks to the Xnote REST server over HTTP and drives the daily grid,
//! the entity forms and the entity spreadsheets on top of it.

pub mod aggregator;
pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod grid;
pub mod http;
pub mod logger;
pub mod presenter;
pub mod refresh;
pub mod render;
pub mod shortcuts;
pub mod view_state;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};

pub use aggregator::{DailyAggregator, DayRow, FilterUpdate, Filters};
pub use api::{Resource, XnoteApi};
pub use form::{FormController, FormError, FormResult};
pub use grid::{EntityGrid, GridRecord, ReferenceGrid};
pub use presenter::{Confirmation, Presenter, ToastKind, TracingPresenter};
pub use refresh::RefreshTarget;
pub use render::{GridRenderer, TextGridRenderer};
pub use shortcuts::{KeyInput, Shortcut};
pub use view_state::{ViewHistory, ViewState};

// Re-export shared types for convenience
pub use shared::models;
