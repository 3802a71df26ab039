//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the host (main.rs, or any embedding UI) and the
//! catalog/storage layers. It implements a unidirectional data flow:
//!
//! ```text
//! User intent → Event → handle_event → State mutation → Actions
//!                 ↑                                        │
//!                 └── CatalogResponse ◄── executor ◄───────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects and notifications emitted by the handler
//! - [`coordinator`]: Async driver keeping catalog calls in flight
//! - [`executor`]: Turns catalog actions into response futures
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: The three views
//! - [`state`]: Application state and view model computation

pub mod actions;
pub mod coordinator;
pub mod executor;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::{Action, Notification, Ticket};
pub use coordinator::ViewCoordinator;
pub use handler::{handle_event, CatalogResponse, Event};
pub use modes::View;
pub use state::{AppState, PendingRequests, ViewState};
