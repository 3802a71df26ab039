//! Turns catalog actions into futures over a shared [`RecipeCatalogClient`].
//!
//! Each catalog [`Action`] becomes exactly one future resolving to an
//! [`Event::CatalogResponse`] carrying the action's ticket, so the handler can
//! decide whether the result is still wanted. The futures own their handle on
//! the client and may run concurrently; nothing here returns an error.

use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use tracing::Instrument;

use crate::app::actions::Action;
use crate::app::handler::{CatalogResponse, Event};
use crate::catalog::{CatalogTransport, RecipeCatalogClient};

/// A catalog call in flight.
pub type PendingResponse = BoxFuture<'static, Event>;

/// Starts `action` and returns the future reporting its outcome.
///
/// Nothing is sent until the future is first polled. Returns `None` for
/// actions that do not involve the catalog.
pub fn execute<T: CatalogTransport + 'static>(
    client: &Arc<RecipeCatalogClient<T>>,
    action: &Action,
) -> Option<PendingResponse> {
    let client = Arc::clone(client);

    let pending = match action.clone() {
        Action::FetchRandom { ticket } => {
            let span = tracing::debug_span!("execute_fetch_random", ticket = %ticket);
            async move {
                let outcome = client.random_outcome().await;
                Event::CatalogResponse(CatalogResponse::Random { ticket, outcome })
            }
            .instrument(span)
            .boxed()
        }
        Action::Search { ticket, query } => {
            let span = tracing::debug_span!("execute_search", ticket = %ticket, query = %query);
            async move {
                let outcome = client.search_outcome(&query).await;
                Event::CatalogResponse(CatalogResponse::Search { ticket, outcome })
            }
            .instrument(span)
            .boxed()
        }
        Action::FetchById { ticket, id } => {
            let span = tracing::debug_span!("execute_fetch_by_id", ticket = %ticket, id = %id);
            async move {
                let outcome = client.lookup_outcome(&id).await;
                Event::CatalogResponse(CatalogResponse::Lookup { ticket, id, outcome })
            }
            .instrument(span)
            .boxed()
        }
        Action::Notify(_) => return None,
    };

    Some(pending)
}
