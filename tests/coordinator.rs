mod common;

use common::{coordinator, coordinator_with_store, meal, meals, no_meals, recipe, ScriptedTransport};
use recipebox::app::{handle_event, Action, AppState, CatalogResponse, Event, Notification, View};
use recipebox::catalog::{CatalogRequest, RANDOM_FAILED, SEARCH_FAILED};
use recipebox::storage::{FavoritesStore, KeyValueStore, ThemePreference, FAVORITES_KEY, THEME_KEY};
use recipebox::ui::Body;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn startup_loads_random_recipe() {
    let transport = ScriptedTransport::new().respond("random", meals(&[meal("52771", "Penne")]));
    let mut app = coordinator(transport);

    let notifications = app.startup().await.unwrap();

    assert!(notifications.is_empty());
    assert_eq!(app.view(), View::Random);
    assert_eq!(app.view_state().current_recipe.as_ref().unwrap().id, "52771");
    assert!(!app.view_state().loading);
    assert!(matches!(app.compute_viewmodel().body, Body::Recipe(_)));
}

#[tokio::test]
async fn startup_failure_offers_retry() {
    let transport = ScriptedTransport::new()
        .fail("random")
        .respond("random", meals(&[meal("52771", "Penne")]));
    let mut app = coordinator(transport);

    app.startup().await.unwrap();

    assert_eq!(app.view_state().error.as_deref(), Some(RANDOM_FAILED));
    match app.compute_viewmodel().body {
        Body::Error(info) => {
            assert_eq!(info.message, RANDOM_FAILED);
            assert_eq!(info.retry_label.as_deref(), Some("Try Again"));
        }
        other => panic!("expected error body, got {other:?}"),
    }

    app.retry().await.unwrap();

    assert_eq!(app.view_state().error, None);
    assert_eq!(app.view_state().current_recipe.as_ref().unwrap().title, "Penne");
}

#[tokio::test]
async fn search_then_clear() {
    let transport = ScriptedTransport::new()
        .respond("random", meals(&[meal("52771", "Penne")]))
        .respond("search", meals(&[meal("1", "Pasta Bake"), meal("2", "Pasta Salad")]));
    let mut app = coordinator(transport);
    app.startup().await.unwrap();

    app.submit_search("pasta").await.unwrap();

    assert_eq!(app.view(), View::Search);
    assert_eq!(app.view_state().search_query, "pasta");
    assert_eq!(app.view_state().search_results.len(), 2);
    match app.compute_viewmodel().body {
        Body::Results { title, items } => {
            assert_eq!(title, "Search Results for \"pasta\" (2 found)");
            assert_eq!(items[0].highlight_ranges, vec![(0, 5)]);
        }
        other => panic!("expected results, got {other:?}"),
    }

    app.clear_search().await.unwrap();

    assert_eq!(app.view(), View::Random);
    assert_eq!(app.view_state().search_query, "");
    assert!(app.view_state().search_results.is_empty());
    assert_eq!(app.view_state().current_recipe.as_ref().unwrap().id, "52771");
}

#[tokio::test]
async fn zero_results_notify_without_error() {
    let transport = ScriptedTransport::new().respond("search", no_meals());
    let mut app = coordinator(transport);

    let notifications = app.submit_search("zzznomatch").await.unwrap();

    assert_eq!(
        notifications,
        vec![Notification::NoResults {
            query: "zzznomatch".to_string()
        }]
    );
    assert_eq!(app.view_state().error, None);
    assert!(app.view_state().search_results.is_empty());
    match app.compute_viewmodel().body {
        Body::NoResults(info) => {
            assert_eq!(info.query, "zzznomatch");
            assert_eq!(info.clear_label, "Clear search");
        }
        other => panic!("expected no-results body, got {other:?}"),
    }
}

#[tokio::test]
async fn search_failure_keeps_previous_results() {
    let transport = ScriptedTransport::new()
        .respond("search", meals(&[meal("1", "Pasta Bake")]))
        .fail("search")
        .respond("search", meals(&[meal("9", "Beef Stew")]));
    let mut app = coordinator(transport);
    app.submit_search("pasta").await.unwrap();

    let notifications = app.submit_search("stew").await.unwrap();

    assert!(notifications.is_empty());
    assert_eq!(app.view_state().error.as_deref(), Some(SEARCH_FAILED));
    assert_eq!(app.view_state().search_results[0].id, "1");
    match app.compute_viewmodel().body {
        Body::Error(info) => assert_eq!(info.retry_label.as_deref(), Some("Retry search")),
        other => panic!("expected error body, got {other:?}"),
    }

    app.retry().await.unwrap();

    assert_eq!(app.view_state().error, None);
    assert_eq!(app.view_state().search_results[0].id, "9");
    assert_eq!(
        app.catalog().transport().calls().last(),
        Some(&CatalogRequest::Search {
            query: "stew".to_string()
        })
    );
}

#[tokio::test]
async fn favorites_view_ignores_catalog_failure() {
    let mut app = coordinator(ScriptedTransport::new().fail("search"));
    app.toggle_favorite(recipe("1", "Soup")).await.unwrap();
    app.submit_search("pasta").await.unwrap();
    assert_eq!(app.view_state().error.as_deref(), Some(SEARCH_FAILED));

    app.show_favorites().await.unwrap();

    match app.compute_viewmodel().body {
        Body::Favorites { title, items } => {
            assert_eq!(title, "Your Favorite Recipes (1)");
            assert_eq!(items[0].title, "Soup");
        }
        other => panic!("expected favorites, got {other:?}"),
    }

    app.show_search().await.unwrap();

    match app.compute_viewmodel().body {
        Body::Error(info) => assert_eq!(info.retry_label.as_deref(), Some("Retry search")),
        other => panic!("expected error body, got {other:?}"),
    }
}

#[tokio::test]
async fn retry_repeats_the_request_that_failed() {
    let transport = ScriptedTransport::new()
        .respond("search", meals(&[meal("1", "Pasta Bake")]))
        .fail("random")
        .respond("random", meals(&[meal("52771", "Penne")]));
    let mut app = coordinator(transport);
    app.submit_search("pasta").await.unwrap();

    app.request_random().await.unwrap();

    assert_eq!(app.view(), View::Search);
    match app.compute_viewmodel().body {
        Body::Error(info) => {
            assert_eq!(info.message, RANDOM_FAILED);
            assert_eq!(info.retry_label.as_deref(), Some("Try Again"));
        }
        other => panic!("expected error body, got {other:?}"),
    }

    app.retry().await.unwrap();

    assert_eq!(app.catalog().transport().calls().last(), Some(&CatalogRequest::Random));
    assert_eq!(app.view(), View::Random);
    assert_eq!(app.view_state().current_recipe.as_ref().unwrap().title, "Penne");
    assert_eq!(app.view_state().search_results[0].id, "1");
}

#[tokio::test]
async fn blank_search_is_ignored() {
    let mut app = coordinator(ScriptedTransport::new());

    app.submit_search("   ").await.unwrap();

    assert_eq!(app.view(), View::Random);
    assert!(app.catalog().transport().calls().is_empty());
}

#[tokio::test]
async fn clear_search_outside_search_is_noop() {
    let transport = ScriptedTransport::new().respond("random", meals(&[meal("52771", "Penne")]));
    let mut app = coordinator(transport);
    app.startup().await.unwrap();
    app.show_favorites().await.unwrap();

    app.clear_search().await.unwrap();

    assert_eq!(app.view(), View::Favorites);
}

#[tokio::test]
async fn toggle_notifies_resulting_state() {
    let mut app = coordinator(ScriptedTransport::new());
    let r = recipe("52772", "Teriyaki Chicken");

    let added = app.toggle_favorite(r.clone()).await.unwrap();
    let removed = app.toggle_favorite(r.clone()).await.unwrap();

    assert_eq!(added[0].title(), "Teriyaki Chicken added to favorites!");
    assert_eq!(added[0].description(), "Saved to your favorites");
    assert_eq!(removed[0].title(), "Teriyaki Chicken removed from favorites!");
    assert_eq!(removed[0].description(), "Removed from your favorites");
    assert!(app.favorites().is_empty());
}

#[tokio::test]
async fn favorites_view_and_selection() {
    let mut app = coordinator(ScriptedTransport::new());
    app.toggle_favorite(recipe("1", "Soup")).await.unwrap();
    app.toggle_favorite(recipe("2", "Stew")).await.unwrap();

    app.show_favorites().await.unwrap();
    assert!(app.catalog().transport().calls().is_empty());
    match app.compute_viewmodel().body {
        Body::Favorites { title, items } => {
            assert_eq!(title, "Your Favorite Recipes (2)");
            assert!(items.iter().all(|card| card.is_favorited));
        }
        other => panic!("expected favorites, got {other:?}"),
    }

    app.select_favorite("2").await.unwrap();

    assert_eq!(app.view(), View::Random);
    assert_eq!(app.view_state().current_recipe.as_ref().unwrap().title, "Stew");
    assert!(app.catalog().transport().calls().is_empty());
}

#[tokio::test]
async fn remove_favorite_is_silent() {
    let mut app = coordinator(ScriptedTransport::new());
    app.toggle_favorite(recipe("1", "Soup")).await.unwrap();
    app.show_favorites().await.unwrap();

    let notifications = app.remove_favorite("1").await.unwrap();

    assert!(notifications.is_empty());
    assert!(app.favorites().is_empty());
    assert!(matches!(app.compute_viewmodel().body, Body::Empty(_)));
}

#[tokio::test]
async fn open_recipe_by_id() {
    let transport = ScriptedTransport::new()
        .respond("lookup", meals(&[meal("52772", "Teriyaki Chicken")]))
        .respond("lookup", no_meals());
    let mut app = coordinator(transport);
    app.show_favorites().await.unwrap();

    app.open_recipe("52772").await.unwrap();
    assert_eq!(app.view(), View::Random);
    assert_eq!(app.view_state().current_recipe.as_ref().unwrap().id, "52772");

    let notifications = app.open_recipe("0").await.unwrap();
    assert_eq!(
        notifications,
        vec![Notification::RecipeNotFound { id: "0".to_string() }]
    );
    assert_eq!(app.view_state().current_recipe.as_ref().unwrap().id, "52772");
}

#[tokio::test]
async fn theme_toggle_persists() {
    let store = common::memory_store();
    let mut app = coordinator_with_store(ScriptedTransport::new(), Arc::clone(&store));
    assert!(!app.is_dark());

    app.toggle_theme().await.unwrap();

    assert!(app.is_dark());
    assert!(app.compute_viewmodel().header.is_dark);
    assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("true"));
}

#[tokio::test]
async fn favorites_survive_new_coordinator() {
    let store = common::memory_store();
    {
        let mut app = coordinator_with_store(ScriptedTransport::new(), Arc::clone(&store));
        app.toggle_favorite(recipe("1", "Soup")).await.unwrap();
    }
    assert!(store.get(FAVORITES_KEY).unwrap().is_some());

    let app = coordinator_with_store(ScriptedTransport::new(), store);

    assert!(app.favorites().is_favorited("1"));
    assert_eq!(app.compute_viewmodel().header.favorites_count, 1);
}

#[tokio::test]
async fn dispatch_returns_before_the_catalog_answers() {
    let transport = ScriptedTransport::new().respond_after(
        "random",
        meals(&[meal("52771", "Penne")]),
        Duration::from_millis(50),
    );
    let mut app = coordinator(transport);

    app.dispatch(Event::Startup).unwrap();

    assert!(app.has_pending());
    assert!(app.compute_viewmodel().body.is_loading());

    app.run_until_idle().await.unwrap();

    assert!(!app.has_pending());
    assert_eq!(app.view_state().current_recipe.as_ref().unwrap().title, "Penne");
}

#[tokio::test]
async fn overlapping_searches_keep_the_latest() {
    let transport = ScriptedTransport::new()
        .respond_after("search", meals(&[meal("1", "Pasta Bake")]), Duration::from_millis(100))
        .respond("search", meals(&[meal("2", "Miso Soup")]));
    let mut app = coordinator(transport);

    app.dispatch(Event::SubmitSearch("pasta".to_string())).unwrap();
    app.dispatch(Event::SubmitSearch("soup".to_string())).unwrap();

    let first = app.next_response().await.unwrap().unwrap();
    assert!(first.is_empty());
    assert_eq!(app.view_state().search_results[0].title, "Miso Soup");
    assert!(!app.view_state().loading);
    assert!(app.has_pending());

    app.run_until_idle().await.unwrap();

    assert_eq!(app.view_state().search_query, "soup");
    assert_eq!(app.view_state().search_results.len(), 1);
    assert_eq!(app.view_state().search_results[0].title, "Miso Soup");
}

#[tokio::test]
async fn selecting_a_favorite_drops_the_pending_random() {
    let transport = ScriptedTransport::new().respond_after(
        "random",
        meals(&[meal("9", "Beef Stew")]),
        Duration::from_millis(50),
    );
    let mut app = coordinator(transport);
    app.toggle_favorite(recipe("1", "Soup")).await.unwrap();

    app.dispatch(Event::RequestRandom).unwrap();
    app.dispatch(Event::SelectFavorite { id: "1".to_string() }).unwrap();
    assert!(!app.view_state().loading);

    app.run_until_idle().await.unwrap();

    assert_eq!(app.view(), View::Random);
    assert_eq!(app.view_state().current_recipe.as_ref().unwrap().title, "Soup");
}

#[tokio::test]
async fn clearing_search_drops_the_pending_search() {
    let transport = ScriptedTransport::new().respond_after(
        "search",
        no_meals(),
        Duration::from_millis(50),
    );
    let mut app = coordinator(transport);

    app.dispatch(Event::SubmitSearch("zzznomatch".to_string())).unwrap();
    app.dispatch(Event::ClearSearch).unwrap();

    let notifications = app.run_until_idle().await.unwrap();

    assert!(notifications.is_empty());
    assert_eq!(app.view(), View::Random);
    assert_eq!(app.view_state().search_query, "");
    assert_eq!(app.catalog().transport().calls().len(), 1);
}

#[test]
fn stale_responses_are_dropped() {
    let store = common::memory_store();
    let mut state = AppState::new(
        FavoritesStore::open(Arc::clone(&store)).unwrap(),
        ThemePreference::initial(store, || false),
    );

    let (_, first) = handle_event(&mut state, &Event::RequestRandom).unwrap();
    let (_, second) = handle_event(&mut state, &Event::RequestRandom).unwrap();
    let ticket_of = |actions: &[Action]| match actions[0] {
        Action::FetchRandom { ticket } => ticket,
        ref other => panic!("expected random fetch, got {other:?}"),
    };
    let (old, new) = (ticket_of(&first), ticket_of(&second));

    let (render, _) = handle_event(
        &mut state,
        &Event::CatalogResponse(CatalogResponse::Random {
            ticket: new,
            outcome: Ok(recipe("2", "Newer")),
        }),
    )
    .unwrap();
    assert!(render);
    assert!(!state.view.loading);

    let (render, _) = handle_event(
        &mut state,
        &Event::CatalogResponse(CatalogResponse::Random {
            ticket: old,
            outcome: Ok(recipe("1", "Older")),
        }),
    )
    .unwrap();
    assert!(!render);
    assert_eq!(state.view.current_recipe.as_ref().unwrap().title, "Newer");
}

#[test]
fn loading_hides_error_and_content() {
    let store = common::memory_store();
    let mut state = AppState::new(
        FavoritesStore::open(Arc::clone(&store)).unwrap(),
        ThemePreference::initial(store, || false),
    );
    state.view.current_recipe = Some(recipe("1", "Soup"));
    state.view.error = Some(RANDOM_FAILED.to_string());

    let (_, actions) = handle_event(&mut state, &Event::Retry).unwrap();

    assert_eq!(actions.len(), 1);
    assert!(state.view.loading);
    assert_eq!(state.view.error, None);
    assert!(state.compute_viewmodel().body.is_loading());
}

#[test]
fn select_favorite_supersedes_pending_random() {
    let store = common::memory_store();
    let mut favorites = FavoritesStore::open(Arc::clone(&store)).unwrap();
    favorites.add(recipe("1", "Soup")).unwrap();
    let mut state = AppState::new(favorites, ThemePreference::initial(store, || false));

    let (_, actions) = handle_event(&mut state, &Event::RequestRandom).unwrap();
    let Action::FetchRandom { ticket } = actions[0] else {
        panic!("expected random fetch");
    };
    handle_event(&mut state, &Event::SelectFavorite { id: "1".to_string() }).unwrap();
    assert!(!state.view.loading);

    handle_event(
        &mut state,
        &Event::CatalogResponse(CatalogResponse::Random {
            ticket,
            outcome: Ok(recipe("2", "Stew")),
        }),
    )
    .unwrap();

    assert_eq!(state.view.current_recipe.as_ref().unwrap().title, "Soup");
}
