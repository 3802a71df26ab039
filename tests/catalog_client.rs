mod common;

use common::{meal, meals, no_meals, ScriptedTransport};
use recipebox::catalog::{
    CatalogRequest, CatalogTransport, HttpTransport, RecipeCatalogClient, SearchResults,
    LOOKUP_FAILED, RANDOM_FAILED, SEARCH_FAILED,
};
use recipebox::RecipeError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn random_returns_first_record() {
    let transport = ScriptedTransport::new().respond(
        "random",
        meals(&[meal("52771", "Spicy Arrabiata Penne"), meal("1", "Other")]),
    );
    let client = RecipeCatalogClient::new(transport);

    let recipe = client.fetch_random().await.unwrap();

    assert_eq!(recipe.id, "52771");
    assert_eq!(recipe.ingredients.len(), 2);
    assert_eq!(recipe.ingredients[1].measure, "1/4 cup");
    assert_eq!(client.error(), None);
    assert!(!client.is_loading());
}

#[tokio::test]
async fn random_with_null_meals_is_an_error() {
    let transport = ScriptedTransport::new().respond("random", no_meals());
    let client = RecipeCatalogClient::new(transport);

    assert_eq!(client.fetch_random().await, None);
    assert_eq!(client.error().as_deref(), Some(RANDOM_FAILED));
}

#[tokio::test]
async fn random_transport_failure_sets_error_and_next_call_clears_it() {
    let transport = ScriptedTransport::new()
        .fail("random")
        .respond("random", meals(&[meal("52771", "Spicy Arrabiata Penne")]));
    let client = RecipeCatalogClient::new(transport);

    assert_eq!(client.fetch_random().await, None);
    assert_eq!(client.error().as_deref(), Some(RANDOM_FAILED));

    assert!(client.fetch_random().await.is_some());
    assert_eq!(client.error(), None);
}

#[tokio::test]
async fn search_trims_and_reports_query() {
    let transport = ScriptedTransport::new().respond(
        "search",
        meals(&[meal("1", "Pasta Bake"), meal("2", "Pasta Salad")]),
    );
    let client = RecipeCatalogClient::new(transport);

    let results = client.search("  pasta \n").await;

    assert_eq!(results.query, "pasta");
    assert_eq!(results.recipes.len(), 2);
    assert_eq!(
        client.transport().calls(),
        vec![CatalogRequest::Search {
            query: "pasta".to_string()
        }]
    );
}

#[tokio::test]
async fn search_without_matches_is_not_an_error() {
    let transport = ScriptedTransport::new().respond("search", no_meals());
    let client = RecipeCatalogClient::new(transport);

    let results = client.search("zzznomatch").await;

    assert!(results.recipes.is_empty());
    assert_eq!(client.error(), None);
}

#[tokio::test]
async fn search_failure_sets_error() {
    let transport = ScriptedTransport::new().respond_raw("search", "<html>502</html>");
    let client = RecipeCatalogClient::new(transport);

    let results = client.search("pasta").await;

    assert!(results.recipes.is_empty());
    assert_eq!(client.error().as_deref(), Some(SEARCH_FAILED));
}

#[tokio::test]
async fn blank_search_skips_network() {
    let client = RecipeCatalogClient::new(ScriptedTransport::new());

    let results = client.search("   ").await;

    assert_eq!(results.query, "");
    assert!(results.recipes.is_empty());
    assert_eq!(client.error(), None);
    assert!(client.transport().calls().is_empty());
}

#[tokio::test]
async fn search_skips_malformed_records() {
    let transport = ScriptedTransport::new().respond(
        "search",
        meals(&[meal("1", "Pasta Bake"), json!({ "strMeal": "No id" }), meal("3", "Pasta Salad")]),
    );
    let client = RecipeCatalogClient::new(transport);

    let ids: Vec<String> = client
        .search("pasta")
        .await
        .recipes
        .into_iter()
        .map(|r| r.id)
        .collect();

    assert_eq!(ids, vec!["1", "3"]);
    assert_eq!(client.error(), None);
}

#[tokio::test]
async fn outcomes_carry_the_failure_message() {
    let transport = ScriptedTransport::new()
        .respond("search", no_meals())
        .fail("search")
        .fail("lookup");
    let client = RecipeCatalogClient::new(transport);

    assert_eq!(
        client.search_outcome(" stew ").await,
        Ok(SearchResults {
            query: "stew".to_string(),
            recipes: vec![],
        })
    );
    assert_eq!(client.search_outcome("stew").await, Err(SEARCH_FAILED.to_string()));
    assert_eq!(client.lookup_outcome("1").await, Err(LOOKUP_FAILED.to_string()));
}

#[tokio::test]
async fn overlapping_calls_share_one_client() {
    let transport = ScriptedTransport::new()
        .respond_after("random", meals(&[meal("1", "Slow Roast")]), Duration::from_millis(100))
        .respond("search", meals(&[meal("2", "Quick Salad")]));
    let client = RecipeCatalogClient::new(transport);

    let (random, results) = tokio::join!(client.fetch_random(), client.search("salad"));

    assert_eq!(random.unwrap().title, "Slow Roast");
    assert_eq!(results.recipes[0].title, "Quick Salad");
    assert!(!client.is_loading());
    assert_eq!(client.error(), None);
}

#[tokio::test]
async fn lookup_distinguishes_missing_from_failure() {
    let transport = ScriptedTransport::new()
        .respond("lookup", meals(&[meal("52772", "Teriyaki Chicken")]))
        .respond("lookup", no_meals())
        .fail("lookup");
    let client = RecipeCatalogClient::new(transport);

    assert_eq!(client.fetch_by_id("52772").await.unwrap().title, "Teriyaki Chicken");

    assert_eq!(client.fetch_by_id("0").await, None);
    assert_eq!(client.error(), None);

    assert_eq!(client.fetch_by_id("52772").await, None);
    assert_eq!(client.error().as_deref(), Some(LOOKUP_FAILED));
}

#[tokio::test]
async fn http_transport_builds_catalog_urls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/random.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(meals(&[meal("52771", "Penne")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/search.php"))
        .and(query_param("s", "chicken curry"))
        .respond_with(ResponseTemplate::new(200).set_body_json(meals(&[meal("7", "Chicken Curry")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/lookup.php"))
        .and(query_param("i", "404"))
        .respond_with(ResponseTemplate::new(200).set_body_json(no_meals()))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(
        format!("{}/api/", server.uri()),
        ".php",
        Duration::from_secs(5),
    )
    .unwrap();
    let client = RecipeCatalogClient::new(transport);

    assert_eq!(client.fetch_random().await.unwrap().id, "52771");
    assert_eq!(client.search("chicken curry").await.recipes[0].title, "Chicken Curry");
    assert_eq!(client.fetch_by_id("404").await, None);
    assert_eq!(client.error(), None);
}

#[tokio::test]
async fn http_error_status_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.php"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(server.uri(), ".php", Duration::from_secs(5)).unwrap();
    let request = CatalogRequest::Search {
        query: "pasta".to_string(),
    };

    assert!(matches!(transport.get(&request).await, Err(RecipeError::Transport(_))));

    let client = RecipeCatalogClient::new(transport);
    assert!(client.search("pasta").await.recipes.is_empty());
    assert_eq!(client.error().as_deref(), Some(SEARCH_FAILED));
}

#[tokio::test]
async fn http_timeout_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/random.php"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(meals(&[meal("1", "Slow Roast")]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let transport = HttpTransport::new(server.uri(), ".php", Duration::from_millis(200)).unwrap();

    let result = transport.get(&CatalogRequest::Random).await;

    assert!(matches!(result, Err(RecipeError::Transport(_))));
}

#[test]
fn empty_suffix_gives_bare_endpoints() {
    let transport = HttpTransport::new("http://catalog.local/", "", Duration::from_secs(1)).unwrap();

    assert_eq!(transport.url_for(&CatalogRequest::Random), "http://catalog.local/random");
    assert_eq!(
        transport.url_for(&CatalogRequest::Lookup { id: "1".into() }),
        "http://catalog.local/lookup"
    );
}
