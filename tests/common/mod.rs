#![allow(dead_code)]

use async_trait::async_trait;
use recipebox::catalog::{CatalogRequest, CatalogTransport, RecipeCatalogClient};
use recipebox::domain::{Ingredient, Recipe};
use recipebox::storage::{FavoritesStore, KeyValueStore, MemoryStore, SharedStore, ThemePreference};
use recipebox::{RecipeError, Result, ViewCoordinator};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Scripted = (Result<String>, Option<Duration>);

/// Transport answering from per-endpoint scripts and recording every request.
///
/// Requests are recorded when they start. An endpoint with nothing scripted
/// fails with a transport error.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    scripts: Mutex<HashMap<&'static str, VecDeque<Scripted>>>,
    calls: Mutex<Vec<CatalogRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, endpoint: &'static str, body: Value) -> Self {
        self.push(endpoint, Ok(body.to_string()));
        self
    }

    /// Like [`respond`](Self::respond), answering only after `delay`.
    pub fn respond_after(self, endpoint: &'static str, body: Value, delay: Duration) -> Self {
        self.script(endpoint, (Ok(body.to_string()), Some(delay)));
        self
    }

    pub fn respond_raw(self, endpoint: &'static str, body: &str) -> Self {
        self.push(endpoint, Ok(body.to_string()));
        self
    }

    pub fn fail(self, endpoint: &'static str) -> Self {
        self.push(
            endpoint,
            Err(RecipeError::Transport("connection refused".to_string())),
        );
        self
    }

    pub fn push(&self, endpoint: &'static str, response: Result<String>) {
        self.script(endpoint, (response, None));
    }

    fn script(&self, endpoint: &'static str, scripted: Scripted) {
        self.scripts
            .lock()
            .unwrap()
            .entry(endpoint)
            .or_default()
            .push_back(scripted);
    }

    pub fn calls(&self) -> Vec<CatalogRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogTransport for ScriptedTransport {
    async fn get(&self, request: &CatalogRequest) -> Result<String> {
        self.calls.lock().unwrap().push(request.clone());
        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(request.endpoint())
            .and_then(VecDeque::pop_front);

        let Some((response, delay)) = scripted else {
            return Err(RecipeError::Transport(format!(
                "nothing scripted for {}",
                request.endpoint()
            )));
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        response
    }
}

/// In-memory store whose writes can be switched to fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(RecipeError::Storage("disk full".to_string()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check()?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check()?;
        self.inner.remove(key)
    }
}

/// A raw catalog record with the given id and title and two ingredients.
pub fn meal(id: &str, title: &str) -> Value {
    json!({
        "idMeal": id,
        "strMeal": title,
        "strMealThumb": format!("https://img.example/{id}.jpg"),
        "strArea": "Italian",
        "strCategory": "Pasta",
        "strInstructions": "Boil. Stir. Serve.",
        "strYoutube": "",
        "strIngredient1": "penne",
        "strMeasure1": "1 pound",
        "strIngredient2": "olive oil",
        "strMeasure2": " 1/4 cup ",
        "strIngredient3": "",
        "strMeasure3": "",
    })
}

pub fn meals(records: &[Value]) -> Value {
    json!({ "meals": records })
}

pub fn no_meals() -> Value {
    json!({ "meals": null })
}

pub fn recipe(id: &str, title: &str) -> Recipe {
    Recipe {
        id: id.to_string(),
        title: title.to_string(),
        thumbnail_url: String::new(),
        area: "Japanese".to_string(),
        category: "Chicken".to_string(),
        instructions: String::new(),
        video_url: None,
        ingredients: vec![Ingredient::new("soy sauce", "3 tbs")],
    }
}

pub fn memory_store() -> SharedStore {
    Arc::new(MemoryStore::new())
}

pub fn coordinator(transport: ScriptedTransport) -> ViewCoordinator<ScriptedTransport> {
    coordinator_with_store(transport, memory_store())
}

pub fn coordinator_with_store(
    transport: ScriptedTransport,
    store: SharedStore,
) -> ViewCoordinator<ScriptedTransport> {
    ViewCoordinator::new(
        RecipeCatalogClient::new(transport),
        FavoritesStore::open(Arc::clone(&store)).unwrap(),
        ThemePreference::initial(store, || false),
    )
}
