//! Typed XNote REST API
//!
//! Every resource of `/api/v1` over an injected `HttpClient`. Controllers
//! receive an `XnoteApi` at construction instead of reaching for a global
//! client.

use std::sync::Arc;

use chrono::NaiveDate;
use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use urlencoding::encode;

use shared::date::format_date;
use shared::models::{
    Activity, DailySummary, Drink, DrinkDetail, Event, EventDetail, Meal, MealBatchDelete,
    MealDetail, MutationResponse, NamedEntry, Person, Product, Recipe, ReferenceKind, Restaurant,
};

use crate::http::HttpClient;
use crate::{ClientConfig, ClientResult, NetworkHttpClient};

/// Id-keyed REST resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Meals,
    Events,
    Drinks,
    People,
    Restaurants,
    Recipes,
    Products,
    Activities,
}

impl Resource {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Meals => "meals",
            Self::Events => "events",
            Self::Drinks => "drinks",
            Self::People => "people",
            Self::Restaurants => "restaurants",
            Self::Recipes => "recipes",
            Self::Products => "products",
            Self::Activities => "activities",
        }
    }

    /// Lower-case noun for user messages, singular or plural by `count`
    pub fn noun(&self, count: usize) -> &'static str {
        let (one, many) = match self {
            Self::Meals => ("meal", "meals"),
            Self::Events => ("event", "events"),
            Self::Drinks => ("drink", "drinks"),
            Self::People => ("person", "people"),
            Self::Restaurants => ("restaurant", "restaurants"),
            Self::Recipes => ("recipe", "recipes"),
            Self::Products => ("product", "products"),
            Self::Activities => ("activity", "activities"),
        };
        if count == 1 { one } else { many }
    }
}

/// Typed API client
#[derive(Clone)]
pub struct XnoteApi {
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for XnoteApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XnoteApi").finish_non_exhaustive()
    }
}

impl XnoteApi {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    /// Build over a `NetworkHttpClient`
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(Arc::new(NetworkHttpClient::new(config)?)))
    }

    // ========== Raw verbs ==========

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let value = self.http.send(Method::GET, path, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn send_mutation<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<MutationResponse> {
        let body = body.map(serde_json::to_value).transpose()?;
        let value = self.http.send(method, path, body).await?;
        Ok(decode_mutation(value))
    }

    // ========== Generic resource calls ==========

    pub async fn list<T: DeserializeOwned>(&self, resource: Resource) -> ClientResult<Vec<T>> {
        self.get(resource.path()).await
    }

    pub async fn fetch<T: DeserializeOwned>(&self, resource: Resource, id: i32) -> ClientResult<T> {
        self.get(&format!("{}/{}", resource.path(), id)).await
    }

    pub async fn create<B: Serialize + ?Sized>(
        &self,
        resource: Resource,
        body: &B,
    ) -> ClientResult<MutationResponse> {
        let response = self.send_mutation(Method::POST, resource.path(), Some(body)).await?;
        tracing::info!(resource = resource.path(), id = ?response.id, "Created record");
        Ok(response)
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        resource: Resource,
        id: i32,
        body: &B,
    ) -> ClientResult<MutationResponse> {
        let path = format!("{}/{}", resource.path(), id);
        let response = self.send_mutation(Method::PUT, &path, Some(body)).await?;
        tracing::info!(resource = resource.path(), id, "Updated record");
        Ok(response)
    }

    /// One-key PUT for inline cell edits
    pub async fn update_field(
        &self,
        resource: Resource,
        id: i32,
        field: &str,
        value: Value,
    ) -> ClientResult<MutationResponse> {
        let mut body = serde_json::Map::new();
        body.insert(field.to_string(), value);
        self.update(resource, id, &Value::Object(body)).await
    }

    pub async fn delete(&self, resource: Resource, id: i32) -> ClientResult<MutationResponse> {
        let path = format!("{}/{}", resource.path(), id);
        let response = self.send_mutation::<Value>(Method::DELETE, &path, None).await?;
        tracing::info!(resource = resource.path(), id, "Deleted record");
        Ok(response)
    }

    // ========== Typed lists ==========

    pub async fn people(&self) -> ClientResult<Vec<Person>> {
        self.list(Resource::People).await
    }

    pub async fn recipes(&self) -> ClientResult<Vec<Recipe>> {
        self.list(Resource::Recipes).await
    }

    pub async fn products(&self) -> ClientResult<Vec<Product>> {
        self.list(Resource::Products).await
    }

    pub async fn restaurants(&self) -> ClientResult<Vec<Restaurant>> {
        self.list(Resource::Restaurants).await
    }

    pub async fn activities(&self) -> ClientResult<Vec<Activity>> {
        self.list(Resource::Activities).await
    }

    pub async fn meals(&self) -> ClientResult<Vec<Meal>> {
        self.list(Resource::Meals).await
    }

    pub async fn events(&self) -> ClientResult<Vec<Event>> {
        self.list(Resource::Events).await
    }

    pub async fn drinks(&self) -> ClientResult<Vec<Drink>> {
        self.list(Resource::Drinks).await
    }

    // ========== Detail views ==========

    pub async fn meal_details(&self, id: i32) -> ClientResult<MealDetail> {
        self.get(&format!("meals/{}/details", id)).await
    }

    pub async fn event_details(&self, id: i32) -> ClientResult<EventDetail> {
        self.get(&format!("events/{}/details", id)).await
    }

    pub async fn drink_details(&self, id: i32) -> ClientResult<DrinkDetail> {
        self.get(&format!("drinks/{}/details", id)).await
    }

    // ========== Meals batch delete ==========

    /// Delete several meals, falling back to one DELETE per id when the
    /// server has no batch endpoint. Returns the number of meals deleted.
    pub async fn delete_meals_batch(&self, meal_ids: &[i32]) -> ClientResult<usize> {
        if meal_ids.is_empty() {
            return Ok(0);
        }
        let body = MealBatchDelete { meal_ids: meal_ids.to_vec() };
        match self
            .send_mutation(Method::POST, "meals/batch/delete", Some(&body))
            .await
        {
            Ok(_) => {
                tracing::info!(count = meal_ids.len(), "Batch-deleted meals");
                Ok(meal_ids.len())
            }
            Err(e) if e.is_unsupported_endpoint() => {
                tracing::warn!("Batch delete unavailable ({}), deleting sequentially", e);
                for id in meal_ids {
                    self.delete(Resource::Meals, *id).await?;
                }
                Ok(meal_ids.len())
            }
            Err(e) => Err(e),
        }
    }

    // ========== Reference enums ==========

    pub async fn reference_list(&self, kind: ReferenceKind) -> ClientResult<Vec<NamedEntry>> {
        self.get(kind.resource()).await
    }

    pub async fn create_reference(
        &self,
        kind: ReferenceKind,
        name: &str,
    ) -> ClientResult<MutationResponse> {
        self.create_reference_entry(kind, &NamedEntry::new(name)).await
    }

    /// POST an already-built entry body
    pub async fn create_reference_entry<B: Serialize + ?Sized>(
        &self,
        kind: ReferenceKind,
        entry: &B,
    ) -> ClientResult<MutationResponse> {
        let response = self.send_mutation(Method::POST, kind.resource(), Some(entry)).await?;
        tracing::info!(resource = kind.resource(), "Created reference entry");
        Ok(response)
    }

    pub async fn delete_reference(
        &self,
        kind: ReferenceKind,
        name: &str,
    ) -> ClientResult<MutationResponse> {
        let path = format!("{}/{}", kind.resource(), encode(name));
        let response = self.send_mutation::<Value>(Method::DELETE, &path, None).await?;
        tracing::info!(resource = kind.resource(), name, "Deleted reference entry");
        Ok(response)
    }

    // ========== Daily summary ==========

    pub async fn daily_summary(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> ClientResult<Vec<DailySummary>> {
        let path = format!(
            "daily-summary?start_date={}&end_date={}",
            format_date(start_date),
            format_date(end_date)
        );
        self.get(&path).await
    }
}

/// Mutation bodies are informational; anything unexpected decodes to empty
fn decode_mutation(value: Value) -> MutationResponse {
    match value {
        Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
        _ => MutationResponse::default(),
    }
}
