//! Recipe, product, restaurant and activity modals

use async_trait::async_trait;
use chrono::NaiveDate;

use shared::ValidationErrors;
use shared::models::{
    Activity, ActivityCreate, Product, ProductCreate, Recipe, RecipeCreate, Restaurant,
    RestaurantCreate,
};

use crate::api::{Resource, XnoteApi};
use crate::form::descriptor::{ACTIVITY, EntityDescriptor, PRODUCT, RECIPE, RESTAURANT};
use crate::form::entity::{EntityForm, RecordKey, filled, non_blank};
use crate::form::reference::ReferenceData;
use crate::ClientResult;

// ============================================================================
// Recipe
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeForm {
    pub name: String,
    pub ingredients: String,
    pub procedure: String,
    pub cautions: String,
}

#[async_trait]
impl EntityForm for RecipeForm {
    type Record = Recipe;
    type Payload = RecipeCreate;

    fn descriptor() -> &'static EntityDescriptor {
        &RECIPE
    }

    fn defaults(_refs: &ReferenceData, _today: NaiveDate) -> Self {
        Self::default()
    }

    async fn fetch_record(api: &XnoteApi, key: &RecordKey) -> ClientResult<Recipe> {
        api.fetch(Resource::Recipes, key.require_id()?).await
    }

    fn from_record(recipe: Recipe) -> Self {
        Self {
            name: recipe.name,
            ingredients: recipe.ingredients,
            procedure: recipe.procedure,
            cautions: recipe.cautions.unwrap_or_default(),
        }
    }

    fn is_filled(&self, field: &str) -> bool {
        match field {
            "name" => filled(&self.name),
            "ingredients" => filled(&self.ingredients),
            "procedure" => filled(&self.procedure),
            "cautions" => filled(&self.cautions),
            _ => false,
        }
    }

    fn candidate_name(&self) -> Option<String> {
        non_blank(&self.name)
    }

    fn payloads(&self, _: &ReferenceData, _: &[String]) -> Result<Vec<RecipeCreate>, ValidationErrors> {
        Ok(vec![RecipeCreate {
            name: self.name.trim().to_string(),
            ingredients: self.ingredients.trim().to_string(),
            procedure: self.procedure.trim().to_string(),
            cautions: non_blank(&self.cautions),
        }])
    }
}

// ============================================================================
// Product
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
}

#[async_trait]
impl EntityForm for ProductForm {
    type Record = Product;
    type Payload = ProductCreate;

    fn descriptor() -> &'static EntityDescriptor {
        &PRODUCT
    }

    fn defaults(_refs: &ReferenceData, _today: NaiveDate) -> Self {
        Self::default()
    }

    async fn fetch_record(api: &XnoteApi, key: &RecordKey) -> ClientResult<Product> {
        api.fetch(Resource::Products, key.require_id()?).await
    }

    fn from_record(product: Product) -> Self {
        Self { name: product.name }
    }

    fn is_filled(&self, field: &str) -> bool {
        field == "name" && filled(&self.name)
    }

    fn candidate_name(&self) -> Option<String> {
        non_blank(&self.name)
    }

    fn payloads(&self, _: &ReferenceData, _: &[String]) -> Result<Vec<ProductCreate>, ValidationErrors> {
        Ok(vec![ProductCreate { name: self.name.trim().to_string() }])
    }
}

// ============================================================================
// Restaurant
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantForm {
    pub name: String,
    pub location: String,
    /// Food type name
    pub food_type: String,
    pub price: Option<f64>,
}

#[async_trait]
impl EntityForm for RestaurantForm {
    type Record = Restaurant;
    type Payload = RestaurantCreate;

    fn descriptor() -> &'static EntityDescriptor {
        &RESTAURANT
    }

    fn defaults(_refs: &ReferenceData, _today: NaiveDate) -> Self {
        Self::default()
    }

    async fn fetch_record(api: &XnoteApi, key: &RecordKey) -> ClientResult<Restaurant> {
        api.fetch(Resource::Restaurants, key.require_id()?).await
    }

    fn from_record(restaurant: Restaurant) -> Self {
        Self {
            name: restaurant.name,
            location: restaurant.location.unwrap_or_default(),
            food_type: restaurant.food_type,
            price: restaurant.price,
        }
    }

    fn is_filled(&self, field: &str) -> bool {
        match field {
            "name" => filled(&self.name),
            "location" => filled(&self.location),
            "type" => filled(&self.food_type),
            "price" => self.price.is_some(),
            _ => false,
        }
    }

    fn extra_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if self.price.is_some_and(|p| p < 0.0) {
            errors.push("price", "Price cannot be negative");
        }
        errors
    }

    fn candidate_name(&self) -> Option<String> {
        non_blank(&self.name)
    }

    fn payloads(
        &self,
        _: &ReferenceData,
        _: &[String],
    ) -> Result<Vec<RestaurantCreate>, ValidationErrors> {
        Ok(vec![RestaurantCreate {
            name: self.name.trim().to_string(),
            location: non_blank(&self.location),
            food_type: self.food_type.trim().to_string(),
            price: self.price,
        }])
    }
}

// ============================================================================
// Activity
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityForm {
    pub name: String,
    /// Activity type name
    pub activity_type: String,
}

#[async_trait]
impl EntityForm for ActivityForm {
    type Record = Activity;
    type Payload = ActivityCreate;

    fn descriptor() -> &'static EntityDescriptor {
        &ACTIVITY
    }

    fn defaults(_refs: &ReferenceData, _today: NaiveDate) -> Self {
        Self::default()
    }

    async fn fetch_record(api: &XnoteApi, key: &RecordKey) -> ClientResult<Activity> {
        api.fetch(Resource::Activities, key.require_id()?).await
    }

    fn from_record(activity: Activity) -> Self {
        Self {
            name: activity.name,
            activity_type: activity.activity_type,
        }
    }

    fn is_filled(&self, field: &str) -> bool {
        match field {
            "name" => filled(&self.name),
            "type" => filled(&self.activity_type),
            _ => false,
        }
    }

    fn candidate_name(&self) -> Option<String> {
        non_blank(&self.name)
    }

    fn payloads(&self, _: &ReferenceData, _: &[String]) -> Result<Vec<ActivityCreate>, ValidationErrors> {
        Ok(vec![ActivityCreate {
            name: self.name.trim().to_string(),
            activity_type: self.activity_type.trim().to_string(),
        }])
    }
}
