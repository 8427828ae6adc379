// xnote-client/tests/form_flow.rs
// Modal lifecycle: duplicates, multi-item saves, edits, renames, staleness

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use http::Method;
use serde_json::json;

use common::{MockHttpClient, RecordingPresenter};
use shared::models::{FoodSourceKind, ReferenceKind};
use xnote_client::form::{
    CloseReason, FormController, FormError, FormState, LocationForm, MealForm, PersonForm,
    ProductForm, RecipeForm, ReferenceData, SaveMode, SaveOutcome,
};
use xnote_client::refresh::RefreshTarget;
use xnote_client::ClientResult;

#[derive(Default)]
struct CountingTarget {
    refreshed: AtomicUsize,
}

#[async_trait]
impl RefreshTarget for CountingTarget {
    fn name(&self) -> &str {
        "counter"
    }

    async fn refresh(&self) -> ClientResult<()> {
        self.refreshed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn household(mock: &MockHttpClient) {
    mock.reply(
        Method::GET,
        "people",
        json!([
            {"id": 1, "name": "xx", "notes": null},
            {"id": 2, "name": "ww", "notes": null},
            {"id": 3, "name": "Alice", "notes": "neighbour"}
        ]),
    );
}

fn defaults() -> Vec<String> {
    vec!["xx".to_string(), "ww".to_string()]
}

#[tokio::test]
async fn test_declined_duplicate_sends_no_create() {
    let mock = MockHttpClient::new();
    household(&mock);
    let presenter = RecordingPresenter::declining();
    let controller = FormController::<PersonForm>::new(mock.api(), presenter.clone(), defaults());

    controller.open_create().await.unwrap();
    controller.update(|form| form.name = "alice".into()).await.unwrap();

    let outcome = controller.save(SaveMode::Save).await.unwrap();
    assert_eq!(outcome, SaveOutcome::Cancelled);
    assert_eq!(mock.count(&Method::POST, "people"), 0);
    assert_eq!(controller.state().await, FormState::OpenForCreate);
    assert_eq!(controller.form().await.unwrap().name, "alice");
    assert!(presenter.confirmations()[0].message().contains("\"Alice\""));
}

#[tokio::test]
async fn test_two_recipes_become_two_meals() {
    let mock = MockHttpClient::new();
    household(&mock);
    mock.reply(Method::POST, "meals", json!({"id": 10}));
    let presenter = RecordingPresenter::accepting();
    let target = Arc::new(CountingTarget::default());
    let controller = FormController::<MealForm>::new(mock.api(), presenter.clone(), defaults())
        .with_refresh_target(target.clone());

    controller.open_create().await.unwrap();
    controller
        .update(|form| form.select_sources(FoodSourceKind::Recipe, [4, 7]))
        .await
        .unwrap();

    let outcome = controller.save(SaveMode::Save).await.unwrap();
    assert_eq!(outcome, SaveOutcome::Saved { records: 2 });

    let posts = mock.mutations();
    assert_eq!(posts.len(), 2);
    let bodies: Vec<_> = posts.iter().map(|r| r.body.clone().unwrap()).collect();
    assert_eq!(bodies[0]["food_source"], json!({"type": "recipe", "recipe_id": 4, "meal_type": "cooked"}));
    assert_eq!(bodies[1]["food_source"]["recipe_id"], 7);
    assert_eq!(bodies[0]["time"], "lunch");
    assert_eq!(bodies[0]["people_ids"], json!([1, 2]));
    assert_eq!(target.refreshed.load(Ordering::SeqCst), 1);
    assert_eq!(controller.state().await, FormState::Closed);
}

#[tokio::test]
async fn test_explicit_people_override_defaults() {
    let mock = MockHttpClient::new();
    household(&mock);
    mock.reply(Method::POST, "meals", json!({"id": 10}));
    let presenter = RecordingPresenter::accepting();
    let controller = FormController::<MealForm>::new(mock.api(), presenter, defaults());

    controller.open_create().await.unwrap();
    controller
        .update(|form| {
            form.select_sources(FoodSourceKind::Product, [2]);
            form.people_ids = vec![3];
        })
        .await
        .unwrap();
    controller.save(SaveMode::Save).await.unwrap();

    let body = mock.mutations()[0].body.clone().unwrap();
    assert_eq!(body["people_ids"], json!([3]));
    assert_eq!(body["food_source"]["type"], "product");
}

#[tokio::test]
async fn test_partial_failure_reports_progress_and_keeps_modal() {
    let mock = MockHttpClient::new();
    household(&mock);
    mock.reply(Method::POST, "meals", json!({"id": 10}))
        .fail(Method::POST, "meals", 500, "disk full");
    let presenter = RecordingPresenter::accepting();
    let target = Arc::new(CountingTarget::default());
    let controller = FormController::<MealForm>::new(mock.api(), presenter.clone(), defaults())
        .with_refresh_target(target.clone());

    controller.open_create().await.unwrap();
    controller
        .update(|form| form.select_sources(FoodSourceKind::Recipe, [4, 7, 9]))
        .await
        .unwrap();

    let err = controller.save(SaveMode::Save).await.unwrap_err();
    assert!(matches!(err, FormError::PartialFailure { completed: 1, failed_index: 1, .. }));
    assert_eq!(mock.count(&Method::POST, "meals"), 2);
    assert_eq!(target.refreshed.load(Ordering::SeqCst), 1);
    assert_eq!(controller.state().await, FormState::OpenForCreate);
    assert_eq!(presenter.errors()[0].0, "save meal");
}

#[tokio::test]
async fn test_validation_errors_are_aggregated() {
    let mock = MockHttpClient::new();
    let presenter = RecordingPresenter::accepting();
    let controller = FormController::<RecipeForm>::new(mock.api(), presenter.clone(), defaults());
    controller.open_create().await.unwrap();

    let err = controller.save(SaveMode::Save).await.unwrap_err();
    let FormError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert_eq!(errors.len(), 3);
    assert!(mock.mutations().is_empty());
    assert!(presenter.errors()[0].1.starts_with("Please fix the following errors:"));
}

#[tokio::test]
async fn test_network_error_preserves_modal() {
    let mock = MockHttpClient::new();
    mock.reply(Method::GET, "products", json!([]));
    mock.fail(Method::POST, "products", 503, "unavailable");
    let presenter = RecordingPresenter::accepting();
    let controller = FormController::<ProductForm>::new(mock.api(), presenter.clone(), defaults());

    controller.open_create().await.unwrap();
    controller.update(|form| form.name = "Kimchi".into()).await.unwrap();
    let err = controller.save(SaveMode::Save).await.unwrap_err();

    assert!(matches!(err, FormError::Network { .. }));
    assert_eq!(controller.state().await, FormState::OpenForCreate);
    assert_eq!(controller.form().await.unwrap().name, "Kimchi");
    assert_eq!(presenter.errors()[0].0, "save product");
    assert!(!presenter.is_loading());
}

#[tokio::test]
async fn test_save_and_add_another_rearms_create() {
    let mock = MockHttpClient::new();
    mock.reply(Method::GET, "products", json!([]));
    mock.reply(Method::POST, "products", json!({"id": 5}));
    let presenter = RecordingPresenter::accepting();
    let controller = FormController::<ProductForm>::new(mock.api(), presenter, defaults());

    controller.open_create().await.unwrap();
    controller.update(|form| form.name = "Tofu".into()).await.unwrap();
    let before = controller.generation().await;

    let outcome = controller.save(SaveMode::SaveAndAddAnother).await.unwrap();
    assert_eq!(outcome, SaveOutcome::Saved { records: 1 });
    assert_eq!(controller.state().await, FormState::OpenForCreate);
    assert_eq!(controller.form().await.unwrap().name, "Tofu");
    assert!(controller.generation().await > before);
}

#[tokio::test]
async fn test_edit_updates_and_save_as_new_creates() {
    let mock = MockHttpClient::new();
    household(&mock);
    mock.reply(Method::GET, "people/3", json!({"id": 3, "name": "Alice", "notes": null}));
    mock.reply(Method::PUT, "people/3", json!({"id": 3}));
    mock.reply(Method::POST, "people", json!({"id": 4}));
    let presenter = RecordingPresenter::accepting();
    let controller = FormController::<PersonForm>::new(mock.api(), presenter, defaults());

    controller.open_edit(3).await.unwrap();
    assert_eq!(controller.state().await, FormState::OpenForEdit(3.into()));
    controller.update(|form| form.notes = "moved away".into()).await.unwrap();
    controller.save(SaveMode::Save).await.unwrap();

    let put = &mock.mutations()[0];
    assert_eq!(put.method, Method::PUT);
    assert_eq!(put.body.as_ref().unwrap()["notes"], "moved away");
    assert_eq!(controller.state().await, FormState::Closed);

    controller.open_edit(3).await.unwrap();
    controller.update(|form| form.name = "Alice B".into()).await.unwrap();
    controller.save(SaveMode::SaveAsNew).await.unwrap();
    assert_eq!(mock.count(&Method::POST, "people"), 1);
    assert_eq!(mock.count(&Method::PUT, "people/3"), 1);
    assert_eq!(controller.state().await, FormState::OpenForCreate);
}

#[tokio::test]
async fn test_editing_meal_needs_exactly_one_item() {
    let mock = MockHttpClient::new();
    household(&mock);
    mock.reply(
        Method::GET,
        "meals/8/details",
        json!({
            "id": 8,
            "date": "2024-01-01",
            "time": "dinner",
            "notes": null,
            "food_source": {
                "type": "recipe",
                "details": {
                    "recipe": {"id": 4, "name": "Curry", "ingredients": "rice", "procedure": "cook", "cautions": null},
                    "meal_type": "cooked"
                }
            },
            "people": [{"id": 1, "name": "xx", "notes": null}]
        }),
    );
    let presenter = RecordingPresenter::accepting();
    let controller = FormController::<MealForm>::new(mock.api(), presenter, defaults());

    controller.open_edit(8).await.unwrap();
    controller
        .update(|form| form.select_sources(FoodSourceKind::Recipe, [4, 5]))
        .await
        .unwrap();
    let err = controller.save(SaveMode::Save).await.unwrap_err();
    assert!(err.is_validation());
    assert!(mock.mutations().is_empty());
}

#[tokio::test]
async fn test_late_record_after_close_is_dropped() {
    let mock = MockHttpClient::new();
    mock.reply(
        Method::GET,
        "recipes/5",
        json!({"id": 5, "name": "Curry", "ingredients": "rice", "procedure": "cook", "cautions": null}),
    );
    let slow = mock.gate(Method::GET, "recipes/5");
    let presenter = RecordingPresenter::accepting();
    let controller = FormController::<RecipeForm>::new(mock.api(), presenter, defaults());

    let (opened, _) = tokio::join!(controller.open_edit(5), async {
        while mock.count(&Method::GET, "recipes/5") == 0 {
            tokio::task::yield_now().await;
        }
        controller.close(CloseReason::Escape).await;
        slow.notify_one();
    });

    assert!(matches!(opened, Err(FormError::Stale)));
    assert_eq!(controller.state().await, FormState::Closed);
    assert!(controller.form().await.is_none());
}

#[tokio::test]
async fn test_reference_rename_creates_then_deletes() {
    let mock = MockHttpClient::new();
    mock.reply(Method::POST, "locations", json!({"name": "Garden"}));
    mock.reply(Method::DELETE, "locations/City%20Park", json!({"message": "deleted"}));
    let presenter = RecordingPresenter::accepting();
    let controller = FormController::<LocationForm>::new(mock.api(), presenter, defaults());

    controller.open_edit("City Park").await.unwrap();
    assert_eq!(controller.form().await.unwrap().kind(), ReferenceKind::Location);
    controller.update(|form| form.name = "Garden".into()).await.unwrap();
    controller.save(SaveMode::Save).await.unwrap();

    let calls: Vec<_> = mock
        .mutations()
        .into_iter()
        .map(|r| format!("{} {}", r.method, r.path))
        .collect();
    assert_eq!(calls, vec!["POST locations", "DELETE locations/City%20Park"]);
    assert_eq!(mock.mutations()[0].body, Some(json!({"name": "Garden"})));
}

#[tokio::test]
async fn test_reference_same_name_is_unchanged() {
    let mock = MockHttpClient::new();
    let presenter = RecordingPresenter::accepting();
    let controller = FormController::<LocationForm>::new(mock.api(), presenter, defaults());

    controller.open_edit("Park").await.unwrap();
    let outcome = controller.save(SaveMode::Save).await.unwrap();
    assert_eq!(outcome, SaveOutcome::Unchanged);
    assert!(mock.mutations().is_empty());
    assert_eq!(controller.state().await, FormState::Closed);
}

#[tokio::test]
async fn test_reference_rename_with_failed_delete_is_partial() {
    let mock = MockHttpClient::new();
    mock.reply(Method::POST, "locations", json!({"name": "Garden"}));
    mock.fail(Method::DELETE, "locations/Park", 500, "in use");
    let presenter = RecordingPresenter::accepting();
    let controller = FormController::<LocationForm>::new(mock.api(), presenter, defaults());

    controller.open_edit("Park").await.unwrap();
    controller.update(|form| form.name = "Garden".into()).await.unwrap();
    let err = controller.save(SaveMode::Save).await.unwrap_err();

    assert!(matches!(err, FormError::PartialFailure { completed: 1, .. }));
    assert!(controller.state().await.is_open());
}

#[tokio::test]
async fn test_close_releases_sub_widgets() {
    let mock = MockHttpClient::new();
    let presenter = RecordingPresenter::accepting();
    let controller = FormController::<PersonForm>::new(mock.api(), presenter, defaults());
    let released = Arc::new(AtomicUsize::new(0));

    controller.open_create().await.unwrap();
    for widget in ["people picker", "date picker"] {
        let released = released.clone();
        controller
            .widgets()
            .register(widget, move || {
                released.fetch_add(1, Ordering::SeqCst);
            })
            .await;
    }

    assert!(controller.close(CloseReason::OutsideClick).await);
    assert_eq!(released.load(Ordering::SeqCst), 2);
    assert!(controller.widgets().is_empty().await);
    assert!(!controller.close(CloseReason::Cancel).await);
}

#[tokio::test]
async fn test_failed_reference_lists_degrade_to_empty() {
    let mock = MockHttpClient::new();
    household(&mock);
    mock.fail(Method::GET, "restaurants", 500, "boom");
    mock.reply(Method::GET, "locations", json!([{"name": "Park"}]));

    let refs = ReferenceData::load(&mock.api()).await;
    assert_eq!(refs.people.len(), 3);
    assert!(refs.restaurants.is_empty());
    assert_eq!(refs.locations[0].name, "Park");
    assert!(refs.recipes.is_empty());
}
