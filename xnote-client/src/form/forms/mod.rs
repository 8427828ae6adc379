//! Form state per entity kind

mod catalog;
mod drink;
mod enums;
mod event;
mod meal;
mod person;

pub use catalog::{ActivityForm, ProductForm, RecipeForm, RestaurantForm};
pub use drink::DrinkForm;
pub use enums::{
    ActivityTypeEnum, ActivityTypeForm, DrinkOptionEnum, DrinkOptionForm, FoodTypeEnum,
    FoodTypeForm, LocationEnum, LocationForm, ReferenceEnum, ReferenceForm,
};
pub use event::EventForm;
pub use meal::MealForm;
pub use person::PersonForm;
