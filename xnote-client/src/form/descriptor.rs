//! Entity descriptors
//!
//! One static table row per entity kind. The controller reads everything
//! entity-specific from here: where records live, which fields are
//! required, whether names are checked for duplicates, and which field a
//! single submission fans out over.

use shared::models::ReferenceKind;

use crate::api::Resource;

/// How a record is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Id,
    Name,
}

/// Where records of an entity live on the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityTarget {
    /// Id-keyed resource; `details` when edits pre-fill from `:id/details`
    Record { resource: Resource, details: bool },
    /// Name-keyed reference enum
    Reference(ReferenceKind),
}

impl EntityTarget {
    pub fn key_kind(&self) -> KeyKind {
        match self {
            Self::Record { .. } => KeyKind::Id,
            Self::Reference(_) => KeyKind::Name,
        }
    }
}

/// One form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
}

const fn required(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec { name, label, required: true }
}

const fn optional(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec { name, label, required: false }
}

/// Declarative per-entity configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDescriptor {
    /// Singular display name, e.g. "Person"
    pub label: &'static str,
    pub target: EntityTarget,
    pub fields: &'static [FieldSpec],
    /// Confirm before creating a name similar to an existing one
    pub duplicate_check: bool,
    /// Field whose selected values each become one record
    pub multi_item: Option<&'static str>,
    /// Substitute the household when no attendee is selected
    pub default_people: bool,
}

impl EntityDescriptor {
    pub fn key_kind(&self) -> KeyKind {
        self.target.key_kind()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Operation name for user messages, e.g. "save person"
    pub fn operation(&self, verb: &str) -> String {
        format!("{} {}", verb, self.label.to_lowercase())
    }
}

pub static PERSON: EntityDescriptor = EntityDescriptor {
    label: "Person",
    target: EntityTarget::Record { resource: Resource::People, details: false },
    fields: &[required("name", "Person name"), optional("notes", "Notes")],
    duplicate_check: true,
    multi_item: None,
    default_people: false,
};

pub static RECIPE: EntityDescriptor = EntityDescriptor {
    label: "Recipe",
    target: EntityTarget::Record { resource: Resource::Recipes, details: false },
    fields: &[
        required("name", "Recipe name"),
        required("ingredients", "Ingredient list"),
        required("procedure", "Procedure"),
        optional("cautions", "Cautions"),
    ],
    duplicate_check: true,
    multi_item: None,
    default_people: false,
};

pub static PRODUCT: EntityDescriptor = EntityDescriptor {
    label: "Product",
    target: EntityTarget::Record { resource: Resource::Products, details: false },
    fields: &[required("name", "Product name")],
    duplicate_check: true,
    multi_item: None,
    default_people: false,
};

pub static RESTAURANT: EntityDescriptor = EntityDescriptor {
    label: "Restaurant",
    target: EntityTarget::Record { resource: Resource::Restaurants, details: false },
    fields: &[
        required("name", "Restaurant name"),
        optional("location", "Location"),
        required("type", "Food type"),
        optional("price", "Price"),
    ],
    duplicate_check: true,
    multi_item: None,
    default_people: false,
};

pub static ACTIVITY: EntityDescriptor = EntityDescriptor {
    label: "Activity",
    target: EntityTarget::Record { resource: Resource::Activities, details: false },
    fields: &[required("name", "Activity name"), required("type", "Activity type")],
    duplicate_check: true,
    multi_item: None,
    default_people: false,
};

pub static LOCATION: EntityDescriptor = EntityDescriptor {
    label: "Location",
    target: EntityTarget::Reference(ReferenceKind::Location),
    fields: &[required("name", "Location name")],
    duplicate_check: false,
    multi_item: None,
    default_people: false,
};

pub static FOOD_TYPE: EntityDescriptor = EntityDescriptor {
    label: "Food Type",
    target: EntityTarget::Reference(ReferenceKind::FoodType),
    fields: &[required("name", "Food type name")],
    duplicate_check: false,
    multi_item: None,
    default_people: false,
};

pub static DRINK_OPTION: EntityDescriptor = EntityDescriptor {
    label: "Drink Option",
    target: EntityTarget::Reference(ReferenceKind::DrinkOption),
    fields: &[required("name", "Drink option name")],
    duplicate_check: false,
    multi_item: None,
    default_people: false,
};

pub static ACTIVITY_TYPE: EntityDescriptor = EntityDescriptor {
    label: "Activity Type",
    target: EntityTarget::Reference(ReferenceKind::ActivityType),
    fields: &[required("name", "Activity type name")],
    duplicate_check: false,
    multi_item: None,
    default_people: false,
};

pub static MEAL: EntityDescriptor = EntityDescriptor {
    label: "Meal",
    target: EntityTarget::Record { resource: Resource::Meals, details: true },
    fields: &[
        required("date", "Date"),
        required("time", "Meal time"),
        required("food_source", "Food item"),
        optional("meal_type", "Meal type"),
        optional("notes", "Notes"),
        optional("people", "People"),
    ],
    duplicate_check: false,
    multi_item: Some("food_source"),
    default_people: true,
};

pub static EVENT: EntityDescriptor = EntityDescriptor {
    label: "Event",
    target: EntityTarget::Record { resource: Resource::Events, details: true },
    fields: &[
        required("date", "Date"),
        required("activity", "Activity"),
        optional("measure", "Measure"),
        optional("location", "Location"),
        optional("notes", "Notes"),
        optional("people", "People"),
    ],
    duplicate_check: false,
    multi_item: None,
    default_people: true,
};

pub static DRINK: EntityDescriptor = EntityDescriptor {
    label: "Drink",
    target: EntityTarget::Record { resource: Resource::Drinks, details: true },
    fields: &[
        required("date", "Date"),
        required("name", "Drink"),
        optional("people", "People"),
    ],
    duplicate_check: false,
    multi_item: Some("name"),
    default_people: true,
};

/// Every descriptor, for lookups by label
pub static ALL: [&EntityDescriptor; 12] = [
    &PERSON,
    &RECIPE,
    &PRODUCT,
    &RESTAURANT,
    &ACTIVITY,
    &LOCATION,
    &FOOD_TYPE,
    &DRINK_OPTION,
    &ACTIVITY_TYPE,
    &MEAL,
    &EVENT,
    &DRINK,
];
