//! The recipe collection: shipped defaults, form validation, ordered list
//! operations and persistence through the host key-value store.

use std::sync::{Arc, Mutex};

use tracing::{error, warn};
use uuid::Uuid;

use crate::error::{FieldError, StoreError};
use crate::models::{Grind, PourInterval, Recipe, RecipeId, TemperatureUnit, WaterTemperature};
use crate::storage::{KeyValueStore, RECIPES_KEY};

/// Grind picker values, coarsest first.
#[uniffi::export]
pub fn grind_options() -> Vec<Grind> {
    vec![
        Grind::ExtraCoarse,
        Grind::Coarse,
        Grind::MediumCoarse,
        Grind::Medium,
        Grind::MediumFine,
        Grind::Fine,
        Grind::VeryFine,
    ]
}

/// Ratio picker values (1:10 through 1:20).
#[uniffi::export]
pub fn ratio_options() -> Vec<f64> {
    (10..=20).map(f64::from).collect()
}

/// Mint an id for a new recipe.
pub fn new_recipe_id() -> RecipeId {
    RecipeId(format!("recipe_{}", Uuid::new_v4()))
}

/// The two recipes shipped with the app.
pub fn default_recipes() -> Vec<Recipe> {
    vec![
        Recipe {
            id: RecipeId("default-1".to_string()),
            name: "Pour Over".to_string(),
            description: "A perfect small cup, designed for conical brewers like the Hario V60."
                .to_string(),
            ratio: 15.0,
            suggested_grounds: 15.0,
            grind: Grind::Medium,
            water_temperature: WaterTemperature {
                value: 212.0,
                unit: TemperatureUnit::Fahrenheit,
            },
            pours: 3,
            time_between_pours: PourInterval {
                minutes: 0,
                seconds: 35,
            },
            comments: "Fold the bottom of the filter to reinforce the seal, and pre-wet the \
                       filter and mug with hot water. Place mug, brewer and moistened filter \
                       with grounds on a kitchen scale and tare to zero. Start the timer and \
                       begin the pour. Pour slowly, but it is not necessary to take the entire \
                       time. Begin the next pour when the timer has elapsed."
                .to_string(),
        },
        Recipe {
            id: RecipeId("default-2".to_string()),
            name: "French Press".to_string(),
            description: "Hearty and silty brew for a long session. Perfect for sharing."
                .to_string(),
            ratio: 16.0,
            suggested_grounds: 60.0,
            grind: Grind::Coarse,
            water_temperature: WaterTemperature {
                value: 210.0,
                unit: TemperatureUnit::Fahrenheit,
            },
            pours: 1,
            time_between_pours: PourInterval {
                minutes: 10,
                seconds: 0,
            },
            comments: "Remove the plunger and add grounds. Then add pour the entire amount of \
                       water. Apply the plunger just enough to submerge the grounds below the \
                       surface. Let steep for the full timer. Then plunge the grounds to the \
                       bottom of the press. Pour finished coffee into a mug."
                .to_string(),
        },
    ]
}

/// Template the add-recipe form opens with.
#[uniffi::export]
pub fn draft_recipe() -> Recipe {
    Recipe {
        id: new_recipe_id(),
        name: String::new(),
        description: String::new(),
        ratio: 15.0,
        suggested_grounds: 20.0,
        grind: Grind::Medium,
        water_temperature: WaterTemperature {
            value: 212.0,
            unit: TemperatureUnit::Fahrenheit,
        },
        pours: 3,
        time_between_pours: PourInterval {
            minutes: 0,
            seconds: 30,
        },
        comments: String::new(),
    }
}

/// Check a recipe before saving. Returns one entry per failed field, named
/// so the form can show each message next to its input. Any entry blocks
/// the save.
pub fn validate(recipe: &Recipe) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if recipe.name.trim().is_empty() {
        errors.push(field_error("name", "name is required"));
    }
    if !recipe.ratio.is_finite() || recipe.ratio <= 0.0 {
        errors.push(field_error("ratio", "ratio must be a positive number"));
    }
    if !recipe.suggested_grounds.is_finite() || recipe.suggested_grounds <= 0.0 {
        errors.push(field_error(
            "suggestedGrounds",
            "grounds must be a positive number",
        ));
    }
    if recipe.pours < 1 || recipe.pours > 10 {
        errors.push(field_error("pours", "pours must be between 1 and 10"));
    }
    if recipe.time_between_pours.seconds > 59 {
        errors.push(field_error("timeBetweenPours", "seconds must be 0-59"));
    }
    errors
}

fn field_error(field: &str, message: &str) -> FieldError {
    FieldError {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Direction for the reorder arrows in the recipe list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Ordered recipe collection persisted as one JSON blob.
///
/// List order is display order. Every mutation validates first, applies in
/// memory, then rewrites the whole list under [`RECIPES_KEY`]. The list is
/// never empty.
#[derive(uniffi::Object)]
pub struct RecipeStore {
    kv: Arc<dyn KeyValueStore>,
    recipes: Mutex<Vec<Recipe>>,
}

#[uniffi::export]
impl RecipeStore {
    /// Load the persisted list. A missing, unreadable or empty list falls
    /// back to the shipped defaults, which are written back immediately.
    #[uniffi::constructor]
    pub fn open(kv: Arc<dyn KeyValueStore>) -> Arc<Self> {
        let recipes = match kv.get(RECIPES_KEY.to_string()) {
            Some(raw) => match serde_json::from_str::<Vec<Recipe>>(&raw) {
                Ok(list) if !list.is_empty() => list,
                Ok(_) => {
                    warn!("persisted recipe list is empty, restoring defaults");
                    default_recipes()
                }
                Err(e) => {
                    warn!("persisted recipe list unreadable ({e}), restoring defaults");
                    default_recipes()
                }
            },
            None => default_recipes(),
        };
        let store = Arc::new(RecipeStore {
            kv,
            recipes: Mutex::new(recipes),
        });
        store.persist(&store.recipes.lock().unwrap());
        store
    }

    /// All recipes in display order.
    pub fn list(&self) -> Vec<Recipe> {
        self.recipes.lock().unwrap().clone()
    }

    pub fn get(&self, id: RecipeId) -> Option<Recipe> {
        self.recipes
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    /// Look up by id, falling back to the first recipe. The selection is a
    /// weak reference: the recipe behind it may have been deleted.
    pub fn resolve(&self, id: Option<RecipeId>) -> Recipe {
        let recipes = self.recipes.lock().unwrap();
        id.and_then(|id| recipes.iter().find(|r| r.id == id).cloned())
            .unwrap_or_else(|| recipes[0].clone())
    }

    /// Validated upsert: replace the recipe with the same id, or append.
    pub fn save(&self, recipe: Recipe) -> Result<(), StoreError> {
        let errors = validate(&recipe);
        if !errors.is_empty() {
            return Err(StoreError::Validation { errors });
        }
        let mut recipes = self.recipes.lock().unwrap();
        match recipes.iter_mut().find(|r| r.id == recipe.id) {
            Some(slot) => *slot = recipe,
            None => recipes.push(recipe),
        }
        self.persist(&recipes);
        Ok(())
    }

    /// Delete a recipe. The last remaining recipe cannot be deleted.
    pub fn remove(&self, id: RecipeId) -> Result<(), StoreError> {
        let mut recipes = self.recipes.lock().unwrap();
        if recipes.len() <= 1 {
            return Err(StoreError::LastRecipe);
        }
        let before = recipes.len();
        recipes.retain(|r| r.id != id);
        if recipes.len() == before {
            return Err(StoreError::NotFound { id: id.0 });
        }
        self.persist(&recipes);
        Ok(())
    }

    /// Swap a recipe with its neighbor. Returns false for edge moves and
    /// unknown ids, with nothing written.
    pub fn move_recipe(&self, id: RecipeId, direction: MoveDirection) -> bool {
        let mut recipes = self.recipes.lock().unwrap();
        let index = match recipes.iter().position(|r| r.id == id) {
            Some(index) => index,
            None => return false,
        };
        let target = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < recipes.len() => index + 1,
            _ => return false,
        };
        recipes.swap(index, target);
        self.persist(&recipes);
        true
    }
}

impl RecipeStore {
    fn persist(&self, recipes: &[Recipe]) {
        match serde_json::to_string(recipes) {
            Ok(json) => self.kv.set(RECIPES_KEY.to_string(), json),
            Err(e) => error!("failed to serialize recipe list: {e}"),
        }
    }
}
