pub mod error;
pub mod measure;
pub mod models;
pub mod notify;
pub mod notify_mock;
pub mod recipes;
pub mod session;
pub mod settings;
pub mod storage;
pub mod units;

uniffi::setup_scaffolding!();

pub use error::{DurationError, EntryError, FieldError, SessionError, StoreError};
pub use measure::PourWindow;
pub use models::{
    Grind, PourInterval, Recipe, RecipeId, TemperatureUnit, Theme, WaterTemperature,
};
pub use notify::{NotificationDispatch, Notifier, PermissionStatus};
pub use recipes::{MoveDirection, RecipeStore};
pub use session::{BrewPhase, BrewSession, SessionSnapshot, TickOutcome};
pub use settings::Settings;
pub use storage::{KeyValueStore, MemoryStore};
