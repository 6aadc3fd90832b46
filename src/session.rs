//! Brew-session state machine.
//!
//! One object owns the whole session: the working copy of the selected
//! recipe, the linked grounds/water/ratio values, and the stage countdown.
//! The host shell schedules a one-second callback into
//! [`BrewSession::tick`] while the screen is visible and renders from
//! [`BrewSession::snapshot`]; every command is a single atomic update under
//! one lock, so ticks and button presses never interleave mid-transition.

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::{EntryError, SessionError};
use crate::measure;
use crate::models::{Recipe, RecipeId};
use crate::notify::NotificationDispatch;
use crate::units::duration;

/// Where the session is in the brew cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum BrewPhase {
    /// Not started for the current recipe selection.
    Idle,
    /// Counting down the current pour stage.
    Running,
    /// Stopped with time remaining.
    Paused,
    /// Countdown hit zero with more pours left.
    StageComplete,
    /// Countdown hit zero on the last pour.
    Finished,
}

impl BrewPhase {
    /// Label of the single action button; a pure function of phase.
    pub fn action_label(&self) -> &'static str {
        match self {
            BrewPhase::Idle => "Start",
            BrewPhase::Running => "Pause",
            BrewPhase::Paused => "Resume",
            BrewPhase::StageComplete => "Continue",
            BrewPhase::Finished => "Finish",
        }
    }
}

/// What a tick did, so the host can react without re-reading state.
#[derive(Clone, Copy, Debug, PartialEq, uniffi::Enum)]
pub enum TickOutcome {
    /// The tick arrived outside Running and was ignored.
    Ignored,
    /// Still counting down.
    Ticked { remaining: u32 },
    /// The stage finished with more pours left; a notification went out.
    StageComplete { pour: u32, of: u32 },
    /// The last stage finished; a notification went out.
    Finished,
}

/// Read model for the main screen.
#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct SessionSnapshot {
    pub recipe_id: RecipeId,
    pub phase: BrewPhase,
    pub grounds: f64,
    pub water: f64,
    pub ratio: f64,
    pub total_seconds: u32,
    pub timer: u32,
    pub timer_display: String,
    pub current_pour: u32,
    pub pours: u32,
    /// Target water range for the current pour, whole grams.
    pub pour_start_g: u32,
    pub pour_end_g: u32,
    pub is_brewing: bool,
    pub is_timer_running: bool,
    pub is_editing_time: bool,
    pub action_label: String,
}

#[derive(Clone, Debug)]
struct SessionState {
    recipe: Recipe,
    grounds: f64,
    water: f64,
    ratio: f64,
    total_seconds: u32,
    timer: u32,
    current_pour: u32,
    phase: BrewPhase,
    editing_time: bool,
}

impl SessionState {
    fn from_recipe(recipe: Recipe) -> Self {
        let grounds = recipe.suggested_grounds;
        let ratio = recipe.ratio;
        let total_seconds = recipe.time_between_pours.total_seconds();
        SessionState {
            grounds,
            water: measure::water_for_grounds(grounds, ratio),
            ratio,
            total_seconds,
            timer: total_seconds,
            current_pour: 1,
            phase: BrewPhase::Idle,
            editing_time: false,
            recipe,
        }
    }

    fn is_brewing(&self) -> bool {
        self.phase != BrewPhase::Idle
    }
}

/// The single controller owning brew-session state.
#[derive(uniffi::Object)]
pub struct BrewSession {
    state: Mutex<SessionState>,
    notifications: Arc<NotificationDispatch>,
}

#[uniffi::export]
impl BrewSession {
    /// Open a session on `recipe` with everything at the recipe defaults.
    #[uniffi::constructor]
    pub fn new(recipe: Recipe, notifications: Arc<NotificationDispatch>) -> Arc<Self> {
        Arc::new(BrewSession {
            state: Mutex::new(SessionState::from_recipe(recipe)),
            notifications,
        })
    }

    /// The action button. What it does depends on the current phase.
    pub fn toggle(&self) -> BrewPhase {
        let mut s = self.state.lock().unwrap();
        match s.phase {
            BrewPhase::Idle => {
                s.editing_time = false;
                s.phase = BrewPhase::Running;
                debug!(timer = s.timer, "brew started");
            }
            BrewPhase::Running => s.phase = BrewPhase::Paused,
            BrewPhase::Paused => s.phase = BrewPhase::Running,
            BrewPhase::StageComplete => {
                s.current_pour += 1;
                s.timer = s.total_seconds;
                s.phase = BrewPhase::Running;
                debug!(pour = s.current_pour, "next pour started");
            }
            BrewPhase::Finished => *s = SessionState::from_recipe(s.recipe.clone()),
        }
        s.phase
    }

    /// One-second countdown callback from the host timer.
    ///
    /// Ticks outside Running are ignored, so a stale host timer can never
    /// corrupt a paused or finished session. The stage transition at zero
    /// dispatches its notification after the state lock is released.
    pub fn tick(&self) -> TickOutcome {
        let outcome = {
            let mut s = self.state.lock().unwrap();
            if s.phase != BrewPhase::Running {
                return TickOutcome::Ignored;
            }
            if s.timer > 0 {
                s.timer -= 1;
            }
            if s.timer > 0 {
                return TickOutcome::Ticked { remaining: s.timer };
            }
            if s.current_pour < s.recipe.pours {
                s.phase = BrewPhase::StageComplete;
                TickOutcome::StageComplete {
                    pour: s.current_pour,
                    of: s.recipe.pours,
                }
            } else {
                s.phase = BrewPhase::Finished;
                TickOutcome::Finished
            }
        };
        match outcome {
            TickOutcome::StageComplete { pour, of } => self.notifications.pour_complete(pour, of),
            TickOutcome::Finished => self.notifications.brew_complete(),
            _ => {}
        }
        outcome
    }

    /// Abandon the session and restore the recipe defaults.
    pub fn reset(&self) {
        let mut s = self.state.lock().unwrap();
        *s = SessionState::from_recipe(s.recipe.clone());
    }

    /// Switch recipes. Any brew in progress is discarded without
    /// confirmation and the session restarts from the new defaults.
    pub fn select_recipe(&self, recipe: Recipe) {
        let mut s = self.state.lock().unwrap();
        debug!(id = %recipe.id.0, "recipe selected");
        *s = SessionState::from_recipe(recipe);
    }

    /// Grounds text field edited. Water follows at the current ratio.
    pub fn set_grounds(&self, input: String) -> Result<(), EntryError> {
        let mut s = self.state.lock().unwrap();
        if let Some(grounds) = measure::parse_entry(&input)? {
            s.grounds = grounds;
            s.water = measure::water_for_grounds(grounds, s.ratio);
        }
        Ok(())
    }

    /// Water text field edited. Grounds follow at the current ratio.
    pub fn set_water(&self, input: String) -> Result<(), EntryError> {
        let mut s = self.state.lock().unwrap();
        if let Some(water) = measure::parse_entry(&input)? {
            s.water = water;
            s.grounds = measure::grounds_for_water(water, s.ratio);
        }
        Ok(())
    }

    /// Stepper button next to the grounds field; clamps at zero.
    pub fn adjust_grounds(&self, delta: f64) {
        let mut s = self.state.lock().unwrap();
        s.grounds = (s.grounds + delta).max(0.0);
        s.water = measure::water_for_grounds(s.grounds, s.ratio);
    }

    /// Stepper button next to the water field; clamps at zero.
    pub fn adjust_water(&self, delta: f64) {
        let mut s = self.state.lock().unwrap();
        s.water = (s.water + delta).max(0.0);
        s.grounds = measure::grounds_for_water(s.water, s.ratio);
    }

    /// Ratio picker changed. Water is recomputed; grounds hold.
    pub fn set_ratio(&self, ratio: f64) {
        let mut s = self.state.lock().unwrap();
        s.ratio = ratio;
        s.water = measure::water_for_grounds(s.grounds, ratio);
    }

    /// Open the inline timer editor. Refused mid-brew.
    pub fn begin_time_edit(&self) -> Result<(), SessionError> {
        let mut s = self.state.lock().unwrap();
        if s.is_brewing() {
            return Err(SessionError::EditLocked);
        }
        s.editing_time = true;
        Ok(())
    }

    pub fn cancel_time_edit(&self) {
        self.state.lock().unwrap().editing_time = false;
    }

    /// Save an edited stage duration (`mm:ss` or bare seconds) and return
    /// the new total. Applies to this session only; the recipe keeps its
    /// stored default.
    pub fn save_time_edit(&self, input: String) -> Result<u32, SessionError> {
        let mut s = self.state.lock().unwrap();
        if s.is_brewing() {
            return Err(SessionError::EditLocked);
        }
        let interval = duration::parse_lenient(&input).map_err(|_| {
            SessionError::InvalidDuration {
                input: input.clone(),
            }
        })?;
        s.total_seconds = interval.total_seconds();
        s.timer = s.total_seconds;
        s.editing_time = false;
        Ok(s.total_seconds)
    }

    /// Read model for rendering the screen.
    pub fn snapshot(&self) -> SessionSnapshot {
        let s = self.state.lock().unwrap();
        let window = measure::pour_window(s.water, s.recipe.pours, s.current_pour);
        SessionSnapshot {
            recipe_id: s.recipe.id.clone(),
            phase: s.phase,
            grounds: s.grounds,
            water: s.water,
            ratio: s.ratio,
            total_seconds: s.total_seconds,
            timer: s.timer,
            timer_display: duration::format(s.timer),
            current_pour: s.current_pour,
            pours: s.recipe.pours,
            pour_start_g: window.start_g(),
            pour_end_g: window.end_g(),
            is_brewing: s.is_brewing(),
            is_timer_running: s.phase == BrewPhase::Running,
            is_editing_time: s.editing_time,
            action_label: s.phase.action_label().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Grind, PourInterval, TemperatureUnit, WaterTemperature};
    use crate::notify_mock::MockNotifier;

    fn test_recipe(pours: u32, minutes: u32, seconds: u32) -> Recipe {
        Recipe {
            id: RecipeId("test-1".to_string()),
            name: "Test Pour Over".to_string(),
            description: String::new(),
            ratio: 15.0,
            suggested_grounds: 15.0,
            grind: Grind::Medium,
            water_temperature: WaterTemperature {
                value: 212.0,
                unit: TemperatureUnit::Fahrenheit,
            },
            pours,
            time_between_pours: PourInterval { minutes, seconds },
            comments: String::new(),
        }
    }

    fn session_with(recipe: Recipe) -> (Arc<BrewSession>, Arc<MockNotifier>) {
        let notifier = Arc::new(MockNotifier::granted());
        let dispatch = NotificationDispatch::init(notifier.clone());
        (BrewSession::new(recipe, dispatch), notifier)
    }

    #[test]
    fn test_initial_state_from_recipe() {
        let (session, _) = session_with(test_recipe(3, 0, 35));
        let snap = session.snapshot();
        assert_eq!(snap.phase, BrewPhase::Idle);
        assert_eq!(snap.grounds, 15.0);
        assert_eq!(snap.water, 225.0);
        assert_eq!(snap.ratio, 15.0);
        assert_eq!(snap.total_seconds, 35);
        assert_eq!(snap.timer, 35);
        assert_eq!(snap.timer_display, "00:35");
        assert_eq!(snap.current_pour, 1);
        assert_eq!(snap.pour_start_g, 0);
        assert_eq!(snap.pour_end_g, 75);
        assert!(!snap.is_brewing);
        assert_eq!(snap.action_label, "Start");
    }

    #[test]
    fn test_three_pour_first_stage() {
        let (session, notifier) = session_with(test_recipe(3, 0, 35));

        assert_eq!(session.toggle(), BrewPhase::Running);
        assert_eq!(session.snapshot().action_label, "Pause");

        for expected in (1..35).rev() {
            assert_eq!(session.tick(), TickOutcome::Ticked { remaining: expected });
        }
        assert_eq!(session.tick(), TickOutcome::StageComplete { pour: 1, of: 3 });

        let snap = session.snapshot();
        assert_eq!(snap.phase, BrewPhase::StageComplete);
        assert_eq!(snap.timer, 0);
        assert_eq!(snap.current_pour, 1);
        assert_eq!(snap.action_label, "Continue");
        assert_eq!(notifier.bodies(), ["Pour 1 of 3 complete"]);

        // Continue: next pour starts with a fresh countdown
        assert_eq!(session.toggle(), BrewPhase::Running);
        let snap = session.snapshot();
        assert_eq!(snap.current_pour, 2);
        assert_eq!(snap.timer, 35);
    }

    #[test]
    fn test_single_pour_goes_straight_to_finished() {
        let (session, notifier) = session_with(test_recipe(1, 0, 2));
        session.toggle();

        assert_eq!(session.tick(), TickOutcome::Ticked { remaining: 1 });
        assert_eq!(session.tick(), TickOutcome::Finished);

        let snap = session.snapshot();
        assert_eq!(snap.phase, BrewPhase::Finished);
        assert_eq!(snap.action_label, "Finish");
        assert_eq!(notifier.bodies(), ["Brewing Complete"]);

        // Finish resets to idle defaults
        assert_eq!(session.toggle(), BrewPhase::Idle);
        let snap = session.snapshot();
        assert_eq!(snap.timer, 2);
        assert_eq!(snap.current_pour, 1);
        assert!(!snap.is_brewing);
    }

    #[test]
    fn test_full_brew_dispatches_one_notification_per_stage() {
        let (session, notifier) = session_with(test_recipe(3, 0, 1));
        session.toggle();
        session.tick(); // pour 1 done
        session.toggle();
        session.tick(); // pour 2 done
        session.toggle();
        session.tick(); // pour 3 done, brew finished

        assert_eq!(
            notifier.bodies(),
            [
                "Pour 1 of 3 complete",
                "Pour 2 of 3 complete",
                "Brewing Complete"
            ]
        );
        assert_eq!(session.snapshot().phase, BrewPhase::Finished);
    }

    #[test]
    fn test_pause_retains_remaining_time() {
        let (session, _) = session_with(test_recipe(3, 0, 35));
        session.toggle();
        session.tick();
        session.tick();

        assert_eq!(session.toggle(), BrewPhase::Paused);
        let snap = session.snapshot();
        assert_eq!(snap.timer, 33);
        assert_eq!(snap.action_label, "Resume");
        assert!(snap.is_brewing);
        assert!(!snap.is_timer_running);

        // ticks while paused are ignored
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert_eq!(session.snapshot().timer, 33);

        assert_eq!(session.toggle(), BrewPhase::Running);
        assert_eq!(session.tick(), TickOutcome::Ticked { remaining: 32 });
    }

    #[test]
    fn test_timer_invariant_holds_throughout() {
        let (session, _) = session_with(test_recipe(2, 0, 5));
        session.toggle();
        let mut previous = session.snapshot().timer;
        loop {
            let outcome = session.tick();
            let snap = session.snapshot();
            assert!(snap.timer <= snap.total_seconds);
            if let TickOutcome::Ticked { remaining } = outcome {
                assert_eq!(remaining, previous - 1);
                previous = remaining;
            } else {
                break;
            }
        }
        assert_eq!(session.snapshot().timer, 0);
    }

    #[test]
    fn test_reset_restores_recipe_defaults() {
        let (session, _) = session_with(test_recipe(3, 0, 35));
        session.toggle();
        session.tick();
        session.set_ratio(18.0);
        session.reset();

        let snap = session.snapshot();
        assert_eq!(snap.phase, BrewPhase::Idle);
        assert_eq!(snap.timer, 35);
        assert_eq!(snap.ratio, 15.0);
        assert_eq!(snap.water, 225.0);
        assert_eq!(snap.current_pour, 1);
    }

    #[test]
    fn test_select_recipe_discards_brew_in_progress() {
        let (session, _) = session_with(test_recipe(3, 0, 35));
        session.toggle();
        session.tick();

        let mut other = test_recipe(1, 10, 0);
        other.id = RecipeId("test-2".to_string());
        other.suggested_grounds = 60.0;
        other.ratio = 16.0;
        session.select_recipe(other);

        let snap = session.snapshot();
        assert_eq!(snap.recipe_id, RecipeId("test-2".to_string()));
        assert_eq!(snap.phase, BrewPhase::Idle);
        assert_eq!(snap.timer, 600);
        assert_eq!(snap.grounds, 60.0);
        assert_eq!(snap.water, 960.0);
    }

    #[test]
    fn test_linked_mass_edits() {
        let (session, _) = session_with(test_recipe(3, 0, 35));

        session.set_grounds("20".to_string()).unwrap();
        let snap = session.snapshot();
        assert_eq!(snap.grounds, 20.0);
        assert_eq!(snap.water, 300.0);

        session.set_water("310".to_string()).unwrap();
        let snap = session.snapshot();
        assert_eq!(snap.water, 310.0);
        assert_eq!(snap.grounds, 20.7);

        session.set_ratio(16.0);
        let snap = session.snapshot();
        assert_eq!(snap.grounds, 20.7); // grounds hold on ratio change
        assert_eq!(snap.water, 331.0);
    }

    #[test]
    fn test_entry_validation() {
        let (session, _) = session_with(test_recipe(3, 0, 35));

        // empty input is transient, nothing recomputed
        session.set_grounds(String::new()).unwrap();
        assert_eq!(session.snapshot().grounds, 15.0);

        assert_eq!(
            session.set_grounds("-3".to_string()),
            Err(EntryError::Negative)
        );
        assert!(session.set_water("abc".to_string()).is_err());
        let snap = session.snapshot();
        assert_eq!(snap.grounds, 15.0);
        assert_eq!(snap.water, 225.0);
    }

    #[test]
    fn test_steppers_clamp_at_zero() {
        let (session, _) = session_with(test_recipe(3, 0, 35));
        session.set_grounds("0".to_string()).unwrap();
        session.adjust_grounds(-1.0);
        let snap = session.snapshot();
        assert_eq!(snap.grounds, 0.0);
        assert_eq!(snap.water, 0.0);

        session.adjust_grounds(1.0);
        assert_eq!(session.snapshot().water, 15.0);
    }

    #[test]
    fn test_time_edit_only_while_idle() {
        let (session, _) = session_with(test_recipe(3, 0, 35));

        session.begin_time_edit().unwrap();
        assert!(session.snapshot().is_editing_time);
        assert_eq!(session.save_time_edit("1:15".to_string()), Ok(75));
        let snap = session.snapshot();
        assert_eq!(snap.total_seconds, 75);
        assert_eq!(snap.timer, 75);
        assert!(!snap.is_editing_time);

        // bare seconds accepted too
        assert_eq!(session.save_time_edit("90".to_string()), Ok(90));

        assert_eq!(
            session.save_time_edit("1:75".to_string()),
            Err(SessionError::InvalidDuration {
                input: "1:75".to_string()
            })
        );

        session.toggle();
        assert_eq!(session.begin_time_edit(), Err(SessionError::EditLocked));
        assert_eq!(
            session.save_time_edit("2:00".to_string()),
            Err(SessionError::EditLocked)
        );
    }

    #[test]
    fn test_pour_window_follows_current_pour() {
        let (session, _) = session_with(test_recipe(3, 0, 1));
        session.toggle();
        session.tick();
        session.toggle(); // pour 2

        let snap = session.snapshot();
        assert_eq!(snap.pour_start_g, 75);
        assert_eq!(snap.pour_end_g, 150);
    }

    #[test]
    fn test_zero_duration_stage_completes_on_first_tick() {
        let (session, notifier) = session_with(test_recipe(1, 0, 0));
        session.toggle();
        assert_eq!(session.tick(), TickOutcome::Finished);
        assert_eq!(notifier.bodies(), ["Brewing Complete"]);
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(BrewPhase::Idle.action_label(), "Start");
        assert_eq!(BrewPhase::Running.action_label(), "Pause");
        assert_eq!(BrewPhase::Paused.action_label(), "Resume");
        assert_eq!(BrewPhase::StageComplete.action_label(), "Continue");
        assert_eq!(BrewPhase::Finished.action_label(), "Finish");
    }
}
