use super::geometry::Point;
use super::spin::{SpinError, SpinResult, calculate_spin};
use super::view::{self, WheelSegment};
use super::{MAX_OPTION_CHARS, MAX_WHEEL_MEMBERS, MIN_SPIN_MEMBERS};
use crate::config::SpinConfig;
use crate::events::{SpinObserver, WheelEvent};
use crate::sys::storage::{MemoryRepository, OptionRepository, StorageError, WheelSnapshot};
use derive_more::{AsRef, Deref, Display, From, Into};
use palette::Srgb;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use strum::{Display as StrumDisplay, EnumIter};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    From,
    Into,
)]
#[serde(transparent)]
pub struct OptionId(u64);

/// Trimmed, 1..=50 characters. Only constructed through [`OptionText::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, AsRef)]
#[serde(transparent)]
pub struct OptionText(String);

impl OptionText {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let text = raw.trim();
        let len = text.chars().count();
        if len == 0 {
            return Err(ValidationError::EmptyText);
        }
        if len > MAX_OPTION_CHARS {
            return Err(ValidationError::TooLong(len));
        }
        Ok(Self(text.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WheelOption {
    pub id: OptionId,
    pub text: OptionText,
}

impl WheelOption {
    pub fn new(id: OptionId, text: OptionText) -> Self {
        Self { id, text }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Option text cannot be empty")]
    EmptyText,
    #[error("Option text is {0} characters, the limit is {max}", max = MAX_OPTION_CHARS)]
    TooLong(usize),
    #[error("No option ids left")]
    IdsExhausted,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WheelError {
    #[error("The wheel already holds {max} options", max = MAX_WHEEL_MEMBERS)]
    WheelFull,
    #[error("The wheel needs at least {min} options", min = MIN_SPIN_MEMBERS)]
    MinimumMembersRequired,
    #[error("The wheel cannot change while it is spinning")]
    SpinInProgress,
    #[error("No saved option with id {0}")]
    UnknownOption(OptionId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpinState {
    Idle,
    /// The winner is resolved when the spin starts. Wheel members stay put
    /// until the winner is dismissed.
    Spinning {
        result: SpinResult,
        winner: WheelOption,
    },
    WinnerShown(WheelOption),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum SpinPhase {
    Idle,
    Spinning,
    WinnerShown,
}

impl SpinState {
    pub fn phase(&self) -> SpinPhase {
        match self {
            Self::Idle => SpinPhase::Idle,
            Self::Spinning { .. } => SpinPhase::Spinning,
            Self::WinnerShown(_) => SpinPhase::WinnerShown,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

pub type SharedWheel = Arc<Mutex<WheelStore>>;

pub struct WheelStore {
    options: Vec<WheelOption>,
    wheel: Vec<OptionId>,
    next_id: u64,
    state: SpinState,
    config: SpinConfig,
    rng: Box<dyn RngCore + Send>,
    repository: Box<dyn OptionRepository + Send>,
    observers: Vec<Box<dyn SpinObserver + Send>>,
}

impl WheelStore {
    /// Hydrates from `repository`. Any spin that was in flight when the last
    /// session ended is gone; the store always starts idle.
    pub fn load<R>(repository: R, config: SpinConfig) -> Result<Self, StorageError>
    where
        R: OptionRepository + Send + 'static,
    {
        let snapshot = repository.load()?;
        let mut store = Self {
            options: Vec::new(),
            wheel: Vec::new(),
            next_id: 1,
            state: SpinState::Idle,
            config,
            rng: Box::new(StdRng::from_entropy()),
            repository: Box::new(repository),
            observers: Vec::new(),
        };
        store.hydrate(snapshot);
        Ok(store)
    }

    pub fn in_memory(config: SpinConfig) -> Self {
        let mut store = Self {
            options: Vec::new(),
            wheel: Vec::new(),
            next_id: 1,
            state: SpinState::Idle,
            config,
            rng: Box::new(StdRng::from_entropy()),
            repository: Box::new(MemoryRepository::default()),
            observers: Vec::new(),
        };
        store.hydrate(WheelSnapshot::default());
        store
    }

    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_observer(mut self, observer: impl SpinObserver + Send + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn into_shared(self) -> SharedWheel {
        Arc::new(Mutex::new(self))
    }

    fn hydrate(&mut self, snapshot: WheelSnapshot) {
        let mut seen = HashSet::new();
        self.options = snapshot
            .options
            .into_iter()
            .filter_map(|opt| match OptionText::parse(&opt.text) {
                Ok(_) if u64::from(opt.id) == u64::MAX => {
                    log::warn!("Dropping stored option {}: id out of range", opt.id);
                    None
                }
                Ok(text) if seen.insert(opt.id) => Some(WheelOption::new(opt.id, text)),
                Ok(_) => {
                    log::warn!("Dropping duplicate option id {}", opt.id);
                    None
                }
                Err(e) => {
                    log::warn!("Dropping stored option {}: {}", opt.id, e);
                    None
                }
            })
            .collect();

        let mut on_wheel = HashSet::new();
        self.wheel = snapshot
            .wheel
            .into_iter()
            .filter(|id| seen.contains(id) && on_wheel.insert(*id))
            .take(MAX_WHEEL_MEMBERS)
            .collect();

        self.next_id = self
            .options
            .iter()
            .filter_map(|o| u64::from(o.id).checked_add(1))
            .max()
            .unwrap_or(1);
        self.state = SpinState::Idle;

        log::debug!(
            "Loaded {} options, {} on the wheel",
            self.options.len(),
            self.wheel.len()
        );
    }

    pub fn snapshot(&self) -> WheelSnapshot {
        WheelSnapshot {
            options: self.options.clone(),
            wheel: self.wheel.clone(),
        }
    }

    fn persist(&mut self) {
        let snapshot = self.snapshot();
        if let Err(e) = self.repository.save(&snapshot) {
            log::error!("Failed to save wheel options: {}", e);
        }
    }

    fn emit(&self, event: WheelEvent) {
        self.observers.iter().for_each(|o| o.notify(&event));
    }

    pub fn options(&self) -> &[WheelOption] {
        &self.options
    }

    pub fn option(&self, id: OptionId) -> Option<&WheelOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn wheel_ids(&self) -> &[OptionId] {
        &self.wheel
    }

    /// Wheel members in segment order.
    pub fn wheel_options(&self) -> Vec<&WheelOption> {
        self.wheel.iter().filter_map(|&id| self.option(id)).collect()
    }

    pub fn is_on_wheel(&self, id: OptionId) -> bool {
        self.wheel.contains(&id)
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn winner(&self) -> Option<&WheelOption> {
        match &self.state {
            SpinState::WinnerShown(winner) => Some(winner),
            _ => None,
        }
    }

    pub fn can_spin(&self) -> bool {
        self.state.is_idle() && self.wheel.len() >= MIN_SPIN_MEMBERS
    }

    pub fn create_option(&mut self, text: &str) -> Result<WheelOption, ValidationError> {
        let text = OptionText::parse(text)?;
        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or(ValidationError::IdsExhausted)?;
        let option = WheelOption::new(OptionId(self.next_id), text);
        self.next_id = next_id;

        log::debug!("Created option {} ({})", option.id, option.text);
        self.options.push(option.clone());
        self.persist();
        Ok(option)
    }

    /// Removes a saved option and, with it, its place on the wheel.
    /// Wheel members are kept while a spin or its winner is showing.
    pub fn delete_option(&mut self, id: OptionId) {
        if !self.state.is_idle() && self.is_on_wheel(id) {
            log::warn!("Not deleting {} while {}", id, self.state.phase());
            return;
        }
        let before = self.options.len();
        self.options.retain(|o| o.id != id);
        if self.options.len() == before {
            return;
        }
        self.wheel.retain(|&w| w != id);

        log::debug!("Deleted option {}", id);
        self.persist();
    }

    pub fn add_to_wheel(&mut self, id: OptionId) -> Result<(), WheelError> {
        if self.is_on_wheel(id) {
            return Ok(());
        }
        if !self.state.is_idle() {
            return Err(WheelError::SpinInProgress);
        }
        if self.option(id).is_none() {
            return Err(WheelError::UnknownOption(id));
        }
        if self.wheel.len() >= MAX_WHEEL_MEMBERS {
            return Err(WheelError::WheelFull);
        }

        self.wheel.push(id);
        log::debug!("Added {} to the wheel ({} members)", id, self.wheel.len());
        self.persist();
        Ok(())
    }

    pub fn remove_from_wheel(&mut self, id: OptionId) -> Result<(), WheelError> {
        if self.wheel.len() == MIN_SPIN_MEMBERS {
            return Err(WheelError::MinimumMembersRequired);
        }
        if !self.state.is_idle() {
            return Err(WheelError::SpinInProgress);
        }
        if !self.is_on_wheel(id) {
            return Ok(());
        }

        self.wheel.retain(|&w| w != id);
        log::debug!("Removed {} from the wheel ({} members)", id, self.wheel.len());
        self.persist();
        Ok(())
    }

    /// Tapping a saved option puts it on the wheel.
    pub fn tap_option(&mut self, id: OptionId) -> Result<(), WheelError> {
        self.add_to_wheel(id)
    }

    /// Tapping a segment takes it off the wheel.
    pub fn tap_segment(&mut self, id: OptionId) -> Result<(), WheelError> {
        self.remove_from_wheel(id)
    }

    /// Empties the wheel in one go, hiding it.
    pub fn clear_wheel(&mut self) -> Result<(), WheelError> {
        if !self.state.is_idle() {
            return Err(WheelError::SpinInProgress);
        }
        if self.wheel.is_empty() {
            return Ok(());
        }
        self.wheel.clear();
        self.persist();
        Ok(())
    }

    pub fn start_spin(&mut self) -> Result<SpinResult, SpinError> {
        if self.wheel.len() < MIN_SPIN_MEMBERS {
            return Err(SpinError::InsufficientOptions);
        }
        if !self.state.is_idle() {
            return Err(SpinError::AlreadySpinning);
        }

        let members: Vec<WheelOption> = self.wheel_options().into_iter().cloned().collect();
        let result = calculate_spin(&self.config, members.len(), &mut self.rng)?;
        let winner = members
            .get(result.winner_index)
            .cloned()
            .ok_or(SpinError::NoWinner(result.winner_index))?;

        log::info!(
            "Spinning {} options: {} turns over {} ms",
            members.len(),
            result.rotations,
            result.duration_ms
        );
        self.state = SpinState::Spinning { result, winner };
        self.emit(WheelEvent::SpinStarted(result));
        Ok(result)
    }

    /// Called once the presentation layer has finished animating.
    pub fn complete_spin(&mut self, winner_index: usize) -> Result<WheelOption, SpinError> {
        let winner = match &self.state {
            SpinState::Spinning { result, winner } if result.winner_index == winner_index => {
                winner.clone()
            }
            SpinState::Spinning { .. } => return Err(SpinError::NoWinner(winner_index)),
            _ => return Err(SpinError::NotSpinning),
        };

        log::info!("Winner: {}", winner.text);
        self.emit(WheelEvent::WinnerShown(winner.clone()));
        self.state = SpinState::WinnerShown(winner.clone());
        Ok(winner)
    }

    pub fn dismiss_winner(&mut self) {
        if !matches!(self.state, SpinState::WinnerShown(_)) {
            log::debug!("Nothing to dismiss while {}", self.state.phase());
            return;
        }
        self.state = SpinState::Idle;
        self.emit(WheelEvent::WinnerDismissed);
    }

    /// Render data for the current wheel; empty until there is something to spin.
    pub fn segments(&self, center: Point, radius: f64, palette: &[Srgb<u8>]) -> Vec<WheelSegment> {
        let members = self.wheel_options();
        if members.len() < MIN_SPIN_MEMBERS {
            return Vec::new();
        }
        view::layout(&members, center, radius, palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::geometry::segment_span;
    use crate::wheel::theme::DEFAULT_PALETTE;

    fn store() -> WheelStore {
        WheelStore::in_memory(SpinConfig::default()).with_rng(StdRng::seed_from_u64(42))
    }

    fn store_with(texts: &[&str]) -> (WheelStore, Vec<OptionId>) {
        let mut store = store();
        let ids = texts
            .iter()
            .map(|t| store.create_option(t).unwrap().id)
            .collect();
        (store, ids)
    }

    #[test]
    fn test_create_option_validation() {
        let mut store = store();
        assert_eq!(store.create_option(""), Err(ValidationError::EmptyText));
        assert_eq!(store.create_option("   "), Err(ValidationError::EmptyText));
        assert_eq!(
            store.create_option(&"x".repeat(51)),
            Err(ValidationError::TooLong(51))
        );
        assert!(store.options().is_empty());

        let pizza = store.create_option("  Pizza  ").unwrap();
        assert_eq!(pizza.text.as_str(), "Pizza");
        assert!(store.create_option(&"x".repeat(50)).is_ok());
        // characters, not bytes
        assert!(store.create_option(&"é".repeat(50)).is_ok());
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let (mut store, ids) = store_with(&["A", "B", "C"]);
        store.delete_option(ids[2]);
        let d = store.create_option("D").unwrap();
        assert!(!ids.contains(&d.id));
        let texts: Vec<&str> = store.options().iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B", "D"]);
    }

    #[test]
    fn test_cascade_delete() {
        let (mut store, ids) = store_with(&["A", "B", "C"]);
        store.add_to_wheel(ids[0]).unwrap();
        store.add_to_wheel(ids[1]).unwrap();

        store.delete_option(ids[0]);

        let saved: Vec<&str> = store.options().iter().map(|o| o.text.as_str()).collect();
        assert_eq!(saved, vec!["B", "C"]);
        assert_eq!(store.wheel_ids(), &[ids[1]]);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let (mut store, _) = store_with(&["A"]);
        store.delete_option(OptionId::from(999));
        assert_eq!(store.options().len(), 1);
    }

    #[test]
    fn test_add_to_wheel_rules() {
        let texts: Vec<String> = (0..13).map(|i| format!("Option {i}")).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let (mut store, ids) = store_with(&refs);

        for &id in &ids[..12] {
            store.add_to_wheel(id).unwrap();
        }
        // already present: fine even when full
        assert_eq!(store.add_to_wheel(ids[3]), Ok(()));
        assert_eq!(store.add_to_wheel(ids[12]), Err(WheelError::WheelFull));
        assert_eq!(store.wheel_ids().len(), 12);

        assert_eq!(
            store.add_to_wheel(OptionId::from(500)),
            Err(WheelError::UnknownOption(OptionId::from(500)))
        );
    }

    #[test]
    fn test_add_is_idempotent() {
        let (mut store, ids) = store_with(&["A", "B"]);
        store.tap_option(ids[0]).unwrap();
        store.tap_option(ids[0]).unwrap();
        assert_eq!(store.wheel_ids(), &[ids[0]]);
    }

    #[test]
    fn test_two_member_wheel_cannot_shrink() {
        let (mut store, ids) = store_with(&["A", "B", "C"]);
        store.add_to_wheel(ids[0]).unwrap();
        store.add_to_wheel(ids[1]).unwrap();

        assert_eq!(
            store.remove_from_wheel(ids[0]),
            Err(WheelError::MinimumMembersRequired)
        );
        assert_eq!(
            store.tap_segment(ids[2]),
            Err(WheelError::MinimumMembersRequired)
        );

        store.add_to_wheel(ids[2]).unwrap();
        store.tap_segment(ids[0]).unwrap();
        assert_eq!(store.wheel_ids(), &[ids[1], ids[2]]);
    }

    #[test]
    fn test_membership_locked_while_spinning() {
        let (mut store, ids) = store_with(&["A", "B", "C", "D"]);
        for &id in &ids[..3] {
            store.add_to_wheel(id).unwrap();
        }
        store.start_spin().unwrap();

        assert_eq!(store.add_to_wheel(ids[3]), Err(WheelError::SpinInProgress));
        assert_eq!(store.remove_from_wheel(ids[0]), Err(WheelError::SpinInProgress));
        assert_eq!(store.clear_wheel(), Err(WheelError::SpinInProgress));
        assert_eq!(store.start_spin(), Err(SpinError::AlreadySpinning));
        assert_eq!(store.wheel_ids().len(), 3);
    }

    #[test]
    fn test_spin_needs_two_members() {
        let (mut store, ids) = store_with(&["A", "B"]);
        assert_eq!(store.start_spin(), Err(SpinError::InsufficientOptions));
        store.add_to_wheel(ids[0]).unwrap();
        assert!(!store.can_spin());
        assert_eq!(store.start_spin(), Err(SpinError::InsufficientOptions));
        assert!(store.state().is_idle());
    }

    #[test]
    fn test_complete_and_dismiss_guards() {
        let (mut store, ids) = store_with(&["A", "B"]);
        assert_eq!(store.complete_spin(0), Err(SpinError::NotSpinning));

        store.add_to_wheel(ids[0]).unwrap();
        store.add_to_wheel(ids[1]).unwrap();
        let result = store.start_spin().unwrap();

        let wrong = (result.winner_index + 1) % 2;
        assert_eq!(store.complete_spin(wrong), Err(SpinError::NoWinner(wrong)));
        assert_eq!(store.state().phase(), SpinPhase::Spinning);

        // dismissing mid-spin does nothing
        store.dismiss_winner();
        assert_eq!(store.state().phase(), SpinPhase::Spinning);

        store.complete_spin(result.winner_index).unwrap();
        assert_eq!(store.complete_spin(result.winner_index), Err(SpinError::NotSpinning));
        store.dismiss_winner();
        assert!(store.state().is_idle());
    }

    #[test]
    fn test_wheel_members_survive_delete_while_spinning() {
        let (mut store, ids) = store_with(&["A", "B", "Spare"]);
        store.add_to_wheel(ids[0]).unwrap();
        store.add_to_wheel(ids[1]).unwrap();
        let result = store.start_spin().unwrap();

        store.delete_option(ids[0]);
        store.delete_option(ids[1]);
        assert_eq!(store.wheel_ids(), &ids[..2]);
        assert_eq!(store.options().len(), 3);

        // options off the wheel can still go
        store.delete_option(ids[2]);
        assert_eq!(store.options().len(), 2);

        let winner = store.complete_spin(result.winner_index).unwrap();
        assert_eq!(store.option(winner.id), Some(&winner));
        assert_eq!(winner.id, ids[result.winner_index]);

        // still locked while the winner is showing
        store.delete_option(winner.id);
        assert_eq!(store.option(winner.id), Some(&winner));

        store.dismiss_winner();
        store.delete_option(winner.id);
        assert_eq!(store.option(winner.id), None);
        assert_eq!(store.wheel_ids().len(), 1);
    }

    #[test]
    fn test_id_space_exhaustion() {
        let raw = serde_json::json!({
            "options": [
                { "id": u64::MAX, "text": "Overflow" },
                { "id": u64::MAX - 1, "text": "Last" }
            ],
            "wheel": [u64::MAX, u64::MAX - 1]
        });
        let snapshot: WheelSnapshot = serde_json::from_value(raw).unwrap();
        let mut store =
            WheelStore::load(MemoryRepository::new(snapshot), SpinConfig::default()).unwrap();

        let texts: Vec<&str> = store.options().iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, vec!["Last"]);
        assert_eq!(store.wheel_ids(), &[OptionId::from(u64::MAX - 1)]);

        assert_eq!(store.create_option("More"), Err(ValidationError::IdsExhausted));
        assert_eq!(store.options().len(), 1);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut store = store();
        assert!(store.options().is_empty());

        let ids: Vec<OptionId> = ["Pizza", "Tacos", "Sushi"]
            .iter()
            .map(|t| store.create_option(t).unwrap().id)
            .collect();
        for &id in &ids {
            store.add_to_wheel(id).unwrap();
        }

        let result = store.start_spin().unwrap();
        assert!(result.winner_index < 3);
        let (start, end) = segment_span(result.winner_index, 3);
        let landed = result.final_angle_deg.rem_euclid(360.0);
        assert!(landed >= start && landed < end);
        assert_eq!(store.state().phase(), SpinPhase::Spinning);

        let winner = store.complete_spin(result.winner_index).unwrap();
        assert_eq!(store.state().phase(), SpinPhase::WinnerShown);
        assert_eq!(
            winner.text.as_str(),
            ["Pizza", "Tacos", "Sushi"][result.winner_index]
        );
        assert_eq!(store.winner(), Some(&winner));

        store.dismiss_winner();
        assert_eq!(store.state(), &SpinState::Idle);
        assert_eq!(store.winner(), None);
        assert_eq!(store.wheel_ids(), ids.as_slice());
    }

    #[test]
    fn test_observers_see_lifecycle() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut store = store().with_observer(move |e: &WheelEvent| sink.lock().push(e.clone()));

        let a = store.create_option("A").unwrap().id;
        let b = store.create_option("B").unwrap().id;
        store.add_to_wheel(a).unwrap();
        store.add_to_wheel(b).unwrap();

        let result = store.start_spin().unwrap();
        let winner = store.complete_spin(result.winner_index).unwrap();
        store.dismiss_winner();

        assert_eq!(
            *seen.lock(),
            vec![
                WheelEvent::SpinStarted(result),
                WheelEvent::WinnerShown(winner),
                WheelEvent::WinnerDismissed,
            ]
        );
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let repo = MemoryRepository::default();
        let mut store = WheelStore::load(repo.clone(), SpinConfig::default()).unwrap();

        let a = store.create_option("A").unwrap().id;
        let b = store.create_option("B").unwrap().id;
        let c = store.create_option("C").unwrap().id;
        assert_eq!(repo.snapshot().options.len(), 3);

        store.add_to_wheel(a).unwrap();
        store.add_to_wheel(b).unwrap();
        store.add_to_wheel(c).unwrap();
        assert_eq!(repo.snapshot().wheel, vec![a, b, c]);

        store.remove_from_wheel(b).unwrap();
        store.delete_option(a);
        assert_eq!(repo.snapshot(), store.snapshot());
        assert_eq!(repo.snapshot().wheel, vec![c]);
    }

    struct FailingRepository;

    impl OptionRepository for FailingRepository {
        fn load(&self) -> Result<WheelSnapshot, StorageError> {
            Ok(WheelSnapshot::default())
        }

        fn save(&mut self, _snapshot: &WheelSnapshot) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn test_save_failures_do_not_fail_operations() {
        let mut store = WheelStore::load(FailingRepository, SpinConfig::default()).unwrap();

        let a = store.create_option("A").unwrap().id;
        let b = store.create_option("B").unwrap().id;
        let c = store.create_option("C").unwrap().id;
        store.add_to_wheel(a).unwrap();
        store.add_to_wheel(b).unwrap();
        store.add_to_wheel(c).unwrap();
        store.remove_from_wheel(c).unwrap();
        store.delete_option(a);

        assert_eq!(store.options().len(), 2);
        assert_eq!(store.wheel_ids(), &[b]);
        store.clear_wheel().unwrap();
        assert!(store.wheel_ids().is_empty());
    }

    #[test]
    fn test_hydrate_cleans_stored_data() {
        let raw = serde_json::json!({
            "options": [
                { "id": 3, "text": "  Curry " },
                { "id": 3, "text": "Duplicate" },
                { "id": 4, "text": "" },
                { "id": 9, "text": "Ramen" }
            ],
            "wheel": [9, 4, 12, 9, 3]
        });
        let snapshot: WheelSnapshot = serde_json::from_value(raw).unwrap();
        let mut store =
            WheelStore::load(MemoryRepository::new(snapshot), SpinConfig::default()).unwrap();

        let texts: Vec<&str> = store.options().iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, vec!["Curry", "Ramen"]);
        assert_eq!(store.wheel_ids(), &[OptionId::from(9), OptionId::from(3)]);
        assert!(store.state().is_idle());
        assert_eq!(store.create_option("New").unwrap().id, OptionId::from(10));
    }

    #[test]
    fn test_clear_wheel() {
        let (mut store, ids) = store_with(&["A", "B"]);
        store.add_to_wheel(ids[0]).unwrap();
        store.add_to_wheel(ids[1]).unwrap();
        store.clear_wheel().unwrap();
        assert!(store.wheel_ids().is_empty());
        assert!(store.segments(Point::default(), 100.0, &DEFAULT_PALETTE).is_empty());
    }

    #[test]
    fn test_shared_wheel_across_threads() {
        let (mut store, ids) = store_with(&["A", "B"]);
        store.add_to_wheel(ids[0]).unwrap();
        store.add_to_wheel(ids[1]).unwrap();
        let shared = store.into_shared();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                std::thread::spawn(move || shared.lock().start_spin().is_ok())
            })
            .collect();
        let started = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&ok| ok)
            .count();

        assert_eq!(started, 1);
        assert_eq!(shared.lock().state().phase(), SpinPhase::Spinning);
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(SpinPhase::WinnerShown.to_string(), "winner-shown");
        assert_eq!(SpinPhase::Idle.to_string(), "idle");
    }
}
