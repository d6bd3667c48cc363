use super::form::RateForm;
use super::store::RateStore;
use crate::core::provider::RateProvider;
use crate::core::rate::Rate;
use crate::core::storage::KeyValueStore;
use anyhow::Result;
use thiserror::Error;
use tracing::{debug, error, warn};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("exchange rates could not be fetched")]
    Unavailable,
    #[error("exchange rate response contained no rates")]
    Empty,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Result of submitting a rate form.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalOutcome {
    /// Code empty or value unset, nothing applied.
    Invalid,
    Added(Rate),
    /// A rate with the same code is already displayed.
    Duplicate(Rate),
    Updated(Rate),
    /// Only a fetched rate matched. The list changed but nothing was saved.
    UpdatedDisplayOnly(Rate),
    /// Edit for a code that is not displayed.
    NotFound(Rate),
}

/// How an edit or delete of a displayed rate reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// No displayed rate had the code.
    Missing,
    /// A local override was written.
    Saved,
    /// Only fetched rates matched. The next rebuild of the list restores them.
    DisplayOnly,
}

/// Merges the fetched snapshot with local overrides into the list shown to the
/// user, and routes edits back into the store.
pub struct RatesView<'a, S: KeyValueStore> {
    store: &'a mut RateStore<S>,
    provider: &'a dyn RateProvider,
    rates: Vec<Rate>,
}

impl<'a, S: KeyValueStore> RatesView<'a, S> {
    pub fn new(store: &'a mut RateStore<S>, provider: &'a dyn RateProvider) -> Self {
        Self {
            store,
            provider,
            rates: Vec::new(),
        }
    }

    /// The display list: API rates first, then local overrides.
    pub fn rates(&self) -> &[Rate] {
        &self.rates
    }

    pub fn find(&self, code: &str) -> Option<&Rate> {
        self.rates.iter().find(|r| r.code == code)
    }

    /// Drops local overrides, fetches a fresh snapshot and rebuilds the list.
    ///
    /// On failure the display list keeps whatever it held before.
    pub async fn load_rates(&mut self) -> Result<usize, LoadError> {
        self.store.reset_local_rates()?;

        let Some(snapshot) = self.provider.fetch_rates().await else {
            error!("Failed to load exchange rates");
            return Err(LoadError::Unavailable);
        };
        if snapshot.is_empty() {
            error!(?snapshot, "Invalid exchange rate data");
            return Err(LoadError::Empty);
        }

        self.store.set_api_rates(&snapshot)?;
        self.update_data_source();
        Ok(self.rates.len())
    }

    /// Rebuilds the display list from the cached snapshot and local overrides.
    /// Returns false, leaving the list alone, when no snapshot is cached.
    pub fn update_data_source(&mut self) -> bool {
        let Some(snapshot) = self.store.api_rates() else {
            debug!("No cached API rates to display");
            return false;
        };

        let mut rates = snapshot.to_rates();
        rates.extend_from_slice(self.store.local_rates());
        debug!(count = rates.len(), "Display list rebuilt");
        self.rates = rates;
        true
    }

    /// Adds `rate` unless its code is already displayed.
    pub fn add_new_rate(&mut self, rate: Rate) -> Result<bool> {
        if self.rates.iter().any(|r| r.code == rate.code) {
            warn!("Rate with code {} already exists", rate.code);
            return Ok(false);
        }
        self.rates.push(rate.clone());
        self.store.add_rate(rate)?;
        Ok(true)
    }

    /// Sets the value of the first displayed rate with the same code.
    ///
    /// Fetched rates are not local overrides, so editing one only changes the list.
    pub fn update_existing_rate(&mut self, rate: &Rate) -> Result<Change> {
        let Some(existing) = self.rates.iter_mut().find(|r| r.code == rate.code) else {
            debug!(code = %rate.code, "No displayed rate to update");
            return Ok(Change::Missing);
        };
        existing.value = rate.value;
        if self.store.update_rate(&rate.code, rate.value)? {
            Ok(Change::Saved)
        } else {
            warn!("Rate {} is not a local rate, the change is not saved", rate.code);
            Ok(Change::DisplayOnly)
        }
    }

    /// Removes every displayed rate with `code` and any local override for it.
    pub fn delete_rate(&mut self, code: &str) -> Result<Change> {
        let before = self.rates.len();
        self.rates.retain(|r| r.code != code);
        let displayed = self.rates.len() != before;

        let change = match (self.store.delete_rate(code)?, displayed) {
            (true, _) => Change::Saved,
            (false, true) => {
                warn!("Rate {} is not a local rate, the deletion is not saved", code);
                Change::DisplayOnly
            }
            (false, false) => Change::Missing,
        };
        Ok(change)
    }

    pub async fn reset_data(&mut self) -> Result<usize, LoadError> {
        self.store.reset_local_rates()?;
        self.load_rates().await
    }

    /// Opens a form for `existing`, or an empty one to create a rate.
    pub fn open_modal(&self, existing: Option<&Rate>) -> RateForm {
        existing.map_or_else(RateForm::create, RateForm::edit)
    }

    /// Applies a submitted form: edit forms update, create forms add.
    pub fn submit_modal(&mut self, form: &RateForm) -> Result<ModalOutcome> {
        let Some(rate) = form.commit() else {
            debug!("Rate form is incomplete");
            return Ok(ModalOutcome::Invalid);
        };

        let outcome = if form.is_edit() {
            match self.update_existing_rate(&rate)? {
                Change::Saved => ModalOutcome::Updated(rate),
                Change::DisplayOnly => ModalOutcome::UpdatedDisplayOnly(rate),
                Change::Missing => ModalOutcome::NotFound(rate),
            }
        } else if self.add_new_rate(rate.clone())? {
            ModalOutcome::Added(rate)
        } else {
            ModalOutcome::Duplicate(rate)
        };
        Ok(outcome)
    }
}
