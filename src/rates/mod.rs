//! Local rate overrides, reconciliation with fetched rates, and the edit form

pub mod form;
pub mod store;
pub mod view;

pub use form::RateForm;
pub use store::RateStore;
pub use view::{Change, LoadError, ModalOutcome, RatesView};
