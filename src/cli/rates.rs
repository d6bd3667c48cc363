use super::ui;
use crate::core::rate::Rate;
use crate::core::storage::KeyValueStore;
use crate::rates::{Change, ModalOutcome, RateStore, RatesView};
use anyhow::Result;

fn display(rates: &[Rate]) {
    if rates.is_empty() {
        println!("{}", ui::style_text("No rates to display.", ui::StyleType::Subtle));
        return;
    }
    println!("{}", ui::style_text("Exchange Rates", ui::StyleType::Title));
    println!("{}", ui::rates_table(rates));
}

const NOT_SAVED: &str = "fetched rates are not saved, it reverts on the next list or load";

fn outcome_message(outcome: &ModalOutcome) -> String {
    match outcome {
        ModalOutcome::Invalid => ui::style_text(
            "Nothing saved: a code and a value are required.",
            ui::StyleType::Subtle,
        ),
        ModalOutcome::Added(rate) => ui::style_text(&format!("Added {rate}"), ui::StyleType::Success),
        ModalOutcome::Updated(rate) => {
            ui::style_text(&format!("Updated {rate}"), ui::StyleType::Success)
        }
        ModalOutcome::UpdatedDisplayOnly(rate) => ui::style_text(
            &format!("{} not updated: {NOT_SAVED}.", rate.code),
            ui::StyleType::Error,
        ),
        ModalOutcome::Duplicate(rate) => ui::style_text(
            &format!("A rate with code {} already exists.", rate.code),
            ui::StyleType::Error,
        ),
        ModalOutcome::NotFound(rate) => ui::style_text(
            &format!("No rate with code {} to update.", rate.code),
            ui::StyleType::Error,
        ),
    }
}

fn delete_message(code: &str, change: Change) -> String {
    match change {
        Change::Saved => ui::style_text(&format!("Deleted {code}"), ui::StyleType::Success),
        Change::DisplayOnly => ui::style_text(
            &format!("{code} not deleted: {NOT_SAVED}."),
            ui::StyleType::Error,
        ),
        Change::Missing => {
            ui::style_text(&format!("No rate with code {code}."), ui::StyleType::Subtle)
        }
    }
}

/// Shows the cached rates merged with local overrides, without fetching.
pub fn list<S: KeyValueStore>(view: &mut RatesView<'_, S>) -> Result<()> {
    if !view.update_data_source() {
        println!(
            "{}",
            ui::style_text(
                "No rates fetched yet. Run `ratebook load` first.",
                ui::StyleType::Subtle
            )
        );
    }
    display(view.rates());
    Ok(())
}

/// Fetches fresh rates, dropping local overrides, and shows them.
pub async fn load<S: KeyValueStore>(view: &mut RatesView<'_, S>) -> Result<()> {
    let spinner = ui::new_spinner("Fetching exchange rates...");
    let result = view.load_rates().await;
    spinner.finish_and_clear();

    result?;
    display(view.rates());
    Ok(())
}

pub async fn reset<S: KeyValueStore>(view: &mut RatesView<'_, S>) -> Result<()> {
    let spinner = ui::new_spinner("Resetting rates...");
    let result = view.reset_data().await;
    spinner.finish_and_clear();

    result?;
    display(view.rates());
    Ok(())
}

pub fn add<S: KeyValueStore>(
    view: &mut RatesView<'_, S>,
    code: Option<String>,
    value: Option<f64>,
) -> Result<()> {
    view.update_data_source();

    let mut form = view.open_modal(None);
    if let Some(code) = code {
        form.set_code(code.trim());
    }
    form.set_value(value);

    let outcome = view.submit_modal(&form)?;
    println!("{}", outcome_message(&outcome));
    Ok(())
}

pub fn edit<S: KeyValueStore>(
    view: &mut RatesView<'_, S>,
    code: &str,
    value: Option<f64>,
) -> Result<()> {
    view.update_data_source();

    let Some(existing) = view.find(code).cloned() else {
        anyhow::bail!("No rate with code {code}");
    };
    let mut form = view.open_modal(Some(&existing));
    if value.is_some() {
        form.set_value(value);
    }

    let outcome = view.submit_modal(&form)?;
    println!("{}", outcome_message(&outcome));
    Ok(())
}

pub fn delete<S: KeyValueStore>(view: &mut RatesView<'_, S>, code: &str) -> Result<()> {
    view.update_data_source();
    let change = view.delete_rate(code)?;
    println!("{}", delete_message(code, change));
    Ok(())
}

/// Wipes local overrides and the cached snapshot.
pub fn purge<S: KeyValueStore>(store: &mut RateStore<S>) -> Result<()> {
    store.purge()?;
    println!(
        "{}",
        ui::style_text("Cleared all stored rates.", ui::StyleType::Success)
    );
    Ok(())
}
