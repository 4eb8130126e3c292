//! Per-card state: info, suspension, due status, ease factors.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{Operation, args, pretty, require_all};
use crate::backend::Backend;
use crate::error::join_ids;
use crate::{Error, Result};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CardsArgs {
    /// Card ids
    #[serde(deserialize_with = "args::numbers")]
    pub cards: Vec<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Suspension {
    card_id: i64,
    /// `None` when Anki does not know the card.
    suspended: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DueStatus {
    card_id: i64,
    due: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EaseFactor {
    card_id: i64,
    ease_factor: i64,
}

/// Pairs each card id with Anki's answer for it, refusing short or long replies.
fn per_card<T>(
    cards: &[i64],
    results: Vec<T>,
    action: &'static str,
) -> Result<impl Iterator<Item = (i64, T)>> {
    if results.len() != cards.len() {
        return Err(Error::ResultCount {
            action,
            expected: cards.len(),
            got: results.len(),
        });
    }
    Ok(cards.iter().copied().zip(results))
}

pub struct GetCardsInfo;

#[async_trait]
impl Operation for GetCardsInfo {
    type Args = CardsArgs;

    const NAME: &'static str = "get_cards_info";
    const DESCRIPTION: &'static str =
        "Get detailed information about cards including deck, note type, fields, interval, \
         ease factor, reps and lapses.";
    const READ_ONLY: bool = true;

    async fn execute(&self, backend: &dyn Backend, args: CardsArgs) -> Result<String> {
        debug!(count = args.cards.len(), "Getting cards info");
        let infos = backend.cards_info(&args.cards).await?;
        pretty(&infos)
    }
}

pub struct SuspendCards;

#[async_trait]
impl Operation for SuspendCards {
    type Args = CardsArgs;

    const NAME: &'static str = "suspend_cards";
    const DESCRIPTION: &'static str = "Suspend cards to prevent them from appearing in reviews.";

    async fn execute(&self, backend: &dyn Backend, args: CardsArgs) -> Result<String> {
        debug!(count = args.cards.len(), "Suspending cards");
        if !backend.suspend(&args.cards).await? {
            return Ok(format!(
                "No cards suspended, all {} were already suspended",
                args.cards.len()
            ));
        }
        info!(count = args.cards.len(), "Cards suspended");
        Ok(format!("Suspended {} cards", args.cards.len()))
    }
}

pub struct UnsuspendCards;

#[async_trait]
impl Operation for UnsuspendCards {
    type Args = CardsArgs;

    const NAME: &'static str = "unsuspend_cards";
    const DESCRIPTION: &'static str = "Unsuspend cards so they appear in reviews again.";

    async fn execute(&self, backend: &dyn Backend, args: CardsArgs) -> Result<String> {
        debug!(count = args.cards.len(), "Unsuspending cards");
        if !backend.unsuspend(&args.cards).await? {
            return Ok(format!(
                "No cards unsuspended, none of the {} were suspended",
                args.cards.len()
            ));
        }
        info!(count = args.cards.len(), "Cards unsuspended");
        Ok(format!("Unsuspended {} cards", args.cards.len()))
    }
}

pub struct CheckSuspendedStatus;

#[async_trait]
impl Operation for CheckSuspendedStatus {
    type Args = CardsArgs;

    const NAME: &'static str = "check_suspended_status";
    const DESCRIPTION: &'static str =
        "Check whether cards are suspended. Unknown cards report null.";
    const READ_ONLY: bool = true;

    async fn execute(&self, backend: &dyn Backend, args: CardsArgs) -> Result<String> {
        let flags = backend.are_suspended(&args.cards).await?;
        let status: Vec<Suspension> = per_card(&args.cards, flags, "areSuspended")?
            .map(|(card_id, suspended)| Suspension { card_id, suspended })
            .collect();
        pretty(&status)
    }
}

pub struct CheckDueStatus;

#[async_trait]
impl Operation for CheckDueStatus {
    type Args = CardsArgs;

    const NAME: &'static str = "check_due_status";
    const DESCRIPTION: &'static str = "Check whether cards are due for review.";
    const READ_ONLY: bool = true;

    async fn execute(&self, backend: &dyn Backend, args: CardsArgs) -> Result<String> {
        let flags = backend.are_due(&args.cards).await?;
        let status: Vec<DueStatus> = per_card(&args.cards, flags, "areDue")?
            .map(|(card_id, due)| DueStatus { card_id, due })
            .collect();
        pretty(&status)
    }
}

pub struct ForgetCards;

#[async_trait]
impl Operation for ForgetCards {
    type Args = CardsArgs;

    const NAME: &'static str = "forget_cards";
    const DESCRIPTION: &'static str =
        "Reset cards to new, discarding their review progress. This cannot be undone.";
    const DESTRUCTIVE: bool = true;

    async fn execute(&self, backend: &dyn Backend, args: CardsArgs) -> Result<String> {
        debug!(count = args.cards.len(), "Forgetting cards");
        backend.forget(&args.cards).await?;
        info!(count = args.cards.len(), "Cards reset to new");
        Ok(format!("Reset {} cards to new", args.cards.len()))
    }
}

pub struct GetEaseFactors;

#[async_trait]
impl Operation for GetEaseFactors {
    type Args = CardsArgs;

    const NAME: &'static str = "get_ease_factors";
    const DESCRIPTION: &'static str = "Get the ease factor of cards as integers (2500 = 250%).";
    const READ_ONLY: bool = true;

    async fn execute(&self, backend: &dyn Backend, args: CardsArgs) -> Result<String> {
        let factors = backend.ease_factors(&args.cards).await?;
        let eases: Vec<EaseFactor> = per_card(&args.cards, factors, "getEaseFactors")?
            .map(|(card_id, ease_factor)| EaseFactor { card_id, ease_factor })
            .collect();
        pretty(&eases)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetEaseFactorsArgs {
    /// Card ids
    #[serde(deserialize_with = "args::numbers")]
    pub cards: Vec<i64>,
    /// New ease factor for each card, as integers (2500 = 250%)
    #[serde(deserialize_with = "args::numbers")]
    pub ease_factors: Vec<i64>,
}

pub struct SetEaseFactors;

#[async_trait]
impl Operation for SetEaseFactors {
    type Args = SetEaseFactorsArgs;

    const NAME: &'static str = "set_ease_factors";
    const DESCRIPTION: &'static str =
        "Set the ease factor of cards. easeFactors pairs with cards by position.";

    fn validate(&self, args: &SetEaseFactorsArgs) -> Result<()> {
        if args.cards.is_empty() {
            return Err(Error::Validation("cards must not be empty".to_string()));
        }
        if args.cards.len() != args.ease_factors.len() {
            return Err(Error::Validation(format!(
                "cards and easeFactors must have the same length, got {} and {}",
                args.cards.len(),
                args.ease_factors.len()
            )));
        }
        Ok(())
    }

    async fn execute(&self, backend: &dyn Backend, args: SetEaseFactorsArgs) -> Result<String> {
        debug!(count = args.cards.len(), "Setting ease factors");
        let results = backend
            .set_ease_factors(&args.cards, &args.ease_factors)
            .await?;
        require_all(&args.cards, &results, "set ease factors for")?;

        info!(count = args.cards.len(), "Ease factors set");
        Ok(format!("Set ease factors for cards {}", join_ids(&args.cards)))
    }
}
