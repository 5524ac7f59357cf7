//! Dare Roller
//!
//! Rolls a six-sided die and maps the roll onto a fixed prompt pool chosen by
//! gender category: `pool[(roll - 1) % pool.len()]`.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use super::error::GameError;
use super::model::{new_id, Dare};
use crate::core::rng::DiceRng;
use crate::store::Store;

/// Prompts for the "male" category.
pub const MALE_DARES: [&str; 6] = [
    "Compliment their outfit within the first 5 minutes",
    "Subtly wink twice during conversation",
    "Mention your favorite childhood movie",
    "Order something adventurous on the menu",
    "Make them laugh with a dad joke",
    "Share an embarrassing story from high school",
];

/// Prompts for every other category.
pub const FEMALE_DARES: [&str; 6] = [
    "Play with your hair while listening to them talk",
    "Compliment something unexpected about them",
    "Laugh at their jokes (even the bad ones)",
    "Share your most controversial food opinion",
    "Ask about their hidden talent",
    "Subtly touch their arm during conversation",
];

/// Pool for a gender category. Only a case-insensitive "male" picks the male pool.
pub fn pool_for(gender: &str) -> &'static [&'static str] {
    if gender.eq_ignore_ascii_case("male") {
        &MALE_DARES
    } else {
        &FEMALE_DARES
    }
}

/// Prompt for a roll. `roll` is 1-based.
pub fn select_dare(pool: &[&'static str], roll: u8) -> &'static str {
    let index = (roll.saturating_sub(1) as usize) % pool.len();
    pool[index]
}

/// Rolls dares and tracks their completion.
pub struct DareRoller {
    store: Arc<dyn Store>,
}

impl DareRoller {
    /// Create the roller over a store.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Roll a dare against an existing proposal.
    #[instrument(skip(self))]
    pub async fn roll(&self, proposal_id: &str, gender: &str) -> Result<Dare, GameError> {
        let mut rng = DiceRng::for_roll(proposal_id);
        self.roll_with(proposal_id, gender, &mut rng).await
    }

    /// Roll using the given generator.
    pub async fn roll_with(
        &self,
        proposal_id: &str,
        gender: &str,
        rng: &mut DiceRng,
    ) -> Result<Dare, GameError> {
        if self.store.proposal(proposal_id).await?.is_none() {
            return Err(GameError::NotFound("Proposal"));
        }

        let roll_number = rng.roll_die();
        let dare = Dare {
            id: new_id(),
            proposal_id: proposal_id.to_string(),
            dare_text: select_dare(pool_for(gender), roll_number).to_string(),
            roll_number,
            completed: false,
            created_at: Utc::now(),
        };

        self.store.insert_dare(dare.clone()).await?;
        info!(dare_id = %dare.id, roll_number, "dare rolled");
        Ok(dare)
    }

    /// Every dare rolled on a proposal.
    pub async fn list(&self, proposal_id: &str) -> Result<Vec<Dare>, GameError> {
        Ok(self.store.dares_for_proposal(proposal_id).await?)
    }

    /// Mark a dare completed. An unknown ID is a no-op, not an error.
    pub async fn complete(&self, dare_id: &str) -> Result<(), GameError> {
        if !self.store.complete_dare(dare_id).await? {
            debug!(dare_id, "complete on unknown dare ignored");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::DIE_FACES;
    use crate::game::testing::{seed_proposal, seed_user, test_store};
    use proptest::prelude::*;

    #[test]
    fn test_pool_selection_is_case_insensitive() {
        assert_eq!(pool_for("male"), &MALE_DARES);
        assert_eq!(pool_for("MALE"), &MALE_DARES);
        assert_eq!(pool_for("Male"), &MALE_DARES);
        assert_eq!(pool_for("female"), &FEMALE_DARES);
        assert_eq!(pool_for("nonbinary"), &FEMALE_DARES);
        assert_eq!(pool_for(""), &FEMALE_DARES);
    }

    #[test]
    fn test_roll_maps_to_index() {
        assert_eq!(select_dare(&MALE_DARES, 1), MALE_DARES[0]);
        assert_eq!(select_dare(&MALE_DARES, 6), MALE_DARES[5]);

        let short = ["a", "b", "c", "d"];
        assert_eq!(select_dare(&short, 5), "a");
        assert_eq!(select_dare(&short, 6), "b");
    }

    proptest! {
        #[test]
        fn dare_text_is_determined_by_roll(roll in 1..=DIE_FACES, len in 1usize..10) {
            let pool: Vec<&'static str> =
                MALE_DARES.iter().chain(FEMALE_DARES.iter()).copied().take(len).collect();
            let expected = pool[(roll as usize - 1) % len];
            prop_assert_eq!(select_dare(&pool, roll), expected);
            prop_assert_eq!(select_dare(&pool, roll), select_dare(&pool, roll));
        }
    }

    #[tokio::test]
    async fn test_roll_requires_proposal() {
        let store = test_store();
        let roller = DareRoller::new(store.clone());

        let result = roller.roll("missing", "male").await;
        assert!(matches!(result, Err(GameError::NotFound("Proposal"))));
    }

    #[tokio::test]
    async fn test_roll_records_dare() {
        let store = test_store();
        let alice = seed_user(&store, "alice", "female").await;
        let bob = seed_user(&store, "bob", "male").await;
        let p = seed_proposal(&store, &alice, &bob).await;
        let roller = DareRoller::new(store.clone());

        for _ in 0..20 {
            let dare = roller.roll(&p.id, "male").await.unwrap();
            assert!((1..=DIE_FACES).contains(&dare.roll_number));
            assert_eq!(dare.dare_text, MALE_DARES[(dare.roll_number - 1) as usize]);
            assert!(!dare.completed);
        }

        assert_eq!(roller.list(&p.id).await.unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_seeded_roll_is_reproducible() {
        let store = test_store();
        let alice = seed_user(&store, "alice", "female").await;
        let bob = seed_user(&store, "bob", "male").await;
        let p = seed_proposal(&store, &alice, &bob).await;
        let roller = DareRoller::new(store.clone());

        let a = roller.roll_with(&p.id, "female", &mut DiceRng::new(7)).await.unwrap();
        let b = roller.roll_with(&p.id, "female", &mut DiceRng::new(7)).await.unwrap();
        assert_eq!(a.roll_number, b.roll_number);
        assert_eq!(a.dare_text, b.dare_text);
    }

    #[tokio::test]
    async fn test_complete() {
        let store = test_store();
        let alice = seed_user(&store, "alice", "female").await;
        let bob = seed_user(&store, "bob", "male").await;
        let p = seed_proposal(&store, &alice, &bob).await;
        let roller = DareRoller::new(store.clone());
        let dare = roller.roll(&p.id, "female").await.unwrap();

        roller.complete(&dare.id).await.unwrap();
        assert!(roller.list(&p.id).await.unwrap()[0].completed);

        // Unknown IDs are ignored
        roller.complete("missing").await.unwrap();
    }
}
