//! Deck providers: where the engine gets its cards from.
//!
//! A provider hands out a finite batch drawn from a bounded pool. Each fetch
//! is independent; nothing is cached between calls.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::domain::catalog::Category;
use crate::domain::cards::Card;
use crate::domain::rules::MIN_SOURCE_CARDS;
use crate::errors::DomainError;

/// Source of cards for a game session.
///
/// `fetch(count)` returns at most `count` distinct cards in deal order and
/// fails with [`DomainError::InsufficientSourceData`] when the backing pool
/// is too small to seed a game.
#[async_trait]
pub trait DeckProvider: Send + Sync {
    async fn fetch(&self, count: usize) -> Result<Vec<Card>, DomainError>;
}

#[async_trait]
impl<P: DeckProvider + ?Sized> DeckProvider for Arc<P> {
    async fn fetch(&self, count: usize) -> Result<Vec<Card>, DomainError> {
        (**self).fetch(count).await
    }
}

fn check_pool(pool: &[Card]) -> Result<(), DomainError> {
    if pool.len() < MIN_SOURCE_CARDS {
        warn!(
            available = pool.len(),
            required = MIN_SOURCE_CARDS,
            "card pool too small"
        );
        return Err(DomainError::insufficient(pool.len(), MIN_SOURCE_CARDS));
    }
    Ok(())
}

/// In-memory pool dealt as a fresh uniform permutation on every fetch.
pub struct ShuffledPool {
    cards: Vec<Card>,
    /// `fetch` takes `&self`, the RNG needs `&mut`.
    rng: Mutex<ChaCha8Rng>,
}

impl ShuffledPool {
    /// `Some(seed)` makes every sequence of fetches reproducible.
    pub fn new(cards: Vec<Card>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Self {
            cards,
            rng: Mutex::new(rng),
        }
    }

    pub fn from_category(category: &Category, seed: Option<u64>) -> Self {
        Self::new(category.items.clone(), seed)
    }
}

#[async_trait]
impl DeckProvider for ShuffledPool {
    async fn fetch(&self, count: usize) -> Result<Vec<Card>, DomainError> {
        check_pool(&self.cards)?;

        let mut batch = self.cards.clone();
        {
            let mut rng = self
                .rng
                .lock()
                .map_err(|e| DomainError::internal(format!("deck RNG lock poisoned: {e}")))?;
            batch.shuffle(&mut *rng);
        }
        batch.truncate(count);

        debug!(
            requested = count,
            dealt = batch.len(),
            pool = self.cards.len(),
            "dealt shuffled batch"
        );
        Ok(batch)
    }
}

/// Deals the pool in exactly the order given. For scripted games and replays.
pub struct FixedOrderPool {
    cards: Vec<Card>,
}

impl FixedOrderPool {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

#[async_trait]
impl DeckProvider for FixedOrderPool {
    async fn fetch(&self, count: usize) -> Result<Vec<Card>, DomainError> {
        check_pool(&self.cards)?;
        let batch: Vec<Card> = self.cards.iter().take(count).cloned().collect();
        debug!(requested = count, dealt = batch.len(), "dealt fixed-order batch");
        Ok(batch)
    }
}
