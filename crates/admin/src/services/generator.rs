//! Synthetic e-commerce data generator.
//!
//! Fills the database with pt-BR flavoured products, users and activity logs
//! so the browser and reports have something to show. People come from the
//! `fake` crate's `PT_BR` locale; product names and categories are drawn from
//! the word lists below. Each collection is written with a single
//! `insert_many`. Running it twice duplicates the data.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use fake::Fake;
use fake::faker::address::raw::StateAbbr;
use fake::faker::internet::raw::FreeEmail;
use fake::faker::name::raw::Name;
use fake::locales::PT_BR;
use mongodb::Collection;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Document};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use tracing::instrument;

use eshop_core::{CollectionName, LogAction, Price};

use crate::db::{Database, DocumentRepository, RepositoryError};
use crate::models::{LogEntry, Product, User};

/// Products generated per run.
pub const PRODUCT_COUNT: usize = 50;
/// Users generated per run.
pub const USER_COUNT: usize = 100;
/// Log entries generated per run.
pub const LOG_COUNT: usize = 1000;
/// Highest generated price, in cents (R$ 40,00).
pub const MAX_PRICE_CENTS: u32 = 4000;
/// Highest generated stock level.
pub const MAX_STOCK: i32 = 200;

const CATEGORIES: &[&str] = &[
    "Automotivo",
    "Bebês",
    "Beleza",
    "Brinquedos",
    "Casa",
    "Computadores",
    "Eletrônicos",
    "Esportes",
    "Ferramentas",
    "Filmes",
    "Games",
    "Jardim",
    "Joias",
    "Livros",
    "Mercado",
    "Moda",
    "Música",
    "Saúde",
    "Sapatos",
];

const PRODUCT_NOUNS: &[&str] = &[
    "Cadeira", "Mesa", "Teclado", "Mouse", "Bicicleta", "Bola", "Luvas", "Calça", "Camiseta",
    "Sapatos", "Chapéu", "Toalhas", "Sabonete", "Relógio", "Mochila", "Carteira", "Travesseiro",
    "Computador",
];

const PRODUCT_ADJECTIVES: &[&str] = &[
    "Incrível",
    "Inteligente",
    "Elegante",
    "Sensacional",
    "Artesanal",
    "Confortável",
    "Durável",
    "Leve",
    "Premium",
    "Sustentável",
];

const PRODUCT_MATERIALS: &[&str] = &[
    "Aço", "Madeira", "Concreto", "Plástico", "Algodão", "Granito", "Borracha", "Metal", "Couro",
    "Bronze", "Lã", "Seda",
];

/// How many documents of each kind to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPlan {
    pub products: usize,
    pub users: usize,
    pub logs: usize,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            products: PRODUCT_COUNT,
            users: USER_COUNT,
            logs: LOG_COUNT,
        }
    }
}

/// Documents inserted by one generator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SeedSummary {
    pub products: usize,
    pub users: usize,
    pub logs: usize,
}

// =============================================================================
// Record Generation
// =============================================================================

/// Pick one entry of a non-empty constant list.
fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

/// A random product: name, category, price in `[0.00, 40.00]`, stock in `[0, 200]`.
pub fn fake_product<R: Rng + ?Sized>(rng: &mut R) -> Product {
    let name = format!(
        "{} {} de {}",
        pick(rng, PRODUCT_NOUNS),
        pick(rng, PRODUCT_ADJECTIVES),
        pick(rng, PRODUCT_MATERIALS)
    );

    Product {
        id: None,
        name,
        category: pick(rng, CATEGORIES).to_string(),
        price: Price::from_cents(rng.random_range(0..=MAX_PRICE_CENTS)),
        stock: rng.random_range(0..=MAX_STOCK),
        extra: Document::new(),
    }
}

/// A random customer: pt-BR name, free-mail address and state code.
pub fn fake_user<R: Rng + ?Sized>(rng: &mut R) -> User {
    User {
        id: None,
        name: Name(PT_BR).fake_with_rng(rng),
        email: FreeEmail(PT_BR).fake_with_rng(rng),
        state: StateAbbr(PT_BR).fake_with_rng(rng),
        extra: Document::new(),
    }
}

/// A random log entry referencing one of the given users and products, with a
/// timestamp in `[window_start, window_end]`.
///
/// Returns `None` when there is no user or product to reference.
pub fn fake_log<R: Rng + ?Sized>(
    rng: &mut R,
    user_ids: &[ObjectId],
    product_ids: &[ObjectId],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Option<LogEntry> {
    let user_id = *user_ids.choose(rng)?;
    let product_id = *product_ids.choose(rng)?;
    let action = *LogAction::ALL.choose(rng)?;

    let start = window_start.timestamp_millis();
    let end = window_end.timestamp_millis().max(start);
    let timestamp = bson::DateTime::from_millis(rng.random_range(start..=end));

    Some(LogEntry {
        id: None,
        timestamp,
        user_id,
        action,
        product_id,
        extra: Document::new(),
    })
}

/// Start of the current calendar year (UTC).
#[must_use]
pub fn start_of_year(now: DateTime<Utc>) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(now.year(), 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map_or(now, |d| d.and_utc())
}

// =============================================================================
// Seeding
// =============================================================================

/// Writes generated data to the database.
pub struct DataGenerator<'a> {
    db: &'a Database,
}

impl<'a> DataGenerator<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Generate and insert products, users and logs.
    ///
    /// Log references are sampled from the user and product ids present in
    /// the store right after the product and user inserts, fetched once.
    /// If either collection is empty no logs are generated.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert or id query fails.
    /// Collections written before the failure keep their new documents.
    #[instrument(skip(self, rng))]
    pub async fn seed<R: Rng + Send>(
        &self,
        plan: SeedPlan,
        rng: &mut R,
    ) -> Result<SeedSummary, RepositoryError> {
        let products: Vec<Product> = (0..plan.products).map(|_| fake_product(rng)).collect();
        let products = insert(&self.db.products(), products).await?;

        let users: Vec<User> = (0..plan.users).map(|_| fake_user(rng)).collect();
        let users = insert(&self.db.users(), users).await?;

        let documents = DocumentRepository::new(self.db);
        let user_ids = documents.ids(CollectionName::Users).await?;
        let product_ids = documents.ids(CollectionName::Products).await?;

        if plan.logs > 0 && (user_ids.is_empty() || product_ids.is_empty()) {
            tracing::warn!(
                users = user_ids.len(),
                products = product_ids.len(),
                "No users or products to reference, skipping log generation"
            );
        }

        let now = Utc::now();
        let window_start = start_of_year(now);
        let logs: Vec<LogEntry> = (0..plan.logs)
            .filter_map(|_| fake_log(rng, &user_ids, &product_ids, window_start, now))
            .collect();
        let logs = insert(&self.db.logs(), logs).await?;

        let summary = SeedSummary {
            products,
            users,
            logs,
        };
        tracing::info!(?summary, "Synthetic data inserted");
        Ok(summary)
    }
}

/// Bulk insert, skipping the call when there is nothing to write.
async fn insert<T>(collection: &Collection<T>, records: Vec<T>) -> Result<usize, RepositoryError>
where
    T: Serialize + Send + Sync,
{
    if records.is_empty() {
        return Ok(0);
    }

    let result = collection.insert_many(records).await?;
    Ok(result.inserted_ids.len())
}
