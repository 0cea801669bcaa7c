//! Catalog seeding command.
//!
//! Fills `store.collection` and `store.product` with demo data so a fresh
//! database has something to browse. Safe to run repeatedly: slugs carry a
//! random suffix, so reruns add more rows instead of colliding.

use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

const COLLECTION_NAMES: &[&str] = &[
    "Beverages",
    "Cleaning",
    "Dairy",
    "Grains",
    "Snacks",
    "Produce",
    "Bakery",
    "Frozen",
];

const PRODUCT_ADJECTIVES: &[&str] = &[
    "Organic", "Classic", "Premium", "Fresh", "Smoked", "Roasted", "Wild", "Golden",
];

const PRODUCT_NOUNS: &[&str] = &[
    "Coffee", "Honey", "Bread", "Cheese", "Rice", "Almonds", "Juice", "Salmon", "Yogurt", "Pasta",
];

pub async fn run(collections: u32, products: u32) -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").map_err(|_| SeedError::MissingDatabaseUrl)?;

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await?;

    let collection_ids = seed_collections(&pool, collections).await?;
    seed_products(&pool, &collection_ids, products).await?;

    tracing::info!(collections, products, "Seeding complete");
    Ok(())
}

async fn seed_collections(pool: &PgPool, count: u32) -> Result<Vec<i32>, SeedError> {
    let mut rng = rand::rng();
    let mut ids = Vec::with_capacity(count as usize);

    for name in COLLECTION_NAMES.iter().cycle().take(count as usize) {
        let suffix: u32 = rng.random_range(1000..10000);
        let title = format!("{name} {suffix}");

        let (id,): (i32,) =
            sqlx::query_as("INSERT INTO store.collection (title) VALUES ($1) RETURNING id")
                .bind(&title)
                .fetch_one(pool)
                .await?;
        ids.push(id);
    }

    tracing::info!(count, "Collections created");
    Ok(ids)
}

async fn seed_products(pool: &PgPool, collection_ids: &[i32], count: u32) -> Result<(), SeedError> {
    if collection_ids.is_empty() {
        tracing::warn!("No collections to attach products to, skipping product seed");
        return Ok(());
    }

    let mut rng = rand::rng();

    for _ in 0..count {
        let adjective = PRODUCT_ADJECTIVES.choose(&mut rng).copied().unwrap_or("Classic");
        let noun = PRODUCT_NOUNS.choose(&mut rng).copied().unwrap_or("Coffee");
        let suffix: u32 = rng.random_range(1000..10000);
        let title = format!("{adjective} {noun} {suffix}");
        let slug = title.to_lowercase().replace(' ', "-");

        // Prices between 1.00 and 100.00, in whole cents
        let unit_price = Decimal::new(rng.random_range(100..10_000), 2);
        let inventory: i32 = rng.random_range(0..500);
        let Some(&collection_id) = collection_ids.choose(&mut rng) else {
            break;
        };

        sqlx::query(
            "INSERT INTO store.product (title, slug, description, unit_price, inventory, collection_id) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&title)
        .bind(&slug)
        .bind(format!("Demo product: {title}"))
        .bind(unit_price)
        .bind(inventory)
        .bind(collection_id)
        .execute(pool)
        .await?;
    }

    tracing::info!(count, "Products created");
    Ok(())
}
