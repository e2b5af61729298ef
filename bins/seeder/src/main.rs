//! Database seeder for Fintrack development and testing.
//!
//! Seeds a demo user with three months of income and expenses so the
//! report endpoints have something to show.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use anyhow::Context;
use chrono::{Datelike, Months, NaiveDate, Utc};
use fintrack_core::{TransactionKind, auth::hash_password};
use fintrack_db::{CreateTransactionInput, TransactionRepository, UserRepository};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Demo login email.
const DEMO_EMAIL: &str = "demo@fintrack.dev";
/// Demo login password.
const DEMO_PASSWORD: &str = "demo-password";
/// Months of history to generate, counting the current one.
const MONTHS_OF_HISTORY: u32 = 3;

/// (day of month, kind, category, amount in cents, note)
const MONTHLY_PATTERN: &[(u32, TransactionKind, &str, i64, Option<&str>)] = &[
    (1, TransactionKind::Income, "salary", 420_000, Some("Monthly salary")),
    (2, TransactionKind::Expense, "rent", 150_000, None),
    (5, TransactionKind::Expense, "groceries", 18_450, None),
    (9, TransactionKind::Expense, "transport", 6_000, Some("Transit pass")),
    (12, TransactionKind::Expense, "groceries", 9_275, None),
    (15, TransactionKind::Income, "freelance", 65_000, None),
    (18, TransactionKind::Expense, "dining", 4_820, Some("Dinner out")),
    (22, TransactionKind::Expense, "utilities", 11_300, None),
    (26, TransactionKind::Expense, "groceries", 12_610, None),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = Arc::new(
        fintrack_db::connect(&database_url, 2, 1)
            .await
            .context("failed to connect to database")?,
    );

    println!("Seeding demo user...");
    let Some(user_id) = seed_demo_user(&db).await? else {
        println!("  Demo user already exists, skipping...");
        return Ok(());
    };

    println!("Seeding transactions...");
    let inserted = seed_transactions(&db, user_id).await?;
    println!("  Inserted {inserted} transactions");

    println!("Seeding complete! Log in as {DEMO_EMAIL} / {DEMO_PASSWORD}");
    Ok(())
}

/// Creates the demo user, or returns `None` if it already exists.
async fn seed_demo_user(db: &Arc<DatabaseConnection>) -> anyhow::Result<Option<Uuid>> {
    let users = UserRepository::new(Arc::clone(db));
    if users.email_exists(DEMO_EMAIL).await? {
        return Ok(None);
    }

    let password_hash = hash_password(DEMO_PASSWORD)?;
    let user = users
        .create("Demo User", DEMO_EMAIL, &password_hash)
        .await?;
    println!("  Created demo user: {DEMO_EMAIL}");
    Ok(Some(user.id))
}

/// Inserts the monthly pattern for the current and previous months,
/// skipping days that are still in the future.
async fn seed_transactions(db: &Arc<DatabaseConnection>, user_id: Uuid) -> anyhow::Result<usize> {
    let repo = TransactionRepository::new(Arc::clone(db));
    let today = Utc::now().date_naive();
    let this_month = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
        .context("invalid current month")?;

    let mut inserted = 0;
    for back in 0..MONTHS_OF_HISTORY {
        let month_start = this_month
            .checked_sub_months(Months::new(back))
            .context("month out of range")?;

        for &(day, kind, category, cents, note) in MONTHLY_PATTERN {
            let Some(occurred_on) = month_start.with_day(day) else {
                continue;
            };
            if occurred_on > today {
                continue;
            }

            repo.create(CreateTransactionInput {
                user_id,
                kind,
                amount: Decimal::new(cents, 2),
                category: category.to_string(),
                occurred_on,
                note: note.map(str::to_string),
            })
            .await?;
            inserted += 1;
        }
    }

    Ok(inserted)
}
