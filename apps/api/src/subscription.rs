//! Subscription plan lookup: the collaborator that reports a caller's tier.
//!
//! Default: `NoPlanLookup` (no database configured, every tier is absent).
//! With `DATABASE_URL`: `PgPlanLookup` reads `users.tier`.
//!
//! `AppState` holds an `Arc<dyn PlanLookup>`, chosen at startup from config.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::enrichment::plan_cap::PlanDescriptor;
use crate::errors::AppError;
use crate::models::user::UserPlanRow;

#[async_trait]
pub trait PlanLookup: Send + Sync {
    async fn tier_for(&self, user_id: Uuid) -> Result<PlanDescriptor, AppError>;
}

/// Lookup used when no subscription store is configured.
pub struct NoPlanLookup;

#[async_trait]
impl PlanLookup for NoPlanLookup {
    async fn tier_for(&self, _user_id: Uuid) -> Result<PlanDescriptor, AppError> {
        Ok(PlanDescriptor::Absent)
    }
}

/// Reads the tier column of the `users` table.
pub struct PgPlanLookup(pub PgPool);

impl PgPlanLookup {
    /// Connects a small pool; plan lookups are one indexed read per request.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        info!("Connecting to PostgreSQL for plan lookups...");

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        info!("PostgreSQL connection pool established");
        Ok(Self(pool))
    }
}

#[async_trait]
impl PlanLookup for PgPlanLookup {
    async fn tier_for(&self, user_id: Uuid) -> Result<PlanDescriptor, AppError> {
        let row = sqlx::query_as::<_, UserPlanRow>("SELECT tier FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.0)
            .await?;

        // Unknown user and NULL tier both mean "absent".
        Ok(row.and_then(|r| r.tier).into())
    }
}

/// Resolves the descriptor for an optional caller id.
pub async fn descriptor_for(
    lookup: &dyn PlanLookup,
    user_id: Option<Uuid>,
) -> Result<PlanDescriptor, AppError> {
    match user_id {
        Some(id) => lookup.tier_for(id).await,
        None => Ok(PlanDescriptor::Absent),
    }
}
