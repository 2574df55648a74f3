use sqlx::FromRow;

/// Subscription column of a `users` row. `tier` is nullable; the plan cap
/// resolver decides what a missing tier means.
#[derive(Debug, Clone, FromRow)]
pub struct UserPlanRow {
    pub tier: Option<String>,
}
