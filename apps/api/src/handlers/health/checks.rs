use sqlx::PgPool;

use crate::dto::HealthDependencyStatus;

pub(super) async fn check_postgres(pool: &PgPool) -> HealthDependencyStatus {
    let check = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await;

    match check {
        Ok(_) => HealthDependencyStatus {
            status: "ok",
            detail: None,
        },
        Err(error) => {
            tracing::warn!(error = %error, "postgres health check failed");
            HealthDependencyStatus {
                status: "error",
                detail: Some("postgres is unreachable".to_owned()),
            }
        }
    }
}
