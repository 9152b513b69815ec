use sqlx::SqlitePool;

use crate::cli::Cli;
use crate::config::Config;
use crate::db::{self, ApiAccessRequest, NewAccessRequest, RequestStatus, User};
use crate::error::CommandError;

/// Runs the full provisioning procedure for one invocation.
pub async fn run(
    pool: &SqlitePool,
    config: &Config,
    cli: &Cli,
) -> Result<ApiAccessRequest, CommandError> {
    if cli.create_config {
        create_api_access_config(pool).await?;
    }
    let user = get_user(pool, &cli.username).await?;
    create_api_access_request(
        pool,
        config,
        &user,
        cli.status.into(),
        cli.reason.clone(),
        cli.website.clone(),
    )
    .await
}

/// Ensures an enabled ApiAccessConfig exists. Returns `true` if it was created.
pub async fn create_api_access_config(pool: &SqlitePool) -> Result<bool, CommandError> {
    let (config, created) = db::get_or_create_config(pool)
        .await
        .map_err(CommandError::config_creation)?;

    if created {
        tracing::info!("Created ApiAccessConfig");
    } else {
        tracing::info!("ApiAccessConfig already exists");
    }
    tracing::debug!(
        id = config.id,
        enabled = config.enabled,
        change_date = %config.change_date,
        "ApiAccessConfig in use"
    );
    Ok(created)
}

pub async fn get_user(pool: &SqlitePool, username: &str) -> Result<User, CommandError> {
    db::find_user_by_username(pool, username)
        .await
        .map_err(|e| CommandError::user_lookup(username, e))?
        .ok_or_else(|| CommandError::UserNotFound(username.to_string()))
}

pub async fn create_api_access_request(
    pool: &SqlitePool,
    config: &Config,
    user: &User,
    status: RequestStatus,
    reason: String,
    website: String,
) -> Result<ApiAccessRequest, CommandError> {
    let site = db::get_current_site(pool, config.site_id)
        .await
        .map_err(|e| CommandError::request_creation(&user.username, e))?;

    let new = NewAccessRequest::new(user, status, reason, website, &site);
    let request = db::insert_access_request(pool, &new)
        .await
        .map_err(|e| CommandError::request_creation(&user.username, e))?;

    tracing::info!("Created ApiAccessRequest for user {}", user.username);
    tracing::debug!(
        id = request.id,
        user_id = request.user_id,
        status = %request.status,
        reason = %request.reason,
        website = %request.website,
        site_id = request.site_id,
        site = %site.domain,
        created = %request.created,
        "ApiAccessRequest stored"
    );
    Ok(request)
}
