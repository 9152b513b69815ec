use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Denied,
    Approved,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Denied => "denied",
            RequestStatus::Approved => "approved",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "denied" => Ok(RequestStatus::Denied),
            "approved" => Ok(RequestStatus::Approved),
            other => Err(StoreError::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone)]
pub struct Site {
    pub id: i64,
    pub domain: String,
}

#[derive(Debug, Clone)]
pub struct ApiAccessConfig {
    pub id: i64,
    pub change_date: String,
    pub enabled: bool,
}

#[derive(Debug, Clone)]
pub struct ApiAccessRequest {
    pub id: i64,
    pub user_id: i64,
    pub status: RequestStatus,
    pub website: String,
    pub reason: String,
    pub site_id: i64,
    pub created: String,
}

impl ApiAccessRequest {
    fn from_row(row: &SqliteRow) -> Result<Self, StoreError> {
        let status: String = row.try_get("status")?;
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            status: status.parse()?,
            website: row.try_get("website")?,
            reason: row.try_get("reason")?,
            site_id: row.try_get("site_id")?,
            created: row.try_get("created")?,
        })
    }
}

/// Field values for a request row that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewAccessRequest {
    pub user_id: i64,
    pub status: RequestStatus,
    pub reason: String,
    pub website: String,
    pub site_id: i64,
}

impl NewAccessRequest {
    pub fn new(
        user: &User,
        status: RequestStatus,
        reason: String,
        website: String,
        site: &Site,
    ) -> Self {
        Self {
            user_id: user.id,
            status,
            reason,
            website,
            site_id: site.id,
        }
    }
}

pub async fn init_db(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let schema = include_str!("schema.sql");
    sqlx::raw_sql(schema).execute(pool).await?;
    Ok(())
}

/// Returns the enabled configuration row, creating one if none exists.
///
/// The boolean is `true` when the row was inserted by this call.
pub async fn get_or_create_config(
    pool: &SqlitePool,
) -> Result<(ApiAccessConfig, bool), StoreError> {
    let rows = sqlx::query(
        r#"
        SELECT id, change_date, enabled
        FROM api_access_config
        WHERE enabled = 1
        ORDER BY id
        LIMIT 2
        "#,
    )
    .fetch_all(pool)
    .await?;

    match rows.as_slice() {
        [row] => {
            let config = ApiAccessConfig {
                id: row.try_get("id")?,
                change_date: row.try_get("change_date")?,
                enabled: row.try_get("enabled")?,
            };
            return Ok((config, false));
        }
        [] => {}
        _ => {
            let count: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM api_access_config WHERE enabled = 1")
                    .fetch_one(pool)
                    .await?;
            return Err(StoreError::MultipleObjectsReturned {
                table: "ApiAccessConfig",
                count,
            });
        }
    }

    let change_date = Utc::now().to_rfc3339();
    let result = sqlx::query("INSERT INTO api_access_config (change_date, enabled) VALUES (?, ?)")
        .bind(&change_date)
        .bind(true)
        .execute(pool)
        .await?;

    let config = ApiAccessConfig {
        id: result.last_insert_rowid(),
        change_date,
        enabled: true,
    };
    Ok((config, true))
}

pub async fn find_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, StoreError> {
    let row = sqlx::query("SELECT id, username FROM auth_user WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(Some(User {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
        })),
        None => Ok(None),
    }
}

/// Resolves the site this deployment runs as.
pub async fn get_current_site(pool: &SqlitePool, site_id: i64) -> Result<Site, StoreError> {
    let row = sqlx::query("SELECT id, domain FROM site WHERE id = ?")
        .bind(site_id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::SiteDoesNotExist(site_id))?;

    Ok(Site {
        id: row.try_get("id")?,
        domain: row.try_get("domain")?,
    })
}

pub async fn insert_access_request(
    pool: &SqlitePool,
    request: &NewAccessRequest,
) -> Result<ApiAccessRequest, StoreError> {
    let now = Utc::now().to_rfc3339();
    let row = sqlx::query(
        r#"
        INSERT INTO api_access_request (
            created, modified, user_id, status, website, reason, site_id
        ) VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id, created, user_id, status, website, reason, site_id
        "#,
    )
    .bind(&now)
    .bind(&now)
    .bind(request.user_id)
    .bind(request.status.as_str())
    .bind(&request.website)
    .bind(&request.reason)
    .bind(request.site_id)
    .fetch_one(pool)
    .await?;

    ApiAccessRequest::from_row(&row)
}
