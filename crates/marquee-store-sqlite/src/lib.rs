//! SQLite backend for the marquee [`Store`] trait.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use uuid::Uuid;

use marquee_storage::{
    Ballot, CreateGroupParams, CreateSuggestionParams, CreateUserParams, Group, GroupId,
    Membership, Role, Store, StoreError, Suggestion, SuggestionId, TitleKind, User, UserId, Vote,
};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// `~/.marquee/store.db` (creates dir with 0700 perms on unix)
    pub async fn open_default() -> Result<Self, StoreError> {
        let dir = dirs::home_dir()
            .ok_or_else(|| StoreError::Backend("no home dir".into()))?
            .join(".marquee");
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::Backend(e.to_string()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o700))
                .map_err(|e| StoreError::Backend(e.to_string()))?;
        }
        let path = dir.join("store.db");
        let url = format!("sqlite://{}?mode=rwc", path.to_string_lossy());
        Self::open(&url).await
    }

    pub async fn open_in_memory() -> Result<Self, StoreError> {
        Self::open("sqlite::memory:").await
    }

    pub async fn open(url: &str) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        MIGRATOR
            .run(&pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(Self { pool })
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

/// UNIQUE violations become `AlreadyExists`; everything else is a backend
/// failure.
fn unique_or_backend(e: sqlx::Error) -> StoreError {
    let s = e.to_string();
    if s.contains("UNIQUE") {
        StoreError::AlreadyExists
    } else {
        StoreError::Backend(s)
    }
}

fn parse_id(s: &str) -> Result<Uuid, StoreError> {
    Uuid::try_parse(s).map_err(|e| StoreError::Backend(e.to_string()))
}

fn parse_ts(secs: i64) -> Result<DateTime<Utc>, StoreError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| StoreError::Backend(format!("invalid timestamp {secs}")))
}

type UserRow = (String, Option<String>, String, i64, i64);

fn user_from_row((id, name, email, created_at, updated_at): UserRow) -> Result<User, StoreError> {
    Ok(User {
        id: UserId(parse_id(&id)?),
        name,
        email,
        created_at: parse_ts(created_at)?,
        updated_at: parse_ts(updated_at)?,
    })
}

type MembershipRow = (String, String, String, i64);

fn membership_from_row(
    (group_id, user_id, role, created_at): MembershipRow,
) -> Result<Membership, StoreError> {
    Ok(Membership {
        group_id: GroupId(parse_id(&group_id)?),
        user_id: UserId(parse_id(&user_id)?),
        role: Role::from_str(&role).map_err(|e| StoreError::Backend(e.to_string()))?,
        created_at: parse_ts(created_at)?,
    })
}

type SuggestionRow = (String, String, String, String, String, Option<String>, i64);

fn suggestion_from_row(
    (id, group_id, suggested_by, title, kind, description, created_at): SuggestionRow,
) -> Result<Suggestion, StoreError> {
    Ok(Suggestion {
        id: SuggestionId(parse_id(&id)?),
        group_id: GroupId(parse_id(&group_id)?),
        suggested_by: UserId(parse_id(&suggested_by)?),
        title,
        kind: TitleKind::from_str(&kind).map_err(|e| StoreError::Backend(e.to_string()))?,
        description,
        created_at: parse_ts(created_at)?,
    })
}

#[async_trait::async_trait]
impl Store for SqliteStore {
    // ───────────────────────────── Users ─────────────────────────────

    async fn create_user(&self, params: &CreateUserParams) -> Result<UserId, StoreError> {
        let user_id = Uuid::now_v7();
        let now = Utc::now().timestamp();
        sqlx::query("INSERT INTO users(id,name,email,created_at,updated_at) VALUES(?,?,?,?,?)")
            .bind(user_id.to_string())
            .bind(&params.name)
            .bind(params.email.to_lowercase())
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(unique_or_backend)?;
        Ok(UserId(user_id))
    }

    async fn get_user_by_id(&self, user_id: &UserId) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id,name,email,created_at,updated_at FROM users WHERE id=?",
        )
        .bind(user_id.0.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        match row {
            None => Err(StoreError::NotFound),
            Some(row) => user_from_row(row),
        }
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id,name,email,created_at,updated_at FROM users WHERE email=?",
        )
        .bind(email.to_lowercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        match row {
            None => Err(StoreError::NotFound),
            Some(row) => user_from_row(row),
        }
    }

    async fn get_users_by_ids(&self, user_ids: &[UserId]) -> Result<Vec<User>, StoreError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; user_ids.len()].join(",");
        let sql = format!(
            "SELECT id,name,email,created_at,updated_at FROM users WHERE id IN ({placeholders})"
        );
        let mut query = sqlx::query_as::<_, UserRow>(&sql);
        for id in user_ids {
            query = query.bind(id.0.to_string());
        }
        let rows = query.fetch_all(&self.pool).await.map_err(backend)?;
        rows.into_iter().map(user_from_row).collect()
    }

    // ───────────────────────────── Groups ─────────────────────────────

    async fn create_group(&self, params: &CreateGroupParams) -> Result<GroupId, StoreError> {
        let mut tx = self.pool.begin().await.map_err(backend)?;

        let group_id = Uuid::now_v7();
        let now = Utc::now().timestamp();
        sqlx::query("INSERT INTO groups(id,name,created_by,created_at,updated_at) VALUES(?,?,?,?,?)")
            .bind(group_id.to_string())
            .bind(&params.name)
            .bind(params.created_by.0.to_string())
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(backend)?;

        sqlx::query("INSERT INTO group_members(group_id,user_id,role,created_at) VALUES(?,?,?,?)")
            .bind(group_id.to_string())
            .bind(params.created_by.0.to_string())
            .bind(Role::Admin.as_str())
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(backend)?;

        tx.commit().await.map_err(backend)?;
        Ok(GroupId(group_id))
    }

    async fn get_group(&self, group_id: &GroupId) -> Result<Group, StoreError> {
        let row = sqlx::query_as::<_, (String, String, String, i64, i64)>(
            "SELECT id,name,created_by,created_at,updated_at FROM groups WHERE id=?",
        )
        .bind(group_id.0.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        match row {
            None => Err(StoreError::NotFound),
            Some((id, name, created_by, created_at, updated_at)) => Ok(Group {
                id: GroupId(parse_id(&id)?),
                name,
                created_by: UserId(parse_id(&created_by)?),
                created_at: parse_ts(created_at)?,
                updated_at: parse_ts(updated_at)?,
            }),
        }
    }

    // ─────────────────────────── Memberships ───────────────────────────

    async fn add_member(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
        role: Role,
    ) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO group_members(group_id,user_id,role,created_at) VALUES(?,?,?,?)")
            .bind(group_id.0.to_string())
            .bind(user_id.0.to_string())
            .bind(role.as_str())
            .bind(Utc::now().timestamp())
            .execute(&self.pool)
            .await
            .map_err(unique_or_backend)?;
        Ok(())
    }

    async fn get_membership(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<Membership, StoreError> {
        let row = sqlx::query_as::<_, MembershipRow>(
            "SELECT group_id,user_id,role,created_at FROM group_members
             WHERE group_id=? AND user_id=?",
        )
        .bind(group_id.0.to_string())
        .bind(user_id.0.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        match row {
            None => Err(StoreError::NotFound),
            Some(row) => membership_from_row(row),
        }
    }

    async fn list_group_members(&self, group_id: &GroupId) -> Result<Vec<Membership>, StoreError> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            "SELECT group_id,user_id,role,created_at FROM group_members
             WHERE group_id=? ORDER BY rowid",
        )
        .bind(group_id.0.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        rows.into_iter().map(membership_from_row).collect()
    }

    async fn list_user_memberships(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Membership>, StoreError> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            "SELECT group_id,user_id,role,created_at FROM group_members
             WHERE user_id=? ORDER BY rowid",
        )
        .bind(user_id.0.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        rows.into_iter().map(membership_from_row).collect()
    }

    // ─────────────────────────── Suggestions ───────────────────────────

    async fn create_suggestion(
        &self,
        params: &CreateSuggestionParams,
    ) -> Result<SuggestionId, StoreError> {
        let suggestion_id = Uuid::now_v7();
        sqlx::query(
            "INSERT INTO suggestions(id,group_id,suggested_by,title,kind,description,created_at)
             VALUES(?,?,?,?,?,?,?)",
        )
        .bind(suggestion_id.to_string())
        .bind(params.group_id.0.to_string())
        .bind(params.suggested_by.0.to_string())
        .bind(&params.title)
        .bind(params.kind.as_str())
        .bind(&params.description)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(SuggestionId(suggestion_id))
    }

    async fn get_suggestion(
        &self,
        suggestion_id: &SuggestionId,
    ) -> Result<Suggestion, StoreError> {
        let row = sqlx::query_as::<_, SuggestionRow>(
            "SELECT id,group_id,suggested_by,title,kind,description,created_at
             FROM suggestions WHERE id=?",
        )
        .bind(suggestion_id.0.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        match row {
            None => Err(StoreError::NotFound),
            Some(row) => suggestion_from_row(row),
        }
    }

    async fn list_group_suggestions(
        &self,
        group_id: &GroupId,
    ) -> Result<Vec<Suggestion>, StoreError> {
        let rows = sqlx::query_as::<_, SuggestionRow>(
            "SELECT id,group_id,suggested_by,title,kind,description,created_at
             FROM suggestions WHERE group_id=? ORDER BY rowid",
        )
        .bind(group_id.0.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        rows.into_iter().map(suggestion_from_row).collect()
    }

    // ───────────────────────────── Votes ─────────────────────────────

    async fn upsert_vote(
        &self,
        suggestion_id: &SuggestionId,
        user_id: &UserId,
        ballot: Ballot,
    ) -> Result<(), StoreError> {
        let now = Utc::now().timestamp();
        sqlx::query(
            "INSERT INTO votes(suggestion_id,user_id,ballot,created_at,updated_at)
             VALUES(?,?,?,?,?)
             ON CONFLICT(suggestion_id,user_id)
             DO UPDATE SET ballot=excluded.ballot,
                           updated_at=excluded.updated_at",
        )
        .bind(suggestion_id.0.to_string())
        .bind(user_id.0.to_string())
        .bind(ballot.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn list_suggestion_votes(
        &self,
        suggestion_id: &SuggestionId,
    ) -> Result<Vec<Vote>, StoreError> {
        let rows = sqlx::query_as::<_, (String, String, String, i64, i64)>(
            "SELECT suggestion_id,user_id,ballot,created_at,updated_at FROM votes
             WHERE suggestion_id=? ORDER BY rowid",
        )
        .bind(suggestion_id.0.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter()
            .map(|(suggestion_id, user_id, ballot, created_at, updated_at)| {
                Ok(Vote {
                    suggestion_id: SuggestionId(parse_id(&suggestion_id)?),
                    user_id: UserId(parse_id(&user_id)?),
                    ballot: Ballot::from_str(&ballot)
                        .map_err(|e| StoreError::Backend(e.to_string()))?,
                    created_at: parse_ts(created_at)?,
                    updated_at: parse_ts(updated_at)?,
                })
            })
            .collect()
    }
}
