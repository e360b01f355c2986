//! UserRepository - Repository for users

use super::{Create, PoolType, Read, ReadMany, Update};
use crate::dtos::{CreateUserDTO, UserChangesDTO};
use crate::entities::{Roles, User};
use sqlx::Error;
use tracing::{debug, info, instrument};
use uuid::Uuid;

const USER_COLUMNS: &str = r#""id", "name", "pinyin", "email", "clientId", "roles",
    "consentFormAcceptedAt", "createdAt", "updatedAt""#;

/// Escapes LIKE wildcards so a search query matches literally
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub struct UserRepository {
    connection_pool: PoolType,
}

impl UserRepository {
    pub fn new(connection_pool: PoolType) -> UserRepository {
        Self { connection_pool }
    }

    /// clientId is unique
    #[instrument(skip(self))]
    pub async fn find_by_client_id(&self, client_id: &str) -> Result<Option<User>, Error> {
        debug!("Finding user by client id");
        let sql = format!(r#"SELECT {USER_COLUMNS} FROM users WHERE "clientId" = $1"#);
        sqlx::query_as::<_, User>(&sql)
            .bind(client_id)
            .fetch_optional(&self.connection_pool)
            .await
    }

    /// Case-insensitive substring search over pinyin, name and email
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<User>, Error> {
        let pattern = format!("%{}%", escape_like(query));
        let sql = format!(
            r#"SELECT {USER_COLUMNS} FROM users
            WHERE "pinyin" ILIKE $1 ESCAPE '\'
               OR "name" ILIKE $1 ESCAPE '\'
               OR "email" ILIKE $1 ESCAPE '\'"#
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(pattern)
            .fetch_all(&self.connection_pool)
            .await?;

        debug!("Search matched {} users", users.len());
        Ok(users)
    }

    #[instrument(skip(self))]
    pub async fn list_ordered_by_pinyin(&self) -> Result<Vec<User>, Error> {
        let sql = format!(r#"SELECT {USER_COLUMNS} FROM users ORDER BY "pinyin" ASC"#);
        sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.connection_pool)
            .await
    }
}

impl Create<User, CreateUserDTO> for UserRepository {
    #[instrument(skip(self, data), fields(client_id = %data.client_id))]
    async fn create(&self, data: &CreateUserDTO) -> Result<User, Error> {
        debug!("Creating new user");
        let roles = Roles(data.roles.clone()).to_strings();
        let sql = format!(
            r#"INSERT INTO users ("id", "name", "pinyin", "email", "clientId", "roles")
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}"#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&data.name)
            .bind(data.pinyin.to_lowercase())
            .bind(&data.email)
            .bind(&data.client_id)
            .bind(roles)
            .fetch_one(&self.connection_pool)
            .await?;

        info!("User created with id {}", user.id);
        Ok(user)
    }
}

impl Read<User, Uuid> for UserRepository {
    #[instrument(skip(self), fields(user_id = %id))]
    async fn read(&self, id: &Uuid) -> Result<Option<User>, Error> {
        let sql = format!(r#"SELECT {USER_COLUMNS} FROM users WHERE "id" = $1"#);
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl ReadMany<User, Uuid> for UserRepository {
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn read_many(&self, ids: &[Uuid]) -> Result<Vec<User>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(r#"SELECT {USER_COLUMNS} FROM users WHERE "id" = ANY($1)"#);
        sqlx::query_as::<_, User>(&sql)
            .bind(ids)
            .fetch_all(&self.connection_pool)
            .await
    }
}

impl Update<User, UserChangesDTO, Uuid> for UserRepository {
    #[instrument(skip(self, data), fields(user_id = %id))]
    async fn update(&self, id: &Uuid, data: &UserChangesDTO) -> Result<User, Error> {
        debug!("Updating user profile");
        let mut query_builder = sqlx::QueryBuilder::<sqlx::Postgres>::new("UPDATE users SET ");

        let mut separated = query_builder.separated(", ");
        separated.push(r#""name" = "#);
        separated.push_bind_unseparated(&data.name);
        separated.push(r#""pinyin" = "#);
        separated.push_bind_unseparated(&data.pinyin);
        separated.push(r#""consentFormAcceptedAt" = "#);
        separated.push_bind_unseparated(data.consent_form_accepted_at);
        if let Some(ref email) = data.email {
            separated.push(r#""email" = "#);
            separated.push_bind_unseparated(email);
        }
        if let Some(ref roles) = data.roles {
            separated.push(r#""roles" = "#);
            separated.push_bind_unseparated(Roles(roles.clone()).to_strings());
        }
        separated.push(r#""updatedAt" = NOW()"#);

        query_builder.push(r#" WHERE "id" = "#);
        query_builder.push_bind(id);
        query_builder.push(format!(" RETURNING {USER_COLUMNS}"));

        let user = query_builder
            .build_query_as::<User>()
            .fetch_optional(&self.connection_pool)
            .await?
            .ok_or(Error::RowNotFound)?;

        info!("User profile updated");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Role;
    use sqlx::PgPool;

    #[test]
    fn test_escape_like_escapes_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("张三"), "张三");
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users")))]
    async fn test_search_is_case_insensitive_over_three_fields(pool: PgPool) -> sqlx::Result<()> {
        let repo = UserRepository::new(pool);

        // email match, different case
        let by_email = repo.search("wangwu@EXAMPLE").await?;
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].client_id, "client-wangwu");

        // pinyin match
        let by_pinyin = repo.search("ZHANG").await?;
        assert_eq!(by_pinyin.len(), 1);

        // name match
        let by_name = repo.search("李").await?;
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name.as_deref(), Some("李四"));

        // wildcards are literal
        assert!(repo.search("%").await?.is_empty());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users")))]
    async fn test_list_is_ordered_by_pinyin(pool: PgPool) -> sqlx::Result<()> {
        let repo = UserRepository::new(pool);
        let pinyins: Vec<String> = repo
            .list_ordered_by_pinyin()
            .await?
            .into_iter()
            .filter_map(|u| u.pinyin)
            .collect();
        assert_eq!(pinyins, vec!["lisi", "wangwu", "zhangsan", "zhaoliu"]);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users")))]
    async fn test_update_only_touches_permitted_columns(pool: PgPool) -> sqlx::Result<()> {
        let repo = UserRepository::new(pool);
        let id: Uuid = "00000000-0000-0000-0000-000000000002".parse().unwrap();

        let changes = UserChangesDTO {
            name: "李小四".to_string(),
            pinyin: "lixiaosi".to_string(),
            ..Default::default()
        };
        let updated = repo.update(&id, &changes).await?;
        assert_eq!(updated.name.as_deref(), Some("李小四"));
        assert_eq!(updated.email, "lisi@example.com");
        assert!(updated.roles.is_empty());

        let changes = UserChangesDTO {
            name: "李小四".to_string(),
            pinyin: "lixiaosi".to_string(),
            roles: Some(vec![Role::Mentor]),
            ..Default::default()
        };
        let updated = repo.update(&id, &changes).await?;
        assert!(updated.roles.contains(Role::Mentor));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users")))]
    async fn test_update_missing_user_is_row_not_found(pool: PgPool) -> sqlx::Result<()> {
        let repo = UserRepository::new(pool);
        let changes = UserChangesDTO {
            name: "无名".to_string(),
            pinyin: "wuming".to_string(),
            ..Default::default()
        };
        let result = repo.update(&Uuid::new_v4(), &changes).await;
        assert!(matches!(result, Err(Error::RowNotFound)));
        Ok(())
    }
}
