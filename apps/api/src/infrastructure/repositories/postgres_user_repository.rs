use async_trait::async_trait;
use uuid::Uuid;

use super::postgres_store::{map_sqlx_error, PostgresTransaction};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::repositories::UserRepository;
use crate::domain::user::{Email, Role, User};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    role: Role,
    password_hash: String,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::new(row.email)
            .map_err(|e| DomainError::Store(format!("Invalid email from database: {}", e)))?;
        Ok(User {
            id: row.id,
            email,
            role: row.role,
            password_hash: row.password_hash,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresTransaction {
    async fn create_user(&mut self, user: &User) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.id)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.role)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("Failed to create user", e))?;

        Ok(())
    }

    async fn find_user_by_email(&mut self, email: &Email) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, role, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("Failed to find user by email", e))?;

        row.map(User::try_from).transpose()
    }
}
