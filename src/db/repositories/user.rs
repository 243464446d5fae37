use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::entities::{prelude::*, reviews, users};
use crate::models::UserProfile;
use crate::models::user::DEFAULT_ROLE;

/// Changes applied by a profile update. `None` leaves the column untouched.
#[derive(Debug, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<UserProfile>> {
        let users = Users::find()
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list users")?;

        Ok(users.into_iter().map(UserProfile::from).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<UserProfile>> {
        let user = Users::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(UserProfile::from))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<UserProfile>> {
        let user = Users::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")?;

        Ok(user.map(UserProfile::from))
    }

    /// Get user by email together with the stored password hash
    pub async fn get_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<(UserProfile, String)>> {
        let user = Users::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user for password verification")?;

        Ok(user.map(split_credentials))
    }

    /// Get user by ID together with the stored password hash
    pub async fn get_credentials_by_id(&self, id: i32) -> Result<Option<(UserProfile, String)>> {
        let user = Users::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user for password verification")?;

        Ok(user.map(split_credentials))
    }

    /// First user whose email or name matches either value
    pub async fn find_by_email_or_name(
        &self,
        email: &str,
        name: &str,
    ) -> Result<Option<UserProfile>> {
        let user = Users::find()
            .filter(
                Condition::any()
                    .add(users::Column::Email.eq(email))
                    .add(users::Column::Name.eq(name)),
            )
            .one(&self.conn)
            .await
            .context("Failed to query user by email or name")?;

        Ok(user.map(UserProfile::from))
    }

    pub async fn email_taken_by_other(&self, email: &str, id: i32) -> Result<bool> {
        let user = Users::find()
            .filter(users::Column::Email.eq(email))
            .filter(users::Column::Id.ne(id))
            .one(&self.conn)
            .await
            .context("Failed to check email uniqueness")?;

        Ok(user.is_some())
    }

    pub async fn name_taken_by_other(&self, name: &str, id: i32) -> Result<bool> {
        let user = Users::find()
            .filter(users::Column::Name.eq(name))
            .filter(users::Column::Id.ne(id))
            .one(&self.conn)
            .await
            .context("Failed to check name uniqueness")?;

        Ok(user.is_some())
    }

    /// Substring match on name or email
    pub async fn search(&self, query: &str) -> Result<Vec<UserProfile>> {
        let users = Users::find()
            .filter(
                Condition::any()
                    .add(users::Column::Name.contains(query))
                    .add(users::Column::Email.contains(query)),
            )
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to search users")?;

        Ok(users.into_iter().map(UserProfile::from).collect())
    }

    pub async fn create(&self, email: &str, name: &str, password_hash: &str) -> Result<UserProfile> {
        let now = chrono::Utc::now().to_rfc3339();

        let user = users::ActiveModel {
            email: Set(email.to_string()),
            name: Set(name.to_string()),
            password_hash: Set(password_hash.to_string()),
            role: Set(DEFAULT_ROLE.to_string()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert user")?;

        Ok(UserProfile::from(user))
    }

    pub async fn update(&self, id: i32, changes: UserChanges) -> Result<Option<UserProfile>> {
        let Some(user) = Users::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user for update")?
        else {
            return Ok(None);
        };

        let mut active: users::ActiveModel = user.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(hash) = changes.password_hash {
            active.password_hash = Set(hash);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let user = active
            .update(&self.conn)
            .await
            .context("Failed to update user")?;

        Ok(Some(UserProfile::from(user)))
    }

    /// Deletes the user's reviews, then the user, in one transaction.
    /// Returns false if the user did not exist.
    pub async fn delete_with_reviews(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        Reviews::delete_many()
            .filter(reviews::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .context("Failed to delete user reviews")?;

        let result = Users::delete_by_id(id)
            .exec(&txn)
            .await
            .context("Failed to delete user")?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }
}

fn split_credentials(model: users::Model) -> (UserProfile, String) {
    let password_hash = model.password_hash.clone();
    (UserProfile::from(model), password_hash)
}
