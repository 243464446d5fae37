use async_graphql::{Context, ID, Object, Result};

use super::error::GqlResultExt;
use super::identity::require_identity;
use super::types::{ReviewObject, TopUserObject, UserObject, UserStatsObject, shared};
use super::validation::{parse_id, validate_limit};
use crate::models::UpdateProfileInput;

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<UserObject>> {
        let users = shared(ctx)?.user_service.list_users().await.gql()?;
        Ok(users.into_iter().map(UserObject::from).collect())
    }

    async fn user(&self, ctx: &Context<'_>, id: ID) -> Result<Option<UserObject>> {
        let id = parse_id(&id, "user").gql()?;
        let user = shared(ctx)?.user_service.get_user(id).await.gql()?;
        Ok(Some(UserObject::from(user)))
    }

    async fn user_by_email(&self, ctx: &Context<'_>, email: String) -> Result<Option<UserObject>> {
        let user = shared(ctx)?
            .user_service
            .get_user_by_email(&email)
            .await
            .gql()?;
        Ok(Some(UserObject::from(user)))
    }

    /// Users whose name or email contains `query`.
    async fn search_users(&self, ctx: &Context<'_>, query: String) -> Result<Vec<UserObject>> {
        let users = shared(ctx)?
            .user_service
            .search_users(&query)
            .await
            .gql()?;
        Ok(users.into_iter().map(UserObject::from).collect())
    }

    async fn user_stats(&self, ctx: &Context<'_>, id: ID) -> Result<Option<UserStatsObject>> {
        let id = parse_id(&id, "user").gql()?;
        let stats = shared(ctx)?.user_service.user_stats(id).await.gql()?;
        Ok(Some(UserStatsObject::from(stats)))
    }

    async fn my_stats(&self, ctx: &Context<'_>) -> Result<Option<UserStatsObject>> {
        let identity = require_identity(ctx).gql()?;
        let stats = shared(ctx)?
            .user_service
            .user_stats(identity.id)
            .await
            .gql()?;
        Ok(Some(UserStatsObject::from(stats)))
    }

    /// Users ranked by number of reviews written. Defaults to 10 entries.
    async fn top_users(&self, ctx: &Context<'_>, limit: Option<i32>) -> Result<Vec<TopUserObject>> {
        let limit = validate_limit(limit).gql()?;
        let top = shared(ctx)?.user_service.top_users(limit).await.gql()?;
        Ok(top.into_iter().map(TopUserObject::from).collect())
    }

    /// The caller's reviews, newest first.
    async fn my_reviews(&self, ctx: &Context<'_>) -> Result<Vec<ReviewObject>> {
        let identity = require_identity(ctx).gql()?;
        let reviews = shared(ctx)?
            .user_service
            .user_reviews(identity.id)
            .await
            .gql()?;
        Ok(reviews.into_iter().map(ReviewObject::from).collect())
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    async fn update_profile(
        &self,
        ctx: &Context<'_>,
        name: Option<String>,
        email: Option<String>,
        current_password: Option<String>,
        new_password: Option<String>,
    ) -> Result<UserObject> {
        let identity = require_identity(ctx).gql()?;
        let input = UpdateProfileInput {
            name,
            email,
            current_password,
            new_password,
        };

        shared(ctx)?
            .user_service
            .update_profile(identity, input)
            .await
            .map(UserObject::from)
            .gql()
    }

    /// Deletes the caller's account and every review they wrote.
    async fn delete_account(&self, ctx: &Context<'_>, password: String) -> Result<bool> {
        let identity = require_identity(ctx).gql()?;
        shared(ctx)?
            .user_service
            .delete_account(identity, &password)
            .await
            .gql()
    }
}
