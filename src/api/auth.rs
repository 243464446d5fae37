use async_graphql::{Context, Object, Result};

use super::error::GqlResultExt;
use super::identity::require_identity;
use super::types::{AuthPayloadObject, UserObject, shared};
use crate::models::{LoginInput, RegisterInput};

#[derive(Default)]
pub struct AuthQuery;

#[Object]
impl AuthQuery {
    /// The authenticated caller.
    async fn me(&self, ctx: &Context<'_>) -> Result<Option<UserObject>> {
        let identity = require_identity(ctx).gql()?;
        let user = shared(ctx)?
            .auth_service
            .validate_user(identity.id)
            .await
            .gql()?;
        Ok(Some(UserObject::from(user)))
    }
}

#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    async fn register(
        &self,
        ctx: &Context<'_>,
        email: String,
        name: String,
        password: String,
    ) -> Result<AuthPayloadObject> {
        let input = RegisterInput {
            email,
            name,
            password,
        };

        shared(ctx)?
            .auth_service
            .register(input)
            .await
            .map(AuthPayloadObject::from)
            .gql()
    }

    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<AuthPayloadObject> {
        shared(ctx)?
            .auth_service
            .login(LoginInput { email, password })
            .await
            .map(AuthPayloadObject::from)
            .gql()
    }
}
