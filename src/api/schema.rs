use std::sync::Arc;

use async_graphql::{EmptySubscription, MergedObject, Schema};

use super::auth::{AuthMutation, AuthQuery};
use super::books::{BookMutation, BookQuery};
use super::reviews::{ReviewMutation, ReviewQuery};
use super::users::{UserMutation, UserQuery};
use crate::state::SharedState;

#[derive(MergedObject, Default)]
pub struct QueryRoot(AuthQuery, UserQuery, BookQuery, ReviewQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(AuthMutation, UserMutation, BookMutation, ReviewMutation);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

#[must_use]
pub fn build_schema(shared: Arc<SharedState>) -> AppSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(shared)
    .finish()
}

/// The schema in SDL form, without needing a database.
#[must_use]
pub fn sdl() -> String {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .finish()
    .sdl()
}
