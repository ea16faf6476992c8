use async_graphql::MergedObject;

use crate::gql::domains::leagues::LeagueQuery;
use crate::gql::domains::users::UserQuery;

#[derive(MergedObject, Default)]
pub struct QueryRoot(LeagueQuery, UserQuery);
