use crate::actions::ActionContext;
use crate::error::{user_message, ActionError, Entity};
use crate::models::SearchResults;
use crate::types::ActionResult;

pub const MIN_SEARCH_TERM_LENGTH: usize = 2;

/// GET /api/Search?term=
///
/// Never fails outright: short terms and failed lookups both come back with
/// empty result sets so the search dropdown can always render.
pub async fn global_search(ctx: &ActionContext, term: &str) -> ActionResult<SearchResults> {
    let term = term.trim();
    if term.chars().count() < MIN_SEARCH_TERM_LENGTH {
        return ActionResult::ok_with("Search term is too short.", SearchResults::empty());
    }

    let outcome: Result<SearchResults, ActionError> = async {
        let client = ctx.client()?;
        let mut url = client.endpoint(&["api", "Search"]);
        url.query_pairs_mut().append_pair("term", term);
        client.get(url).await
    }
    .await;

    match outcome {
        Ok(results) => {
            let total = results.total();
            ActionResult::ok_with(format!("Found {} result(s).", total), results)
        }
        Err(err) => {
            let message = user_message(&err, Entity::Search, "search");
            tracing::warn!("Search for '{}' failed, returning no results: {}", term, err);
            ActionResult::fail_with(message, SearchResults::empty())
        }
    }
}
