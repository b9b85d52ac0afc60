//! Default handlers reproducing the list/task backend.

use crate::allocator::IdsExhausted;
use crate::mocks::request::{MockRequest, MockResponse};
use crate::store::CollectionStore;
use crate::types::route::Endpoint;
use crate::types::task::Task;
use serde::Serialize;

/// Whether `request` carries the path parameters `endpoint` needs.
///
/// Endpoints addressing an entity require an integer `:id`; any other value
/// leaves the request to later handlers or the unhandled-request strategy.
pub fn accepts(endpoint: Endpoint, request: &MockRequest) -> bool {
    !endpoint.pattern().contains(":id") || request.id_param("id").is_some()
}

/// Run `endpoint` against `store`.
pub fn respond(endpoint: Endpoint, store: &mut CollectionStore, request: &MockRequest) -> MockResponse {
    match endpoint {
        Endpoint::GetLists => ok(&store.lists()),
        Endpoint::CreateList => created(store.create_list(request.field("name"))),
        Endpoint::DeleteList => with_id(request, |id| {
            if store.delete_list(id).is_none() {
                tracing::debug!(id, "delete of unknown list treated as success");
            }
            MockResponse::no_content()
        }),
        Endpoint::GetListTasks => with_id(request, |id| {
            let tasks: Vec<&Task> = store.tasks_of_list(id).collect();
            ok(&tasks)
        }),
        Endpoint::CreateTask => with_id(request, |list_id| {
            created(store.create_task(list_id, request.field("text")))
        }),
        Endpoint::GetTasks => {
            let query = request.query_params();
            let list_id = query.get("listId").and_then(|v| v.parse::<u64>().ok());
            let completed = query.get("completed").and_then(|v| v.parse::<bool>().ok());

            let tasks: Vec<&Task> = store
                .tasks()
                .iter()
                .filter(|t| list_id.map_or(true, |id| t.list_id == id))
                .filter(|t| completed.map_or(true, |c| t.completed == c))
                .collect();
            ok(&tasks)
        }
        Endpoint::UpdateTask => with_id(request, |id| {
            let patch = store.update_task(id, request.bool_field("completed"));
            ok(&patch)
        }),
        Endpoint::DeleteTask => with_id(request, |id| {
            if store.delete_task(id).is_none() {
                tracing::debug!(id, "delete of unknown task treated as success");
            }
            MockResponse::no_content()
        }),
    }
}

fn with_id(request: &MockRequest, f: impl FnOnce(u64) -> MockResponse) -> MockResponse {
    match request.id_param("id") {
        Some(id) => f(id),
        None => MockResponse::status(404),
    }
}

fn created<T: Serialize>(result: Result<T, IdsExhausted>) -> MockResponse {
    match result {
        Ok(entity) => ok(&entity),
        Err(err) => {
            tracing::error!(error = %err, "cannot allocate an id for the new entity");
            MockResponse::status(500)
        }
    }
}

fn ok<T: Serialize>(payload: &T) -> MockResponse {
    MockResponse::ok(payload).unwrap_or_else(|err| {
        tracing::error!(error = %err, "failed to serialize response body");
        MockResponse::status(500)
    })
}
