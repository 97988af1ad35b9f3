//! Request chains issued by the screen
//!
//! Each chain is one async function returning the `ApiEvent` the main loop
//! folds back into the app. Mutations are sequential: the follow-up full
//! read is only issued after the mutation itself resolved, and a failed
//! mutation short-circuits without refreshing.

use directory_client::{ClientResult, Employee, HttpClient};

use crate::app::ApiEvent;
use crate::form::FormMode;

/// Full-collection read.
pub async fn refresh(client: &HttpClient) -> ApiEvent {
    ApiEvent::Refreshed(client.list_employees().await)
}

/// Create or update per the mode flag, then one follow-up read.
pub async fn save(client: &HttpClient, mode: FormMode, employee: Employee) -> ApiEvent {
    let mutation = match mode {
        FormMode::Creating => client.create_employee(&employee).await.map(|_| ()),
        FormMode::Editing(id) => client.update_employee(id, &employee).await.map(|_| ()),
    };

    ApiEvent::Saved {
        mode,
        result: follow_up(client, mutation).await,
    }
}

/// Delete by id, then one follow-up read.
pub async fn delete(client: &HttpClient, id: i64) -> ApiEvent {
    let mutation = client.delete_employee(id).await;
    ApiEvent::Deleted(follow_up(client, mutation).await)
}

async fn follow_up(
    client: &HttpClient,
    mutation: ClientResult<()>,
) -> ClientResult<Vec<Employee>> {
    match mutation {
        Ok(()) => client.list_employees().await,
        Err(err) => Err(err),
    }
}
