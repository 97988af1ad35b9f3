// directory-client/tests/employee_api.rs
// Integration tests against an in-process mock Employee service.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use directory_client::{ClientConfig, ClientError, Employee, HttpClient};

/// Mock service state: the collection plus per-route call counters and the
/// last payload each mutation route received.
#[derive(Clone)]
struct MockState {
    employees: Arc<Mutex<Vec<Employee>>>,
    next_id: Arc<AtomicI64>,
    list_calls: Arc<AtomicUsize>,
    create_calls: Arc<AtomicUsize>,
    update_calls: Arc<AtomicUsize>,
    delete_calls: Arc<AtomicUsize>,
    last_create_payload: Arc<Mutex<Option<serde_json::Value>>>,
    last_update: Arc<Mutex<Option<(i64, serde_json::Value)>>>,
}

impl MockState {
    fn new(seed: Vec<Employee>) -> Self {
        let next_id = seed.iter().filter_map(|e| e.id).max().unwrap_or(0) + 1;
        Self {
            employees: Arc::new(Mutex::new(seed)),
            next_id: Arc::new(AtomicI64::new(next_id)),
            list_calls: Arc::new(AtomicUsize::new(0)),
            create_calls: Arc::new(AtomicUsize::new(0)),
            update_calls: Arc::new(AtomicUsize::new(0)),
            delete_calls: Arc::new(AtomicUsize::new(0)),
            last_create_payload: Arc::new(Mutex::new(None)),
            last_update: Arc::new(Mutex::new(None)),
        }
    }
}

async fn list(State(state): State<MockState>) -> Json<Vec<Employee>> {
    state.list_calls.fetch_add(1, Ordering::SeqCst);
    Json(state.employees.lock().unwrap().clone())
}

async fn create(
    State(state): State<MockState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<Employee>, StatusCode> {
    state.create_calls.fetch_add(1, Ordering::SeqCst);
    *state.last_create_payload.lock().unwrap() = Some(payload.clone());

    let mut employee: Employee =
        serde_json::from_value(payload).map_err(|_| StatusCode::BAD_REQUEST)?;
    employee.id = Some(state.next_id.fetch_add(1, Ordering::SeqCst));
    state.employees.lock().unwrap().push(employee.clone());
    Ok(Json(employee))
}

async fn update(
    State(state): State<MockState>,
    Path(id): Path<i64>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<Employee>, StatusCode> {
    state.update_calls.fetch_add(1, Ordering::SeqCst);
    *state.last_update.lock().unwrap() = Some((id, payload.clone()));

    let mut employee: Employee =
        serde_json::from_value(payload).map_err(|_| StatusCode::BAD_REQUEST)?;
    employee.id = Some(id);

    let mut employees = state.employees.lock().unwrap();
    let slot = employees
        .iter_mut()
        .find(|e| e.id == Some(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = employee.clone();
    Ok(Json(employee))
}

async fn remove(
    State(state): State<MockState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    state.delete_calls.fetch_add(1, Ordering::SeqCst);

    let mut employees = state.employees.lock().unwrap();
    let before = employees.len();
    employees.retain(|e| e.id != Some(id));
    if employees.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::OK)
}

/// Spawn the mock service on an ephemeral port and return a client for it.
async fn spawn_mock(seed: Vec<Employee>) -> (HttpClient, MockState) {
    let state = MockState::new(seed);
    let app = Router::new()
        .route("/Employee", get(list).post(create))
        .route("/Employee/{id}", axum::routing::put(update).delete(remove))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = ClientConfig::new(format!("http://{addr}"))
        .with_timeout(5)
        .build_http_client();
    (client, state)
}

fn employee(id: Option<i64>, first: &str, last: &str) -> Employee {
    Employee {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@x.com", first.to_lowercase()),
        phone_number: "555".to_string(),
        addresses: vec![],
    }
}

#[tokio::test]
async fn list_is_idempotent_without_mutations() {
    let seed = vec![employee(Some(1), "Ann", "Ng"), employee(Some(2), "Bo", "Lee")];
    let (client, state) = spawn_mock(seed).await;

    let first = client.list_employees().await.unwrap();
    let second = client.list_employees().await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
    assert_eq!(state.list_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn create_posts_the_exact_payload_without_id() {
    let (client, state) = spawn_mock(vec![]).await;

    let record = employee(None, "Bo", "Lee");
    let created = client.create_employee(&record).await.unwrap();

    let payload = state.last_create_payload.lock().unwrap().clone().unwrap();
    assert_eq!(
        payload,
        serde_json::json!({
            "firstName": "Bo",
            "lastName": "Lee",
            "email": "bo@x.com",
            "phoneNumber": "555",
            "addresses": []
        })
    );
    assert!(created.id.is_some());

    // A follow-up read observes the created record.
    let listed = client.list_employees().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].first_name, "Bo");
}

#[tokio::test]
async fn update_addresses_the_record_by_id_with_the_full_payload() {
    let (client, state) = spawn_mock(vec![employee(Some(7), "Ann", "Ng")]).await;

    let unchanged = employee(Some(7), "Ann", "Ng");
    client.update_employee(7, &unchanged).await.unwrap();

    let (id, payload) = state.last_update.lock().unwrap().clone().unwrap();
    assert_eq!(id, 7);
    assert_eq!(payload["firstName"], "Ann");
    assert_eq!(payload["id"], 7);
    assert_eq!(state.update_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn delete_issues_exactly_one_request_to_the_record() {
    let seed = vec![employee(Some(3), "Ann", "Ng"), employee(Some(4), "Bo", "Lee")];
    let (client, state) = spawn_mock(seed).await;

    client.delete_employee(3).await.unwrap();

    assert_eq!(state.delete_calls.load(Ordering::SeqCst), 1);
    let listed = client.list_employees().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, Some(4));
}

#[tokio::test]
async fn missing_record_maps_to_not_found() {
    let (client, _state) = spawn_mock(vec![]).await;

    let err = client
        .update_employee(99, &employee(Some(99), "No", "One"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));

    let err = client.delete_employee(99).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn service_failure_surfaces_as_internal_error() {
    // A service that answers every list with a 500.
    async fn broken() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    let app = Router::new().route("/Employee", get(broken));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = ClientConfig::new(format!("http://{addr}"))
        .with_timeout(5)
        .build_http_client();

    let err = client.list_employees().await.unwrap_err();
    assert!(matches!(err, ClientError::Internal(_)));
}
