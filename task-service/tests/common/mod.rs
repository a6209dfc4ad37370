use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use chrono::Duration;
use serde_json::json;
use serde_json::Value;
use task_service::domain::authentication::service::AuthService;
use task_service::domain::task::errors::TaskError;
use task_service::domain::task::models::NewTask;
use task_service::domain::task::models::Task;
use task_service::domain::task::models::TaskId;
use task_service::domain::task::models::TaskName;
use task_service::domain::task::ports::TaskRepository;
use task_service::domain::task::service::TaskService;
use task_service::domain::user::models::NewUser;
use task_service::domain::user::models::User;
use task_service::domain::user::models::UserId;
use task_service::domain::user::ports::UserRepository;
use task_service::domain::user::service::UserService;
use task_service::inbound::http::router::create_router;
use task_service::user::errors::UserError;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const DEFAULT_PASSWORD: &str = "pw123";

/// Rows shared by the in-memory repositories, mirroring the database
/// constraints: unique email, unique (user, task name), cascading delete.
#[derive(Default)]
pub struct Store {
    users: Vec<User>,
    tasks: Vec<Task>,
    next_user_id: i64,
    next_task_id: i64,
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    store: Arc<Mutex<Store>>,
}

#[derive(Clone, Default)]
pub struct InMemoryTaskRepository {
    store: Arc<Mutex<Store>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut store = self.store.lock().unwrap();
        if store.users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        store.next_user_id += 1;
        let user = User {
            id: UserId(store.next_user_id),
            email: user.email,
            password_hash: user.password_hash,
            created_at: user.created_at,
        };
        store.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut store = self.store.lock().unwrap();
        let existing = store
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(UserError::NotFound(user.id.to_string()))?;
        *existing = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut store = self.store.lock().unwrap();
        let before = store.users.len();
        store.users.retain(|u| u.id != *id);
        if store.users.len() == before {
            return Err(UserError::NotFound(id.to_string()));
        }
        store.tasks.retain(|t| t.user_id != *id);
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: NewTask) -> Result<Task, TaskError> {
        let mut store = self.store.lock().unwrap();
        if store
            .tasks
            .iter()
            .any(|t| t.user_id == task.user_id && t.name == task.name)
        {
            return Err(TaskError::AlreadyExists(task.name.to_string()));
        }

        store.next_task_id += 1;
        let task = Task {
            id: TaskId(store.next_task_id),
            user_id: task.user_id,
            name: task.name,
            description: task.description,
            created_at: task.created_at,
        };
        store.tasks.push(task.clone());
        Ok(task)
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskError> {
        let store = self.store.lock().unwrap();
        Ok(store.tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Task>, TaskError> {
        let store = self.store.lock().unwrap();
        let mut tasks: Vec<Task> = store
            .tasks
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| (b.created_at, b.id.0).cmp(&(a.created_at, a.id.0)));
        Ok(tasks)
    }

    async fn find_by_user_and_name(
        &self,
        user_id: UserId,
        name: &TaskName,
    ) -> Result<Option<Task>, TaskError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .tasks
            .iter()
            .find(|t| t.user_id == user_id && t.name == *name)
            .cloned())
    }

    async fn update(&self, task: Task) -> Result<Task, TaskError> {
        let mut store = self.store.lock().unwrap();
        let existing = store
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or(TaskError::NotFound(task.id))?;
        *existing = task.clone();
        Ok(task)
    }

    async fn delete(&self, id: TaskId) -> Result<(), TaskError> {
        let mut store = self.store.lock().unwrap();
        let before = store.tasks.len();
        store.tasks.retain(|t| t.id != id);
        if store.tasks.len() == before {
            return Err(TaskError::NotFound(id));
        }
        Ok(())
    }
}

/// A registered account as seen by a client.
pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub token: String,
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
    pub task_repository: InMemoryTaskRepository,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(Mutex::new(Store::default()));
        let user_repository = Arc::new(InMemoryUserRepository {
            store: Arc::clone(&store),
        });
        let task_repository = InMemoryTaskRepository { store };

        let ttl = Duration::minutes(JwtHandler::DEFAULT_TTL_MINUTES);
        let authenticator = Arc::new(Authenticator::new(JWT_SECRET, ttl));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&user_repository),
            Arc::clone(&authenticator),
        ));
        let user_service = Arc::new(UserService::new(user_repository));
        let task_service = Arc::new(TaskService::new(Arc::new(task_repository.clone())));

        let router = create_router(auth_service, user_service, task_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET, ttl),
            task_repository,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account with the default password and return its id and token.
    pub async fn register(&self, email: &str) -> TestUser {
        let response = self
            .post("/api/v1/auth/register")
            .json(&json!({
                "email": email,
                "password": DEFAULT_PASSWORD,
                "passwordConfirmation": DEFAULT_PASSWORD
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        TestUser {
            id: body["data"]["userId"].as_i64().expect("userId missing"),
            email: email.to_string(),
            token: body["data"]["jwtToken"]
                .as_str()
                .expect("jwtToken missing")
                .to_string(),
        }
    }

    /// Create a task for `user` and return its id.
    pub async fn create_task(&self, user: &TestUser, name: &str) -> i64 {
        let response = self
            .post_authenticated(&format!("/api/v1/users/{}/tasks", user.id), &user.token)
            .json(&json!({ "name": name, "description": "description" }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["taskId"].as_i64().expect("taskId missing")
    }
}

/// Error message carried by a failed response envelope.
pub async fn error_message(response: reqwest::Response) -> String {
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"].is_null());
    body["error"]["message"]
        .as_str()
        .expect("error message missing")
        .to_string()
}
