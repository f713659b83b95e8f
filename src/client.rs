use reqwest::{
    blocking::{Request, Response},
    header::CONTENT_TYPE,
    Method,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::{
    api::dtos::todo::{CreateTodoDTO, DeleteTodoResponseDTO, UpdateTodoDTO},
    errors::TodoError,
    models::todo_model::Todo,
    ui::app::{Command, Reply},
    utils::make_api_url,
};

/// Blocking http client for the `/api/todos` resource
pub struct TodoClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl TodoClient {
    pub fn new<T: Into<String>>(base_url: T) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Client for the api at `API_URL`
    pub fn from_env() -> Self {
        Self::new(make_api_url("todos"))
    }

    pub fn list_todos(&self) -> Result<Vec<Todo>, TodoError> {
        let request = self.make_request(Method::GET, None, None)?;

        self.execute(request)
    }

    pub fn get_todo(&self, todo_id: Uuid) -> Result<Todo, TodoError> {
        let request = self.make_request(Method::GET, Some(todo_id), None)?;

        self.execute(request)
    }

    pub fn create_todo(&self, body: &CreateTodoDTO) -> Result<Todo, TodoError> {
        let request = self.make_request(Method::POST, None, Some(serde_json::to_value(body)?))?;

        self.execute(request)
    }

    pub fn update_todo(&self, todo_id: Uuid, body: &UpdateTodoDTO) -> Result<Todo, TodoError> {
        let request =
            self.make_request(Method::PUT, Some(todo_id), Some(serde_json::to_value(body)?))?;

        self.execute(request)
    }

    pub fn delete_todo(&self, todo_id: Uuid) -> Result<DeleteTodoResponseDTO, TodoError> {
        let request = self.make_request(Method::DELETE, Some(todo_id), None)?;

        self.execute(request)
    }

    /// Runs a command from the ui and wraps the outcome as a reply
    pub fn dispatch(&self, command: Command) -> Reply {
        log::debug!("Dispatching {:?}", command);

        match command {
            Command::FetchAll => Reply::Fetched(self.list_todos()),
            Command::Create(body) => Reply::Created(self.create_todo(&body)),
            Command::Update(todo_id, body) => Reply::Updated(self.update_todo(todo_id, &body)),
            Command::Delete(todo_id) => {
                Reply::Deleted(todo_id, self.delete_todo(todo_id).map(|_| ()))
            }
        }
    }

    fn make_request(
        &self,
        method: Method,
        todo_id: Option<Uuid>,
        data: Option<serde_json::Value>,
    ) -> Result<Request, TodoError> {
        let url = match todo_id {
            Some(todo_id) => format!("{}/{}", self.base_url, todo_id),
            None => self.base_url.clone(),
        };

        let mut request = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(data) = data {
            request = request.json::<serde_json::Value>(&data);
        }

        Ok(request.build()?)
    }

    fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<T, TodoError> {
        let response = self.http.execute(request)?;

        handle_response(response)
    }
}

/// Decode a success body, or turn the error body into a `TodoError`
fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, TodoError> {
    let status = response.status();
    let text = response.text()?;

    if status.is_success() {
        Ok(serde_json::from_str(&text)?)
    } else {
        Err(TodoError::from_response_body(status.as_u16(), &text))
    }
}
