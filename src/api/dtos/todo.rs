use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    api::errors::TodoApiError,
    models::todo_model::{NewTodo, TodoChanges},
};

/// Body of `POST /api/todos`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CreateTodoDTO {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub task: Option<String>,
}

impl CreateTodoDTO {
    pub fn new<T: Into<String>>(name: T, task: T) -> Self {
        Self {
            name: Some(name.into()),
            task: Some(task.into()),
        }
    }

    pub fn into_new_todo(self) -> Result<NewTodo, TodoApiError> {
        match (self.name, self.task) {
            (Some(name), Some(task)) => NewTodo::new(name, task),
            _ => Err(TodoApiError::BadRequest(
                "Please provide both name and task".to_string(),
            )),
        }
    }
}

/// Body of `PUT /api/todos/{id}`, every field optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct UpdateTodoDTO {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodoDTO {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    pub fn into_changes(self) -> Result<TodoChanges, TodoApiError> {
        TodoChanges::new(self.name, self.task, self.completed)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DeleteTodoResponseDTO {
    pub message: String,
    pub id: Uuid,
}

#[cfg(test)]
mod todo_dto_test {
    use super::*;

    #[test]
    fn test_missing_task_is_bad_request() {
        let dto: CreateTodoDTO = serde_json::from_str(r#"{"name": "Buy milk"}"#).unwrap();

        assert!(matches!(
            dto.into_new_todo(),
            Err(TodoApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_update_skips_absent_fields() {
        let body = serde_json::to_value(UpdateTodoDTO::completed(true)).unwrap();

        assert_eq!(body, serde_json::json!({ "completed": true }));
    }

    #[test]
    fn test_update_rejects_wrong_types() {
        let dto = serde_json::from_str::<UpdateTodoDTO>(r#"{"completed": "yes"}"#);

        assert!(dto.is_err());
    }
}
