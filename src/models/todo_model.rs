use crate::api::errors::TodoApiError;
use crate::schema::*;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use diesel::{AsChangeset, Insertable, Queryable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Insertable, Queryable)]
#[table_name = "todos"]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: uuid::Uuid,
    pub name: String,
    pub task: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Builds the stored form of a freshly created todo.
    /// `created_at` and `updated_at` share the same instant.
    pub fn from_new(new_todo: NewTodo, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name: new_todo.name,
            task: new_todo.task,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies `changes` in place and stamps the revision.
    pub fn apply(&mut self, changes: TodoChanges, stamp: DateTime<Utc>) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(task) = changes.task {
            self.task = task;
        }
        if let Some(completed) = changes.completed {
            self.completed = completed;
        }
        self.updated_at = stamp;
    }
}

/// A validated create request. Only constructible through [`NewTodo::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTodo {
    name: String,
    task: String,
}

impl NewTodo {
    pub fn new<T: Into<String>>(name: T, task: T) -> Result<Self, TodoApiError> {
        Ok(Self {
            name: require_text("name", name.into())?,
            task: require_text("task", task.into())?,
        })
    }
}

/// A validated partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoChanges {
    name: Option<String>,
    task: Option<String>,
    completed: Option<bool>,
}

impl TodoChanges {
    pub fn new(
        name: Option<String>,
        task: Option<String>,
        completed: Option<bool>,
    ) -> Result<Self, TodoApiError> {
        Ok(Self {
            name: name.map(|n| require_text("name", n)).transpose()?,
            task: task.map(|t| require_text("task", t)).transpose()?,
            completed,
        })
    }

    pub fn into_changeset(self, stamp: DateTime<Utc>) -> TodoChangeset {
        TodoChangeset {
            name: self.name,
            task: self.task,
            completed: self.completed,
            updated_at: stamp,
        }
    }
}

#[derive(Debug, AsChangeset)]
#[table_name = "todos"]
pub struct TodoChangeset {
    pub name: Option<String>,
    pub task: Option<String>,
    pub completed: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

/// Current time at the precision Postgres keeps for `timestamptz`.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Stamp for a write that follows `previous`; never equal to or before it.
pub fn next_revision_stamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let current = now();

    if current > previous {
        current
    } else {
        previous + Duration::microseconds(1)
    }
}

fn require_text(field: &str, value: String) -> Result<String, TodoApiError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(TodoApiError::BadRequest(format!("{} must not be empty", field)));
    }

    Ok(trimmed.to_string())
}
