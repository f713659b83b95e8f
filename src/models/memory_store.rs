use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use super::{
    todo_model::{next_revision_stamp, now, NewTodo, Todo, TodoChanges},
    todo_store::TodoStore,
};
use crate::api::errors::TodoApiError;

/// Process local store, used by `--in-memory` and the tests.
/// Nothing survives a restart.
#[derive(Default)]
pub struct MemoryTodoStore {
    todos: Mutex<Vec<Todo>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Todo>>, TodoApiError> {
        self.todos
            .lock()
            .map_err(|_| TodoApiError::DatabaseConnectionError)
    }
}

impl TodoStore for MemoryTodoStore {
    fn list(&self) -> Result<Vec<Todo>, TodoApiError> {
        let mut list = self.lock()?.clone();

        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(list)
    }

    fn find(&self, todo_id: Uuid) -> Result<Todo, TodoApiError> {
        self.lock()?
            .iter()
            .find(|todo| todo.id == todo_id)
            .cloned()
            .ok_or_else(|| TodoApiError::NotFound(String::from("Todo")))
    }

    fn insert(&self, new_todo: NewTodo) -> Result<Todo, TodoApiError> {
        let todo = Todo::from_new(new_todo, now());

        self.lock()?.push(todo.clone());

        Ok(todo)
    }

    fn update(&self, todo_id: Uuid, changes: TodoChanges) -> Result<Todo, TodoApiError> {
        let mut todos = self.lock()?;

        let todo = todos
            .iter_mut()
            .find(|todo| todo.id == todo_id)
            .ok_or_else(|| TodoApiError::NotFound(String::from("Todo")))?;

        let stamp = next_revision_stamp(todo.updated_at);
        todo.apply(changes, stamp);

        Ok(todo.clone())
    }

    fn remove(&self, todo_id: Uuid) -> Result<(), TodoApiError> {
        let mut todos = self.lock()?;

        let before = todos.len();
        todos.retain(|todo| todo.id != todo_id);

        if todos.len() < before {
            Ok(())
        } else {
            Err(TodoApiError::NotFound(String::from("Todo")))
        }
    }
}

#[cfg(test)]
mod memory_store_test {
    use super::*;

    fn new_todo(name: &str) -> NewTodo {
        NewTodo::new(name, "something to do").unwrap()
    }

    #[test]
    fn test_insert_assigns_unique_ids() {
        let store = MemoryTodoStore::new();

        let first = store.insert(new_todo("first")).unwrap();
        let second = store.insert(new_todo("second")).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.find(first.id).unwrap(), first);
        assert_eq!(store.find(second.id).unwrap(), second);
    }

    #[test]
    fn test_list_is_ordered_by_creation() {
        let store = MemoryTodoStore::new();

        let names = ["one", "two", "three"];
        for name in names.iter() {
            store.insert(new_todo(name)).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(2));
        }

        let listed: Vec<String> = store.list().unwrap().into_iter().map(|t| t.name).collect();

        assert_eq!(listed, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_update_advances_updated_at() {
        let store = MemoryTodoStore::new();
        let created = store.insert(new_todo("stamp")).unwrap();

        let first = store
            .update(created.id, TodoChanges::new(None, None, Some(true)).unwrap())
            .unwrap();
        let second = store
            .update(created.id, TodoChanges::new(None, None, Some(true)).unwrap())
            .unwrap();

        assert!(first.updated_at > created.updated_at);
        assert!(second.updated_at > first.updated_at);
        assert_eq!(second.created_at, created.created_at);
        assert_eq!(second.name, created.name);
        assert_eq!(second.completed, true);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let store = MemoryTodoStore::new();

        let res = store.update(Uuid::new_v4(), TodoChanges::default());

        assert!(matches!(res, Err(TodoApiError::NotFound(_))));
    }

    #[test]
    fn test_remove_then_find() {
        let store = MemoryTodoStore::new();
        let created = store.insert(new_todo("gone")).unwrap();

        assert!(store.remove(created.id).is_ok());
        assert!(matches!(
            store.find(created.id),
            Err(TodoApiError::NotFound(_))
        ));
        assert!(matches!(
            store.remove(created.id),
            Err(TodoApiError::NotFound(_))
        ));
    }
}
