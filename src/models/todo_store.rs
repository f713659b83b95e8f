use diesel::prelude::*;
use diesel::{r2d2::ConnectionManager, PgConnection};
use uuid::Uuid;

use super::{
    todo_model::{next_revision_stamp, now, NewTodo, Todo, TodoChanges},
    Pool,
};
use crate::api::errors::TodoApiError;

embed_migrations!("migrations");

/// Persistence layer for todos.
///
/// Implementations are blocking; the api runs them through `web::block`.
/// Every write touches exactly one todo and is atomic for that todo.
pub trait TodoStore: Send + Sync {
    /// All todos ordered by creation time, then id
    fn list(&self) -> Result<Vec<Todo>, TodoApiError>;

    fn find(&self, todo_id: Uuid) -> Result<Todo, TodoApiError>;

    /// Stores a new todo with a fresh id and matching timestamps
    fn insert(&self, new_todo: NewTodo) -> Result<Todo, TodoApiError>;

    /// Applies `changes` and moves `updated_at` strictly forward
    fn update(&self, todo_id: Uuid, changes: TodoChanges) -> Result<Todo, TodoApiError>;

    fn remove(&self, todo_id: Uuid) -> Result<(), TodoApiError>;
}

/// Postgres backed store
pub struct PgTodoStore {
    pool: Pool,
}

impl PgTodoStore {
    pub fn connect(database_url: &str) -> Result<Self, TodoApiError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);

        let pool: Pool = Pool::builder().build(manager)?;

        Ok(Self { pool })
    }

    /// Runs the embedded schema migrations
    pub fn run_migrations(&self) -> Result<(), TodoApiError> {
        let conn = self.pool.get()?;

        embedded_migrations::run(&*conn).map_err(|err| {
            log::error!("Migration failed: {}", err);
            TodoApiError::InternalServerError
        })
    }
}

impl TodoStore for PgTodoStore {
    fn list(&self) -> Result<Vec<Todo>, TodoApiError> {
        use crate::schema::todos::dsl::*;

        let conn = &self.pool.get()?;

        let todos_list = todos
            .order((created_at.asc(), id.asc()))
            .load::<Todo>(conn)?;

        Ok(todos_list)
    }

    fn find(&self, todo_id: Uuid) -> Result<Todo, TodoApiError> {
        use crate::schema::todos::dsl::*;

        let conn = &self.pool.get()?;

        Ok(todos.find(todo_id).first::<Todo>(conn)?)
    }

    fn insert(&self, new_todo: NewTodo) -> Result<Todo, TodoApiError> {
        use crate::schema::todos::dsl::*;

        let conn = &self.pool.get()?;

        let new_todo = Todo::from_new(new_todo, now());

        let inserted = diesel::insert_into(todos)
            .values(&new_todo)
            .get_result::<Todo>(conn)?;

        Ok(inserted)
    }

    fn update(&self, todo_id: Uuid, changes: TodoChanges) -> Result<Todo, TodoApiError> {
        use crate::schema::todos::dsl::*;

        let conn = &self.pool.get()?;

        conn.transaction::<Todo, TodoApiError, _>(|| {
            let current = todos.find(todo_id).for_update().first::<Todo>(conn)?;

            let changeset = changes.into_changeset(next_revision_stamp(current.updated_at));

            let updated = diesel::update(todos.find(todo_id))
                .set(&changeset)
                .get_result::<Todo>(conn)?;

            Ok(updated)
        })
    }

    fn remove(&self, todo_id: Uuid) -> Result<(), TodoApiError> {
        use crate::schema::todos::dsl::*;

        let conn = &self.pool.get()?;

        let delete_count = diesel::delete(todos.find(todo_id)).execute(conn)?;

        if delete_count > 0 {
            Ok(())
        } else {
            Err(TodoApiError::NotFound(String::from("Todo")))
        }
    }
}
