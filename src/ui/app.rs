use tui::widgets::ListState;
use uuid::Uuid;

use crate::{
    api::dtos::todo::{CreateTodoDTO, UpdateTodoDTO},
    errors::TodoError,
    models::todo_model::Todo,
    ui::form::TodoForm,
};

pub const FETCH_FAILED: &str =
    "Failed to fetch todos. Please check if the backend server is running.";
pub const CREATE_FAILED: &str = "Failed to add todo";
pub const UPDATE_FAILED: &str = "Failed to update todo";
pub const DELETE_FAILED: &str = "Failed to delete todo";

/// A request the app wants sent to the api
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchAll,
    Create(CreateTodoDTO),
    Update(Uuid, UpdateTodoDTO),
    Delete(Uuid),
}

/// The api's answer to a `Command`, fed back through `App::apply`
#[derive(Debug)]
pub enum Reply {
    Fetched(Result<Vec<Todo>, TodoError>),
    Created(Result<Todo, TodoError>),
    Updated(Result<Todo, TodoError>),
    Deleted(Uuid, Result<(), TodoError>),
}

/// Cursor over one of the two todo columns
#[derive(Debug, Default)]
pub struct PaneSelection {
    pub state: ListState,
}

impl PaneSelection {
    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return self.unselect();
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return self.unselect();
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 || i > len - 1 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn unselect(&mut self) {
        self.state.select(None);
    }

    /// Keep the cursor inside a column that shrank
    fn clamp(&mut self, len: usize) {
        match self.state.selected() {
            Some(_) if len == 0 => self.unselect(),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            _ => {}
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Pane {
    Pending,
    Completed,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputMode {
    Browsing,
    Form,
    /// Waiting on a yes/no before deleting this todo
    ConfirmDelete(Uuid),
}

/// All client state, owned by the ui loop.
///
/// Commands go out through the methods that return `Option<Command>`,
/// replies come back through `apply`. Nothing else mutates `todos`.
pub struct App {
    pub todos: Vec<Todo>,
    pub loading: bool,
    pub error: Option<String>,
    pub editing_todo: Option<Todo>,
    pub form: TodoForm,
    pub input_mode: InputMode,
    pub focus: Pane,
    pub pending: PaneSelection,
    pub completed: PaneSelection,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> App {
        App {
            todos: vec![],
            loading: false,
            error: None,
            editing_todo: None,
            form: TodoForm::default(),
            input_mode: InputMode::Browsing,
            focus: Pane::Pending,
            pending: PaneSelection::default(),
            completed: PaneSelection::default(),
        }
    }

    pub fn begin_fetch(&mut self) -> Command {
        self.loading = true;
        self.error = None;
        Command::FetchAll
    }

    /// Pending and completed todos, each in list order
    pub fn partition(&self) -> (Vec<&Todo>, Vec<&Todo>) {
        self.todos.iter().partition(|todo| !todo.completed)
    }

    pub fn summary(&self) -> String {
        let (pending, completed) = self.partition();

        format!("{} pending, {} completed", pending.len(), completed.len())
    }

    pub fn selected_todo(&self) -> Option<&Todo> {
        let (pending, completed) = self.partition();

        match self.focus {
            Pane::Pending => self.pending.selected().and_then(|i| pending.get(i).copied()),
            Pane::Completed => self
                .completed
                .selected()
                .and_then(|i| completed.get(i).copied()),
        }
    }

    pub fn select_next(&mut self) {
        let (pending, completed) = self.pane_lengths();
        match self.focus {
            Pane::Pending => self.pending.next(pending),
            Pane::Completed => self.completed.next(completed),
        }
    }

    pub fn select_previous(&mut self) {
        let (pending, completed) = self.pane_lengths();
        match self.focus {
            Pane::Pending => self.pending.previous(pending),
            Pane::Completed => self.completed.previous(completed),
        }
    }

    pub fn switch_pane(&mut self) {
        self.focus = match self.focus {
            Pane::Pending => Pane::Completed,
            Pane::Completed => Pane::Pending,
        };
    }

    pub fn open_form(&mut self) {
        self.input_mode = InputMode::Form;
    }

    /// Loads the todo into the form. Returns false if it is not in the list.
    pub fn start_edit(&mut self, todo_id: Uuid) -> bool {
        match self.todos.iter().find(|todo| todo.id == todo_id) {
            Some(todo) => {
                let todo = todo.clone();
                self.form.load(&todo);
                self.editing_todo = Some(todo);
                self.input_mode = InputMode::Form;
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing_todo = None;
        self.form.reset();
        self.input_mode = InputMode::Browsing;
    }

    /// Turns the form into a create or update command.
    /// `None` while either field is blank.
    pub fn submit_form(&mut self) -> Option<Command> {
        if !self.form.is_submittable() {
            return None;
        }

        self.input_mode = InputMode::Browsing;

        let name = self.form.name.clone();
        let task = self.form.task.clone();

        match &self.editing_todo {
            Some(todo) => Some(Command::Update(
                todo.id,
                UpdateTodoDTO {
                    name: Some(name),
                    task: Some(task),
                    completed: None,
                },
            )),
            None => Some(Command::Create(CreateTodoDTO::new(name, task))),
        }
    }

    pub fn toggle_complete(&self, todo_id: Uuid) -> Option<Command> {
        self.todos
            .iter()
            .find(|todo| todo.id == todo_id)
            .map(|todo| Command::Update(todo.id, UpdateTodoDTO::completed(!todo.completed)))
    }

    pub fn request_delete(&mut self, todo_id: Uuid) {
        self.input_mode = InputMode::ConfirmDelete(todo_id);
    }

    /// Answer to the delete prompt. Only a yes produces a command.
    pub fn confirm_delete(&mut self, confirmed: bool) -> Option<Command> {
        let pending = match self.input_mode {
            InputMode::ConfirmDelete(todo_id) => Some(todo_id),
            _ => None,
        };

        self.input_mode = InputMode::Browsing;

        pending.filter(|_| confirmed).map(Command::Delete)
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Reconciles local state with a reply.
    ///
    /// fetch replaces the list, create prepends, update replaces by id,
    /// delete removes by id. A failed reply only sets `error`.
    pub fn apply(&mut self, reply: Reply) {
        match reply {
            Reply::Fetched(result) => {
                self.loading = false;
                match result {
                    Ok(todos) => self.todos = todos,
                    Err(e) => self.fail(FETCH_FAILED, e),
                }
            }
            Reply::Created(result) => match result {
                Ok(todo) => {
                    self.todos.insert(0, todo);
                    self.form.reset();
                }
                Err(e) => self.fail(CREATE_FAILED, e),
            },
            Reply::Updated(result) => match result {
                Ok(updated) => {
                    if let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == updated.id) {
                        *todo = updated;
                    }
                    if self.editing_todo.take().is_some() {
                        self.form.reset();
                    }
                }
                Err(e) => self.fail(UPDATE_FAILED, e),
            },
            Reply::Deleted(todo_id, result) => match result {
                Ok(()) => {
                    self.todos.retain(|todo| todo.id != todo_id);
                    if self.editing_todo.as_ref().map(|todo| todo.id) == Some(todo_id) {
                        self.cancel_edit();
                    }
                }
                Err(e) => self.fail(DELETE_FAILED, e),
            },
        }

        let (pending, completed) = self.pane_lengths();
        self.pending.clamp(pending);
        self.completed.clamp(completed);
    }

    fn fail(&mut self, message: &str, e: TodoError) {
        log::debug!("{}: {}", message, e);
        self.error = Some(message.to_string());
    }

    fn pane_lengths(&self) -> (usize, usize) {
        let completed = self.todos.iter().filter(|todo| todo.completed).count();

        (self.todos.len() - completed, completed)
    }
}

#[cfg(test)]
mod app_test {
    use super::*;
    use crate::models::todo_model::{now, NewTodo};

    fn todo(name: &str, completed: bool) -> Todo {
        let mut todo = Todo::from_new(NewTodo::new(name, "task").unwrap(), now());
        todo.completed = completed;
        todo
    }

    fn failure() -> TodoError {
        TodoError::HttpError("connection refused".into())
    }

    fn loaded(todos: Vec<Todo>) -> App {
        let mut app = App::new();
        app.begin_fetch();
        app.apply(Reply::Fetched(Ok(todos)));
        app
    }

    #[test]
    fn test_fetch_replaces_list() {
        let mut app = App::new();

        assert_eq!(app.begin_fetch(), Command::FetchAll);
        assert!(app.loading);

        let todos = vec![todo("a", false), todo("b", true)];
        app.apply(Reply::Fetched(Ok(todos.clone())));

        assert!(!app.loading);
        assert_eq!(app.todos, todos);
        assert_eq!(app.error, None);
    }

    #[test]
    fn test_failed_fetch_keeps_list() {
        let existing = vec![todo("keep", false)];
        let mut app = loaded(existing.clone());

        app.begin_fetch();
        app.apply(Reply::Fetched(Err(failure())));

        assert!(!app.loading);
        assert_eq!(app.todos, existing);
        assert_eq!(app.error.as_deref(), Some(FETCH_FAILED));

        app.dismiss_error();
        assert_eq!(app.error, None);
    }

    #[test]
    fn test_create_prepends_and_resets_form() {
        let mut app = loaded(vec![todo("old", false)]);
        app.form.name = "Buy milk".into();
        app.form.task = "2% milk, 1 gallon".into();

        let command = app.submit_form();
        assert_eq!(
            command,
            Some(Command::Create(CreateTodoDTO::new(
                "Buy milk",
                "2% milk, 1 gallon"
            )))
        );

        let created = todo("Buy milk", false);
        app.apply(Reply::Created(Ok(created.clone())));

        assert_eq!(app.todos[0], created);
        assert_eq!(app.todos.len(), 2);
        assert_eq!(app.form, TodoForm::default());
    }

    #[test]
    fn test_failed_create_leaves_list() {
        let mut app = loaded(vec![todo("old", false)]);
        app.form.name = "new".into();
        app.form.task = "thing".into();

        app.submit_form();
        app.apply(Reply::Created(Err(failure())));

        assert_eq!(app.todos.len(), 1);
        assert_eq!(app.error.as_deref(), Some(CREATE_FAILED));
        assert_eq!(app.form.name, "new");
    }

    #[test]
    fn test_blank_form_is_blocked() {
        let mut app = App::new();
        app.open_form();
        app.form.name = "name".into();
        app.form.task = "   ".into();

        assert_eq!(app.submit_form(), None);
        assert_eq!(app.input_mode, InputMode::Form);
    }

    #[test]
    fn test_edit_submit_updates_by_id() {
        let first = todo("first", false);
        let second = todo("second", false);
        let mut app = loaded(vec![first.clone(), second.clone()]);

        assert!(app.start_edit(second.id));
        assert_eq!(app.form.name, "second");
        assert_eq!(app.input_mode, InputMode::Form);

        app.form.name = "renamed".into();
        let command = app.submit_form().unwrap();
        match &command {
            Command::Update(todo_id, body) => {
                assert_eq!(*todo_id, second.id);
                assert_eq!(body.name.as_deref(), Some("renamed"));
                assert_eq!(body.completed, None);
            }
            other => panic!("unexpected command {:?}", other),
        }

        let mut renamed = second.clone();
        renamed.name = "renamed".into();
        app.apply(Reply::Updated(Ok(renamed.clone())));

        assert_eq!(app.todos, vec![first, renamed]);
        assert_eq!(app.editing_todo, None);
        assert_eq!(app.form, TodoForm::default());
    }

    #[test]
    fn test_failed_update_stays_in_edit() {
        let item = todo("item", false);
        let mut app = loaded(vec![item.clone()]);

        app.start_edit(item.id);
        app.submit_form();
        app.apply(Reply::Updated(Err(failure())));

        assert_eq!(app.editing_todo, Some(item.clone()));
        assert_eq!(app.todos, vec![item]);
        assert_eq!(app.error.as_deref(), Some(UPDATE_FAILED));
    }

    #[test]
    fn test_cancel_edit_resets_form() {
        let item = todo("item", false);
        let mut app = loaded(vec![item.clone()]);

        app.start_edit(item.id);
        app.cancel_edit();

        assert_eq!(app.editing_todo, None);
        assert_eq!(app.form, TodoForm::default());
        assert_eq!(app.input_mode, InputMode::Browsing);
    }

    #[test]
    fn test_toggle_flips_completed() {
        let item = todo("item", false);
        let app = loaded(vec![item.clone()]);

        assert_eq!(
            app.toggle_complete(item.id),
            Some(Command::Update(item.id, UpdateTodoDTO::completed(true)))
        );
        assert_eq!(app.toggle_complete(Uuid::new_v4()), None);
    }

    #[test]
    fn test_toggle_keeps_create_text() {
        let item = todo("item", false);
        let mut app = loaded(vec![item.clone()]);
        app.form.name = "draft".into();

        let mut done = item.clone();
        done.completed = true;
        app.apply(Reply::Updated(Ok(done)));

        assert_eq!(app.form.name, "draft");
        let (pending, completed) = app.partition();
        assert!(pending.is_empty());
        assert_eq!(completed.len(), 1);
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let item = todo("item", false);
        let mut app = loaded(vec![item.clone()]);

        app.request_delete(item.id);
        assert_eq!(app.input_mode, InputMode::ConfirmDelete(item.id));
        assert_eq!(app.confirm_delete(false), None);
        assert_eq!(app.input_mode, InputMode::Browsing);
        assert_eq!(app.todos.len(), 1);

        app.request_delete(item.id);
        assert_eq!(app.confirm_delete(true), Some(Command::Delete(item.id)));

        app.apply(Reply::Deleted(item.id, Ok(())));
        assert!(app.todos.is_empty());
    }

    #[test]
    fn test_failed_delete_keeps_todo() {
        let item = todo("item", false);
        let mut app = loaded(vec![item.clone()]);

        app.apply(Reply::Deleted(item.id, Err(failure())));

        assert_eq!(app.todos, vec![item]);
        assert_eq!(app.error.as_deref(), Some(DELETE_FAILED));
    }

    #[test]
    fn test_partition_keeps_order() {
        let todos = vec![
            todo("p1", false),
            todo("c1", true),
            todo("p2", false),
            todo("c2", true),
        ];
        let app = loaded(todos);

        let (pending, completed) = app.partition();
        let pending: Vec<&str> = pending.iter().map(|t| t.name.as_str()).collect();
        let completed: Vec<&str> = completed.iter().map(|t| t.name.as_str()).collect();

        assert_eq!(pending, vec!["p1", "p2"]);
        assert_eq!(completed, vec!["c1", "c2"]);
        assert_eq!(app.summary(), "2 pending, 2 completed");
    }

    #[test]
    fn test_selection_follows_focus_and_clamps() {
        let todos = vec![todo("p1", false), todo("p2", false), todo("c1", true)];
        let mut app = loaded(todos.clone());

        app.select_next();
        app.select_next();
        assert_eq!(app.selected_todo().map(|t| t.name.as_str()), Some("p2"));

        app.switch_pane();
        app.select_next();
        assert_eq!(app.selected_todo().map(|t| t.name.as_str()), Some("c1"));

        app.switch_pane();
        app.apply(Reply::Deleted(todos[1].id, Ok(())));
        assert_eq!(app.selected_todo().map(|t| t.name.as_str()), Some("p1"));
    }
}
