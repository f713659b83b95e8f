use anyhow::{bail, Context};
use inquire::{Confirm, Text};
use uuid::Uuid;

use crate::{
    api::dtos::todo::{CreateTodoDTO, UpdateTodoDTO},
    client::TodoClient,
    models::todo_model::Todo,
    ui::{app::FETCH_FAILED, form::TodoForm},
    utils::format_timestamp,
};

/// Prompt user to create new todo
pub fn create_new_todo(client: &TodoClient) -> anyhow::Result<()> {
    let name = Text::new("Name")
        .with_help_message("Short title for your new todo")
        .prompt()?;

    let task = Text::new("Task")
        .with_help_message("What needs doing")
        .prompt()?;

    let form = TodoForm {
        name,
        task,
        ..Default::default()
    };

    if !form.is_submittable() {
        bail!("Both name and task are required");
    }

    let todo = client
        .create_todo(&CreateTodoDTO::new(form.name, form.task))
        .context("Failed to add todo")?;

    println!("Created {}", todo.id);

    Ok(())
}

/// Prompt for new values, current ones pre-filled
pub fn edit_todo(client: &TodoClient, todo_id: Uuid) -> anyhow::Result<()> {
    let todo = client.get_todo(todo_id)?;

    let name = Text::with_default(Text::new("Name"), &todo.name).prompt()?;

    let task = Text::with_default(Text::new("Task"), &todo.task).prompt()?;

    let form = TodoForm {
        name,
        task,
        ..Default::default()
    };

    if !form.is_submittable() {
        bail!("Both name and task are required");
    }

    let body = UpdateTodoDTO {
        name: Some(form.name),
        task: Some(form.task),
        completed: None,
    };

    client
        .update_todo(todo_id, &body)
        .context("Failed to update todo")?;

    println!("Updated {}", todo_id);

    Ok(())
}

/// Flip a todo between pending and completed
pub fn toggle_todo(client: &TodoClient, todo_id: Uuid) -> anyhow::Result<()> {
    let todo = client.get_todo(todo_id)?;

    let updated = client
        .update_todo(todo_id, &UpdateTodoDTO::completed(!todo.completed))
        .context("Failed to update todo")?;

    println!("{} is now {}", updated.name, status_label(&updated));

    Ok(())
}

pub fn delete_todo(client: &TodoClient, todo_id: Uuid) -> anyhow::Result<()> {
    let confirmed = Confirm::new("Are you sure you want to delete this todo?")
        .with_default(false)
        .prompt()?;

    if !confirmed {
        println!("Kept {}", todo_id);
        return Ok(());
    }

    let response = client
        .delete_todo(todo_id)
        .context("Failed to delete todo")?;

    println!("{}", response.message);

    Ok(())
}

pub fn show_todo(client: &TodoClient, todo_id: Uuid) -> anyhow::Result<()> {
    match client.get_todo(todo_id) {
        Ok(todo) => println!("{}", format_todo(&todo)),
        Err(e) if e.is_not_found() => println!("No todo with id {}", todo_id),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// List all the todos
pub fn list_todos(client: &TodoClient) -> anyhow::Result<()> {
    let todos = client.list_todos().context(FETCH_FAILED)?;

    print!("{}", format_todo_list(&todos));

    Ok(())
}

fn status_label(todo: &Todo) -> &'static str {
    if todo.completed {
        "completed"
    } else {
        "pending"
    }
}

fn format_todo(todo: &Todo) -> String {
    let mark = if todo.completed { "x" } else { " " };

    let mut out = format!(
        "[{}] {}\n    {}\n    id: {}\n    Created: {}",
        mark,
        todo.name,
        todo.task,
        todo.id,
        format_timestamp(&todo.created_at)
    );

    if todo.updated_at != todo.created_at {
        out.push_str(&format!("  Updated: {}", format_timestamp(&todo.updated_at)));
    }

    out
}

/// Plain text board: pending first, then completed, list order kept
pub fn format_todo_list(todos: &[Todo]) -> String {
    if todos.is_empty() {
        return String::from("No todos yet. Add your first todo with `create`.\n");
    }

    let (pending, completed): (Vec<&Todo>, Vec<&Todo>) =
        todos.iter().partition(|todo| !todo.completed);

    let mut out = format!(
        "Your Todos: {} pending, {} completed\n",
        pending.len(),
        completed.len()
    );

    for (title, group) in [("Pending Tasks", &pending), ("Completed Tasks", &completed)] {
        if group.is_empty() {
            continue;
        }

        out.push_str(&format!("\n{} ({})\n", title, group.len()));

        for todo in group.iter() {
            out.push_str(&format_todo(todo));
            out.push('\n');
        }
    }

    out
}
