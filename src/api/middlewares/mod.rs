pub mod cors;
pub mod todo_id;
