pub mod app;
pub mod form;
pub mod todo_list_renderer;
