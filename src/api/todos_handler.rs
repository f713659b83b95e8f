use actix_web::{web, HttpResponse};

use super::dtos::todo::{CreateTodoDTO, DeleteTodoResponseDTO, UpdateTodoDTO};
use super::middlewares::todo_id::TodoId;
use crate::models::todo_store::TodoStore;

/// Api handler for listing every todo, oldest first
pub async fn get_todos(store: web::Data<dyn TodoStore>) -> Result<HttpResponse, actix_web::Error> {
    let list = web::block(move || store.list()).await??;

    Ok(HttpResponse::Ok().json(&list))
}

/// Get a single todo
pub async fn get_todo(
    todo_id: TodoId,
    store: web::Data<dyn TodoStore>,
) -> Result<HttpResponse, actix_web::Error> {
    let todo = web::block(move || store.find(*todo_id)).await??;

    Ok(HttpResponse::Ok().json(&todo))
}

/// Create a new todo
pub async fn create_todo(
    request_data: web::Json<CreateTodoDTO>,
    store: web::Data<dyn TodoStore>,
) -> Result<HttpResponse, actix_web::Error> {
    let new_todo = request_data.into_inner().into_new_todo()?;

    let inserted = web::block(move || store.insert(new_todo)).await??;

    log::debug!("Created todo {}", inserted.id);

    Ok(HttpResponse::Created().json(&inserted))
}

/// Update any of a todo's name, task or completeness
pub async fn update_todo(
    todo_id: TodoId,
    request_data: web::Json<UpdateTodoDTO>,
    store: web::Data<dyn TodoStore>,
) -> Result<HttpResponse, actix_web::Error> {
    let changes = request_data.into_inner().into_changes()?;

    let updated = web::block(move || store.update(*todo_id, changes)).await??;

    Ok(HttpResponse::Ok().json(&updated))
}

/// Api to Delete a TODO
pub async fn delete_todo(
    todo_id: TodoId,
    store: web::Data<dyn TodoStore>,
) -> Result<HttpResponse, actix_web::Error> {
    web::block(move || store.remove(*todo_id)).await??;

    log::debug!("Deleted todo {}", *todo_id);

    Ok(HttpResponse::Ok().json(&DeleteTodoResponseDTO {
        message: String::from("Todo removed"),
        id: *todo_id,
    }))
}
