//! Todo service
//!
//! CRUD over todos, always scoped to the authenticated owner.

use todo_core::entities::{NewTodo, TodoChanges, User};
use todo_core::error::DomainError;
use todo_core::{PageRequest, TodoFilter};
use tracing::{info, instrument};

use crate::dto::{CreateTodoRequest, Message, TodoList, TodoPublic, UpdateTodoRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Todo service
pub struct TodoService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TodoService<'a> {
    /// Create a new TodoService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a todo owned by `current`
    #[instrument(skip(self, current, request), fields(user_id = current.id))]
    pub async fn create_todo(
        &self,
        current: &User,
        request: CreateTodoRequest,
    ) -> ServiceResult<TodoPublic> {
        let todo = self
            .ctx
            .todo_repo()
            .create(&NewTodo {
                title: request.title,
                description: request.description,
                state: request.state,
                user_id: current.id,
            })
            .await?;

        info!(todo_id = todo.id, "Todo created");
        Ok(TodoPublic::from(todo))
    }

    /// Fetch one of the caller's todos
    #[instrument(skip(self, current), fields(user_id = current.id))]
    pub async fn get_todo(&self, current: &User, todo_id: i64) -> ServiceResult<TodoPublic> {
        let todo = self
            .ctx
            .todo_repo()
            .find_for_user(todo_id, current.id)
            .await?
            .ok_or(DomainError::TodoNotFound(todo_id))?;

        Ok(TodoPublic::from(todo))
    }

    /// List the caller's todos
    #[instrument(skip(self, current), fields(user_id = current.id))]
    pub async fn list_todos(
        &self,
        current: &User,
        filter: &TodoFilter,
        page: PageRequest,
    ) -> ServiceResult<TodoList> {
        let todos = self
            .ctx
            .todo_repo()
            .list_for_user(current.id, filter, page)
            .await?;

        Ok(TodoList {
            todos: todos.into_iter().map(TodoPublic::from).collect(),
        })
    }

    /// Apply a partial update to one of the caller's todos
    #[instrument(skip(self, current, request), fields(user_id = current.id))]
    pub async fn update_todo(
        &self,
        current: &User,
        todo_id: i64,
        request: UpdateTodoRequest,
    ) -> ServiceResult<TodoPublic> {
        let mut todo = self
            .ctx
            .todo_repo()
            .find_for_user(todo_id, current.id)
            .await?
            .ok_or(DomainError::TodoNotFound(todo_id))?;

        let changes = TodoChanges::from(request);
        if changes.is_empty() {
            return Ok(TodoPublic::from(todo));
        }

        todo.apply(changes);
        let updated = self.ctx.todo_repo().update(&todo).await?;

        info!(todo_id, "Todo updated");
        Ok(TodoPublic::from(updated))
    }

    /// Delete one of the caller's todos
    #[instrument(skip(self, current), fields(user_id = current.id))]
    pub async fn delete_todo(&self, current: &User, todo_id: i64) -> ServiceResult<Message> {
        if !self.ctx.todo_repo().delete(todo_id, current.id).await? {
            return Err(DomainError::TodoNotFound(todo_id).into());
        }

        info!(todo_id, "Todo deleted");
        Ok(Message::new("Todo deleted successfully"))
    }
}
