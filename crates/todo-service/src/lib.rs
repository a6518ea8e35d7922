//! # todo-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    CreateTodoRequest, HealthResponse, ListTodosQuery, LoginRequest, Message, PageQuery,
    ReadinessResponse, TodoList, TodoPublic, TokenResponse, UpdateTodoRequest, UserList,
    UserPublic, UserSchema,
};
pub use services::{
    AuthService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    TodoService, UserService,
};
