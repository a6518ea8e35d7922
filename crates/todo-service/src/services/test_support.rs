//! In-memory repositories and fixtures for service tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::Algorithm;
use todo_common::{hash_password, JwtService};
use todo_core::entities::{NewTodo, Todo, User};
use todo_core::error::DomainError;
use todo_core::traits::{RepoResult, TodoRepository, UserRepository};
use todo_core::value_objects::{PageRequest, TodoFilter};

use super::context::ServiceContext;

pub const SECRET: &str = "test-secret-key";

fn window<T: Clone>(items: &[T], page: PageRequest) -> Vec<T> {
    items
        .iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .cloned()
        .collect()
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<(User, String)>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|(u, _)| u.email == email).map(|(u, _)| u.clone()))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|(u, _)| u.username == username)
            .map(|(u, _)| u.clone()))
    }

    async fn list(&self, page: PageRequest) -> RepoResult<Vec<User>> {
        let rows = self.rows.lock().unwrap();
        let users: Vec<User> = rows.iter().map(|(u, _)| u.clone()).collect();
        Ok(window(&users, page))
    }

    async fn create(&self, username: &str, email: &str, password_hash: &str) -> RepoResult<User> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|(u, _)| u.username == username) {
            return Err(DomainError::UsernameAlreadyExists);
        }
        if rows.iter().any(|(u, _)| u.email == email) {
            return Err(DomainError::EmailAlreadyExists);
        }

        let now = Utc::now();
        let user = User {
            id: rows.last().map_or(1, |(u, _)| u.id + 1),
            username: username.to_string(),
            email: email.to_string(),
            created_at: now,
            updated_at: now,
        };
        rows.push((user.clone(), password_hash.to_string()));
        Ok(user)
    }

    async fn update(&self, user: &User, password_hash: &str) -> RepoResult<User> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|(u, _)| {
            u.id != user.id && (u.username == user.username || u.email == user.email)
        }) {
            return Err(DomainError::UserConflict);
        }

        let row = rows
            .iter_mut()
            .find(|(u, _)| u.id == user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        *row = (user.clone(), password_hash.to_string());
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|(u, _)| u.id != id);
        if rows.len() == before {
            return Err(DomainError::UserNotFound(id));
        }
        Ok(())
    }

    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|(u, _)| u.id == id).map(|(_, h)| h.clone()))
    }
}

#[derive(Default)]
pub struct InMemoryTodoRepository {
    rows: Mutex<Vec<Todo>>,
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, todo: &NewTodo) -> RepoResult<Todo> {
        let mut rows = self.rows.lock().unwrap();
        let todo = Todo {
            id: rows.last().map_or(1, |t| t.id + 1),
            title: todo.title.clone(),
            description: todo.description.clone(),
            state: todo.state,
            user_id: todo.user_id,
        };
        rows.push(todo.clone());
        Ok(todo)
    }

    async fn find_for_user(&self, id: i64, user_id: i64) -> RepoResult<Option<Todo>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|t| t.id == id && t.user_id == user_id)
            .cloned())
    }

    async fn list_for_user(
        &self,
        user_id: i64,
        filter: &TodoFilter,
        page: PageRequest,
    ) -> RepoResult<Vec<Todo>> {
        let rows = self.rows.lock().unwrap();
        let owned: Vec<Todo> = rows
            .iter()
            .filter(|t| t.user_id == user_id && filter.matches(t))
            .cloned()
            .collect();
        Ok(window(&owned, page))
    }

    async fn update(&self, todo: &Todo) -> RepoResult<Todo> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|t| t.id == todo.id && t.user_id == todo.user_id)
            .ok_or(DomainError::TodoNotFound(todo.id))?;
        *row = todo.clone();
        Ok(todo.clone())
    }

    async fn delete(&self, id: i64, user_id: i64) -> RepoResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| !(t.id == id && t.user_id == user_id));
        Ok(rows.len() < before)
    }
}

pub fn test_context_with_ttl(ttl_minutes: i64) -> ServiceContext {
    ServiceContext::new(
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(InMemoryTodoRepository::default()),
        Arc::new(JwtService::new(SECRET, Algorithm::HS256, ttl_minutes)),
    )
}

pub fn test_context() -> ServiceContext {
    test_context_with_ttl(30)
}

/// Insert a user with a real Argon2 hash of `password`
pub async fn seed_user(ctx: &ServiceContext, username: &str, email: &str, password: &str) -> User {
    let hash = hash_password(password).unwrap();
    ctx.user_repo().create(username, email, &hash).await.unwrap()
}
