//! PostgreSQL implementation of TodoRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use todo_core::entities::{NewTodo, Todo};
use todo_core::traits::{RepoResult, TodoRepository};
use todo_core::value_objects::{PageRequest, TodoFilter};

use crate::models::TodoModel;

use super::error::{map_db_error, todo_not_found};

/// PostgreSQL implementation of TodoRepository
#[derive(Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    /// Create a new PgTodoRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build the filtered listing query for one owner.
///
/// Substring matches use `strpos` so `%` and `_` in the needle are literal.
fn list_query<'a>(
    user_id: i64,
    filter: &'a TodoFilter,
    page: PageRequest,
) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new(
        "SELECT id, title, description, state, user_id FROM todos WHERE user_id = ",
    );
    qb.push_bind(user_id);

    if let Some(title) = filter.title.as_deref() {
        qb.push(" AND strpos(title, ").push_bind(title).push(") > 0");
    }
    if let Some(description) = filter.description.as_deref() {
        qb.push(" AND strpos(description, ")
            .push_bind(description)
            .push(") > 0");
    }
    if let Some(state) = filter.state {
        qb.push(" AND state = ").push_bind(state.as_str());
    }

    qb.push(" ORDER BY id OFFSET ")
        .push_bind(page.offset())
        .push(" LIMIT ")
        .push_bind(page.limit());
    qb
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    #[instrument(skip(self, todo), fields(user_id = todo.user_id))]
    async fn create(&self, todo: &NewTodo) -> RepoResult<Todo> {
        let row = sqlx::query_as::<_, TodoModel>(
            r"
            INSERT INTO todos (title, description, state, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, state, user_id
            ",
        )
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.state.as_str())
        .bind(todo.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Todo::try_from(row)
    }

    #[instrument(skip(self))]
    async fn find_for_user(&self, id: i64, user_id: i64) -> RepoResult<Option<Todo>> {
        let row = sqlx::query_as::<_, TodoModel>(
            r"
            SELECT id, title, description, state, user_id
            FROM todos
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(Todo::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_for_user(
        &self,
        user_id: i64,
        filter: &TodoFilter,
        page: PageRequest,
    ) -> RepoResult<Vec<Todo>> {
        let rows = list_query(user_id, filter, page)
            .build_query_as::<TodoModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(Todo::try_from).collect()
    }

    #[instrument(skip(self, todo), fields(todo_id = todo.id, user_id = todo.user_id))]
    async fn update(&self, todo: &Todo) -> RepoResult<Todo> {
        let row = sqlx::query_as::<_, TodoModel>(
            r"
            UPDATE todos
            SET title = $3, description = $4, state = $5
            WHERE id = $1 AND user_id = $2
            RETURNING id, title, description, state, user_id
            ",
        )
        .bind(todo.id)
        .bind(todo.user_id)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.state.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.ok_or_else(|| todo_not_found(todo.id))
            .and_then(Todo::try_from)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64, user_id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
