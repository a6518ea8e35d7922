//! Todo entity <-> model mapper

use todo_core::entities::Todo;
use todo_core::error::DomainError;

use crate::models::TodoModel;

/// Convert TodoModel to Todo entity; fails on a state the domain does not know
impl TryFrom<TodoModel> for Todo {
    type Error = DomainError;

    fn try_from(model: TodoModel) -> Result<Self, Self::Error> {
        Ok(Todo {
            id: model.id,
            title: model.title,
            description: model.description,
            state: model.state.parse()?,
            user_id: model.user_id,
        })
    }
}
