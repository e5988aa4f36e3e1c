use crate::domain::models::Todo as DomainTodo;
use shared::Todo as SharedTodo;

/// Mapper to convert domain Todo models into shared Todo DTOs.
pub struct TodoMapper;

impl TodoMapper {
    pub fn to_dto(domain: DomainTodo) -> SharedTodo {
        SharedTodo {
            id: domain.id,
            name: domain.name,
            description: domain.description,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
            start_date_at: domain.start_date_at,
            due_date_at: domain.due_date_at,
            status: domain.status,
        }
    }

    pub fn to_dto_list(domain_todos: Vec<DomainTodo>) -> Vec<SharedTodo> {
        domain_todos.into_iter().map(Self::to_dto).collect()
    }
}
