use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Company-wide holiday, not scoped to any employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Holiday {
    #[schema(example = 3)]
    pub id: u64,

    #[schema(example = "2024-03-25")]
    pub date: String,

    #[schema(example = "Holi")]
    pub name: String,
}
