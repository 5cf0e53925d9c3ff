use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Teacher {
    pub id: i32,
    pub name: String,
    pub subject: String,
}

impl Teacher {
    pub fn label(&self) -> String {
        format!("{} — {}", self.name, self.subject)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Staff {
    pub id: i32,
    pub name: String,
    pub role: String,
}

impl Staff {
    pub fn label(&self) -> String {
        format!("{} — {}", self.name, self.role)
    }
}
