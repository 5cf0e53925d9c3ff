use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClassSection {
    pub id: i32,
    pub class_name: String,
    pub section_name: String,
}

impl ClassSection {
    pub fn label(&self) -> String {
        format!("{}-{}", self.class_name, self.section_name)
    }
}
