use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::quiz::slot::Slot;

#[derive(Deserialize, Serialize, ToSchema, Clone)]
pub struct Quiz {
    pub id: Uuid,
    pub name: String,
    pub questions_per_page: i32,
    pub created_at: chrono::NaiveDateTime,
}

impl Quiz {
    /// Group a quiz's slots (ordered by slot number) into their display
    /// pages for the editing view.
    #[must_use]
    pub fn as_structure<'a>(&'a self, slots: Vec<&'a Slot>) -> QuizStructure<'a> {
        let mut pages: Vec<StructurePage<'a>> = Vec::new();
        for slot in slots {
            match pages.last_mut() {
                Some(page) if page.page == slot.page => page.slots.push(slot),
                _ => pages.push(StructurePage {
                    page: slot.page,
                    slots: vec![slot],
                }),
            }
        }
        QuizStructure {
            id: &self.id,
            name: &self.name,
            questions_per_page: self.questions_per_page,
            created_at: self.created_at,
            pages,
        }
    }
}

#[derive(ToSchema, Serialize, Clone)]
pub struct StructurePage<'a> {
    pub page: i32,
    pub slots: Vec<&'a Slot>,
}

#[derive(ToSchema, Serialize, Clone)]
pub struct QuizStructure<'a> {
    pub id: &'a Uuid,
    pub name: &'a str,
    pub questions_per_page: i32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<StructurePage<'a>>,
    pub created_at: chrono::NaiveDateTime,
}
