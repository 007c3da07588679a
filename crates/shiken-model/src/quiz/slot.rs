use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, Serialize, ToSchema, Clone, PartialEq, Eq)]
pub struct Slot {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub question_id: Uuid,
    pub slot: i32,
    pub page: i32,
}
