use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use shiken_entity::quiz::slot::{self, Entity as Slot, Model as SlotModel};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    /// All slots of a quiz, ordered by slot number. Every structural
    /// operation starts from this ordering.
    pub async fn get_slots_by_quiz<C: ConnectionTrait>(conn: &C, quiz_id: &Uuid) -> Result<Vec<SlotModel>, DbErr> {
        Slot::find()
            .filter(slot::Column::QuizId.eq(*quiz_id))
            .order_by_asc(slot::Column::Slot)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %quiz_id, "failed to load slots");
            })
    }

    pub async fn get_slot_by_id<C: ConnectionTrait>(conn: &C, slot_id: &Uuid) -> Result<Option<SlotModel>, DbErr> {
        Slot::find()
            .filter(slot::Column::Id.eq(*slot_id))
            .one(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %slot_id, "failed to load slot by id");
            })
    }
}
