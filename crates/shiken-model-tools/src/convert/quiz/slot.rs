use shiken_entity::quiz::slot::Model as SlotModel;
use shiken_model::quiz::slot::Slot;

use crate::convert::FromDbModel;

impl FromDbModel<SlotModel> for Slot {
    fn from_db_model(model: SlotModel) -> Self {
        Self {
            id: model.id,
            quiz_id: model.quiz_id,
            question_id: model.question_id,
            slot: model.slot,
            page: model.page,
        }
    }
}
