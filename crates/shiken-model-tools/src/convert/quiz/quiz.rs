use shiken_entity::quiz::quiz::Model as QuizModel;
use shiken_model::quiz::quiz::Quiz;

use crate::convert::FromDbModel;

impl FromDbModel<QuizModel> for Quiz {
    fn from_db_model(model: QuizModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            questions_per_page: model.questions_per_page,
            created_at: model.created_at,
        }
    }
}
