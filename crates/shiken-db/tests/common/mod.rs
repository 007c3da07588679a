use sea_orm::{Database, DatabaseConnection};
use shiken_entity::quiz::quiz::Model as QuizModel;
use shiken_test_helpers::{SqliteDb, TestDb};
use uuid::Uuid;

/// A migrated throwaway database. Keep the returned [`SqliteDb`] alive for
/// the duration of the test, dropping it deletes the backing file.
pub async fn connect() -> (SqliteDb, DatabaseConnection) {
    let db = SqliteDb::new().unwrap();
    let conn = Database::connect(db.db_uri().as_ref()).await.unwrap();
    shiken_db::migration::migrate(&conn).await.unwrap();
    (db, conn)
}

pub async fn create_quiz_with_slots(
    conn: &DatabaseConnection,
    questions_per_page: i32,
    slots: usize,
) -> QuizModel {
    let quiz = shiken_db::quiz::Mutation::create_quiz(conn, "algebra check-in", questions_per_page)
        .await
        .unwrap();
    for _ in 0..slots {
        shiken_db::slot::Mutation::add_slot(conn, &quiz.id, &Uuid::new_v4(), None)
            .await
            .unwrap();
    }
    quiz
}

pub async fn pages(conn: &DatabaseConnection, quiz_id: &Uuid) -> Vec<i32> {
    shiken_db::slot::Query::get_slots_by_quiz(conn, quiz_id)
        .await
        .unwrap()
        .into_iter()
        .map(|slot| slot.page)
        .collect()
}
