use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
use shiken_entity::quiz::{quiz, slot};
use test_log::test;
use uuid::Uuid;

#[test(tokio::test)]
async fn test_get_slots_by_quiz() -> Result<(), DbErr> {
    let quiz_id = Uuid::new_v4();
    let models = [
        slot::Model {
            id: Uuid::new_v4(),
            quiz_id,
            question_id: Uuid::new_v4(),
            slot: 1,
            page: 1,
        },
        slot::Model {
            id: Uuid::new_v4(),
            quiz_id,
            question_id: Uuid::new_v4(),
            slot: 2,
            page: 1,
        },
    ];
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([models.clone()])
        .into_connection();

    assert_eq!(
        shiken_db::slot::Query::get_slots_by_quiz(&db, &quiz_id).await?,
        Vec::from(models)
    );

    Ok(())
}

#[test(tokio::test)]
async fn test_get_quiz_by_id_missing() -> Result<(), DbErr> {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<quiz::Model>::new()])
        .into_connection();

    assert_eq!(shiken_db::quiz::Query::get_quiz_by_id(&db, &Uuid::new_v4()).await?, None);

    Ok(())
}
