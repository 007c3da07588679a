use crate::error::StructureError;
use crate::util::{FlattenTransactionResultExt, InspectTransactionError, RequireRecord};
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, TransactionTrait};
use shiken_core::layout::{PageLayout, SlotPosition};
use shiken_entity::quiz::slot::{self, Entity as SlotEntity, Model as SlotModel};
use std::error::Error;
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    /// Append a slot for `question_id`, or insert it at the end of an
    /// existing page. Without an explicit page the quiz's
    /// `questions_per_page` decides whether the last page still has room
    /// or a new one opens.
    pub async fn add_slot<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        quiz_id: &Uuid,
        question_id: &Uuid,
        page: Option<i32>,
    ) -> Result<SlotModel, StructureError> {
        let quiz_id = *quiz_id;
        let question_id = *question_id;
        conn.transaction(|conn| {
            Box::pin(async move {
                let quiz = crate::quiz::Query::get_quiz_by_id(conn, &quiz_id).await.require()?;
                let slots = super::Query::get_slots_by_quiz(conn, &quiz_id).await?;
                let mut layout = PageLayout::new(positions_of(&slots));
                let baseline = layout.slots().to_vec();

                let per_page = quiz.questions_per_page;
                let page = match page {
                    Some(page) => Some(page),
                    None if per_page > 0 && layout.last_page_len() >= per_page as usize => {
                        Some(layout.last_page() + 1)
                    }
                    None => None,
                };

                let id = Uuid::new_v4();
                let added = layout.add_slot(id, page)?;

                let inserted = slot::ActiveModel {
                    id: Set(id),
                    quiz_id: Set(quiz_id),
                    question_id: Set(question_id),
                    slot: Set(added.slot),
                    page: Set(added.page),
                }
                .insert(conn)
                .await?;

                let shifted = layout
                    .diff(&baseline)
                    .into_iter()
                    .filter(|position| position.id != id)
                    .collect();
                persist_positions(conn, shifted).await?;
                Ok(inserted)
            })
        })
        .await
        .inspect_transaction_err(|error| {
            tracing::error!(error = error as &dyn Error, %quiz_id, "failed to add slot");
        })
        .flatten_res()
    }

    /// Delete a slot, closing the ordinal gap and dropping an emptied
    /// page.
    pub async fn remove_slot<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        quiz_id: &Uuid,
        slot_id: &Uuid,
    ) -> Result<(), StructureError> {
        let quiz_id = *quiz_id;
        let slot_id = *slot_id;
        conn.transaction(|conn| {
            Box::pin(async move {
                let slots = super::Query::get_slots_by_quiz(conn, &quiz_id).await?;
                let mut layout = PageLayout::new(positions_of(&slots));
                let baseline = layout.slots().to_vec();

                let removed = layout.remove_slot(slot_id)?;
                SlotEntity::delete_by_id(removed.id).exec(conn).await?;
                persist_positions(conn, layout.diff(&baseline)).await?;
                Ok(())
            })
        })
        .await
        .inspect_transaction_err(|error| {
            tracing::error!(error = error as &dyn Error, %quiz_id, %slot_id, "failed to remove slot");
        })
        .flatten_res()
    }

    /// Reposition a slot directly after `after_id` (or first), on the
    /// given page.
    pub async fn move_slot<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        quiz_id: &Uuid,
        moving_id: &Uuid,
        after_id: Option<Uuid>,
        page: Option<i32>,
    ) -> Result<(), StructureError> {
        let quiz_id = *quiz_id;
        let moving_id = *moving_id;
        conn.transaction(|conn| {
            Box::pin(async move {
                let slots = super::Query::get_slots_by_quiz(conn, &quiz_id).await?;
                let mut layout = PageLayout::new(positions_of(&slots));
                let baseline = layout.slots().to_vec();

                layout.move_slot(moving_id, after_id, page)?;
                persist_positions(conn, layout.diff(&baseline)).await?;
                Ok(())
            })
        })
        .await
        .inspect_transaction_err(|error| {
            tracing::error!(error = error as &dyn Error, %quiz_id, %moving_id, "failed to move slot");
        })
        .flatten_res()
    }

    /// Remove the page break after `slot_number`.
    pub async fn link_slots<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        quiz_id: &Uuid,
        slot_number: i32,
    ) -> Result<(), StructureError> {
        Self::update_page_break(conn, quiz_id, slot_number, true).await
    }

    /// Insert a page break after `slot_number`.
    pub async fn unlink_slots<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        quiz_id: &Uuid,
        slot_number: i32,
    ) -> Result<(), StructureError> {
        Self::update_page_break(conn, quiz_id, slot_number, false).await
    }

    async fn update_page_break<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        quiz_id: &Uuid,
        slot_number: i32,
        link: bool,
    ) -> Result<(), StructureError> {
        let quiz_id = *quiz_id;
        conn.transaction(|conn| {
            Box::pin(async move {
                let slots = super::Query::get_slots_by_quiz(conn, &quiz_id).await?;
                let mut layout = PageLayout::new(positions_of(&slots));
                let baseline = layout.slots().to_vec();

                if link {
                    layout.link(slot_number)?;
                } else {
                    layout.unlink(slot_number)?;
                }
                persist_positions(conn, layout.diff(&baseline)).await?;
                Ok(())
            })
        })
        .await
        .inspect_transaction_err(|error| {
            tracing::error!(error = error as &dyn Error, %quiz_id, slot_number, link, "failed to update page break");
        })
        .flatten_res()
    }

    /// Evenly distribute all slots, `slots_per_page` at a time. `None`
    /// falls back to the quiz's `questions_per_page`; anything below 1
    /// puts the whole quiz on one page.
    pub async fn repaginate<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        quiz_id: &Uuid,
        slots_per_page: Option<i32>,
    ) -> Result<(), StructureError> {
        let quiz_id = *quiz_id;
        conn.transaction(|conn| {
            Box::pin(async move {
                let quiz = crate::quiz::Query::get_quiz_by_id(conn, &quiz_id).await.require()?;
                let slots = super::Query::get_slots_by_quiz(conn, &quiz_id).await?;
                let mut layout = PageLayout::new(positions_of(&slots));
                let baseline = layout.slots().to_vec();

                layout.distribute(slots_per_page.unwrap_or(quiz.questions_per_page));
                persist_positions(conn, layout.diff(&baseline)).await?;
                Ok(())
            })
        })
        .await
        .inspect_transaction_err(|error| {
            tracing::error!(error = error as &dyn Error, %quiz_id, "failed to repaginate quiz");
        })
        .flatten_res()
    }
}

fn positions_of(slots: &[SlotModel]) -> Vec<SlotPosition> {
    slots
        .iter()
        .map(|slot| SlotPosition {
            id: slot.id,
            slot: slot.slot,
            page: slot.page,
        })
        .collect()
}

async fn persist_positions<C: ConnectionTrait>(conn: &C, positions: Vec<SlotPosition>) -> Result<(), DbErr> {
    for position in positions {
        let row = slot::ActiveModel {
            id: Unchanged(position.id),
            slot: Set(position.slot),
            page: Set(position.page),
            ..Default::default()
        };
        row.update(conn).await?;
    }
    Ok(())
}
