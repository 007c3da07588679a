use uuid::Uuid;

pub mod error;

use error::LayoutError;

/// The position of one slot within a quiz: its 1-based ordinal and the
/// 1-based display page it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPosition {
    pub id: Uuid,
    pub slot: i32,
    pub page: i32,
}

/// An ordered sequence of slots partitioned into display pages.
///
/// All operations assume the stored invariants: slot numbers within a quiz
/// are exactly {1..N}, and page numbers are non-decreasing in slot order
/// with no gap greater than 1 between consecutive distinct values. Input
/// violating these is a caller bug and is not detected here; every
/// mutation re-establishes the invariants on its own output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageLayout {
    slots: Vec<SlotPosition>,
}

impl PageLayout {
    pub fn new(mut slots: Vec<SlotPosition>) -> Self {
        slots.sort_by_key(|position| position.slot);
        Self { slots }
    }

    pub fn slots(&self) -> &[SlotPosition] {
        &self.slots
    }

    pub fn into_slots(self) -> Vec<SlotPosition> {
        self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// The highest page number in use, 0 for an empty quiz.
    pub fn last_page(&self) -> i32 {
        self.slots.last().map_or(0, |position| position.page)
    }

    /// Number of slots on the last page, 0 for an empty quiz.
    pub fn last_page_len(&self) -> usize {
        let last_page = self.last_page();
        self.slots
            .iter()
            .rev()
            .take_while(|position| position.page == last_page)
            .count()
    }

    /// Remove the page break after `slot_number`: the following slot joins
    /// this slot's page and every later slot's page shifts down by one,
    /// preserving grouping. A no-op when the two slots already share a
    /// page.
    pub fn link(&mut self, slot_number: i32) -> Result<(), LayoutError> {
        let here = self.index_of_number(slot_number)?;
        let next = self.index_of_number(slot_number + 1)?;
        if self.slots[next].page == self.slots[here].page {
            return Ok(());
        }
        for position in &mut self.slots[next..] {
            position.page -= 1;
        }
        Ok(())
    }

    /// Insert a page break after `slot_number`: the following slot starts
    /// a new page one greater and every later slot's page shifts up by
    /// one. A no-op when the break already exists.
    pub fn unlink(&mut self, slot_number: i32) -> Result<(), LayoutError> {
        let here = self.index_of_number(slot_number)?;
        let next = self.index_of_number(slot_number + 1)?;
        if self.slots[next].page != self.slots[here].page {
            return Ok(());
        }
        for position in &mut self.slots[next..] {
            position.page += 1;
        }
        Ok(())
    }

    /// Reassign pages so that every `per_page` consecutive slots share
    /// one. Anything below 1 puts the whole quiz on a single page.
    pub fn distribute(&mut self, per_page: i32) {
        for position in &mut self.slots {
            position.page = if per_page <= 0 {
                1
            } else {
                (position.slot - 1) / per_page + 1
            };
        }
    }

    /// Reposition `moving_id` immediately after `after_id` (first when
    /// `None`), renumber the ordinals, put the moving slot on `page`
    /// (values below 1, and `None`, mean page 1) and compact the page
    /// sequence.
    pub fn move_slot(
        &mut self,
        moving_id: Uuid,
        after_id: Option<Uuid>,
        page: Option<i32>,
    ) -> Result<(), LayoutError> {
        let from = self.index_of_id(moving_id)?;
        let anchor = after_id.map(|id| self.index_of_id(id)).transpose()?;

        let mut moving = self.slots.remove(from);
        moving.page = page.filter(|page| *page >= 1).unwrap_or(1);

        // Anchor indices at or past the removal point shifted down by one.
        let at = match anchor {
            Some(index) if index >= from => index,
            Some(index) => index + 1,
            None => 0,
        };
        self.slots.insert(at, moving);

        self.renumber_slots();
        self.renumber_pages();
        Ok(())
    }

    /// Append or insert a new slot.
    ///
    /// `None` appends on the last page (page 1 when the quiz is empty).
    /// An existing page inserts after that page's final slot, shifting
    /// later ordinals up. `last_page + 1` opens a new trailing page.
    pub fn add_slot(&mut self, id: Uuid, page: Option<i32>) -> Result<SlotPosition, LayoutError> {
        let last_page = self.last_page();
        let (at, page) = match page {
            None => (self.slots.len(), last_page.max(1)),
            Some(page) if page >= 1 && page <= last_page => {
                let end_of_page = self
                    .slots
                    .iter()
                    .rposition(|position| position.page == page)
                    .map_or(0, |index| index + 1);
                (end_of_page, page)
            }
            Some(page) if page == last_page + 1 => (self.slots.len(), page),
            Some(page) => return Err(LayoutError::InvalidPage(page)),
        };

        self.slots.insert(at, SlotPosition { id, slot: 0, page });
        self.renumber_slots();
        Ok(self.slots[at])
    }

    /// Delete a slot, close the ordinal gap and drop its page if that
    /// leaves the page empty.
    pub fn remove_slot(&mut self, id: Uuid) -> Result<SlotPosition, LayoutError> {
        let at = self.index_of_id(id)?;
        let removed = self.slots.remove(at);
        self.renumber_slots();
        self.renumber_pages();
        Ok(removed)
    }

    /// Normalization pass: walk the slots in order and assign a fresh
    /// contiguous page number whenever the raw page value changes from
    /// the previous slot. Slot order is untouched.
    pub fn renumber_pages(&mut self) {
        let mut previous = None;
        let mut page = 0;
        for position in &mut self.slots {
            if previous != Some(position.page) {
                previous = Some(position.page);
                page += 1;
            }
            position.page = page;
        }
    }

    /// The positions whose ordinal or page changed relative to a baseline
    /// snapshot, plus any position the baseline does not know. Lets the
    /// persistence layer update exactly the touched rows.
    pub fn diff(&self, baseline: &[SlotPosition]) -> Vec<SlotPosition> {
        self.slots
            .iter()
            .filter(|position| {
                baseline
                    .iter()
                    .find(|before| before.id == position.id)
                    .is_none_or(|before| before.slot != position.slot || before.page != position.page)
            })
            .copied()
            .collect()
    }

    fn renumber_slots(&mut self) {
        for (index, position) in self.slots.iter_mut().enumerate() {
            position.slot = index as i32 + 1;
        }
    }

    fn index_of_number(&self, slot_number: i32) -> Result<usize, LayoutError> {
        self.slots
            .iter()
            .position(|position| position.slot == slot_number)
            .ok_or(LayoutError::SlotNumberNotFound(slot_number))
    }

    fn index_of_id(&self, id: Uuid) -> Result<usize, LayoutError> {
        self.slots
            .iter()
            .position(|position| position.id == id)
            .ok_or(LayoutError::SlotNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn layout(pages: &[i32]) -> PageLayout {
        PageLayout::new(
            pages
                .iter()
                .enumerate()
                .map(|(index, page)| SlotPosition {
                    id: Uuid::new_v4(),
                    slot: index as i32 + 1,
                    page: *page,
                })
                .collect(),
        )
    }

    fn pages(layout: &PageLayout) -> Vec<i32> {
        layout.slots().iter().map(|position| position.page).collect()
    }

    fn numbers(layout: &PageLayout) -> Vec<i32> {
        layout.slots().iter().map(|position| position.slot).collect()
    }

    fn assert_invariants(layout: &PageLayout) {
        assert_eq!(numbers(layout), (1..=layout.len() as i32).collect::<Vec<_>>());
        let mut previous = 0;
        for page in pages(layout) {
            assert!(
                page == previous || page == previous + 1,
                "pages not contiguous: {:?}",
                pages(layout)
            );
            previous = page;
        }
    }

    #[test]
    fn link_merges_the_following_page() {
        let mut layout = layout(&[1, 1, 2, 2, 3]);
        layout.link(2).unwrap();
        assert_eq!(pages(&layout), vec![1, 1, 1, 1, 2]);
    }

    #[test]
    fn link_is_a_noop_within_a_page() {
        let mut layout = layout(&[1, 1, 2]);
        layout.link(1).unwrap();
        assert_eq!(pages(&layout), vec![1, 1, 2]);
    }

    #[test]
    fn link_requires_both_slots() {
        let mut layout = layout(&[1, 1]);
        assert_eq!(layout.link(2), Err(LayoutError::SlotNumberNotFound(3)));
        assert_eq!(layout.link(7), Err(LayoutError::SlotNumberNotFound(7)));
    }

    #[test]
    fn unlink_starts_a_new_page() {
        let mut layout = layout(&[1, 1, 1]);
        layout.unlink(1).unwrap();
        assert_eq!(pages(&layout), vec![1, 2, 2]);
    }

    #[test]
    fn unlink_is_a_noop_on_an_existing_break() {
        let mut layout = layout(&[1, 2, 2]);
        layout.unlink(1).unwrap();
        assert_eq!(pages(&layout), vec![1, 2, 2]);
    }

    #[test]
    fn link_then_unlink_round_trips() {
        let before = layout(&[1, 1, 2, 2, 3]);
        let mut after = before.clone();
        after.link(2).unwrap();
        after.unlink(2).unwrap();
        assert_eq!(pages(&after), pages(&before));
    }

    #[test]
    fn distribute_groups_by_page_size() {
        let mut layout = layout(&[1, 1, 1, 1, 1]);
        layout.distribute(2);
        assert_eq!(pages(&layout), vec![1, 1, 2, 2, 3]);
    }

    #[test]
    fn distribute_zero_is_a_single_page() {
        let mut layout = layout(&[1, 2, 3, 4]);
        layout.distribute(0);
        assert_eq!(pages(&layout), vec![1, 1, 1, 1]);
    }

    #[test]
    fn move_slot_to_the_front() {
        let mut layout = layout(&[1, 1, 2]);
        let moving = layout.slots()[2].id;
        layout.move_slot(moving, None, Some(1)).unwrap();
        assert_eq!(numbers(&layout), vec![1, 2, 3]);
        assert_eq!(layout.slots()[0].id, moving);
        assert_invariants(&layout);
    }

    #[test]
    fn move_slot_after_another() {
        let mut layout = layout(&[1, 1, 2]);
        let moving = layout.slots()[0].id;
        let anchor = layout.slots()[2].id;
        layout.move_slot(moving, Some(anchor), Some(2)).unwrap();
        assert_eq!(layout.slots()[2].id, moving);
        assert_eq!(pages(&layout), vec![1, 2, 2]);
    }

    #[test]
    fn move_slot_compacts_an_emptied_page() {
        // Slot 1 is alone on page 1; moving it away must not leave a hole.
        let mut layout = layout(&[1, 2, 2]);
        let moving = layout.slots()[0].id;
        let anchor = layout.slots()[2].id;
        layout.move_slot(moving, Some(anchor), Some(1)).unwrap();
        assert_eq!(pages(&layout), vec![1, 1, 2]);
        assert_invariants(&layout);
    }

    #[test]
    fn move_slot_defaults_to_page_one() {
        let mut layout = layout(&[1, 2]);
        let moving = layout.slots()[1].id;
        layout.move_slot(moving, None, None).unwrap();
        // Both slots end up merged on page 1.
        assert_eq!(pages(&layout), vec![1, 1]);
        assert_eq!(layout.slots()[0].id, moving);
    }

    #[test]
    fn move_slot_unknown_ids_change_nothing() {
        let before = layout(&[1, 1, 2]);
        let mut after = before.clone();
        let moving = after.slots()[0].id;
        assert!(matches!(
            after.move_slot(Uuid::new_v4(), None, None),
            Err(LayoutError::SlotNotFound(_))
        ));
        assert!(matches!(
            after.move_slot(moving, Some(Uuid::new_v4()), None),
            Err(LayoutError::SlotNotFound(_))
        ));
        assert_eq!(after, before);
    }

    #[test]
    fn add_slot_appends_to_the_last_page() {
        let mut layout = layout(&[1, 1, 2]);
        let added = layout.add_slot(Uuid::new_v4(), None).unwrap();
        assert_eq!((added.slot, added.page), (4, 2));
        assert_invariants(&layout);
    }

    #[test]
    fn add_slot_into_an_earlier_page_shifts_ordinals() {
        let mut layout = layout(&[1, 1, 2]);
        let last = layout.slots()[2].id;
        let added = layout.add_slot(Uuid::new_v4(), Some(1)).unwrap();
        assert_eq!((added.slot, added.page), (3, 1));
        assert_eq!(layout.slots()[3].id, last);
        assert_eq!(layout.slots()[3].slot, 4);
    }

    #[test]
    fn add_slot_can_open_a_new_page() {
        let mut layout = layout(&[1, 1]);
        let added = layout.add_slot(Uuid::new_v4(), Some(2)).unwrap();
        assert_eq!((added.slot, added.page), (3, 2));
        assert_eq!(layout.add_slot(Uuid::new_v4(), Some(9)), Err(LayoutError::InvalidPage(9)));
    }

    #[test]
    fn add_slot_to_an_empty_quiz() {
        let mut layout = PageLayout::default();
        let added = layout.add_slot(Uuid::new_v4(), None).unwrap();
        assert_eq!((added.slot, added.page), (1, 1));
    }

    #[test]
    fn remove_slot_closes_the_gap() {
        let mut layout = layout(&[1, 2, 2, 3]);
        let removed = layout.slots()[0].id;
        layout.remove_slot(removed).unwrap();
        assert_eq!(numbers(&layout), vec![1, 2, 3]);
        assert_eq!(pages(&layout), vec![1, 1, 2]);
    }

    #[test]
    fn renumber_pages_compacts_gaps() {
        let mut layout = layout(&[2, 2, 5, 9]);
        layout.renumber_pages();
        assert_eq!(pages(&layout), vec![1, 1, 2, 3]);
    }

    #[test]
    fn diff_reports_only_touched_rows() {
        let before = layout(&[1, 1, 2]);
        let mut after = before.clone();
        after.unlink(1).unwrap();
        let diff = after.diff(before.slots());
        assert_eq!(diff.len(), 2);
        assert!(diff.iter().all(|position| position.id != before.slots()[0].id));
    }

    #[test]
    fn last_page_len_counts_the_tail() {
        let layout = layout(&[1, 1, 2, 2, 2]);
        assert_eq!(layout.last_page_len(), 3);
        assert_eq!(PageLayout::default().last_page_len(), 0);
    }

    prop_compose! {
        // A valid layout: N slots, pages non-decreasing and gap-free.
        fn arb_layout(max_slots: usize)(breaks in proptest::collection::vec(any::<bool>(), 1..max_slots)) -> PageLayout {
            let mut page = 1;
            let slots = breaks
                .into_iter()
                .enumerate()
                .map(|(index, new_page)| {
                    if new_page && index > 0 {
                        page += 1;
                    }
                    SlotPosition { id: Uuid::new_v4(), slot: index as i32 + 1, page }
                })
                .collect();
            PageLayout::new(slots)
        }
    }

    proptest! {
        #[test]
        fn renumber_always_yields_contiguous_pages(mut layout in arb_layout(24), raw in proptest::collection::vec(1..9i32, 24)) {
            for (position, page) in layout.slots.iter_mut().zip(raw) {
                position.page = page;
            }
            layout.renumber_pages();
            let pages = pages(&layout);
            prop_assert_eq!(pages[0], 1);
            for window in pages.windows(2) {
                prop_assert!(window[1] == window[0] || window[1] == window[0] + 1);
            }
        }

        #[test]
        fn distribute_matches_the_ceiling_formula(mut layout in arb_layout(24), per_page in 1..6i32) {
            layout.distribute(per_page);
            for position in layout.slots() {
                prop_assert_eq!(position.page, (position.slot + per_page - 1) / per_page);
            }
        }

        #[test]
        fn link_unlink_round_trip_is_identity(mut layout in arb_layout(24), slot_number in 1..24i32) {
            let before = layout.clone();
            if layout.link(slot_number).is_ok() {
                // Only restore the break when link actually removed one.
                if pages(&layout) != pages(&before) {
                    layout.unlink(slot_number).unwrap();
                }
                prop_assert_eq!(pages(&layout), pages(&before));
            }
        }

        #[test]
        fn move_slot_preserves_the_ordinal_invariant(mut layout in arb_layout(24), from in 0..24usize, to in 0..24usize, page in 1..6i32) {
            let count = layout.len();
            let moving = layout.slots()[from % count].id;
            let anchor = layout.slots()[to % count].id;
            layout.move_slot(moving, Some(anchor), Some(page)).unwrap();
            prop_assert_eq!(layout.len(), count);
            assert_invariants(&layout);
        }
    }
}
