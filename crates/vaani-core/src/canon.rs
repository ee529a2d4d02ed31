//! Bhagavad Gita canon structure.
//!
//! Chapter/verse counts and the deterministic verse-of-the-day selection.
//! Pure data — the scripture client validates requests against this before
//! touching the network.

/// Number of chapters in the Gita.
pub const CHAPTER_COUNT: u32 = 18;

/// Verses per chapter, index 0 = chapter 1.
pub const VERSE_COUNTS: [u32; CHAPTER_COUNT as usize] = [
    47, 72, 43, 42, 29, 47, 30, 28, 34, 42, 55, 20, 35, 27, 20, 24, 28, 78,
];

/// Total verse count across all chapters.
pub const TOTAL_VERSES: u32 = {
    let mut sum = 0;
    let mut i = 0;
    while i < VERSE_COUNTS.len() {
        sum += VERSE_COUNTS[i];
        i += 1;
    }
    sum
};

/// Verse count for a chapter, or `None` outside 1–18.
pub fn verse_count(chapter: u32) -> Option<u32> {
    if (1..=CHAPTER_COUNT).contains(&chapter) {
        Some(VERSE_COUNTS[(chapter - 1) as usize])
    } else {
        None
    }
}

/// Pick the verse of the day for a given day-of-year.
///
/// Cycles through the whole canon: the day index modulo [`TOTAL_VERSES`]
/// is walked against the cumulative chapter counts, so the same calendar
/// day always lands on the same `(chapter, verse)` pair.
pub fn verse_for_day(day_of_year: u32) -> (u32, u32) {
    let index = day_of_year % TOTAL_VERSES;

    let mut cumulative = 0;
    for (i, &count) in VERSE_COUNTS.iter().enumerate() {
        if index < cumulative + count {
            return (i as u32 + 1, index - cumulative + 1);
        }
        cumulative += count;
    }

    // index < TOTAL_VERSES, so the loop always returns
    unreachable!()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_matches_table() {
        assert_eq!(TOTAL_VERSES, VERSE_COUNTS.iter().sum::<u32>());
    }

    #[test]
    fn verse_count_in_range() {
        assert_eq!(verse_count(1), Some(47));
        assert_eq!(verse_count(18), Some(78));
    }

    #[test]
    fn verse_count_out_of_range() {
        assert_eq!(verse_count(0), None);
        assert_eq!(verse_count(19), None);
    }

    #[test]
    fn day_zero_starts_at_the_beginning() {
        assert_eq!(verse_for_day(0), (1, 1));
    }

    #[test]
    fn day_within_first_chapter() {
        assert_eq!(verse_for_day(1), (1, 2));
        assert_eq!(verse_for_day(46), (1, 47));
    }

    #[test]
    fn day_crosses_chapter_boundary() {
        // Index 47 is the first verse of chapter 2
        assert_eq!(verse_for_day(47), (2, 1));
    }

    #[test]
    fn last_index_lands_on_final_verse() {
        assert_eq!(verse_for_day(TOTAL_VERSES - 1), (18, 78));
    }

    #[test]
    fn selection_wraps_around() {
        assert_eq!(verse_for_day(TOTAL_VERSES), verse_for_day(0));
        assert_eq!(verse_for_day(TOTAL_VERSES + 5), verse_for_day(5));
    }

    #[test]
    fn same_day_same_verse() {
        assert_eq!(verse_for_day(200), verse_for_day(200));
    }
}
