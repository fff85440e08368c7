/// Monotonic numeric ID source for the in-memory stores.
///
/// Never hands out a value twice, so deleting entities cannot make a later
/// create collide with an existing ID.
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    /// Starts after the highest number found in `ids`. For composite IDs
    /// like `"1-3"` only the last segment counts.
    pub fn starting_after<'a>(ids: impl IntoIterator<Item = &'a str>) -> IdSequence {
        let highest = ids
            .into_iter()
            .filter_map(|id| id.rsplit('-').next())
            .filter_map(|segment| segment.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        IdSequence { next: highest + 1 }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        IdSequence { next: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_after_highest_numeric_segment() {
        let mut sequence = IdSequence::starting_after(["1", "7", "abc", "3"]);
        assert_eq!(sequence.next_id(), 8);
        assert_eq!(sequence.next_id(), 9);

        let mut lessons = IdSequence::starting_after(["1-1", "2-4", "2-x"]);
        assert_eq!(lessons.next_id(), 5);
    }

    #[test]
    fn empty_input_starts_at_one() {
        let mut sequence = IdSequence::starting_after(std::iter::empty());
        assert_eq!(sequence.next_id(), 1);
    }
}
