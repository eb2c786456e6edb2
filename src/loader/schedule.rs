/// Subdivision levels that must finish before the sequence is considered ready.
pub const PRIORITY_DENOMINATORS: [usize; 4] = [2, 4, 8, 16];

/// Subdivision levels streamed after readiness, before the ascending sweep.
pub const BACKGROUND_DENOMINATORS: [usize; 4] = [32, 64, 128, 256];

/// Partition of `[0, frame_count)` into a priority set and a background tail.
///
/// Both lists are in load order. Every index appears exactly once across the two.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoadSchedule {
    /// Frames that gate readiness.
    pub priority: Vec<usize>,
    /// Frames loaded after readiness.
    pub background: Vec<usize>,
}

impl LoadSchedule {
    /// Binary-subdivision schedule.
    ///
    /// The first and last frame come first, then the midpoints of successively finer halvings of
    /// `[0, frame_count - 1]`, so any prefix of the schedule covers the whole sequence evenly.
    pub fn bisection(frame_count: usize) -> Self {
        let mut out = Self::default();
        if frame_count == 0 {
            return out;
        }

        let max_index = frame_count - 1;
        let mut taken = vec![false; frame_count];

        take(0, &mut taken, &mut out.priority);
        if max_index > 0 {
            take(max_index, &mut taken, &mut out.priority);
        }

        for denom in PRIORITY_DENOMINATORS {
            add_level(max_index, denom, &mut taken, &mut out.priority);
        }

        for denom in BACKGROUND_DENOMINATORS {
            add_level(max_index, denom, &mut taken, &mut out.background);
            if max_index < denom {
                break;
            }
        }

        for (i, done) in taken.iter().enumerate() {
            if !done {
                out.background.push(i);
            }
        }

        out
    }

    /// Total number of scheduled frames.
    pub fn len(&self) -> usize {
        self.priority.len() + self.background.len()
    }

    /// Return `true` when nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.priority.is_empty() && self.background.is_empty()
    }

    /// Return `true` when `index` gates readiness.
    pub fn is_priority(&self, index: usize) -> bool {
        self.priority.contains(&index)
    }
}

fn take(index: usize, taken: &mut [bool], out: &mut Vec<usize>) {
    taken[index] = true;
    out.push(index);
}

// Odd numerators only: even ones land on points an earlier level already produced.
fn add_level(max_index: usize, denom: usize, taken: &mut [bool], out: &mut Vec<usize>) {
    for numerator in (1..denom).step_by(2) {
        let index = max_index * numerator / denom;
        if index < max_index && !taken[index] {
            take(index, taken, out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loader/schedule.rs"]
mod tests;
