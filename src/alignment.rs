use std::ops::{Index, IndexMut};

use log::{debug, trace};

use crate::types::{EditCounts, EditOp, MatchPair};

/// Dense row-major grid backed by a single allocation.
#[derive(Debug, Clone)]
pub struct Grid<V> {
    rows: usize,
    cols: usize,
    cells: Vec<V>,
}

impl<V: Copy + Default> Grid<V> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![V::default(); rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }
}

impl<V> Index<(usize, usize)> for Grid<V> {
    type Output = V;
    fn index(&self, (i, j): (usize, usize)) -> &V {
        &self.cells[i * self.cols + j]
    }
}

impl<V> IndexMut<(usize, usize)> for Grid<V> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut V {
        &mut self.cells[i * self.cols + j]
    }
}

/// Aligned index pairs in left-to-right order, strictly increasing on both sides.
///
/// Only [`compute_distance`] builds these, which is what lets the renderer
/// trust the ordering without checking it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchPath {
    pairs: Vec<MatchPair>,
}

impl MatchPath {
    pub fn as_slice(&self) -> &[MatchPair] {
        &self.pairs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchPair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn last(&self) -> Option<&MatchPair> {
        self.pairs.last()
    }
}

impl<'a> IntoIterator for &'a MatchPath {
    type Item = &'a MatchPair;
    type IntoIter = std::slice::Iter<'a, MatchPair>;
    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

#[derive(Debug, Clone)]
pub struct Distance {
    /// Minimum number of edits, read from the last grid cell.
    pub edits: usize,
    pub matches: MatchPath,
    pub counts: EditCounts,
}

fn fill_grids<T: PartialEq>(hypothesis: &[T], reference: &[T]) -> (Grid<usize>, Grid<EditOp>) {
    let rows = hypothesis.len() + 1;
    let cols = reference.len() + 1;
    let mut cost: Grid<usize> = Grid::new(rows, cols);
    let mut ops: Grid<EditOp> = Grid::new(rows, cols);
    for i in 0..rows {
        cost[(i, 0)] = i;
    }
    for j in 0..cols {
        cost[(0, j)] = j;
    }
    for (i, h) in hypothesis.iter().enumerate() {
        let i = i + 1;
        for (j, r) in reference.iter().enumerate() {
            let j = j + 1;
            if h == r {
                cost[(i, j)] = cost[(i - 1, j - 1)];
                continue;
            }
            // Order gives the tie-break priority: earlier candidates win ties.
            let candidates = [
                (cost[(i - 1, j - 1)] + 1, EditOp::Substitution),
                (cost[(i - 1, j)] + 1, EditOp::Insertion),
                (cost[(i, j - 1)] + 1, EditOp::Deletion),
            ];
            let (best, op) = candidates[1..]
                .iter()
                .fold(candidates[0], |best, &c| if c.0 < best.0 { c } else { best });
            cost[(i, j)] = best;
            ops[(i, j)] = op;
        }
    }
    (cost, ops)
}

fn backtrace(ops: &Grid<EditOp>, counts: &mut EditCounts) -> Vec<MatchPair> {
    let mut pairs = Vec::new();
    let mut i = ops.rows() - 1;
    let mut j = ops.cols() - 1;
    while i > 0 && j > 0 {
        match ops[(i, j)] {
            EditOp::Match => {
                pairs.push(MatchPair::new(j - 1, i - 1));
                counts.correct += 1;
                i -= 1;
                j -= 1;
            }
            EditOp::Substitution => {
                counts.substitutions += 1;
                i -= 1;
                j -= 1;
            }
            EditOp::Insertion => {
                counts.insertions += 1;
                i -= 1;
            }
            EditOp::Deletion => {
                counts.deletions += 1;
                j -= 1;
            }
        }
    }
    // One side is exhausted; whatever is left on the other side is unmatched.
    counts.deletions += j;
    counts.insertions += i;
    pairs.reverse();
    pairs
}

/// Levenshtein distance of `hypothesis` against `reference`, with the
/// per-type edit counts and the aligned index pairs of the optimal path.
///
/// Ties between edits are broken in the order substitution, insertion,
/// deletion.
pub fn compute_distance<T: PartialEq>(hypothesis: &[T], reference: &[T]) -> Distance {
    trace!(
        "allocating {}x{} grids",
        hypothesis.len() + 1,
        reference.len() + 1
    );
    let (cost, ops) = fill_grids(hypothesis, reference);
    let edits = cost[(hypothesis.len(), reference.len())];
    let mut counts = EditCounts {
        reference_len: reference.len(),
        ..Default::default()
    };
    let pairs = backtrace(&ops, &mut counts);
    counts.wrong = edits;
    debug!("edit distance {edits}: {counts:?}");
    Distance {
        edits,
        matches: MatchPath { pairs },
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn pairs(p: &[(usize, usize)]) -> Vec<MatchPair> {
        p.iter().map(|&(r, h)| MatchPair::new(r, h)).collect()
    }

    /// All strings over `alphabet` of length at most `max_len`.
    fn all_strings(alphabet: &[char], max_len: usize) -> Vec<Vec<char>> {
        let mut out = vec![vec![]];
        let mut layer = vec![vec![]];
        for _ in 0..max_len {
            layer = layer
                .iter()
                .flat_map(|s: &Vec<char>| {
                    alphabet.iter().map(move |c| {
                        let mut s = s.clone();
                        s.push(*c);
                        s
                    })
                })
                .collect();
            out.extend(layer.iter().cloned());
        }
        out
    }

    #[test]
    fn empty_inputs() {
        let d = compute_distance::<char>(&[], &[]);
        assert_eq!(d.edits, 0);
        assert!(d.matches.is_empty());
        assert_eq!(d.counts, EditCounts::default());
    }

    #[test]
    fn empty_reference_is_all_insertions() {
        let d = compute_distance(&chars("abcd"), &[]);
        assert_eq!(d.edits, 4);
        assert!(d.matches.is_empty());
        assert_eq!(d.counts.insertions, 4);
        assert_eq!(d.counts.deletions, 0);
        assert_eq!(d.counts.reference_len, 0);
        assert_eq!(d.counts.wrong, 4);
    }

    #[test]
    fn empty_hypothesis_is_all_deletions() {
        let d = compute_distance(&[], &chars("cdefg"));
        assert_eq!(d.edits, 5);
        assert_eq!(
            d.counts,
            EditCounts {
                reference_len: 5,
                correct: 0,
                wrong: 5,
                insertions: 0,
                deletions: 5,
                substitutions: 0,
            }
        );
    }

    #[test]
    fn identity() {
        let s = chars("levenshtein");
        let d = compute_distance(&s, &s);
        assert_eq!(d.edits, 0);
        assert_eq!(d.counts.correct, s.len());
        let expected: Vec<_> = (0..s.len()).map(|i| MatchPair::new(i, i)).collect();
        assert_eq!(d.matches.as_slice(), &expected[..]);
    }

    #[test]
    fn golden_value() {
        let reference = chars("abcdeflmnop");
        let hypothesis = chars("abdefghiopqrst");
        let d = compute_distance(&hypothesis, &reference);
        assert_eq!(d.edits, 8);
        assert_eq!(
            d.counts,
            EditCounts {
                reference_len: 11,
                correct: 7,
                wrong: 8,
                insertions: 4,
                deletions: 1,
                substitutions: 3,
            }
        );
        assert_eq!(
            d.matches.as_slice(),
            &pairs(&[(0, 0), (1, 1), (3, 2), (4, 3), (5, 4), (9, 8), (10, 9)])[..]
        );
        // Repeated runs are deterministic.
        let again = compute_distance(&hypothesis, &reference);
        assert_eq!(again.counts, d.counts);
        assert_eq!(again.matches, d.matches);
    }

    #[test]
    fn leading_and_trailing_edits() {
        let d = compute_distance(&chars("abcdef"), &chars("cdefg"));
        assert_eq!(d.edits, 3);
        assert_eq!(d.counts.insertions, 2);
        assert_eq!(d.counts.deletions, 1);
        assert_eq!(d.counts.correct, 4);
        assert_eq!(
            d.matches.as_slice(),
            &pairs(&[(0, 2), (1, 3), (2, 4), (3, 5)])[..]
        );
    }

    #[test]
    fn equal_length_substitutions() {
        let d = compute_distance(&chars("aXcYeZ"), &chars("abcdef"));
        assert_eq!(d.edits, 3);
        assert_eq!(d.counts.substitutions, 3);
        assert_eq!(d.counts.insertions, 0);
        assert_eq!(d.counts.deletions, 0);
    }

    #[test]
    fn words() {
        let reference: Vec<_> = "the cat sat on a mat".split(' ').collect();
        let hypothesis: Vec<_> = "the cat sat on the mat".split(' ').collect();
        let d = compute_distance(&hypothesis, &reference);
        assert_eq!(d.edits, 1);
        assert_eq!(d.counts.substitutions, 1);
        assert_eq!(d.counts.correct, 5);
    }

    #[test]
    fn tie_prefers_substitution() {
        // At the last cell substitution, insertion and deletion all cost 2.
        let (cost, ops) = fill_grids(&chars("ab"), &chars("ba"));
        assert_eq!(cost[(1, 1)], 1);
        assert_eq!(cost[(1, 2)], 1);
        assert_eq!(cost[(2, 1)], 1);
        assert_eq!(ops[(2, 2)], EditOp::Substitution);

        let d = compute_distance(&chars("ab"), &chars("ba"));
        assert_eq!(d.counts.substitutions, 2);
        assert_eq!(d.counts.correct, 0);
        assert!(d.matches.is_empty());
    }

    #[test]
    fn grid_base_cases() {
        let (cost, ops) = fill_grids(&chars("abc"), &chars("xy"));
        assert_eq!((cost.rows(), cost.cols()), (4, 3));
        for i in 0..4 {
            assert_eq!(cost[(i, 0)], i);
            assert_eq!(ops[(i, 0)], EditOp::Match);
        }
        for j in 0..3 {
            assert_eq!(cost[(0, j)], j);
            assert_eq!(ops[(0, j)], EditOp::Match);
        }
    }

    #[test]
    fn exhaustive_small_inputs() {
        let strings = all_strings(&['a', 'b', 'c'], 4);
        for a in &strings {
            for b in &strings {
                let d = compute_distance(a, b);
                let c = d.counts;
                assert_eq!(d.edits, compute_distance(b, a).edits, "{a:?} {b:?}");
                assert_eq!(c.reference_len, b.len());
                assert_eq!(c.wrong, d.edits);
                assert_eq!(c.correct + c.substitutions + c.deletions, b.len());
                assert_eq!(c.correct + c.substitutions + c.insertions, a.len());
                assert_eq!(c.substitutions + c.insertions + c.deletions, d.edits);
                assert_eq!(c.correct, d.matches.len());
                for w in d.matches.as_slice().windows(2) {
                    assert!(w[0].reference < w[1].reference);
                    assert!(w[0].hypothesis < w[1].hypothesis);
                }
                for p in &d.matches {
                    assert_eq!(b[p.reference], a[p.hypothesis]);
                }
            }
        }
    }

    #[test]
    fn error_rate() {
        let d = compute_distance(&chars("abdefghiopqrst"), &chars("abcdeflmnop"));
        assert!((d.counts.error_rate() - 8.0 / 11.0).abs() < 1e-12);
        assert_eq!(compute_distance::<char>(&[], &[]).counts.error_rate(), 0.0);
        assert_eq!(compute_distance(&chars("x"), &[]).counts.error_rate(), 1.0);
    }
}
