use std::iter;

use colored::Colorize;

use crate::alignment::MatchPath;
use crate::types::{MatchPair, Token};

/// One slot of a display sequence.
///
/// A gap on the reference side stands for an extra hypothesis token, a gap on
/// the hypothesis side for a missing reference token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<T> {
    Token(T),
    Gap,
}

impl<T> Cell<T> {
    pub fn token(&self) -> Option<&T> {
        match self {
            Cell::Token(t) => Some(t),
            Cell::Gap => None,
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, Cell::Gap)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Correct,
    Substitution,
    Insertion,
    Deletion,
}

/// Reference and hypothesis laid out in columns of equal length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedDisplay<'a, T> {
    pub reference: Vec<Cell<&'a T>>,
    pub hypothesis: Vec<Cell<&'a T>>,
}

/// Writes `span` into the slots directly before `column`, last token first.
fn backfill<'a, T>(cells: &mut [Cell<&'a T>], column: usize, span: &'a [T]) {
    for (k, token) in span.iter().rev().enumerate() {
        cells[column - 1 - k] = Cell::Token(token);
    }
}

fn fill_from<'a, T>(cells: &mut [Cell<&'a T>], start: usize, span: &'a [T]) {
    for (k, token) in span.iter().enumerate() {
        cells[start + k] = Cell::Token(token);
    }
}

/// Lays out `reference` and `hypothesis` so that matched tokens share a column.
///
/// Unmatched tokens between two matches are right-aligned against the later
/// match. Unmatched tokens before the first match and after the last one are
/// left-aligned.
pub fn render<'a, T>(
    reference: &'a [T],
    hypothesis: &'a [T],
    matches: &MatchPath,
) -> AlignedDisplay<'a, T> {
    let width = reference.len() + hypothesis.len();
    let mut ref_cells = vec![Cell::Gap; width];
    let mut hyp_cells = vec![Cell::Gap; width];
    // Gap slots inserted so far, shifting every later column to the right.
    let mut extra = 0;
    let mut previous: Option<(MatchPair, usize)> = None;

    for pair in matches {
        let column = match previous {
            None => {
                fill_from(&mut ref_cells, 0, &reference[..pair.reference]);
                fill_from(&mut hyp_cells, 0, &hypothesis[..pair.hypothesis]);
                pair.column()
            }
            Some((prev, _)) => {
                let ref_span = &reference[prev.reference + 1..pair.reference];
                let hyp_span = &hypothesis[prev.hypothesis + 1..pair.hypothesis];
                let available = pair.column() - prev.column() - 1;
                let needed = ref_span.len().max(hyp_span.len());
                if needed > available {
                    let slots = needed - available;
                    let at = pair.column() + extra;
                    ref_cells.splice(at..at, iter::repeat(Cell::Gap).take(slots));
                    hyp_cells.splice(at..at, iter::repeat(Cell::Gap).take(slots));
                    extra += slots;
                }
                let column = pair.column() + extra;
                backfill(&mut ref_cells, column, ref_span);
                backfill(&mut hyp_cells, column, hyp_span);
                column
            }
        };
        ref_cells[column] = Cell::Token(&reference[pair.reference]);
        hyp_cells[column] = Cell::Token(&hypothesis[pair.hypothesis]);
        previous = Some((*pair, column));
    }

    let (start, ref_tail, hyp_tail) = match previous {
        None => (0, reference, hypothesis),
        Some((last, column)) => (
            column + 1,
            &reference[last.reference + 1..],
            &hypothesis[last.hypothesis + 1..],
        ),
    };
    let end = start + ref_tail.len().max(hyp_tail.len());
    if ref_cells.len() < end {
        ref_cells.resize(end, Cell::Gap);
        hyp_cells.resize(end, Cell::Gap);
    }
    fill_from(&mut ref_cells, start, ref_tail);
    fill_from(&mut hyp_cells, start, hyp_tail);

    let (reference, hypothesis) = ref_cells
        .into_iter()
        .zip(hyp_cells)
        .filter(|(r, h)| !(r.is_gap() && h.is_gap()))
        .unzip();
    AlignedDisplay {
        reference,
        hypothesis,
    }
}

impl<'a, T> AlignedDisplay<'a, T> {
    pub fn len(&self) -> usize {
        self.reference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }
}

impl<'a, T: PartialEq> AlignedDisplay<'a, T> {
    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.reference
            .iter()
            .zip(self.hypothesis.iter())
            .map(|(r, h)| match (r, h) {
                (Cell::Token(r), Cell::Token(h)) if r == h => Column::Correct,
                (Cell::Token(_), Cell::Token(_)) => Column::Substitution,
                (Cell::Gap, _) => Column::Insertion,
                (_, Cell::Gap) => Column::Deletion,
            })
    }
}

impl<'a, T: Token + PartialEq> AlignedDisplay<'a, T> {
    /// Both sides as space separated lines, each column padded to the wider cell.
    pub fn to_lines(&self, gap: &str) -> (String, String) {
        let text = |cell: &Cell<&'a T>| -> String {
            match cell {
                Cell::Token(t) => t.text().to_string(),
                Cell::Gap => gap.to_string(),
            }
        };
        let mut ref_line = Vec::with_capacity(self.len());
        let mut hyp_line = Vec::with_capacity(self.len());
        for ((r, h), column) in self
            .reference
            .iter()
            .zip(self.hypothesis.iter())
            .zip(self.columns())
        {
            let (r, h) = (text(r), text(h));
            let width = r.chars().count().max(h.chars().count());
            let r = format!("{:<width$}", r);
            let h = format!("{:<width$}", h);
            let (r, h) = match column {
                Column::Correct => (r.normal(), h.normal()),
                Column::Substitution => (r.red(), h.green()),
                Column::Insertion => (r.normal(), h.green()),
                Column::Deletion => (r.red(), h.normal()),
            };
            ref_line.push(r.to_string());
            hyp_line.push(h.to_string());
        }
        (
            ref_line.join(" ").trim_end().to_string(),
            hyp_line.join(" ").trim_end().to_string(),
        )
    }

    pub fn pretty(&self, gap: &str) {
        let (reference, hypothesis) = self.to_lines(gap);
        println!("REF: {}", reference);
        println!("HYP: {}", hypothesis);
    }
}
