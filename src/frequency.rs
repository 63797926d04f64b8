use std::collections::HashMap;
use std::hash::Hash;

/// Occurrence count of every distinct symbol of a message.
///
/// Entries are kept in order of first appearance, which is what
/// [`TieBreak::FirstOccurrence`](crate::TieBreak::FirstOccurrence) ranks by.
#[derive(Debug, Clone)]
pub struct FrequencyTable<Symbol> {
    entries: Vec<(Symbol, usize)>,
    index: HashMap<Symbol, usize>,
    total: usize,
}

impl<Symbol> FrequencyTable<Symbol>
where
    Symbol: Hash + Eq + Clone,
{
    pub fn from_symbols(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let mut entries: Vec<(Symbol, usize)> = Vec::new();
        let mut index: HashMap<Symbol, usize> = HashMap::new();
        let mut total = 0;

        for s in symbols {
            total += 1;
            match index.get(&s) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    index.insert(s.clone(), entries.len());
                    entries.push((s, 1));
                }
            }
        }

        Self {
            entries,
            index,
            total,
        }
    }

    pub fn count(&self, symbol: &Symbol) -> Option<usize> {
        self.index.get(symbol).map(|&i| self.entries[i].1)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length of the counted message.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, usize)> {
        self.entries.iter().map(|(s, c)| (s, *c))
    }
}

impl FrequencyTable<char> {
    pub fn from_text(text: &str) -> Self {
        Self::from_symbols(text.chars())
    }
}
