//! Canonical support sets.
//!
//! A support set Γ is a set of dictionary column indices. We store it as a
//! sorted, deduplicated vector so two sets with the same members compare,
//! order and hash equal however they were built. Supports are never mutated
//! in place; growing one yields a new value.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Support(Vec<usize>);

impl Support {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.0.binary_search(&idx).is_ok()
    }

    /// Ascending column indices.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// `Γ ∪ {idx}`.
    pub fn with(&self, idx: usize) -> Self {
        match self.0.binary_search(&idx) {
            Ok(_) => self.clone(),
            Err(pos) => {
                let mut members = Vec::with_capacity(self.0.len() + 1);
                members.extend_from_slice(&self.0[..pos]);
                members.push(idx);
                members.extend_from_slice(&self.0[pos..]);
                Self(members)
            }
        }
    }

    /// Members of `self` that are not in `other`.
    pub fn difference(&self, other: &Support) -> Vec<usize> {
        self.iter().filter(|&i| !other.contains(i)).collect()
    }
}

impl FromIterator<usize> for Support {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut members: Vec<usize> = iter.into_iter().collect();
        members.sort_unstable();
        members.dedup();
        Self(members)
    }
}

impl From<&[usize]> for Support {
    fn from(members: &[usize]) -> Self {
        members.iter().copied().collect()
    }
}

impl<const N: usize> From<[usize; N]> for Support {
    fn from(members: [usize; N]) -> Self {
        members.into_iter().collect()
    }
}

impl fmt::Display for Support {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, idx) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{idx}")?;
        }
        write!(f, "}}")
    }
}
