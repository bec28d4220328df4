//! Matched `{}` / `()` regions of a document.
//!
//! The tree is an arena: region 0 is the synthetic root spanning the whole
//! text, every other region is stored in the order its opener appears.

use super::{Cancelled, CharClass, TextRange, for_each_class};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Root,
    Paren,
    Brace,
}

impl BracketKind {
    fn closer(self) -> Option<u8> {
        match self {
            Self::Root => None,
            Self::Paren => Some(b')'),
            Self::Brace => Some(b'}'),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(u32);

impl RegionId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct BracketRegion {
    /// Offset of the opening bracket.
    pub start: usize,
    /// Offset just past the closing bracket, or the text length when the
    /// region was never closed.
    pub end: usize,
    pub kind: BracketKind,
    /// Whether a matching closer was seen.
    pub closed: bool,
    pub parent: Option<RegionId>,
    pub children: Vec<RegionId>,
}

impl BracketRegion {
    pub fn range(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }

    /// Span between the brackets, excluding both of them.
    pub fn inner(&self) -> TextRange {
        match self.kind {
            BracketKind::Root => TextRange::new(self.start, self.end),
            _ => {
                let end = if self.closed {
                    self.end.saturating_sub(1)
                } else {
                    self.end
                };
                TextRange::new(self.start + 1, end)
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct BracketTree {
    regions: Vec<BracketRegion>,
}

impl BracketTree {
    /// Scan `text` once and match every bracket pair outside of strings,
    /// character literals, and comments.
    ///
    /// A closer that does not match the innermost pending opener closes the
    /// nearest pending opener of its own kind, sealing the skipped openers at
    /// the closer's offset. A closer with no pending opener of its kind is
    /// ignored. Openers still pending at the end run to the text length.
    pub fn build(
        text: &str,
        is_cancelled: &dyn Fn() -> bool,
    ) -> Result<Self, Cancelled> {
        let len = text.len();
        let mut regions = vec![BracketRegion {
            start: 0,
            end: len,
            kind: BracketKind::Root,
            closed: true,
            parent: None,
            children: Vec::new(),
        }];
        let mut stack: Vec<RegionId> = vec![RegionId(0)];

        for_each_class(text, is_cancelled, |offset, byte, class| {
            if class != CharClass::Code {
                return;
            }
            match byte {
                b'{' | b'(' => {
                    let parent = stack.last().copied().unwrap_or(RegionId(0));
                    let id = RegionId(regions.len() as u32);
                    regions.push(BracketRegion {
                        start: offset,
                        end: len,
                        kind: if byte == b'{' {
                            BracketKind::Brace
                        } else {
                            BracketKind::Paren
                        },
                        closed: false,
                        parent: Some(parent),
                        children: Vec::new(),
                    });
                    regions[parent.index()].children.push(id);
                    stack.push(id);
                },
                b'}' | b')' => {
                    let Some(depth) = stack.iter().rposition(|id| regions[id.index()].kind.closer() == Some(byte))
                    else {
                        return;
                    };
                    while stack.len() > depth + 1 {
                        if let Some(skipped) = stack.pop() {
                            regions[skipped.index()].end = offset;
                        }
                    }
                    if let Some(matched) = stack.pop() {
                        let region = &mut regions[matched.index()];
                        region.end = offset + 1;
                        region.closed = true;
                    }
                },
                _ => {},
            }
        })?;

        Ok(Self {
            regions,
        })
    }

    pub fn root(&self) -> RegionId {
        RegionId(0)
    }

    pub fn region(
        &self,
        id: RegionId,
    ) -> &BracketRegion {
        &self.regions[id.index()]
    }

    /// Number of matched regions, excluding the root.
    pub fn len(&self) -> usize {
        self.regions.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &BracketRegion)> {
        self.regions.iter().enumerate().skip(1).map(|(index, region)| (RegionId(index as u32), region))
    }

    /// Region whose opening bracket sits exactly at `offset`.
    pub fn region_starting_at(
        &self,
        offset: usize,
    ) -> Option<&BracketRegion> {
        let openers = &self.regions[1..];
        openers.binary_search_by_key(&offset, |region| region.start).ok().map(|index| &openers[index])
    }

    /// Innermost region strictly enclosing `offset` (the opener itself is not
    /// inside its own region). Falls back to the root.
    pub fn innermost_at(
        &self,
        offset: usize,
    ) -> RegionId {
        let mut current = self.root();
        loop {
            let next = self.region(current).children.iter().copied().find(|child| {
                let region = self.region(*child);
                region.start < offset && offset < region.end
            });
            match next {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    /// Innermost `{}` region strictly enclosing `offset`.
    pub fn enclosing_brace(
        &self,
        offset: usize,
    ) -> Option<RegionId> {
        let mut current = Some(self.innermost_at(offset));
        while let Some(id) = current {
            let region = self.region(id);
            if region.kind == BracketKind::Brace {
                return Some(id);
            }
            current = region.parent;
        }
        None
    }
}

#[cfg(test)]
#[path = "../../tests/src/syntax/brackets_tests.rs"]
mod tests;
