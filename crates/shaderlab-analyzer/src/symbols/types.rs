use std::collections::HashMap;

use once_cell::sync::OnceCell;

use crate::syntax::TextRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    File,
    Package,
    Struct,
    Class,
    Function,
    Method,
    Field,
    Variable,
    Constant,
    Module,
    Property,
}

impl SymbolKind {
    pub fn is_callable(self) -> bool {
        matches!(self, Self::Function | Self::Method)
    }

    pub fn is_type(self) -> bool {
        matches!(self, Self::Struct | Self::Class)
    }
}

/// A named construct recovered from source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub detail: String,
    pub kind: SymbolKind,
    /// Full extent of the declaration.
    pub range: TextRange,
    /// The identifier itself.
    pub selection_range: TextRange,
}

impl Symbol {
    pub fn new(
        name: impl Into<String>,
        detail: impl Into<String>,
        kind: SymbolKind,
        range: TextRange,
        selection_range: TextRange,
    ) -> Self {
        Self {
            name: name.into(),
            detail: detail.into(),
            kind,
            range,
            selection_range,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u32);

impl SymbolId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct SymbolNode {
    symbol: Symbol,
    parent: Option<SymbolId>,
    children: Vec<SymbolId>,
}

/// Arena-backed symbol tree of one document.
///
/// Nodes are never removed. Every pushed child is clamped into its parent's
/// range and every selection range into its own range, so containment
/// queries can rely on the tree property.
#[derive(Debug, Clone, Default)]
pub struct SymbolTree {
    nodes: Vec<SymbolNode>,
    roots: Vec<SymbolId>,
    name_index: OnceCell<HashMap<String, SymbolId>>,
}

impl SymbolTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        parent: Option<SymbolId>,
        mut symbol: Symbol,
    ) -> SymbolId {
        if let Some(parent) = parent {
            symbol.range = symbol.range.clamped_to(self.nodes[parent.index()].symbol.range);
        }
        symbol.selection_range = symbol.selection_range.clamped_to(symbol.range);

        let id = SymbolId(self.nodes.len() as u32);
        self.nodes.push(SymbolNode {
            symbol,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(parent) => self.nodes[parent.index()].children.push(id),
            None => self.roots.push(id),
        }
        self.name_index.take();
        id
    }

    pub(crate) fn set_detail(
        &mut self,
        id: SymbolId,
        detail: String,
    ) {
        self.nodes[id.index()].symbol.detail = detail;
    }

    pub fn get(
        &self,
        id: SymbolId,
    ) -> &Symbol {
        &self.nodes[id.index()].symbol
    }

    pub fn parent(
        &self,
        id: SymbolId,
    ) -> Option<SymbolId> {
        self.nodes[id.index()].parent
    }

    pub fn children(
        &self,
        id: SymbolId,
    ) -> &[SymbolId] {
        &self.nodes[id.index()].children
    }

    pub fn roots(&self) -> &[SymbolId] {
        &self.roots
    }

    /// Children of `parent`, or the roots when `parent` is `None`.
    pub fn level(
        &self,
        parent: Option<SymbolId>,
    ) -> &[SymbolId] {
        match parent {
            Some(id) => self.children(id),
            None => self.roots(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All symbols in document-tree preorder.
    pub fn preorder(&self) -> Vec<SymbolId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<SymbolId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// First symbol in preorder named `name`.
    ///
    /// Backed by a name index that is built on first use and dropped
    /// whenever the tree grows.
    pub fn find_by_name(
        &self,
        name: &str,
    ) -> Option<SymbolId> {
        let index = self.name_index.get_or_init(|| {
            let mut map = HashMap::with_capacity(self.nodes.len());
            for id in self.preorder() {
                map.entry(self.get(id).name.clone()).or_insert(id);
            }
            map
        });
        index.get(name).copied()
    }

    /// Every symbol named `name`, in preorder.
    pub fn find_all_by_name(
        &self,
        name: &str,
    ) -> Vec<SymbolId> {
        self.preorder().into_iter().filter(|id| self.get(*id).name == name).collect()
    }

    pub fn find_child(
        &self,
        parent: Option<SymbolId>,
        name: &str,
    ) -> Option<SymbolId> {
        self.level(parent).iter().copied().find(|id| self.get(*id).name == name)
    }

    /// Symbols whose range contains `offset`, outermost first.
    pub fn stack_at(
        &self,
        offset: usize,
    ) -> Vec<SymbolId> {
        let mut stack = Vec::new();
        let mut level = self.roots.as_slice();
        while let Some(next) = level.iter().copied().find(|id| self.get(*id).range.contains(offset)) {
            stack.push(next);
            level = self.children(next);
        }
        stack
    }

    pub fn ancestors(
        &self,
        id: SymbolId,
    ) -> impl Iterator<Item = SymbolId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }
}

#[cfg(test)]
#[path = "../../tests/src/symbols/types_tests.rs"]
mod tests;
