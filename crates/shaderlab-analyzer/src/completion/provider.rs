use std::collections::HashSet;
use std::ops::ControlFlow;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tower_lsp::lsp_types::{
    Command, CompletionItem, CompletionItemKind, CompletionItemLabelDetails, Position, Url,
};
use tracing::debug;

use crate::{
    completion::{
        builtins::{builtin_to_completion_item, function_item, keyword_item, markdown, semantic_item, type_item},
        context::{CursorContext, detect_context},
    },
    definition::{IncludeGraph, LocalOrigin, locals_in_scope, variable_type},
    document::Document,
    hlsl::{
        self,
        builtins::{self, BuiltinKind},
    },
    symbols::{CacheEntry, SymbolId, SymbolKind},
    syntax::{ShaderLanguage, mask_comments, never_cancelled},
};

/// Client command that opens signature help after a call is inserted.
pub const TRIGGER_PARAMETER_HINTS: &str = "editor.action.triggerParameterHints";

static COMPUTE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[numthreads\s*\(|RWTexture|RWStructuredBuffer").unwrap());

/// Whether `document` is a compute shader: a `.compute` file, or one that
/// declares a kernel or a read-write resource.
pub fn is_compute_shader(document: &Document) -> bool {
    document.uri.path().to_ascii_lowercase().ends_with(".compute") || COMPUTE_MARKER.is_match(&document.text)
}

/// Swizzle members of a vector type, e.g. `x`, `rg`, `xyz` for `float3`.
pub fn swizzle_items(type_name: &str) -> Vec<CompletionItem> {
    let Some(width) = hlsl::vector_width(type_name) else {
        return Vec::new();
    };
    let mut labels: Vec<String> = Vec::new();
    labels.extend("xyzw".chars().take(width).map(String::from));
    labels.extend("rgba".chars().take(width).map(String::from));
    for (min_width, position, color) in [(2, "xy", "rg"), (3, "xyz", "rgb"), (4, "xyzw", "rgba")] {
        if width >= min_width {
            labels.push(position.to_string());
            labels.push(color.to_string());
        }
    }
    labels
        .into_iter()
        .map(|label| CompletionItem {
            label,
            kind: Some(CompletionItemKind::PROPERTY),
            detail: Some(format!("{type_name} swizzle")),
            ..Default::default()
        })
        .collect()
}

/// Completion items offered once per name, in insertion order. Snippets
/// share labels with keywords and are always kept.
#[derive(Default)]
struct Collector {
    items: Vec<CompletionItem>,
    seen: HashSet<String>,
}

impl Collector {
    fn push(
        &mut self,
        item: CompletionItem,
    ) {
        let key = item.filter_text.clone().unwrap_or_else(|| item.label.clone());
        if item.kind == Some(CompletionItemKind::SNIPPET) || self.seen.insert(key) {
            self.items.push(item);
        }
    }

    fn extend(
        &mut self,
        items: impl IntoIterator<Item = CompletionItem>,
    ) {
        for item in items {
            self.push(item);
        }
    }
}

/// Provides completion items for HLSL and ShaderLab documents.
pub struct CompletionProvider {
    graph: IncludeGraph,
}

impl CompletionProvider {
    pub fn new(graph: IncludeGraph) -> Self {
        Self {
            graph,
        }
    }

    /// Build a completion list for the document at `uri`.
    pub fn provide(
        &self,
        uri: &Url,
        position: Position,
    ) -> Vec<CompletionItem> {
        let Some(entry) = self.graph.entry(uri) else {
            return Vec::new();
        };
        let Some(offset) = entry.document.offset_of(position) else {
            return Vec::new();
        };
        let ctx = detect_context(&entry.document.text, offset);
        debug!("[completion] {:?} at {}:{}", ctx, position.line, position.character);

        match entry.language {
            ShaderLanguage::Hlsl => match ctx {
                CursorContext::Silent => Vec::new(),
                CursorContext::MemberAccess {
                    ref receiver,
                } => self.member_completions(&entry, offset, receiver),
                CursorContext::Semantic => self.semantic_completions(&entry.document),
                CursorContext::General => self.general_completions(&entry, offset),
            },
            ShaderLanguage::ShaderLab => match ctx {
                CursorContext::MemberAccess {
                    ref receiver,
                } => self.shaderlab_field_completions(&entry, offset, receiver),
                _ => Vec::new(),
            },
        }
    }

    // ───────────────────────────── completions ──────────────────────────────

    fn member_completions(
        &self,
        entry: &Arc<CacheEntry>,
        offset: usize,
        receiver: &str,
    ) -> Vec<CompletionItem> {
        let declared = variable_type(&entry.document.text, offset, receiver).or_else(|| {
            self.graph
                .find_matching(Arc::clone(entry), receiver, |symbol| {
                    matches!(symbol.kind, SymbolKind::Variable | SymbolKind::Field)
                })
                .map(|found| found.symbol().detail.clone())
        });
        let Some(type_name) = declared.as_deref().and_then(base_type) else {
            debug!("[completion] no type known for '{receiver}'");
            return Vec::new();
        };

        if let Some(found) = self.graph.find_matching(Arc::clone(entry), type_name, |symbol| symbol.kind.is_type()) {
            let tree = &found.entry.tree;
            let fields: Vec<CompletionItem> = tree
                .children(found.id)
                .iter()
                .map(|id| tree.get(*id))
                .filter(|symbol| symbol.kind == SymbolKind::Field)
                .map(|field| field_item(&field.name, &field.detail))
                .collect();
            if !fields.is_empty() {
                return fields;
            }
        }
        swizzle_items(type_name)
    }

    fn semantic_completions(
        &self,
        document: &Document,
    ) -> Vec<CompletionItem> {
        let compute = is_compute_shader(document);
        builtins::of_kind(BuiltinKind::Semantic).map(|entry| semantic_item(entry, compute)).collect()
    }

    fn general_completions(
        &self,
        entry: &Arc<CacheEntry>,
        offset: usize,
    ) -> Vec<CompletionItem> {
        let mut items = Collector::default();

        items.extend(locals_in_scope(&entry.document.text, offset).into_iter().map(|local| {
            let origin = match local.origin {
                LocalOrigin::Block => "Local",
                LocalOrigin::Parameter => "Param",
            };
            CompletionItem {
                detail: Some(format!("{} {} ({origin})", local.type_name, local.name)),
                kind: Some(CompletionItemKind::VARIABLE),
                sort_text: Some(format!("00_{}", local.name)),
                label: local.name,
                ..Default::default()
            }
        }));

        items.extend(builtins::of_kind(BuiltinKind::Type).map(type_item));
        items.extend(builtins::of_kind(BuiltinKind::Keyword).map(keyword_item));
        items.extend(builtins::of_kind(BuiltinKind::Function).map(function_item));
        if is_compute_shader(&entry.document) {
            items.extend(builtins::of_kind(BuiltinKind::Snippet).map(|entry| builtin_to_completion_item(entry, "9")));
        }

        for id in entry.tree.preorder() {
            if let Some(item) = symbol_item(entry, id, "a", None) {
                items.push(item);
            }
        }

        let includes = self.graph.resolved_includes(entry);
        self.graph.walk_includes::<()>(entry, includes, |included, _| {
            let file_name = included.document.file_name();
            for id in included.tree.preorder() {
                if let Some(item) = symbol_item(included, id, "b", Some(&file_name)) {
                    items.push(item);
                }
            }
            ControlFlow::Continue(())
        });

        items.items
    }

    fn shaderlab_field_completions(
        &self,
        entry: &CacheEntry,
        offset: usize,
        receiver: &str,
    ) -> Vec<CompletionItem> {
        let Some(type_name) = shaderlab_receiver_type(&entry.document.text, offset, receiver) else {
            return Vec::new();
        };
        let tree = &entry.tree;
        let Some(target) = tree.find_all_by_name(&type_name).into_iter().find(|id| tree.get(*id).kind.is_type()) else {
            debug!("[completion] no struct named '{type_name}'");
            return Vec::new();
        };
        tree.children(target)
            .iter()
            .map(|id| tree.get(*id))
            .filter(|symbol| symbol.kind == SymbolKind::Field)
            .map(|field| field_item(&field.name, &field.detail))
            .collect()
    }
}

// ───────────────────────────── helpers ───────────────────────────────────

/// `float4[4] : COLOR` -> `float4`.
fn base_type(detail: &str) -> Option<&str> {
    let first = detail.split_whitespace().next()?;
    let name = first.split(['[', ':']).next()?;
    (!name.is_empty()).then_some(name)
}

fn field_item(
    name: &str,
    detail: &str,
) -> CompletionItem {
    CompletionItem {
        label: name.to_string(),
        label_details: Some(CompletionItemLabelDetails {
            detail: None,
            description: (!detail.is_empty()).then(|| detail.to_string()),
        }),
        kind: Some(CompletionItemKind::FIELD),
        detail: (!detail.is_empty()).then(|| detail.to_string()),
        sort_text: Some(format!("0_{name}")),
        ..Default::default()
    }
}

/// Completion item for a user symbol. Include directives are skipped.
fn symbol_item(
    entry: &CacheEntry,
    id: SymbolId,
    sort_prefix: &str,
    defined_in: Option<&str>,
) -> Option<CompletionItem> {
    let symbol = entry.tree.get(id);
    let kind = match symbol.kind {
        SymbolKind::Module | SymbolKind::Package | SymbolKind::File => return None,
        SymbolKind::Function | SymbolKind::Method => CompletionItemKind::FUNCTION,
        SymbolKind::Struct | SymbolKind::Class => CompletionItemKind::STRUCT,
        SymbolKind::Constant => CompletionItemKind::CONSTANT,
        SymbolKind::Field => CompletionItemKind::FIELD,
        SymbolKind::Property => CompletionItemKind::PROPERTY,
        SymbolKind::Variable => CompletionItemKind::VARIABLE,
    };
    let sort_text = Some(format!("{sort_prefix}_{}", symbol.name));

    if !symbol.kind.is_callable() {
        let detail = if symbol.detail.is_empty() { defined_in.unwrap_or_default() } else { symbol.detail.as_str() };
        return Some(CompletionItem {
            label: symbol.name.clone(),
            kind: Some(kind),
            detail: (!detail.is_empty()).then(|| detail.to_string()),
            sort_text,
            ..Default::default()
        });
    }

    let params = entry.parameters(id);
    let names: Vec<&str> = params.iter().map(|param| entry.tree.get(*param).name.as_str()).collect();
    let signature = entry.signature_label(id);
    let file_name = entry.document.file_name();
    let documentation = format!("```hlsl\n{signature}\n```\n\n*Defined in: {}*", defined_in.unwrap_or(&file_name));
    let (insert_text, command) = if params.is_empty() {
        (format!("{}()", symbol.name), None)
    } else {
        (
            format!("{}(", symbol.name),
            Some(Command {
                title: "Trigger Signature Help".to_string(),
                command: TRIGGER_PARAMETER_HINTS.to_string(),
                arguments: None,
            }),
        )
    };
    Some(CompletionItem {
        label: format!("{}({})", symbol.name, names.join(", ")),
        kind: Some(kind),
        detail: Some(signature),
        documentation: markdown(&documentation),
        filter_text: Some(symbol.name.clone()),
        insert_text: Some(insert_text),
        command,
        sort_text,
        ..Default::default()
    })
}

/// Declared type of `receiver` in a ShaderLab document: the last
/// `Type receiver` before `offset`.
fn shaderlab_receiver_type(
    text: &str,
    offset: usize,
    receiver: &str,
) -> Option<String> {
    let mut end = offset.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let before = mask_comments(&text[..end], &never_cancelled).ok()?;
    let pattern = Regex::new(&format!(r"\b([A-Za-z_]\w*) +{}\b", regex::escape(receiver))).ok()?;
    pattern
        .captures_iter(&before)
        .filter_map(|captures| captures.get(1))
        .map(|ty| ty.as_str())
        .filter(|ty| !hlsl::is_declaration_guard(ty))
        .last()
        .map(str::to_owned)
}

#[cfg(test)]
#[path = "../../tests/src/completion/provider_tests.rs"]
mod tests;
