/// What kind of symbol this builtin represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    Keyword,
    Type,
    Function,
    Semantic,
    Snippet,
}

/// Function groups, in the order completion lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FunctionCategory {
    Math,
    Texture,
    Intrinsic,
    Barrier,
    Atomic,
    Unity,
}

impl FunctionCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::Texture => "texture",
            Self::Intrinsic => "intrinsic",
            Self::Barrier => "barrier",
            Self::Atomic => "atomic",
            Self::Unity => "unity",
        }
    }

    pub fn sort_index(self) -> u8 {
        self as u8
    }

    /// Compute-only groups are surfaced as compute functions.
    pub fn is_compute(self) -> bool {
        matches!(self, Self::Barrier | Self::Atomic)
    }
}

/// Type groups used for completion ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeCategory {
    Scalar,
    Vector,
    Matrix,
    Sampler,
    Texture,
    RwTexture,
    Buffer,
}

impl TypeCategory {
    pub fn sort_index(self) -> u8 {
        self as u8
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Scalar => "Scalar type",
            Self::Vector => "Vector type",
            Self::Matrix => "Matrix type",
            Self::Sampler => "Sampler type",
            Self::Texture => "Texture type",
            Self::RwTexture => "Read-write texture type",
            Self::Buffer => "Buffer type",
        }
    }
}

/// Pipeline stage a semantic applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Pixel,
    Compute,
    All,
}

impl ShaderStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Pixel => "pixel",
            Self::Compute => "compute",
            Self::All => "all",
        }
    }
}

/// A static database entry for an HLSL built-in symbol.
#[derive(Debug, Clone)]
pub struct BuiltinEntry {
    pub label: String,
    pub detail: String,
    pub documentation: String,
    pub insert_text: Option<String>,
    pub is_snippet: bool,
    pub kind: BuiltinKind,
    pub function_category: Option<FunctionCategory>,
    pub type_category: Option<TypeCategory>,
    pub stage: Option<ShaderStage>,
}

impl BuiltinEntry {
    fn base(
        label: &str,
        detail: &str,
        doc: &str,
        kind: BuiltinKind,
    ) -> Self {
        Self {
            label: label.to_string(),
            detail: detail.to_string(),
            documentation: doc.to_string(),
            insert_text: None,
            is_snippet: false,
            kind,
            function_category: None,
            type_category: None,
            stage: None,
        }
    }

    pub(crate) fn keyword(label: &str) -> Self {
        Self::base(label, "HLSL Keyword", "", BuiltinKind::Keyword)
    }

    pub(crate) fn typ(
        label: &str,
        category: TypeCategory,
    ) -> Self {
        Self {
            type_category: Some(category),
            ..Self::base(label, "HLSL Type", category.describe(), BuiltinKind::Type)
        }
    }

    /// A function entry; the snippet insertion text is derived from the
    /// parameter names in `signature`.
    pub(crate) fn func(
        label: &str,
        signature: &str,
        doc: &str,
        category: FunctionCategory,
    ) -> Self {
        Self {
            insert_text: Some(call_snippet(label, signature)),
            is_snippet: true,
            function_category: Some(category),
            ..Self::base(label, signature, doc, BuiltinKind::Function)
        }
    }

    pub(crate) fn semantic(
        label: &str,
        doc: &str,
        stage: ShaderStage,
    ) -> Self {
        Self {
            stage: Some(stage),
            ..Self::base(label, &format!("Semantic ({})", stage.as_str()), doc, BuiltinKind::Semantic)
        }
    }

    pub(crate) fn snippet(
        label: &str,
        detail: &str,
        snippet: &str,
    ) -> Self {
        Self {
            insert_text: Some(snippet.to_string()),
            is_snippet: true,
            ..Self::base(label, detail, "", BuiltinKind::Snippet)
        }
    }

    /// Parameter list of a function signature, split on top-level commas.
    pub fn parameters(&self) -> Vec<String> {
        signature_parameters(&self.detail)
    }
}

/// Split the parenthesised parameter list of `signature`.
pub fn signature_parameters(signature: &str) -> Vec<String> {
    let Some(open) = signature.find('(') else {
        return Vec::new();
    };
    let Some(close) = signature.rfind(')') else {
        return Vec::new();
    };
    if close <= open {
        return Vec::new();
    }
    let inner = &signature[open + 1..close];
    let mut params = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for ch in inner.chars() {
        match ch {
            '(' | '<' | '[' => depth += 1,
            ')' | '>' | ']' => depth -= 1,
            ',' if depth == 0 => {
                params.push(current.trim().to_string());
                current.clear();
                continue;
            },
            _ => {},
        }
        current.push(ch);
    }
    if !current.trim().is_empty() {
        params.push(current.trim().to_string());
    }
    params
}

fn call_snippet(
    label: &str,
    signature: &str,
) -> String {
    let placeholders: Vec<String> = signature_parameters(signature)
        .iter()
        .enumerate()
        .map(|(index, param)| {
            let name = param
                .split_whitespace()
                .last()
                .map(|word| word.replace(['[', ']'], ""))
                .filter(|word| !word.is_empty())
                .unwrap_or_else(|| format!("param{}", index + 1));
            format!("${{{}:{}}}", index + 1, name)
        })
        .collect();
    format!("{label}({})", placeholders.join(", "))
}
