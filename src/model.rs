use serde::Serialize;

/// One row of a [`Category`]: a tuple of variant values, positionally
/// aligned with the parent's `variant_names`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Selectable {
    pub variants: Vec<String>,
}

/// A named table of [`Selectable`]s with named columns ("variants").
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub name: String,
    pub variant_names: Vec<String>,
    #[serde(rename = "num_variants")]
    pub num_variants: usize,
    pub selectables: Vec<Selectable>,
}

impl Category {
    pub fn new(name: String, variant_names: Vec<String>) -> Self {
        let num_variants = variant_names.len();
        Self {
            name,
            variant_names,
            num_variants,
            selectables: Vec::new(),
        }
    }
}

/// A named subset of a [`Category`], identified by a key variant column and
/// a list of keys drawn from that column.
#[derive(Debug, Clone, Serialize)]
pub struct Group {
    pub name: String,
    pub subgroup_name: String,
    pub key_variant_name: String,
    pub keys: Vec<String>,
}

/// Either a reference to a named [`Group`], or to a selectable value of a
/// category column. Parsed from a Pair Group's `colname=type` subheader.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum ColumnType {
    Group,
    Selectable { category: String, variant: String },
}

impl ColumnType {
    /// Render back to the `type` token form used in the subheader grammar,
    /// e.g. `group` or `selectable:Color:name`.
    pub fn as_token(&self) -> String {
        match self {
            ColumnType::Group => "group".to_string(),
            ColumnType::Selectable { category, variant } => {
                format!("selectable:{category}:{variant}")
            }
        }
    }
}

/// A named table whose columns are typed as either a group reference or a
/// selectable reference into a category under a given variant.
#[derive(Debug, Clone, Serialize)]
pub struct PairGroup {
    pub name: String,
    pub column_names: Vec<String>,
    pub column_types: Vec<ColumnType>,
    /// Per-column category-consistency slot: the category name recorded on
    /// the first successfully resolved `group`-typed cell in that column.
    pub subgroup_checking: Vec<Option<String>>,
    pub pairs: Vec<Vec<String>>,
    pub valid: bool,
}

impl PairGroup {
    pub fn new(name: String, column_names: Vec<String>, column_types: Vec<ColumnType>, valid: bool) -> Self {
        let n = column_names.len();
        Self {
            name,
            column_names,
            column_types,
            subgroup_checking: vec![None; n],
            pairs: Vec::new(),
            valid,
        }
    }
}

/// A multi-sided card definition. Each side is positionally aligned with
/// the parent chapter's `column_variants`, except for the forced-first
/// rotation described in the chapter handler.
#[derive(Debug, Clone, Serialize, Default)]
pub struct Template {
    pub sides: Vec<String>,
}

/// A named group of [`Template`]s sharing a column-variants layout.
#[derive(Debug, Clone, Serialize)]
pub struct Chapter {
    pub name: String,
    pub column_variants: Vec<String>,
    pub forced_first_side: usize,
    pub templates: Vec<Template>,
    pub vocab: Vec<Group>,
}

impl Chapter {
    pub fn new(name: String, column_variants: Vec<String>, forced_first_side: usize) -> Self {
        Self {
            name,
            column_variants,
            forced_first_side,
            templates: Vec::new(),
            vocab: Vec::new(),
        }
    }
}

/// Severity of a [`Diagnostic`]. `Issue` is a validation failure
/// attributable to input; `Info` is a non-fatal extension/redundancy note.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Issue,
    Info,
}

#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub severity: Severity,
    pub message: String,
}

/// The document tree: ordered lists of the four top-level collections.
/// Names are unique within each list; extension collapses duplicates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Deck {
    pub categories: Vec<Category>,
    pub groups: Vec<Group>,
    pub pair_groups: Vec<PairGroup>,
    pub chapters: Vec<Chapter>,
}
