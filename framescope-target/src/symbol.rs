//! Symbols, lexical blocks and the debug-info access interface

use serde::{Deserialize, Serialize};

use crate::FrameHandle;

/// How and where a symbol's value is stored.
///
/// Only the data-holding classifications can appear in a variable listing;
/// the others name entities (constants, typedefs, labels, nested functions)
/// that have no frame-resident value to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageClass {
    /// Classification could not be determined from the debug information.
    Undefined,
    Constant,
    Typedef,
    Label,
    NestedFunction,
    ConstantBytes,
    UnresolvedStatic,
    OptimizedOut,
    Argument,
    ReferenceArgument,
    IndirectRegisterArgument,
    StackLocal,
    Static,
    Register,
    ComputedLocation,
}

/// Coarse shape of a symbol's type.
///
/// Listings in simple-values mode skip value fetches for aggregates, so the
/// inspection layer only needs this classification, never the full type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeClass {
    #[default]
    Scalar,
    Pointer,
    Enum,
    Array,
    Struct,
    Union,
    Other,
}

impl TypeClass {
    /// Arrays, structs and unions are exempt from value fetching in
    /// simple-values mode: rendering them means expensive deep reads.
    pub fn is_aggregate(self) -> bool {
        matches!(self, TypeClass::Array | TypeClass::Struct | TypeClass::Union)
    }
}

/// Identity of a symbol within one debug-info source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub u32);

/// A named program entity declared in some lexical block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    /// Mangled name used for canonical re-resolution; equals `name` when the
    /// debug information carries no separate linkage name.
    pub linkage_name: String,
    pub storage: StorageClass,
    /// Whether the symbol is a function argument. Independent of the storage
    /// classification: an argument may live on the stack, in a register, or
    /// behind a computed location.
    pub is_argument: bool,
    pub type_class: TypeClass,
}

/// Identity of a lexical block within one debug-info source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u32);

/// A lexical scope of declarations tied to a code range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Symbols in declaration order.
    pub symbols: Vec<Symbol>,
    /// Set on the outermost block directly owned by a function. Scope-chain
    /// traversal stops after this block; it must never continue into file- or
    /// global-scope blocks.
    pub function_owned: bool,
    /// The syntactically enclosing block, if any.
    pub superblock: Option<BlockId>,
}

/// Read-only access to lexical scope data, supplied by the debug-info
/// collaborator. Borrowed for the duration of one request.
pub trait ScopeSource {
    /// The innermost block containing `frame`'s current code location, or
    /// the global block when `want_global` is set. `None` when the frame has
    /// no resolvable scope.
    fn block_at(&self, frame: FrameHandle, want_global: bool) -> Option<BlockId>;

    /// Resolve a block id. `None` ends a scope walk defensively; well-formed
    /// debug information never produces dangling ids.
    fn block(&self, id: BlockId) -> Option<&Block>;

    /// Find the canonical definition of a symbol by linkage name, searching
    /// `enclosing` and its superblocks.
    fn lookup_by_linkage_name(&self, linkage_name: &str, enclosing: BlockId) -> Option<&Symbol>;
}
