//! Symbol classification for variable listings
//!
//! Pure functions of the symbol's storage classification and argument
//! attribute: whether a symbol can be listed at all, and which listing
//! bucket it belongs to.

use framescope_target::{StorageClass, Symbol};

/// Which variables a listing request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    Locals,
    Arguments,
    All,
}

/// Whether a symbol's storage classification holds a value that can appear
/// in a listing. Constants, typedefs, labels, nested functions, unresolved
/// statics and optimized-out symbols never do.
pub fn is_listable(storage: StorageClass) -> bool {
    match storage {
        StorageClass::Argument
        | StorageClass::ReferenceArgument
        | StorageClass::IndirectRegisterArgument
        | StorageClass::StackLocal
        | StorageClass::Static
        | StorageClass::Register
        | StorageClass::ComputedLocation => true,

        StorageClass::Undefined
        | StorageClass::Constant
        | StorageClass::Typedef
        | StorageClass::Label
        | StorageClass::NestedFunction
        | StorageClass::ConstantBytes
        | StorageClass::UnresolvedStatic
        | StorageClass::OptimizedOut => false,
    }
}

/// Whether a listable symbol belongs in the requested listing. The bucket is
/// decided by the symbol's argument attribute, not its storage
/// classification.
pub fn selected_for(scope: ListScope, symbol: &Symbol) -> bool {
    match scope {
        ListScope::All => true,
        ListScope::Locals => !symbol.is_argument,
        ListScope::Arguments => symbol.is_argument,
    }
}
