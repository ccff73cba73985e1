//! Post-mortem stack snapshots
//!
//! A [`SnapshotTarget`] is a frozen picture of one stack: frames, lexical
//! blocks, symbols and pre-rendered values, loaded from JSON. It implements
//! every collaborator trait of the inspection layer, which makes it both the
//! backing store for post-mortem inspection in the dev shell and the fixture
//! mechanism for tests.
//!
//! Snapshot format (frames innermost first, blocks referenced by index):
//!
//! ```json
//! {
//!   "frames": [
//!     { "block": 0, "pc": 4198521, "function": "main", "file": "main.c", "line": 42 }
//!   ],
//!   "blocks": [
//!     {
//!       "function_owned": true,
//!       "symbols": [
//!         { "name": "x", "storage": "stack_local", "type": "int",
//!           "values": { "0": { "value": "3" } } }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Per-symbol `values` and `entry_values` are keyed by frame level; a symbol
//! without a stored value for the requested frame reads as inaccessible.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Block, BlockId, FrameChain, FrameHandle, FramePrinter, FrameSummary, ReadError, Result,
    ScopeSource, StackError, StorageClass, Symbol, SymbolId, TypeClass, ValueSource,
};

/// Errors while loading a snapshot file.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("frame {frame} references missing block {block}")]
    MissingFrameBlock { frame: usize, block: u32 },
    #[error("block {block} references missing superblock {superblock}")]
    MissingSuperblock { block: usize, superblock: u32 },
    #[error("selected frame {0} is out of range")]
    SelectedOutOfRange(usize),
}

/// A captured value, or the failure that stood in for it at capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSpec {
    Value(String),
    Error(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotFrame {
    /// Index of the innermost block at this frame's code location.
    block: u32,
    pc: u64,
    #[serde(default)]
    function: Option<String>,
    #[serde(default)]
    file: Option<String>,
    #[serde(default)]
    line: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotSymbol {
    name: String,
    #[serde(default)]
    linkage_name: Option<String>,
    storage: StorageClass,
    #[serde(default)]
    is_argument: bool,
    #[serde(default)]
    type_class: TypeClass,
    #[serde(rename = "type", default)]
    type_text: String,
    /// Frame level -> current value.
    #[serde(default)]
    values: HashMap<u32, ValueSpec>,
    /// Frame level -> value at function entry.
    #[serde(default)]
    entry_values: HashMap<u32, ValueSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotBlock {
    #[serde(default)]
    function_owned: bool,
    #[serde(default)]
    superblock: Option<u32>,
    #[serde(default)]
    symbols: Vec<SnapshotSymbol>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    frames: Vec<SnapshotFrame>,
    #[serde(default)]
    blocks: Vec<SnapshotBlock>,
    #[serde(default)]
    selected: usize,
}

/// A frozen stack that serves as the target of inspection commands.
#[derive(Debug)]
pub struct SnapshotTarget {
    frames: Vec<SnapshotFrame>,
    blocks: Vec<Block>,
    type_text: HashMap<SymbolId, String>,
    current_values: HashMap<(SymbolId, u32), ValueSpec>,
    entry_values: HashMap<(SymbolId, u32), ValueSpec>,
    selected: usize,
}

impl SnapshotTarget {
    /// Load a snapshot from its JSON representation.
    pub fn from_json(data: &str) -> std::result::Result<Self, SnapshotError> {
        let file: SnapshotFile = serde_json::from_str(data)?;

        for (index, frame) in file.frames.iter().enumerate() {
            if frame.block as usize >= file.blocks.len() {
                return Err(SnapshotError::MissingFrameBlock {
                    frame: index,
                    block: frame.block,
                });
            }
        }
        for (index, block) in file.blocks.iter().enumerate() {
            if let Some(superblock) = block.superblock {
                if superblock as usize >= file.blocks.len() {
                    return Err(SnapshotError::MissingSuperblock {
                        block: index,
                        superblock,
                    });
                }
            }
        }
        if !file.frames.is_empty() && file.selected >= file.frames.len() {
            return Err(SnapshotError::SelectedOutOfRange(file.selected));
        }

        let mut next_symbol_id = 0u32;
        let mut type_text = HashMap::new();
        let mut current_values = HashMap::new();
        let mut entry_values = HashMap::new();

        let blocks = file
            .blocks
            .iter()
            .map(|block| {
                let symbols = block
                    .symbols
                    .iter()
                    .map(|raw| {
                        let id = SymbolId(next_symbol_id);
                        next_symbol_id += 1;

                        type_text.insert(id, raw.type_text.clone());
                        for (level, value) in &raw.values {
                            current_values.insert((id, *level), value.clone());
                        }
                        for (level, value) in &raw.entry_values {
                            entry_values.insert((id, *level), value.clone());
                        }

                        Symbol {
                            id,
                            name: raw.name.clone(),
                            linkage_name: raw
                                .linkage_name
                                .clone()
                                .unwrap_or_else(|| raw.name.clone()),
                            storage: raw.storage,
                            is_argument: raw.is_argument,
                            type_class: raw.type_class,
                        }
                    })
                    .collect();
                Block {
                    symbols,
                    function_owned: block.function_owned,
                    superblock: block.superblock.map(BlockId),
                }
            })
            .collect();

        debug!(
            "Loaded stack snapshot: {} frames, {} blocks, {} symbols",
            file.frames.len(),
            file.blocks.len(),
            next_symbol_id
        );

        Ok(SnapshotTarget {
            frames: file.frames,
            blocks,
            type_text,
            current_values,
            entry_values,
            selected: file.selected,
        })
    }

    /// Load a snapshot from a file on disk.
    pub fn from_path(path: &Path) -> std::result::Result<Self, SnapshotError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn frame(&self, handle: FrameHandle) -> Option<&SnapshotFrame> {
        self.frames.get(handle.0 as usize)
    }

    fn level(handle: FrameHandle) -> u32 {
        handle.0 as u32
    }
}

impl FrameChain for SnapshotTarget {
    fn current_frame(&self) -> Option<FrameHandle> {
        if self.frames.is_empty() {
            None
        } else {
            Some(FrameHandle(0))
        }
    }

    fn caller_of(&self, frame: FrameHandle) -> Option<FrameHandle> {
        let next = frame.0 + 1;
        if (next as usize) < self.frames.len() {
            Some(FrameHandle(next))
        } else {
            None
        }
    }

    fn selected_frame(&self) -> Option<FrameHandle> {
        if self.selected < self.frames.len() {
            Some(FrameHandle(self.selected as u64))
        } else {
            None
        }
    }

    fn select_frame(&mut self, spec: &str) -> Result<()> {
        let level: usize = spec.parse().map_err(|_| {
            StackError::Structural(format!("Invalid frame specification: {spec}"))
        })?;
        if level >= self.frames.len() {
            return Err(StackError::Structural(format!("No frame at level {level}.")));
        }
        self.selected = level;
        Ok(())
    }
}

impl ScopeSource for SnapshotTarget {
    fn block_at(&self, frame: FrameHandle, _want_global: bool) -> Option<BlockId> {
        self.frame(frame).map(|frame| BlockId(frame.block))
    }

    fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.0 as usize)
    }

    fn lookup_by_linkage_name(&self, linkage_name: &str, enclosing: BlockId) -> Option<&Symbol> {
        let mut cursor = Some(enclosing);
        while let Some(id) = cursor {
            let block = self.block(id)?;
            if let Some(symbol) = block
                .symbols
                .iter()
                .find(|symbol| symbol.linkage_name == linkage_name)
            {
                return Some(symbol);
            }
            cursor = block.superblock;
        }
        None
    }
}

impl ValueSource for SnapshotTarget {
    type Value = String;

    fn read_current_value(
        &self,
        symbol: &Symbol,
        frame: FrameHandle,
    ) -> std::result::Result<String, ReadError> {
        match self.current_values.get(&(symbol.id, Self::level(frame))) {
            Some(ValueSpec::Value(text)) => Ok(text.clone()),
            Some(ValueSpec::Error(message)) => Err(ReadError(message.clone())),
            None => Err(ReadError(format!(
                "value of '{}' was not captured in the snapshot",
                symbol.name
            ))),
        }
    }

    fn read_entry_value(
        &self,
        symbol: &Symbol,
        frame: FrameHandle,
    ) -> std::result::Result<Option<String>, ReadError> {
        match self.entry_values.get(&(symbol.id, Self::level(frame))) {
            Some(ValueSpec::Value(text)) => Ok(Some(text.clone())),
            Some(ValueSpec::Error(message)) => Err(ReadError(message.clone())),
            None => Ok(None),
        }
    }

    fn render_type(&self, symbol: &Symbol) -> String {
        self.type_text.get(&symbol.id).cloned().unwrap_or_default()
    }

    fn render_value(&self, value: &String) -> std::result::Result<String, ReadError> {
        // Snapshot values are captured pre-rendered.
        Ok(value.clone())
    }
}

impl FramePrinter for SnapshotTarget {
    fn frame_summary(&self, frame: FrameHandle, include_address: bool) -> FrameSummary {
        match self.frame(frame) {
            Some(frame) => FrameSummary {
                pc: include_address.then_some(frame.pc),
                function: frame.function.clone(),
                file: frame.file.clone(),
                line: frame.line,
            },
            None => FrameSummary {
                pc: None,
                function: None,
                file: None,
                line: None,
            },
        }
    }
}
