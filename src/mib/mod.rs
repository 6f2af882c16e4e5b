//! MIB loading and the symbol tree.
//!
//! [`MibDatabase`] owns everything read from MIB text: the module registry,
//! the textual-convention table and the tree. It is built once at startup
//! and then only read, so a decoder can share it behind an `Arc`.
//!
//! # Example
//!
//! ```no_run
//! use snmp_trapd::config::MibOptions;
//! use snmp_trapd::mib::MibDatabase;
//!
//! let db = MibDatabase::init_mib("/usr/share/snmp/mibs", MibOptions::default());
//! if let Some(node) = db.find_node("sysUpTime", None) {
//!     println!("{}", db.tree().node(node).subid);
//! }
//! for name in db.failed_modules() {
//!     eprintln!("could not parse {}", name);
//! }
//! ```

mod keyword;
mod lexer;
mod loader;
mod module;
mod node;
mod parser;
mod tc;
mod token;
mod tree;

use std::fmt;

pub use keyword::lookup_keyword;
pub use lexer::{Lexer, MAX_QUOTE_STRING, MAX_TOKEN};
pub use module::{COMPATIBILITY, Compatibility, Import, LoadStatus, Module, ModuleRegistry};
pub use node::{ANONYMOUS_PREFIX, ANY_MODULE, EnumValue, IndexEntry, MibNode, ModuleId, Range, is_anonymous};
pub use tc::{TcTable, TextualConvention};
pub use token::{MibType, Token, TokenKind};
pub use tree::{MibTree, NodeId, PendingNodes, ROOT_LABELS, Renderer, TreeNode};

use crate::config::MibOptions;
use crate::oid::Oid;

/// Modules whose definitions own the three roots, in order of preference.
const BASE_MODULES: [&str; 3] = ["SNMPv2-SMI", "RFC1155-SMI", "RFC1213-MIB"];

/// The loaded MIB knowledge base.
#[derive(Debug)]
pub struct MibDatabase {
    pub(crate) options: MibOptions,
    pub(crate) modules: ModuleRegistry,
    pub(crate) tcs: TcTable,
    pub(crate) tree: MibTree,
    pub(crate) orphans: PendingNodes,
    pub(crate) failed: Vec<String>,
    root_imports: Vec<Import>,
    anonymous: u32,
}

impl MibDatabase {
    /// An empty database holding only the `iso`, `ccitt` and
    /// `joint-iso-ccitt` roots.
    pub fn new(options: MibOptions) -> Self {
        let modules = ModuleRegistry::new();
        let base = BASE_MODULES
            .iter()
            .map(|name| modules.which_module(name))
            .find(|&modid| modid != ANY_MODULE)
            .unwrap_or(ANY_MODULE);
        let root_imports = ROOT_LABELS
            .iter()
            .map(|(label, _)| Import {
                label: (*label).to_string(),
                modid: base,
            })
            .collect();

        Self {
            options,
            modules,
            tcs: TcTable::new(),
            tree: MibTree::new(base),
            orphans: PendingNodes::new(),
            failed: Vec::new(),
            root_imports,
            anonymous: 0,
        }
    }

    pub fn options(&self) -> &MibOptions {
        &self.options
    }

    pub fn tree(&self) -> &MibTree {
        &self.tree
    }

    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    pub fn textual_conventions(&self) -> &TcTable {
        &self.tcs
    }

    /// Find a node by label, optionally restricted to one module.
    pub fn find_node(&self, label: &str, module: Option<&str>) -> Option<NodeId> {
        let modid = match module {
            Some(name) => match self.modules.which_module(name) {
                ANY_MODULE => return None,
                modid => modid,
            },
            None => ANY_MODULE,
        };
        self.tree.find(label, modid)
    }

    /// Deepest known node on the path of `oid`.
    pub fn get_node_by_oid(&self, oid: &Oid) -> Option<NodeId> {
        self.tree.lookup(oid.arcs()).map(|(id, _)| id)
    }

    /// Index of the textual convention `descriptor` as seen from `modid`.
    ///
    /// When `modid` imports the descriptor, the lookup uses the module it
    /// is imported from.
    pub fn get_tc_index(&self, descriptor: &str, modid: ModuleId) -> Option<usize> {
        let modid = self
            .modules
            .import_modid(modid, descriptor)
            .unwrap_or(modid);
        self.tcs.find(descriptor, modid)
    }

    /// Descriptor of the textual convention at `index`.
    pub fn tc_descriptor(&self, index: usize) -> Option<&str> {
        self.tcs.get(index).map(|tc| tc.descriptor.as_str())
    }

    /// Name of `modid`, or `#N` when unknown.
    pub fn module_name(&self, modid: ModuleId) -> String {
        self.modules.module_name(modid)
    }

    pub fn which_module(&self, name: &str) -> ModuleId {
        self.modules.which_module(name)
    }

    /// Modules that failed to parse, in the order they were tried.
    pub fn failed_modules(&self) -> &[String] {
        &self.failed
    }

    /// Parsed definitions still waiting for a parent.
    pub fn orphans(&self) -> &PendingNodes {
        &self.orphans
    }

    /// Write the indented listing of `id`'s subtree.
    pub fn print_subtree<W: fmt::Write>(&self, out: &mut W, id: NodeId) -> fmt::Result {
        self.tree
            .print_subtree(out, id, 0, &|modid| self.modules.module_name(modid))
    }

    /// The listing of every root's subtree.
    pub fn dump_tree(&self) -> String {
        let mut out = String::new();
        for &root in self.tree.roots() {
            // writing to a String cannot fail
            let _ = self.print_subtree(&mut out, root);
        }
        out
    }

    pub(crate) fn next_anonymous_label(&mut self) -> String {
        let label = format!("{}{}", ANONYMOUS_PREFIX, self.anonymous);
        self.anonymous += 1;
        label
    }

    pub(crate) fn root_imports(&self) -> &[Import] {
        &self.root_imports
    }
}
