//! Module registry.
//!
//! Every MIB module the loader has heard of, whether or not it has been
//! read yet. A module's id is its registration order.

use std::path::{Path, PathBuf};

use super::node::{ANY_MODULE, ModuleId};

/// Outcome of loading one module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    /// No registered file provides the module.
    NotFound,
    Loaded,
    AlreadyLoaded,
    /// The module's file was read but did not parse.
    SyntaxError,
}

/// One `IMPORTS` entry after resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Import {
    pub label: String,
    /// Module providing the label, or [`ANY_MODULE`] when unresolved.
    pub modid: ModuleId,
}

#[derive(Clone, Debug)]
pub struct Module {
    pub name: String,
    pub file: PathBuf,
    pub modid: ModuleId,
    /// `None` until the module has been read.
    pub imports: Option<Vec<Import>>,
}

impl Module {
    pub fn is_loaded(&self) -> bool {
        self.imports.is_some()
    }
}

/// A renamed or split legacy module.
///
/// Importing `label` from `old` loads `new` instead when the tag matches:
/// a zero `tag_len` needs an exact tag match (or no tag), otherwise the
/// label must start with the first `tag_len` bytes of the tag.
#[derive(Clone, Copy, Debug)]
pub struct Compatibility {
    pub old: &'static str,
    pub new: &'static str,
    pub tag: Option<&'static str>,
    pub tag_len: usize,
}

impl Compatibility {
    pub fn matches(&self, old: &str, label: &str) -> bool {
        if self.old != old {
            return false;
        }
        match self.tag {
            None => self.tag_len == 0,
            Some(tag) if self.tag_len == 0 => tag == label,
            Some(tag) => {
                let prefix = tag.get(..self.tag_len).unwrap_or(tag);
                label.starts_with(prefix)
            }
        }
    }
}

const fn compat(
    old: &'static str,
    new: &'static str,
    tag: Option<&'static str>,
    tag_len: usize,
) -> Compatibility {
    Compatibility {
        old,
        new,
        tag,
        tag_len,
    }
}

/// Legacy module names and their replacements.
pub static COMPATIBILITY: &[Compatibility] = &[
    compat("RFC1065-SMI", "RFC1155-SMI", None, 0),
    compat("RFC1066-MIB", "RFC1156-MIB", None, 0),
    compat("RFC1156-MIB", "RFC1158-MIB", None, 0),
    compat("RFC1158-MIB", "RFC1213-MIB", None, 0),
    compat("RFC1155-SMI", "SNMPv2-SMI", None, 0),
    compat("RFC1213-MIB", "SNMPv2-SMI", Some("mib-2"), 0),
    compat("RFC1213-MIB", "SNMPv2-MIB", Some("sys"), 3),
    compat("RFC1213-MIB", "IF-MIB", Some("if"), 2),
    compat("RFC1213-MIB", "IP-MIB", Some("ip"), 2),
    compat("RFC1213-MIB", "IP-MIB", Some("icmp"), 4),
    compat("RFC1213-MIB", "TCP-MIB", Some("tcp"), 3),
    compat("RFC1213-MIB", "UDP-MIB", Some("udp"), 3),
    compat("RFC1213-MIB", "SNMPv2-SMI", Some("transmission"), 0),
    compat("RFC1213-MIB", "SNMPv2-MIB", Some("snmp"), 4),
    compat("RFC1231-MIB", "TOKENRING-MIB", None, 0),
    compat("RFC1271-MIB", "RMON-MIB", None, 0),
    compat("RFC1286-MIB", "SOURCE-ROUTING-MIB", Some("dot1dSr"), 7),
    compat("RFC1286-MIB", "BRIDGE-MIB", None, 0),
    compat("RFC1315-MIB", "FRAME-RELAY-DTE-MIB", None, 0),
    compat("RFC1316-MIB", "CHARACTER-MIB", None, 0),
    compat("RFC1406-MIB", "DS1-MIB", None, 0),
    compat("RFC-1213", "RFC1213-MIB", None, 0),
];

#[derive(Clone, Debug, Default)]
pub struct ModuleRegistry {
    modules: Vec<Module>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` as provided by `file`.
    ///
    /// A name seen before keeps its id and takes the new file.
    pub fn new_module(&mut self, name: &str, file: &Path) -> ModuleId {
        if let Some(module) = self.modules.iter_mut().find(|m| m.name == name) {
            tracing::debug!(target: "snmp_trapd::mib", { module = name, old = %module.file.display(), new = %file.display() }, "module file replaced");
            module.file = file.to_path_buf();
            return module.modid;
        }
        let modid = self.modules.len() as ModuleId;
        self.modules.push(Module {
            name: name.to_string(),
            file: file.to_path_buf(),
            modid,
            imports: None,
        });
        modid
    }

    pub fn which_module(&self, name: &str) -> ModuleId {
        self.modules
            .iter()
            .find(|m| m.name == name)
            .map_or(ANY_MODULE, |m| m.modid)
    }

    /// Name of `modid`, or `#N` when unknown.
    pub fn module_name(&self, modid: ModuleId) -> String {
        match self.get(modid) {
            Some(module) => module.name.clone(),
            None => format!("#{}", modid),
        }
    }

    pub fn get(&self, modid: ModuleId) -> Option<&Module> {
        usize::try_from(modid).ok().and_then(|idx| self.modules.get(idx))
    }

    pub fn get_mut(&mut self, modid: ModuleId) -> Option<&mut Module> {
        usize::try_from(modid)
            .ok()
            .and_then(|idx| self.modules.get_mut(idx))
    }

    /// Mark `modid` as read, with no imports yet.
    pub fn mark_loaded(&mut self, modid: ModuleId) {
        if let Some(module) = self.get_mut(modid) {
            module.imports.get_or_insert_with(Vec::new);
        }
    }

    /// Module `modid` imports `label` from, if it imports it.
    pub fn import_modid(&self, modid: ModuleId, label: &str) -> Option<ModuleId> {
        self.get(modid)?
            .imports
            .as_ref()?
            .iter()
            .find(|import| import.label == label)
            .map(|import| import.modid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
