//! Module discovery and loading.
//!
//! Files are first registered by name (`add_mibdir`, `add_mibfile`), then
//! read on demand: either when another module imports them or by the final
//! sweep in `read_all_mibs`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::lexer::Lexer;
use super::module::{COMPATIBILITY, Import, LoadStatus};
use super::node::{ANY_MODULE, ModuleId};
use super::parser::parse_source;
use super::token::TokenKind;
use super::tree::PendingNodes;
use super::MibDatabase;
use crate::config::MibOptions;
use crate::error::{Error, Result};

/// True for names the directory scan skips: dotfiles and editor backups.
fn is_skipped_name(name: &str) -> bool {
    name.is_empty()
        || name.starts_with('.')
        || name.starts_with('#')
        || name.ends_with('#')
        || name.ends_with('~')
}

/// Regular files in `dir` that may be MIBs, sorted by full path.
fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::mib_load(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::mib_load(dir, e))?;
        let name = entry.file_name();
        if is_skipped_name(&name.to_string_lossy()) {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

impl MibDatabase {
    /// Build a database from every MIB file in `dir`.
    ///
    /// A directory that cannot be read is logged and leaves the three
    /// roots as the whole tree.
    pub fn init_mib(dir: impl AsRef<Path>, options: MibOptions) -> Self {
        let dir = dir.as_ref();
        let mut db = Self::new(options);
        match db.add_mibdir(dir) {
            Ok(count) => {
                tracing::debug!(target: "snmp_trapd::mib", { dir = %dir.display(), count }, "registered MIB files")
            }
            Err(e) => tracing::error!(target: "snmp_trapd::mib", { error = %e }, "cannot open MIB directory"),
        }
        db.read_all_mibs();
        if !db.failed.is_empty() {
            tracing::warn!(target: "snmp_trapd::mib", { modules = %db.failed.join(" ") }, "modules with errors");
        }
        db
    }

    /// Register `path` when it starts with `NAME DEFINITIONS`. Returns the
    /// registered module, or `None` for anything else.
    pub fn add_mibfile(&mut self, path: &Path) -> Option<ModuleId> {
        let source = match fs::read(path) {
            Ok(source) => source,
            Err(e) => {
                tracing::debug!(target: "snmp_trapd::mib", { path = %path.display(), error = %e }, "cannot read MIB file");
                return None;
            }
        };
        let mut lexer = Lexer::new(&source, &self.options);
        let name = lexer.next_short_token();
        if !name.is(TokenKind::Label) || !lexer.next_short_token().is(TokenKind::Definitions) {
            return None;
        }
        Some(self.modules.new_module(&name.text, path))
    }

    /// Register every MIB file in `dir`. Returns how many were registered.
    pub fn add_mibdir(&mut self, dir: &Path) -> Result<usize> {
        let files = scan_directory(dir)?;
        Ok(files
            .iter()
            .filter(|path| self.add_mibfile(path).is_some())
            .count())
    }

    /// Register and read a single file.
    pub fn read_mib(&mut self, path: &Path) -> Result<LoadStatus> {
        let source = fs::read(path).map_err(|e| Error::mib_load(path, e))?;
        let name = Lexer::new(&source, &self.options).next_short_token();
        if !name.is(TokenKind::Label) {
            return Err(Error::mib_load(
                path,
                io::Error::new(io::ErrorKind::InvalidData, "not a MIB module"),
            ));
        }
        self.modules.new_module(&name.text, path);
        Ok(self.read_module(&name.text))
    }

    /// Read the module `name`, falling back to its replacement for
    /// retired module names. Syntax errors are remembered for the
    /// end-of-load summary.
    pub fn read_module(&mut self, name: &str) -> LoadStatus {
        let status = self.read_module_internal(name);
        match status {
            LoadStatus::NotFound => {
                self.read_module_replacements(name);
            }
            LoadStatus::SyntaxError => self.failed.push(name.to_string()),
            LoadStatus::Loaded | LoadStatus::AlreadyLoaded => {}
        }
        status
    }

    pub(crate) fn read_module_internal(&mut self, name: &str) -> LoadStatus {
        let Some(module) = self.modules.iter().find(|m| m.name == name) else {
            return LoadStatus::NotFound;
        };
        if module.is_loaded() {
            tracing::trace!(target: "snmp_trapd::mib", { module = name }, "module already loaded");
            return LoadStatus::AlreadyLoaded;
        }
        let modid = module.modid;
        let file = module.file.clone();

        let source = match fs::read(&file) {
            Ok(source) => source,
            Err(e) => {
                tracing::debug!(target: "snmp_trapd::mib", { module = name, path = %file.display(), error = %e }, "cannot read MIB file");
                return LoadStatus::NotFound;
            }
        };

        self.modules.mark_loaded(modid);
        if parse_source(self, &source, &file, modid) {
            LoadStatus::Loaded
        } else {
            LoadStatus::SyntaxError
        }
    }

    fn read_module_replacements(&mut self, name: &str) -> bool {
        match COMPATIBILITY.iter().find(|c| c.old == name) {
            Some(compat) => {
                tracing::debug!(target: "snmp_trapd::mib", { old = name, new = compat.new }, "loading replacement module");
                self.read_module(compat.new);
                true
            }
            None => false,
        }
    }

    /// Resolve one import from a module that could not be found.
    pub(crate) fn read_import_replacements(&mut self, old: &str, import: &mut Import) -> bool {
        match COMPATIBILITY.iter().find(|c| c.matches(old, &import.label)) {
            Some(compat) => {
                self.read_module(compat.new);
                import.modid = self.modules.which_module(compat.new);
                true
            }
            None => self.read_module_replacements(old),
        }
    }

    /// Read every registered module that has not been read yet, then
    /// give orphaned definitions another chance to link.
    pub fn read_all_mibs(&mut self) {
        let mut modid = 0;
        while let Some(module) = self.modules.get(modid) {
            if !module.is_loaded() {
                let name = module.name.clone();
                self.read_module(&name);
            }
            modid += 1;
        }
        self.adopt_orphans();
    }

    /// Link a finished module's definitions below the nodes it imports,
    /// then below the roots. Whatever is left becomes an orphan.
    pub(crate) fn do_linkup(&mut self, modid: ModuleId, mut pending: PendingNodes) {
        let imports = match self.modules.get(modid).and_then(|m| m.imports.as_ref()) {
            Some(imports) if !imports.is_empty() => imports.clone(),
            _ => self.root_imports().to_vec(),
        };
        let replace = self.options.replace;

        for import in &imports {
            if self.get_tc_index(&import.label, import.modid).is_some() {
                continue;
            }
            if let Some(tp) = self.tree.find(&import.label, import.modid) {
                self.tree.do_subtree(tp, &mut pending, replace);
            }
        }
        if pending.is_empty() {
            return;
        }

        for root in self.tree.roots().to_vec() {
            self.tree.do_subtree(root, &mut pending, replace);
        }
        if pending.is_empty() {
            return;
        }

        tracing::trace!(target: "snmp_trapd::mib", { module = %self.modules.module_name(modid), count = pending.len() }, "definitions without a parent yet");
        self.orphans.append(pending);
    }

    /// Link orphans whose parent has since appeared, until nothing moves.
    fn adopt_orphans(&mut self) {
        if self.orphans.is_empty() {
            return;
        }
        let mut orphans = std::mem::take(&mut self.orphans);
        let replace = self.options.replace;

        loop {
            let mut adopted = false;
            for parent in orphans.parents() {
                if let Some(tp) = self.tree.find(&parent, ANY_MODULE) {
                    self.tree.do_subtree(tp, &mut orphans, replace);
                    adopted = true;
                }
            }
            if !adopted {
                break;
            }
        }

        for np in orphans.nodes() {
            tracing::debug!(target: "snmp_trapd::mib", { module = %self.modules.module_name(np.modid), line = np.line, label = %np.label, parent = %np.parent }, "unlinked OID");
        }
        self.orphans = orphans;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipped_names() {
        assert!(is_skipped_name(".hidden"));
        assert!(is_skipped_name("#IF-MIB#"));
        assert!(is_skipped_name("IF-MIB~"));
        assert!(is_skipped_name("#draft"));
        assert!(!is_skipped_name("IF-MIB.txt"));
        assert!(!is_skipped_name("SNMPv2-SMI"));
    }

    #[test]
    fn test_missing_directory() {
        let mut db = MibDatabase::new(MibOptions::default());
        let err = db
            .add_mibdir(Path::new("/nonexistent/snmp-trapd/mibs"))
            .unwrap_err();
        assert!(matches!(err, Error::MibLoad { .. }));
    }

    #[test]
    fn test_init_with_missing_directory_keeps_roots() {
        let db = MibDatabase::init_mib("/nonexistent/snmp-trapd/mibs", MibOptions::default());
        assert_eq!(db.tree().len(), 3);
        assert!(db.modules().is_empty());
    }

    #[test]
    fn test_unknown_module() {
        let mut db = MibDatabase::new(MibOptions::default());
        assert_eq!(db.read_module("NO-SUCH-MIB"), LoadStatus::NotFound);
        assert!(db.failed_modules().is_empty());
    }
}
