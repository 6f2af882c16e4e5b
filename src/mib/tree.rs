//! The MIB tree.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Each node keeps
//! its children in peer order; a node's peers are its parent's children, or
//! the root list for the three top-level arcs. Nodes removed by an
//! anonymous-node merge stay in the arena but are unreachable.

use std::collections::HashMap;

use super::node::{
    ANY_MODULE, EnumValue, IndexEntry, MibNode, ModuleId, Range, is_anonymous,
};
use super::token::{MibType, TokenKind};

/// Index of a node in the tree arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Which value renderer a node uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Renderer {
    Integer,
    OctetString,
    ObjectIdentifier,
    Timeticks,
    /// Dispatch on the value's own tag.
    #[default]
    ByType,
}

impl Renderer {
    pub fn for_type(mib_type: MibType) -> Self {
        match mib_type {
            MibType::ObjectId => Self::ObjectIdentifier,
            MibType::OctetStr => Self::OctetString,
            MibType::Integer | MibType::Integer32 => Self::Integer,
            MibType::TimeTicks => Self::Timeticks,
            _ => Self::ByType,
        }
    }
}

/// A linked node.
#[derive(Clone, Debug)]
pub struct TreeNode {
    pub label: String,
    pub subid: u32,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Every module that defines this node; the first is the defining one.
    pub modules: Vec<ModuleId>,
    pub tc_index: Option<usize>,
    pub mib_type: MibType,
    pub enums: Vec<EnumValue>,
    pub ranges: Vec<Range>,
    pub indexes: Vec<IndexEntry>,
    pub augments: Option<String>,
    pub varbinds: Vec<String>,
    pub hint: Option<String>,
    pub units: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub default_value: Option<String>,
    pub access: Option<TokenKind>,
    pub status: Option<TokenKind>,
    pub renderer: Renderer,
}

impl TreeNode {
    fn root(label: &str, subid: u32, modid: ModuleId) -> Self {
        Self {
            label: label.to_string(),
            subid,
            parent: None,
            children: Vec::new(),
            modules: vec![modid],
            tc_index: None,
            mib_type: MibType::Other,
            enums: Vec::new(),
            ranges: Vec::new(),
            indexes: Vec::new(),
            augments: None,
            varbinds: Vec::new(),
            hint: None,
            units: None,
            description: None,
            reference: None,
            default_value: None,
            access: None,
            status: None,
            renderer: Renderer::ByType,
        }
    }

    fn from_mib_node(np: MibNode, parent: Option<NodeId>) -> Self {
        let mut node = Self::root("", 0, np.modid);
        node.parent = parent;
        node.fill(np);
        node
    }

    /// Replace this node's data with a parsed definition.
    fn fill(&mut self, np: MibNode) {
        let mib_type = np.kind.map(TokenKind::mib_type).unwrap_or_default();
        self.label = np.label;
        self.subid = np.subid.unwrap_or(self.subid);
        self.tc_index = np.tc_index;
        self.mib_type = mib_type;
        self.enums = np.enums;
        self.ranges = np.ranges;
        self.indexes = np.indexes;
        self.augments = np.augments;
        self.varbinds = np.varbinds;
        self.hint = np.hint;
        self.units = np.units;
        self.description = np.description;
        self.reference = np.reference;
        self.default_value = np.default_value;
        self.access = np.access;
        self.status = np.status;
        self.renderer = Renderer::for_type(mib_type);
    }

    /// The defining module.
    pub fn modid(&self) -> ModuleId {
        self.modules.first().copied().unwrap_or(ANY_MODULE)
    }
}

/// Parsed nodes waiting for their parent, keyed by parent label.
#[derive(Debug, Default)]
pub struct PendingNodes {
    by_parent: HashMap<String, Vec<MibNode>>,
}

impl PendingNodes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: MibNode) {
        self.by_parent
            .entry(node.parent.clone())
            .or_default()
            .push(node);
    }

    /// Remove and return every node whose parent is `label`, in the order
    /// they were added.
    pub fn take_children(&mut self, label: &str) -> Vec<MibNode> {
        self.by_parent.remove(label).unwrap_or_default()
    }

    /// Move every node of `other` into this set.
    pub fn append(&mut self, other: PendingNodes) {
        for (parent, nodes) in other.by_parent {
            self.by_parent.entry(parent).or_default().extend(nodes);
        }
    }

    /// Parent labels with waiting nodes, sorted.
    pub fn parents(&self) -> Vec<String> {
        let mut parents: Vec<String> = self.by_parent.keys().cloned().collect();
        parents.sort();
        parents
    }

    pub fn nodes(&self) -> impl Iterator<Item = &MibNode> {
        self.by_parent.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.by_parent.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_parent.is_empty()
    }
}

/// Labels of the three top-level arcs, in root-list order.
pub const ROOT_LABELS: [(&str, u32); 3] = [("iso", 1), ("ccitt", 0), ("joint-iso-ccitt", 2)];

/// The symbol tree.
#[derive(Clone, Debug)]
pub struct MibTree {
    nodes: Vec<TreeNode>,
    roots: Vec<NodeId>,
    labels: HashMap<String, Vec<NodeId>>,
}

impl MibTree {
    /// A tree holding only the three roots, owned by `base_modid`.
    pub fn new(base_modid: ModuleId) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            labels: HashMap::new(),
        };
        for (label, subid) in ROOT_LABELS {
            let id = tree.alloc(TreeNode::root(label, subid, base_modid));
            tree.roots.push(id);
        }
        tree
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// The peer list `id` belongs to.
    pub fn peers(&self, id: NodeId) -> &[NodeId] {
        match self.nodes[id.0].parent {
            Some(parent) => &self.nodes[parent.0].children,
            None => &self.roots,
        }
    }

    fn peers_mut(&mut self, parent: Option<NodeId>) -> &mut Vec<NodeId> {
        match parent {
            Some(parent) => &mut self.nodes[parent.0].children,
            None => &mut self.roots,
        }
    }

    /// Number of reachable nodes.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<NodeId> = self.roots.clone();
        while let Some(id) = stack.pop() {
            count += 1;
            stack.extend_from_slice(self.children(id));
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    fn alloc(&mut self, node: TreeNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.labels.entry(node.label.clone()).or_default().push(id);
        self.nodes.push(node);
        id
    }

    fn unindex(&mut self, id: NodeId) {
        let label = &self.nodes[id.0].label;
        if let Some(ids) = self.labels.get_mut(label) {
            ids.retain(|&other| other != id);
            if ids.is_empty() {
                self.labels.remove(label);
            }
        }
    }

    fn reindex(&mut self, id: NodeId) {
        let label = self.nodes[id.0].label.clone();
        self.labels.entry(label).or_default().push(id);
    }

    fn unlink(&mut self, id: NodeId) {
        let parent = self.nodes[id.0].parent;
        self.peers_mut(parent).retain(|&other| other != id);
    }

    /// Find a node by label. The most recently linked match wins.
    ///
    /// With [`ANY_MODULE`] any definition matches; otherwise the node must
    /// be defined by `modid`.
    pub fn find(&self, label: &str, modid: ModuleId) -> Option<NodeId> {
        if label.is_empty() {
            return None;
        }
        self.labels.get(label)?.iter().rev().copied().find(|&id| {
            modid == ANY_MODULE || self.nodes[id.0].modules.contains(&modid)
        })
    }

    /// Deepest node on the path of `arcs`, and how many arcs it matched.
    pub fn lookup(&self, arcs: &[u32]) -> Option<(NodeId, usize)> {
        let mut found = None;
        let mut peers: &[NodeId] = &self.roots;
        for (depth, &arc) in arcs.iter().enumerate() {
            let Some(id) = self.match_peer(peers, arc) else {
                break;
            };
            found = Some((id, depth + 1));
            peers = self.children(id);
        }
        found
    }

    /// The last of the consecutive peers carrying `subid`, starting from
    /// the first peer that carries it.
    pub fn match_peer(&self, peers: &[NodeId], subid: u32) -> Option<NodeId> {
        let start = peers.iter().position(|&id| self.nodes[id.0].subid == subid)?;
        let run = peers[start..]
            .iter()
            .take_while(|&&id| self.nodes[id.0].subid == subid)
            .count();
        Some(peers[start + run - 1])
    }

    /// Last consecutive peer after `id` that shares its subid.
    fn last_same_subid_peer(&self, id: NodeId) -> NodeId {
        let subid = self.nodes[id.0].subid;
        let peers = self.peers(id);
        let Some(start) = peers.iter().position(|&other| other == id) else {
            return id;
        };
        peers[start..]
            .iter()
            .take_while(|&&other| self.nodes[other.0].subid == subid)
            .last()
            .copied()
            .unwrap_or(id)
    }

    /// Link every pending node whose parent is `root`'s label below `root`,
    /// then recurse into each linked node.
    pub fn do_subtree(&mut self, root: NodeId, pending: &mut PendingNodes, replace: bool) {
        let xroot = self.last_same_subid_peer(root);
        let label = self.nodes[root.0].label.clone();

        for mut np in pending.take_children(&label) {
            let (scan, subid, insert_parent): (Vec<NodeId>, u32, Option<NodeId>) = match np.subid
            {
                Some(subid) => (self.children(xroot).to_vec(), subid, Some(xroot)),
                None => {
                    // `name ::= { parent }` sits beside its parent
                    let peers = self.peers(xroot);
                    let from = peers.iter().position(|&id| id == xroot).unwrap_or(0);
                    (
                        peers[from..].to_vec(),
                        self.nodes[xroot.0].subid,
                        self.nodes[xroot.0].parent,
                    )
                }
            };
            np.subid = Some(subid);

            let mut previous = None;
            let mut matched = None;
            for id in scan {
                if self.nodes[id.0].subid == subid {
                    matched = Some(id);
                    break;
                }
                previous = Some(id);
            }

            let mut anon_peer = None;
            if let Some(tp) = matched {
                if self.nodes[tp.0].label == np.label {
                    self.nodes[tp.0].modules.push(np.modid);
                    if replace {
                        self.nodes[tp.0].fill(np);
                    }
                    self.do_subtree(tp, pending, replace);
                    continue;
                }
                if is_anonymous(&np.label) || is_anonymous(&self.nodes[tp.0].label) {
                    anon_peer = Some(tp);
                }
            }

            if previous.is_none() && insert_parent.is_none() {
                tracing::debug!(target: "snmp_trapd::mib", { label = %np.label }, "no place to link node");
                continue;
            }

            let new = self.alloc(TreeNode::from_mib_node(np, insert_parent));
            let peers = self.peers_mut(insert_parent);
            let at = previous
                .and_then(|prev| peers.iter().position(|&id| id == prev))
                .map_or(0, |pos| pos + 1);
            peers.insert(at, new);
            self.do_subtree(new, pending, replace);

            if let Some(anon) = anon_peer {
                if is_anonymous(&self.nodes[new.0].label) {
                    self.merge_anon_children(new, anon);
                    self.unlink(new);
                    self.unindex(new);
                } else if is_anonymous(&self.nodes[anon.0].label) {
                    self.merge_anon_children(anon, new);
                    self.adopt_definition(anon, new);
                }
            }
        }
    }

    /// Move the named node `named` into the position held by the
    /// placeholder `anon`, then drop `named`.
    fn adopt_definition(&mut self, anon: NodeId, named: NodeId) {
        self.unindex(anon);
        self.unindex(named);
        self.unlink(named);

        let children = std::mem::take(&mut self.nodes[named.0].children);
        for &child in &children {
            self.nodes[child.0].parent = Some(anon);
        }

        let source = &self.nodes[named.0];
        let label = source.label.clone();
        let modid = source.modid();
        let tc_index = source.tc_index;
        let mib_type = source.mib_type;
        let enums = source.enums.clone();
        let ranges = source.ranges.clone();
        let indexes = source.indexes.clone();
        let augments = source.augments.clone();
        let varbinds = source.varbinds.clone();
        let hint = source.hint.clone();
        let units = source.units.clone();
        let description = source.description.clone();
        let reference = source.reference.clone();
        let default_value = source.default_value.clone();
        let parent = source.parent;

        let target = &mut self.nodes[anon.0];
        target.label = label;
        target.children = children;
        if let Some(first) = target.modules.first_mut() {
            *first = modid;
        }
        target.tc_index = tc_index;
        target.mib_type = mib_type;
        target.enums = enums;
        target.ranges = ranges;
        target.indexes = indexes;
        target.augments = augments;
        target.varbinds = varbinds;
        target.hint = hint;
        target.units = units;
        target.description = description;
        target.reference = reference;
        target.default_value = default_value;
        target.parent = parent;
        target.renderer = Renderer::for_type(mib_type);

        self.reindex(anon);
    }

    /// Merge the children of the placeholder `anon` into `other`.
    fn merge_anon_children(&mut self, anon: NodeId, other: NodeId) {
        let moving = std::mem::take(&mut self.nodes[anon.0].children);

        for child1 in moving {
            let subid = self.nodes[child1.0].subid;
            let mut merged = false;

            let mut idx = 0;
            while idx < self.nodes[other.0].children.len() {
                let child2 = self.nodes[other.0].children[idx];
                if self.nodes[child2.0].subid != subid {
                    idx += 1;
                    continue;
                }

                if is_anonymous(&self.nodes[child1.0].label) {
                    self.merge_anon_children(child1, child2);
                    self.unindex(child1);
                    merged = true;
                    break;
                } else if is_anonymous(&self.nodes[child2.0].label) {
                    self.merge_anon_children(child2, child1);
                    self.nodes[other.0].children.remove(idx);
                    self.unindex(child2);
                    self.nodes[child1.0].parent = Some(other);
                    self.nodes[other.0].children.insert(0, child1);
                    merged = true;
                    break;
                } else if self.nodes[child1.0].label == self.nodes[child2.0].label {
                    // two copies of one definition: child2 keeps both families
                    let grandchildren = std::mem::take(&mut self.nodes[child1.0].children);
                    for &grandchild in &grandchildren {
                        self.nodes[grandchild.0].parent = Some(child2);
                    }
                    self.nodes[child2.0].children.extend(grandchildren);
                    self.unindex(child1);
                    merged = true;
                    break;
                }
                idx += 1;
            }

            if !merged {
                self.nodes[child1.0].parent = Some(other);
                self.nodes[other.0].children.insert(0, child1);
            }
        }
    }

    /// Write the indented listing of `id`'s subtree.
    pub fn print_subtree<W: std::fmt::Write>(
        &self,
        out: &mut W,
        id: NodeId,
        depth: usize,
        module_name: &dyn Fn(ModuleId) -> String,
    ) -> std::fmt::Result {
        let node = self.node(id);
        writeln!(
            out,
            "{}Children of {}({}):",
            "  ".repeat(depth),
            node.label,
            node.subid
        )?;
        let indent = "  ".repeat(depth + 1);
        for &child in &node.children {
            let tp = self.node(child);
            write!(
                out,
                "{}{}:{}({}) type={}",
                indent,
                module_name(tp.modid()),
                tp.label,
                tp.subid,
                tp.mib_type as u8
            )?;
            if let Some(tc) = tp.tc_index {
                write!(out, " tc={}", tc)?;
            }
            if let Some(hint) = &tp.hint {
                write!(out, " hint={}", hint)?;
            }
            if let Some(units) = &tp.units {
                write!(out, " units={}", units)?;
            }
            if tp.modules.len() > 1 {
                write!(out, " modules:")?;
                for &modid in &tp.modules[1..] {
                    write!(out, " {}", module_name(modid))?;
                }
            }
            writeln!(out)?;
        }
        for &child in &node.children {
            if !self.node(child).children.is_empty() {
                self.print_subtree(out, child, depth + 1, module_name)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(label: &str, parent: &str, subid: u32) -> MibNode {
        MibNode {
            label: label.to_string(),
            parent: parent.to_string(),
            subid: Some(subid),
            modid: 0,
            ..MibNode::default()
        }
    }

    fn link(tree: &mut MibTree, nodes: Vec<MibNode>) -> PendingNodes {
        let mut pending = PendingNodes::new();
        for np in nodes {
            pending.push(np);
        }
        for root in tree.roots().to_vec() {
            tree.do_subtree(root, &mut pending, false);
        }
        pending
    }

    #[test]
    fn test_roots() {
        let tree = MibTree::new(ANY_MODULE);
        let labels: Vec<&str> = tree
            .roots()
            .iter()
            .map(|&id| tree.node(id).label.as_str())
            .collect();
        assert_eq!(labels, vec!["iso", "ccitt", "joint-iso-ccitt"]);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_link_chain() {
        let mut tree = MibTree::new(ANY_MODULE);
        let left = link(
            &mut tree,
            vec![
                node("org", "iso", 3),
                node("dod", "org", 6),
                node("internet", "dod", 1),
                node("stray", "nowhere", 9),
            ],
        );
        let (id, depth) = tree.lookup(&[1, 3, 6, 1, 4]).unwrap();
        assert_eq!(tree.node(id).label, "internet");
        assert_eq!(depth, 4);
        assert_eq!(left.len(), 1);
        assert_eq!(left.parents(), vec!["nowhere".to_string()]);
    }

    #[test]
    fn test_duplicate_definition_records_module() {
        let mut tree = MibTree::new(ANY_MODULE);
        link(&mut tree, vec![node("org", "iso", 3)]);
        let mut again = node("org", "iso", 3);
        again.modid = 7;
        link(&mut tree, vec![again]);
        let org = tree.find("org", 7).unwrap();
        assert_eq!(tree.node(org).modules, vec![0, 7]);
        assert_eq!(tree.children(tree.roots()[0]).len(), 1);
    }

    #[test]
    fn test_anonymous_placeholder_is_replaced() {
        let mut tree = MibTree::new(ANY_MODULE);
        link(
            &mut tree,
            vec![node("anonymous#0", "iso", 2), node("leaf", "anonymous#0", 3)],
        );
        link(
            &mut tree,
            vec![node("member-body", "iso", 2), node("other", "member-body", 4)],
        );

        let iso = tree.roots()[0];
        assert_eq!(tree.children(iso).len(), 1);
        let named = tree.children(iso)[0];
        assert_eq!(tree.node(named).label, "member-body");

        let mut kids: Vec<&str> = tree
            .children(named)
            .iter()
            .map(|&id| tree.node(id).label.as_str())
            .collect();
        kids.sort();
        assert_eq!(kids, vec!["leaf", "other"]);
        assert!(tree.find("anonymous#0", ANY_MODULE).is_none());
        assert_eq!(tree.find("member-body", ANY_MODULE), Some(named));
        assert_eq!(tree.node(tree.find("leaf", ANY_MODULE).unwrap()).parent, Some(named));
    }

    #[test]
    fn test_alias_links_beside_parent() {
        let mut tree = MibTree::new(ANY_MODULE);
        let mut alias = node("orgAlias", "org", 0);
        alias.subid = None;
        link(&mut tree, vec![node("org", "iso", 3), alias]);
        let found = tree.find("orgAlias", ANY_MODULE).unwrap();
        assert_eq!(tree.node(found).subid, 3);
        assert_eq!(tree.node(found).parent, Some(tree.roots()[0]));
        assert_eq!(tree.children(tree.roots()[0]).len(), 2);
    }

    #[test]
    fn test_renderer_selection() {
        assert_eq!(Renderer::for_type(MibType::Integer32), Renderer::Integer);
        assert_eq!(Renderer::for_type(MibType::OctetStr), Renderer::OctetString);
        assert_eq!(Renderer::for_type(MibType::Counter), Renderer::ByType);
    }

    #[test]
    fn test_print_subtree() {
        let mut tree = MibTree::new(ANY_MODULE);
        let mut org = node("org", "iso", 3);
        org.hint = Some("1d".to_string());
        link(&mut tree, vec![org]);
        let mut out = String::new();
        tree.print_subtree(&mut out, tree.roots()[0], 0, &|modid| format!("#{}", modid))
            .unwrap();
        assert_eq!(out, "Children of iso(1):\n  #0:org(3) type=0 hint=1d\n");
    }
}
