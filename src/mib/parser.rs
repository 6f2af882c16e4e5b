//! MIB module parser.
//!
//! A recursive-descent reader over [`Lexer`] tokens. Each module's
//! definitions are collected as [`MibNode`]s and linked into the tree when
//! the module's `END` is reached. `IMPORTS`, `MODULE-COMPLIANCE` and
//! `AGENT-CAPABILITIES` clauses load the modules they name before parsing
//! continues.

use std::path::Path;

use super::lexer::Lexer;
use super::module::{Import, LoadStatus};
use super::node::{ANY_MODULE, EnumValue, IndexEntry, MibNode, ModuleId, Range};
use super::tc::TextualConvention;
use super::token::{MibType, Token, TokenKind};
use super::tree::PendingNodes;
use super::MibDatabase;

/// Most components an OID value may list.
const MAX_OID_COMPONENTS: usize = 32;

/// Most descriptors one `IMPORTS` clause may list.
const MAX_IMPORTS: usize = 512;

/// Longest DEFVAL text kept.
const MAX_DEFVAL: usize = 511;

/// Tokens that may start a named definition.
const NAME_TOKENS: &[TokenKind] = &[
    TokenKind::Label,
    TokenKind::Integer,
    TokenKind::Integer32,
    TokenKind::UInteger32,
    TokenKind::Unsigned32,
    TokenKind::Counter,
    TokenKind::Counter64,
    TokenKind::Gauge,
    TokenKind::IpAddress,
    TokenKind::NetworkAddress,
    TokenKind::NsapAddress,
    TokenKind::ObjectSyntax,
    TokenKind::ApplicationSyntax,
    TokenKind::SimpleSyntax,
    TokenKind::ObjectName,
    TokenKind::NotificationName,
    TokenKind::Opaque,
    TokenKind::TimeTicks,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    BetweenMibs,
    InMib,
}

/// A group member named by an `OBJECTS` or `NOTIFICATIONS` list.
#[derive(Debug)]
struct GroupMember {
    name: String,
    line: usize,
}

/// One component of an OID value: a label, a number, or both.
#[derive(Debug, Default)]
struct SubId {
    label: Option<String>,
    subid: Option<u32>,
}

/// Parse one MIB file's text on behalf of `modid`.
///
/// Returns `false` when the text has a syntax error. Definitions of a
/// module whose `END` was not reached are discarded.
pub(crate) fn parse_source(
    db: &mut MibDatabase,
    source: &[u8],
    file: &Path,
    modid: ModuleId,
) -> bool {
    let lexer = Lexer::new(source, &db.options);
    let mut parser = Parser {
        db,
        lexer,
        file,
        modid,
        objects: Vec::new(),
        notifications: Vec::new(),
        syntax_error: false,
    };
    parser.parse()
}

struct Parser<'db, 'src> {
    db: &'db mut MibDatabase,
    lexer: Lexer<'src>,
    file: &'src Path,
    modid: ModuleId,
    objects: Vec<GroupMember>,
    notifications: Vec<GroupMember>,
    syntax_error: bool,
}

impl Parser<'_, '_> {
    fn next(&mut self) -> Token {
        self.lexer.next_short_token()
    }

    fn next_quoted(&mut self) -> Token {
        self.lexer.next_token()
    }

    fn save_descriptions(&self) -> bool {
        self.db.options.save_descriptions
    }

    fn fail(&mut self, what: &str) -> bool {
        self.syntax_error = true;
        let module = self.db.modules.module_name(self.modid);
        let line = self.lexer.line();
        tracing::warn!(target: "snmp_trapd::mib", { module = %module, file = %self.file.display(), line }, "{}", what);
        false
    }

    fn parse(&mut self) -> bool {
        let mut state = State::BetweenMibs;
        let mut nodes: Vec<MibNode> = Vec::new();
        let mut carried: Option<Token> = None;

        loop {
            let token = match carried.take() {
                Some(token) => token,
                None => self.next(),
            };

            match token.kind {
                TokenKind::EndOfFile => return !self.syntax_error,
                TokenKind::End => {
                    if state != State::InMib {
                        return self.fail("END before start of MIB");
                    }
                    self.scan_group_members(&nodes);
                    let mut pending = PendingNodes::new();
                    for np in nodes.drain(..) {
                        pending.push(np);
                    }
                    self.db.do_linkup(self.modid, pending);
                    state = State::BetweenMibs;
                    continue;
                }
                TokenKind::Imports => {
                    self.parse_imports();
                    continue;
                }
                TokenKind::Exports => {
                    let mut t = token;
                    while !matches!(t.kind, TokenKind::Semi | TokenKind::EndOfFile) {
                        t = self.next();
                    }
                    continue;
                }
                kind if NAME_TOKENS.contains(&kind) => {}
                _ => {
                    let next = self.next();
                    if next.is(TokenKind::Macro) && !self.parse_macro() {
                        self.fail("bad parse of MACRO");
                    }
                    continue;
                }
            }

            let name = token.text;
            let mut next = self.next();

            // `MODULE-NAME { oid } DEFINITIONS`
            if token.kind == TokenKind::Label && next.is(TokenKind::LeftBracket) {
                while !matches!(next.kind, TokenKind::RightBracket | TokenKind::EndOfFile) {
                    next = self.next();
                }
                if next.is(TokenKind::EndOfFile) {
                    return self.fail("expected \"}\"");
                }
                next = self.next();
            }

            let definition = next.kind;
            let parsed = match definition {
                TokenKind::Definitions => {
                    if state != State::BetweenMibs {
                        return self.fail("nested MIBs");
                    }
                    state = State::InMib;
                    self.modid = match self.db.modules.which_module(&name) {
                        ANY_MODULE => self.db.modules.new_module(&name, self.file),
                        modid => modid,
                    };
                    self.objects.clear();
                    self.notifications.clear();
                    tracing::trace!(target: "snmp_trapd::mib", { module = %name, modid = self.modid }, "parsing MIB");
                    loop {
                        let t = self.next();
                        if matches!(t.kind, TokenKind::Begin | TokenKind::EndOfFile) {
                            break;
                        }
                    }
                    continue;
                }
                TokenKind::ObjectType => self.parse_object_type(&name),
                TokenKind::ObjectGroup | TokenKind::ObjectIdentity => {
                    self.parse_object_group(&name, TokenKind::Objects)
                }
                TokenKind::NotificationGroup => {
                    self.parse_object_group(&name, TokenKind::Notifications)
                }
                TokenKind::TrapType => self.parse_trap_type(&name),
                TokenKind::NotificationType => self.parse_notification_type(&name),
                TokenKind::ModuleCompliance => self.parse_compliance(&name),
                TokenKind::AgentCapabilities => self.parse_capabilities(&name),
                TokenKind::ModuleIdentity => self.parse_module_identity(&name),
                TokenKind::Macro => {
                    if !self.parse_macro() {
                        self.fail("bad parse of MACRO");
                    }
                    continue;
                }
                TokenKind::Object => {
                    if !self.next().is(TokenKind::Identifier) {
                        return self.fail("expected IDENTIFIER");
                    }
                    if !self.next().is(TokenKind::Equals) {
                        return self.fail("expected \"::=\"");
                    }
                    match self.parse_objectid(&name) {
                        Some(chain) => Some(chain),
                        None => return self.fail("bad parse of OBJECT IDENTIFIER"),
                    }
                }
                TokenKind::Equals => {
                    let (chain, after) = self.parse_asn_type(&name);
                    carried = Some(after);
                    let Some(chain) = chain else {
                        continue;
                    };
                    Some(chain)
                }
                TokenKind::EndOfFile => return !self.syntax_error,
                _ => return self.fail(&format!("bad operator {:?}", next.text)),
            };

            let Some(mut chain) = parsed else {
                return self.fail(&format!("bad parse of {:?}", definition));
            };
            if let Some(named) = chain.iter_mut().rev().find(|np| np.label == name)
                && named.kind.is_none()
                && definition.mib_type() != MibType::Other
            {
                named.kind = Some(definition);
            }
            nodes.extend(chain);
        }
    }

    /// Log group members that are neither defined nor imported.
    fn scan_group_members(&mut self, nodes: &[MibNode]) {
        let members = std::mem::take(&mut self.objects)
            .into_iter()
            .chain(std::mem::take(&mut self.notifications));
        for member in members {
            if nodes.iter().any(|np| np.label == member.name)
                || self.db.modules.import_modid(self.modid, &member.name).is_some()
            {
                continue;
            }
            tracing::debug!(target: "snmp_trapd::mib", { module = %self.db.modules.module_name(self.modid), line = member.line, name = %member.name }, "undefined group member");
        }
    }

    fn parse_imports(&mut self) {
        let mut imports: Vec<Import> = Vec::new();
        let mut unresolved = 0;

        let mut t = self.next();
        while !matches!(t.kind, TokenKind::Semi | TokenKind::EndOfFile) {
            match t.kind {
                TokenKind::Label => {
                    if imports.len() == MAX_IMPORTS {
                        tracing::debug!(target: "snmp_trapd::mib", { max = MAX_IMPORTS }, "too many imported symbols");
                        while !matches!(t.kind, TokenKind::Semi | TokenKind::EndOfFile) {
                            t = self.next();
                        }
                        return;
                    }
                    imports.push(Import {
                        label: t.text,
                        modid: ANY_MODULE,
                    });
                }
                TokenKind::From => {
                    let module = self.next();
                    if imports.len() == unresolved {
                        t = self.next();
                        continue;
                    }
                    let from = self.db.modules.which_module(&module.text);
                    for import in &mut imports[unresolved..] {
                        import.modid = from;
                    }
                    let first = unresolved;
                    unresolved = imports.len();

                    if self.db.read_module_internal(&module.text) == LoadStatus::NotFound {
                        for import in &mut imports[first..] {
                            self.db.read_import_replacements(&module.text, import);
                        }
                    }
                }
                _ => {}
            }
            t = self.next();
        }

        if imports.is_empty() {
            return;
        }
        if let Some(module) = self.db.modules.get_mut(self.modid) {
            module.imports = Some(imports);
        }
    }

    /// Skip a `MACRO ::= BEGIN ... END` body.
    fn parse_macro(&mut self) -> bool {
        [TokenKind::Equals, TokenKind::Begin, TokenKind::End]
            .into_iter()
            .all(|wanted| loop {
                let t = self.next();
                if t.is(wanted) {
                    break true;
                }
                if t.is(TokenKind::EndOfFile) {
                    break false;
                }
            })
    }

    /// `{ label(value) ... }` with the opening brace already read.
    fn parse_enumlist(&mut self) -> Option<Vec<EnumValue>> {
        let mut enums = Vec::new();
        loop {
            let t = self.next();
            match t.kind {
                TokenKind::EndOfFile => return None,
                TokenKind::RightBracket => return Some(enums),
                TokenKind::Label | TokenKind::Deprecated => {
                    if !self.next().is(TokenKind::LeftParen) {
                        return None;
                    }
                    let value = self.next();
                    if !value.is(TokenKind::Number) {
                        return None;
                    }
                    if !self.next().is(TokenKind::RightParen) {
                        return None;
                    }
                    enums.push(EnumValue {
                        label: t.text,
                        value: parse_number(&value.text),
                    });
                }
                _ => {}
            }
        }
    }

    /// `low..high | ...` with the opening parenthesis already read. A
    /// leading `SIZE (` is accepted and its closing parenthesis consumed.
    fn parse_ranges(&mut self) -> Vec<Range> {
        let mut ranges = Vec::new();
        let mut t = self.next();
        let sized = t.is(TokenKind::Size);
        let mut taken = !sized;
        if sized {
            self.next();
        }

        loop {
            if !taken {
                t = self.next();
            }
            taken = false;
            let low = parse_number(&t.text);
            let mut high = low;
            t = self.next();
            if t.is(TokenKind::Range) {
                high = parse_number(&self.next().text);
                t = self.next();
            }
            ranges.push(Range { low, high });
            if !t.is(TokenKind::Bar) {
                break;
            }
        }

        if sized {
            self.next();
        }
        ranges
    }

    /// `(SIZE (...))` after an OCTET STRING with `(` already read.
    ///
    /// `Ok` carries the ranges and the token after the constraint; `Err`
    /// carries the token that broke it.
    fn size_constraint(&mut self) -> Result<(Vec<Range>, Token), Token> {
        let t = self.next();
        if !t.is(TokenKind::Size) {
            return Err(t);
        }
        let t = self.next();
        if !t.is(TokenKind::LeftParen) {
            return Err(t);
        }
        let ranges = self.parse_ranges();
        let t = self.next();
        if !t.is(TokenKind::RightParen) {
            return Err(t);
        }
        Ok((ranges, self.next()))
    }

    /// `{ [IMPLIED] label ... }`. An empty list is an error.
    fn get_indexes(&mut self) -> Option<Vec<IndexEntry>> {
        if !self.next().is(TokenKind::LeftBracket) {
            return None;
        }
        let mut indexes = Vec::new();
        let mut implied = false;
        let mut t = self.next();
        while !matches!(t.kind, TokenKind::RightBracket | TokenKind::EndOfFile) {
            if t.is(TokenKind::Label) || t.kind.is_syntax() {
                indexes.push(IndexEntry {
                    label: t.text,
                    implied,
                });
                implied = false;
            } else if t.is(TokenKind::Implied) {
                implied = true;
            }
            t = self.next();
        }
        (!indexes.is_empty()).then_some(indexes)
    }

    /// `{ label, ... }`. An empty list is an error.
    fn get_varbinds(&mut self) -> Option<Vec<String>> {
        if !self.next().is(TokenKind::LeftBracket) {
            return None;
        }
        let mut varbinds = Vec::new();
        let mut t = self.next();
        while !matches!(t.kind, TokenKind::RightBracket | TokenKind::EndOfFile) {
            if t.is(TokenKind::Label) || t.kind.is_syntax() {
                varbinds.push(t.text);
            }
            t = self.next();
        }
        (!varbinds.is_empty()).then_some(varbinds)
    }

    /// Skip a balanced `{ ... }`.
    fn toss_object_identifier(&mut self) -> bool {
        let mut t = self.next();
        if !t.is(TokenKind::LeftBracket) {
            return false;
        }
        let mut depth = 1;
        while (!t.is(TokenKind::RightBracket) || depth > 0) && !t.is(TokenKind::EndOfFile) {
            t = self.next();
            match t.kind {
                TokenKind::LeftBracket => depth += 1,
                TokenKind::RightBracket => depth -= 1,
                _ => {}
            }
        }
        t.is(TokenKind::RightBracket)
    }

    /// Read `{ label label(n) n ... }`.
    fn getoid(&mut self) -> Option<Vec<SubId>> {
        if !self.next().is(TokenKind::LeftBracket) {
            return None;
        }
        let mut ids = Vec::new();
        let mut t = self.next();
        loop {
            if ids.len() == MAX_OID_COMPONENTS {
                return None;
            }
            match t.kind {
                TokenKind::RightBracket => return (!ids.is_empty()).then_some(ids),
                TokenKind::Label => {
                    let label = t.text;
                    t = self.next();
                    if !t.is(TokenKind::LeftParen) {
                        ids.push(SubId {
                            label: Some(label),
                            subid: None,
                        });
                        continue;
                    }
                    let number = self.next();
                    if !number.is(TokenKind::Number) || !self.next().is(TokenKind::RightParen) {
                        return None;
                    }
                    ids.push(SubId {
                        label: Some(label),
                        subid: Some(parse_subid(&number.text)?),
                    });
                }
                TokenKind::Number => ids.push(SubId {
                    label: None,
                    subid: Some(parse_subid(&t.text)?),
                }),
                _ => return None,
            }
            t = self.next();
        }
    }

    /// Turn an OID value into one node per parent/child pair. The last
    /// node is `name`; unnamed intermediate arcs get anonymous labels.
    fn parse_objectid(&mut self, name: &str) -> Option<Vec<MibNode>> {
        let mut ids = self.getoid()?;
        let line = self.lexer.line();

        if ids[0].label.is_none() {
            if ids.len() == 1 {
                return None;
            }
            let first = ids[0].subid;
            let tree = &self.db.tree;
            ids[0].label = tree
                .roots()
                .iter()
                .map(|&id| tree.node(id))
                .find(|root| Some(root.subid) == first)
                .map(|root| root.label.clone());
        }

        if ids.len() == 1 {
            let mut np = MibNode::new(self.modid, line);
            np.subid = ids[0].subid;
            np.label = name.to_string();
            np.parent = ids[0].label.take().unwrap_or_default();
            return Some(vec![np]);
        }

        let mut chain = Vec::with_capacity(ids.len() - 1);
        for i in 0..ids.len() - 1 {
            let Some(parent) = ids[i].label.clone() else {
                continue;
            };
            let mut np = MibNode::new(self.modid, line);
            np.parent = parent;
            if i == ids.len() - 2 {
                np.label = name.to_string();
            } else {
                let label = match &ids[i + 1].label {
                    Some(label) => label.clone(),
                    None => {
                        let label = self.db.next_anonymous_label();
                        ids[i + 1].label = Some(label.clone());
                        label
                    }
                };
                np.label = label;
            }
            if let Some(subid) = ids[i + 1].subid {
                np.subid = Some(subid);
            }
            chain.push(np);
        }
        (!chain.is_empty()).then_some(chain)
    }

    /// Read the OID value and hand its last arc's position to `np`.
    fn merge_parse_objectid(&mut self, mut np: MibNode, name: &str) -> Option<Vec<MibNode>> {
        let mut chain = self.parse_objectid(name)?;
        let last = chain.pop()?;
        np.label = last.label;
        np.subid = last.subid;
        np.modid = last.modid;
        np.parent = last.parent;
        chain.push(np);
        Some(chain)
    }

    /// Copy a textual convention's enums, ranges and hint onto `np`.
    fn apply_tc(&self, descriptor: &str, np: &mut MibNode) -> TokenKind {
        let index = self.db.get_tc_index(descriptor, self.modid);
        np.tc_index = index;
        match index.and_then(|index| self.db.tcs.get(index)) {
            Some(tc) => {
                np.enums = tc.enums.clone();
                np.ranges = tc.ranges.clone();
                np.hint = tc.hint.clone();
                tc.kind
            }
            None => TokenKind::Label,
        }
    }

    fn parse_object_type(&mut self, name: &str) -> Option<Vec<MibNode>> {
        if !self.next().is(TokenKind::Syntax) {
            return None;
        }
        let mut np = MibNode::new(self.modid, self.lexer.line());

        let t = self.next();
        let mut kind = t.kind;
        if kind == TokenKind::Object {
            if !self.next().is(TokenKind::Identifier) {
                return None;
            }
            kind = TokenKind::ObjectId;
        }
        if kind == TokenKind::Label {
            kind = self.apply_tc(&t.text, &mut np);
        }
        np.kind = Some(kind);

        let mut nt = self.next();
        match kind {
            TokenKind::Sequence => {
                if nt.is(TokenKind::Of) {
                    self.next();
                    nt = self.next();
                }
            }
            TokenKind::Integer
            | TokenKind::Integer32
            | TokenKind::UInteger32
            | TokenKind::Unsigned32
            | TokenKind::Counter
            | TokenKind::Gauge
            | TokenKind::BitString
            | TokenKind::Label => {
                if nt.is(TokenKind::LeftBracket) {
                    np.enums = self.parse_enumlist().unwrap_or_default();
                    nt = self.next();
                } else if nt.is(TokenKind::LeftParen) {
                    np.ranges = self.parse_ranges();
                    nt = self.next();
                }
            }
            TokenKind::OctetStr | TokenKind::Opaque => {
                if nt.is(TokenKind::LeftParen) {
                    let (ranges, after) = self.size_constraint().ok()?;
                    np.ranges = ranges;
                    nt = after;
                }
            }
            TokenKind::ObjectId
            | TokenKind::NetworkAddress
            | TokenKind::IpAddress
            | TokenKind::TimeTicks
            | TokenKind::Null
            | TokenKind::NsapAddress
            | TokenKind::Counter64 => {}
            _ => return None,
        }

        if nt.is(TokenKind::Units) {
            let units = self.next_quoted();
            if !units.is(TokenKind::QuoteString) {
                return None;
            }
            np.units = Some(units.text);
            nt = self.next();
        }

        if !nt.is(TokenKind::Access) {
            return None;
        }
        let access = self.next();
        if !matches!(
            access.kind,
            TokenKind::ReadOnly
                | TokenKind::ReadWrite
                | TokenKind::WriteOnly
                | TokenKind::NoAccess
                | TokenKind::ReadCreate
                | TokenKind::AccessibleForNotify
        ) {
            return None;
        }
        np.access = Some(access.kind);

        if !self.next().is(TokenKind::Status) {
            return None;
        }
        let status = self.next();
        if !matches!(
            status.kind,
            TokenKind::Mandatory
                | TokenKind::Current
                | TokenKind::Optional
                | TokenKind::Obsolete
                | TokenKind::Deprecated
        ) {
            return None;
        }
        np.status = Some(status.kind);

        let mut t = self.next();
        while !matches!(t.kind, TokenKind::Equals | TokenKind::EndOfFile) {
            match t.kind {
                TokenKind::Description => {
                    let text = self.next_quoted();
                    if !text.is(TokenKind::QuoteString) {
                        return None;
                    }
                    if self.save_descriptions() {
                        np.description = Some(text.text);
                    }
                }
                TokenKind::Reference => {
                    let text = self.next_quoted();
                    if !text.is(TokenKind::QuoteString) {
                        return None;
                    }
                    np.reference = Some(text.text);
                }
                TokenKind::Index => {
                    if np.augments.is_some() {
                        return None;
                    }
                    np.indexes = self.get_indexes()?;
                }
                TokenKind::Augments => {
                    if !np.indexes.is_empty() {
                        return None;
                    }
                    let mut indexes = self.get_indexes()?;
                    np.augments = Some(indexes.swap_remove(0).label);
                }
                TokenKind::DefVal => np.default_value = Some(self.parse_defval()?),
                TokenKind::NumEntries => {
                    if !self.toss_object_identifier() {
                        return None;
                    }
                }
                _ => return None,
            }
            t = self.next();
        }
        if !t.is(TokenKind::Equals) {
            return None;
        }
        self.merge_parse_objectid(np, name)
    }

    /// `DEFVAL { ... }` flattened to one line. Quoted parts keep
    /// backslash-escaped quotes.
    fn parse_defval(&mut self) -> Option<String> {
        if !self.next().is(TokenKind::LeftBracket) {
            return None;
        }
        let mut depth = 1;
        let mut text = String::new();
        let t = loop {
            let t = self.next();
            if t.is(TokenKind::EndOfFile) {
                break t;
            }
            if t.is(TokenKind::RightBracket) {
                depth -= 1;
                if depth == 0 {
                    break t;
                }
            } else if t.is(TokenKind::LeftBracket) {
                depth += 1;
            }
            let quoted = t.is(TokenKind::QuoteString);
            if quoted {
                text.push_str("\\\"");
            }
            text.push_str(&t.text);
            if quoted {
                text.push_str("\\\"");
            }
            text.push(' ');
        };
        if !t.is(TokenKind::RightBracket) || text.is_empty() {
            return None;
        }
        truncate_at_char(&mut text, MAX_DEFVAL);
        text.pop();
        Some(text)
    }

    /// OBJECT-GROUP, NOTIFICATION-GROUP and OBJECT-IDENTITY. Clause errors
    /// skip to `::=`.
    fn parse_object_group(&mut self, name: &str, list: TokenKind) -> Option<Vec<MibNode>> {
        let mut np = MibNode::new(self.modid, self.lexer.line());
        let mut t = self.next();

        'clauses: {
            if t.kind == list {
                t = self.next();
                if !t.is(TokenKind::LeftBracket) {
                    break 'clauses;
                }
                loop {
                    t = self.next();
                    if !t.is(TokenKind::Label) {
                        break 'clauses;
                    }
                    let member = GroupMember {
                        name: std::mem::take(&mut t.text),
                        line: self.lexer.line(),
                    };
                    if list == TokenKind::Notifications {
                        self.notifications.push(member);
                    } else {
                        self.objects.push(member);
                    }
                    t = self.next();
                    if !t.is(TokenKind::Comma) {
                        break;
                    }
                }
                if !t.is(TokenKind::RightBracket) {
                    break 'clauses;
                }
                t = self.next();
            }
            if !t.is(TokenKind::Status) {
                break 'clauses;
            }
            t = self.next();
            if !matches!(
                t.kind,
                TokenKind::Current | TokenKind::Deprecated | TokenKind::Obsolete
            ) {
                break 'clauses;
            }
            t = self.next();
            if !t.is(TokenKind::Description) {
                break 'clauses;
            }
            let text = self.next_quoted();
            if !text.is(TokenKind::QuoteString) {
                return None;
            }
            if self.save_descriptions() {
                np.description = Some(text.text);
            }
            t = self.next();
            if t.is(TokenKind::Reference) {
                let text = self.next_quoted();
                if !text.is(TokenKind::QuoteString) {
                    return None;
                }
                np.reference = Some(text.text);
                t = self.next();
            }
        }

        while !matches!(t.kind, TokenKind::Equals | TokenKind::EndOfFile) {
            t = self.next();
        }
        self.merge_parse_objectid(np, name)
    }

    /// SMIv1 `TRAP-TYPE`. The trap sits below a `<enterprise>#` node with
    /// subid 0 under its enterprise.
    fn parse_trap_type(&mut self, name: &str) -> Option<Vec<MibNode>> {
        let line = self.lexer.line();
        let mut np = MibNode::new(self.modid, line);
        let mut enterprise = None;

        let mut t = self.next();
        while !matches!(t.kind, TokenKind::Equals | TokenKind::EndOfFile) {
            match t.kind {
                TokenKind::Description => {
                    let text = self.next_quoted();
                    if !text.is(TokenKind::QuoteString) {
                        return None;
                    }
                    if self.save_descriptions() {
                        np.description = Some(text.text);
                    }
                }
                TokenKind::Reference => {
                    let text = self.next_quoted();
                    if !text.is(TokenKind::QuoteString) {
                        return None;
                    }
                    np.reference = Some(text.text);
                }
                TokenKind::Enterprise => {
                    let e = self.next();
                    match e.kind {
                        TokenKind::LeftBracket => {
                            let label = self.next();
                            if !label.is(TokenKind::Label) {
                                return None;
                            }
                            enterprise = Some(label.text);
                            self.next();
                        }
                        TokenKind::Label => enterprise = Some(e.text),
                        _ => return None,
                    }
                }
                TokenKind::Variables => np.varbinds = self.get_varbinds()?,
                _ => {}
            }
            t = self.next();
        }

        let number = self.next();
        np.label = name.to_string();
        if !number.is(TokenKind::Number) {
            return None;
        }
        np.subid = Some(parse_subid(&number.text)?);

        let enterprise = enterprise?;
        let mut anchor = MibNode::new(self.modid, line);
        anchor.label = format!("{}#", enterprise);
        anchor.parent = enterprise;
        np.parent = anchor.label.clone();
        Some(vec![np, anchor])
    }

    fn parse_notification_type(&mut self, name: &str) -> Option<Vec<MibNode>> {
        let mut np = MibNode::new(self.modid, self.lexer.line());
        let mut t = self.next();
        while !matches!(t.kind, TokenKind::Equals | TokenKind::EndOfFile) {
            match t.kind {
                TokenKind::Description => {
                    let text = self.next_quoted();
                    if !text.is(TokenKind::QuoteString) {
                        return None;
                    }
                    if self.save_descriptions() {
                        np.description = Some(text.text);
                    }
                }
                TokenKind::Reference => {
                    let text = self.next_quoted();
                    if !text.is(TokenKind::QuoteString) {
                        return None;
                    }
                    np.reference = Some(text.text);
                }
                TokenKind::Objects => np.varbinds = self.get_varbinds()?,
                _ => {}
            }
            t = self.next();
        }
        self.merge_parse_objectid(np, name)
    }

    /// Skip a `SYNTAX` or `WRITE-SYNTAX` refinement and return the token
    /// after it.
    fn eat_syntax(&mut self) -> Token {
        let t = self.next();
        let mut nt = self.next();
        match t.kind {
            TokenKind::Integer
            | TokenKind::Integer32
            | TokenKind::UInteger32
            | TokenKind::Unsigned32
            | TokenKind::Counter
            | TokenKind::Gauge
            | TokenKind::BitString
            | TokenKind::Label => {
                if nt.is(TokenKind::LeftBracket) {
                    let _ = self.parse_enumlist();
                    nt = self.next();
                } else if nt.is(TokenKind::LeftParen) {
                    self.parse_ranges();
                    nt = self.next();
                }
            }
            TokenKind::OctetStr | TokenKind::Opaque if nt.is(TokenKind::LeftParen) => {
                nt = match self.size_constraint() {
                    Ok((_, after)) => after,
                    Err(stop) => stop,
                };
            }
            _ => {}
        }
        nt
    }

    /// Read a module named by a compliance or capabilities clause.
    fn require_module(&mut self, name: &str) -> bool {
        matches!(
            self.db.read_module_internal(name),
            LoadStatus::Loaded | LoadStatus::AlreadyLoaded
        )
    }

    /// Read `{ label, ... }` and return the token after it, or `None` when
    /// the list is malformed.
    fn skip_label_list(&mut self) -> Option<Token> {
        if !self.next().is(TokenKind::LeftBracket) {
            return None;
        }
        let mut t;
        loop {
            if !self.next().is(TokenKind::Label) {
                return None;
            }
            t = self.next();
            if !t.is(TokenKind::Comma) {
                break;
            }
        }
        t.is(TokenKind::RightBracket).then(|| self.next())
    }

    fn parse_compliance(&mut self, name: &str) -> Option<Vec<MibNode>> {
        let mut np = MibNode::new(self.modid, self.lexer.line());
        let mut t = self.next();

        'clauses: {
            if !t.is(TokenKind::Status) {
                break 'clauses;
            }
            t = self.next();
            if !matches!(
                t.kind,
                TokenKind::Current | TokenKind::Deprecated | TokenKind::Obsolete
            ) {
                break 'clauses;
            }
            t = self.next();
            if !t.is(TokenKind::Description) {
                break 'clauses;
            }
            t = self.next_quoted();
            if !t.is(TokenKind::QuoteString) {
                break 'clauses;
            }
            if self.save_descriptions() {
                np.description = Some(std::mem::take(&mut t.text));
            }
            t = self.next();
            if t.is(TokenKind::Reference) {
                t = self.next();
                if !t.is(TokenKind::QuoteString) {
                    break 'clauses;
                }
                np.reference = Some(std::mem::take(&mut t.text));
                t = self.next();
            }

            while t.is(TokenKind::Module) {
                t = self.next();
                if t.is(TokenKind::Label) && t.text != self.db.modules.module_name(self.modid) {
                    if !self.require_module(&t.text) {
                        break 'clauses;
                    }
                    t = self.next();
                }
                if t.is(TokenKind::MandatoryGroups) {
                    match self.skip_label_list() {
                        Some(after) => t = after,
                        None => break 'clauses,
                    }
                }
                while matches!(t.kind, TokenKind::Group | TokenKind::Object) {
                    let group = t.is(TokenKind::Group);
                    t = self.next();
                    if !t.is(TokenKind::Label) {
                        break 'clauses;
                    }
                    t = self.next();
                    if !group {
                        if t.is(TokenKind::Syntax) {
                            t = self.eat_syntax();
                        }
                        if t.is(TokenKind::WriteSyntax) {
                            t = self.eat_syntax();
                        }
                        if t.is(TokenKind::MinAccess) {
                            t = self.next();
                            if !matches!(
                                t.kind,
                                TokenKind::NoAccess
                                    | TokenKind::AccessibleForNotify
                                    | TokenKind::ReadOnly
                                    | TokenKind::WriteOnly
                                    | TokenKind::ReadCreate
                                    | TokenKind::ReadWrite
                            ) {
                                break 'clauses;
                            }
                            t = self.next();
                        }
                    }
                    if !t.is(TokenKind::Description) {
                        break 'clauses;
                    }
                    t = self.next();
                    if !t.is(TokenKind::QuoteString) {
                        break 'clauses;
                    }
                    t = self.next();
                }
            }
        }

        while !matches!(t.kind, TokenKind::Equals | TokenKind::EndOfFile) {
            t = self.next_quoted();
        }
        self.merge_parse_objectid(np, name)
    }

    fn parse_capabilities(&mut self, name: &str) -> Option<Vec<MibNode>> {
        let mut np = MibNode::new(self.modid, self.lexer.line());
        let mut t = self.next();

        'clauses: {
            if !t.is(TokenKind::ProductRelease) {
                break 'clauses;
            }
            t = self.next();
            if !t.is(TokenKind::QuoteString) {
                break 'clauses;
            }
            t = self.next();
            if !t.is(TokenKind::Status) {
                break 'clauses;
            }
            t = self.next();
            if !matches!(t.kind, TokenKind::Current | TokenKind::Obsolete) {
                break 'clauses;
            }
            t = self.next();
            if !t.is(TokenKind::Description) {
                break 'clauses;
            }
            t = self.next();
            if !t.is(TokenKind::QuoteString) {
                break 'clauses;
            }
            if self.save_descriptions() {
                np.description = Some(std::mem::take(&mut t.text));
            }
            t = self.next();
            if t.is(TokenKind::Reference) {
                t = self.next();
                if !t.is(TokenKind::QuoteString) {
                    break 'clauses;
                }
                np.reference = Some(std::mem::take(&mut t.text));
                t = self.next();
            }

            while t.is(TokenKind::Supports) {
                t = self.next();
                if !t.is(TokenKind::Label) || !self.require_module(&t.text) {
                    break 'clauses;
                }
                t = self.next();
                if !t.is(TokenKind::Includes) {
                    break 'clauses;
                }
                match self.skip_label_list() {
                    Some(after) => t = after,
                    None => break 'clauses,
                }

                while t.is(TokenKind::Variation) {
                    t = self.next();
                    if !t.is(TokenKind::Label) {
                        break 'clauses;
                    }
                    t = self.next();
                    if t.is(TokenKind::Syntax) {
                        t = self.eat_syntax();
                    }
                    if t.is(TokenKind::WriteSyntax) {
                        t = self.eat_syntax();
                    }
                    if t.is(TokenKind::Access) {
                        t = self.next();
                        if !matches!(
                            t.kind,
                            TokenKind::AccessibleForNotify
                                | TokenKind::ReadOnly
                                | TokenKind::ReadWrite
                                | TokenKind::ReadCreate
                                | TokenKind::WriteOnly
                                | TokenKind::NotImplemented
                        ) {
                            break 'clauses;
                        }
                        t = self.next();
                    }
                    if t.is(TokenKind::CreationRequires) {
                        match self.skip_label_list() {
                            Some(after) => t = after,
                            None => break 'clauses,
                        }
                    }
                    if t.is(TokenKind::DefVal) {
                        if !self.toss_object_identifier() {
                            break 'clauses;
                        }
                        t = self.next();
                    }
                    if !t.is(TokenKind::Description) {
                        break 'clauses;
                    }
                    t = self.next();
                    if !t.is(TokenKind::QuoteString) {
                        break 'clauses;
                    }
                    t = self.next();
                }
            }
        }

        while !matches!(t.kind, TokenKind::Equals | TokenKind::EndOfFile) {
            t = self.next_quoted();
        }
        self.merge_parse_objectid(np, name)
    }

    fn parse_module_identity(&mut self, name: &str) -> Option<Vec<MibNode>> {
        let mut np = MibNode::new(self.modid, self.lexer.line());
        let mut t = self.next();

        'clauses: {
            let header = [
                (TokenKind::LastUpdated, false),
                (TokenKind::Organization, false),
                (TokenKind::ContactInfo, true),
            ];
            for (clause, long) in header {
                if !t.is(clause) {
                    break 'clauses;
                }
                t = if long { self.next_quoted() } else { self.next() };
                if !t.is(TokenKind::QuoteString) {
                    break 'clauses;
                }
                t = self.next();
            }
            if !t.is(TokenKind::Description) {
                break 'clauses;
            }
            t = self.next_quoted();
            if !t.is(TokenKind::QuoteString) {
                break 'clauses;
            }
            if self.save_descriptions() {
                np.description = Some(std::mem::take(&mut t.text));
            }
            t = self.next();
            while t.is(TokenKind::Revision) {
                t = self.next();
                if !t.is(TokenKind::QuoteString) {
                    break 'clauses;
                }
                t = self.next();
                if !t.is(TokenKind::Description) {
                    break 'clauses;
                }
                t = self.next_quoted();
                if !t.is(TokenKind::QuoteString) {
                    break 'clauses;
                }
                t = self.next();
            }
        }

        while !matches!(t.kind, TokenKind::Equals | TokenKind::EndOfFile) {
            t = self.next_quoted();
        }
        self.merge_parse_objectid(np, name)
    }

    /// The right-hand side of `name ::= ...`.
    ///
    /// Structured types are skipped, OID values become nodes, and plain
    /// types or `TEXTUAL-CONVENTION`s are recorded in the TC table. The
    /// token following the assignment is returned for the main loop.
    fn parse_asn_type(&mut self, name: &str) -> (Option<Vec<MibNode>>, Token) {
        let mut t = self.next();
        match t.kind {
            TokenKind::Sequence | TokenKind::Choice => {
                let mut depth = 0;
                loop {
                    let t = self.next();
                    match t.kind {
                        TokenKind::EndOfFile => return (None, t),
                        TokenKind::LeftBracket => depth += 1,
                        TokenKind::RightBracket => {
                            depth -= 1;
                            if depth == 0 {
                                return (None, self.next());
                            }
                        }
                        _ => {}
                    }
                }
            }
            TokenKind::LeftBracket => {
                self.lexer.push_back(t);
                let chain = self.parse_objectid(name);
                (chain, self.next())
            }
            TokenKind::LeftSqBracket => {
                while !matches!(t.kind, TokenKind::RightSqBracket | TokenKind::EndOfFile) {
                    t = self.next();
                }
                if t.is(TokenKind::EndOfFile) {
                    return (None, t);
                }
                let mut base = self.next();
                if base.is(TokenKind::Implicit) {
                    base = self.next();
                }
                (None, self.skip_tagged_constraint(base.kind))
            }
            _ => self.parse_type_assignment(name, t),
        }
    }

    /// Skip the constraint after `[APPLICATION n] IMPLICIT <base>`.
    fn skip_tagged_constraint(&mut self, base: TokenKind) -> Token {
        let mut nt = self.next();
        if !nt.is(TokenKind::LeftParen) || !matches!(base, TokenKind::OctetStr | TokenKind::Integer)
        {
            return nt;
        }
        let sized = base == TokenKind::OctetStr;
        if sized {
            nt = self.next();
            if !nt.is(TokenKind::Size) {
                return nt;
            }
            nt = self.next();
            if !nt.is(TokenKind::LeftParen) {
                return nt;
            }
        }
        self.next();
        loop {
            nt = self.next();
            if nt.is(TokenKind::Range) {
                self.next();
                nt = self.next();
            }
            if !nt.is(TokenKind::Bar) {
                break;
            }
        }
        if !nt.is(TokenKind::RightParen) {
            return nt;
        }
        nt = self.next();
        if sized {
            if !nt.is(TokenKind::RightParen) {
                return nt;
            }
            nt = self.next();
        }
        nt
    }

    fn parse_type_assignment(&mut self, name: &str, mut t: Token) -> (Option<Vec<MibNode>>, Token) {
        let mut hint = None;
        let mut description = None;

        if t.is(TokenKind::TextualConvention) {
            while !matches!(t.kind, TokenKind::Syntax | TokenKind::EndOfFile) {
                match t.kind {
                    TokenKind::DisplayHint => {
                        t = self.next();
                        if t.is(TokenKind::QuoteString) {
                            hint = Some(t.text.clone());
                        }
                    }
                    TokenKind::Description if self.save_descriptions() => {
                        t = self.next_quoted();
                        if t.is(TokenKind::QuoteString) {
                            description = Some(t.text.clone());
                        }
                    }
                    _ => t = self.next_quoted(),
                }
            }
            t = self.next();
        }

        let mut kind = t.kind;
        if kind == TokenKind::Object {
            let identifier = self.next();
            if !identifier.is(TokenKind::Identifier) {
                return (None, identifier);
            }
            kind = TokenKind::ObjectId;
        }
        if kind == TokenKind::Label {
            kind = self
                .db
                .get_tc_index(&t.text, self.modid)
                .and_then(|index| self.db.tcs.get(index))
                .map_or(TokenKind::Label, |tc| tc.kind);
        }

        let mut tc = TextualConvention {
            modid: self.modid,
            descriptor: name.to_string(),
            kind,
            hint,
            description,
            enums: Vec::new(),
            ranges: Vec::new(),
        };
        let mut nt = self.next();
        if nt.is(TokenKind::LeftParen) {
            tc.ranges = self.parse_ranges();
            nt = self.next();
        } else if nt.is(TokenKind::LeftBracket) {
            tc.enums = self.parse_enumlist().unwrap_or_default();
            nt = self.next();
        }

        if kind.is_syntax() {
            self.db.tcs.push(tc);
        } else {
            tracing::debug!(target: "snmp_trapd::mib", { name = %name, syntax = %t.text, line = self.lexer.line() }, "type assignment with unknown syntax");
        }
        (None, nt)
    }
}

/// Decimal value of a number token, used for enum values and range bounds.
///
/// Values above `i64::MAX` saturate; anything that is not a number (`MAX`,
/// `MIN`, hex literals) reads as 0.
fn parse_number(text: &str) -> i64 {
    text.parse::<i64>()
        .or_else(|_| text.parse::<u64>().map(|_| i64::MAX))
        .unwrap_or(0)
}

/// A sub-identifier must fit in 32 bits; anything else fails the definition.
fn parse_subid(text: &str) -> Option<u32> {
    let subid = text.parse::<u32>().ok();
    if subid.is_none() {
        tracing::debug!(target: "snmp_trapd::mib", { value = %text }, "sub-identifier out of range");
    }
    subid
}

fn truncate_at_char(text: &mut String, max: usize) {
    if text.len() <= max {
        return;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MibOptions;
    use crate::mib::tree::Renderer;

    fn load(text: &str) -> (MibDatabase, bool) {
        let mut db = MibDatabase::new(MibOptions::default());
        let path = Path::new("TEST-MIB");
        let modid = db.modules.new_module("TEST-MIB", path);
        db.modules.mark_loaded(modid);
        let ok = parse_source(&mut db, text.as_bytes(), path, modid);
        (db, ok)
    }

    fn label_at(db: &MibDatabase, arcs: &[u32]) -> Option<String> {
        let (id, depth) = db.tree.lookup(arcs)?;
        (depth == arcs.len()).then(|| db.tree.node(id).label.clone())
    }

    #[test]
    fn test_object_identifiers() {
        let (db, ok) = load(
            "TEST-MIB DEFINITIONS ::= BEGIN\n\
             org OBJECT IDENTIFIER ::= { iso 3 }\n\
             dod OBJECT IDENTIFIER ::= { org 6 }\n\
             internet OBJECT IDENTIFIER ::= { dod 1 }\n\
             END\n",
        );
        assert!(ok);
        assert_eq!(label_at(&db, &[1, 3, 6, 1]).as_deref(), Some("internet"));
    }

    #[test]
    fn test_labelled_path() {
        let (db, ok) = load(
            "TEST-MIB DEFINITIONS ::= BEGIN\n\
             internet OBJECT IDENTIFIER ::= { iso org(3) dod(6) 1 }\n\
             END\n",
        );
        assert!(ok);
        assert_eq!(label_at(&db, &[1, 3]).as_deref(), Some("org"));
        assert_eq!(label_at(&db, &[1, 3, 6]).as_deref(), Some("dod"));
        assert_eq!(label_at(&db, &[1, 3, 6, 1]).as_deref(), Some("internet"));
    }

    #[test]
    fn test_numeric_path_gets_anonymous_nodes() {
        let (db, ok) = load(
            "TEST-MIB DEFINITIONS ::= BEGIN\n\
             deep OBJECT IDENTIFIER ::= { 1 3 6 1 }\n\
             END\n",
        );
        assert!(ok);
        assert_eq!(label_at(&db, &[1, 3, 6, 1]).as_deref(), Some("deep"));
        let middle = label_at(&db, &[1, 3, 6]).unwrap();
        assert!(middle.starts_with("anonymous#"), "{}", middle);
    }

    #[test]
    fn test_object_types_and_conventions() {
        let (db, ok) = load(
            r#"TEST-MIB DEFINITIONS ::= BEGIN
TestStatus ::= TEXTUAL-CONVENTION
    DISPLAY-HINT "d"
    STATUS current
    DESCRIPTION "status"
    SYNTAX INTEGER { up(1), down(2) }
test OBJECT IDENTIFIER ::= { iso 9 }
testStatus OBJECT-TYPE
    SYNTAX TestStatus
    MAX-ACCESS read-only
    STATUS current
    DESCRIPTION "The status."
    ::= { test 1 }
testTable OBJECT-TYPE
    SYNTAX SEQUENCE OF TestEntry
    MAX-ACCESS not-accessible
    STATUS current
    DESCRIPTION "t"
    ::= { test 2 }
testEntry OBJECT-TYPE
    SYNTAX TestEntry
    MAX-ACCESS not-accessible
    STATUS current
    DESCRIPTION "e"
    INDEX { IMPLIED testName }
    ::= { testTable 1 }
TestEntry ::= SEQUENCE { testName OCTET STRING }
testName OBJECT-TYPE
    SYNTAX OCTET STRING (SIZE (1..32))
    UNITS "chars"
    MAX-ACCESS read-only
    STATUS current
    DESCRIPTION "n"
    DEFVAL { "abc" }
    ::= { testEntry 1 }
END
"#,
        );
        assert!(ok);
        assert_eq!(db.tcs.len(), 1);

        let status = db.tree.find("testStatus", ANY_MODULE).unwrap();
        let status = db.tree.node(status);
        assert_eq!(status.mib_type, MibType::Integer);
        assert_eq!(status.renderer, Renderer::Integer);
        assert_eq!(status.hint.as_deref(), Some("d"));
        assert_eq!(status.tc_index, Some(0));
        assert_eq!(status.enums.len(), 2);
        assert_eq!(status.enums[1].label, "down");
        assert!(status.description.is_none());

        let entry = db.tree.node(db.tree.find("testEntry", ANY_MODULE).unwrap());
        assert_eq!(
            entry.indexes,
            vec![IndexEntry {
                label: "testName".into(),
                implied: true
            }]
        );

        let name = db.tree.node(db.tree.find("testName", ANY_MODULE).unwrap());
        assert_eq!(name.mib_type, MibType::OctetStr);
        assert_eq!(name.units.as_deref(), Some("chars"));
        assert_eq!(name.ranges, vec![Range { low: 1, high: 32 }]);
        assert_eq!(name.default_value.as_deref(), Some("\\\"abc\\\""));
        assert_eq!(label_at(&db, &[1, 9, 2, 1, 1]).as_deref(), Some("testName"));
    }

    #[test]
    fn test_trap_type() {
        let (db, ok) = load(
            "TRAP-MIB DEFINITIONS ::= BEGIN\n\
             ent OBJECT IDENTIFIER ::= { iso 5 }\n\
             coldish TRAP-TYPE\n\
                 ENTERPRISE ent\n\
                 VARIABLES { sysName }\n\
                 DESCRIPTION \"x\"\n\
                 ::= 3\n\
             END\n",
        );
        assert!(ok);
        assert_eq!(label_at(&db, &[1, 5, 0]).as_deref(), Some("ent#"));
        let trap = db.tree.node(db.tree.find("coldish", ANY_MODULE).unwrap());
        assert_eq!(trap.subid, 3);
        assert_eq!(trap.mib_type, MibType::TrapType);
        assert_eq!(trap.varbinds, vec!["sysName".to_string()]);
    }

    #[test]
    fn test_macro_is_skipped() {
        let (db, ok) = load(
            "TEST-MIB DEFINITIONS ::= BEGIN\n\
             OBJECT-TYPE MACRO ::= BEGIN\n\
                 TYPE NOTATION ::= \"SYNTAX\" type(TYPE ObjectSyntax)\n\
                 VALUE NOTATION ::= value(VALUE ObjectName)\n\
             END\n\
             x OBJECT IDENTIFIER ::= { iso 8 }\n\
             END\n",
        );
        assert!(ok);
        assert_eq!(label_at(&db, &[1, 8]).as_deref(), Some("x"));
    }

    #[test]
    fn test_syntax_error_discards_module() {
        let (db, ok) = load(
            "BAD-MIB DEFINITIONS ::= BEGIN\n\
             good OBJECT IDENTIFIER ::= { iso 7 }\n\
             bad OBJECT IDENTIFIER ::= oops\n\
             END\n",
        );
        assert!(!ok);
        assert_eq!(label_at(&db, &[1, 7]), None);
    }

    #[test]
    fn test_end_before_definitions() {
        let (_, ok) = load("END\n");
        assert!(!ok);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), 42);
        assert_eq!(parse_number("-2147483648"), -2147483648);
        assert_eq!(parse_number("MAX"), 0);
        assert_eq!(parse_number("18446744073709551615"), i64::MAX);
        assert_eq!(parse_subid("4294967295"), Some(u32::MAX));
        assert_eq!(parse_subid("4294967296"), None);
        assert_eq!(parse_subid("-1"), None);
    }

    #[test]
    fn test_oversized_subid_fails_module() {
        let (db, ok) = load(
            "WIDE-MIB DEFINITIONS ::= BEGIN\n\
             wide OBJECT IDENTIFIER ::= { iso 4294967296 }\n\
             END\n",
        );
        assert!(!ok);
        assert_eq!(label_at(&db, &[1, 0]), None);
    }
}
