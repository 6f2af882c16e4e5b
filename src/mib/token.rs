//! Token types produced by the MIB lexer.

/// Token kinds.
///
/// The first group are the SMI syntax keywords that may start a type
/// reference; [`TokenKind::is_syntax`] recognises them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Syntax types ===
    /// `OBJECT IDENTIFIER` once both words are read.
    ObjectId,
    /// `OCTET STRING` (lexed as one word).
    OctetStr,
    Integer,
    NetworkAddress,
    IpAddress,
    Counter,
    Gauge,
    TimeTicks,
    Opaque,
    Null,
    BitString,
    NsapAddress,
    Counter64,
    UInteger32,
    ApplicationSyntax,
    ObjectSyntax,
    SimpleSyntax,
    ObjectName,
    NotificationName,
    Unsigned32,
    Integer32,

    // === Literals ===
    /// Identifier that is not a keyword.
    Label,
    /// Decimal number, or a `'...'B` / `'...'H` literal converted to decimal.
    Number,
    /// Contents of a `"..."` string.
    QuoteString,

    // === Punctuation ===
    /// `::=`
    Equals,
    /// `{`
    LeftBracket,
    /// `}`
    RightBracket,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftSqBracket,
    /// `]`
    RightSqBracket,
    /// `,`
    Comma,
    /// `;`
    Semi,
    /// `|`
    Bar,
    /// `..`
    Range,

    // === Clause keywords ===
    Syntax,
    Sequence,
    Of,
    Choice,
    Implicit,
    Object,
    Identifier,
    Access,
    ReadOnly,
    ReadWrite,
    WriteOnly,
    NoAccess,
    ReadCreate,
    AccessibleForNotify,
    NotImplemented,
    Status,
    Mandatory,
    Optional,
    Current,
    Deprecated,
    Obsolete,
    Description,
    Reference,
    Units,
    Index,
    Implied,
    Augments,
    DefVal,
    Size,
    NumEntries,
    DisplayHint,
    Enterprise,
    Variables,
    Objects,
    Notifications,
    LastUpdated,
    Organization,
    ContactInfo,
    Revision,
    Module,
    MandatoryGroups,
    Group,
    MinAccess,
    WriteSyntax,
    ProductRelease,
    Supports,
    Includes,
    Variation,
    CreationRequires,

    // === Definition keywords ===
    ObjectType,
    ObjectGroup,
    ObjectIdentity,
    NotificationType,
    NotificationGroup,
    TrapType,
    ModuleIdentity,
    ModuleCompliance,
    AgentCapabilities,
    TextualConvention,
    Macro,

    // === Module structure ===
    Definitions,
    Begin,
    End,
    Imports,
    Exports,
    From,

    /// First word of a two-word keyword (`OCTET`, `BIT`); only seen inside
    /// the lexer.
    Continue,
    /// End of input.
    EndOfFile,
}

impl TokenKind {
    /// True for the keywords that name an SMI base type.
    pub fn is_syntax(self) -> bool {
        matches!(
            self,
            Self::ObjectId
                | Self::OctetStr
                | Self::Integer
                | Self::NetworkAddress
                | Self::IpAddress
                | Self::Counter
                | Self::Gauge
                | Self::TimeTicks
                | Self::Opaque
                | Self::Null
                | Self::BitString
                | Self::NsapAddress
                | Self::Counter64
                | Self::UInteger32
                | Self::ApplicationSyntax
                | Self::ObjectSyntax
                | Self::SimpleSyntax
                | Self::ObjectName
                | Self::NotificationName
                | Self::Unsigned32
                | Self::Integer32
        )
    }

    /// The tree type a node defined with this token ends up with.
    pub fn mib_type(self) -> MibType {
        match self {
            Self::ObjectId => MibType::ObjectId,
            Self::OctetStr => MibType::OctetStr,
            Self::Integer => MibType::Integer,
            Self::NetworkAddress => MibType::NetworkAddress,
            Self::IpAddress => MibType::IpAddress,
            Self::Counter => MibType::Counter,
            Self::Gauge => MibType::Gauge,
            Self::TimeTicks => MibType::TimeTicks,
            Self::Opaque => MibType::Opaque,
            Self::Null => MibType::Null,
            Self::Counter64 => MibType::Counter64,
            Self::BitString => MibType::BitString,
            Self::NsapAddress => MibType::NsapAddress,
            Self::UInteger32 => MibType::UInteger,
            Self::Unsigned32 => MibType::Unsigned32,
            Self::Integer32 => MibType::Integer32,
            Self::TrapType => MibType::TrapType,
            Self::NotificationType => MibType::NotificationType,
            Self::ObjectGroup => MibType::ObjectGroup,
            Self::NotificationGroup => MibType::NotificationGroup,
            Self::ModuleIdentity => MibType::ModuleIdentity,
            Self::AgentCapabilities => MibType::AgentCapabilities,
            Self::ModuleCompliance => MibType::ModuleCompliance,
            Self::ObjectIdentity => MibType::ObjectIdentity,
            _ => MibType::Other,
        }
    }
}

/// Resolved type of a tree node.
///
/// The discriminants are the numbers printed by the tree dump.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MibType {
    #[default]
    Other = 0,
    ObjectId = 1,
    OctetStr = 2,
    Integer = 3,
    NetworkAddress = 4,
    IpAddress = 5,
    Counter = 6,
    Gauge = 7,
    TimeTicks = 8,
    Opaque = 9,
    Null = 10,
    Counter64 = 11,
    BitString = 12,
    NsapAddress = 13,
    UInteger = 14,
    Unsigned32 = 15,
    Integer32 = 16,
    TrapType = 20,
    NotificationType = 21,
    ObjectGroup = 22,
    NotificationGroup = 23,
    ModuleIdentity = 24,
    AgentCapabilities = 25,
    ModuleCompliance = 26,
    ObjectIdentity = 27,
}

/// A token and its text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn eof() -> Self {
        Self::new(TokenKind::EndOfFile, "")
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_set() {
        assert!(TokenKind::Counter64.is_syntax());
        assert!(TokenKind::ObjectName.is_syntax());
        assert!(!TokenKind::Label.is_syntax());
        assert!(!TokenKind::ObjectType.is_syntax());
    }

    #[test]
    fn test_mib_type_translation() {
        assert_eq!(TokenKind::UInteger32.mib_type() as u8, 14);
        assert_eq!(TokenKind::ModuleCompliance.mib_type() as u8, 26);
        assert_eq!(TokenKind::Label.mib_type(), MibType::Other);
        assert_eq!(TokenKind::Object.mib_type(), MibType::Other);
    }
}
