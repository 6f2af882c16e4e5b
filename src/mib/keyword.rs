//! Reserved-word table.
//!
//! Sorted static array searched with a binary search. Lookup is
//! case-sensitive, so `INTEGER` is a keyword and `integer` is a label.

use super::token::TokenKind;

/// Keyword table.
///
/// MUST stay sorted by ASCII byte order: `-` sorts before digits, digits
/// before uppercase, uppercase before lowercase. `test_keywords_sorted`
/// checks this.
static KEYWORDS: &[(&str, TokenKind)] = &[
    ("ACCESS", TokenKind::Access),
    ("AGENT-CAPABILITIES", TokenKind::AgentCapabilities),
    ("AUGMENTS", TokenKind::Augments),
    ("ApplicationSyntax", TokenKind::ApplicationSyntax),
    ("BEGIN", TokenKind::Begin),
    ("BIT", TokenKind::Continue),
    ("BITS", TokenKind::BitString),
    ("BITSTRING", TokenKind::BitString),
    ("CHOICE", TokenKind::Choice),
    ("CONTACT-INFO", TokenKind::ContactInfo),
    ("CREATION-REQUIRES", TokenKind::CreationRequires),
    ("Counter", TokenKind::Counter),
    ("Counter32", TokenKind::Counter),
    ("Counter64", TokenKind::Counter64),
    ("DEFINITIONS", TokenKind::Definitions),
    ("DEFVAL", TokenKind::DefVal),
    ("DESCRIPTION", TokenKind::Description),
    ("DISPLAY-HINT", TokenKind::DisplayHint),
    ("END", TokenKind::End),
    ("ENTERPRISE", TokenKind::Enterprise),
    ("EXPORTS", TokenKind::Exports),
    ("FROM", TokenKind::From),
    ("GROUP", TokenKind::Group),
    ("Gauge", TokenKind::Gauge),
    ("Gauge32", TokenKind::Gauge),
    ("IDENTIFIER", TokenKind::Identifier),
    ("IMPLICIT", TokenKind::Implicit),
    ("IMPLIED", TokenKind::Implied),
    ("IMPORTS", TokenKind::Imports),
    ("INCLUDES", TokenKind::Includes),
    ("INDEX", TokenKind::Index),
    ("INTEGER", TokenKind::Integer),
    ("Integer32", TokenKind::Integer32),
    ("IpAddress", TokenKind::IpAddress),
    ("LAST-UPDATED", TokenKind::LastUpdated),
    ("MACRO", TokenKind::Macro),
    ("MANDATORY-GROUPS", TokenKind::MandatoryGroups),
    ("MAX-ACCESS", TokenKind::Access),
    ("MIN-ACCESS", TokenKind::MinAccess),
    ("MODULE", TokenKind::Module),
    ("MODULE-COMPLIANCE", TokenKind::ModuleCompliance),
    ("MODULE-IDENTITY", TokenKind::ModuleIdentity),
    ("NOTIFICATION-GROUP", TokenKind::NotificationGroup),
    ("NOTIFICATION-TYPE", TokenKind::NotificationType),
    ("NOTIFICATIONS", TokenKind::Notifications),
    ("NULL", TokenKind::Null),
    ("NUM-ENTRIES", TokenKind::NumEntries),
    ("NetworkAddress", TokenKind::NetworkAddress),
    ("NotificationName", TokenKind::NotificationName),
    ("NsapAddress", TokenKind::NsapAddress),
    ("OBJECT", TokenKind::Object),
    ("OBJECT-GROUP", TokenKind::ObjectGroup),
    ("OBJECT-IDENTITY", TokenKind::ObjectIdentity),
    ("OBJECT-TYPE", TokenKind::ObjectType),
    ("OBJECTS", TokenKind::Objects),
    ("OCTET", TokenKind::Continue),
    ("OCTETSTRING", TokenKind::OctetStr),
    ("OF", TokenKind::Of),
    ("ORGANIZATION", TokenKind::Organization),
    ("ObjectName", TokenKind::ObjectName),
    ("ObjectSyntax", TokenKind::ObjectSyntax),
    ("Opaque", TokenKind::Opaque),
    ("PRODUCT-RELEASE", TokenKind::ProductRelease),
    ("REFERENCE", TokenKind::Reference),
    ("REVISION", TokenKind::Revision),
    ("SEQUENCE", TokenKind::Sequence),
    ("SIZE", TokenKind::Size),
    ("STATUS", TokenKind::Status),
    ("SUPPORTS", TokenKind::Supports),
    ("SYNTAX", TokenKind::Syntax),
    ("SimpleSyntax", TokenKind::SimpleSyntax),
    ("TEXTUAL-CONVENTION", TokenKind::TextualConvention),
    ("TRAP-TYPE", TokenKind::TrapType),
    ("TimeTicks", TokenKind::TimeTicks),
    ("UInteger32", TokenKind::UInteger32),
    ("UNITS", TokenKind::Units),
    ("Unsigned32", TokenKind::Unsigned32),
    ("VARIABLES", TokenKind::Variables),
    ("VARIATION", TokenKind::Variation),
    ("WRITE-SYNTAX", TokenKind::WriteSyntax),
    ("accessible-for-notify", TokenKind::AccessibleForNotify),
    ("current", TokenKind::Current),
    ("deprecated", TokenKind::Deprecated),
    ("mandatory", TokenKind::Mandatory),
    ("not-accessible", TokenKind::NoAccess),
    ("not-implemented", TokenKind::NotImplemented),
    ("obsolete", TokenKind::Obsolete),
    ("optional", TokenKind::Optional),
    ("read-create", TokenKind::ReadCreate),
    ("read-only", TokenKind::ReadOnly),
    ("read-write", TokenKind::ReadWrite),
    ("write-only", TokenKind::WriteOnly),
];

/// Look up a keyword by text.
pub fn lookup_keyword(text: &str) -> Option<TokenKind> {
    KEYWORDS
        .binary_search_by(|(word, _)| (*word).cmp(text))
        .ok()
        .map(|idx| KEYWORDS[idx].1)
}
