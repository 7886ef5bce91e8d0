//! # Transcript
//!
//! The message log: an append-only sequence of entries, each tagged with a
//! role. The one exception to append-only is the pending placeholder, which
//! is removed once its reply (or failure) lands.
//!
//! Every send invocation owns a fresh [`EntryId`]; the placeholder carries
//! that id so overlapping sends resolve the right placeholder even when
//! replies arrive out of submission order.

use uuid::Uuid;

/// Placeholder text shown while a reply is outstanding.
pub const PENDING_TEXT: &str = "AI is responding…";
/// Shown when the server answered but carried no usable reply.
pub const NO_RESPONSE_TEXT: &str = "AI gave no response.";
/// Generic notice for transport-level failures. The cause goes to the log,
/// never to the user.
pub const CONNECTION_ERROR_TEXT: &str = "Connection error. Please try again.";

/// Correlates a send invocation with its pending placeholder.
pub type EntryId = Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum EntryKind {
    /// Text typed by the user, shown verbatim (already trimmed).
    UserText(String),
    /// A sent file: its name plus the display-only annotation.
    UserFile {
        name: String,
        annotation: Option<String>,
    },
    /// A reply from the server, already formatted for display.
    Reply(String),
    /// An inline failure notice.
    Error(String),
    /// Interim entry while a reply is outstanding. The only kind that is
    /// ever removed from the log.
    Pending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: EntryId,
    pub kind: EntryKind,
}

/// The scrolling message log.
#[derive(Debug, Default)]
pub struct Transcript {
    pub entries: Vec<Entry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry under a fresh id and returns that id.
    pub fn push(&mut self, kind: EntryKind) -> EntryId {
        let id = Uuid::new_v4();
        self.entries.push(Entry { id, kind });
        id
    }

    /// Appends the pending placeholder for the given send invocation.
    pub fn push_pending(&mut self, id: EntryId) {
        self.entries.push(Entry {
            id,
            kind: EntryKind::Pending,
        });
    }

    /// Removes the pending placeholder for `id`, if it is still present.
    /// Entries of any other kind are never removed.
    pub fn resolve_pending(&mut self, id: EntryId) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|e| !(e.id == id && e.kind == EntryKind::Pending));
        self.entries.len() != before
    }
}

/// Formats a raw reply for display: `**emphasis**` marker pairs are
/// stripped (the enclosed text stays), unpaired markers are left alone.
/// Newlines pass through untouched; the renderer shows them as line breaks.
pub fn format_reply(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find("**") {
        let Some(end) = rest[start + 2..].find("**") else {
            break;
        };
        out.push_str(&rest[..start]);
        out.push_str(&rest[start + 2..start + 2 + end]);
        rest = &rest[start + 2 + end + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Macro to generate reply-formatting test cases.
    /// $name:ident names the test (describe the rule being checked)
    /// $input:expr is the raw reply text
    /// $expected:expr is the formatted display text
    macro_rules! test_format_rules {
        ( $($name:ident: $input:expr => $expected:expr,)+ ) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(format_reply($input), $expected);
                }
            )+
        };
    }

    test_format_rules! {
        test_format_strips_emphasis_pair: "**Hi** there" => "Hi there",
        test_format_keeps_newlines: "**Hi** there\nfriend" => "Hi there\nfriend",
        test_format_multiple_pairs: "**a** and **b**" => "a and b",
        test_format_unpaired_marker_kept: "wait **what" => "wait **what",
        test_format_empty_pair_removed: "a****b" => "ab",
        test_format_plain_text_untouched: "plain text" => "plain text",
        test_format_empty_input: "" => "",
        test_format_pair_spanning_newline: "**a\nb**" => "a\nb",
    }

    #[test]
    fn test_push_assigns_unique_ids() {
        let mut log = Transcript::new();
        let a = log.push(EntryKind::UserText("one".into()));
        let b = log.push(EntryKind::UserText("two".into()));
        assert_ne!(a, b);
        assert_eq!(log.entries.len(), 2);
    }

    #[test]
    fn test_resolve_pending_removes_only_the_placeholder() {
        let mut log = Transcript::new();
        log.push(EntryKind::UserText("hello".into()));
        let id = Uuid::new_v4();
        log.push_pending(id);
        assert_eq!(log.entries.len(), 2);

        assert!(log.resolve_pending(id));
        assert_eq!(log.entries.len(), 1);
        assert_eq!(log.entries[0].kind, EntryKind::UserText("hello".into()));

        // Resolving again is a no-op.
        assert!(!log.resolve_pending(id));
        assert_eq!(log.entries.len(), 1);
    }

    #[test]
    fn test_resolve_pending_leaves_other_placeholders() {
        let mut log = Transcript::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        log.push_pending(first);
        log.push_pending(second);

        assert!(log.resolve_pending(second));
        assert_eq!(log.entries.len(), 1);
        assert_eq!(log.entries[0].id, first);
    }

    #[test]
    fn test_resolve_pending_never_removes_settled_entries() {
        let mut log = Transcript::new();
        let id = log.push(EntryKind::Reply("done".into()));
        assert!(!log.resolve_pending(id));
        assert_eq!(log.entries.len(), 1);
    }
}
