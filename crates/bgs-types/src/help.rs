//! Help metadata attached to every command.

/// Static help metadata for one command: what it does, how to call it,
/// and a few worked examples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub command: &'static str,
    pub description: &'static str,
    pub template: &'static str,
    pub examples: &'static [&'static str],
}
