use apistudio_model::Document;

/// Trait for reversible document commands
///
/// Each command type implements this trait to provide:
/// - Execute logic, capturing whatever prior state undo needs
/// - Undo logic, restoring exactly that captured state
///
/// Both are silent no-ops when their target no longer resolves.
pub trait CommandOp {
    /// Apply this command, capturing the state it replaces
    fn execute(&mut self, doc: &mut Document);

    /// Restore the state captured by the last `execute`
    fn undo(&mut self, doc: &mut Document);

    /// Get a debug name for this command
    fn name(&self) -> &'static str;
}
