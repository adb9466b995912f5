use nexchat_core::Role;

/// The UI surface a chat turn renders into.
///
/// One element per finalized user message, one placeholder per assistant
/// turn, updated in place as the reply streams in. Implementations have no
/// error conditions of their own; failures reach them only as literal text
/// via [`ChatView::fail_reply`].
pub trait ChatView {
    /// Shows a finalized message, immediately on submit.
    fn show_message(&mut self, role: &Role, content: &str);

    /// Creates the assistant placeholder with a transient pending
    /// indicator, before the stream starts.
    fn begin_reply(&mut self);

    /// Mirrors the accumulated reply into the placeholder and scrolls the
    /// surface to its end. Called once per extracted fragment; this is the
    /// typewriter effect.
    fn update_reply(&mut self, accumulated: &str);

    /// Marks the in-progress reply as final.
    fn finish_reply(&mut self);

    /// Replaces the in-progress reply with a failure notice.
    fn fail_reply(&mut self, notice: &str);

    /// Enables or disables the input-submission control. Disabled from
    /// submit to finalize-or-fail; re-enabled in all cases.
    fn set_input_enabled(&mut self, enabled: bool);
}
