//! Human readable rendering of an xrandr command line

/// Joins the lines of a rendered command
pub const CONTINUATION: &str = "\\\n";

/// Renders `command` with one `--output` group per line
///
/// Tokens before the first `--output` share the first line. An empty `command` renders as an
/// empty string. The result is for display only and is not meant to be fed back into a shell
/// verbatim.
pub fn format_command<S: AsRef<str>>(command: &[S]) -> String {
    let mut lines: Vec<String> = Vec::new();

    for token in command.iter().map(AsRef::<str>::as_ref) {
        if token != "--output" {
            if let Some(line) = lines.last_mut() {
                line.push(' ');
                line.push_str(token);
                continue;
            }
        }
        lines.push(token.to_string());
    }

    lines.join(CONTINUATION)
}
