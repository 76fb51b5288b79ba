/// Replace every literal `\n` escape (backslash followed by `n`) with a real line break.
///
/// Models frequently double-escape newlines inside tool arguments and answers.
pub fn clean_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}
