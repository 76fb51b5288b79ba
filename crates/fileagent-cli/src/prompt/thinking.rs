use rand::seq::SliceRandom;

const THINKING_MESSAGES: &[&str] = &[
    "Thinking",
    "Shuffling files",
    "Reading the directory tree",
    "Lining up paths",
    "Checking what exists",
    "Consulting the shell",
    "Sorting folders",
    "Counting bytes",
    "Drafting a plan",
    "Tidying up",
];

pub fn get_random_thinking_message() -> &'static str {
    THINKING_MESSAGES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("Thinking")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_comes_from_list() {
        let message = get_random_thinking_message();
        assert!(THINKING_MESSAGES.contains(&message));
    }
}
