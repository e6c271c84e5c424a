//! Line-based terminal input.

/// What a line typed at the prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Switch the forecast to this location.
    ChangeLocation(String),
    /// Read the current advisory.
    Listen,
    /// Stop and exit.
    Quit,
    /// Nothing typed.
    Blank,
}

/// Parses one line. Commands start with `:`; anything else is a location.
#[must_use]
pub fn parse_input(line: &str) -> Input {
    match line.trim() {
        "" => Input::Blank,
        ":listen" | ":l" => Input::Listen,
        ":quit" | ":q" => Input::Quit,
        location => Input::ChangeLocation(location.to_owned()),
    }
}
