/// Named character-class bodies accepted in safe mode.
///
/// Each body is the text that goes between `[` and `]`. Bodies only use
/// ASCII ranges so they read the same in every common regex dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    Ascii,
    Blank,
    Control,
    Digits,
    Graphical,
    Lowers,
    Printable,
    Punctuation,
    Whitespace,
    Uppers,
    Words,
    HexDigits,
    AlphaNumerics,
    Alphabetics,
}

impl Class {
    pub const ALL: [Class; 14] = [
        Class::Ascii,
        Class::Blank,
        Class::Control,
        Class::Digits,
        Class::Graphical,
        Class::Lowers,
        Class::Printable,
        Class::Punctuation,
        Class::Whitespace,
        Class::Uppers,
        Class::Words,
        Class::HexDigits,
        Class::AlphaNumerics,
        Class::Alphabetics,
    ];

    pub fn body(self) -> &'static str {
        match self {
            Class::Ascii => "\x00-\x7F",
            Class::Blank => "\t ",
            Class::Control => "\x00-\x1F\x7F",
            Class::Digits => "0-9",
            Class::Graphical => "!-~",
            Class::Lowers => "a-z",
            Class::Printable => " -~",
            // `[` is escaped so engines with nested classes don't open one here
            Class::Punctuation => "!-/:-@\\[-`{-~",
            Class::Whitespace => "\t\n\x0B\x0C\r ",
            Class::Uppers => "A-Z",
            Class::Words => "0-9A-Za-z_",
            Class::HexDigits => "0-9A-Fa-f",
            Class::AlphaNumerics => "A-Za-z0-9",
            Class::Alphabetics => "A-Za-z",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Class::Ascii => "Ascii",
            Class::Blank => "Blank",
            Class::Control => "Control",
            Class::Digits => "Digits",
            Class::Graphical => "Graphical",
            Class::Lowers => "Lowers",
            Class::Printable => "Printable",
            Class::Punctuation => "Punctuation",
            Class::Whitespace => "Whitespace",
            Class::Uppers => "Uppers",
            Class::Words => "Words",
            Class::HexDigits => "HexDigits",
            Class::AlphaNumerics => "AlphaNumerics",
            Class::Alphabetics => "Alphabetics",
        }
    }

    /// Finds a registry entry by name, ignoring ASCII case.
    pub fn lookup(name: &str) -> Option<Class> {
        Class::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

impl AsRef<str> for Class {
    fn as_ref(&self) -> &str {
        self.body()
    }
}

/// Returns true when `body` is one or more registry bodies concatenated.
///
/// Unions built by repeated appends are accepted as long as every piece
/// is a registry entry, e.g. `"A-Za-z0-9"`.
pub fn is_known(body: &str) -> bool {
    let bytes = body.as_bytes();
    if bytes.is_empty() {
        return false;
    }

    // reachable[i]: bytes[..i] splits into registry bodies
    let mut reachable = vec![false; bytes.len() + 1];
    reachable[0] = true;
    for start in 0..bytes.len() {
        if !reachable[start] {
            continue;
        }
        for class in Class::ALL {
            let piece = class.body().as_bytes();
            if bytes[start..].starts_with(piece) {
                reachable[start + piece.len()] = true;
            }
        }
    }
    reachable[bytes.len()]
}
