use sdpform::DecodeResult;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input: &str, res: &DecodeResult, color: bool) {
    let palette = ansi::Palette::new(color);
    let details = &res.details;
    let lines: Vec<&str> = input.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).collect();

    println!("\n{}", palette.bold(palette.paint(format!("⚙  Decoding: {} lines", details.lines), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Matched ━━━", ansi::GRAY));
    if details.matched.is_empty() {
        println!("{}", palette.dim("  No lines matched"));
    }
    for m in &details.matched {
        let text = lines.get(m.line - 1).copied().unwrap_or_default();
        println!(
            "  {} {} {} {}",
            palette.paint(format!("{:>4}", m.line), ansi::GRAY),
            palette.paint(format!("{:<18}", m.rule), ansi::BLUE),
            palette.dim("│"),
            palette.paint(text, ansi::GREEN),
        );
    }

    let dropped: Vec<_> = details.dropped().collect();
    println!("\n{}", palette.paint("━━━ Dropped ━━━", ansi::GRAY));
    if dropped.is_empty() {
        println!("{}", palette.dim("  Nothing dropped"));
    }
    for skip in &dropped {
        println!(
            "  {} {} {} {}",
            palette.paint(format!("{:>4}", skip.line), ansi::GRAY),
            palette.paint(&skip.text, ansi::YELLOW),
            palette.dim("│"),
            palette.dim(skip.reason.to_string()),
        );
    }

    println!("\n{}", palette.paint("━━━ Tree ━━━", ansi::GRAY));
    let media = res.session.get("media").and_then(|m| m.as_array()).map_or(0, Vec::len);
    let session_keys = res.session.as_object().map_or(0, |o| o.len().saturating_sub(1));
    println!(
        "  Session fields: {}  │  Media sections: {}",
        palette.paint(session_keys.to_string(), ansi::BLUE),
        palette.paint(media.to_string(), ansi::BLUE),
    );

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Matched: {}  │  Dropped: {}",
        palette.paint(format!("{:?}", details.elapsed), ansi::GREEN),
        palette.paint(details.matched.len().to_string(), ansi::CYAN),
        palette.dim(dropped.len().to_string()),
    );
    println!();
}
