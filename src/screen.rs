use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

pub const BANNER: &str = include_str!("../assets/banner.txt");

const PROMPT: &str = "JobManager$> ";

pub fn clear(out: &mut impl Write) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    out.flush()
}

pub fn banner(out: &mut impl Write) -> io::Result<()> {
    queue!(
        out,
        SetForegroundColor(Color::Yellow),
        Print(BANNER),
        ResetColor,
        Print("\n")
    )?;
    out.flush()
}

pub fn prompt(out: &mut impl Write) -> io::Result<()> {
    queue!(out, SetForegroundColor(Color::Yellow), Print(PROMPT), ResetColor)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_contains_asset() {
        let mut out = Vec::new();
        banner(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(BANNER));
    }

    #[test]
    fn test_prompt_text() {
        let mut out = Vec::new();
        prompt(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("JobManager$> "));
    }

    #[test]
    fn test_clear_writes_escape_sequence() {
        let mut out = Vec::new();
        clear(&mut out).unwrap();
        assert!(out.starts_with(b"\x1b["));
    }
}
