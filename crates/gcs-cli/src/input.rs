//! Console prompting pipeline
//!
//! Every command collects its parameters through a [`Prompter`], which
//! pairs the input being read with the stream prompts are written to.
//! Commands stay testable by running against in-memory streams.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use tracing::error;

/// Reads field values off an interactive console.
///
/// Required fields re-ask until something is entered. Defaulted fields
/// return the raw entry and leave blank-means-default to the caller, so
/// defaults that are only describable ("best guess", "file name") need no
/// special casing here.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<StdinLock<'static>, Stdout> {
    /// Prompter over the process console
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Prompter over caller-supplied streams
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Show a literal prompt and read one line, without its line break.
    /// Fails with `UnexpectedEof` once the input is closed.
    pub fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "console input closed",
            ));
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    /// Ask for a field that cannot be left blank
    pub fn required(&mut self, text: &str) -> io::Result<String> {
        let mut entry = self.ask(&format!("Enter {}: ", text))?;
        while entry.is_empty() {
            error!("{} cannot be blank.", text);
            entry = self.ask(&format!("Please enter a {}: ", text))?;
        }
        Ok(entry)
    }

    /// Ask for a field with a default; blank means "use the default" and
    /// the raw entry is returned for the caller to resolve
    pub fn optional(&mut self, text: &str, default: &str) -> io::Result<String> {
        self.ask(&format!("Enter {} (defaults to {} if blank): ", text, default))
    }

    /// Ask for a comma-separated list; blank yields the empty list
    pub fn list(&mut self, text: &str, default: &str) -> io::Result<Vec<String>> {
        Ok(split_list(&self.optional(text, default)?))
    }
}

/// Split a comma-separated entry. Elements are not trimmed and blanks are
/// kept, so they can be defaulted one by one downstream.
pub fn split_list(entry: &str) -> Vec<String> {
    if entry.is_empty() {
        return Vec::new();
    }
    entry.split(',').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn shown(prompter: &Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.output.clone()).unwrap()
    }

    #[test]
    fn test_ask_strips_the_line_ending() {
        let mut p = prompter("demo-bucket\r\n");
        assert_eq!(p.ask("Enter your selection: ").unwrap(), "demo-bucket");
        assert_eq!(shown(&p), "Enter your selection: ");
    }

    #[test]
    fn test_ask_reports_closed_input() {
        let mut p = prompter("");
        let err = p.ask("Enter your selection: ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_required_reasks_until_nonblank() {
        let mut p = prompter("\n\nphotos\n");
        assert_eq!(p.required("Bucket Name").unwrap(), "photos");
        assert_eq!(
            shown(&p),
            "Enter Bucket Name: Please enter a Bucket Name: Please enter a Bucket Name: "
        );
    }

    #[test]
    fn test_optional_shows_default_and_returns_raw_entry() {
        let mut p = prompter("\ntext/html\n");
        assert_eq!(p.optional("content-type", "best guess").unwrap(), "");
        assert_eq!(p.optional("content-type", "best guess").unwrap(), "text/html");
        assert_eq!(
            shown(&p),
            "Enter content-type (defaults to best guess if blank): \
             Enter content-type (defaults to best guess if blank): "
        );
    }

    #[test]
    fn test_list_blank_entry_yields_empty_list() {
        let mut p = prompter("\n");
        let values = p.list("a comma-separated list of origins", "*").unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_list_keeps_blank_elements() {
        let mut p = prompter("http://a.example,,http://b.example\n");
        assert_eq!(
            p.list("a comma-separated list of origins", "*").unwrap(),
            vec!["http://a.example", "", "http://b.example"]
        );
    }

    #[test]
    fn test_split_list() {
        assert!(split_list("").is_empty());
        assert_eq!(split_list("GET"), vec!["GET"]);
        assert_eq!(split_list("GET, POST"), vec!["GET", " POST"]);
    }
}
