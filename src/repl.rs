use std::io::{BufRead, Write};
use tracing::debug;

use crate::command::{self, Command};
use crate::error::Result;
use crate::render;
use crate::screen;
use crate::store::JobStore;

const HELP: &str = "\
-a: Add a new job application
\t-cn: Company Name
\t-r: Rating. Format x/5 where x is between 0 and 5
\t-n: Notes. Short description of the company (Max 30 characters)
\t-ha: Has Answered. Boolean value (true|false). Used to track if you have gotten a response from the company.
Example: jm -a -cn Company Name -r 5/5 -n Great company -ha false
-ls: List all job applications
-u: Mark a job application as answered
clear: Clear the screen
--help: Display this help message
Ctrl-D: Quit";

const USAGE: &str = "Unknown command. Usage: jm [-a|-ls|-u] [-cn|-r|-n|-ha] [true|false]\n\
Type 'jm --help' for the full list of commands.";

/// Whether the session keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<S, R, W> {
    store: S,
    input: R,
    output: W,
    show_banner: bool,
}

impl<S: JobStore, R: BufRead, W: Write> Session<S, R, W> {
    pub fn new(store: S, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
            show_banner: true,
        }
    }

    pub fn with_banner(mut self, show_banner: bool) -> Self {
        self.show_banner = show_banner;
        self
    }

    /// Prompt, read, dispatch until end of input.
    pub fn run(&mut self) -> Result<()> {
        self.redraw()?;

        loop {
            screen::prompt(&mut self.output)?;
            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                break;
            };
            if self.execute_line(&line)? == Flow::Quit {
                break;
            }
        }

        Ok(())
    }

    /// Run a single command line.
    pub fn execute_line(&mut self, line: &str) -> Result<Flow> {
        let command = match command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                debug!("Rejected input {:?}: {}", line.trim(), e);
                writeln!(self.output, "{}", e)?;
                return Ok(Flow::Continue);
            }
        };
        debug!("Dispatching {:?}", command);

        match command {
            Command::Add(job) => {
                self.store.insert(&job)?;
                writeln!(self.output, "Inserted job application successfully!")?;
            }

            Command::List => self.print_jobs()?,

            Command::Update => return self.update(),

            Command::Help => writeln!(self.output, "{}", HELP)?,

            Command::Clear => self.redraw()?,

            Command::Empty => {}

            Command::Unknown => writeln!(self.output, "{}", USAGE)?,
        }

        Ok(Flow::Continue)
    }

    #[cfg(test)]
    pub fn into_store(self) -> S {
        self.store
    }

    fn update(&mut self) -> Result<Flow> {
        self.print_jobs()?;
        writeln!(self.output, "Which application would you like to update (id): ")?;
        self.output.flush()?;

        let Some(line) = self.read_line()? else {
            return Ok(Flow::Quit);
        };

        let id = match command::parse_key(&line) {
            Ok(id) => id,
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                return Ok(Flow::Continue);
            }
        };

        writeln!(self.output, "Updating application: {}", id)?;
        if self.store.mark_answered(id)? == 0 {
            writeln!(self.output, "No job application with id {}.", id)?;
        } else {
            writeln!(self.output, "Updated job application successfully!")?;
        }

        Ok(Flow::Continue)
    }

    fn print_jobs(&mut self) -> Result<()> {
        let jobs = self.store.list()?;
        writeln!(self.output, "{}", render::jobs_table(&jobs))?;
        Ok(())
    }

    fn redraw(&mut self) -> Result<()> {
        if self.show_banner {
            screen::clear(&mut self.output)?;
            screen::banner(&mut self.output)?;
        }
        Ok(())
    }

    /// `None` at end of input. Bytes that aren't UTF-8 become U+FFFD so a
    /// stray byte is just bad input for the parser, not a failed read.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
    }
}
