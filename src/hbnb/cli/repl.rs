use super::print::write_result;
use console::style;
use hbnb::api::{Dispatch, HbnbApi};
use hbnb::store::StorageBackend;
use std::io::{self, BufRead, Write};

/// The read loop: one line is fully handled before the next is read.
pub struct Session {
    prompt: Option<String>,
    styled: bool,
}

impl Session {
    /// `prompt` is `None` when input is not attended (piped scripts, tests).
    pub fn new(prompt: Option<String>, styled: bool) -> Self {
        Self { prompt, styled }
    }

    /// Faults go to `err`; command output and usage errors go to `out`.
    pub fn run<B, R, W, E>(
        &self,
        api: &mut HbnbApi<B>,
        mut input: R,
        out: &mut W,
        err: &mut E,
    ) -> io::Result<()>
    where
        B: StorageBackend,
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut buf = Vec::new();
        loop {
            if let Some(prompt) = &self.prompt {
                write!(out, "{}", prompt)?;
                out.flush()?;
            }

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                if self.prompt.is_some() {
                    writeln!(out)?;
                }
                return Ok(());
            }

            // Undecodable bytes become U+FFFD and the line fails as unknown syntax.
            let line = String::from_utf8_lossy(&buf);
            match api.execute(&line) {
                Ok(Dispatch::Exit) => return Ok(()),
                Ok(Dispatch::Continue(result)) => write_result(out, &result, self.styled)?,
                Err(e) => {
                    writeln!(err, "{} {}", style("Error:").red().force_styling(self.styled), e)?;
                }
            }
            out.flush()?;
        }
    }
}
