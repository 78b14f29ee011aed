use crate::ReadError;

/// Trait for the presentation layer an interview talks to.
///
/// A renderer only needs to show a prompt and hand back one raw line, and to
/// print out-of-band messages (validation failures, labels). Styling, echo
/// and default hinting are the renderer's business; parsing and validation
/// stay in the interview.
pub trait Renderer {
    /// Present `prompt` and block until the user submits a line.
    ///
    /// # Returns
    /// * `Ok(line)` with the raw text, without the trailing newline
    /// * `Err(ReadError::Aborted(_))` if the user interrupted or closed input
    /// * `Err(ReadError::Backend(_))` on any other failure
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadError>;

    /// Print a message outside of any prompt.
    fn print(&mut self, message: &str);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadError> {
        (**self).read_line(prompt)
    }

    fn print(&mut self, message: &str) {
        (**self).print(message)
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadError> {
        (**self).read_line(prompt)
    }

    fn print(&mut self, message: &str) {
        (**self).print(message)
    }
}
