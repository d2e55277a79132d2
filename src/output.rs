use std::io::{self, Write};

/// The two channels a command talks to the user on.
///
/// In quiet mode the normal channel is swallowed; errors always go through.
pub struct Output {
    out: Box<dyn Write>,
    err: Box<dyn Write>,
}

impl Output {
    pub fn new(out: Box<dyn Write>, err: Box<dyn Write>) -> Self {
        Self { out, err }
    }

    /// stdout/stderr, with stdout replaced by a sink when `quiet`
    pub fn stdio(quiet: bool) -> Self {
        let out: Box<dyn Write> = if quiet {
            Box::new(io::sink())
        } else {
            Box::new(io::stdout())
        };
        Self::new(out, Box::new(io::stderr()))
    }

    pub fn out(&mut self) -> &mut dyn Write {
        &mut *self.out
    }

    pub fn err(&mut self) -> &mut dyn Write {
        &mut *self.err
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Write target whose contents stay readable after being boxed
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl SharedBuffer {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Output capturing both channels, honoring `quiet` like `stdio`
    pub(crate) fn captured(quiet: bool) -> (Output, SharedBuffer, SharedBuffer) {
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        let out_sink: Box<dyn Write> = if quiet {
            Box::new(io::sink())
        } else {
            Box::new(out.clone())
        };
        (Output::new(out_sink, Box::new(err.clone())), out, err)
    }

    #[test]
    fn channels_are_separate() {
        let (mut output, out, err) = captured(false);
        writeln!(output.out(), "hello").unwrap();
        writeln!(output.err(), "oops").unwrap();
        assert_eq!(out.contents(), "hello\n");
        assert_eq!(err.contents(), "oops\n");
    }

    #[test]
    fn quiet_drops_normal_output_only() {
        let (mut output, out, err) = captured(true);
        writeln!(output.out(), "hello").unwrap();
        writeln!(output.err(), "oops").unwrap();
        assert_eq!(out.contents(), "");
        assert_eq!(err.contents(), "oops\n");
    }
}
