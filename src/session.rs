//! The relay loop: prompt the operator, forward the typed line to the
//! peer, then drain whatever the peer already sent before prompting again.

use std::io::{BufRead, ErrorKind, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::Error;

/// Size of one receive frame.
pub const FRAME_SIZE: usize = 4096;

/// Exact line that closes the session. Case-sensitive, newline included,
/// no trimming and no aliases.
pub const QUIT_TOKEN: &[u8] = b"quit\n";

/// How long a drain pass waits on a silent peer before handing the prompt
/// back to the operator.
const DRAIN_TIMEOUT: Duration = Duration::from_millis(200);

/// How long a send may wait for buffer space. A peer that stopped reading
/// makes the send come up short instead of wedging the loop.
const SEND_TIMEOUT: Duration = Duration::from_millis(200);

/// Why the relay loop stopped. None of these are process errors: every
/// variant leads to closing the connection and a normal exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Operator typed the quit token. Nothing was sent to the peer.
    Quit,
    /// Operator input reached end-of-stream.
    StdinClosed,
    /// A send came up short or failed outright; no retry is attempted.
    SendFailed,
}

/// Drive one connected peer until the operator quits, input ends, or a
/// send fails. `input` and `output` are the operator's terminal; prompts
/// and peer bytes go to `output`, notices and diagnostics to stderr.
/// Operator lines are raw newline-delimited bytes, relayed verbatim.
pub fn run<R, W>(stream: &mut TcpStream, input: &mut R, output: &mut W) -> Result<SessionEnd, Error>
where
    R: BufRead,
    W: Write,
{
    // Short socket timeouts stand in for non-blocking I/O: all data the
    // peer already sent is shown before the next prompt, a silent peer
    // delays the prompt by at most one timeout, and a peer that stopped
    // reading fails the send instead of blocking it indefinitely.
    stream
        .set_read_timeout(Some(DRAIN_TIMEOUT))
        .map_err(|e| Error::setup("timeout", e))?;
    stream
        .set_write_timeout(Some(SEND_TIMEOUT))
        .map_err(|e| Error::setup("timeout", e))?;

    eprintln!();
    eprintln!("New connection !");
    eprintln!("Type 'quit' to close the connection");

    let mut line = Vec::new();
    loop {
        output.write_all(b">> ").map_err(Error::Stdio)?;
        output.flush().map_err(Error::Stdio)?;

        line.clear();
        let n = input.read_until(b'\n', &mut line).map_err(Error::Stdio)?;
        if n == 0 {
            eprintln!("stdin: end of input");
            return Ok(SessionEnd::StdinClosed);
        }

        if line.as_slice() == QUIT_TOKEN {
            return Ok(SessionEnd::Quit);
        }

        // Single write, no partial-write retry. A timed-out write lands in
        // the error arm and ends the session like a short one.
        match stream.write(&line) {
            Ok(sent) if sent == line.len() => {}
            Ok(sent) => {
                eprintln!("write: sent {} of {} bytes", sent, line.len());
                return Ok(SessionEnd::SendFailed);
            }
            Err(e) => {
                eprintln!("write: unable to send: {}", e);
                return Ok(SessionEnd::SendFailed);
            }
        }

        drain(stream, output)?;
    }
}

/// Echo peer bytes verbatim until nothing more is promptly available.
/// A closed peer (zero-byte read) or a timed-out read hands the prompt
/// back silently; any other read fault is reported and absorbed.
fn drain<W: Write>(stream: &mut TcpStream, output: &mut W) -> Result<(), Error> {
    let mut buf = [0u8; FRAME_SIZE];
    loop {
        match stream.read(&mut buf) {
            Ok(0) => return Ok(()),
            Ok(n) => {
                output.write_all(&buf[..n]).map_err(Error::Stdio)?;
                output.flush().map_err(Error::Stdio)?;
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut => {
                return Ok(());
            }
            Err(e) => {
                eprintln!("read: {}", e);
                return Ok(());
            }
        }
    }
}
