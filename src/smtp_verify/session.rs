use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{IpAddr, Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use super::cancel::{CancelHandle, Registration};
use super::error::SessionError;
use super::options::ProbeOptions;
use super::types::SmtpResponse;

// Longest reply line read in one go; the rest is left for the next read.
const MAX_REPLY_LINE: u64 = 1024;

/// Unix reports an expired socket timeout as `WouldBlock`.
fn is_timeout(kind: io::ErrorKind) -> bool {
    matches!(kind, io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}

/// An open SMTP connection. Dropping it shuts the socket down, whatever
/// state the dialog was left in.
pub(crate) struct SmtpSession {
    host: String,
    stream: TcpStream,
    reader: BufReader<TcpStream>,
    cancel: Option<(CancelHandle, Registration)>,
}

impl SmtpSession {
    /// Resolves `host` and connects to the first address that answers. Name
    /// resolution and every connect attempt share one `connect_timeout`
    /// budget.
    pub(crate) fn connect(
        host: &str,
        options: &ProbeOptions,
        cancel: Option<&CancelHandle>,
    ) -> Result<Self, SessionError> {
        if cancel.is_some_and(CancelHandle::is_cancelled) {
            return Err(SessionError::Cancelled);
        }

        let deadline = Instant::now() + options.connect_timeout();
        let addrs = resolve_addrs(host, options.port, options.connect_timeout())?;

        let mut last_err = None;
        for addr in &addrs {
            if cancel.is_some_and(CancelHandle::is_cancelled) {
                return Err(SessionError::Cancelled);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                last_err = Some(io::Error::from(io::ErrorKind::TimedOut));
                break;
            }
            match TcpStream::connect_timeout(addr, remaining) {
                Ok(stream) => {
                    tracing::debug!(host, %addr, "connected");
                    return Self::from_stream(host, stream, options, cancel);
                }
                Err(err) => {
                    tracing::debug!(host, %addr, error = %err, "connect attempt failed");
                    last_err = Some(err);
                }
            }
        }

        match last_err {
            Some(err) if is_timeout(err.kind()) => Err(SessionError::Timeout {
                host: host.to_string(),
            }),
            Some(source) => Err(SessionError::Connect {
                host: host.to_string(),
                source,
            }),
            None => Err(SessionError::NoAddress {
                host: host.to_string(),
            }),
        }
    }

    fn from_stream(
        host: &str,
        stream: TcpStream,
        options: &ProbeOptions,
        cancel: Option<&CancelHandle>,
    ) -> Result<Self, SessionError> {
        let io_err = |source| SessionError::Io {
            host: host.to_string(),
            source,
        };
        stream
            .set_read_timeout(Some(options.read_timeout()))
            .map_err(io_err)?;
        stream
            .set_write_timeout(Some(options.write_timeout()))
            .map_err(io_err)?;
        let reader = BufReader::new(stream.try_clone().map_err(io_err)?);
        let cancel = cancel.map(|handle| (handle.clone(), handle.register(&stream)));
        Ok(Self {
            host: host.to_string(),
            stream,
            reader,
            cancel,
        })
    }

    /// Reads a single reply line.
    pub(crate) fn read_response(&mut self) -> Result<SmtpResponse, SessionError> {
        let mut raw = Vec::new();
        let result = (&mut self.reader)
            .take(MAX_REPLY_LINE)
            .read_until(b'\n', &mut raw);
        let read = result.map_err(|err| self.classify(err))?;
        if read == 0 {
            return Err(if self.is_cancelled() {
                SessionError::Cancelled
            } else {
                SessionError::Closed {
                    host: self.host.clone(),
                }
            });
        }
        let response = SmtpResponse::parse(&String::from_utf8_lossy(&raw));
        tracing::debug!(host = %self.host, "S: {}", response.raw_line);
        Ok(response)
    }

    pub(crate) fn send_command(&mut self, command: &str) -> Result<(), SessionError> {
        tracing::debug!(host = %self.host, "C: {command}");
        let line = format!("{command}\r\n");
        let result = self
            .stream
            .write_all(line.as_bytes())
            .and_then(|()| self.stream.flush());
        result.map_err(|err| self.classify(err))
    }

    pub(crate) fn command(&mut self, command: &str) -> Result<SmtpResponse, SessionError> {
        self.send_command(command)?;
        self.read_response()
    }

    /// Says goodbye without waiting for the reply, then closes.
    pub(crate) fn quit(mut self) {
        if let Err(err) = self.send_command("QUIT") {
            tracing::debug!(host = %self.host, error = %err, "QUIT not delivered");
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|(handle, _)| handle.is_cancelled())
    }

    fn classify(&self, err: io::Error) -> SessionError {
        if self.is_cancelled() {
            SessionError::Cancelled
        } else if is_timeout(err.kind()) {
            SessionError::Timeout {
                host: self.host.clone(),
            }
        } else if matches!(
            err.kind(),
            io::ErrorKind::BrokenPipe
                | io::ErrorKind::ConnectionReset
                | io::ErrorKind::ConnectionAborted
                | io::ErrorKind::UnexpectedEof
        ) {
            SessionError::Closed {
                host: self.host.clone(),
            }
        } else {
            SessionError::Io {
                host: self.host.clone(),
                source: err,
            }
        }
    }
}

impl Drop for SmtpSession {
    fn drop(&mut self) {
        if let Some((handle, registration)) = &self.cancel {
            handle.release(*registration);
        }
        let _ = self.stream.shutdown(Shutdown::Both);
    }
}

/// System name lookup has no timeout of its own, so it runs on a helper
/// thread and is abandoned once `budget` runs out. IP literals skip it.
fn resolve_addrs(host: &str, port: u16, budget: Duration) -> Result<Vec<SocketAddr>, SessionError> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(vec![SocketAddr::new(ip, port)]);
    }

    let (tx, rx) = mpsc::channel();
    let query = host.to_string();
    thread::Builder::new()
        .name("smtp-resolve".into())
        .spawn(move || {
            let result = (query.as_str(), port)
                .to_socket_addrs()
                .map(|addrs| addrs.collect::<Vec<_>>());
            let _ = tx.send(result);
        })
        .map_err(|source| SessionError::Resolve {
            host: host.to_string(),
            source,
        })?;

    match rx.recv_timeout(budget) {
        Ok(Ok(addrs)) => Ok(addrs),
        Ok(Err(source)) => Err(SessionError::Resolve {
            host: host.to_string(),
            source,
        }),
        Err(mpsc::RecvTimeoutError::Timeout) => Err(SessionError::Timeout {
            host: host.to_string(),
        }),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(SessionError::NoAddress {
            host: host.to_string(),
        }),
    }
}
