//! Loopback SMTP servers for tests.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

pub(crate) struct MockServer {
    pub port: u16,
    handle: thread::JoinHandle<Vec<String>>,
}

#[derive(Clone)]
struct Script {
    banner: Option<&'static str>,
    replies: Vec<&'static str>,
    hang_up: bool,
}

impl MockServer {
    /// `220` banner, then `250` for HELO, MAIL FROM and RCPT TO.
    pub(crate) fn accepting() -> Self {
        Self::accepting_times(1)
    }

    pub(crate) fn accepting_times(sessions: usize) -> Self {
        Self::spawn(
            Script {
                banner: Some("220 mock.smtp.test ESMTP\r\n"),
                replies: vec!["250 mock.smtp.test\r\n", "250 2.1.0 Ok\r\n", "250 2.1.5 Ok\r\n"],
                hang_up: false,
            },
            sessions,
        )
    }

    /// Sends `banner`, answers one command per reply, then keeps reading
    /// until the client goes away.
    pub(crate) fn scripted(banner: &'static str, replies: Vec<&'static str>) -> Self {
        Self::spawn(
            Script {
                banner: Some(banner),
                replies,
                hang_up: false,
            },
            1,
        )
    }

    /// Like [`scripted`](Self::scripted) but closes once the replies run out.
    pub(crate) fn hanging_up(banner: &'static str, replies: Vec<&'static str>) -> Self {
        Self::spawn(
            Script {
                banner: Some(banner),
                replies,
                hang_up: true,
            },
            1,
        )
    }

    /// Accepts and never says anything.
    pub(crate) fn silent() -> Self {
        Self::spawn(
            Script {
                banner: None,
                replies: Vec::new(),
                hang_up: false,
            },
            1,
        )
    }

    /// Waits for the server thread; returns every command line it received.
    pub(crate) fn finish(self) -> Vec<String> {
        self.handle.join().expect("mock server thread")
    }

    fn spawn(script: Script, sessions: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        let port = listener.local_addr().expect("addr").port();
        let handle = thread::spawn(move || {
            let mut received = Vec::new();
            for _ in 0..sessions {
                if let Ok((stream, _)) = listener.accept() {
                    let _ = serve(stream, &script, &mut received);
                }
            }
            received
        });
        Self { port, handle }
    }
}

fn serve(mut stream: TcpStream, script: &Script, received: &mut Vec<String>) -> io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    if let Some(banner) = script.banner {
        stream.write_all(banner.as_bytes())?;
        stream.flush()?;
    }
    for reply in &script.replies {
        if !read_command(&mut reader, received)? {
            return Ok(());
        }
        stream.write_all(reply.as_bytes())?;
        stream.flush()?;
    }
    if script.hang_up {
        return Ok(());
    }
    while read_command(&mut reader, received)? {}
    Ok(())
}

fn read_command(reader: &mut BufReader<TcpStream>, received: &mut Vec<String>) -> io::Result<bool> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    received.push(line.trim_end().to_string());
    Ok(true)
}

/// A loopback port nothing listens on.
pub(crate) fn unused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    listener.local_addr().expect("addr").port()
}
