use crate::outcome::VerificationOutcome;
use crate::validator::EmailAddress;

use super::cancel::CancelHandle;
use super::error::SessionError;
use super::options::ProbeOptions;
use super::session::SmtpSession;
use super::types::SmtpResponse;

/// Probes `connect_host` on port 25 with default timeouts.
pub fn probe(
    connect_host: &str,
    email: &EmailAddress,
    local_identity: &str,
) -> VerificationOutcome {
    probe_with_options(connect_host, email, local_identity, &ProbeOptions::default(), None)
}

/// Runs the verification dialog against `connect_host`:
///
/// 1. the banner must carry `220`, otherwise [`VerificationOutcome::NoResponse`];
/// 2. `HELO <local_identity>`, reply ignored;
/// 3. `MAIL FROM: <email>` and `RCPT TO: <email>` must both get `250`,
///    otherwise [`VerificationOutcome::Rejected`];
/// 4. `QUIT` is sent without waiting for the answer.
///
/// The connection is closed on every path. Connect failures give
/// `Unreachable`, expired timeouts `TimedOut` and a fired `cancel` handle
/// `Cancelled`.
pub fn probe_with_options(
    connect_host: &str,
    email: &EmailAddress,
    local_identity: &str,
    options: &ProbeOptions,
    cancel: Option<&CancelHandle>,
) -> VerificationOutcome {
    let email_text = email.to_string();
    let mut session = match SmtpSession::connect(connect_host, options, cancel) {
        Ok(session) => session,
        Err(err) => {
            tracing::info!(host = connect_host, error = %err, "SMTP connect failed");
            return match err {
                SessionError::Cancelled => VerificationOutcome::cancelled(&email_text),
                SessionError::Timeout { .. } => VerificationOutcome::timed_out(connect_host),
                _ => VerificationOutcome::unreachable(connect_host),
            };
        }
    };

    let banner = match session.read_response() {
        Ok(banner) => banner,
        Err(err) => {
            tracing::info!(host = connect_host, error = %err, "no SMTP banner");
            return match err {
                SessionError::Cancelled => VerificationOutcome::cancelled(&email_text),
                SessionError::Timeout { .. } => VerificationOutcome::timed_out(connect_host),
                _ => VerificationOutcome::no_response(connect_host),
            };
        }
    };
    if !banner.has_code(220) {
        tracing::info!(host = connect_host, banner = %banner.raw_line, "unexpected banner");
        return VerificationOutcome::no_response(connect_host);
    }

    let (from, to) = match run_envelope(&mut session, &email_text, local_identity) {
        Ok(replies) => {
            session.quit();
            replies
        }
        Err(SessionError::Cancelled) => return VerificationOutcome::cancelled(&email_text),
        Err(SessionError::Timeout { .. }) => return VerificationOutcome::timed_out(connect_host),
        Err(err) => {
            // a server hanging up mid-dialog reads as empty replies
            tracing::debug!(host = connect_host, error = %err, "dialog interrupted");
            (SmtpResponse::empty(), SmtpResponse::empty())
        }
    };

    if from.has_code(250) && to.has_code(250) {
        tracing::info!(host = connect_host, email = %email_text, "mailbox accepted");
        VerificationOutcome::valid(&email_text)
    } else {
        tracing::info!(
            host = connect_host,
            email = %email_text,
            mail_from = %from.raw_line,
            rcpt_to = %to.raw_line,
            "mailbox rejected"
        );
        VerificationOutcome::rejected(connect_host, &email_text)
    }
}

fn run_envelope(
    session: &mut SmtpSession,
    email: &str,
    local_identity: &str,
) -> Result<(SmtpResponse, SmtpResponse), SessionError> {
    session.command(&format!("HELO {local_identity}"))?;
    let from = session.command(&format!("MAIL FROM: <{email}>"))?;
    let to = session.command(&format!("RCPT TO: <{email}>"))?;
    Ok((from, to))
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::thread;
    use std::time::{Duration, Instant};

    use super::*;
    use crate::outcome::OutcomeKind;
    use crate::smtp_verify::mock::{self, MockServer};

    fn address() -> EmailAddress {
        EmailAddress::parse("user@example.com").expect("address")
    }

    fn options(port: u16) -> ProbeOptions {
        ProbeOptions::default()
            .with_port(port)
            .with_timeout(Duration::from_secs(5))
    }

    #[test]
    fn accepted_mailbox_is_valid() {
        let server = MockServer::accepting();
        let outcome =
            probe_with_options("127.0.0.1", &address(), "forum.test", &options(server.port), None);
        assert_eq!(outcome, VerificationOutcome::valid("user@example.com"));

        let received = server.finish();
        assert_eq!(
            received,
            vec![
                "HELO forum.test",
                "MAIL FROM: <user@example.com>",
                "RCPT TO: <user@example.com>",
                "QUIT",
            ]
        );
    }

    #[test]
    fn unknown_recipient_is_rejected() {
        let server = MockServer::scripted(
            "220 ok\r\n",
            vec!["250 hello\r\n", "250 ok\r\n", "550 no such user\r\n"],
        );
        let outcome =
            probe_with_options("127.0.0.1", &address(), "forum.test", &options(server.port), None);
        assert_eq!(outcome.kind(), OutcomeKind::Rejected);
        assert_eq!(
            outcome.message(),
            "Server \"127.0.0.1\" rejected address \"user@example.com\"!"
        );
        server.finish();
    }

    #[test]
    fn refused_sender_is_rejected() {
        let server = MockServer::scripted(
            "220 ok\r\n",
            vec!["250 hello\r\n", "553 sender refused\r\n", "250 ok\r\n"],
        );
        let outcome =
            probe_with_options("127.0.0.1", &address(), "forum.test", &options(server.port), None);
        assert_eq!(outcome.kind(), OutcomeKind::Rejected);
        server.finish();
    }

    #[test]
    fn helo_reply_is_not_checked() {
        let server = MockServer::scripted(
            "220 ok\r\n",
            vec!["502 HELO not implemented\r\n", "250 ok\r\n", "250 ok\r\n"],
        );
        let outcome =
            probe_with_options("127.0.0.1", &address(), "forum.test", &options(server.port), None);
        assert!(outcome.is_valid(), "{outcome:?}");
        server.finish();
    }

    #[test]
    fn bad_banner_is_no_response() {
        let server = MockServer::scripted("421 service unavailable\r\n", Vec::new());
        let outcome =
            probe_with_options("127.0.0.1", &address(), "forum.test", &options(server.port), None);
        assert_eq!(outcome, VerificationOutcome::no_response("127.0.0.1"));
        assert!(server.finish().is_empty());
    }

    #[test]
    fn server_hanging_up_after_banner_is_rejected() {
        let server = MockServer::hanging_up("220 ok\r\n", vec!["250 hello\r\n"]);
        let outcome =
            probe_with_options("127.0.0.1", &address(), "forum.test", &options(server.port), None);
        assert_eq!(outcome.kind(), OutcomeKind::Rejected);
        server.finish();
    }

    #[test]
    fn server_hanging_up_on_greeting_is_rejected() {
        // HELO either fails to write or reads EOF; both end the dialog
        let server = MockServer::hanging_up("220 ok\r\n", Vec::new());
        let outcome =
            probe_with_options("127.0.0.1", &address(), "forum.test", &options(server.port), None);
        assert_eq!(
            outcome,
            VerificationOutcome::rejected("127.0.0.1", "user@example.com")
        );
        server.finish();
    }

    #[test]
    fn server_stalling_mid_dialog_times_out() {
        let server = MockServer::scripted("220 ok\r\n", vec!["250 hello\r\n"]);
        let options = options(server.port).with_timeout(Duration::from_millis(200));
        let outcome = probe_with_options("127.0.0.1", &address(), "forum.test", &options, None);
        assert_eq!(outcome, VerificationOutcome::timed_out("127.0.0.1"));
        let received = server.finish();
        assert_eq!(received, vec!["HELO forum.test", "MAIL FROM: <user@example.com>"]);
    }

    #[test]
    fn closed_port_is_unreachable() {
        let port = mock::unused_port();
        let outcome =
            probe_with_options("127.0.0.1", &address(), "forum.test", &options(port), None);
        assert_eq!(outcome, VerificationOutcome::unreachable("127.0.0.1"));
    }

    #[test]
    fn unresolvable_host_is_unreachable() {
        let outcome = probe_with_options(
            "host.invalid",
            &address(),
            "forum.test",
            &options(25),
            None,
        );
        assert_eq!(outcome.kind(), OutcomeKind::Unreachable);
    }

    #[test]
    fn silent_server_times_out() {
        let server = MockServer::silent();
        let options = options(server.port).with_timeout(Duration::from_millis(200));
        let outcome = probe_with_options("127.0.0.1", &address(), "forum.test", &options, None);
        assert_eq!(outcome, VerificationOutcome::timed_out("127.0.0.1"));
        server.finish();
    }

    #[test]
    fn cancelled_before_start_never_connects() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("addr").port();
        let cancel = CancelHandle::new();
        cancel.cancel();
        let outcome = probe_with_options(
            "127.0.0.1",
            &address(),
            "forum.test",
            &options(port),
            Some(&cancel),
        );
        assert_eq!(outcome.kind(), OutcomeKind::Cancelled);
        listener.set_nonblocking(true).expect("nonblocking");
        assert!(listener.accept().is_err(), "no connection expected");
    }

    #[test]
    fn cancel_interrupts_blocked_read() {
        let server = MockServer::silent();
        let options = options(server.port).with_timeout(Duration::from_secs(30));
        let cancel = CancelHandle::new();
        let trigger = cancel.clone();
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(150));
            trigger.cancel();
        });

        let started = Instant::now();
        let outcome =
            probe_with_options("127.0.0.1", &address(), "forum.test", &options, Some(&cancel));
        assert_eq!(outcome.kind(), OutcomeKind::Cancelled);
        assert!(started.elapsed() < Duration::from_secs(10));
        canceller.join().expect("canceller");
        server.finish();
    }

    #[test]
    fn same_server_same_answer() {
        let server = MockServer::accepting_times(2);
        let first =
            probe_with_options("127.0.0.1", &address(), "forum.test", &options(server.port), None);
        let second =
            probe_with_options("127.0.0.1", &address(), "forum.test", &options(server.port), None);
        assert_eq!(first, second);
        server.finish();
    }
}
