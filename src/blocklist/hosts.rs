/// Disposable mail providers refused out of the box. Loaded into
/// [`VerificationConfig`](crate::VerificationConfig) by its `Default` impl;
/// the list itself is plain data and can be replaced wholesale.
pub const DEFAULT_BLOCKED_HOSTS: &[&str] = &[
    "mailinator.com",
    "mailinator2.com",
    "sogetthis.com",
    "mailin8r.com",
    "spamherelots.com",
    "thisisnotmyrealemail.com",
    "tempmail.info",
    "spamavert.com",
    "pookmail.com",
    "dumpmail.net",
    "sofort-mail.de",
    "spambog.com",
    "eintagsmail.de",
    "dontsendmespam.de",
    "temporaryinbox.com",
    "mx0.wwwnew.eu",
    "bodhi.lawlita.com",
    "anonbox.net",
    "spamgourmet.com",
    "mintemail.com",
    "mintemails.info.tm",
    "oneoffmail.com",
    "aravensoft.com",
    "dodgit.com",
    "maileater.com",
    "mailnull.com",
    "trashymail.com",
    "nospamfor.us",
    "nospam4.us",
    "shortmail.net",
    "skeefmail.net",
    "spam.la",
    "spam.su",
    "spambox.us",
    "spamfree24.org",
    "spamfree24.com",
    "spamfree24.eu",
    "spamfree24.org",
    "spamfree24.net",
    "spamfree24.info",
    "spamfree24.de",
    "spaml.com",
    "tempemail.net",
    "disposeamail.com",
];
