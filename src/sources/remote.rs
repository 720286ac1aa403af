use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

use super::naming::redact_url;
use super::{ResolvedSource, Source};
use crate::config::{Credentials, Location, SourceReference};
use crate::error::{Error, Result};
use crate::notifier::Notifier;
use crate::scratch::ScratchDirs;

const GIT: &str = "git";

/// Everything but RFC 3986 unreserved characters is escaped in URL userinfo.
const USERINFO: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Phrases in `git clone` stderr that indicate rejected credentials.
const AUTH_FAILURE_MARKERS: &[&str] = &[
    "authentication failed",
    "could not read username",
    "could not read password",
    "permission denied (publickey",
    "invalid username or password",
    "invalid credentials",
    "the requested url returned error: 401",
    "the requested url returned error: 403",
    "access denied",
];

/// Remote Git implementation of the Source trait.
///
/// Runs a shallow `git clone` into a private temporary directory. Authentication is
/// either a token embedded in an `http(s)` URL or an SSH key injected through a
/// `GIT_SSH_COMMAND` that is set on the child process only.
pub struct RemoteSource {
    scratch: ScratchDirs,
}

impl RemoteSource {
    pub fn new(scratch: ScratchDirs) -> Self {
        Self { scratch }
    }

    /// Builds the clone command without running it.
    pub fn clone_command(
        &self,
        url: &str,
        credentials: &Credentials,
        destination: &Path,
        notifier: &Notifier,
    ) -> Result<Command> {
        let clone_url = match &credentials.token {
            Some(token) => match authenticated_url(url, token) {
                Some(authenticated) => authenticated,
                None => {
                    notifier.warn("Token ignored: only http(s) URLs accept token credentials");
                    url.to_string()
                }
            },
            None => url.to_string(),
        };

        let mut command = Command::new(GIT);
        command
            .args(["clone", "--depth", "1", "--quiet", "--"])
            .arg(&clone_url)
            .arg(destination)
            .env("GIT_TERMINAL_PROMPT", "0");

        if let Some(key) = &credentials.ssh_key {
            if !key.is_file() {
                return Err(Error::SourceUnavailable(format!(
                    "SSH key not found: {}",
                    key.display()
                )));
            }
            let base = credentials.ssh_command.as_deref().unwrap_or("ssh");
            command.env(
                "GIT_SSH_COMMAND",
                format!(
                    "{} -i {} -o IdentitiesOnly=yes",
                    base,
                    shell_quote(&key.to_string_lossy())
                ),
            );
        } else if let Some(ssh_command) = &credentials.ssh_command {
            command.env("GIT_SSH_COMMAND", ssh_command);
        }

        Ok(command)
    }
}

impl Source for RemoteSource {
    fn name(&self) -> &str {
        "remote"
    }

    fn resolve(&self, reference: &SourceReference, notifier: &Notifier) -> Result<ResolvedSource> {
        let url = match &reference.location {
            Location::Remote(url) => url,
            Location::Local(path) => {
                return Err(Error::SourceUnavailable(format!(
                    "not a remote reference: {}",
                    path.display()
                )))
            }
        };

        let scratch = TempDir::new().map_err(|e| {
            Error::SourceUnavailable(format!("failed to create temporary directory: {}", e))
        })?;
        self.scratch.track(scratch.path());
        let checkout = scratch.path().join("checkout");

        notifier.info(&format!("Cloning {}...", redact_url(url)));
        let mut command = self.clone_command(url, &reference.credentials, &checkout, notifier)?;

        let output = command.output().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::SourceUnavailable("git executable not found in PATH".to_string())
            } else {
                Error::SourceUnavailable(format!("failed to run git: {}", e))
            }
        })?;

        if !output.status.success() {
            let mut stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if let Some(token) = &reference.credentials.token {
                stderr = stderr
                    .replace(token.as_str(), "***")
                    .replace(encode_userinfo(token).as_str(), "***");
            }
            notifier.debug(&format!("git clone failed: {}", stderr));
            return Err(classify_clone_failure(&redact_url(url), &stderr));
        }

        notifier.debug(&format!(
            "Cloned {} into {}",
            redact_url(url),
            checkout.display()
        ));
        Ok(ResolvedSource::owned(checkout, scratch))
    }
}

/// Embeds `token` as URL userinfo. Returns `None` for non-http(s) URLs.
pub fn authenticated_url(url: &str, token: &str) -> Option<String> {
    let (scheme, rest) = url.split_once("://")?;
    if !scheme.eq_ignore_ascii_case("https") && !scheme.eq_ignore_ascii_case("http") {
        return None;
    }
    let authority_end = rest.find('/').unwrap_or(rest.len());
    let host_and_path = match rest[..authority_end].rfind('@') {
        Some(at) => &rest[at + 1..],
        None => rest,
    };
    Some(format!(
        "{}://{}@{}",
        scheme,
        encode_userinfo(token),
        host_and_path
    ))
}

fn encode_userinfo(value: &str) -> String {
    utf8_percent_encode(value, USERINFO).to_string()
}

pub fn classify_clone_failure(url: &str, stderr: &str) -> Error {
    let lowered = stderr.to_lowercase();
    let detail = if stderr.is_empty() {
        "git clone exited with an error".to_string()
    } else {
        stderr.to_string()
    };
    if AUTH_FAILURE_MARKERS.iter().any(|m| lowered.contains(m)) {
        Error::AuthenticationFailed(format!("{}: {}", url, detail))
    } else {
        Error::SourceUnavailable(format!("failed to clone {}: {}", url, detail))
    }
}

fn shell_quote(value: &str) -> String {
    if !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-~+".contains(c))
    {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}
