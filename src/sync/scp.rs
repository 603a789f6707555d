use super::{PushReport, SyncPlan, Transfer, Transport};
use crate::config::{HostKeyPolicy, RemoteConfig};
use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

#[cfg(windows)]
use std::os::windows::process::CommandExt;

/// Windows flag to prevent console window from appearing
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x08000000;

#[cfg(windows)]
const NULL_DEVICE: &str = "NUL";
#[cfg(not(windows))]
const NULL_DEVICE: &str = "/dev/null";

/// Scp transport.
/// Wraps the system scp client; one invocation per remote directory.
pub struct ScpTransport {
    scp_path: PathBuf,
    remote: RemoteConfig,
    identity: PathBuf,
    known_hosts: PathBuf,
}

impl ScpTransport {
    pub fn new(
        remote: RemoteConfig,
        identity: impl Into<PathBuf>,
        known_hosts: impl Into<PathBuf>,
    ) -> Self {
        Self {
            scp_path: Self::find_scp(),
            remote,
            identity: identity.into(),
            known_hosts: known_hosts.into(),
        }
    }

    /// Use a specific scp binary instead of searching for one.
    pub fn with_scp_path(mut self, scp_path: impl Into<PathBuf>) -> Self {
        self.scp_path = scp_path.into();
        self
    }

    /// Locate scp binary.
    fn find_scp() -> PathBuf {
        let name = if cfg!(windows) { "scp.exe" } else { "scp" };

        // 1. Bundled next to the executable
        if let Ok(current_exe) = std::env::current_exe() {
            if let Some(bin_dir) = current_exe.parent() {
                let bundled_path = bin_dir.join(name);
                if bundled_path.exists() {
                    return bundled_path;
                }
            }
        }

        // 2. Fallback to system PATH
        debug!("[Scp] Falling back to system PATH for scp");
        PathBuf::from(name)
    }

    /// Arguments for copying `files` into `remote_dir`.
    fn build_args(&self, remote_dir: &str, files: &[&Transfer]) -> Vec<OsString> {
        let known_hosts: &Path = match self.remote.host_key_policy {
            HostKeyPolicy::Insecure => Path::new(NULL_DEVICE),
            HostKeyPolicy::AcceptNew | HostKeyPolicy::Strict => &self.known_hosts,
        };

        let mut args: Vec<OsString> = vec![
            "-i".into(),
            self.identity.clone().into(),
            "-P".into(),
            self.remote.port.to_string().into(),
            "-o".into(),
            "BatchMode=yes".into(),
            "-o".into(),
            "IdentitiesOnly=yes".into(),
            "-o".into(),
            format!(
                "StrictHostKeyChecking={}",
                self.remote.host_key_policy.strict_host_key_checking()
            )
            .into(),
            "-o".into(),
        ];
        let mut known_hosts_opt = OsString::from("UserKnownHostsFile=");
        known_hosts_opt.push(known_hosts);
        args.push(known_hosts_opt);

        args.extend(files.iter().map(|t| t.local.clone().into_os_string()));
        args.push(format!("{}:{}/", self.remote.destination(), remote_dir).into());
        args
    }

    /// Run scp and return stderr on failure.
    fn run_scp(&self, args: &[OsString]) -> Result<()> {
        let mut cmd = Command::new(&self.scp_path);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // On Windows, prevent console window from appearing
        #[cfg(windows)]
        cmd.creation_flags(CREATE_NO_WINDOW);

        debug!("[Scp] {} {:?}", self.scp_path.display(), args);
        let output = cmd.output().map_err(|e| {
            Error::Transfer(format!(
                "cannot execute {}: {}",
                self.scp_path.display(),
                e
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Transfer(format!(
                "scp to {}:{} exited with {}: {}",
                self.remote.destination(),
                self.remote.port,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

impl Transport for ScpTransport {
    fn name(&self) -> &'static str {
        "scp"
    }

    fn push(&self, plan: &SyncPlan) -> Result<PushReport> {
        let mut report = PushReport::default();

        for (remote_dir, files) in plan.groups() {
            for transfer in &files {
                info!("[Scp] {} -> {}", transfer.label, transfer.remote);
            }
            let args = self.build_args(remote_dir, &files);
            self.run_scp(&args)?;

            report.sessions += 1;
            report.files_pushed += files.len();
        }

        Ok(report)
    }
}
