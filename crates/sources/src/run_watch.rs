//! Process watch sampler: is the process named by a pidfile alive?

use anyhow::{anyhow, bail, Result};
use statline_core::{
    BoxedSampler, Fragment, ModuleConfig, ModuleInstance, Sampler, SamplerMetadata, TickContext,
    TokenFormatter, TokenValues,
};
use statline_types::source_configs::RunWatchConfig;
use std::path::{Path, PathBuf};

static METADATA: SamplerMetadata = SamplerMetadata {
    id: "run_watch",
    name: "Process Watch",
    tokens: &["title", "status"],
};

/// Whether a process with this pid exists
pub fn process_running(pid: libc::pid_t) -> bool {
    if pid <= 0 {
        return false;
    }
    // Signal 0 only checks for existence; EPERM means it exists but belongs
    // to someone else
    let rc = unsafe { libc::kill(pid, 0) };
    rc == 0 || std::io::Error::last_os_error().raw_os_error() == Some(libc::EPERM)
}

/// Read the pid stored in a pidfile
pub fn read_pidfile(path: &Path) -> Option<libc::pid_t> {
    std::fs::read_to_string(path)
        .ok()?
        .split_whitespace()
        .next()?
        .parse()
        .ok()
}

/// Process watch sampler
pub struct RunWatchSampler {
    title: String,
    pidfile: PathBuf,
    config: RunWatchConfig,
    formatter: TokenFormatter,
}

impl RunWatchSampler {
    pub fn new(title: &str, config: RunWatchConfig) -> Result<Self> {
        let pidfile = config
            .pidfile
            .as_deref()
            .map(PathBuf::from)
            .ok_or_else(|| anyhow!("run_watch {} has no pidfile", title))?;

        Ok(Self {
            title: title.to_string(),
            pidfile,
            config,
            formatter: TokenFormatter::new(METADATA.tokens)?,
        })
    }

    pub fn create(instance: &ModuleInstance) -> Result<BoxedSampler> {
        let ModuleConfig::RunWatch(config) = &instance.config else {
            bail!("run_watch sampler created for '{}'", instance.section);
        };
        let title = instance
            .title()
            .ok_or_else(|| anyhow!("run_watch needs a title"))?;
        Ok(Box::new(Self::new(title, config.clone())?))
    }

    fn render(&self, running: bool) -> Fragment {
        let values = TokenValues::new()
            .with("title", self.title.clone())
            .with("status", if running { "yes" } else { "no" });
        let text = self.formatter.render(&self.config.format, &values);

        if running {
            Fragment::good(text)
        } else {
            Fragment::bad(text)
        }
    }
}

impl Sampler for RunWatchSampler {
    fn metadata(&self) -> &SamplerMetadata {
        &METADATA
    }

    fn sample(&mut self, _tick: &TickContext) -> Result<Fragment> {
        let running = read_pidfile(&self.pidfile)
            .map(process_running)
            .unwrap_or(false);
        Ok(self.render(running))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statline_types::SemanticColor;
    use std::io::Write;

    fn config(pidfile: &Path) -> RunWatchConfig {
        RunWatchConfig {
            pidfile: Some(pidfile.to_string_lossy().into_owned()),
            ..RunWatchConfig::default()
        }
    }

    #[test]
    fn test_own_process_is_running() {
        assert!(process_running(std::process::id() as libc::pid_t));
        assert!(!process_running(0));
        assert!(!process_running(-1));
    }

    #[test]
    fn test_live_pidfile() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", std::process::id()).unwrap();

        let mut sampler = RunWatchSampler::new("DHCP", config(file.path())).unwrap();
        let fragment = sampler.sample(&TickContext::default()).unwrap();
        assert_eq!(fragment.text, "DHCP: yes");
        assert_eq!(fragment.color, SemanticColor::Good);
    }

    #[test]
    fn test_missing_pidfile() {
        let dir = tempfile::tempdir().unwrap();
        let mut sampler =
            RunWatchSampler::new("VPN", config(&dir.path().join("vpn.pid"))).unwrap();
        let fragment = sampler.sample(&TickContext::default()).unwrap();
        assert_eq!(fragment.text, "VPN: no");
        assert_eq!(fragment.color, SemanticColor::Bad);
    }

    #[test]
    fn test_garbage_pidfile() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not a pid").unwrap();
        assert_eq!(read_pidfile(file.path()), None);
    }

    #[test]
    fn test_pidfile_required() {
        assert!(RunWatchSampler::new("DHCP", RunWatchConfig::default()).is_err());
    }
}
