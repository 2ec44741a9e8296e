//! Disk usage sampler

use anyhow::{anyhow, bail, Context, Result};
use statline_core::{
    format_bytes, BoxedSampler, Fragment, ModuleConfig, ModuleInstance, Sampler, SamplerMetadata,
    TickContext, TokenFormatter, TokenValues,
};
use statline_types::source_configs::DiskConfig;
use std::ffi::CString;
use std::io;
use std::mem::MaybeUninit;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

static METADATA: SamplerMetadata = SamplerMetadata {
    id: "disk",
    name: "Disk Usage",
    tokens: &["free", "avail", "used", "total", "percentage_used", "percentage_free"],
};

/// Space on one filesystem, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskUsage {
    pub total: u64,
    /// Free blocks, including those reserved for root
    pub free: u64,
    /// Free blocks usable by unprivileged users
    pub available: u64,
}

impl DiskUsage {
    /// Usage of the filesystem holding `path`, which need not be a mount point
    pub fn of(path: &Path) -> io::Result<Self> {
        let c_path = CString::new(path.as_os_str().as_bytes())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let mut stat = MaybeUninit::<libc::statvfs>::uninit();

        // SAFETY: c_path is NUL-terminated and statvfs fills the buffer on success
        let stat = unsafe {
            if libc::statvfs(c_path.as_ptr(), stat.as_mut_ptr()) != 0 {
                return Err(io::Error::last_os_error());
            }
            stat.assume_init()
        };

        let block_size = stat.f_frsize as u64;
        Ok(Self {
            total: stat.f_blocks as u64 * block_size,
            free: stat.f_bfree as u64 * block_size,
            available: stat.f_bavail as u64 * block_size,
        })
    }

    pub fn used(&self) -> u64 {
        self.total.saturating_sub(self.free)
    }

    fn percent(&self, part: u64) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            part as f64 / self.total as f64 * 100.0
        }
    }

    /// Token bindings for this usage
    pub fn values(&self) -> TokenValues {
        TokenValues::new()
            .with("free", format_bytes(self.free))
            .with("avail", format_bytes(self.available))
            .with("used", format_bytes(self.used()))
            .with("total", format_bytes(self.total))
            .with("percentage_used", format!("{:.1}%", self.percent(self.used())))
            .with("percentage_free", format!("{:.1}%", self.percent(self.free)))
    }
}

/// Disk usage sampler
///
/// Reports the space of the filesystem holding the instance title.
pub struct DiskSampler {
    path: PathBuf,
    config: DiskConfig,
    formatter: TokenFormatter,
}

impl DiskSampler {
    pub fn new(path: &str, config: DiskConfig) -> Result<Self> {
        Ok(Self {
            path: PathBuf::from(path),
            config,
            formatter: TokenFormatter::new(METADATA.tokens)?,
        })
    }

    pub fn create(instance: &ModuleInstance) -> Result<BoxedSampler> {
        let ModuleConfig::Disk(config) = &instance.config else {
            bail!("disk sampler created for '{}'", instance.section);
        };
        let path = instance
            .title()
            .ok_or_else(|| anyhow!("disk needs a path as title"))?;
        Ok(Box::new(Self::new(path, config.clone())?))
    }
}

impl Sampler for DiskSampler {
    fn metadata(&self) -> &SamplerMetadata {
        &METADATA
    }

    fn sample(&mut self, _tick: &TickContext) -> Result<Fragment> {
        let usage = DiskUsage::of(&self.path)
            .with_context(|| format!("statvfs {}", self.path.display()))?;

        Ok(Fragment::neutral(
            self.formatter.render(&self.config.format, &usage.values()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GIB: u64 = 1024 * 1024 * 1024;

    fn render(format: &str, usage: DiskUsage) -> String {
        TokenFormatter::new(METADATA.tokens)
            .unwrap()
            .render(format, &usage.values())
    }

    #[test]
    fn test_usage_tokens() {
        let usage = DiskUsage {
            total: 100 * GIB,
            free: 25 * GIB,
            available: 25 * GIB,
        };
        assert_eq!(render("%free", usage), "25.0 GB");
        assert_eq!(render("%used / %total", usage), "75.0 GB / 100.0 GB");
        assert_eq!(render("%percentage_used used", usage), "75.0% used");
        assert_eq!(render("%percentage_free", usage), "25.0%");
    }

    #[test]
    fn test_empty_filesystem_has_no_division_by_zero() {
        let usage = DiskUsage {
            total: 0,
            free: 0,
            available: 0,
        };
        assert_eq!(render("%percentage_used", usage), "0.0%");
    }

    #[test]
    fn test_reserved_blocks_count_as_free() {
        let usage = DiskUsage {
            total: 100 * GIB,
            free: 30 * GIB,
            available: 25 * GIB,
        };
        assert_eq!(render("%free", usage), "30.0 GB");
        assert_eq!(render("%avail", usage), "25.0 GB");
        assert_eq!(render("%used", usage), "70.0 GB");
        assert_eq!(render("%percentage_free %percentage_used", usage), "30.0% 70.0%");
    }

    #[test]
    fn test_any_path_on_a_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let usage = DiskUsage::of(&nested).unwrap();
        assert!(usage.available <= usage.free);
        assert!(usage.free <= usage.total);

        let mut sampler = DiskSampler::new(nested.to_str().unwrap(), DiskConfig::default()).unwrap();
        assert!(sampler.sample(&TickContext::default()).is_ok());
    }

    #[test]
    fn test_missing_path_fails() {
        assert!(DiskUsage::of(Path::new("/nonexistent/statline/disk")).is_err());

        let mut sampler = DiskSampler::new("/nonexistent/statline/disk", DiskConfig::default()).unwrap();
        assert!(sampler.sample(&TickContext::default()).is_err());
    }
}
