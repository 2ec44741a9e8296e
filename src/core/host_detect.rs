//! Detection of the bar program reading our output

use statline_types::OutputFormat;
use std::path::Path;

const PROC: &str = "/proc";

/// One entry of the process table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub ppid: u32,
    pub name: String,
}

impl ProcessInfo {
    /// Parse `/proc/<pid>/stat`: `pid (comm) state ppid ...`. The command name
    /// may itself contain spaces and parentheses, so it ends at the last `)`.
    pub fn from_stat(stat: &str) -> Option<Self> {
        let open = stat.find('(')?;
        let close = stat.rfind(')')?;
        let pid = stat[..open].trim().parse().ok()?;
        let name = stat.get(open + 1..close)?.to_string();

        let mut rest = stat.get(close + 1..)?.split_whitespace();
        let _state = rest.next()?;
        let ppid = rest.next()?.parse().ok()?;

        Some(Self { pid, ppid, name })
    }
}

/// Snapshot of all processes visible in `proc_root`
pub fn read_process_table(proc_root: &Path) -> Vec<ProcessInfo> {
    let entries = match std::fs::read_dir(proc_root) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("Cannot list {}: {}", proc_root.display(), e);
            return Vec::new();
        }
    };

    entries
        .flatten()
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.chars().all(|c| c.is_ascii_digit()))
        })
        .filter_map(|entry| std::fs::read_to_string(entry.path().join("stat")).ok())
        .filter_map(|stat| ProcessInfo::from_stat(&stat))
        .collect()
}

/// Output format understood by a program of this name
pub fn format_for_program(name: &str) -> Option<OutputFormat> {
    match name {
        "dzen2" => Some(OutputFormat::Dzen2),
        "xmobar" => Some(OutputFormat::Xmobar),
        _ => None,
    }
}

/// Find the bar among the relatives of `own_pid`.
///
/// The bar is either our parent (it spawned us) or a sibling (a shell runs
/// `statline | dzen2`, so both share the shell as parent).
pub fn detect_from_processes(own_pid: u32, processes: &[ProcessInfo]) -> Option<OutputFormat> {
    let own = processes.iter().find(|p| p.pid == own_pid)?;

    if let Some(format) = processes
        .iter()
        .find(|p| p.pid == own.ppid)
        .and_then(|parent| format_for_program(&parent.name))
    {
        log::debug!("Parent process is a {} bar", format);
        return Some(format);
    }

    processes
        .iter()
        .filter(|p| p.ppid == own.ppid && p.pid != own_pid)
        .find_map(|sibling| format_for_program(&sibling.name))
}

/// Detect the bar of the running process from `/proc`
pub fn detect() -> Option<OutputFormat> {
    detect_from_processes(std::process::id(), &read_process_table(Path::new(PROC)))
}

/// Turn `auto` into a concrete format, falling back to plain text when the
/// bar cannot be identified
pub fn resolve_output_format<F>(configured: OutputFormat, detect: F) -> OutputFormat
where
    F: FnOnce() -> Option<OutputFormat>,
{
    if configured != OutputFormat::Auto {
        return configured;
    }

    log::info!("Trying to auto-detect output_format setting");
    match detect() {
        Some(format) => {
            log::info!("Auto-detected \"{}\"", format);
            format
        }
        None => {
            log::warn!("Could not auto-detect output_format, falling back to \"none\"");
            OutputFormat::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(pid: u32, ppid: u32, name: &str) -> ProcessInfo {
        ProcessInfo {
            pid,
            ppid,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_parse_stat() {
        let stat = "4242 (statline) S 4200 4242 4200 0 -1 4194304 101 0 0 0";
        assert_eq!(ProcessInfo::from_stat(stat), Some(process(4242, 4200, "statline")));
    }

    #[test]
    fn test_parse_stat_with_odd_name() {
        let stat = "77 (my (weird) bar) R 1 77 77 0 -1";
        assert_eq!(
            ProcessInfo::from_stat(stat),
            Some(process(77, 1, "my (weird) bar"))
        );
        assert_eq!(ProcessInfo::from_stat("garbage"), None);
    }

    #[test]
    fn test_parent_bar() {
        let table = [process(1, 0, "init"), process(10, 1, "xmobar"), process(11, 10, "statline")];
        assert_eq!(detect_from_processes(11, &table), Some(OutputFormat::Xmobar));
    }

    #[test]
    fn test_sibling_in_pipeline() {
        let table = [
            process(20, 1, "sh"),
            process(21, 20, "statline"),
            process(22, 20, "dzen2"),
        ];
        assert_eq!(detect_from_processes(21, &table), Some(OutputFormat::Dzen2));
    }

    #[test]
    fn test_no_bar_found() {
        let table = [process(30, 1, "bash"), process(31, 30, "statline"), process(32, 30, "less")];
        assert_eq!(detect_from_processes(31, &table), None);
        assert_eq!(detect_from_processes(99, &table), None);
    }

    #[test]
    fn test_explicit_format_skips_detection() {
        let format = resolve_output_format(OutputFormat::Xmobar, || {
            panic!("detection must not run")
        });
        assert_eq!(format, OutputFormat::Xmobar);
    }

    #[test]
    fn test_auto_detected() {
        assert_eq!(
            resolve_output_format(OutputFormat::Auto, || Some(OutputFormat::Dzen2)),
            OutputFormat::Dzen2
        );
    }

    #[test]
    fn test_auto_falls_back_to_plain() {
        assert_eq!(
            resolve_output_format(OutputFormat::Auto, || None),
            OutputFormat::None
        );
    }

    #[test]
    fn test_own_process_is_in_table() {
        let table = read_process_table(Path::new(PROC));
        if !table.is_empty() {
            assert!(table.iter().any(|p| p.pid == std::process::id()));
        }
    }

    #[test]
    fn test_missing_proc_root() {
        assert!(read_process_table(Path::new("/nonexistent/proc")).is_empty());
    }
}
