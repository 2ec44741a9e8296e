//! Mixer volume sampler, backed by `amixer`

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use statline_core::{
    BoxedSampler, Fragment, ModuleConfig, ModuleInstance, Sampler, SamplerMetadata, TickContext,
    TokenFormatter, TokenValues,
};
use statline_types::source_configs::VolumeConfig;
use std::process::Command;

static METADATA: SamplerMetadata = SamplerMetadata {
    id: "volume",
    name: "Volume",
    tokens: &["volume"],
};

static PERCENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\d{1,3})%\]").expect("Invalid regex"));
static SWITCH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(on|off)\]").expect("Invalid regex"));

/// Playback state of one mixer control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixerState {
    pub percent: u32,
    pub muted: bool,
}

impl MixerState {
    /// Parse `amixer sget` output, using the first channel that reports a level
    pub fn parse(output: &str) -> Option<Self> {
        output
            .lines()
            .find_map(|line| {
                let percent = PERCENT_RE.captures(line)?.get(1)?.as_str().parse().ok()?;
                let muted = SWITCH_RE
                    .captures(line)
                    .and_then(|c| c.get(1))
                    .is_some_and(|m| m.as_str() == "off");
                Some(Self { percent, muted })
            })
    }
}

/// Volume sampler
pub struct VolumeSampler {
    config: VolumeConfig,
    formatter: TokenFormatter,
}

impl VolumeSampler {
    pub fn new(config: VolumeConfig) -> Result<Self> {
        Ok(Self {
            config,
            formatter: TokenFormatter::new(METADATA.tokens)?,
        })
    }

    pub fn create(instance: &ModuleInstance) -> Result<BoxedSampler> {
        let ModuleConfig::Volume(config) = &instance.config else {
            bail!("volume sampler created for '{}'", instance.section);
        };
        Ok(Box::new(Self::new(config.clone())?))
    }

    fn query(&self) -> Result<String> {
        let control = format!("{},{}", self.config.mixer, self.config.mixer_idx);
        let output = Command::new("amixer")
            .args(["-D", &self.config.device, "sget", &control])
            .output()
            .context("running amixer")?;

        if !output.status.success() {
            bail!(
                "amixer failed for {}: {}",
                control,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    pub fn render(&self, state: MixerState) -> Fragment {
        let volume = if state.muted { 0 } else { state.percent };
        let values = TokenValues::new().with("volume", format!("{}%", volume));
        let text = self.formatter.render(&self.config.format, &values);

        if state.muted {
            Fragment::degraded(text)
        } else {
            Fragment::neutral(text)
        }
    }
}

impl Sampler for VolumeSampler {
    fn metadata(&self) -> &SamplerMetadata {
        &METADATA
    }

    fn sample(&mut self, _tick: &TickContext) -> Result<Fragment> {
        let output = self.query()?;
        let state = MixerState::parse(&output).context("no volume level in amixer output")?;
        Ok(self.render(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statline_types::SemanticColor;

    const STEREO: &str = "\
Simple mixer control 'Master',0
  Capabilities: pvolume pswitch pswitch-joined
  Playback channels: Front Left - Front Right
  Limits: Playback 0 - 65536
  Mono:
  Front Left: Playback 42597 [65%] [on]
  Front Right: Playback 42597 [65%] [on]
";

    #[test]
    fn test_parse_unmuted() {
        assert_eq!(
            MixerState::parse(STEREO),
            Some(MixerState {
                percent: 65,
                muted: false
            })
        );
    }

    #[test]
    fn test_parse_muted_mono() {
        let output = "Simple mixer control 'PCM',1\n  Mono: Playback 31 [100%] [-0.50dB] [off]\n";
        assert_eq!(
            MixerState::parse(output),
            Some(MixerState {
                percent: 100,
                muted: true
            })
        );
    }

    #[test]
    fn test_parse_without_level() {
        assert_eq!(MixerState::parse("Simple mixer control 'Capture',0\n"), None);
    }

    #[test]
    fn test_render() {
        let sampler = VolumeSampler::new(VolumeConfig::default()).unwrap();

        let fragment = sampler.render(MixerState {
            percent: 65,
            muted: false,
        });
        assert_eq!(fragment.text, "♪: 65%");
        assert_eq!(fragment.color, SemanticColor::Neutral);

        let fragment = sampler.render(MixerState {
            percent: 65,
            muted: true,
        });
        assert_eq!(fragment.text, "♪: 0%");
        assert_eq!(fragment.color, SemanticColor::Degraded);
    }
}
