//! Render loop: sample every module, write one line, wait for the next tick

use super::schedule::duration_until_next_tick;
use super::shutdown::ShutdownSignal;
use crate::config::AppConfig;
use anyhow::{Context, Result};
use statline_core::{BoxedSampler, Fragment, Registry, TickContext};
use statline_render::{LineWriter, Markup};
use statline_types::{OutputFormat, SectionRef};
use std::io::{self, Write};
use thiserror::Error;

/// Errors that end the render loop
#[derive(Debug, Error)]
pub enum RenderError {
    /// The reading end of the output went away
    #[error("output closed by the reader")]
    OutputClosed,
    #[error("cannot write status line: {0}")]
    Io(#[source] io::Error),
}

impl From<io::Error> for RenderError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::BrokenPipe => RenderError::OutputClosed,
            _ => RenderError::Io(e),
        }
    }
}

/// A configured module with its sampler
struct Entry {
    section: SectionRef,
    sampler: BoxedSampler,
}

/// Drives the samplers and writes the status line
pub struct UpdateManager<W: Write> {
    entries: Vec<Entry>,
    writer: LineWriter<W>,
    /// Seconds between lines
    interval: u64,
    fragments: Vec<Fragment>,
}

impl<W: Write> UpdateManager<W> {
    /// Create the sampler of every `order` entry.
    ///
    /// `format` must already be resolved (see `host_detect::resolve_output_format`).
    pub fn new(config: &AppConfig, registry: &Registry, format: OutputFormat, out: W) -> Result<Self> {
        let mut entries = Vec::with_capacity(config.ordered_sections().len());
        for instance in config.ordered_sections() {
            let sampler = registry
                .create(instance)
                .with_context(|| format!("cannot set up module '{}'", instance.section))?;
            log::debug!(
                "Module '{}' uses sampler '{}'",
                instance.section,
                sampler.metadata().id
            );
            entries.push(Entry {
                section: instance.section.clone(),
                sampler,
            });
        }

        let general = config.general();
        let markup = Markup::new(format, general.palette(), general.colors);
        log::info!(
            "Rendering {} modules as '{}' every {}s",
            entries.len(),
            format,
            general.interval
        );

        Ok(Self {
            fragments: Vec::with_capacity(entries.len()),
            entries,
            writer: LineWriter::new(out, markup),
            interval: general.interval,
        })
    }

    /// Sample every module once and write the line
    pub fn tick(&mut self, tick: &TickContext) -> Result<(), RenderError> {
        self.fragments.clear();
        for entry in &mut self.entries {
            let fragment = match entry.sampler.sample(tick) {
                Ok(fragment) => fragment,
                Err(e) => {
                    log::debug!("Module '{}' failed: {:#}", entry.section, e);
                    Fragment::bad(String::new())
                }
            };
            self.fragments.push(fragment);
        }

        self.writer.write_line(&self.fragments)?;
        Ok(())
    }

    /// Render lines until shutdown is requested or the output fails
    pub fn run(&mut self, shutdown: &ShutdownSignal) -> Result<(), RenderError> {
        loop {
            let tick = TickContext::capture();
            self.tick(&tick)?;

            // Align on the clock after the flush; slow samplers must not shift the next tick
            let after = TickContext::capture();
            let wait = duration_until_next_tick(after.now.as_ref(), self.interval);
            if shutdown.wait(wait) {
                log::info!("Shutdown requested, stopping");
                return Ok(());
            }
        }
    }

    pub fn writer(&self) -> &W {
        self.writer.get_ref()
    }

    pub fn into_writer(self) -> W {
        self.writer.into_inner()
    }
}
