// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering options and the native command line they translate to.

use alloc::string::String;
use alloc::vec::Vec;

/// Program name placed first in [`RenderRequest::argv`].
pub const PROGRAM_NAME: &str = "lstopo";

/// Which object indexes the diagram labels show.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum IndexMode {
    /// Let the builder choose.
    #[default]
    Default,
    /// Logical indexes (`-l`).
    Logical,
    /// Physical (OS) indexes (`-p`).
    Physical,
}

/// How much of the I/O subtree is drawn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum IoMode {
    /// Let the builder choose.
    #[default]
    Default,
    /// No I/O objects (`--no-io`).
    None,
    /// Every I/O object, including bridges (`--whole-io`).
    Whole,
}

bitflags::bitflags! {
    /// Boolean rendering switches.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct RenderFlags: u8 {
        /// Draw identical children individually instead of factorizing them.
        ///
        /// Also disables collapsing of identical PCI devices.
        const NO_FACTORIZE = 0b0000_0001;
        /// Include disallowed processing units and memory.
        const DISALLOWED   = 0b0000_0010;
        /// Omit the legend below the diagram.
        const NO_LEGEND    = 0b0000_0100;
    }
}

/// Options that shape what the diagram builder draws.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RenderOptions {
    /// Index labelling.
    pub index: IndexMode,
    /// I/O object filtering.
    pub io: IoMode,
    /// Boolean switches.
    pub flags: RenderFlags,
}

impl RenderOptions {
    /// Returns a copy with `index` set.
    pub fn with_index(mut self, index: IndexMode) -> Self {
        self.index = index;
        self
    }

    /// Returns a copy with `io` set.
    pub fn with_io(mut self, io: IoMode) -> Self {
        self.io = io;
        self
    }

    /// Returns a copy with `flags` set.
    pub fn with_flags(mut self, flags: RenderFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Command-line arguments selecting these options, in canonical order.
    ///
    /// ```
    /// use topoview_diagram::{IndexMode, RenderFlags, RenderOptions};
    ///
    /// let options = RenderOptions::default()
    ///     .with_index(IndexMode::Physical)
    ///     .with_flags(RenderFlags::NO_FACTORIZE | RenderFlags::NO_LEGEND);
    /// assert_eq!(
    ///     options.to_args(),
    ///     ["-p", "--no-factorize", "--no-collapse", "--no-legend"]
    /// );
    /// ```
    pub fn to_args(&self) -> Vec<&'static str> {
        let mut args = Vec::new();
        match self.index {
            IndexMode::Default => {}
            IndexMode::Logical => args.push("-l"),
            IndexMode::Physical => args.push("-p"),
        }
        match self.io {
            IoMode::Default => {}
            IoMode::None => args.push("--no-io"),
            IoMode::Whole => args.push("--whole-io"),
        }
        if self.flags.contains(RenderFlags::NO_FACTORIZE) {
            args.push("--no-factorize");
            args.push("--no-collapse");
        }
        if self.flags.contains(RenderFlags::DISALLOWED) {
            args.push("--disallowed");
        }
        if self.flags.contains(RenderFlags::NO_LEGEND) {
            args.push("--no-legend");
        }
        args
    }

    /// Recovers options from a previously produced argument list.
    ///
    /// Unknown arguments are skipped. When an argument repeats with a
    /// conflicting value the last one wins.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut options = Self::default();
        for arg in args {
            match arg.as_ref() {
                "-l" => options.index = IndexMode::Logical,
                "-p" => options.index = IndexMode::Physical,
                "--no-io" => options.io = IoMode::None,
                "--whole-io" => options.io = IoMode::Whole,
                "--no-factorize" => options.flags |= RenderFlags::NO_FACTORIZE,
                "--disallowed" => options.flags |= RenderFlags::DISALLOWED,
                "--no-legend" => options.flags |= RenderFlags::NO_LEGEND,
                _ => {}
            }
        }
        options
    }
}

/// Where the builder sends its output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Draw into a [`DiagramSink`](crate::DiagramSink).
    #[default]
    Screen,
    /// Verbose text description written to a file.
    Console {
        /// Output file path.
        path: String,
    },
    /// XML topology export written to a file.
    Xml {
        /// Output file path.
        path: String,
    },
}

impl OutputFormat {
    /// Numeric drawing method understood by the native entry point.
    pub fn method(&self) -> u8 {
        match self {
            Self::Screen => 1,
            Self::Console { .. } => 2,
            Self::Xml { .. } => 3,
        }
    }
}

/// A complete invocation: options, output format, and an optional input
/// topology file to load instead of the running machine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RenderRequest {
    /// Rendering options.
    pub options: RenderOptions,
    /// Output format.
    pub output: OutputFormat,
    /// Topology file to read (`-i`).
    pub input: Option<String>,
}

impl RenderRequest {
    /// Full argument vector, starting with [`PROGRAM_NAME`].
    ///
    /// ```
    /// use topoview_diagram::{OutputFormat, RenderRequest};
    ///
    /// let request = RenderRequest {
    ///     output: OutputFormat::Console { path: "out.txt".into() },
    ///     input: Some("machine.xml".into()),
    ///     ..RenderRequest::default()
    /// };
    /// assert_eq!(
    ///     request.argv(),
    ///     ["lstopo", "-v", "-i", "machine.xml", "--of", "console", "out.txt"]
    /// );
    /// ```
    pub fn argv(&self) -> Vec<String> {
        let mut argv: Vec<String> = Vec::new();
        argv.push(PROGRAM_NAME.into());
        argv.extend(self.options.to_args().into_iter().map(String::from));
        if matches!(self.output, OutputFormat::Console { .. }) {
            argv.push("-v".into());
        }
        if let Some(input) = &self.input {
            argv.push("-i".into());
            argv.push(input.clone());
        }
        match &self.output {
            OutputFormat::Screen => {}
            OutputFormat::Console { path } => {
                argv.push("--of".into());
                argv.push("console".into());
                argv.push(path.clone());
            }
            OutputFormat::Xml { path } => {
                argv.push("--of".into());
                argv.push("xml".into());
                argv.push(path.clone());
            }
        }
        argv
    }
}
