//! Session phases

use std::fmt;

/// Main workflow phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No source yet
    #[default]
    Idle,
    /// Source is being decoded and composited
    SourceLoading,
    /// Template ready, nothing generated yet
    SourceReady,
    /// Outpaint call in flight
    Outpainting,
    /// A result is displayed
    ResultReady,
    /// Enhance call in flight
    Enhancing,
}

impl Phase {
    /// Phases in which a remote call or compositing is pending
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            Phase::SourceLoading | Phase::Outpainting | Phase::Enhancing
        )
    }

    /// Phases from which an outpaint may start
    pub fn accepts_generate(self) -> bool {
        matches!(self, Phase::SourceReady | Phase::ResultReady)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::SourceLoading => "source-loading",
            Phase::SourceReady => "source-ready",
            Phase::Outpainting => "outpainting",
            Phase::ResultReady => "result-ready",
            Phase::Enhancing => "enhancing",
        };
        f.write_str(name)
    }
}

/// Independent phase of text-to-image source generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InitialImagePhase {
    #[default]
    Idle,
    Generating,
}
